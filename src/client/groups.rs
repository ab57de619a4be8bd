//! Bill group operations.

// self
use crate::{
	_prelude::*,
	auth::Credential,
	client::{Amount, ApiClient, json_body},
	endpoint::Endpoint,
	envelope::Envelope,
	http::Transport,
};

/// Group definition sent when creating or updating a group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupSpec {
	/// Group name.
	pub name: String,
	/// Display color, forwarded as-is.
	pub color: String,
	/// Bills that belong to the group.
	pub included_bills: Vec<String>,
	/// Bill that receives distributions, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub main_bill_id: Option<String>,
	/// Share assigned to the main bill, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub proportion: Option<Amount>,
}
impl GroupSpec {
	/// Creates a spec with no bills, no main bill, and no proportion.
	pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			color: color.into(),
			included_bills: Vec::new(),
			main_bill_id: None,
			proportion: None,
		}
	}

	/// Adds a bill to the group.
	pub fn include_bill(mut self, bill_id: impl Into<String>) -> Self {
		self.included_bills.push(bill_id.into());

		self
	}

	/// Sets the main bill.
	pub fn main_bill(mut self, bill_id: impl Into<String>) -> Self {
		self.main_bill_id = Some(bill_id.into());

		self
	}

	/// Sets the main bill's proportion.
	pub fn proportion(mut self, proportion: impl Into<Amount>) -> Self {
		self.proportion = Some(proportion.into());

		self
	}
}

impl<T> ApiClient<T>
where
	T: ?Sized + Transport,
{
	/// Creates a group (`PUT /bill/groups/`).
	pub async fn create_group(&self, credential: &Credential, spec: &GroupSpec) -> Result<Envelope> {
		self.call(Endpoint::CreateGroup, Some(credential), Some(json_body(spec)?)).await
	}

	/// Replaces a group's definition (`POST /bill/group/{group_id}`).
	pub async fn update_group(
		&self,
		credential: &Credential,
		group_id: &str,
		spec: &GroupSpec,
	) -> Result<Envelope> {
		self.call(Endpoint::UpdateGroup { group_id }, Some(credential), Some(json_body(spec)?))
			.await
	}

	/// Lists the caller's groups (`GET /bill/groups/`).
	pub async fn list_groups(&self, credential: &Credential) -> Result<Envelope> {
		self.call(Endpoint::Groups, Some(credential), None).await
	}

	/// Deletes a group (`DELETE /bill/group/{group_id}`).
	pub async fn delete_group(&self, credential: &Credential, group_id: &str) -> Result<Envelope> {
		self.call(Endpoint::DeleteGroup { group_id }, Some(credential), None).await
	}
}
