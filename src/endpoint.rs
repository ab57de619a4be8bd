//! Route table for the ledger service.
//!
//! Each [`Endpoint`] knows its HTTP method, its path (with caller-supplied identifiers
//! interpolated verbatim), and whether it needs an `Authorization` header.

// self
use crate::{http::HttpMethod, obs::Operation};

/// Ledger route with its path parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint<'a> {
	/// `GET /`
	Root,
	/// `GET /user/me`
	CurrentUser,
	/// `PUT /user/register`
	Register,
	/// `POST /user/login`
	Login,
	/// `GET /bills`
	Bills,
	/// `PUT /bill`
	CreateBill,
	/// `DELETE /bill/{bill_id}`
	DeleteBill {
		/// Bill to delete.
		bill_id: &'a str,
	},
	/// `PUT /bill/{bill_id}/revisions`
	CreateRevision {
		/// Bill receiving the revision.
		bill_id: &'a str,
	},
	/// `GET /bill/{bill_id}/revisions/{from_date}`
	BillRevisions {
		/// Bill whose revisions are listed.
		bill_id: &'a str,
		/// Lower bound forwarded as-is to the service.
		from_date: &'a str,
	},
	/// `GET /bills/revisions/{from_date}`
	AllRevisions {
		/// Lower bound forwarded as-is to the service.
		from_date: &'a str,
	},
	/// `DELETE /bill/{bill_id}/revision`
	DeclineLastRevision {
		/// Bill whose latest revision is removed.
		bill_id: &'a str,
	},
	/// `POST /bill/transfer/{source_bill_id}/{target_bill_id}/`
	Transfer {
		/// Bill debited by the transfer.
		source_bill_id: &'a str,
		/// Bill credited by the transfer.
		target_bill_id: &'a str,
	},
	/// `PUT /bill/groups/`
	CreateGroup,
	/// `POST /bill/group/{group_id}`
	UpdateGroup {
		/// Group to update.
		group_id: &'a str,
	},
	/// `GET /bill/groups/`
	Groups,
	/// `DELETE /bill/group/{group_id}`
	DeleteGroup {
		/// Group to delete.
		group_id: &'a str,
	},
}
impl Endpoint<'_> {
	/// HTTP method for the route.
	pub const fn method(&self) -> HttpMethod {
		match self {
			Self::Root
			| Self::CurrentUser
			| Self::Bills
			| Self::BillRevisions { .. }
			| Self::AllRevisions { .. }
			| Self::Groups => HttpMethod::Get,
			Self::Register | Self::CreateBill | Self::CreateRevision { .. } | Self::CreateGroup =>
				HttpMethod::Put,
			Self::Login | Self::Transfer { .. } | Self::UpdateGroup { .. } => HttpMethod::Post,
			Self::DeleteBill { .. } | Self::DeclineLastRevision { .. } | Self::DeleteGroup { .. } =>
				HttpMethod::Delete,
		}
	}

	/// Path relative to the configured base URL.
	///
	/// Identifiers are interpolated verbatim: `/` adds segments, `?` and `#` start the query and
	/// fragment, and spaces are percent-encoded when the URL is parsed.
	pub fn path(&self) -> String {
		match self {
			Self::Root => "/".into(),
			Self::CurrentUser => "/user/me".into(),
			Self::Register => "/user/register".into(),
			Self::Login => "/user/login".into(),
			Self::Bills => "/bills".into(),
			Self::CreateBill => "/bill".into(),
			Self::DeleteBill { bill_id } => format!("/bill/{bill_id}"),
			Self::CreateRevision { bill_id } => format!("/bill/{bill_id}/revisions"),
			Self::BillRevisions { bill_id, from_date } =>
				format!("/bill/{bill_id}/revisions/{from_date}"),
			Self::AllRevisions { from_date } => format!("/bills/revisions/{from_date}"),
			Self::DeclineLastRevision { bill_id } => format!("/bill/{bill_id}/revision"),
			Self::Transfer { source_bill_id, target_bill_id } =>
				format!("/bill/transfer/{source_bill_id}/{target_bill_id}/"),
			Self::CreateGroup | Self::Groups => "/bill/groups/".into(),
			Self::UpdateGroup { group_id } | Self::DeleteGroup { group_id } =>
				format!("/bill/group/{group_id}"),
		}
	}

	/// Whether the route requires an `Authorization` header.
	pub const fn requires_auth(&self) -> bool {
		!matches!(self, Self::Root | Self::Register | Self::Login)
	}

	/// Observability label for the route.
	pub const fn operation(&self) -> Operation {
		match self {
			Self::Root => Operation::CheckConnectivity,
			Self::CurrentUser => Operation::CheckAuth,
			Self::Register => Operation::Register,
			Self::Login => Operation::Login,
			Self::Bills => Operation::LoadBills,
			Self::CreateBill => Operation::CreateBill,
			Self::DeleteBill { .. } => Operation::DeleteBill,
			Self::CreateRevision { .. } => Operation::CreateRevision,
			Self::BillRevisions { .. } => Operation::LoadBillRevisions,
			Self::AllRevisions { .. } => Operation::LoadAllRevisions,
			Self::DeclineLastRevision { .. } => Operation::DeclineLastRevision,
			Self::Transfer { .. } => Operation::Transfer,
			Self::CreateGroup => Operation::CreateGroup,
			Self::UpdateGroup { .. } => Operation::UpdateGroup,
			Self::Groups => Operation::ListGroups,
			Self::DeleteGroup { .. } => Operation::DeleteGroup,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn route_table_matches_service_contract() {
		use HttpMethod::*;

		let table = [
			(Endpoint::Root, Get, "/", false),
			(Endpoint::CurrentUser, Get, "/user/me", true),
			(Endpoint::Register, Put, "/user/register", false),
			(Endpoint::Login, Post, "/user/login", false),
			(Endpoint::Bills, Get, "/bills", true),
			(Endpoint::CreateBill, Put, "/bill", true),
			(Endpoint::DeleteBill { bill_id: "b1" }, Delete, "/bill/b1", true),
			(Endpoint::CreateRevision { bill_id: "b1" }, Put, "/bill/b1/revisions", true),
			(
				Endpoint::BillRevisions { bill_id: "b1", from_date: "2024-01-01" },
				Get,
				"/bill/b1/revisions/2024-01-01",
				true,
			),
			(
				Endpoint::AllRevisions { from_date: "2024-01-01" },
				Get,
				"/bills/revisions/2024-01-01",
				true,
			),
			(Endpoint::DeclineLastRevision { bill_id: "b1" }, Delete, "/bill/b1/revision", true),
			(
				Endpoint::Transfer { source_bill_id: "A", target_bill_id: "B" },
				Post,
				"/bill/transfer/A/B/",
				true,
			),
			(Endpoint::CreateGroup, Put, "/bill/groups/", true),
			(Endpoint::UpdateGroup { group_id: "g1" }, Post, "/bill/group/g1", true),
			(Endpoint::Groups, Get, "/bill/groups/", true),
			(Endpoint::DeleteGroup { group_id: "g1" }, Delete, "/bill/group/g1", true),
		];

		for (endpoint, method, path, auth) in table {
			assert_eq!(endpoint.method(), method, "{endpoint:?} method");
			assert_eq!(endpoint.path(), path, "{endpoint:?} path");
			assert_eq!(endpoint.requires_auth(), auth, "{endpoint:?} auth");
		}
	}

	#[test]
	fn operations_have_distinct_labels() {
		let labels = [
			Endpoint::Root,
			Endpoint::CurrentUser,
			Endpoint::Bills,
			Endpoint::Groups,
			Endpoint::CreateGroup,
			Endpoint::UpdateGroup { group_id: "g" },
			Endpoint::DeleteGroup { group_id: "g" },
		]
		.map(|endpoint| endpoint.operation().as_str());

		for (idx, label) in labels.iter().enumerate() {
			assert!(!labels[idx + 1..].contains(label), "Duplicate label {label}.");
		}
	}
}
