//! Bill, revision, and transfer operations.

// crates.io
use serde_json::Number;
// self
use crate::{
	_prelude::*,
	auth::Credential,
	client::{ApiClient, json_body},
	endpoint::Endpoint,
	envelope::Envelope,
	http::Transport,
};

/// JSON number sent for charges, transfers, and group proportions.
///
/// Integers stay integers on the wire (`50`, not `50.0`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Number);
impl Amount {
	/// Wraps a finite floating-point value; returns `None` for NaN or infinities.
	pub fn from_f64(value: f64) -> Option<Self> {
		Number::from_f64(value).map(Self)
	}

	/// Borrows the underlying JSON number.
	pub fn as_number(&self) -> &Number {
		&self.0
	}
}
impl Display for Amount {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.0, f)
	}
}

macro_rules! impl_amount_from {
	($($ty:ty),+) => {
		$(
			impl From<$ty> for Amount {
				fn from(value: $ty) -> Self {
					Self(Number::from(value))
				}
			}
		)+
	};
}

impl_amount_from!(i8, i16, i32, i64, u8, u16, u32, u64);

#[derive(Serialize)]
struct NewBill<'a> {
	name: &'a str,
}

#[derive(Serialize)]
struct NewRevision<'a> {
	charge_amount: &'a Amount,
}

#[derive(Serialize)]
struct TransferBody<'a> {
	amount: &'a Amount,
}

impl<T> ApiClient<T>
where
	T: ?Sized + Transport,
{
	/// Lists the caller's bills (`GET /bills`).
	pub async fn load_bills(&self, credential: &Credential) -> Result<Envelope> {
		self.call(Endpoint::Bills, Some(credential), None).await
	}

	/// Creates a bill named `name` (`PUT /bill`).
	pub async fn create_bill(&self, credential: &Credential, name: &str) -> Result<Envelope> {
		let body = json_body(&NewBill { name })?;

		self.call(Endpoint::CreateBill, Some(credential), Some(body)).await
	}

	/// Deletes a bill (`DELETE /bill/{bill_id}`).
	pub async fn delete_bill(&self, credential: &Credential, bill_id: &str) -> Result<Envelope> {
		self.call(Endpoint::DeleteBill { bill_id }, Some(credential), None).await
	}

	/// Records a charge against a bill (`PUT /bill/{bill_id}/revisions`).
	pub async fn create_revision(
		&self,
		credential: &Credential,
		bill_id: &str,
		charge_amount: impl Into<Amount>,
	) -> Result<Envelope> {
		let charge_amount = charge_amount.into();
		let body = json_body(&NewRevision { charge_amount: &charge_amount })?;

		self.call(Endpoint::CreateRevision { bill_id }, Some(credential), Some(body)).await
	}

	/// Lists revisions of one bill since `from_date`.
	pub async fn load_bill_revisions(
		&self,
		credential: &Credential,
		bill_id: &str,
		from_date: &str,
	) -> Result<Envelope> {
		self.call(Endpoint::BillRevisions { bill_id, from_date }, Some(credential), None).await
	}

	/// Lists revisions of every bill since `from_date`.
	pub async fn load_all_revisions(
		&self,
		credential: &Credential,
		from_date: &str,
	) -> Result<Envelope> {
		self.call(Endpoint::AllRevisions { from_date }, Some(credential), None).await
	}

	/// Removes the latest revision of a bill (`DELETE /bill/{bill_id}/revision`).
	pub async fn decline_last_revision(
		&self,
		credential: &Credential,
		bill_id: &str,
	) -> Result<Envelope> {
		self.call(Endpoint::DeclineLastRevision { bill_id }, Some(credential), None).await
	}

	/// Moves `amount` from one bill to another.
	pub async fn transfer(
		&self,
		credential: &Credential,
		source_bill_id: &str,
		target_bill_id: &str,
		amount: impl Into<Amount>,
	) -> Result<Envelope> {
		let amount = amount.into();
		let body = json_body(&TransferBody { amount: &amount })?;

		self.call(
			Endpoint::Transfer { source_bill_id, target_bill_id },
			Some(credential),
			Some(body),
		)
		.await
	}
}
