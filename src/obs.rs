//! Optional observability helpers for ledger calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run every call inside a `bill_ledger_client.call` span carrying the
//!   `operation` field, and to emit a `debug` event for each authentication attempt.
//! - Enable `metrics` to increment the `bill_ledger_client_call_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`, and
//!   `bill_ledger_client_call_failure_total` for failures, labeled by `operation` + `kind`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Ledger operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Unauthenticated probe of the service root.
	CheckConnectivity,
	/// Current-user lookup.
	CheckAuth,
	/// Account registration.
	Register,
	/// Account login.
	Login,
	/// Bill listing.
	LoadBills,
	/// Bill creation.
	CreateBill,
	/// Bill deletion.
	DeleteBill,
	/// Revision creation on one bill.
	CreateRevision,
	/// Revision listing for one bill.
	LoadBillRevisions,
	/// Revision listing across all bills.
	LoadAllRevisions,
	/// Removal of a bill's latest revision.
	DeclineLastRevision,
	/// Transfer between two bills.
	Transfer,
	/// Group creation.
	CreateGroup,
	/// Group update.
	UpdateGroup,
	/// Group listing.
	ListGroups,
	/// Group deletion.
	DeleteGroup,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::CheckConnectivity => "check_connectivity",
			Operation::CheckAuth => "check_auth",
			Operation::Register => "register",
			Operation::Login => "login",
			Operation::LoadBills => "load_bills",
			Operation::CreateBill => "create_bill",
			Operation::DeleteBill => "delete_bill",
			Operation::CreateRevision => "create_revision",
			Operation::LoadBillRevisions => "load_bill_revisions",
			Operation::LoadAllRevisions => "load_all_revisions",
			Operation::DeclineLastRevision => "decline_last_revision",
			Operation::Transfer => "transfer",
			Operation::CreateGroup => "create_group",
			Operation::UpdateGroup => "update_group",
			Operation::ListGroups => "list_groups",
			Operation::DeleteGroup => "delete_group",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
