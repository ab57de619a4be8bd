//! Per-call credential pair.

// self
use crate::{_prelude::*, auth::SharedSecret, error::PreconditionError};

/// Shared secret plus user identifier, supplied by the caller for each authenticated call.
///
/// The pair is never stored by the client; every scoped client derives a fresh
/// [`AuthToken`](crate::auth::AuthToken) from it and drops it once the request is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
	/// Long-lived secret shared with the service.
	pub secret: SharedSecret,
	/// Identifier of the user the secret belongs to.
	pub user_id: String,
}
impl Credential {
	/// Creates a credential pair without validating it.
	pub fn new(secret: impl Into<SharedSecret>, user_id: impl Into<String>) -> Self {
		Self { secret: secret.into(), user_id: user_id.into() }
	}

	/// Ensures both halves are present.
	pub fn ensure_present(&self) -> Result<(), PreconditionError> {
		if self.secret.is_empty() || self.user_id.is_empty() {
			Err(PreconditionError::Unauthorized)
		} else {
			Ok(())
		}
	}
}
