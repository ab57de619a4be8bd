//! Shared secret wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Redacted shared secret keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedSecret(String);
impl SharedSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the secret is the empty string.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for SharedSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<&str> for SharedSecret {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for SharedSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl Debug for SharedSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SharedSecret").field(&"<redacted>").finish()
	}
}
impl Display for SharedSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
