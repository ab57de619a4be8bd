//! Timestamp-signed request tokens.
//!
//! The wire form is `user_id:timestamp:signature`, where `timestamp` is the derivation instant in
//! Unix milliseconds and `signature` is the lowercase hex SHA-256 digest of the decimal timestamp
//! followed by the shared secret. The service verifies tokens by recomputing the digest, so the
//! layout must stay byte-for-byte identical. There is no client-side expiry or replay check.

// crates.io
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

/// Prefix placed before the token in the `Authorization` header.
pub const AUTHORIZATION_SCHEME: &str = "token";

/// Request token derived from a shared secret at a specific instant.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
	user_id: String,
	timestamp_ms: i128,
	signature: String,
}
impl AuthToken {
	/// Derives a token for `user_id` using the current wall-clock time.
	pub fn derive(secret: &str, user_id: &str) -> Self {
		Self::derive_at(secret, user_id, now_millis())
	}

	/// Derives a token for `user_id` as of `timestamp_ms`.
	pub fn derive_at(secret: &str, user_id: &str, timestamp_ms: i128) -> Self {
		let mut hasher = Sha256::new();

		hasher.update(timestamp_ms.to_string().as_bytes());
		hasher.update(secret.as_bytes());

		Self {
			user_id: user_id.to_owned(),
			timestamp_ms,
			signature: format!("{:x}", hasher.finalize()),
		}
	}

	/// User identifier embedded in the token.
	pub fn user_id(&self) -> &str {
		&self.user_id
	}

	/// Derivation instant in Unix milliseconds.
	pub fn timestamp_ms(&self) -> i128 {
		self.timestamp_ms
	}

	/// Lowercase hex SHA-256 signature.
	pub fn signature(&self) -> &str {
		&self.signature
	}

	/// Value for the `Authorization` header.
	pub fn header_value(&self) -> String {
		format!("{AUTHORIZATION_SCHEME} {self}")
	}
}
impl Display for AuthToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}:{}:{}", self.user_id, self.timestamp_ms, self.signature)
	}
}
impl Debug for AuthToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthToken")
			.field("user_id", &self.user_id)
			.field("timestamp_ms", &self.timestamp_ms)
			.field("signature", &"<redacted>")
			.finish()
	}
}

fn now_millis() -> i128 {
	OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}
