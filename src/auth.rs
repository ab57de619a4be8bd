//! Credential pairs and the timestamp-signed request token derived from them.

pub mod credential;
pub mod secret;
pub mod token;

pub use credential::*;
pub use secret::*;
pub use token::*;
