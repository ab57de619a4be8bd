//! Client configuration: base URL and request timeout.
//!
//! [`ClientConfig`] is immutable once built and is shared by every request the client issues;
//! [`AppSettings`] reproduces the settings file that selects the base URL per
//! [`DeploymentMode`].

/// Deployment-mode settings file.
pub mod settings;

pub use settings::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Immutable transport configuration consumed by [`ApiClient`](crate::client::ApiClient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Base URL that every request path is appended to.
	pub base_url: Url,
	/// Timeout applied to every request.
	pub timeout: Duration,
}
impl ClientConfig {
	/// Timeout used when none is configured.
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5_000);

	/// Creates a new builder.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Builds a config for `base_url` with the default timeout.
	pub fn new(base_url: &str) -> Result<Self, ConfigError> {
		Self::builder().base_url_str(base_url)?.build()
	}

	/// Joins `path` onto the base URL verbatim.
	///
	/// A trailing `/` on the base is trimmed so `https://host/api/` and `/bills` produce
	/// `https://host/api/bills`.
	pub fn endpoint_url(&self, path: &str) -> Result<Url, ConfigError> {
		let base = self.base_url.as_str().trim_end_matches('/');

		Url::parse(&format!("{base}{path}"))
			.map_err(|source| ConfigError::InvalidRequestUrl { path: path.to_owned(), source })
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
	/// Base URL for all requests.
	pub base_url: Option<Url>,
	/// Optional timeout override.
	pub timeout: Option<Duration>,
}
impl ClientConfigBuilder {
	/// Sets the base URL.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Parses and sets the base URL.
	pub fn base_url_str(self, url: &str) -> Result<Self, ConfigError> {
		let url = Url::parse(url).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		Ok(self.base_url(url))
	}

	/// Overrides the request timeout (defaults to 5 seconds).
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Overrides the request timeout in milliseconds.
	pub fn timeout_ms(self, millis: u64) -> Self {
		self.timeout(Duration::from_millis(millis))
	}

	/// Consumes the builder and validates the resulting config.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let base_url = self.base_url.ok_or(ConfigError::MissingBaseUrl)?;
		let timeout = self.timeout.unwrap_or(ClientConfig::DEFAULT_TIMEOUT);

		validate_base_url(&base_url)?;

		if timeout.is_zero() {
			return Err(ConfigError::ZeroTimeout);
		}

		Ok(ClientConfig { base_url, timeout })
	}
}

fn validate_base_url(url: &Url) -> Result<(), ConfigError> {
	if !matches!(url.scheme(), "http" | "https") {
		return Err(ConfigError::UnsupportedScheme { url: url.to_string() });
	}
	if url.cannot_be_a_base() {
		return Err(ConfigError::CannotBeABase { url: url.to_string() });
	}

	Ok(())
}
