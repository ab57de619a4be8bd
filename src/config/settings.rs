// self
use crate::{_prelude::*, config::ClientConfig, error::ConfigError};

/// Deployment mode that selects which base URL to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeploymentMode {
	/// Local or staging service (`api_dev`).
	Development,
	/// Production service (`api`).
	#[default]
	Production,
}
impl DeploymentMode {
	/// Returns a stable label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Development => "development",
			Self::Production => "production",
		}
	}
}
impl Display for DeploymentMode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for DeploymentMode {
	type Err = std::convert::Infallible;

	/// Anything other than a development label selects production.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mode = match s.trim().to_ascii_lowercase().as_str() {
			"development" | "dev" => Self::Development,
			_ => Self::Production,
		};

		Ok(mode)
	}
}

/// Settings file listing the production and development base URLs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
	/// Production base URL.
	pub api: String,
	/// Development base URL.
	pub api_dev: String,
}
impl AppSettings {
	/// Parses the JSON settings document.
	pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
		serde_json::from_str(raw).map_err(ConfigError::SettingsParse)
	}

	/// Base URL string selected for `mode`.
	pub fn base_url(&self, mode: DeploymentMode) -> &str {
		match mode {
			DeploymentMode::Development => &self.api_dev,
			DeploymentMode::Production => &self.api,
		}
	}

	/// Builds a [`ClientConfig`] for `mode` with the default timeout.
	pub fn config_for(&self, mode: DeploymentMode) -> Result<ClientConfig, ConfigError> {
		ClientConfig::new(self.base_url(mode))
	}
}
