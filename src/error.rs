//! Client-level error types shared across the request pipeline.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Message used when the service answers without a usable failure reason.
pub const API_RESULT_FALSE: &str = "API result is false";

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Required input was absent; raised before any network I/O.
	#[error(transparent)]
	Precondition(#[from] PreconditionError),
	/// The service reported failure through the response envelope.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Transport failure (DNS, TCP, TLS, timeout, non-success status).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Envelope payload does not match the requested type.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}
impl Error {
	/// Returns `true` when the failure happened before any request was dispatched.
	pub fn is_precondition(&self) -> bool {
		matches!(self, Self::Precondition(_))
	}
}

/// Input checks performed client-side before dispatch.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum PreconditionError {
	/// Shared secret or user identifier is missing.
	#[error("Unauthorized")]
	Unauthorized,
	/// Required form fields are empty.
	#[error("Some form fields is empty")]
	Validation {
		/// Names of the empty fields, in declaration order.
		missing: Vec<&'static str>,
	},
}

/// Failure reported by the service (`result` was falsy).
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct ApiError {
	/// Server-supplied message, or [`API_RESULT_FALSE`] when none was provided.
	pub message: String,
}
impl ApiError {
	/// Creates an error carrying the server message.
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}

	/// Creates the generic error used when no message is available.
	pub fn result_false() -> Self {
		Self::new(API_RESULT_FALSE)
	}
}

/// Transport-level failures (network, IO, HTTP status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the ledger service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Service answered with a non-success HTTP status.
	#[error("Ledger service responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Envelope message carried by the error response, if any.
		message: Option<String>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Configuration and request construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// No base URL was supplied to the builder.
	#[error("Missing base URL.")]
	MissingBaseUrl,
	/// Base URL could not be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than http or https.
	#[error("Base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// URL that failed validation.
		url: String,
	},
	/// Base URL cannot carry request paths (e.g. `mailto:`-style URLs).
	#[error("Base URL cannot be used as a request base: {url}.")]
	CannotBeABase {
		/// URL that failed validation.
		url: String,
	},
	/// Request timeout must be positive.
	#[error("Request timeout must be greater than zero.")]
	ZeroTimeout,
	/// Interpolated request path produced an invalid URL.
	#[error("Request URL for `{path}` is invalid.")]
	InvalidRequestUrl {
		/// Path that was appended to the base URL.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	BodySerialize(#[source] serde_json::Error),
	/// Settings file is not valid JSON or misses a field.
	#[error("Settings file could not be parsed.")]
	SettingsParse(#[source] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Typed decoding failure for envelope payloads.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Payload did not match the requested type.
	#[error("Envelope payload does not match the requested type at `{path}`.")]
	Payload {
		/// JSON path of the failing element.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Payload lacks the requested field.
	#[error("Envelope payload is missing the `{field}` field.")]
	MissingField {
		/// Requested field name.
		field: String,
	},
}
impl From<serde_path_to_error::Error<serde_json::Error>> for DecodeError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::Payload { path, source: e.into_inner() }
	}
}
