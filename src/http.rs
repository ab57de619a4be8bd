//! Transport primitives for ledger service calls.
//!
//! The module exposes [`Transport`] alongside the [`ApiRequest`] and [`RawResponse`] values it
//! exchanges so downstream crates can plug in custom HTTP stacks or test doubles. The client
//! builds a fully resolved request (absolute URL, headers, JSON body, timeout) and hands it to
//! the transport exactly once; the transport returns the status and raw body bytes without
//! interpreting either.

// self
use crate::_prelude::*;

/// Boxed future returned by [`Transport::execute`].
pub type TransportFuture<'a, E> = Pin<Box<dyn Future<Output = Result<RawResponse, E>> + 'a + Send>>;

/// HTTP methods used by the ledger service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `PUT`
	Put,
	/// `POST`
	Post,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Returns the canonical upper-case method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Put => "PUT",
			Self::Post => "POST",
			Self::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully resolved request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: HttpMethod,
	/// Absolute request URL.
	pub url: Url,
	/// Header pairs, keyed by lower-case name.
	pub headers: BTreeMap<String, String>,
	/// Serialized JSON body, if any.
	pub body: Option<Vec<u8>>,
	/// Timeout the transport must enforce.
	pub timeout: Duration,
}
impl ApiRequest {
	/// Returns the header value for `name` (lower-case).
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).map(String::as_str)
	}

	/// Decodes the body as JSON, mainly for assertions in tests and custom transports.
	pub fn json_body(&self) -> Option<Value> {
		self.body.as_deref().and_then(|bytes| serde_json::from_slice(bytes).ok())
	}
}

/// Status and body returned by a [`Transport`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw body bytes; empty when the service sent no body.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Creates a `200 OK` response carrying `value` as JSON.
	pub fn json(value: &Value) -> Self {
		Self { status: 200, body: value.to_string().into_bytes() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Interprets the body.
	///
	/// An empty body yields `None`; a JSON document is decoded; anything else is kept as a JSON
	/// string so it never reads as an envelope.
	pub fn body_value(&self) -> Option<Value> {
		if self.body.iter().all(u8::is_ascii_whitespace) {
			return None;
		}

		Some(serde_json::from_slice(&self.body).unwrap_or_else(|_| {
			Value::String(String::from_utf8_lossy(&self.body).into_owned())
		}))
	}
}

/// Abstraction over HTTP stacks capable of executing one ledger request.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can back many
/// [`ApiClient`](crate::client::ApiClient) clones, and the returned future must be `Send` so
/// callers can move in-flight calls across executor threads. A transport performs no retries;
/// any failure it reports is surfaced to the caller as
/// [`TransportError::Network`](crate::error::TransportError::Network).
pub trait Transport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type Error: 'static + Send + Sync + StdError;

	/// Executes `request` and resolves once the whole body has been read.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Self::Error>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a transport backed by a freshly configured reqwest client.
	pub fn build() -> Result<Self, crate::error::ConfigError> {
		Ok(Self(ReqwestClient::builder().build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
	type Error = ReqwestError;

	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Self::Error> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Put => reqwest::Method::PUT,
				HttpMethod::Post => reqwest::Method::POST,
				HttpMethod::Delete => reqwest::Method::DELETE,
			};
			let mut builder = client.request(method, request.url).timeout(request.timeout);

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(RawResponse { status, body })
		})
	}
}
