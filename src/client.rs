//! Authenticated request pipeline and the ledger resource operations built on it.
//!
//! [`ApiClient`] owns an immutable [`ClientConfig`] plus a shared [`Transport`]. Every call
//! builds its own [`ScopedClient`] (anonymous, or carrying a freshly derived
//! [`AuthToken`]), dispatches exactly one request, and routes the body through
//! [`parse_envelope`]. Nothing is cached between calls and nothing is retried.

mod account;
mod bills;
mod groups;

pub use account::*;
pub use bills::*;
pub use groups::*;

// self
use crate::{
	_prelude::*,
	auth::{AuthToken, Credential},
	config::ClientConfig,
	endpoint::Endpoint,
	envelope::{self, Envelope, parse_envelope},
	error::{ConfigError, PreconditionError, TransportError},
	http::{ApiRequest, Transport},
	obs::{self, CallOutcome, CallSpan, Operation},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// Entry point for every ledger operation.
///
/// The client is cheap to clone and safe to share across tasks: it holds the transport behind
/// an [`Arc`] and never mutates its configuration after construction.
pub struct ApiClient<T>
where
	T: ?Sized + Transport,
{
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	/// Base URL and timeout applied to every request.
	pub config: ClientConfig,
}
impl<T> ApiClient<T>
where
	T: ?Sized + Transport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(config: ClientConfig, transport: impl Into<Arc<T>>) -> Self {
		Self { transport: transport.into(), config }
	}

	/// Builds a scoped client carrying `Authorization: token <AuthToken>`.
	///
	/// Fails with [`PreconditionError::Unauthorized`](crate::error::PreconditionError) when
	/// either half of the credential is empty. A new token is derived on every call.
	pub fn authenticated(&self, credential: &Credential) -> Result<ScopedClient<'_, T>> {
		credential.ensure_present()?;

		let token = AuthToken::derive(credential.secret.expose(), &credential.user_id);

		Ok(ScopedClient { client: self, authorization: Some(token.header_value()) })
	}

	/// Builds a scoped client without an `Authorization` header.
	pub fn anonymous(&self) -> ScopedClient<'_, T> {
		ScopedClient { client: self, authorization: None }
	}

	/// Probes the service root.
	///
	/// Returns the `result` flag of the body, or `false` when the body is missing or is not an
	/// envelope. Only transport failures are reported as errors.
	pub async fn check_connectivity(&self) -> Result<bool> {
		const OPERATION: Operation = Operation::CheckConnectivity;

		let span = CallSpan::new(OPERATION);

		obs::record_call_outcome(OPERATION, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let body = self.anonymous().dispatch(Endpoint::Root, None).await?;

				Ok(envelope::result_flag(body.as_ref()))
			})
			.await;

		obs::record_call_result(OPERATION, &result);

		result
	}

	/// Loads the profile of the user behind `credential` (`GET /user/me`).
	pub async fn check_auth(&self, credential: &Credential) -> Result<Envelope> {
		obs::trace_auth_attempt(Operation::CheckAuth, &credential.user_id);

		self.call(Endpoint::CurrentUser, Some(credential), None).await
	}

	/// Runs one envelope-returning call through the shared pipeline.
	pub(crate) async fn call(
		&self,
		endpoint: Endpoint<'_>,
		credential: Option<&Credential>,
		body: Option<Value>,
	) -> Result<Envelope> {
		let operation = endpoint.operation();
		let span = CallSpan::new(operation);

		obs::record_call_outcome(operation, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let scoped = match (endpoint.requires_auth(), credential) {
					(true, Some(credential)) => self.authenticated(credential)?,
					(true, None) => return Err(PreconditionError::Unauthorized.into()),
					(false, _) => self.anonymous(),
				};
				let body = scoped.dispatch(endpoint, body).await?;

				Ok(parse_envelope(body)?)
			})
			.await;

		obs::record_call_result(operation, &result);

		result
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: ClientConfig) -> Result<Self> {
		Ok(Self::with_transport(config, ReqwestTransport::build()?))
	}
}
impl<T> Clone for ApiClient<T>
where
	T: ?Sized + Transport,
{
	fn clone(&self) -> Self {
		Self { transport: Arc::clone(&self.transport), config: self.config.clone() }
	}
}
impl<T> Debug for ApiClient<T>
where
	T: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient").field("config", &self.config).finish()
	}
}

/// Client scoped to a single logical call.
///
/// Carries the `Authorization` header (when authenticated) alongside the parent client's base
/// URL and timeout. [`ScopedClient::dispatch`] consumes the scope so a derived token is never
/// reused for a second request.
pub struct ScopedClient<'a, T>
where
	T: ?Sized + Transport,
{
	client: &'a ApiClient<T>,
	authorization: Option<String>,
}
impl<T> ScopedClient<'_, T>
where
	T: ?Sized + Transport,
{
	/// Value of the `Authorization` header, if any.
	pub fn authorization(&self) -> Option<&str> {
		self.authorization.as_deref()
	}

	/// Whether the scope carries an `Authorization` header.
	pub fn is_authenticated(&self) -> bool {
		self.authorization.is_some()
	}

	/// Resolves `endpoint` and `body` into a transport request.
	pub fn request(&self, endpoint: Endpoint<'_>, body: Option<Value>) -> Result<ApiRequest> {
		let config = &self.client.config;
		let url = config.endpoint_url(&endpoint.path())?;
		let mut headers = BTreeMap::new();

		headers.insert("accept".to_owned(), "application/json".to_owned());

		if let Some(authorization) = &self.authorization {
			headers.insert("authorization".to_owned(), authorization.clone());
		}

		let body = match body {
			Some(value) => {
				headers.insert("content-type".to_owned(), "application/json".to_owned());

				Some(serde_json::to_vec(&value).map_err(ConfigError::BodySerialize)?)
			},
			None => None,
		};

		Ok(ApiRequest { method: endpoint.method(), url, headers, body, timeout: config.timeout })
	}

	/// Sends one request and returns the decoded body.
	///
	/// Non-2xx statuses fail with [`TransportError::Status`]; the envelope message is attached
	/// when the error body carries one.
	pub async fn dispatch(
		self,
		endpoint: Endpoint<'_>,
		body: Option<Value>,
	) -> Result<Option<Value>> {
		let request = self.request(endpoint, body)?;
		let response =
			self.client.transport.execute(request).await.map_err(TransportError::network)?;
		let body = response.body_value();

		if !response.is_success() {
			return Err(TransportError::Status {
				status: response.status,
				message: body.as_ref().and_then(envelope::failure_message),
			}
			.into());
		}

		Ok(body)
	}
}
impl<T> Debug for ScopedClient<'_, T>
where
	T: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ScopedClient")
			.field("base_url", &self.client.config.base_url.as_str())
			.field("authenticated", &self.is_authenticated())
			.finish()
	}
}

/// Serializes a request body for [`ApiClient::call`].
fn json_body<B>(body: &B) -> Result<Value>
where
	B: ?Sized + Serialize,
{
	Ok(serde_json::to_value(body).map_err(ConfigError::BodySerialize)?)
}

#[cfg(test)]
pub(crate) mod tests {
	// crates.io
	use parking_lot::Mutex;
	use serde_json::json;
	// self
	use super::*;
	use crate::{
		error::ApiError,
		http::{HttpMethod, RawResponse, TransportFuture},
	};

	#[derive(Debug)]
	pub(crate) struct Unreachable;
	impl Display for Unreachable {
		fn fmt(&self, f: &mut Formatter) -> FmtResult {
			f.write_str("Service unreachable.")
		}
	}
	impl StdError for Unreachable {}

	/// Transport double that records requests and answers with one canned response, then with
	/// empty `200` responses.
	#[derive(Default)]
	pub(crate) struct RecordingTransport {
		pub(crate) requests: Mutex<Vec<ApiRequest>>,
		responses: Mutex<Vec<Result<RawResponse, ()>>>,
	}
	impl RecordingTransport {
		pub(crate) fn replying(response: RawResponse) -> Self {
			let transport = Self::default();

			transport.responses.lock().push(Ok(response));

			transport
		}

		pub(crate) fn unreachable() -> Self {
			let transport = Self::default();

			transport.responses.lock().push(Err(()));

			transport
		}

		pub(crate) fn recorded(&self) -> Vec<ApiRequest> {
			self.requests.lock().clone()
		}
	}
	impl Transport for RecordingTransport {
		type Error = Unreachable;

		fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Self::Error> {
			self.requests.lock().push(request);

			let response = self.responses.lock().pop().unwrap_or(Ok(RawResponse::default()));

			Box::pin(async move { response.map_err(|_| Unreachable) })
		}
	}

	pub(crate) fn client_with(
		transport: RecordingTransport,
	) -> (ApiClient<RecordingTransport>, Arc<RecordingTransport>) {
		let transport = Arc::new(transport);
		let config = ClientConfig::new("https://ledger.example.com/api")
			.expect("Test config should build.");

		(ApiClient::with_transport(config, Arc::clone(&transport)), transport)
	}

	#[test]
	fn authenticated_rejects_every_empty_combination() {
		let (client, transport) = client_with(RecordingTransport::default());

		for (secret, user_id) in [("", "u1"), ("secret", ""), ("", "")] {
			let err = client
				.authenticated(&Credential::new(secret, user_id))
				.expect_err("Empty credentials must be rejected.");

			assert!(matches!(err, Error::Precondition(PreconditionError::Unauthorized)));
		}

		assert!(transport.recorded().is_empty());
	}

	#[test]
	fn scoped_request_carries_token_header_and_config() {
		let (client, _) = client_with(RecordingTransport::default());
		let scoped = client
			.authenticated(&Credential::new("secret", "u1"))
			.expect("Valid credentials should build a scoped client.");
		let request = scoped
			.request(Endpoint::Bills, None)
			.expect("Request for a static path should build.");
		let authorization = request.header("authorization").expect("Header should be set.");

		assert!(authorization.starts_with("token u1:"));
		assert_eq!(authorization.rsplit(':').next().map(str::len), Some(64));
		assert_eq!(request.url.as_str(), "https://ledger.example.com/api/bills");
		assert_eq!(request.method, HttpMethod::Get);
		assert_eq!(request.timeout, ClientConfig::DEFAULT_TIMEOUT);
		assert_eq!(request.header("content-type"), None);
		assert!(request.body.is_none());
		assert!(!format!("{scoped:?}").contains("u1:"));
	}

	#[test]
	fn anonymous_request_has_no_authorization() {
		let (client, _) = client_with(RecordingTransport::default());
		let request = client
			.anonymous()
			.request(Endpoint::Login, Some(json!({ "email": "a@b.c" })))
			.expect("Request should build.");

		assert_eq!(request.header("authorization"), None);
		assert_eq!(request.header("content-type"), Some("application/json"));
		assert_eq!(request.json_body(), Some(json!({ "email": "a@b.c" })));
	}

	#[tokio::test]
	async fn connectivity_reads_result_flag() {
		let (client, transport) =
			client_with(RecordingTransport::replying(RawResponse::json(&json!({ "result": true }))));

		assert!(client.check_connectivity().await.expect("Probe should succeed."));

		let requests = transport.recorded();

		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].url.as_str(), "https://ledger.example.com/api/");
		assert_eq!(requests[0].header("authorization"), None);
	}

	#[tokio::test]
	async fn connectivity_tolerates_missing_body() {
		let (client, _) =
			client_with(RecordingTransport::replying(RawResponse { status: 200, body: Vec::new() }));

		assert!(!client.check_connectivity().await.expect("Missing body is not an error."));
	}

	#[tokio::test]
	async fn connectivity_propagates_transport_failures() {
		let (client, _) = client_with(RecordingTransport::unreachable());
		let err = client.check_connectivity().await.expect_err("Transport failure must surface.");

		match err {
			Error::Transport(TransportError::Network { source }) =>
				assert!(source.downcast_ref::<Unreachable>().is_some()),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[tokio::test]
	async fn check_auth_routes_through_envelope() {
		let (client, transport) = client_with(RecordingTransport::replying(RawResponse::json(
			&json!({ "result": false, "message": "Invalid token" }),
		)));
		let err = client
			.check_auth(&Credential::new("secret", "u1"))
			.await
			.expect_err("Falsy envelope must fail.");

		assert!(matches!(err, Error::Api(ApiError { message }) if message == "Invalid token"));

		let requests = transport.recorded();

		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].url.path(), "/api/user/me");
		assert!(
			requests[0]
				.header("authorization")
				.is_some_and(|value| value.starts_with("token u1:"))
		);
	}

	#[tokio::test]
	async fn missing_envelope_body_is_an_api_failure() {
		let (client, _) =
			client_with(RecordingTransport::replying(RawResponse { status: 200, body: Vec::new() }));
		let err = client
			.check_auth(&Credential::new("secret", "u1"))
			.await
			.expect_err("Missing body must fail outside the connectivity probe.");

		assert!(
			matches!(err, Error::Api(ApiError { message }) if message == "API result is false")
		);
	}

	#[tokio::test]
	async fn error_status_surfaces_envelope_message() {
		let (client, _) = client_with(RecordingTransport::replying(RawResponse {
			status: 401,
			body: json!({ "result": false, "message": "Token expired" }).to_string().into_bytes(),
		}));
		let err = client
			.check_auth(&Credential::new("secret", "u1"))
			.await
			.expect_err("HTTP 401 must fail.");

		match err {
			Error::Transport(TransportError::Status { status, message }) => {
				assert_eq!(status, 401);
				assert_eq!(message.as_deref(), Some("Token expired"));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}
}
