// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
use serde_json::json;
// self
use bill_ledger_client::{
	ApiClient, ClientConfig, Credential, RegisterForm,
	error::{Error, PreconditionError, TransportError},
	http::{ApiRequest, HttpMethod, RawResponse, Transport, TransportFuture},
};

#[derive(Debug)]
enum FakeTransportError {
	TimedOut,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::TimedOut => write!(f, "Request timed out."),
		}
	}
}
impl StdError for FakeTransportError {}

#[derive(Clone)]
enum FakeBehavior {
	Reply(RawResponse),
	TimeOut,
}

struct FakeTransport {
	behavior: FakeBehavior,
	calls: Mutex<Vec<ApiRequest>>,
}
impl FakeTransport {
	fn new(behavior: FakeBehavior) -> Arc<Self> {
		Arc::new(Self { behavior, calls: Mutex::new(Vec::new()) })
	}

	fn calls(&self) -> Vec<ApiRequest> {
		self.calls.lock().clone()
	}
}
impl Transport for FakeTransport {
	type Error = FakeTransportError;

	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Self::Error> {
		self.calls.lock().push(request);

		let behavior = self.behavior.clone();

		Box::pin(async move {
			match behavior {
				FakeBehavior::Reply(response) => Ok(response),
				FakeBehavior::TimeOut => Err(FakeTransportError::TimedOut),
			}
		})
	}
}

fn build_client(transport: Arc<FakeTransport>) -> ApiClient<FakeTransport> {
	let config = ClientConfig::builder()
		.base_url_str("https://ledger.example.com")
		.expect("Fixture URL should parse.")
		.timeout_ms(1_500)
		.build()
		.expect("Fixture config should build.");

	ApiClient::with_transport(config, transport)
}

fn is_token_header(value: &str, user_id: &str) -> bool {
	let Some(token) = value.strip_prefix("token ") else {
		return false;
	};
	let parts = token.split(':').collect::<Vec<_>>();

	parts.len() == 3
		&& parts[0] == user_id
		&& !parts[1].is_empty()
		&& parts[1].chars().all(|c| c.is_ascii_digit())
		&& parts[2].len() == 64
		&& parts[2].chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[tokio::test]
async fn load_bills_round_trip_through_custom_transport() {
	let body = json!({ "result": true, "bills": [{ "id": "1" }] });
	let transport = FakeTransport::new(FakeBehavior::Reply(RawResponse::json(&body)));
	let client = build_client(Arc::clone(&transport));
	let envelope = client
		.load_bills(&Credential::new("secret", "u1"))
		.await
		.expect("Bills should load through the fake transport.");

	assert_eq!(envelope, body);

	let calls = transport.calls();

	assert_eq!(calls.len(), 1, "Exactly one request must be issued.");
	assert_eq!(calls[0].method, HttpMethod::Get);
	assert_eq!(calls[0].url.as_str(), "https://ledger.example.com/bills");
	assert_eq!(calls[0].timeout.as_millis(), 1_500);
	assert!(is_token_header(
		calls[0].header("authorization").expect("Authorization header should be set."),
		"u1"
	));
}

#[tokio::test]
async fn every_call_derives_its_own_token() {
	let transport =
		FakeTransport::new(FakeBehavior::Reply(RawResponse::json(&json!({ "result": true }))));
	let client = build_client(Arc::clone(&transport));
	let credential = Credential::new("secret", "u1");

	client.list_groups(&credential).await.expect("First call should succeed.");
	tokio::time::sleep(std::time::Duration::from_millis(5)).await;
	client.list_groups(&credential).await.expect("Second call should succeed.");

	let headers = transport
		.calls()
		.into_iter()
		.map(|request| request.header("authorization").map(str::to_owned))
		.collect::<Vec<_>>();

	assert_eq!(headers.len(), 2);
	assert_ne!(headers[0], headers[1], "Tokens must not be reused across calls.");
}

#[tokio::test]
async fn transport_failures_keep_their_source() {
	let transport = FakeTransport::new(FakeBehavior::TimeOut);
	let client = build_client(Arc::clone(&transport));
	let err = client
		.create_bill(&Credential::new("secret", "u1"), "Groceries")
		.await
		.expect_err("Timed out transport must fail.");

	match err {
		Error::Transport(TransportError::Network { source }) => {
			assert!(matches!(
				source.downcast_ref::<FakeTransportError>(),
				Some(FakeTransportError::TimedOut)
			));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	let calls = transport.calls();

	assert_eq!(calls.len(), 1, "Failures must not be retried.");
	assert_eq!(calls[0].json_body(), Some(json!({ "name": "Groceries" })));
}

#[tokio::test]
async fn validation_failures_issue_no_requests() {
	let transport =
		FakeTransport::new(FakeBehavior::Reply(RawResponse::json(&json!({ "result": true }))));
	let client = build_client(Arc::clone(&transport));
	let err = client
		.register(&RegisterForm::new("", "a", "b"))
		.await
		.expect_err("Empty e-mail must be rejected.");

	assert!(matches!(err, Error::Precondition(PreconditionError::Validation { .. })));
	assert!(transport.calls().is_empty());
}
