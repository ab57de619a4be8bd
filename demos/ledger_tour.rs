//! Walks through the ledger client against a local mock service.
//!
//! 1. Resolve a [`ClientConfig`] from the settings document for the chosen [`DeploymentMode`].
//! 2. Probe connectivity, log in, and reuse the returned secret + user id as a [`Credential`].
//! 3. Create a bill, record a charge, and move money between bills.
//! 4. Show how a falsy envelope surfaces as an [`Error::Api`].

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use bill_ledger_client::{
	ApiClient, AppSettings, Credential, DeploymentMode, LoginForm, error::Error,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	mock_service(&server).await;

	let settings = AppSettings::from_json(&format!(
		r#"{{"api":"https://ledger.example.com","api_dev":"{}"}}"#,
		server.base_url()
	))?;
	let mode = "development".parse::<DeploymentMode>()?;
	let client = ApiClient::new(settings.config_for(mode)?)?;

	println!("Service reachable: {}.", client.check_connectivity().await?);

	let session = client.login(&LoginForm::new("ann@example.com", "correct horse")).await?;
	let credential =
		Credential::new(session.field::<String>("token")?, session.field::<String>("uid")?);
	let bill = client.create_bill(&credential, "Groceries").await?;

	println!("Created bill: {}.", bill.field::<String>("id")?);

	client.create_revision(&credential, "b1", 120).await?;
	client.transfer(&credential, "b1", "b2", 50).await?;

	match client.decline_last_revision(&credential, "b2").await {
		Ok(_) => println!("Mock service unexpectedly declined a revision."),
		Err(Error::Api(e)) => println!("Service refused the call: {e}."),
		Err(e) => return Err(e.into()),
	}

	Ok(())
}

async fn mock_service(server: &MockServer) {
	let ok = "{\"result\":true}";

	server
		.mock_async(|when, then| {
			when.method(GET).path("/");
			then.status(200).header("content-type", "application/json").body(ok);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/user/login");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"result\":true,\"token\":\"demo-secret\",\"uid\":\"u1\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(PUT).path("/bill");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"result\":true,\"id\":\"b1\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(PUT).path("/bill/b1/revisions");
			then.status(200).header("content-type", "application/json").body(ok);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/bill/transfer/b1/b2/");
			then.status(200).header("content-type", "application/json").body(ok);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(DELETE).path("/bill/b2/revision");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"result\":false,\"message\":\"No revisions to decline\"}");
		})
		.await;
}
