//! Account registration and login (anonymous endpoints).

// crates.io
use serde::ser::{SerializeMap, Serializer};
// self
use crate::{
	_prelude::*,
	client::{ApiClient, json_body},
	endpoint::Endpoint,
	envelope::Envelope,
	error::PreconditionError,
	http::Transport,
};

/// Keys owned by the typed [`RegisterForm`] fields.
const REGISTER_FIELDS: [&str; 3] = ["email", "name", "password"];

/// Registration form sent to `PUT /user/register`.
///
/// The typed fields always win on the wire: an `extra` entry named like one of them is never
/// serialized.
#[derive(Clone, PartialEq, Deserialize)]
pub struct RegisterForm {
	/// Account e-mail address.
	pub email: String,
	/// Display name.
	pub name: String,
	/// Account password.
	pub password: String,
	/// Additional fields forwarded verbatim.
	#[serde(flatten)]
	pub extra: JsonMap<String, Value>,
}
impl RegisterForm {
	/// Creates a form with the required fields.
	pub fn new(
		email: impl Into<String>,
		name: impl Into<String>,
		password: impl Into<String>,
	) -> Self {
		Self {
			email: email.into(),
			name: name.into(),
			password: password.into(),
			extra: JsonMap::new(),
		}
	}

	/// Adds an extra field to the request body.
	///
	/// `email`, `name`, and `password` assign the typed field instead, so they stay subject to
	/// [`RegisterForm::validate`]. Non-string values are stored as their JSON text and `null`
	/// clears the field.
	pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		let key = key.into();
		let value = value.into();
		let slot = match key.as_str() {
			"email" => &mut self.email,
			"name" => &mut self.name,
			"password" => &mut self.password,
			_ => {
				self.extra.insert(key, value);

				return self;
			},
		};

		*slot = match value {
			Value::Null => String::new(),
			Value::String(text) => text,
			other => other.to_string(),
		};

		self
	}

	/// Ensures `email`, `name`, and `password` are non-empty.
	pub fn validate(&self) -> Result<(), PreconditionError> {
		ensure_filled([
			("email", self.email.as_str()),
			("name", self.name.as_str()),
			("password", self.password.as_str()),
		])
	}
}
impl Serialize for RegisterForm {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = serializer.serialize_map(None)?;

		map.serialize_entry("email", &self.email)?;
		map.serialize_entry("name", &self.name)?;
		map.serialize_entry("password", &self.password)?;

		for (key, value) in &self.extra {
			if !REGISTER_FIELDS.contains(&key.as_str()) {
				map.serialize_entry(key, value)?;
			}
		}

		map.end()
	}
}
impl Debug for RegisterForm {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RegisterForm")
			.field("email", &self.email)
			.field("name", &self.name)
			.field("password", &"<redacted>")
			.field("extra", &self.extra)
			.finish()
	}
}

/// Login form sent to `POST /user/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
	/// Account e-mail address.
	pub email: String,
	/// Account password.
	pub password: String,
}
impl LoginForm {
	/// Creates a login form.
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self { email: email.into(), password: password.into() }
	}

	/// Ensures `email` and `password` are non-empty.
	pub fn validate(&self) -> Result<(), PreconditionError> {
		ensure_filled([("email", self.email.as_str()), ("password", self.password.as_str())])
	}
}
impl Debug for LoginForm {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginForm")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

impl<T> ApiClient<T>
where
	T: ?Sized + Transport,
{
	/// Registers a new account. Fails before dispatch when a required field is empty.
	pub async fn register(&self, form: &RegisterForm) -> Result<Envelope> {
		form.validate()?;

		self.call(Endpoint::Register, None, Some(json_body(form)?)).await
	}

	/// Logs in with e-mail and password. Fails before dispatch when a field is empty.
	pub async fn login(&self, form: &LoginForm) -> Result<Envelope> {
		form.validate()?;

		self.call(Endpoint::Login, None, Some(json_body(form)?)).await
	}
}

fn ensure_filled<const N: usize>(
	fields: [(&'static str, &str); N],
) -> Result<(), PreconditionError> {
	let missing = fields
		.into_iter()
		.filter(|(_, value)| value.is_empty())
		.map(|(name, _)| name)
		.collect::<Vec<_>>();

	if missing.is_empty() { Ok(()) } else { Err(PreconditionError::Validation { missing }) }
}
