//! Response envelope shared by every ledger endpoint.
//!
//! Every body has the shape `{ "result": bool, "message"?: string, ...payload }`. A truthy
//! `result` means the whole object is the payload; otherwise `message` explains the failure.
//! [`parse_envelope`] is the only place these semantics are decided.

// self
use crate::{
	_prelude::*,
	error::{ApiError, DecodeError},
};

/// Successful envelope payload (the full response object, `result` included).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(JsonMap<String, Value>);
impl Envelope {
	/// Returns the raw value of `field`.
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.0.get(field)
	}

	/// Borrows the underlying JSON object.
	pub fn as_map(&self) -> &JsonMap<String, Value> {
		&self.0
	}

	/// Consumes the envelope into its JSON object.
	pub fn into_map(self) -> JsonMap<String, Value> {
		self.0
	}

	/// Consumes the envelope into a JSON value.
	pub fn into_value(self) -> Value {
		Value::Object(self.0)
	}

	/// Decodes the whole payload into `T`.
	pub fn decode<T>(&self) -> Result<T, DecodeError>
	where
		T: DeserializeOwned,
	{
		decode_value(Value::Object(self.0.clone()))
	}

	/// Decodes a single payload field into `T`.
	pub fn field<T>(&self, field: &str) -> Result<T, DecodeError>
	where
		T: DeserializeOwned,
	{
		let value = self
			.0
			.get(field)
			.cloned()
			.ok_or_else(|| DecodeError::MissingField { field: field.to_owned() })?;

		decode_value(value)
	}
}
impl From<Envelope> for Value {
	fn from(envelope: Envelope) -> Self {
		envelope.into_value()
	}
}
impl PartialEq<Value> for Envelope {
	fn eq(&self, other: &Value) -> bool {
		other.as_object().is_some_and(|map| *map == self.0)
	}
}

/// Unwraps a response body through the envelope contract.
///
/// Returns the body when it is an object whose `result` is truthy. Otherwise fails with the
/// body's truthy `message`, or with "API result is false" when there is no body or no message.
pub fn parse_envelope(body: Option<Value>) -> Result<Envelope, ApiError> {
	match body {
		Some(Value::Object(map)) if map.get("result").is_some_and(is_truthy) => Ok(Envelope(map)),
		other => Err(other
			.as_ref()
			.and_then(failure_message)
			.map_or_else(ApiError::result_false, ApiError::new)),
	}
}

/// Interprets the `result` field of a connectivity probe; a missing body reads as `false`.
pub fn result_flag(body: Option<&Value>) -> bool {
	body.and_then(|value| value.get("result")).is_some_and(is_truthy)
}

/// Extracts the failure reason from an envelope-shaped body.
///
/// Any truthy `message` counts. Strings are used verbatim; other values (`404`, `true`,
/// objects) are rendered as compact JSON text. Falsy messages (`""`, `0`, `null`) fall back
/// to the generic failure.
pub(crate) fn failure_message(body: &Value) -> Option<String> {
	match body.get("message").filter(|message| is_truthy(message))? {
		Value::String(message) => Some(message.clone()),
		other => Some(other.to_string()),
	}
}

/// Dynamic truthiness: `false`, `null`, `0`, and `""` are falsy; everything else is truthy.
fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
		Value::String(text) => !text.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

fn decode_value<T>(value: Value) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(value).map_err(DecodeError::from)
}
