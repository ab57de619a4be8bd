// self
use crate::{
	error::{Error, Result, TransportError},
	obs::{CallOutcome, Operation},
};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(operation: Operation, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"bill_ledger_client_call_total",
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}

/// Records how a call settled.
///
/// Failures additionally increment `bill_ledger_client_call_failure_total`, labeled by
/// `operation` + `kind` (see [`failure_kind`]).
pub fn record_call_result<V>(operation: Operation, result: &Result<V>) {
	match result {
		Ok(_) => record_call_outcome(operation, CallOutcome::Success),
		Err(e) => {
			record_call_outcome(operation, CallOutcome::Failure);
			record_failure_kind(operation, failure_kind(e));
		},
	}
}

/// Stable label naming the layer a failure came from.
pub fn failure_kind(error: &Error) -> &'static str {
	match error {
		Error::Precondition(_) => "precondition",
		Error::Api(_) => "api",
		Error::Transport(TransportError::Network { .. }) => "network",
		Error::Transport(TransportError::Status { .. }) => "status",
		Error::Config(_) => "config",
		Error::Decode(_) => "decode",
	}
}

fn record_failure_kind(operation: Operation, kind: &'static str) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"bill_ledger_client_call_failure_total",
			"operation" => operation.as_str(),
			"kind" => kind
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, kind);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::{ApiError, PreconditionError};

	#[test]
	fn failures_are_labeled_by_layer() {
		let cases = [
			(Error::from(PreconditionError::Unauthorized), "precondition"),
			(Error::from(ApiError::result_false()), "api"),
			(Error::from(TransportError::Status { status: 502, message: None }), "status"),
			(Error::from(TransportError::network(std::fmt::Error)), "network"),
		];

		for (error, label) in cases {
			assert_eq!(failure_kind(&error), label, "{error:?}");
		}
	}

	#[test]
	fn record_call_result_noop_without_metrics() {
		record_call_result(Operation::Transfer, &Ok(()));
		record_call_result::<()>(
			Operation::Transfer,
			&Err(Error::from(PreconditionError::Unauthorized)),
		);
	}
}
