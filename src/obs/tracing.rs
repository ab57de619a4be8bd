// self
use crate::{_prelude::*, obs::Operation};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided operation.
	pub fn new(operation: Operation) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("bill_ledger_client.call", operation = operation.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = operation;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a diagnostic event for an authentication attempt. The secret is never recorded.
pub fn trace_auth_attempt(operation: Operation, user_id: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(operation = operation.as_str(), user_id, "Authenticating ledger call.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (operation, user_id);
	}
}
