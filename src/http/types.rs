//! Call outcome types and error definitions.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by executing a call. The single failure signal seen by
/// callers: transport faults, unexpected statuses, decode failures, and
/// timeouts all arrive here. Never retried internally.
#[derive(Debug, Error)]
pub enum FailedCallError {
    /// The transport failed to send the request or receive the response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The call completed with a non-success status.
    #[error("call failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The received status did not match the expected one.
    #[error("expected status {expected}, received {received}")]
    StatusMismatch { expected: u16, received: u16 },

    /// The response body could not be decoded into the expected type.
    #[error("failed to decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The call did not complete within the caller-specified deadline.
    #[error("call timed out after {0:?}")]
    TimedOut(Duration),

    /// The request URL carries no target host; dispatch is refused before
    /// pipeline mutation.
    #[error("request URL has no target host")]
    MissingHost,
}

/// Result type for dispatched calls.
pub type CallResult<T> = Result<T, FailedCallError>;

/// Two-channel call result: a possible success value paired with a possible
/// structured error body.
///
/// Used at call sites that want the error payload of a non-2xx exchange as
/// data rather than as a [`FailedCallError`]. At most one channel is
/// populated by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePair<R, E> {
    response: Option<R>,
    error_body: Option<E>,
}

impl<R, E> ResponsePair<R, E> {
    /// Pair carrying a success value.
    pub fn success(response: R) -> Self {
        Self {
            response: Some(response),
            error_body: None,
        }
    }

    /// Pair carrying a structured error body.
    pub fn error(error_body: E) -> Self {
        Self {
            response: None,
            error_body: Some(error_body),
        }
    }

    /// The success value, if any.
    pub fn response(&self) -> Option<&R> {
        self.response.as_ref()
    }

    /// The error body, if any.
    pub fn error_body(&self) -> Option<&E> {
        self.error_body.as_ref()
    }

    /// Whether the success channel is populated.
    pub fn is_success(&self) -> bool {
        self.response.is_some()
    }

    /// Consume the pair, yielding both channels.
    pub fn into_parts(self) -> (Option<R>, Option<E>) {
        (self.response, self.error_body)
    }
}
