//! Synchronous call execution and outcome classification.
//!
//! A single call moves through `Created → Dispatched → {Succeeded | Failed |
//! TimedOut}`. Dispatch is entered exactly once, since
//! [`PendingCall::execute`] consumes the call. A timeout surfaces as a
//! failure whose message preserves the distinguishing detail.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::http::types::{CallResult, FailedCallError, ResponsePair};
use crate::service::call::PendingCall;

/// Executes pending calls and classifies their outcomes.
///
/// The two switches control whether the raw response is logged on success
/// and on failure. The original test-harness call sites enabled both, so
/// [`Default`] does too.
#[derive(Debug, Clone, Copy)]
pub struct CallExecutor {
    log_on_success: bool,
    log_on_failure: bool,
}

impl Default for CallExecutor {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl CallExecutor {
    pub fn new(log_on_success: bool, log_on_failure: bool) -> Self {
        Self {
            log_on_success,
            log_on_failure,
        }
    }

    /// Typed-result mode: execute the call and decode the 2xx payload.
    ///
    /// Any non-success outcome (transport error, non-2xx status, decode
    /// failure) is raised as [`FailedCallError`] with the cause attached.
    pub fn perform<T: DeserializeOwned>(&self, call: PendingCall<T>) -> CallResult<T> {
        let call_id = call.id();
        let response = call.execute()?;
        let status = response.status();
        let body = response.text()?;

        if status.is_success() {
            if self.log_on_success {
                tracing::info!(call_id = %call_id, status = %status, body = %body, "call succeeded");
            }
            match serde_json::from_str(&body) {
                Ok(value) => Ok(value),
                Err(source) => Err(FailedCallError::Decode { source, body }),
            }
        } else {
            if self.log_on_failure {
                tracing::warn!(call_id = %call_id, status = %status, body = %body, "call failed");
            }
            Err(FailedCallError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Dual-channel mode: decode the success body on 2xx, the structured
    /// error body otherwise, and return both channels as data.
    ///
    /// Used where the service returns an error payload alongside a non-2xx
    /// status and the call site wants it as a value rather than an error.
    pub fn perform_pair<R, E>(&self, call: PendingCall<R>) -> CallResult<ResponsePair<R, E>>
    where
        R: DeserializeOwned,
        E: DeserializeOwned,
    {
        let call_id = call.id();
        let response = call.execute()?;
        let status = response.status();
        let body = response.text()?;

        if status.is_success() {
            if self.log_on_success {
                tracing::info!(call_id = %call_id, status = %status, body = %body, "call succeeded");
            }
            match serde_json::from_str(&body) {
                Ok(value) => Ok(ResponsePair::success(value)),
                Err(source) => Err(FailedCallError::Decode { source, body }),
            }
        } else {
            if self.log_on_failure {
                tracing::warn!(call_id = %call_id, status = %status, body = %body, "call returned error body");
            }
            match serde_json::from_str(&body) {
                Ok(value) => Ok(ResponsePair::error(value)),
                Err(source) => Err(FailedCallError::Decode { source, body }),
            }
        }
    }

    /// Expected-status mode: execute with a completion deadline and compare
    /// the received status against `expected`. No payload is decoded.
    ///
    /// A deadline overrun is reported as [`FailedCallError::TimedOut`]; a
    /// mismatched status as [`FailedCallError::StatusMismatch`].
    pub fn expect_status<T>(
        &self,
        call: PendingCall<T>,
        expected: u16,
        within: Duration,
    ) -> CallResult<()> {
        let call_id = call.id();
        match call.with_deadline(within).execute() {
            Ok(response) => {
                let received = response.status().as_u16();
                if received == expected {
                    if self.log_on_success {
                        tracing::info!(call_id = %call_id, status = received, "call matched expected status");
                    }
                    Ok(())
                } else {
                    if self.log_on_failure {
                        tracing::warn!(
                            call_id = %call_id,
                            expected,
                            received,
                            "call did not match expected status"
                        );
                    }
                    Err(FailedCallError::StatusMismatch { expected, received })
                }
            }
            Err(FailedCallError::Transport(source)) if source.is_timeout() => {
                if self.log_on_failure {
                    tracing::warn!(call_id = %call_id, deadline = ?within, "call timed out");
                }
                Err(FailedCallError::TimedOut(within))
            }
            Err(other) => Err(other),
        }
    }
}
