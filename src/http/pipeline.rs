//! Per-request mutation pipeline.
//!
//! # Responsibilities
//! - Set the `Host` header from the request's target host
//! - Fill gaps from the configured header set without overwriting
//! - Align content metadata with the actual buffered body
//! - Log bodies and header blocks when configured
//!
//! # Design Decisions
//! - Header comparison is case-insensitive (per HTTP spec, via `HeaderMap`)
//! - Body logging failures degrade to warnings; the call always dispatches
//! - Mutation is deterministic: same request and header set, same result

use reqwest::blocking::Request;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE, HOST};
use uuid::Uuid;

use crate::http::types::{CallResult, FailedCallError};

/// Mutates outgoing requests before dispatch.
///
/// Holds the generation-time header set and the logging switches; both are
/// immutable for the lifetime of the transport the pipeline is attached to.
#[derive(Debug, Clone)]
pub(crate) struct RequestPipeline {
    headers: HeaderMap,
    log_headers: bool,
    log_request_body: bool,
}

impl RequestPipeline {
    pub(crate) fn new(headers: HeaderMap, log_headers: bool, log_request_body: bool) -> Self {
        Self {
            headers,
            log_headers,
            log_request_body,
        }
    }

    /// Apply the mutation rules to `request`, in order.
    ///
    /// Fails only when the request URL has no target host; every logging
    /// rule recovers locally.
    pub(crate) fn prepare(&self, request: &mut Request, call_id: Uuid) -> CallResult<()> {
        let host = host_header_value(request).ok_or(FailedCallError::MissingHost)?;

        // Body bytes are captured up front; header mutation below must not
        // alias the body borrow.
        let body_bytes: Option<Vec<u8>> = request
            .body()
            .and_then(|body| body.as_bytes())
            .map(<[u8]>::to_vec);

        // 1. Host always reflects the target, overwriting prior values.
        if let Ok(value) = HeaderValue::from_str(&host) {
            request.headers_mut().insert(HOST, value);
        }

        // 2. Configured headers only fill gaps.
        for (name, value) in &self.headers {
            if !request.headers().contains_key(name) {
                request.headers_mut().append(name.clone(), value.clone());
            }
        }

        // 3. Content metadata comes from the measured body, overriding
        //    exactly Content-Length and Content-Type.
        match body_bytes.as_deref() {
            Some(bytes) if !bytes.is_empty() => {
                if let Some(declared) = request.headers().get(CONTENT_TYPE).cloned() {
                    request
                        .headers_mut()
                        .insert(CONTENT_LENGTH, HeaderValue::from(bytes.len()));
                    request.headers_mut().insert(CONTENT_TYPE, declared);
                }

                // 4. Body logging: pretty-print JSON, warn on anything else.
                if self.log_request_body {
                    self.log_body(bytes, call_id);
                }
            }
            _ => {
                if self.log_request_body {
                    tracing::warn!(call_id = %call_id, "request body is empty");
                }
            }
        }

        // 5. Final header block, after all mutations above.
        if self.log_headers {
            let rendered: Vec<String> = request
                .headers()
                .iter()
                .map(|(name, value)| {
                    format!("{}: {}", name, value.to_str().unwrap_or("<binary>"))
                })
                .collect();
            tracing::info!(
                call_id = %call_id,
                count = request.headers().len(),
                headers = %rendered.join("\n"),
                "outgoing request headers"
            );
        }

        Ok(())
    }

    fn log_body(&self, bytes: &[u8], call_id: Uuid) {
        match serde_json::from_slice::<serde_json::Value>(bytes) {
            Ok(value) => {
                let pretty =
                    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
                tracing::info!(call_id = %call_id, body = %pretty, "outgoing request body");
            }
            Err(_) => {
                tracing::warn!(
                    call_id = %call_id,
                    body = %String::from_utf8_lossy(bytes),
                    "could not parse request body"
                );
            }
        }
    }
}

/// Host header value for the request target: host, plus port when the URL
/// carries a non-default one.
fn host_header_value(request: &Request) -> Option<String> {
    let url = request.url();
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
