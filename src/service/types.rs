//! Generation-time error definitions.

use thiserror::Error;

/// Errors raised while generating a proxy or constructing a call.
///
/// Everything here is fatal at its point of origin; once a
/// [`PendingCall`](crate::service::call::PendingCall) exists, failures are
/// reported through [`FailedCallError`](crate::http::types::FailedCallError)
/// instead.
#[derive(Debug, Error)]
pub enum WasapiError {
    /// Neither the configuration nor the service definition declares a
    /// base address.
    #[error("no base address configured and service '{service}' declares none")]
    MissingBaseAddress { service: &'static str },

    /// A declared or joined address is not a valid URL.
    #[error("invalid address '{address}': {source}")]
    InvalidBaseAddress {
        address: String,
        #[source]
        source: url::ParseError,
    },

    /// The service definition declares no endpoint with this name.
    #[error("unknown endpoint '{0}'")]
    UnknownEndpoint(String),

    /// A path template placeholder was left unfilled.
    #[error("endpoint '{endpoint}' is missing a value for path parameter '{name}'")]
    MissingPathParam {
        endpoint: &'static str,
        name: String,
    },

    /// A request body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The HTTP client could not be constructed.
    #[error("failed to construct HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request could not be constructed.
    #[error("failed to construct request: {0}")]
    Request(#[source] reqwest::Error),
}

/// Result type for generation-time operations.
pub type WasapiResult<T> = Result<T, WasapiError>;
