//! Transport construction and dispatch.
//!
//! # Responsibilities
//! - Build the shared blocking client from a [`ClientConfig`], in a fixed
//!   stage order
//! - Attach the request pipeline to every dispatch
//! - Accept a caller-supplied pre-built client in place of construction
//!
//! # Design Decisions
//! - Stage order is fixed: timeouts → redirect policy → pipeline → verbose
//!   wire logging → hostname-verification bypass → proxy routing. The
//!   bypass and the proxy must see the pipeline-instrumented transport
//! - reqwest exposes no discrete write timeout; the configured write
//!   timeout contributes to the total request deadline instead
//! - With no proxy configured, environment proxies are disabled so that
//!   dispatch provably reaches the origin host directly

use std::time::Duration;

use reqwest::blocking::{Client, Request, Response};
use reqwest::header::HeaderMap;
use reqwest::redirect;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::http::pipeline::RequestPipeline;
use crate::http::types::CallResult;
use crate::service::types::WasapiError;

/// Shared dispatch stack: blocking client plus attached pipeline.
///
/// Built once per generator and shared read-only by every proxy issued from
/// it. Safe for concurrent dispatch; never mutated after construction.
#[derive(Debug)]
pub(crate) struct Transport {
    client: Client,
    pipeline: RequestPipeline,
    detailed_logging: bool,
}

impl Transport {
    /// Assemble a transport from configuration, or wrap a pre-built client.
    pub(crate) fn from_config(
        config: &ClientConfig,
        headers: HeaderMap,
        prebuilt: Option<Client>,
    ) -> Result<Self, WasapiError> {
        let pipeline = RequestPipeline::new(headers, config.log_headers, config.log_request_body);
        let client = match prebuilt {
            Some(client) => client,
            None => build_client(config)?,
        };
        Ok(Self {
            client,
            pipeline,
            detailed_logging: config.detailed_logging,
        })
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// Run the pipeline over `request`, send it, and return the response
    /// unchanged. Response logging is purely observational.
    pub(crate) fn execute(&self, mut request: Request, call_id: Uuid) -> CallResult<Response> {
        self.pipeline.prepare(&mut request, call_id)?;

        tracing::debug!(
            call_id = %call_id,
            method = %request.method(),
            url = %request.url(),
            "dispatching request"
        );

        let response = self.client.execute(request)?;

        if self.detailed_logging {
            tracing::debug!(
                call_id = %call_id,
                status = %response.status(),
                header_count = response.headers().len(),
                "response received"
            );
        }
        Ok(response)
    }
}

/// Build the blocking client, applying the configuration stages in order.
fn build_client(config: &ClientConfig) -> Result<Client, WasapiError> {
    // The blocking client exposes a connect timeout and one overall request
    // deadline; read and write budgets combine into the latter.
    let request_deadline = config
        .read_timeout_secs
        .saturating_add(config.write_timeout_secs);

    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(request_deadline))
        .redirect(if config.follow_redirects {
            redirect::Policy::limited(10)
        } else {
            redirect::Policy::none()
        });

    if config.detailed_logging {
        builder = builder.connection_verbose(true);
    }

    if !config.verify_hostname {
        builder = builder.danger_accept_invalid_hostnames(true);
    }

    builder = match &config.proxy {
        Some(target) => {
            builder.proxy(reqwest::Proxy::all(target.url()).map_err(WasapiError::ClientBuild)?)
        }
        None => builder.no_proxy(),
    };

    builder.build().map_err(WasapiError::ClientBuild)
}
