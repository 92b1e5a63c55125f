//! Service proxy generation.
//!
//! # Responsibilities
//! - Expose the builder surface for every client option
//! - Resolve the base address (explicit configuration wins, then the
//!   service definition's declaration)
//! - Build the transport once, lazily, and share it across generations
//!
//! # Design Decisions
//! - Two-phase construction: the builder produces an immutable generator,
//!   and generation is pure given that configuration
//! - A generator never executes calls; it only wires the dispatch stack

use std::sync::{Arc, OnceLock};

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::config::{resolve, ClientConfig, ConfigError, ConfigStore, ProxyTarget};
use crate::http::transport::Transport;
use crate::service::definition::ServiceDefinition;
use crate::service::proxy::ServiceProxy;
use crate::service::types::{WasapiError, WasapiResult};

/// Generates callable service proxies from a fixed configuration.
///
/// The configuration and header set are immutable once built; every proxy
/// issued from one generator shares a single lazily built transport.
#[derive(Debug)]
pub struct WasapiClient {
    config: ClientConfig,
    headers: HeaderMap,
    prebuilt: Option<Client>,
    transport: OnceLock<Arc<Transport>>,
}

impl WasapiClient {
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Materialize a proxy for the given service definition.
    ///
    /// Fails with [`WasapiError::MissingBaseAddress`] when neither the
    /// configuration nor the definition provides a base address.
    pub fn generate<S: ServiceDefinition>(&self) -> WasapiResult<ServiceProxy<S>> {
        let base = self.resolve_base_address::<S>()?;
        let transport = self.transport()?;
        tracing::debug!(service = S::name(), base = %base, "service proxy generated");
        Ok(ServiceProxy::new(base, transport))
    }

    fn resolve_base_address<S: ServiceDefinition>(&self) -> WasapiResult<Url> {
        if let Some(url) = &self.config.base_url {
            return Ok(url.clone());
        }
        let declared = S::base_address();
        if declared.is_empty() {
            return Err(WasapiError::MissingBaseAddress { service: S::name() });
        }
        Url::parse(declared).map_err(|source| WasapiError::InvalidBaseAddress {
            address: declared.to_string(),
            source,
        })
    }

    // Lazy and shared: the first generation builds the transport, later
    // ones reuse it. A losing racer's build is discarded.
    fn transport(&self) -> WasapiResult<Arc<Transport>> {
        if let Some(transport) = self.transport.get() {
            return Ok(Arc::clone(transport));
        }
        let built = Arc::new(Transport::from_config(
            &self.config,
            self.headers.clone(),
            self.prebuilt.clone(),
        )?);
        Ok(Arc::clone(self.transport.get_or_init(|| built)))
    }
}

/// Builder for [`WasapiClient`]: configuration phase of the two-phase
/// construction.
#[derive(Debug, Default)]
pub struct Builder {
    config: ClientConfig,
    headers: HeaderMap,
    prebuilt: Option<Client>,
}

impl Builder {
    /// Start from the documented defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from options resolved out of an explicit store.
    pub fn from_store(store: &ConfigStore) -> Result<Self, ConfigError> {
        Ok(Self {
            config: resolve(store)?,
            ..Self::default()
        })
    }

    /// Start from an already resolved configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Explicit base address, overriding any service declaration.
    pub fn base_url(mut self, url: &str) -> WasapiResult<Self> {
        let parsed = Url::parse(url).map_err(|source| WasapiError::InvalidBaseAddress {
            address: url.to_string(),
            source,
        })?;
        self.config.base_url = Some(parsed);
        Ok(self)
    }

    /// Header set applied (gap-filling) to every request.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Add a single header to the configured set.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn log_headers(mut self, enabled: bool) -> Self {
        self.config.log_headers = enabled;
        self
    }

    pub fn detailed_logging(mut self, enabled: bool) -> Self {
        self.config.detailed_logging = enabled;
        self
    }

    pub fn verify_hostname(mut self, enabled: bool) -> Self {
        self.config.verify_hostname = enabled;
        self
    }

    pub fn log_request_body(mut self, enabled: bool) -> Self {
        self.config.log_request_body = enabled;
        self
    }

    pub fn connect_timeout(mut self, seconds: u64) -> Self {
        self.config.connect_timeout_secs = seconds;
        self
    }

    pub fn read_timeout(mut self, seconds: u64) -> Self {
        self.config.read_timeout_secs = seconds;
        self
    }

    pub fn write_timeout(mut self, seconds: u64) -> Self {
        self.config.write_timeout_secs = seconds;
        self
    }

    pub fn proxy(mut self, host: impl Into<String>, port: u16) -> Self {
        self.config.proxy = Some(ProxyTarget::new(host, port));
        self
    }

    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.config.follow_redirects = follow;
        self
    }

    /// Supply a pre-built client, skipping transport construction.
    pub fn http_client(mut self, client: Client) -> Self {
        self.prebuilt = Some(client);
        self
    }

    /// Freeze the configuration into a generator.
    pub fn build(self) -> WasapiClient {
        WasapiClient {
            config: self.config,
            headers: self.headers,
            prebuilt: self.prebuilt,
            transport: OnceLock::new(),
        }
    }
}
