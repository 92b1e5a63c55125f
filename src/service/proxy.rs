//! Generated service proxies and call construction.
//!
//! # Responsibilities
//! - Hold the resolved base address, endpoint map, and shared transport
//! - Turn an endpoint name plus arguments into a [`PendingCall`]
//!
//! # Design Decisions
//! - Proxies are cheap to clone (`Arc` inner) and safe to share across
//!   threads; concurrent calls never cross-contaminate state
//! - Unknown endpoint names fail at call-construction time, not dispatch

use std::collections::HashMap;
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::http::transport::Transport;
use crate::service::call::PendingCall;
use crate::service::definition::{fill_template, Endpoint, ServiceDefinition};
use crate::service::types::{WasapiError, WasapiResult};

/// A callable proxy implementing one service definition's operations.
pub struct ServiceProxy<S: ?Sized> {
    inner: Arc<ProxyInner>,
    _marker: PhantomData<fn() -> S>,
}

struct ProxyInner {
    service: &'static str,
    base: Url,
    transport: Arc<Transport>,
    endpoints: HashMap<&'static str, Endpoint>,
}

impl std::fmt::Debug for ProxyInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyInner")
            .field("service", &self.service)
            .field("base", &self.base.as_str())
            .finish()
    }
}

impl<S: ?Sized> Clone for ServiceProxy<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

impl<S: ?Sized> std::fmt::Debug for ServiceProxy<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceProxy")
            .field("service", &self.inner.service)
            .field("base", &self.inner.base.as_str())
            .field("endpoints", &self.inner.endpoints.len())
            .finish()
    }
}

impl<S: ServiceDefinition + ?Sized> ServiceProxy<S> {
    pub(crate) fn new(base: Url, transport: Arc<Transport>) -> Self {
        let endpoints = S::endpoints()
            .into_iter()
            .map(|endpoint| (endpoint.name(), endpoint))
            .collect();
        Self {
            inner: Arc::new(ProxyInner {
                service: S::name(),
                base,
                transport,
                endpoints,
            }),
            _marker: PhantomData,
        }
    }

    /// The base address every call from this proxy resolves against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }

    /// Begin constructing a call for the named operation.
    pub fn endpoint(&self, name: &str) -> WasapiResult<CallBuilder<'_>> {
        let endpoint = self
            .inner
            .endpoints
            .get(name)
            .ok_or_else(|| WasapiError::UnknownEndpoint(name.to_string()))?;
        Ok(CallBuilder {
            inner: &self.inner,
            endpoint,
            path_params: Vec::new(),
            query: Vec::new(),
            body: None,
        })
    }
}

/// Binds arguments to an endpoint descriptor, producing a [`PendingCall`].
#[derive(Debug)]
pub struct CallBuilder<'a> {
    inner: &'a ProxyInner,
    endpoint: &'a Endpoint,
    path_params: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl<'a> CallBuilder<'a> {
    /// Supply a value for a `{placeholder}` segment of the path template.
    pub fn path_param(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.path_params.push((name.into(), value.to_string()));
        self
    }

    /// Append a query pair.
    pub fn query(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Attach a JSON request body.
    pub fn json<B: Serialize>(mut self, body: &B) -> WasapiResult<Self> {
        self.body = Some(serde_json::to_value(body).map_err(WasapiError::Serialize)?);
        Ok(self)
    }

    /// Materialize the pending call, binding all arguments.
    pub fn pending<T>(self) -> WasapiResult<PendingCall<T>> {
        let path = fill_template(self.endpoint, &self.path_params)?;
        let url = self
            .inner
            .base
            .join(&path)
            .map_err(|source| WasapiError::InvalidBaseAddress {
                address: path.clone(),
                source,
            })?;

        let mut builder = self
            .inner
            .transport
            .client()
            .request(self.endpoint.method().clone(), url);
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        if let Some(body) = &self.body {
            builder = builder.json(body);
        }
        let request = builder.build().map_err(WasapiError::Request)?;

        tracing::debug!(
            service = self.inner.service,
            endpoint = self.endpoint.name(),
            url = %request.url(),
            "pending call constructed"
        );
        Ok(PendingCall::new(Arc::clone(&self.inner.transport), request))
    }
}
