//! Wasapi: a configurable HTTP client and service-proxy generator.
//!
//! # Architecture Overview
//!
//! ```text
//! ConfigStore ──▶ resolver ──▶ ClientConfig ─┐
//!                                            ▼
//!                        WasapiClient (generator, one shared transport)
//!                                            │ generate::<S>()
//!                                            ▼
//!                                   ServiceProxy<S>
//!                                            │ endpoint(..).pending()
//!                                            ▼
//!                                     PendingCall<T>
//!                                            │ CallExecutor
//!                                            ▼
//!               pipeline mutation ──▶ dispatch ──▶ classification
//! ```
//!
//! The generator builds the transport once (lazily) and every proxy issued
//! from it shares that transport. Calls are synchronous and block the
//! invoking thread; the pipeline mutates each outgoing request before
//! dispatch and the executor classifies the outcome afterwards.

pub mod config;
pub mod http;
pub mod observability;
pub mod service;

pub use config::{ClientConfig, ConfigError, ConfigStore, ProxyTarget};
pub use http::executor::CallExecutor;
pub use http::types::{CallResult, FailedCallError, ResponsePair};
pub use service::definition::{Endpoint, ServiceDefinition};
pub use service::generator::{Builder, WasapiClient};
pub use service::call::PendingCall;
pub use service::proxy::{CallBuilder, ServiceProxy};
pub use service::types::{WasapiError, WasapiResult};
