//! Typed option resolution.
//!
//! # Responsibilities
//! - Read each recognized option from a [`ConfigStore`]
//! - Fall back to the documented default when an option is absent
//! - Reject malformed boolean/integer values with [`ConfigError::Parse`]
//!
//! # Design Decisions
//! - Resolution is a pure function of the store: no side effects, and
//!   resolving the same store twice yields identical configs
//! - `proxy-port` alone does not enable proxying; only `proxy-host` does
//!   (the port then defaults to 8888)

use crate::config::schema::{default_proxy_port, ClientConfig, ProxyTarget};
use crate::config::store::{ConfigError, ConfigStore};

/// Option names recognized by the resolver.
pub mod keys {
    pub const LOG_HEADERS: &str = "log-headers";
    pub const DETAILED_LOGGING: &str = "detailed-logging";
    pub const VERIFY_HOSTNAME: &str = "verify-hostname";
    pub const LOG_REQUEST_BODY: &str = "log-request-body";
    pub const CONNECTION_TIMEOUT: &str = "connection-timeout";
    pub const READ_TIMEOUT: &str = "connection-read-timeout";
    pub const WRITE_TIMEOUT: &str = "connection-write-timeout";
    pub const PROXY_HOST: &str = "proxy-host";
    pub const PROXY_PORT: &str = "proxy-port";
    pub const FOLLOW_REDIRECTS: &str = "request-follows-redirects";
}

/// Resolve a full [`ClientConfig`] from the given store.
pub fn resolve(store: &ConfigStore) -> Result<ClientConfig, ConfigError> {
    let defaults = ClientConfig::default();

    let proxy = match store.get(keys::PROXY_HOST) {
        Some(host) if !host.is_empty() => Some(ProxyTarget::new(
            host,
            get_u16(store, keys::PROXY_PORT, default_proxy_port())?,
        )),
        _ => None,
    };

    Ok(ClientConfig {
        log_headers: get_bool(store, keys::LOG_HEADERS, defaults.log_headers)?,
        detailed_logging: get_bool(store, keys::DETAILED_LOGGING, defaults.detailed_logging)?,
        verify_hostname: get_bool(store, keys::VERIFY_HOSTNAME, defaults.verify_hostname)?,
        log_request_body: get_bool(store, keys::LOG_REQUEST_BODY, defaults.log_request_body)?,
        connect_timeout_secs: get_u64(store, keys::CONNECTION_TIMEOUT, defaults.connect_timeout_secs)?,
        read_timeout_secs: get_u64(store, keys::READ_TIMEOUT, defaults.read_timeout_secs)?,
        write_timeout_secs: get_u64(store, keys::WRITE_TIMEOUT, defaults.write_timeout_secs)?,
        proxy,
        follow_redirects: get_bool(store, keys::FOLLOW_REDIRECTS, defaults.follow_redirects)?,
        base_url: None,
    })
}

fn get_bool(store: &ConfigStore, key: &str, default: bool) -> Result<bool, ConfigError> {
    match store.get(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::Parse {
            key: key.to_string(),
            value: raw.to_string(),
            expected: "a boolean",
        }),
    }
}

fn get_u64(store: &ConfigStore, key: &str, default: u64) -> Result<u64, ConfigError> {
    match store.get(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::Parse {
            key: key.to_string(),
            value: raw.to_string(),
            expected: "a non-negative integer",
        }),
    }
}

fn get_u16(store: &ConfigStore, key: &str, default: u16) -> Result<u16, ConfigError> {
    match store.get(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::Parse {
            key: key.to_string(),
            value: raw.to_string(),
            expected: "a port number",
        }),
    }
}
