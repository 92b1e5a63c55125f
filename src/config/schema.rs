//! Client configuration schema.
//!
//! Defines the immutable configuration consumed by the generator and the
//! transport. All types derive Serde traits so a config can also be
//! deserialized directly from a file when a store is not in play.

use serde::{Deserialize, Serialize};
use url::Url;

/// Immutable client configuration.
///
/// Built once (by hand, via [`Default`], or through
/// [`resolve`](crate::config::resolve)) and shared read-only by every call
/// issued from the generator it was handed to.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Emit the final header block of each request.
    pub log_headers: bool,

    /// Attach verbose wire-level logging to the transport.
    pub detailed_logging: bool,

    /// If false, bypass TLS hostname verification.
    pub verify_hostname: bool,

    /// Pretty-print (or warn-log) outgoing request bodies.
    pub log_request_body: bool,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Read timeout in seconds.
    pub read_timeout_secs: u64,

    /// Write timeout in seconds.
    pub write_timeout_secs: u64,

    /// Optional HTTP proxy to route traffic through.
    pub proxy: Option<ProxyTarget>,

    /// Automatically follow HTTP redirects.
    pub follow_redirects: bool,

    /// Explicit base address. When absent, the service definition's
    /// declared base address is used at generation time.
    pub base_url: Option<Url>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_headers: true,
            detailed_logging: false,
            verify_hostname: true,
            log_request_body: false,
            connect_timeout_secs: 60,
            read_timeout_secs: 30,
            write_timeout_secs: 30,
            proxy: None,
            follow_redirects: false,
            base_url: None,
        }
    }
}

impl ClientConfig {
    /// True iff a proxy target is configured.
    pub fn use_proxy(&self) -> bool {
        self.proxy.is_some()
    }
}

/// HTTP proxy endpoint. Host and port always travel together.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProxyTarget {
    /// Proxy host name or address.
    pub host: String,

    /// Proxy port.
    #[serde(default = "default_proxy_port")]
    pub port: u16,
}

impl ProxyTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Render as a proxy URL understood by the transport.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

pub(crate) fn default_proxy_port() -> u16 {
    8888
}
