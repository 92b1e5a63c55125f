//! Declarative service contracts.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Method;

use crate::service::types::{WasapiError, WasapiResult};

/// Characters escaped inside a single path segment. Notably `/`, `#`, `?`,
/// and `%`: a bound value must never change the route structure.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A named collection of HTTP operations, owned by domain code.
///
/// The declared base address is the conventional `BASE_URL` of the service;
/// it is consulted by the generator only when no explicit base address was
/// configured. An empty string means the service declares none.
pub trait ServiceDefinition {
    /// Service name, used in errors and log events.
    fn name() -> &'static str;

    /// Declared base address, or `""` when the service declares none.
    fn base_address() -> &'static str;

    /// The operations this service exposes.
    fn endpoints() -> Vec<Endpoint>;
}

/// One operation descriptor: name, HTTP method, and a path template whose
/// `{placeholder}` segments are filled per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    name: &'static str,
    method: Method,
    path: &'static str,
}

impl Endpoint {
    pub fn new(name: &'static str, method: Method, path: &'static str) -> Self {
        Self { name, method, path }
    }

    pub fn get(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Method::GET, path)
    }

    pub fn post(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Method::POST, path)
    }

    pub fn put(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Method::PUT, path)
    }

    pub fn delete(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Method::DELETE, path)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &'static str {
        self.path
    }
}

/// Fill the endpoint's path template from the given parameter pairs.
///
/// An unfilled `{placeholder}` is an error; surplus parameters are ignored.
/// Each bound value is percent-encoded as one path segment, so a value
/// cannot introduce extra segments, a query, or a fragment.
pub(crate) fn fill_template(
    endpoint: &Endpoint,
    params: &[(String, String)],
) -> WasapiResult<String> {
    let template = endpoint.path();
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        filled.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| WasapiError::MissingPathParam {
            endpoint: endpoint.name(),
            name: after.to_string(),
        })?;
        let name = &after[..close];
        let value = params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .ok_or_else(|| WasapiError::MissingPathParam {
                endpoint: endpoint.name(),
                name: name.to_string(),
            })?;
        filled.extend(utf8_percent_encode(value, PATH_SEGMENT));
        rest = &after[close + 1..];
    }
    filled.push_str(rest);
    Ok(filled)
}
