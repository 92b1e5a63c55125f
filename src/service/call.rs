//! Pending calls: bound, not-yet-executed requests.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::{Request, Response};
use reqwest::Method;
use url::Url;
use uuid::Uuid;

use crate::http::transport::Transport;
use crate::http::types::CallResult;

/// One request bound to concrete arguments, not yet dispatched.
///
/// Executing consumes the call, so dispatch happens at most once. The type
/// parameter records the payload shape the executor will decode; it carries
/// no data.
#[derive(Debug)]
pub struct PendingCall<T> {
    transport: Arc<Transport>,
    request: Request,
    id: Uuid,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PendingCall<T> {
    pub(crate) fn new(transport: Arc<Transport>, request: Request) -> Self {
        Self {
            transport,
            request,
            id: Uuid::new_v4(),
            _marker: PhantomData,
        }
    }

    /// Correlation id, present on every log event this call produces.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn method(&self) -> &Method {
        self.request.method()
    }

    pub fn url(&self) -> &Url {
        self.request.url()
    }

    /// Bound a completion deadline onto this call's dispatch.
    pub(crate) fn with_deadline(mut self, deadline: Duration) -> Self {
        *self.request.timeout_mut() = Some(deadline);
        self
    }

    /// Dispatch through the pipeline-wrapped transport.
    pub fn execute(self) -> CallResult<Response> {
        self.transport.execute(self.request, self.id)
    }
}
