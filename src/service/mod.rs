//! Service definition and proxy generation subsystem.
//!
//! # Data Flow
//! ```text
//! ServiceDefinition (name, base address, endpoint descriptors)
//!     → generator.rs (WasapiClient: config + header set + shared transport)
//!     → proxy.rs (ServiceProxy: dispatcher keyed on endpoint name)
//!     → call.rs (PendingCall: one bound, not-yet-executed request)
//! ```
//!
//! # Design Decisions
//! - Base addresses are an explicit trait capability, not reflection:
//!   a definition declares its address and the generator consults it only
//!   when no explicit address was configured
//! - Endpoints are plain descriptors (method, path template) held in an
//!   ordinary map; no runtime proxy generation
//! - The generator never executes a call itself

pub mod call;
pub mod definition;
pub mod generator;
pub mod proxy;
pub mod types;

pub use call::PendingCall;
pub use definition::{Endpoint, ServiceDefinition};
pub use generator::{Builder, WasapiClient};
pub use proxy::{CallBuilder, ServiceProxy};
pub use types::{WasapiError, WasapiResult};
