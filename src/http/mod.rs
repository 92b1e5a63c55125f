//! HTTP dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! PendingCall
//!     → transport.rs (shared blocking client, staged construction)
//!     → pipeline.rs (mutate request: host, header fill, content metadata,
//!                    optional body/header logging)
//!     → wire send/receive
//!     → executor.rs (classify outcome: typed value, expected status,
//!                    or dual-channel ResponsePair)
//! ```
//!
//! # Design Decisions
//! - Pipeline mutation happens-before dispatch happens-before
//!   classification, for every single call
//! - Logging inside the pipeline is observational only; a logging or
//!   body-parse failure is recovered as a warning and never fails the call
//! - The transport is built once per generator and shared; it is never
//!   mutated after construction

pub mod executor;
pub mod pipeline;
pub mod transport;
pub mod types;

pub use executor::CallExecutor;
pub use types::{CallResult, FailedCallError, ResponsePair};
