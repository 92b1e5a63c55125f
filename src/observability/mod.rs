//! Observability subsystem.
//!
//! # Responsibilities
//! - Initialize structured logging for binaries and test harnesses
//!
//! # Design Decisions
//! - The library only emits `tracing` events; installing a subscriber is
//!   the embedding application's choice, never done implicitly
//! - Pipeline and executor events carry the call id so one request can be
//!   followed from mutation through classification

pub mod logging;

pub use logging::init_logging;
