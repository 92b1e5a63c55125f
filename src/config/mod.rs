//! Client configuration subsystem.
//!
//! # Data Flow
//! ```text
//! key/value source (TOML file or in-memory pairs)
//!     → store.rs (ConfigStore: explicit, immutable)
//!     → resolver.rs (typed reads with documented defaults)
//!     → ClientConfig (validated, immutable)
//!     → shared read-only by every call issued from a generator
//! ```
//!
//! # Design Decisions
//! - No global context store: sources are explicit objects handed to the
//!   resolver, and nothing below the resolver reads configuration
//! - Every option has a documented default so an empty store is valid
//! - Resolution is pure and idempotent: same store state, same config
//! - Malformed values fail loudly at resolution time, never at call time

pub mod resolver;
pub mod schema;
pub mod store;

pub use resolver::resolve;
pub use schema::{ClientConfig, ProxyTarget};
pub use store::{ConfigError, ConfigStore};
