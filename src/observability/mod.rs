//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing, config:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → Log output (stderr, console or JSON)
//!     → Whatever metrics recorder the embedding application installs
//! ```

pub mod logging;
pub mod metrics;
