//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (verdict and fault counters)
//! ```
//!
//! # Design Decisions
//! - Configuration faults are log events with file/line fields
//! - Per-frame detail only at debug/trace level
//! - Metrics are cheap and optional (no recorder, no cost)

pub mod logging;
pub mod metrics;
