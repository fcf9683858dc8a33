//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load station config → Register interfaces → Build digipeater blocks
//!     → Registry frozen → frame processing begins
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then interfaces, then digipeaters
//! - Frame processing only starts once the registry is complete

pub mod startup;

pub use startup::{build_registry, load_station, load_station_config, Station};
