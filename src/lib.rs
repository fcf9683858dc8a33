//! APRS digipeater path interpreter.
//!
//! Decides whether a received frame may be retransmitted, based on the
//! WIDEn-N / TRACEn-N budget encoded in its via path.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod topology;

pub use config::schema::StationConfig;
pub use routing::{digipeater_receive, Dispatcher, Frame, Verdict};
pub use topology::Registry;
