//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Received frame (monitor text) on an interface
//!     → frame.rs (locate destination terminator and payload start)
//!     → dispatch.rs (one evaluation per source fed by the interface)
//!     → tokenizer.rs (via fields, stop at q-construct)
//!     → classifier.rs (source trace → digi trace → source wide → digi wide)
//!     → accountant.rs (requested / completed / traces counters)
//!     → decision.rs (digipeat iff requested > completed)
//!     → TransmitScheduler (accepted frames only)
//! ```
//!
//! # Design Decisions
//! - Whole-path aggregate decides, not the last field
//! - Keyword matching is first-match-wins in configured order
//! - Synchronous and non-blocking; no locks, no I/O
//! - Runtime faults degrade accounting instead of aborting it

pub mod accountant;
pub mod classifier;
pub mod decision;
pub mod dispatch;
pub mod frame;
pub mod tokenizer;

pub use accountant::{count_single_tnc2_tracewide, HopCase, HopState};
pub use classifier::{classify_field, Classification, MatchScope};
pub use decision::{account_via_path, digipeater_receive, PathAccount, Verdict};
pub use dispatch::{Dispatcher, TransmitQueue, TransmitScheduler};
pub use frame::Frame;
pub use tokenizer::{tokenize_via_path, ViaPath};
