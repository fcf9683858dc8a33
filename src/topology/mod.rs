//! Topology subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     StationConfig.interfaces → Registry::add_interface
//!     ConfigTree <digipeater> blocks
//!     → builder.rs (validate block → DigipeaterPlan | BlockRejected)
//!     → Registry::commit (link sources, interfaces, digipeater)
//!
//! Runtime (read-only):
//!     InterfaceId → feeds → SourceId → parent DigipeaterId
//!     Source / Digipeater → KeywordSet lookups for the classifier
//! ```
//!
//! # Design Decisions
//! - Arena of entities addressed by ids; no reference cycles
//! - Registry is owned by the caller and passed in, never global
//! - Frozen after startup: runtime code only sees `&Registry`

pub mod builder;
pub mod digipeater;
pub mod interface;
pub mod keywords;
pub mod registry;

pub use builder::{build_digipeater, load_digipeaters, LoadReport};
pub use digipeater::{Digipeater, DigipeaterId, RelayType, Source, SourceId};
pub use interface::{Interface, InterfaceId};
pub use keywords::{match_tracewide, KeywordKind, KeywordSet};
pub use registry::Registry;
