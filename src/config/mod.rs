//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! station file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → StationConfig (validated, immutable)
//!
//! block file (<digipeater> ... </digipeater>)
//!     → blocks.rs (statement tree with line numbers)
//!     → topology::builder (per-block validation)
//!     → topology::Registry
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All station fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde, block reader) from semantic checks

pub mod blocks;
pub mod loader;
pub mod schema;
pub mod validation;

pub use blocks::{read_blocks, Block, ConfigTree, Node, Statement};
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::InterfaceConfig;
pub use schema::LoggingConfig;
pub use schema::StationConfig;
