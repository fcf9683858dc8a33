//! Startup orchestration.
//!
//! # Responsibilities
//! - Register the station's interfaces
//! - Build and commit every `<digipeater>` block
//! - Hand back a registry that is read-only from here on
//!
//! # Design Decisions
//! - Interfaces first, digipeaters second: blocks refer to interfaces
//! - A rejected block is reported but never fatal
//! - Only unreadable config files stop startup

use std::path::Path;

use crate::config::blocks::{read_blocks, ConfigTree};
use crate::config::loader::{digipeater_file, load_config, ConfigError};
use crate::config::schema::StationConfig;
use crate::topology::builder::{load_digipeaters, LoadReport};
use crate::topology::registry::Registry;

/// A fully built station, ready for frame processing.
#[derive(Debug)]
pub struct Station {
    pub config: StationConfig,
    pub registry: Registry,
    pub report: LoadReport,
}

/// Build the registry from a station config and a parsed block file.
pub fn build_registry(config: &StationConfig, tree: &ConfigTree) -> (Registry, LoadReport) {
    let mut registry = Registry::new(config.station.mycall.clone());
    for aif in &config.interfaces {
        let id = registry.add_interface(aif.callsign.clone(), aif.tx_ok);
        tracing::debug!(
            interface = %aif.callsign,
            tx_ok = aif.tx_ok,
            id = id.index(),
            "Interface registered"
        );
    }

    let report = load_digipeaters(&mut registry, tree);
    tracing::info!(
        interfaces = registry.interfaces().len(),
        digipeaters = report.accepted.len(),
        rejected = report.rejected.len(),
        "Topology built"
    );

    (registry, report)
}

/// Load the station file.
pub fn load_station_config(path: &Path) -> Result<StationConfig, ConfigError> {
    load_config(path)
}

/// Read the block file named by `config` (or `override_blocks`) and build
/// the station around it. `path` is the station file the config came from.
pub fn load_station(
    path: &Path,
    config: StationConfig,
    override_blocks: Option<&Path>,
) -> Result<Station, ConfigError> {
    let blocks_path = override_blocks
        .map(Path::to_path_buf)
        .or_else(|| digipeater_file(path, &config));
    let tree = match blocks_path {
        Some(blocks_path) => {
            let text = std::fs::read_to_string(&blocks_path)?;
            read_blocks(blocks_path.display().to_string(), &text)
        }
        None => {
            tracing::warn!("No digipeater block file configured");
            read_blocks("<none>", "")
        }
    };

    let (registry, report) = build_registry(&config, &tree);
    Ok(Station {
        config,
        registry,
        report,
    })
}
