//! Shared fixtures for integration tests.

use digipeater::config::{parse_config, read_blocks};
use digipeater::lifecycle::build_registry;
use digipeater::routing::{Dispatcher, Frame, TransmitQueue, Verdict};
use digipeater::topology::{LoadReport, Registry};

/// Station with one tx-capable VHF port, a receive-only UHF port and the
/// station's own callsign as a third interface.
pub const STATION: &str = r#"
[station]
mycall = "OH2MQK-1"

[[interfaces]]
callsign = "OH2MQK-1"
tx_ok = true

[[interfaces]]
callsign = "OH2MQK-2"
tx_ok = false

[[interfaces]]
callsign = "OH2MQK-3"
tx_ok = true
"#;

/// Build a registry from [`STATION`] and the given block file text.
pub fn registry(blocks: &str) -> (Registry, LoadReport) {
    digipeater::observability::logging::init_for_tests();
    let config = parse_config(STATION).unwrap();
    let tree = read_blocks("digi.conf", blocks);
    build_registry(&config, &tree)
}

/// Receive `line` on the interface named `callsign` and return all verdicts.
#[allow(dead_code)]
pub fn receive(registry: &Registry, callsign: &str, line: &str) -> Vec<Verdict> {
    let interface = registry.find_interface(callsign).unwrap();
    let frame = Frame::parse(line).unwrap();
    let mut queue = TransmitQueue::new();
    Dispatcher::new(registry).receive(interface, &frame, &mut queue)
}

/// Build a monitor-format frame with the given via fields.
#[allow(dead_code)]
pub fn frame_with_path(path: &[&str]) -> String {
    if path.is_empty() {
        "OH7LZB-9>APRS:!6128.23N/02353.52E>".to_string()
    } else {
        format!("OH7LZB-9>APRS,{}:!6128.23N/02353.52E>", path.join(","))
    }
}
