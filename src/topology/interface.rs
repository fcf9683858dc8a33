//! Radio interface handles.
//!
//! Interfaces are owned by the registry and addressed by `InterfaceId`.
//! The list of sources an interface feeds is filled in when a digipeater
//! block is committed and never changes afterwards.

use serde::Serialize;

use crate::topology::digipeater::SourceId;

/// Stable handle for an interface inside a `Registry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct InterfaceId(pub(crate) usize);

impl InterfaceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One receive/transmit interface known to the station.
#[derive(Debug, Clone, Serialize)]
pub struct Interface {
    id: InterfaceId,
    callsign: String,
    tx_ok: bool,
    /// Sources (one per digipeater that declared this interface) fed by
    /// frames received here.
    feeds: Vec<SourceId>,
}

impl Interface {
    pub(crate) fn new(id: InterfaceId, callsign: String, tx_ok: bool) -> Self {
        Self {
            id,
            callsign,
            tx_ok,
            feeds: Vec::new(),
        }
    }

    pub fn id(&self) -> InterfaceId {
        self.id
    }

    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    /// Whether this interface may be used as a digipeater transmitter.
    pub fn tx_ok(&self) -> bool {
        self.tx_ok
    }

    pub fn feeds(&self) -> &[SourceId] {
        &self.feeds
    }

    pub(crate) fn link_source(&mut self, source: SourceId) {
        self.feeds.push(source);
    }
}
