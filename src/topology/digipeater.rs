//! Digipeater and source entities.
//!
//! # Responsibilities
//! - Represent one egress path (`Digipeater`) and its ingress feeds (`Source`)
//! - Resolve which keyword set applies at which scope
//!
//! # Design Decisions
//! - Back-references are ids, not pointers: a source names its parent
//!   digipeater by `DigipeaterId`
//! - Entities are only created by `Registry::commit`, from a fully validated
//!   plan, so a half-built digipeater is never observable

use serde::Serialize;

use crate::topology::interface::InterfaceId;
use crate::topology::keywords::KeywordSet;

/// Ratelimit bounds and default, in packets per interval.
pub const RATELIMIT_MIN: i64 = 10;
pub const RATELIMIT_MAX: i64 = 300;
pub const RATELIMIT_DEFAULT: u16 = 300;

/// Viscous delay bounds, in seconds.
pub const VISCOUS_DELAY_MIN: i64 = 0;
pub const VISCOUS_DELAY_MAX: i64 = 9;

/// Stable handle for a digipeater inside a `Registry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DigipeaterId(pub(crate) usize);

/// Stable handle for a source inside a `Registry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourceId(pub(crate) usize);

impl DigipeaterId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl SourceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How frames from a source are relayed.
///
/// Recorded from `relay-format` and carried unchanged; relay-format
/// transformation happens outside this crate, so unrecognised values are
/// kept verbatim in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelayType {
    #[default]
    Unset,
    Digipeated,
    DirectOnly,
    ThirdParty,
    Other(String),
}

impl RelayType {
    /// Interpret a `relay-format` argument. Never fails.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "digipeated" => RelayType::Digipeated,
            "directonly" => RelayType::DirectOnly,
            "third-party" => RelayType::ThirdParty,
            _ => RelayType::Other(value.to_string()),
        }
    }
}

/// A digipeater's ingress feed.
#[derive(Debug, Clone, Serialize)]
pub struct Source {
    pub(crate) id: SourceId,
    pub(crate) interface: InterfaceId,
    pub(crate) relay_type: RelayType,
    pub(crate) filters: Vec<String>,
    pub(crate) trace: Option<KeywordSet>,
    pub(crate) wide: Option<KeywordSet>,
    pub(crate) parent: DigipeaterId,
}

impl Source {
    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn interface(&self) -> InterfaceId {
        self.interface
    }

    pub fn relay_type(&self) -> &RelayType {
        &self.relay_type
    }

    /// Opaque filter chain, one entry per `filter` line.
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// Source-scope trace override, if configured.
    pub fn trace(&self) -> Option<&KeywordSet> {
        self.trace.as_ref()
    }

    /// Source-scope wide override, if configured.
    pub fn wide(&self) -> Option<&KeywordSet> {
        self.wide.as_ref()
    }

    pub fn parent(&self) -> DigipeaterId {
        self.parent
    }
}

/// One egress transmit path.
#[derive(Debug, Clone, Serialize)]
pub struct Digipeater {
    pub(crate) id: DigipeaterId,
    pub(crate) transmitter: InterfaceId,
    pub(crate) ratelimit: u16,
    pub(crate) viscous_delay: u8,
    pub(crate) trace: KeywordSet,
    pub(crate) wide: KeywordSet,
    pub(crate) sources: Vec<SourceId>,
}

impl Digipeater {
    pub fn id(&self) -> DigipeaterId {
        self.id
    }

    pub fn transmitter(&self) -> InterfaceId {
        self.transmitter
    }

    pub fn ratelimit(&self) -> u16 {
        self.ratelimit
    }

    pub fn viscous_delay(&self) -> u8 {
        self.viscous_delay
    }

    /// Digipeater-scope trace set (built-in default unless configured).
    pub fn trace(&self) -> &KeywordSet {
        &self.trace
    }

    /// Digipeater-scope wide set (built-in default unless configured).
    pub fn wide(&self) -> &KeywordSet {
        &self.wide
    }

    pub fn sources(&self) -> &[SourceId] {
        &self.sources
    }
}

/// A validated `<source>` block, not yet linked to anything.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePlan {
    pub interface: InterfaceId,
    pub relay_type: RelayType,
    pub filters: Vec<String>,
    pub trace: Option<KeywordSet>,
    pub wide: Option<KeywordSet>,
}

/// A validated `<digipeater>` block, ready to be committed.
///
/// Only the block builder produces these; it guarantees a tx-ok transmitter,
/// in-range limits and at least one source.
#[derive(Debug, Clone, PartialEq)]
pub struct DigipeaterPlan {
    pub(crate) transmitter: InterfaceId,
    pub(crate) ratelimit: u16,
    pub(crate) viscous_delay: u8,
    pub(crate) trace: Option<KeywordSet>,
    pub(crate) wide: Option<KeywordSet>,
    pub(crate) sources: Vec<SourcePlan>,
}

impl DigipeaterPlan {
    pub fn transmitter(&self) -> InterfaceId {
        self.transmitter
    }

    pub fn ratelimit(&self) -> u16 {
        self.ratelimit
    }

    pub fn viscous_delay(&self) -> u8 {
        self.viscous_delay
    }

    pub fn sources(&self) -> &[SourcePlan] {
        &self.sources
    }
}
