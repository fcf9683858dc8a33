//! Digipeat decision for one received frame.
//!
//! # Responsibilities
//! - Run tokenizer → classifier → accountant over the whole via path
//! - Compare the aggregate counters: digipeat iff requested > completed
//!
//! # Design Decisions
//! - Path faults degrade accounting, they never abort the decision
//! - Synchronous, allocation-light, no shared mutable state

use serde::Serialize;

use crate::error::PathFault;
use crate::routing::accountant::{count_single_tnc2_tracewide, HopCase, HopState};
use crate::routing::classifier::classify_field;
use crate::routing::frame::Frame;
use crate::routing::tokenizer::tokenize_via_path;
use crate::topology::digipeater::{Digipeater, DigipeaterId, Source, SourceId};
use crate::topology::registry::Registry;

/// Accept/drop outcome for one frame on one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub digipeater: DigipeaterId,
    pub source: SourceId,
    pub accepted: bool,
    pub hops: HopState,
    /// Number of via fields that were accounted.
    pub fields: usize,
    /// Tokenization stopped at an APRS-IS `q` field.
    pub provenance: bool,
    pub faults: Vec<PathFault>,
}

/// Aggregate accounting for a via path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathAccount {
    pub hops: HopState,
    pub cases: Vec<HopCase>,
    pub provenance: bool,
    pub faults: Vec<PathFault>,
}

impl PathAccount {
    pub fn accepted(&self) -> bool {
        self.hops.has_remaining()
    }
}

/// Account every via field in `segment` using the keyword sets of `source`
/// and its parent `digi`.
pub fn account_via_path(segment: &str, source: &Source, digi: &Digipeater) -> PathAccount {
    let path = tokenize_via_path(segment);
    let mut hops = HopState::default();
    let mut cases = Vec::with_capacity(path.fields.len());

    for field in &path.fields {
        let class = classify_field(field.as_bytes(), source, digi);
        let case = count_single_tnc2_tracewide(&mut hops, field.as_bytes(), class.match_len);
        tracing::trace!(
            field,
            scope = ?class.scope,
            case = %case.tag(),
            requested = hops.requested,
            completed = hops.completed,
            "Via field accounted"
        );
        cases.push(case);
    }

    PathAccount {
        hops,
        cases,
        provenance: path.provenance,
        faults: path.faults,
    }
}

/// Decide whether `frame`, received through `source_id`, should be digipeated
/// by the source's digipeater. Returns `None` for an unknown source.
pub fn digipeater_receive(
    registry: &Registry,
    source_id: SourceId,
    frame: &Frame,
) -> Option<Verdict> {
    let source = registry.source(source_id)?;
    let digi = registry.digipeater(source.parent())?;

    let account = account_via_path(frame.via_segment(), source, digi);
    let accepted = account.accepted();

    tracing::debug!(
        interface = registry.interface(source.interface()).map_or("?", |aif| aif.callsign()),
        digipeater = digi.id().index(),
        path = frame.via_segment(),
        requested = account.hops.requested,
        completed = account.hops.completed,
        traces = account.hops.traces,
        fault = !account.faults.is_empty(),
        verdict = if accepted { "DIGIPEAT" } else { "DROP" },
        "Hops counted"
    );

    Some(Verdict {
        digipeater: digi.id(),
        source: source_id,
        accepted,
        hops: account.hops,
        fields: account.cases.len(),
        provenance: account.provenance,
        faults: account.faults,
    })
}
