//! Arena of interfaces, digipeaters and sources.
//!
//! # Responsibilities
//! - Own every topology entity and hand out stable ids
//! - Link committed digipeaters into their transmit/receive interfaces
//! - Answer runtime lookups (interface by callsign, sources fed by an
//!   interface, parent digipeater of a source)
//!
//! # Design Decisions
//! - Mutated only during startup (`&mut self`); runtime code takes `&Registry`
//! - Commit is all-or-nothing: a plan is validated before it gets here, so
//!   linking cannot fail halfway

use crate::topology::digipeater::{
    Digipeater, DigipeaterId, DigipeaterPlan, Source, SourceId,
};
use crate::topology::interface::{Interface, InterfaceId};
use crate::topology::keywords::KeywordSet;

/// The station's topology model.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    mycall: String,
    interfaces: Vec<Interface>,
    sources: Vec<Source>,
    digipeaters: Vec<Digipeater>,
}

impl Registry {
    /// Create an empty registry for a station with the given callsign.
    pub fn new(mycall: impl Into<String>) -> Self {
        Self {
            mycall: mycall.into(),
            ..Self::default()
        }
    }

    /// The station's own callsign, used to resolve `$mycall`.
    pub fn mycall(&self) -> &str {
        &self.mycall
    }

    /// Register an interface. Must happen before any digipeater refers to it.
    pub fn add_interface(&mut self, callsign: impl Into<String>, tx_ok: bool) -> InterfaceId {
        let id = InterfaceId(self.interfaces.len());
        self.interfaces.push(Interface::new(id, callsign.into(), tx_ok));
        id
    }

    /// Look an interface up by callsign (ASCII case-insensitive).
    pub fn find_interface(&self, callsign: &str) -> Option<InterfaceId> {
        self.interfaces
            .iter()
            .find(|aif| aif.callsign().eq_ignore_ascii_case(callsign))
            .map(Interface::id)
    }

    pub fn interface(&self, id: InterfaceId) -> Option<&Interface> {
        self.interfaces.get(id.0)
    }

    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    pub fn digipeater(&self, id: DigipeaterId) -> Option<&Digipeater> {
        self.digipeaters.get(id.0)
    }

    pub fn digipeaters(&self) -> &[Digipeater] {
        &self.digipeaters
    }

    pub fn source(&self, id: SourceId) -> Option<&Source> {
        self.sources.get(id.0)
    }

    /// Sources fed by frames received on `interface`, in registration order.
    pub fn feeds(&self, interface: InterfaceId) -> &[SourceId] {
        self.interface(interface)
            .map(Interface::feeds)
            .unwrap_or_default()
    }

    /// Link a validated plan into the registry.
    ///
    /// Each source gets its parent back-reference and is appended to its
    /// ingress interface's feed list; the digipeater is appended last.
    /// Returns `None`, leaving the registry untouched, when the plan names an
    /// interface this registry does not hold.
    pub fn commit(&mut self, plan: DigipeaterPlan) -> Option<DigipeaterId> {
        let known = |id: InterfaceId| id.0 < self.interfaces.len();
        if !known(plan.transmitter) || !plan.sources.iter().all(|src| known(src.interface)) {
            tracing::warn!(
                transmit = plan.transmitter.0,
                interfaces = self.interfaces.len(),
                "Plan refers to an interface outside this registry"
            );
            return None;
        }

        let digi_id = DigipeaterId(self.digipeaters.len());
        let mut source_ids = Vec::with_capacity(plan.sources.len());

        for src in plan.sources {
            let src_id = SourceId(self.sources.len());
            if let Some(aif) = self.interfaces.get_mut(src.interface.0) {
                aif.link_source(src_id);
            }
            self.sources.push(Source {
                id: src_id,
                interface: src.interface,
                relay_type: src.relay_type,
                filters: src.filters,
                trace: src.trace,
                wide: src.wide,
                parent: digi_id,
            });
            source_ids.push(src_id);
        }

        tracing::debug!(
            digipeater = digi_id.0,
            sources = source_ids.len(),
            "Digipeater linked into registry"
        );

        self.digipeaters.push(Digipeater {
            id: digi_id,
            transmitter: plan.transmitter,
            ratelimit: plan.ratelimit,
            viscous_delay: plan.viscous_delay,
            trace: plan.trace.unwrap_or_else(KeywordSet::default_trace),
            wide: plan.wide.unwrap_or_else(KeywordSet::default_wide),
            sources: source_ids,
        });

        Some(digi_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::digipeater::{RelayType, SourcePlan};
    use crate::topology::keywords::KeywordKind;

    fn source_plan(interface: InterfaceId) -> SourcePlan {
        SourcePlan {
            interface,
            relay_type: RelayType::Unset,
            filters: Vec::new(),
            trace: None,
            wide: None,
        }
    }

    #[test]
    fn interface_lookup_is_case_insensitive() {
        let mut reg = Registry::new("N0CALL");
        let id = reg.add_interface("OH2XYZ-1", true);
        assert_eq!(reg.find_interface("oh2xyz-1"), Some(id));
        assert_eq!(reg.find_interface("OH2XYZ-2"), None);
    }

    #[test]
    fn commit_links_sources_both_ways() {
        let mut reg = Registry::new("N0CALL");
        let tx = reg.add_interface("N0CALL-1", true);
        let rx = reg.add_interface("N0CALL-2", false);

        let digi = reg
            .commit(DigipeaterPlan {
                transmitter: tx,
                ratelimit: 300,
                viscous_delay: 0,
                trace: None,
                wide: None,
                sources: vec![source_plan(tx), source_plan(rx)],
            })
            .unwrap();

        let d = reg.digipeater(digi).unwrap();
        assert_eq!(d.sources().len(), 2);
        assert_eq!(d.trace(), &KeywordSet::default_trace());
        assert_eq!(d.wide(), &KeywordSet::default_wide());

        for &src_id in d.sources() {
            let src = reg.source(src_id).unwrap();
            assert_eq!(src.parent(), digi);
            assert_eq!(reg.feeds(src.interface()), &[src_id]);
        }
    }

    #[test]
    fn interface_fans_out_to_every_digipeater() {
        let mut reg = Registry::new("N0CALL");
        let rf = reg.add_interface("N0CALL-1", true);
        let plan = DigipeaterPlan {
            transmitter: rf,
            ratelimit: 300,
            viscous_delay: 0,
            trace: KeywordSet::new(KeywordKind::Trace, ["TRACE"]),
            wide: None,
            sources: vec![source_plan(rf)],
        };
        let first = reg.commit(plan.clone()).unwrap();
        let second = reg.commit(plan).unwrap();

        let parents: Vec<_> = reg
            .feeds(rf)
            .iter()
            .map(|&id| reg.source(id).unwrap().parent())
            .collect();
        assert_eq!(parents, vec![first, second]);
        assert_eq!(reg.digipeater(first).unwrap().trace().keys(), ["TRACE"]);
    }

    #[test]
    fn plan_from_another_registry_is_refused_whole() {
        let mut other = Registry::new("N0CALL");
        other.add_interface("N0CALL-1", true);
        let foreign = other.add_interface("N0CALL-2", true);

        let mut reg = Registry::new("N0CALL");
        let rf = reg.add_interface("N0CALL-1", true);
        let plan = DigipeaterPlan {
            transmitter: rf,
            ratelimit: 300,
            viscous_delay: 0,
            trace: None,
            wide: None,
            sources: vec![source_plan(rf), source_plan(foreign)],
        };

        assert_eq!(reg.commit(plan), None);
        assert!(reg.digipeaters().is_empty());
        assert!(reg.feeds(rf).is_empty());
        assert!(reg.source(SourceId(0)).is_none());
    }

    #[test]
    fn unknown_interface_has_no_feeds() {
        let reg = Registry::new("N0CALL");
        assert!(reg.feeds(InterfaceId(7)).is_empty());
    }
}
