//! Per-interface fan-out.
//!
//! A frame received on an interface is evaluated once for every source that
//! declared that interface; accepted verdicts are handed to the transmit
//! scheduler of the owning digipeater.

use crate::observability::metrics;
use crate::routing::decision::{digipeater_receive, Verdict};
use crate::routing::frame::Frame;
use crate::topology::digipeater::{Digipeater, DigipeaterId};
use crate::topology::interface::InterfaceId;
use crate::topology::registry::Registry;

/// Receives frames that a digipeater decided to retransmit.
///
/// Rate limiting, viscous delay and the actual transmission live behind
/// this trait.
pub trait TransmitScheduler {
    fn schedule(&mut self, digi: &Digipeater, frame: &Frame, verdict: &Verdict);
}

/// In-memory scheduler that just queues accepted frames.
#[derive(Debug, Default)]
pub struct TransmitQueue {
    queued: Vec<(DigipeaterId, Frame)>,
}

impl TransmitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queued(&self) -> &[(DigipeaterId, Frame)] {
        &self.queued
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = (DigipeaterId, Frame)> + '_ {
        self.queued.drain(..)
    }
}

impl TransmitScheduler for TransmitQueue {
    fn schedule(&mut self, digi: &Digipeater, frame: &Frame, _verdict: &Verdict) {
        self.queued.push((digi.id(), frame.clone()));
    }
}

/// Routes received frames through the registry.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    registry: &'a Registry,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Evaluate `frame` for every digipeater fed by `interface`.
    ///
    /// Returns every verdict, accepted or not, in registration order.
    pub fn receive(
        &self,
        interface: InterfaceId,
        frame: &Frame,
        scheduler: &mut dyn TransmitScheduler,
    ) -> Vec<Verdict> {
        let feeds = self.registry.feeds(interface);
        let mut verdicts = Vec::with_capacity(feeds.len());

        for &source in feeds {
            let Some(verdict) = digipeater_receive(self.registry, source, frame) else {
                continue;
            };

            metrics::record_verdict(verdict.accepted);
            for fault in &verdict.faults {
                metrics::record_path_fault(fault.label());
            }

            if verdict.accepted {
                if let Some(digi) = self.registry.digipeater(verdict.digipeater) {
                    scheduler.schedule(digi, frame, &verdict);
                }
            }
            verdicts.push(verdict);
        }

        verdicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::digipeater::{DigipeaterPlan, RelayType, SourcePlan};
    use crate::topology::keywords::{KeywordKind, KeywordSet};

    fn source(interface: InterfaceId, trace: Option<KeywordSet>) -> SourcePlan {
        SourcePlan {
            interface,
            relay_type: RelayType::Unset,
            filters: Vec::new(),
            trace,
            wide: None,
        }
    }

    #[test]
    fn fans_out_to_each_digipeater() {
        let mut reg = Registry::new("N0CALL");
        let vhf = reg.add_interface("N0CALL-1", true);
        let uhf = reg.add_interface("N0CALL-2", true);

        let first = reg
            .commit(DigipeaterPlan {
                transmitter: vhf,
                ratelimit: 300,
                viscous_delay: 0,
                trace: None,
                wide: None,
                sources: vec![source(vhf, None)],
            })
            .unwrap();
        let second = reg
            .commit(DigipeaterPlan {
                transmitter: uhf,
                ratelimit: 300,
                viscous_delay: 0,
                trace: KeywordSet::new(KeywordKind::Trace, ["TRACE"]),
                wide: KeywordSet::new(KeywordKind::Wide, ["FIN"]),
                sources: vec![source(vhf, None), source(uhf, None)],
            })
            .unwrap();

        let frame = Frame::parse("OH2MQK-7>APRS,WIDE1-1:>hi").unwrap();
        let mut queue = TransmitQueue::new();
        let verdicts = Dispatcher::new(&reg).receive(vhf, &frame, &mut queue);

        assert_eq!(verdicts.len(), 2);
        assert!(verdicts[0].accepted);
        assert_eq!(verdicts[0].digipeater, first);
        // Second digipeater knows neither WIDE as trace nor as wide.
        assert!(!verdicts[1].accepted);
        assert_eq!(verdicts[1].digipeater, second);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.queued()[0].0, first);
    }

    #[test]
    fn interface_without_sources() {
        let mut reg = Registry::new("N0CALL");
        let rx = reg.add_interface("N0CALL-3", false);
        let frame = Frame::parse("OH2MQK-7>APRS,WIDE1-1:>hi").unwrap();
        let mut queue = TransmitQueue::new();

        assert!(Dispatcher::new(&reg).receive(rx, &frame, &mut queue).is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn source_trace_override_applies() {
        let mut reg = Registry::new("N0CALL");
        let rf = reg.add_interface("N0CALL-1", true);
        reg.commit(DigipeaterPlan {
            transmitter: rf,
            ratelimit: 300,
            viscous_delay: 0,
            trace: KeywordSet::new(KeywordKind::Trace, ["TRACE"]),
            wide: KeywordSet::new(KeywordKind::Wide, ["WIDE"]),
            sources: vec![source(rf, KeywordSet::new(KeywordKind::Trace, ["OHN"]))],
        });

        let frame = Frame::parse("OH2MQK-7>APRS,OHN2-2:>hi").unwrap();
        let mut queue = TransmitQueue::new();
        let verdicts = Dispatcher::new(&reg).receive(rf, &frame, &mut queue);
        assert!(verdicts[0].accepted);
        assert_eq!(queue.drain().count(), 1);
        assert!(queue.is_empty());
    }
}
