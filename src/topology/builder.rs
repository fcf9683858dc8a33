//! Builders for `<digipeater>`, `<source>`, `<trace>` and `<wide>` blocks.
//!
//! # Responsibilities
//! - Validate one block against the registry's interfaces
//! - Produce a fully validated plan, or every fault found in the block
//! - Commit accepted plans and report rejected ones
//!
//! # Design Decisions
//! - Each builder is a pure function from a block to `Result<plan, faults>`;
//!   nothing is linked until the whole `<digipeater>` block is clean
//! - Every fault is collected, not just the first, and logged with file/line
//! - A rejected block never stops the rest of the file from loading

use crate::config::blocks::{Block, ConfigTree, Node, Statement};
use crate::config::validation::{clamp_ratelimit, clamp_viscous_delay, parse_int};
use crate::error::{BlockRejected, ConfigFault, FaultKind};
use crate::topology::digipeater::{
    DigipeaterId, DigipeaterPlan, RelayType, SourcePlan, RATELIMIT_DEFAULT,
};
use crate::topology::interface::InterfaceId;
use crate::topology::keywords::{KeywordKind, KeywordSet, DEFAULT_MAX_DONE, DEFAULT_MAX_REQ};
use crate::topology::registry::Registry;

/// Hop caps accepted in `maxreq` / `maxdone`.
const MAX_HOP_CAP: i64 = 7;

/// Result of loading every `<digipeater>` block in a file.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub accepted: Vec<DigipeaterId>,
    pub rejected: Vec<BlockRejected>,
}

/// Shared state for building blocks from one file.
struct BuildContext<'a> {
    registry: &'a Registry,
    file: &'a str,
    faults: Vec<ConfigFault>,
}

impl<'a> BuildContext<'a> {
    fn new(registry: &'a Registry, file: &'a str) -> Self {
        Self {
            registry,
            file,
            faults: Vec::new(),
        }
    }

    fn fault(&mut self, line: usize, kind: FaultKind) {
        let fault = ConfigFault::new(self.file, line, kind);
        tracing::warn!(file = %fault.file, line = fault.line, "{}", fault.kind);
        self.faults.push(fault);
    }

    fn fault_count(&self) -> usize {
        self.faults.len()
    }

    fn take_faults(&mut self) -> Vec<ConfigFault> {
        std::mem::take(&mut self.faults)
    }

    /// Resolve an interface argument, expanding `$mycall`.
    fn interface(&mut self, st: &Statement) -> Option<(InterfaceId, String)> {
        let Some(arg) = st.arg() else {
            self.fault(st.line, FaultKind::MissingArgument(st.name.clone()));
            return None;
        };
        let registry = self.registry;
        let callsign = if arg.eq_ignore_ascii_case("$mycall") {
            registry.mycall()
        } else {
            arg
        };
        match registry.find_interface(callsign) {
            Some(id) => Some((id, callsign.to_string())),
            None => {
                self.fault(st.line, FaultKind::UnknownInterface(callsign.to_string()));
                None
            }
        }
    }

    fn integer(&mut self, st: &Statement) -> Option<i64> {
        let Some(arg) = st.arg() else {
            self.fault(st.line, FaultKind::MissingArgument(st.name.clone()));
            return None;
        };
        let value = parse_int(arg);
        if value.is_none() {
            self.fault(
                st.line,
                FaultKind::BadValue {
                    keyword: st.name.clone(),
                    value: arg.to_string(),
                },
            );
        }
        value
    }

    fn unterminated(&mut self, block: &Block) {
        if !block.terminated {
            self.fault(block.line, FaultKind::Unterminated(block.tag.clone()));
        }
    }
}

/// Build and commit every top-level `<digipeater>` block in `tree`.
pub fn load_digipeaters(registry: &mut Registry, tree: &ConfigTree) -> LoadReport {
    let mut report = LoadReport::default();

    for node in &tree.nodes {
        let block = match node {
            Node::Block(b) if b.tag == "digipeater" => b,
            other => {
                tracing::debug!(
                    file = %tree.file,
                    line = other.line(),
                    "Skipping non-digipeater configuration entry"
                );
                continue;
            }
        };

        match build_digipeater(registry, &tree.file, block) {
            Ok(plan) => {
                let transmitter = plan.transmitter();
                let Some(id) = registry.commit(plan) else {
                    continue;
                };
                tracing::info!(
                    file = %tree.file,
                    line = block.line,
                    digipeater = id.index(),
                    transmit = registry.interface(transmitter).map_or("?", |aif| aif.callsign()),
                    "Digipeater configured"
                );
                report.accepted.push(id);
            }
            Err(rejected) => {
                tracing::error!(
                    file = %rejected.file,
                    line = rejected.line,
                    faults = rejected.faults.len(),
                    "Digipeater block rejected"
                );
                report.rejected.push(rejected);
            }
        }
    }

    report
}

/// Validate one `<digipeater>` block.
pub fn build_digipeater(
    registry: &Registry,
    file: &str,
    block: &Block,
) -> Result<DigipeaterPlan, BlockRejected> {
    let mut ctx = BuildContext::new(registry, file);

    let mut transmitter = None;
    let mut saw_transmit = false;
    let mut ratelimit = RATELIMIT_DEFAULT;
    let mut viscous_delay = 0;
    let mut trace = None;
    let mut wide = None;
    let mut sources = Vec::new();
    let mut source_blocks = 0;

    ctx.unterminated(block);

    for node in &block.body {
        match node {
            Node::Statement(st) => match st.name.as_str() {
                "transmit" => {
                    saw_transmit = true;
                    if let Some((id, callsign)) = ctx.interface(st) {
                        let tx_ok = registry.interface(id).is_some_and(|aif| aif.tx_ok());
                        if tx_ok {
                            transmitter = Some(id);
                        } else {
                            ctx.fault(st.line, FaultKind::TransmitNotTxOk(callsign));
                        }
                    }
                }
                "ratelimit" => {
                    if let Some(value) = ctx.integer(st) {
                        ratelimit = clamp_ratelimit(value);
                    }
                }
                "viscous-delay" => {
                    if let Some(value) = ctx.integer(st) {
                        let (clamped, in_range) = clamp_viscous_delay(value);
                        viscous_delay = clamped;
                        if !in_range {
                            ctx.fault(st.line, FaultKind::BadViscousDelay(value.to_string()));
                        }
                    }
                }
                other => ctx.fault(st.line, FaultKind::UnknownKeyword(other.to_string())),
            },
            Node::Block(b) => match b.tag.as_str() {
                "trace" => trace = build_keywords(&mut ctx, b, KeywordKind::Trace),
                "wide" => wide = build_keywords(&mut ctx, b, KeywordKind::Wide),
                "source" => {
                    source_blocks += 1;
                    if let Some(src) = build_source(&mut ctx, b) {
                        sources.push(src);
                    }
                }
                other => ctx.fault(b.line, FaultKind::UnknownKeyword(format!("<{other}>"))),
            },
        }
    }

    if !saw_transmit {
        ctx.fault(block.line, FaultKind::MissingTransmit);
    }
    if source_blocks == 0 {
        ctx.fault(block.line, FaultKind::NoSources);
    }

    let faults = ctx.take_faults();
    match transmitter {
        Some(transmitter) if faults.is_empty() => Ok(DigipeaterPlan {
            transmitter,
            ratelimit,
            viscous_delay,
            trace,
            wide,
            sources,
        }),
        _ => Err(BlockRejected {
            file: file.to_string(),
            line: block.line,
            faults,
        }),
    }
}

/// Validate one `<source>` block. Faults are recorded on `ctx`.
fn build_source(ctx: &mut BuildContext<'_>, block: &Block) -> Option<SourcePlan> {
    let before = ctx.fault_count();

    let mut interface = None;
    let mut saw_source = false;
    let mut relay_type = RelayType::Unset;
    let mut filters = Vec::new();
    let mut trace = None;
    let mut wide = None;

    ctx.unterminated(block);

    for node in &block.body {
        match node {
            Node::Statement(st) => match st.name.as_str() {
                "source" => {
                    saw_source = true;
                    tracing::debug!(
                        file = ctx.file,
                        line = st.line,
                        source = ?st.arg(),
                        "<source> source"
                    );
                    interface = ctx.interface(st).map(|(id, _)| id);
                }
                "filter" => {
                    if st.args.is_empty() {
                        ctx.fault(st.line, FaultKind::MissingArgument(st.name.clone()));
                    } else {
                        filters.push(st.args.join(" "));
                    }
                }
                "relay-format" => {
                    if let Some(arg) = st.arg() {
                        relay_type = RelayType::parse(arg);
                    }
                }
                other => ctx.fault(st.line, FaultKind::UnknownKeyword(other.to_string())),
            },
            Node::Block(b) => match b.tag.as_str() {
                "trace" => trace = build_keywords(ctx, b, KeywordKind::Trace),
                "wide" => wide = build_keywords(ctx, b, KeywordKind::Wide),
                other => ctx.fault(b.line, FaultKind::UnknownKeyword(format!("<{other}>"))),
            },
        }
    }

    if !saw_source {
        ctx.fault(block.line, FaultKind::MissingSource);
    }

    match interface {
        Some(interface) if ctx.fault_count() == before => Some(SourcePlan {
            interface,
            relay_type,
            filters,
            trace,
            wide,
        }),
        _ => {
            ctx.fault(block.line, FaultKind::SourceRejected);
            None
        }
    }
}

/// Validate one `<trace>` or `<wide>` block. Faults are recorded on `ctx`.
fn build_keywords(
    ctx: &mut BuildContext<'_>,
    block: &Block,
    kind: KeywordKind,
) -> Option<KeywordSet> {
    let before = ctx.fault_count();

    let mut keys: Vec<String> = Vec::new();
    let mut max_req = DEFAULT_MAX_REQ;
    let mut max_done = DEFAULT_MAX_DONE;

    ctx.unterminated(block);

    for node in &block.body {
        match node {
            Node::Statement(st) => match st.name.as_str() {
                "keys" => keys.extend(
                    st.args
                        .iter()
                        .flat_map(|arg| arg.split(','))
                        .filter(|k| !k.is_empty())
                        .map(str::to_string),
                ),
                "maxreq" | "maxdone" => {
                    let Some(value) = ctx.integer(st) else { continue };
                    if !(1..=MAX_HOP_CAP).contains(&value) {
                        ctx.fault(
                            st.line,
                            FaultKind::BadValue {
                                keyword: st.name.clone(),
                                value: value.to_string(),
                            },
                        );
                        continue;
                    }
                    if st.name == "maxreq" {
                        max_req = value as u8;
                    } else {
                        max_done = value as u8;
                    }
                }
                other => ctx.fault(st.line, FaultKind::UnknownKeyword(other.to_string())),
            },
            Node::Block(b) => ctx.fault(b.line, FaultKind::UnknownKeyword(format!("<{}>", b.tag))),
        }
    }

    let set = KeywordSet::new(kind, keys);
    if set.is_none() {
        ctx.fault(block.line, FaultKind::EmptyKeywords(block.tag.clone()));
    }
    if ctx.fault_count() != before {
        return None;
    }
    set.map(|set| set.with_limits(max_req, max_done))
}
