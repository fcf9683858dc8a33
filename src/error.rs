//! Error types shared across subsystems.
//!
//! Configuration-time faults and runtime path faults are separate domains:
//! the former reject a whole block, the latter only degrade accounting.

use serde::Serialize;

/// What went wrong while building a configuration block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FaultKind {
    #[error("unknown interface: '{0}'")]
    UnknownInterface(String),
    #[error("transmit interface has no tx-ok setting: '{0}'")]
    TransmitNotTxOk(String),
    #[error("digipeater defined without transmit interface")]
    MissingTransmit,
    #[error("digipeater defined without <source> blocks")]
    NoSources,
    #[error("source block without source interface")]
    MissingSource,
    #[error("source block rejected")]
    SourceRejected,
    #[error("bad value for viscous-delay: '{0}'")]
    BadViscousDelay(String),
    #[error("bad value for {keyword}: '{value}'")]
    BadValue { keyword: String, value: String },
    #[error("missing argument for '{0}'")]
    MissingArgument(String),
    #[error("unknown config keyword: '{0}'")]
    UnknownKeyword(String),
    #[error("block <{0}> has no matching closing tag")]
    Unterminated(String),
    #[error("<{0}> block has no keys")]
    EmptyKeywords(String),
}

/// One configuration fault with its file/line context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{file}:{line} {kind}")]
pub struct ConfigFault {
    pub file: String,
    pub line: usize,
    pub kind: FaultKind,
}

impl ConfigFault {
    pub fn new(file: impl Into<String>, line: usize, kind: FaultKind) -> Self {
        Self {
            file: file.into(),
            line,
            kind,
        }
    }
}

/// A `<digipeater>` block that was rejected as a whole.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{file}:{line} digipeater block rejected with {} fault(s)", .faults.len())]
pub struct BlockRejected {
    pub file: String,
    pub line: usize,
    pub faults: Vec<ConfigFault>,
}

impl BlockRejected {
    /// Whether any fault in the block is of the given kind.
    pub fn has(&self, pred: impl Fn(&FaultKind) -> bool) -> bool {
        self.faults.iter().any(|f| pred(&f.kind))
    }
}

/// Runtime fault found while tokenizing a via path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathFault {
    /// Two consecutive separators, or a separator right at the start.
    #[error("zero-length via field at index {index}")]
    EmptyField { index: usize },
    /// Field longer than a via field can be; skipped.
    #[error("via field at index {index} is {len} bytes long")]
    FieldTooLong { index: usize, len: usize },
}

impl PathFault {
    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            PathFault::EmptyField { .. } => "empty_field",
            PathFault::FieldTooLong { .. } => "field_too_long",
        }
    }
}

/// A monitor-format line that cannot be split into header and payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("missing '>' after source call")]
    MissingSource,
    #[error("empty destination call")]
    MissingDestination,
    #[error("missing ':' payload delimiter")]
    MissingPayload,
}
