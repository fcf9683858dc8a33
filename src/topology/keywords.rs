//! Trace/wide keyword sets.
//!
//! # Responsibilities
//! - Hold an ordered list of keywords used to recognise WIDEn-N / TRACEn-N
//!   style via fields
//! - Provide the built-in default trace and wide sets
//! - Prefix-match a via field against a set
//!
//! # Design Decisions
//! - First match wins in declared order, not longest match. Operators
//!   control precedence by ordering their `keys` lines.
//! - Keywords are compared byte-exact; no case folding.
//! - Immutable once built
//! - `maxreq`/`maxdone` caps are stored for the transmit side; hop
//!   accounting and the digipeat decision do not read them.

use serde::Serialize;

/// Default hop caps carried by every keyword set. Stored only; the
/// decision does not enforce them.
pub const DEFAULT_MAX_REQ: u8 = 4;
pub const DEFAULT_MAX_DONE: u8 = 4;

/// Which flavour of keyword block a set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordKind {
    Trace,
    Wide,
}

/// An ordered, immutable list of keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordSet {
    kind: KeywordKind,
    keys: Vec<String>,
    max_req: u8,
    max_done: u8,
}

impl KeywordSet {
    /// Build a set from keywords in their declared order.
    ///
    /// Returns `None` for an empty list; an empty set would never match and
    /// is always a configuration mistake.
    pub fn new<I, S>(kind: KeywordKind, keys: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys
            .into_iter()
            .map(Into::into)
            .filter(|k| !k.is_empty())
            .collect();
        if keys.is_empty() {
            return None;
        }
        Some(Self {
            kind,
            keys,
            max_req: DEFAULT_MAX_REQ,
            max_done: DEFAULT_MAX_DONE,
        })
    }

    /// Override the stored hop caps.
    pub fn with_limits(mut self, max_req: u8, max_done: u8) -> Self {
        self.max_req = max_req;
        self.max_done = max_done;
        self
    }

    /// Built-in trace set: `WIDE`, `TRACE`, `RELAY`.
    pub fn default_trace() -> Self {
        Self {
            kind: KeywordKind::Trace,
            keys: vec!["WIDE".into(), "TRACE".into(), "RELAY".into()],
            max_req: DEFAULT_MAX_REQ,
            max_done: DEFAULT_MAX_DONE,
        }
    }

    /// Built-in wide set: `WIDE`.
    pub fn default_wide() -> Self {
        Self {
            kind: KeywordKind::Wide,
            keys: vec!["WIDE".into()],
            max_req: DEFAULT_MAX_REQ,
            max_done: DEFAULT_MAX_DONE,
        }
    }

    pub fn kind(&self) -> KeywordKind {
        self.kind
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn max_req(&self) -> u8 {
        self.max_req
    }

    pub fn max_done(&self) -> u8 {
        self.max_done
    }

    /// Length in bytes of the first keyword that prefixes `field`, or 0.
    pub fn match_prefix(&self, field: &[u8]) -> usize {
        self.keys
            .iter()
            .map(String::as_bytes)
            .find(|key| field.starts_with(key))
            .map_or(0, <[u8]>::len)
    }
}

/// Match `field` against an optional keyword set.
///
/// Returns the byte length of the matched keyword, or 0 when nothing matches
/// or no set is configured at this scope.
pub fn match_tracewide(field: &[u8], set: Option<&KeywordSet>) -> usize {
    set.map_or(0, |set| set.match_prefix(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sets() {
        let trace = KeywordSet::default_trace();
        assert_eq!(trace.keys(), ["WIDE", "TRACE", "RELAY"]);
        assert_eq!(trace.kind(), KeywordKind::Trace);

        let wide = KeywordSet::default_wide();
        assert_eq!(wide.keys(), ["WIDE"]);
        assert_eq!(wide.max_req(), 4);
        assert_eq!(wide.max_done(), 4);
    }

    #[test]
    fn prefix_match_returns_keyword_length() {
        let trace = KeywordSet::default_trace();
        assert_eq!(match_tracewide(b"TRACE3-2", Some(&trace)), 5);
        assert_eq!(match_tracewide(b"WIDE2-1", Some(&trace)), 4);
        assert_eq!(match_tracewide(b"RELAY*", Some(&trace)), 5);
        assert_eq!(match_tracewide(b"N0CALL", Some(&trace)), 0);
    }

    #[test]
    fn absent_set_never_matches() {
        assert_eq!(match_tracewide(b"WIDE1-1", None), 0);
    }

    #[test]
    fn first_match_wins_over_longest() {
        let set = KeywordSet::new(KeywordKind::Wide, ["WI", "WIDE"]).unwrap();
        assert_eq!(set.match_prefix(b"WIDE2-2"), 2);

        let set = KeywordSet::new(KeywordKind::Wide, ["WIDE", "WI"]).unwrap();
        assert_eq!(set.match_prefix(b"WIDE2-2"), 4);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let wide = KeywordSet::default_wide();
        assert_eq!(wide.match_prefix(b"wide1-1"), 0);
    }

    #[test]
    fn keyword_longer_than_field_does_not_match() {
        let set = KeywordSet::new(KeywordKind::Trace, ["TRACE"]).unwrap();
        assert_eq!(set.match_prefix(b"TRA"), 0);
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(KeywordSet::new(KeywordKind::Trace, Vec::<String>::new()).is_none());
        assert!(KeywordSet::new(KeywordKind::Trace, [""]).is_none());
    }
}
