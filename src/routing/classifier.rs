//! Via field classification against the keyword cascade.
//!
//! Lookup order for a field received through a source:
//! source trace → digipeater trace → source wide → digipeater wide.
//! The first scope with a matching keyword wins.

use serde::Serialize;

use crate::topology::digipeater::{Digipeater, Source};
use crate::topology::keywords::{match_tracewide, KeywordSet};

/// Scope whose keyword set matched a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchScope {
    SourceTrace,
    DigipeaterTrace,
    SourceWide,
    DigipeaterWide,
}

/// Outcome of classifying one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// `None` when no scope matched.
    pub scope: Option<MatchScope>,
    /// Byte length of the matched keyword, 0 when unmatched.
    pub match_len: usize,
}

impl Classification {
    pub const UNMATCHED: Classification = Classification {
        scope: None,
        match_len: 0,
    };
}

/// Classify `field` for frames arriving through `source` of `digi`.
pub fn classify_field(field: &[u8], source: &Source, digi: &Digipeater) -> Classification {
    let cascade: [(MatchScope, Option<&KeywordSet>); 4] = [
        (MatchScope::SourceTrace, source.trace()),
        (MatchScope::DigipeaterTrace, Some(digi.trace())),
        (MatchScope::SourceWide, source.wide()),
        (MatchScope::DigipeaterWide, Some(digi.wide())),
    ];

    cascade
        .into_iter()
        .find_map(|(scope, set)| match match_tracewide(field, set) {
            0 => None,
            match_len => Some(Classification {
                scope: Some(scope),
                match_len,
            }),
        })
        .unwrap_or(Classification::UNMATCHED)
}
