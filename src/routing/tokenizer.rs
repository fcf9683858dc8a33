//! Via-path tokenizer.
//!
//! # Responsibilities
//! - Split the header text after the destination call into via fields
//! - Stop at the APRS-IS provenance boundary (first field starting with `q`)
//! - Report malformed fields without discarding what came before them
//!
//! # Design Decisions
//! - Borrowed fields, no allocation per frame beyond the field list
//! - A zero-length field ends tokenization; it is a fault unless it is the
//!   field closed by the final `:` (a trailing comma)
//! - An overlong field is skipped and tokenization continues

use crate::error::PathFault;

/// Longest via field accepted: a 9-byte callsign, a two-digit `-SSID` and
/// the relay marker.
pub const MAX_VIA_FIELD_LEN: usize = 13;

/// Byte that starts an APRS-IS provenance field (`qAR`, `qAC`, ...).
pub const PROVENANCE_MARKER: u8 = b'q';

/// Fields of one via path, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViaPath<'a> {
    /// Fields to account, excluding skipped and provenance fields.
    pub fields: Vec<&'a str>,
    /// Faults found while splitting; fields before a fault are kept.
    pub faults: Vec<PathFault>,
    /// True when tokenization stopped at a `q` field.
    pub provenance: bool,
}

impl ViaPath<'_> {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Tokenize the header text following the destination call terminator.
///
/// `segment` runs up to and including the `:` payload delimiter, as given by
/// `Frame::via_segment`; an empty segment means the frame has no via path.
pub fn tokenize_via_path(segment: &str) -> ViaPath<'_> {
    let mut path = ViaPath::default();
    if segment.is_empty() {
        return path;
    }

    let body = match segment.find(':') {
        Some(idx) => &segment[..idx],
        None => segment,
    };

    let last = body.matches(',').count();
    for (index, field) in body.split(',').enumerate() {
        if field.is_empty() {
            if index != last {
                path.faults.push(PathFault::EmptyField { index });
            }
            break;
        }
        if field.as_bytes()[0] == PROVENANCE_MARKER {
            path.provenance = true;
            break;
        }
        if field.len() > MAX_VIA_FIELD_LEN {
            path.faults.push(PathFault::FieldTooLong {
                index,
                len: field.len(),
            });
            continue;
        }
        path.fields.push(field);
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_fields_in_order() {
        let path = tokenize_via_path("OH2RDP-1*,WIDE2-1,WIDE1:");
        assert_eq!(path.fields, vec!["OH2RDP-1*", "WIDE2-1", "WIDE1"]);
        assert!(path.faults.is_empty());
        assert!(!path.provenance);
    }

    #[test]
    fn empty_segment_has_no_fields() {
        let path = tokenize_via_path("");
        assert!(path.is_empty());
        assert!(path.faults.is_empty());
    }

    #[test]
    fn stops_at_provenance_marker() {
        let path = tokenize_via_path("WIDE2-1,qAR,WIDE7-7,OH2MQK:");
        assert_eq!(path.fields, vec!["WIDE2-1"]);
        assert!(path.provenance);
        assert!(path.faults.is_empty());
    }

    #[test]
    fn provenance_first_means_nothing_to_account() {
        let path = tokenize_via_path("qAC,OH2MQK-10:");
        assert!(path.is_empty());
        assert!(path.provenance);
    }

    #[test]
    fn double_separator_is_a_fault_but_keeps_earlier_fields() {
        let path = tokenize_via_path("WIDE2-1,,WIDE1:");
        assert_eq!(path.fields, vec!["WIDE2-1"]);
        assert_eq!(path.faults, vec![PathFault::EmptyField { index: 1 }]);
    }

    #[test]
    fn leading_separator_is_a_fault() {
        let path = tokenize_via_path(",WIDE1:");
        assert!(path.is_empty());
        assert_eq!(path.faults, vec![PathFault::EmptyField { index: 0 }]);
    }

    #[test]
    fn trailing_separator_before_terminator_is_not_a_fault() {
        let path = tokenize_via_path("WIDE1,:");
        assert_eq!(path.fields, vec!["WIDE1"]);
        assert!(path.faults.is_empty());

        let path = tokenize_via_path(":");
        assert!(path.is_empty());
        assert!(path.faults.is_empty());
    }

    #[test]
    fn overlong_field_is_skipped() {
        let path = tokenize_via_path("WIDE1-1,ABCDEFGHIJKLMN,WIDE2-2:");
        assert_eq!(path.fields, vec!["WIDE1-1", "WIDE2-2"]);
        assert_eq!(
            path.faults,
            vec![PathFault::FieldTooLong { index: 1, len: 14 }]
        );
    }

    #[test]
    fn field_at_length_bound_is_kept() {
        let path = tokenize_via_path("ABCDEFGHIJKLM:");
        assert_eq!(path.fields, vec!["ABCDEFGHIJKLM"]);
    }
}
