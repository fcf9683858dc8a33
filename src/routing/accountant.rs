//! Hop accounting for WIDEn-N / TRACEn-N via fields.
//!
//! # State Transitions
//! ```text
//! after keyword:  (nothing)  → bare keyword      req+1
//!                 "*"        → keyword*          req+1 done+1
//!                 not 1..7   → single hop        req+1 done+H
//!                 n          → n / n*            req+n done+n
//!                 n, not '-' → single hop        req+1 done+H
//!                 n-m        → n-m               req+n done+(n-m)
//!                 n-, bad m  → single hop        req+1 done+H
//! no keyword:                → traced station    traces+H
//! ```
//! `H` is 1 when the field carries the relay marker anywhere, else 0.
//!
//! Every byte string maps to one of these rows; there is no error path.

use serde::Serialize;

/// Byte a station appends to a via field it has relayed.
pub const RELAY_MARKER: u8 = b'*';

/// Per-frame hop counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HopState {
    pub requested: i32,
    pub completed: i32,
    pub traces: i32,
}

impl HopState {
    /// Whether hops remain to be executed on this path.
    pub fn has_remaining(&self) -> bool {
        self.requested > self.completed
    }
}

/// Which accounting row applied to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HopCase {
    /// No keyword matched.
    NoMatch,
    /// `KEYWORD*`
    Executed,
    /// `KEYWORD`
    Bare,
    /// Keyword followed by something other than a hop digit.
    NotDigit,
    /// `KEYWORDn` or `KEYWORDn*`
    Exhausted,
    /// `KEYWORDn` followed by something other than `-`.
    NoDash,
    /// `KEYWORDn-m`
    Remaining,
    /// `KEYWORDn-` followed by an invalid remainder.
    BadRemainder,
}

impl HopCase {
    /// Single-letter tag used in debug output.
    pub fn tag(self) -> char {
        match self {
            HopCase::NoMatch => 'a',
            HopCase::Executed => 'b',
            HopCase::Bare => 'c',
            HopCase::NotDigit => 'd',
            HopCase::Exhausted => 'e',
            HopCase::NoDash => 'f',
            HopCase::Remaining => 'g',
            HopCase::BadRemainder => 'h',
        }
    }
}

fn hop_digit(c: u8, low: u8) -> Option<i32> {
    (low..=b'7').contains(&c).then(|| i32::from(c - b'0'))
}

/// One hop requested, completed only if the field carries the relay marker.
fn single_hop(state: &mut HopState, marked: i32, case: HopCase) -> HopCase {
    state.requested += 1;
    state.completed += marked;
    case
}

/// Account one via field whose first `match_len` bytes matched a keyword.
pub fn count_single_tnc2_tracewide(
    state: &mut HopState,
    field: &[u8],
    match_len: usize,
) -> HopCase {
    let marked = i32::from(field.contains(&RELAY_MARKER));

    if match_len == 0 {
        state.traces += marked;
        return HopCase::NoMatch;
    }

    let rest = field.get(match_len..).unwrap_or_default();
    let reqc = rest.first().copied();
    let c = rest.get(1).copied();
    let remc = rest.get(2).copied();

    let Some(reqc) = reqc else {
        state.requested += 1;
        return HopCase::Bare;
    };

    if reqc == RELAY_MARKER && c.is_none() {
        state.requested += 1;
        state.completed += 1;
        return HopCase::Executed;
    }

    let Some(req) = hop_digit(reqc, b'1') else {
        return single_hop(state, marked, HopCase::NotDigit);
    };

    match (c, remc) {
        (None, _) | (Some(RELAY_MARKER), None) => {
            state.requested += req;
            state.completed += req;
            HopCase::Exhausted
        }
        (Some(b'-'), Some(remc)) => match hop_digit(remc, b'0') {
            Some(remaining) => {
                state.requested += req;
                state.completed += req - remaining;
                HopCase::Remaining
            }
            None => single_hop(state, marked, HopCase::BadRemainder),
        },
        (Some(b'-'), None) => single_hop(state, marked, HopCase::BadRemainder),
        (Some(_), _) => single_hop(state, marked, HopCase::NoDash),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(field: &str, match_len: usize) -> (HopState, HopCase) {
        let mut state = HopState::default();
        let case = count_single_tnc2_tracewide(&mut state, field.as_bytes(), match_len);
        (state, case)
    }

    fn hops(requested: i32, completed: i32, traces: i32) -> HopState {
        HopState {
            requested,
            completed,
            traces,
        }
    }

    #[test]
    fn unmatched_field_counts_trace_marker() {
        assert_eq!(account("RELAY*", 0), (hops(0, 0, 1), HopCase::NoMatch));
        assert_eq!(account("OH2RDP-1", 0), (hops(0, 0, 0), HopCase::NoMatch));
    }

    #[test]
    fn keyword_star() {
        assert_eq!(account("WIDE*", 4), (hops(1, 1, 0), HopCase::Executed));
    }

    #[test]
    fn bare_keyword() {
        assert_eq!(account("WIDE", 4), (hops(1, 0, 0), HopCase::Bare));
    }

    #[test]
    fn keyword_with_non_digit_suffix() {
        assert_eq!(account("WIDEX", 4), (hops(1, 0, 0), HopCase::NotDigit));
        assert_eq!(account("WIDEX*", 4), (hops(1, 1, 0), HopCase::NotDigit));
        assert_eq!(account("WIDE8-1", 4), (hops(1, 0, 0), HopCase::NotDigit));
        assert_eq!(account("WIDE0", 4), (hops(1, 0, 0), HopCase::NotDigit));
        assert_eq!(account("WIDE*X", 4), (hops(1, 1, 0), HopCase::NotDigit));
    }

    #[test]
    fn fully_used_n() {
        assert_eq!(account("WIDE1", 4), (hops(1, 1, 0), HopCase::Exhausted));
        assert_eq!(account("WIDE1*", 4), (hops(1, 1, 0), HopCase::Exhausted));
        assert_eq!(account("TRACE7", 5), (hops(7, 7, 0), HopCase::Exhausted));
    }

    #[test]
    fn digit_without_dash() {
        assert_eq!(account("WIDE2X", 4), (hops(1, 0, 0), HopCase::NoDash));
        assert_eq!(account("WIDE2*X", 4), (hops(1, 1, 0), HopCase::NoDash));
    }

    #[test]
    fn n_minus_m() {
        assert_eq!(account("WIDE2-1", 4), (hops(2, 1, 0), HopCase::Remaining));
        assert_eq!(account("WIDE2-2", 4), (hops(2, 0, 0), HopCase::Remaining));
        assert_eq!(account("WIDE2-0", 4), (hops(2, 2, 0), HopCase::Remaining));
        assert_eq!(account("WIDE3-1*", 4), (hops(3, 2, 0), HopCase::Remaining));
        assert_eq!(account("TRACE7-7", 5), (hops(7, 0, 0), HopCase::Remaining));
    }

    #[test]
    fn remainder_above_request_goes_negative() {
        assert_eq!(account("WIDE1-7", 4), (hops(1, -6, 0), HopCase::Remaining));
    }

    #[test]
    fn bad_remainder_falls_back_to_single_hop() {
        assert_eq!(account("WIDE2-8", 4), (hops(1, 0, 0), HopCase::BadRemainder));
        assert_eq!(account("WIDE2-X*", 4), (hops(1, 1, 0), HopCase::BadRemainder));
        assert_eq!(account("WIDE2-", 4), (hops(1, 0, 0), HopCase::BadRemainder));
    }

    #[test]
    fn counters_accumulate_across_fields() {
        let mut state = HopState::default();
        count_single_tnc2_tracewide(&mut state, b"WIDE2-1", 4);
        count_single_tnc2_tracewide(&mut state, b"WIDE1", 4);
        assert_eq!(state, hops(3, 2, 0));
        assert!(state.has_remaining());

        let mut state = HopState::default();
        count_single_tnc2_tracewide(&mut state, b"WIDE2-1", 4);
        count_single_tnc2_tracewide(&mut state, b"WIDE", 4);
        assert_eq!(state, hops(3, 1, 0));
        assert!(state.has_remaining());
    }

    #[test]
    fn case_tags() {
        assert_eq!(HopCase::NoMatch.tag(), 'a');
        assert_eq!(HopCase::BadRemainder.tag(), 'h');
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn any_field_is_accounted(
            field in proptest::collection::vec(any::<u8>(), 0..16),
            match_len in 0usize..20,
        ) {
            let mut state = HopState::default();
            count_single_tnc2_tracewide(&mut state, &field, match_len);
            prop_assert!((0..=7).contains(&state.requested));
            prop_assert!((0..=1).contains(&state.traces));
        }

        #[test]
        fn n_minus_m_credits_difference(n in 1i32..=7, m in 0i32..=7) {
            let field = format!("WIDE{n}-{m}");
            let mut state = HopState::default();
            let case = count_single_tnc2_tracewide(&mut state, field.as_bytes(), 4);
            prop_assert_eq!(case, HopCase::Remaining);
            prop_assert_eq!(state.requested, n);
            prop_assert_eq!(state.completed, n - m);
        }
    }
}
