//! Decision counters.
//!
//! # Metrics
//! - `digipeater_frames_total` (counter): frames evaluated, by verdict
//! - `digipeater_path_faults_total` (counter): via-path faults, by kind
//!
//! # Design Decisions
//! - Uses the `metrics` facade; with no recorder installed these are no-ops
//! - Labels are static strings

/// Count one evaluated frame.
pub fn record_verdict(accepted: bool) {
    let verdict = if accepted { "accept" } else { "drop" };
    metrics::counter!("digipeater_frames_total", "verdict" => verdict).increment(1);
}

/// Count one via-path fault.
pub fn record_path_fault(kind: &'static str) {
    metrics::counter!("digipeater_path_faults_total", "kind" => kind).increment(1);
}
