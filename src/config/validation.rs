//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation of the station file (serde handles syntactic)
//! - Integer parsing and range handling for block values
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: StationConfig → Result<(), Vec<ValidationError>>
//! - `ratelimit` out of range resets silently; `viscous-delay` out of range
//!   clamps and reports

use std::collections::HashSet;

use crate::config::schema::StationConfig;
use crate::topology::digipeater::{
    RATELIMIT_DEFAULT, RATELIMIT_MAX, RATELIMIT_MIN, VISCOUS_DELAY_MAX, VISCOUS_DELAY_MIN,
};

/// A semantic problem in the station file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("station mycall is empty")]
    EmptyMycall,
    #[error("interface #{0} has an empty callsign")]
    EmptyInterfaceCallsign(usize),
    #[error("interface callsign '{0}' is declared more than once")]
    DuplicateInterface(String),
    #[error("unknown logging format '{0}'")]
    UnknownLogFormat(String),
}

/// Validate a deserialized station config.
pub fn validate_config(config: &StationConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.station.mycall.trim().is_empty() {
        errors.push(ValidationError::EmptyMycall);
    }

    let mut seen = HashSet::new();
    for (idx, aif) in config.interfaces.iter().enumerate() {
        if aif.callsign.trim().is_empty() {
            errors.push(ValidationError::EmptyInterfaceCallsign(idx));
            continue;
        }
        if !seen.insert(aif.callsign.to_ascii_uppercase()) {
            errors.push(ValidationError::DuplicateInterface(aif.callsign.clone()));
        }
    }

    match config.logging.format.as_str() {
        "pretty" | "json" => {}
        other => errors.push(ValidationError::UnknownLogFormat(other.to_string())),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse a block argument as a signed integer.
pub fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Ratelimit outside [10,300] falls back to the default.
pub fn clamp_ratelimit(value: i64) -> u16 {
    if (RATELIMIT_MIN..=RATELIMIT_MAX).contains(&value) {
        value as u16
    } else {
        RATELIMIT_DEFAULT
    }
}

/// Clamp viscous-delay into [0,9]. The flag is false when clamping happened.
pub fn clamp_viscous_delay(value: i64) -> (u8, bool) {
    let clamped = value.clamp(VISCOUS_DELAY_MIN, VISCOUS_DELAY_MAX);
    (clamped as u8, clamped == value)
}
