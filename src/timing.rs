//! Per-action timestamps ("locTimes") for the toll request.

use std::fmt;

use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::here::RouteAction;

/// Time at which the route reaches `offset`, in epoch seconds.
///
/// Serialized as a two-element array `[offset, timestamp]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingPair {
    pub offset: u64,
    pub timestamp: i64,
}

impl Serialize for TimingPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.offset, self.timestamp).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TimingPair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (offset, timestamp) = <(u64, i64)>::deserialize(deserializer)?;
        Ok(Self { offset, timestamp })
    }
}

/// One pair per action, each stamped with the time reached *before* that
/// action's own duration elapses.
///
/// The first pair carries `departure` exactly; later timestamps never
/// decrease.
pub fn derive_timings(actions: &[RouteAction], departure: i64) -> Vec<TimingPair> {
    actions
        .iter()
        .scan(departure, |cumulative, action| {
            let pair = TimingPair {
                offset: action.offset,
                timestamp: *cumulative,
            };
            *cumulative = cumulative.saturating_add_unsigned(action.duration);
            Some(pair)
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct TimestampError {
    pub input: String,
    pub source: chrono::ParseError,
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid timestamp {:?}: {}", self.input, self.source)
    }
}

impl std::error::Error for TimestampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Converts an ISO-8601 timestamp with offset to epoch seconds, truncating
/// sub-second precision toward zero.
pub fn iso_to_epoch(iso: &str) -> Result<i64, TimestampError> {
    let parsed = DateTime::parse_from_rfc3339(iso).map_err(|source| TimestampError {
        input: iso.to_string(),
        source,
    })?;
    let seconds = parsed.timestamp();
    // timestamp() floors; pre-epoch fractions need to move back toward zero.
    if seconds < 0 && parsed.timestamp_subsec_nanos() > 0 {
        Ok(seconds + 1)
    } else {
        Ok(seconds)
    }
}
