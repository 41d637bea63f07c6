use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Wall-clock creation time of a post or comment.
///
/// Serialized as an RFC 3339 string. Ordering is chronological; equal
/// timestamps carry no further tie-break, so callers that need a total order
/// must sort stably over storage order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Build a timestamp from milliseconds since the UNIX epoch.
    ///
    /// Out-of-range values clamp to the epoch.
    pub fn from_millis(ms: i64) -> Self {
        Self(Utc.timestamp_millis_opt(ms).single().unwrap_or_default())
    }

    /// Milliseconds since the UNIX epoch.
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }

    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0.to_rfc3339())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_chronological() {
        let a = Timestamp::from_millis(1_000);
        let b = Timestamp::from_millis(2_000);
        assert!(a < b);
        assert!(b.is_after(&a));
        assert!(a.is_before(&b));
    }

    #[test]
    fn equal_timestamps() {
        let a = Timestamp::from_millis(5);
        let b = Timestamp::from_millis(5);
        assert_eq!(a, b);
        assert!(!a.is_after(&b));
        assert!(!a.is_before(&b));
    }

    #[test]
    fn now_is_after_2020() {
        assert!(Timestamp::now().as_millis() > 1_577_836_800_000);
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let ts = Timestamp::from_millis(0);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"1970-01-01T00:00:00Z\"");
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ts);
    }

    #[test]
    fn display_format() {
        let ts = Timestamp::from_millis(0);
        assert_eq!(format!("{ts}"), "1970-01-01 00:00:00 UTC");
    }
}
