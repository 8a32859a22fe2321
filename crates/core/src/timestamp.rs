//! Millisecond-precision timestamp type
//!
//! Timestamps are stored as signed milliseconds since the Unix epoch
//! (1970-01-01 00:00:00 UTC), so instants before the epoch are representable.
//!
//! ```
//! use tagkv_core::Timestamp;
//!
//! let t = Timestamp::from_millis(1_700_000_000_000);
//! assert_eq!(t.as_millis(), 1_700_000_000_000);
//! assert!(Timestamp::from_millis(-1) < Timestamp::EPOCH);
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

/// Millisecond-precision instant
///
/// ## Invariants
///
/// - Timestamps are always in milliseconds
/// - Timestamps are totally ordered, earlier instants first
/// - The zero timestamp represents the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Smallest representable timestamp
    pub const MIN: Timestamp = Timestamp(i64::MIN);

    /// Largest representable timestamp
    pub const MAX: Timestamp = Timestamp(i64::MAX);

    /// Create a timestamp for the current moment
    pub fn now() -> Self {
        Timestamp(Utc::now().timestamp_millis())
    }

    /// Create a timestamp from milliseconds since epoch
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Milliseconds since Unix epoch
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Convert to a chrono `DateTime<Utc>`
    ///
    /// Returns `None` when the instant is outside chrono's supported range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}

impl From<SystemTime> for Timestamp {
    fn from(t: SystemTime) -> Self {
        Timestamp::from(DateTime::<Utc>::from(t))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
            None => write!(f, "{}ms", self.0),
        }
    }
}
