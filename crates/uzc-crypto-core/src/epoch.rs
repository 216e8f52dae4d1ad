//! Network time.
//!
//! Block and transaction timestamps count seconds from the network epoch.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// 2014-08-11T02:00:00Z as Unix seconds.
pub const EPOCH_BEGINNING_UNIX: i64 = 1407722400;

/// The network epoch.
pub fn epoch_beginning() -> DateTime<Utc> {
    Utc.timestamp_opt(EPOCH_BEGINNING_UNIX, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Seconds since the network epoch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u32);

impl Timestamp {
    /// Create from epoch seconds.
    pub const fn new(seconds: u32) -> Self {
        Self(seconds)
    }

    /// Epoch seconds.
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Wall-clock time for an explicit epoch.
    pub fn to_datetime_from(&self, epoch: DateTime<Utc>) -> DateTime<Utc> {
        epoch + Duration::seconds(i64::from(self.0))
    }

    /// Wall-clock time on the main network.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        self.to_datetime_from(epoch_beginning())
    }

    /// Epoch seconds of a wall-clock time, relative to `epoch`.
    ///
    /// Times before the epoch or more than `u32::MAX` seconds after it are
    /// `InvalidArgument`. Sub-second precision is truncated.
    pub fn from_datetime(time: DateTime<Utc>, epoch: DateTime<Utc>) -> Result<Self> {
        let seconds = (time - epoch).num_seconds();
        u32::try_from(seconds).map(Self).map_err(|_| {
            CoreError::InvalidArgument(format!("{time} is outside the epoch range"))
        })
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Timestamp {
    fn from(seconds: u32) -> Self {
        Self(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_beginning() {
        assert_eq!(epoch_beginning().to_rfc3339(), "2014-08-11T02:00:00+00:00");
    }

    #[test]
    fn test_to_datetime() {
        assert_eq!(Timestamp::new(0).to_datetime(), epoch_beginning());
        assert_eq!(
            Timestamp::new(86_400).to_datetime().to_rfc3339(),
            "2014-08-12T02:00:00+00:00"
        );
    }

    #[test]
    fn test_from_datetime_roundtrip() {
        let ts = Timestamp::new(123_456_789);
        let back = Timestamp::from_datetime(ts.to_datetime(), epoch_beginning()).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn test_before_epoch_is_rejected() {
        let before = epoch_beginning() - Duration::seconds(1);
        assert!(matches!(
            Timestamp::from_datetime(before, epoch_beginning()),
            Err(CoreError::InvalidArgument(_))
        ));
    }
}
