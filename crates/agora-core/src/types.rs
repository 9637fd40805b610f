use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Unix timestamp in seconds since epoch.
///
/// Compared by value. Two Timestamps with the same inner value are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }

    /// Midnight UTC at the start of the given calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN).and_utc().timestamp())
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_roundtrip() {
        let now = Utc::now();
        let ts = Timestamp::from_datetime(now);
        assert_eq!(ts.to_datetime().timestamp(), now.timestamp());
    }

    #[test]
    fn test_timestamp_from_date_is_midnight() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let ts = Timestamp::from_date(date);
        let dt = ts.to_datetime();
        assert_eq!(dt.date_naive(), date);
        assert_eq!(dt.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_timestamp_ordering() {
        let earlier = Timestamp(1_700_000_000);
        let later = Timestamp(1_700_000_001);
        assert!(earlier < later);
        assert_eq!(earlier, Timestamp(1_700_000_000));
    }

    #[test]
    fn test_timestamp_serde_round_trip() {
        let ts = Timestamp::now();
        let json = serde_json::to_string(&ts).unwrap();
        let rt: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, rt);
    }
}
