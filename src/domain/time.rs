//! Signing time supplied by the caller.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use der::asn1::{GeneralizedTime, UtcTime};
use der::DateTime;
use x509_cert::time::Time;

use crate::infra::error::{SigningError, SigningResult};

/// First year that must be encoded as GeneralizedTime (RFC 5652 §11.3).
const GENERALIZED_TIME_CUTOVER_YEAR: u16 = 2050;

/// Caller-controlled signing instant, whole seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SigningTime(Duration);

impl SigningTime {
    #[must_use]
    pub fn from_unix_seconds(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    pub fn from_system_time(time: SystemTime) -> SigningResult<Self> {
        let since_epoch = time.duration_since(UNIX_EPOCH).map_err(|e| {
            SigningError::Serialization(format!("signing time before Unix epoch: {e}"))
        })?;
        Ok(Self(Duration::from_secs(since_epoch.as_secs())))
    }

    #[must_use]
    pub fn unix_duration(&self) -> Duration {
        self.0
    }

    /// ASN.1 Time: UTCTime through 2049, GeneralizedTime from 2050 on.
    pub fn to_time(&self) -> SigningResult<Time> {
        let date_time = DateTime::from_unix_duration(self.0)
            .map_err(|e| SigningError::Serialization(format!("invalid signing time: {e}")))?;
        if date_time.year() < GENERALIZED_TIME_CUTOVER_YEAR {
            let utc = UtcTime::from_date_time(date_time)
                .map_err(|e| SigningError::Serialization(format!("invalid UTCTime: {e}")))?;
            Ok(Time::UtcTime(utc))
        } else {
            Ok(Time::GeneralTime(GeneralizedTime::from_date_time(date_time)))
        }
    }
}

impl From<Duration> for SigningTime {
    fn from(duration: Duration) -> Self {
        Self(Duration::from_secs(duration.as_secs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_time_before_cutover() {
        // 2024-01-01T00:00:00Z
        let time = SigningTime::from_unix_seconds(1_704_067_200).to_time().unwrap();
        assert!(matches!(time, Time::UtcTime(_)));
        assert_eq!(time.to_unix_duration(), Duration::from_secs(1_704_067_200));
    }

    #[test]
    fn generalized_time_from_2050() {
        // 2050-01-01T00:00:00Z
        let time = SigningTime::from_unix_seconds(2_524_608_000).to_time().unwrap();
        assert!(matches!(time, Time::GeneralTime(_)));
    }

    #[test]
    fn pre_epoch_time_is_unrepresentable() {
        let before = UNIX_EPOCH - Duration::from_secs(1);
        let err = SigningTime::from_system_time(before).unwrap_err();
        assert!(matches!(err, SigningError::Serialization(_)));
    }

    #[test]
    fn sub_second_precision_is_dropped() {
        let time = SigningTime::from(Duration::from_millis(1_500));
        assert_eq!(time.unix_duration(), Duration::from_secs(1));
    }
}
