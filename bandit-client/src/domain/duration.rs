use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid argument: duration must not be negative, got {0}")]
    Negative(i64),
}

/// Elapsed seconds rendered as `H:MM:SS`.
///
/// Minutes and seconds are always two digits, hours are unpadded and
/// unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct HoursMinutesSeconds(pub u64);

impl HoursMinutesSeconds {
    /// Split into (hours, minutes, seconds).
    pub fn parts(&self) -> (u64, u64, u64) {
        let total = self.0;
        (total / 3600, (total / 60) % 60, total % 60)
    }
}

impl fmt::Display for HoursMinutesSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, minutes, seconds) = self.parts();
        write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl TryFrom<i64> for HoursMinutesSeconds {
    type Error = DurationError;

    fn try_from(total: i64) -> Result<Self, Self::Error> {
        u64::try_from(total)
            .map(Self)
            .map_err(|_| DurationError::Negative(total))
    }
}

/// Format a number of seconds as `H:MM:SS`.
pub fn format_hms(total_seconds: u64) -> String {
    HoursMinutesSeconds(total_seconds).to_string()
}

/// Like [`format_hms`] but for signed input, rejecting negatives.
pub fn try_format_hms(total_seconds: i64) -> Result<String, DurationError> {
    HoursMinutesSeconds::try_from(total_seconds).map(|hms| hms.to_string())
}
