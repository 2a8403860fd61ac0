//! Time formatting helpers.
//!
//! - Wall clock stamps for log lines: `HH:MM:SS`
//! - ETA countdowns: `MM:SS`
//! - Serde support for `Duration` as fractional seconds

use std::time::Duration;

use chrono::{DateTime, TimeZone};
use serde::Serializer;

/// Formats a timestamp as `HH:MM:SS` in its own timezone.
pub fn format_clock<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M:%S").to_string()
}

/// Formats a remaining duration as `MM:SS`.
///
/// Minutes are not wrapped at 60, so an hour shows as `60:00`.
pub fn format_eta(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Serializes a `Duration` as fractional seconds.
pub mod duration_secs {
    use super::{Duration, Serializer};

    pub fn serialize<S>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(d.as_secs_f64())
    }
}

/// Serializes an optional `Duration` as whole seconds, `null` when absent.
pub mod option_duration_secs {
    use super::{Duration, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(d: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match d {
            Some(d) => serializer.serialize_u64(d.as_secs()),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn clock_is_zero_padded() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap();
        assert_eq!(format_clock(&at), "07:05:03");
    }

    #[test]
    fn clock_uses_own_offset() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let at = Utc
            .with_ymd_and_hms(2024, 3, 9, 23, 0, 0)
            .unwrap()
            .with_timezone(&tz);
        assert_eq!(format_clock(&at), "07:00:00");
    }

    #[test]
    fn eta_minutes_and_seconds() {
        assert_eq!(format_eta(Duration::ZERO), "00:00");
        assert_eq!(format_eta(Duration::from_millis(59_900)), "00:59");
        assert_eq!(format_eta(Duration::from_secs(125)), "02:05");
        assert_eq!(format_eta(Duration::from_secs(3600)), "60:00");
    }
}
