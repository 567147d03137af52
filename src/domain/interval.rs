//! Polling interval value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::IntervalParseError;

/// Default poll interval (500 milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Value object representing a polling interval.
/// Immutable and validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval {
    milliseconds: u64,
}

impl Interval {
    /// Create an Interval from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create an Interval from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Default poll interval
    pub const fn default_poll() -> Self {
        Self::from_millis(DEFAULT_POLL_INTERVAL_MS)
    }

    /// Get interval in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    /// Supported formats: "500ms", "2s", "1m", "1m30s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let err = || IntervalParseError { input: s.to_string() };

        let mut total_ms: u64 = 0;
        let mut current_num = String::new();
        let mut found_any = false;
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch.is_ascii_digit() {
                current_num.push(ch);
                continue;
            }
            if current_num.is_empty() {
                return Err(err());
            }
            let value: u64 = current_num.parse().map_err(|_| err())?;
            current_num.clear();

            let factor = match ch {
                'm' if chars.peek() == Some(&'s') => {
                    chars.next();
                    1
                }
                'm' => 60_000,
                's' => 1000,
                _ => return Err(err()),
            };
            total_ms = value
                .checked_mul(factor)
                .and_then(|v| total_ms.checked_add(v))
                .ok_or_else(err)?;
            found_any = true;
        }

        if !current_num.is_empty() || !found_any || total_ms == 0 {
            return Err(err());
        }

        Ok(Self {
            milliseconds: total_ms,
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.milliseconds;
        if ms % 1000 != 0 {
            return write!(f, "{}ms", ms);
        }

        let total_secs = ms / 1000;
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;

        if minutes == 0 {
            write!(f, "{}s", seconds)
        } else if seconds == 0 {
            write!(f, "{}m", minutes)
        } else {
            write!(f, "{}m{}s", minutes, seconds)
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::default_poll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_milliseconds() {
        let i: Interval = "500ms".parse().unwrap();
        assert_eq!(i.as_millis(), 500);
    }

    #[test]
    fn parse_seconds_only() {
        let i: Interval = "2s".parse().unwrap();
        assert_eq!(i.as_millis(), 2000);
    }

    #[test]
    fn parse_minutes_and_seconds() {
        let i: Interval = "1m30s".parse().unwrap();
        assert_eq!(i.as_millis(), 90_000);
    }

    #[test]
    fn parse_mixed_units() {
        let i: Interval = "1s250ms".parse().unwrap();
        assert_eq!(i.as_millis(), 1250);
    }

    #[test]
    fn parse_case_insensitive_and_trimmed() {
        let i: Interval = "  1M  ".parse().unwrap();
        assert_eq!(i.as_millis(), 60_000);
    }

    #[test]
    fn parse_invalid() {
        assert!("".parse::<Interval>().is_err());
        assert!("0s".parse::<Interval>().is_err());
        assert!("500".parse::<Interval>().is_err());
        assert!("ms".parse::<Interval>().is_err());
        assert!("5x".parse::<Interval>().is_err());
    }

    #[test]
    fn display_formats() {
        assert_eq!(Interval::from_millis(500).to_string(), "500ms");
        assert_eq!(Interval::from_secs(2).to_string(), "2s");
        assert_eq!(Interval::from_secs(120).to_string(), "2m");
        assert_eq!(Interval::from_secs(90).to_string(), "1m30s");
    }

    #[test]
    fn default_is_half_a_second() {
        assert_eq!(Interval::default().as_std(), StdDuration::from_millis(500));
    }
}
