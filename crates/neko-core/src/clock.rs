//! Wall-clock access for message timestamps.

use chrono::{Local, NaiveTime, Timelike};
use std::fmt;

/// Source of the current local time of day.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Current local time of day.
    fn now(&self) -> NaiveTime;

    /// Current time formatted as a message timestamp.
    fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }
}

/// Clock backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Clock that always reports the same time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    /// Fixed clock at `hour:minute`.
    ///
    /// Out-of-range values clamp to midnight.
    pub fn at(hour: u32, minute: u32) -> Self {
        Self(NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

/// Format a time as `HH:MM` (24-hour, zero padded).
pub fn format_timestamp(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_zero_pads() {
        let time = NaiveTime::from_hms_opt(9, 5, 59).unwrap();
        assert_eq!(format_timestamp(time), "09:05");
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::at(23, 41);
        assert_eq!(clock.timestamp(), "23:41");
    }

    #[test]
    fn test_fixed_clock_out_of_range() {
        assert_eq!(FixedClock::at(25, 0).timestamp(), "00:00");
    }

    #[test]
    fn test_system_clock_shape() {
        let ts = SystemClock.timestamp();
        assert_eq!(ts.len(), 5);
        assert_eq!(&ts[2..3], ":");
    }
}
