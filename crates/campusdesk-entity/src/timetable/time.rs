//! Minute-of-day time value exchanged as `"HH:MM"`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use campusdesk_core::AppError;

/// Minutes since midnight, `0..=1440`. `24:00` marks the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, sqlx::Type)]
#[sqlx(transparent)]
pub struct TimeOfDay(i32);

impl TimeOfDay {
    /// Last representable minute.
    pub const MAX_MINUTES: i32 = 24 * 60;

    /// Build from minutes since midnight.
    pub fn from_minutes(minutes: i32) -> Result<Self, AppError> {
        if (0..=Self::MAX_MINUTES).contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(AppError::validation(format!(
                "Time out of range: {minutes} minutes"
            )))
        }
    }

    /// Build from hour and minute.
    pub fn hm(hour: i32, minute: i32) -> Result<Self, AppError> {
        if !(0..60).contains(&minute) {
            return Err(AppError::validation(format!("Invalid minute: {minute}")));
        }
        Self::from_minutes(hour * 60 + minute)
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = AppError;

    /// Parses `H:MM`, `HH:MM` or `HH:MM:SS` (seconds are dropped).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::validation(format!("Invalid time: '{s}'. Expected HH:MM"));
        let mut parts = s.trim().split(':');
        let hour = parts.next().ok_or_else(invalid)?;
        let minute = parts.next().ok_or_else(invalid)?;
        if let Some(seconds) = parts.next() {
            if seconds.len() != 2 || seconds.parse::<u8>().map_or(true, |v| v >= 60) {
                return Err(invalid());
            }
        }
        if parts.next().is_some() || hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: i32 = hour.parse().map_err(|_| invalid())?;
        let minute: i32 = minute.parse().map_err(|_| invalid())?;
        Self::hm(hour, minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
