// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-class backup policies and their eligibility rules.

use crate::class::BackupClass;
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A wall-clock time of day (`HH:MM`, 24h).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeOfDayError {
    #[error("expected HH:MM, got '{0}'")]
    Format(String),
    #[error("time out of range: {0}")]
    OutOfRange(String),
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    pub fn new(hour: u8, minute: u8) -> Result<Self, TimeOfDayError> {
        if hour > 23 || minute > 59 {
            return Err(TimeOfDayError::OutOfRange(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self { hour, minute })
    }

    /// Parse a strict `H:MM` / `HH:MM` string.
    pub fn parse(s: &str) -> Result<Self, TimeOfDayError> {
        let trimmed = s.trim();
        let (h, m) =
            trimmed.split_once(':').ok_or_else(|| TimeOfDayError::Format(s.to_string()))?;
        let digits = |part: &str, max_len: usize| {
            !part.is_empty() && part.len() <= max_len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits(h, 2) || !digits(m, 2) || m.len() != 2 {
            return Err(TimeOfDayError::Format(s.to_string()));
        }
        let hour = h.parse::<u8>().map_err(|_| TimeOfDayError::Format(s.to_string()))?;
        let minute = m.parse::<u8>().map_err(|_| TimeOfDayError::Format(s.to_string()))?;
        Self::new(hour, minute)
    }

    /// Interpret a settings value the way the settings form saves it.
    ///
    /// Empty means "never fires"; anything unparseable is normalised to midnight.
    pub fn from_setting(s: &str) -> Option<Self> {
        if s.trim().is_empty() {
            return None;
        }
        Some(Self::parse(s).unwrap_or(Self::MIDNIGHT))
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or_default()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Serde for `Option<TimeOfDay>` as a settings string (`""` = absent).
mod time_setting {
    use super::TimeOfDay;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<TimeOfDay>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => s.collect_str(t),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<TimeOfDay>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.as_deref().and_then(TimeOfDay::from_setting))
    }
}

/// Content that can be left out of a backup archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exclusion {
    Uploads,
    Timelapse,
}

crate::simple_display! {
    Exclusion {
        Uploads => "uploads",
        Timelapse => "timelapse",
    }
}

impl Exclusion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exclusion::Uploads => "uploads",
            Exclusion::Timelapse => "timelapse",
        }
    }
}

/// Configuration for one backup class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default)]
    pub enabled: bool,
    /// Absent means the class never fires from the pump.
    #[serde(default = "default_time", rename = "time", with = "time_setting")]
    pub time_of_day: Option<TimeOfDay>,
    /// ISO weekday, Monday = 1 (weekly only).
    #[serde(default = "default_weekday")]
    pub weekday: u32,
    /// Day of month, 1..=31 (monthly only).
    #[serde(default = "default_day_of_month")]
    pub day_of_month: u32,
    /// Number of most recent artifacts to keep. Zero keeps none.
    #[serde(default = "default_retention")]
    pub retention: u32,
    #[serde(default)]
    pub exclude_uploads: bool,
    #[serde(default)]
    pub exclude_timelapse: bool,
}

fn default_time() -> Option<TimeOfDay> {
    Some(TimeOfDay::MIDNIGHT)
}

fn default_weekday() -> u32 {
    7
}

fn default_day_of_month() -> u32 {
    1
}

fn default_retention() -> u32 {
    1
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            enabled: false,
            time_of_day: default_time(),
            weekday: default_weekday(),
            day_of_month: default_day_of_month(),
            retention: default_retention(),
            exclude_uploads: false,
            exclude_timelapse: false,
        }
    }
}

crate::builder! {
    pub struct PolicyBuilder => Policy {
        set {
            enabled: bool = true,
            weekday: u32 = default_weekday(),
            day_of_month: u32 = default_day_of_month(),
            retention: u32 = default_retention(),
            exclude_uploads: bool = false,
            exclude_timelapse: bool = false,
        }
        option {
            time_of_day: TimeOfDay = Some(TimeOfDay::MIDNIGHT),
        }
    }
}

/// Outcome of checking a policy against today's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Disabled,
    /// Enabled, but today is not the configured weekday / day of month.
    WrongDay,
    /// The configured weekday or day of month can never match a date.
    InvalidDay,
}

crate::simple_display! {
    Eligibility {
        Eligible => "eligible",
        Disabled => "disabled",
        WrongDay => "not scheduled today",
        InvalidDay => "invalid day setting",
    }
}

impl Policy {
    /// Shipped defaults for a class. Startup backups have no time of day.
    pub fn defaults_for(class: BackupClass) -> Self {
        match class {
            BackupClass::Startup => Self { time_of_day: None, ..Self::default() },
            _ => Self::default(),
        }
    }

    /// Whether this policy arms a pump trigger.
    pub fn is_scheduled(&self) -> bool {
        self.enabled && self.time_of_day.is_some()
    }

    /// Class-specific gating against `today`.
    pub fn eligibility(&self, class: BackupClass, today: NaiveDate) -> Eligibility {
        if !self.enabled {
            return Eligibility::Disabled;
        }
        let day_matches = match class {
            BackupClass::Monthly if !(1..=31).contains(&self.day_of_month) => {
                return Eligibility::InvalidDay;
            }
            BackupClass::Weekly if !(1..=7).contains(&self.weekday) => {
                return Eligibility::InvalidDay;
            }
            BackupClass::Monthly => today.day() == self.day_of_month,
            BackupClass::Weekly => today.weekday().number_from_monday() == self.weekday,
            BackupClass::Daily | BackupClass::Startup => true,
        };
        if day_matches {
            Eligibility::Eligible
        } else {
            Eligibility::WrongDay
        }
    }

    /// Content to leave out of the archive, uploads first.
    pub fn exclusions(&self) -> Vec<Exclusion> {
        let mut exclude = Vec::with_capacity(2);
        if self.exclude_uploads {
            exclude.push(Exclusion::Uploads);
        }
        if self.exclude_timelapse {
            exclude.push(Exclusion::Timelapse);
        }
        exclude
    }
}

/// The three pump-driven policies, captured together.
///
/// Used both to (re)arm triggers and as the snapshot compared on
/// configuration-changed signals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodicPolicies {
    pub daily: Policy,
    pub weekly: Policy,
    pub monthly: Policy,
}

impl PeriodicPolicies {
    /// Build a snapshot by reading each periodic class through `read`.
    pub fn read_with(mut read: impl FnMut(BackupClass) -> Policy) -> Self {
        Self {
            daily: read(BackupClass::Daily),
            weekly: read(BackupClass::Weekly),
            monthly: read(BackupClass::Monthly),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BackupClass, &Policy)> {
        [
            (BackupClass::Daily, &self.daily),
            (BackupClass::Weekly, &self.weekly),
            (BackupClass::Monthly, &self.monthly),
        ]
        .into_iter()
    }
}

/// Which outcomes get reported, and over which channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub notify_on_success: bool,
    #[serde(default)]
    pub email_on_failure: bool,
    #[serde(default)]
    pub email_on_success: bool,
}

fn default_true() -> bool {
    true
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { notify_on_success: true, email_on_failure: false, email_on_success: false }
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
