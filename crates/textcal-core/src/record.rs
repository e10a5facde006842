//! The validated event record and its date/time value types.
//!
//! [`CalendarDate`] and [`ClockTime`] only check the textual shape of a value
//! (`YYYY-MM-DD` and `HH:MM`). They do not check that the date exists on a
//! calendar: `2025-13-45` and `25:00` both parse. Because the shapes are
//! fixed-width and zero-padded, formatting a parsed value reproduces the
//! original text exactly.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ShapeError;

/// `YYYY-MM-DD`, ASCII digits only.
static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("Invalid date regex")
});

/// `HH:MM`, ASCII digits only.
static TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2}):([0-9]{2})$").expect("Invalid time regex"));

/// A calendar date in `YYYY-MM-DD` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDate {
    year: u16,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// The four-digit year.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// The two-digit month; not guaranteed to be in `1..=12`.
    pub fn month(&self) -> u8 {
        self.month
    }

    /// The two-digit day; not guaranteed to exist in the month.
    pub fn day(&self) -> u8 {
        self.day
    }
}

impl FromStr for CalendarDate {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let shape_error = || ShapeError {
            expected: "YYYY-MM-DD",
            found: s.to_string(),
        };
        let caps = DATE_REGEX.captures(s).ok_or_else(shape_error)?;
        Ok(Self {
            year: caps[1].parse().map_err(|_| shape_error())?,
            month: caps[2].parse().map_err(|_| shape_error())?,
            day: caps[3].parse().map_err(|_| shape_error())?,
        })
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A 24-hour time of day in `HH:MM` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// The two-digit hour; not guaranteed to be below 24.
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// The two-digit minute; not guaranteed to be below 60.
    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl FromStr for ClockTime {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let shape_error = || ShapeError {
            expected: "HH:MM",
            found: s.to_string(),
        };
        let caps = TIME_REGEX.captures(s).ok_or_else(shape_error)?;
        Ok(Self {
            hour: caps[1].parse().map_err(|_| shape_error())?,
            minute: caps[2].parse().map_err(|_| shape_error())?,
        })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_serde!(CalendarDate);
string_serde!(ClockTime);

/// A structured event that passed validation.
///
/// Instances only come out of [`crate::validate::EventRecordValidator`], so
/// every record has a non-empty title, a well-formed start, well-formed (or
/// absent) end fields, and no empty-string stand-ins for unknown values.
///
/// Serializes to the camelCase shape the extraction service produces, with
/// absent values written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    title: String,
    start_date: CalendarDate,
    start_time: ClockTime,
    end_date: Option<CalendarDate>,
    end_time: Option<ClockTime>,
    time_zone: Option<String>,
    location: Option<String>,
}

impl EventRecord {
    pub(crate) fn new(
        title: String,
        start_date: CalendarDate,
        start_time: ClockTime,
        end_date: Option<CalendarDate>,
        end_time: Option<ClockTime>,
        time_zone: Option<String>,
        location: Option<String>,
    ) -> Self {
        Self {
            title,
            start_date,
            start_time,
            end_date,
            end_time,
            time_zone,
            location,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start_date(&self) -> CalendarDate {
        self.start_date
    }

    pub fn start_time(&self) -> ClockTime {
        self.start_time
    }

    pub fn end_date(&self) -> Option<CalendarDate> {
        self.end_date
    }

    pub fn end_time(&self) -> Option<ClockTime> {
        self.end_time
    }

    /// The IANA zone to show the event in, if the extraction found one.
    pub fn time_zone(&self) -> Option<&str> {
        self.time_zone.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns `true` if both end fields are present.
    ///
    /// When this is `false` the encoder falls back to the default duration,
    /// even if one of the two end fields is set.
    pub fn has_explicit_end(&self) -> bool {
        self.end_date.is_some() && self.end_time.is_some()
    }
}
