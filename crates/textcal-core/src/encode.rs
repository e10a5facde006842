//! Google Calendar "create event" links.
//!
//! A validated [`EventRecord`] is turned into a URL of the form
//!
//! ```text
//! https://calendar.google.com/calendar/u/0/r/eventedit?text=…&ctz=…&dates=START/END&location=…
//! ```
//!
//! Dates are wall-clock values: the record's time zone goes into `ctz` for
//! Google Calendar to interpret them, and no conversion happens here. Nothing
//! in this module reads the system clock, the local time zone or the locale,
//! so the same record always yields the same link.
//!
//! # Example
//!
//! ```
//! use textcal_core::{encode, validate};
//!
//! let record = validate(&serde_json::json!({
//!     "title": "Standup",
//!     "startDate": "2025-03-10",
//!     "startTime": "09:00",
//!     "endDate": null,
//!     "endTime": null,
//!     "timeZone": "America/New_York",
//!     "location": null,
//! }))
//! .unwrap();
//!
//! assert_eq!(
//!     encode(&record),
//!     "https://calendar.google.com/calendar/u/0/r/eventedit\
//!      ?text=Standup&ctz=America%2FNew_York&dates=20250310T090000%2F20250310T100000"
//! );
//! ```

use std::fmt;
use std::sync::LazyLock;

use chrono::{Duration, Months, NaiveDate, NaiveDateTime};
use tracing::trace;
use url::Url;

use crate::error::ConfigError;
use crate::record::{CalendarDate, ClockTime, EventRecord};

/// Google Calendar's event creation page.
pub const GOOGLE_CALENDAR_EVENT_EDIT_URL: &str =
    "https://calendar.google.com/calendar/u/0/r/eventedit";

/// Length of an event when the extraction gave no complete end.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

static DEFAULT_BASE_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse(GOOGLE_CALENDAR_EVENT_EDIT_URL).expect("Invalid base URL"));

/// Encodes `record` with the default encoder.
///
/// See [`CalendarLinkEncoder::encode`].
pub fn encode(record: &EventRecord) -> String {
    CalendarLinkEncoder::new().encode(record)
}

/// The one-hour rule: an event without a complete end lasts an hour.
pub fn default_end(start: NaiveDateTime) -> NaiveDateTime {
    start + Duration::minutes(DEFAULT_DURATION_MINUTES)
}

/// Decides when an event ends if the record does not say.
pub trait DurationPolicy: fmt::Debug + Send + Sync {
    /// Returns the end of an event starting at `start`.
    fn end_for(&self, start: NaiveDateTime) -> NaiveDateTime;
}

/// Every event lasts the same amount of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDuration(Duration);

impl FixedDuration {
    /// A fixed duration of `minutes`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDuration`] for `0`.
    pub fn minutes(minutes: u32) -> Result<Self, ConfigError> {
        if minutes == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(Self(Duration::minutes(i64::from(minutes))))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl Default for FixedDuration {
    fn default() -> Self {
        Self(Duration::minutes(DEFAULT_DURATION_MINUTES))
    }
}

impl DurationPolicy for FixedDuration {
    fn end_for(&self, start: NaiveDateTime) -> NaiveDateTime {
        start + self.0
    }
}

/// Builds Google Calendar event links from validated records.
#[derive(Debug)]
pub struct CalendarLinkEncoder {
    base_url: Url,
    duration: Box<dyn DurationPolicy>,
}

impl Default for CalendarLinkEncoder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.clone(),
            duration: Box::new(FixedDuration::default()),
        }
    }
}

impl CalendarLinkEncoder {
    /// Creates an encoder targeting Google Calendar with a one-hour default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Points links at a different event creation page.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "not a hierarchical URL".to_string(),
            });
        }
        self.base_url = parsed;
        Ok(self)
    }

    /// Replaces the rule used when the record has no complete end.
    #[must_use]
    pub fn with_duration_policy(mut self, policy: impl DurationPolicy + 'static) -> Self {
        self.duration = Box::new(policy);
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Returns the start and end wall-clock instants for `record`.
    ///
    /// The end comes from the record only when both `endDate` and `endTime`
    /// are present; otherwise the duration policy decides.
    pub fn instants(&self, record: &EventRecord) -> (NaiveDateTime, NaiveDateTime) {
        let start = wall_clock(record.start_date(), record.start_time());
        let end = match (record.end_date(), record.end_time()) {
            (Some(date), Some(time)) => wall_clock(date, time),
            _ => self.duration.end_for(start),
        };
        (start, end)
    }

    /// Builds the event creation link for `record`.
    ///
    /// Parameters are form-encoded in the order `text`, `ctz`, `dates`,
    /// `location`. `ctz` and `location` are left out when the record has no
    /// value for them.
    pub fn encode(&self, record: &EventRecord) -> String {
        let (start, end) = self.instants(record);
        let dates = format!(
            "{}/{}",
            format_calendar_token(start),
            format_calendar_token(end)
        );

        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("text", record.title());
            if let Some(zone) = record.time_zone() {
                query.append_pair("ctz", zone);
            }
            query.append_pair("dates", &dates);
            if let Some(location) = record.location() {
                query.append_pair("location", location);
            }
        }

        trace!(dates = %dates, "encoded calendar link");
        url.into()
    }
}

static FIRST_TOKEN_INSTANT: LazyLock<NaiveDateTime> = LazyLock::new(|| {
    NaiveDate::from_ymd_opt(0, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("Invalid first token instant")
});

static LAST_TOKEN_INSTANT: LazyLock<NaiveDateTime> = LazyLock::new(|| {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|date| date.and_hms_opt(23, 59, 0))
        .expect("Invalid last token instant")
});

/// Formats an instant the way the `dates` parameter expects: `YYYYMMDDTHHMMSS`.
///
/// The token is always 15 characters. Instants before year 0000 or after
/// year 9999 saturate to `00000101T000000` and `99991231T235900`.
pub fn format_calendar_token(instant: NaiveDateTime) -> String {
    instant
        .clamp(*FIRST_TOKEN_INSTANT, *LAST_TOKEN_INSTANT)
        .format("%Y%m%dT%H%M%S")
        .to_string()
}

/// Combines a date and a time into a wall-clock instant.
///
/// Components beyond their calendar range carry over into the next unit:
/// month 13 is January of the following year, `24:00` is midnight of the
/// next day, day `00` is the last day of the previous month.
pub fn wall_clock(date: CalendarDate, time: ClockTime) -> NaiveDateTime {
    let year_start = NaiveDate::from_ymd_opt(i32::from(date.year()), 1, 1)
        .expect("four-digit years are within chrono's range");
    let month_start = match date.month() {
        0 => year_start - Months::new(1),
        month => year_start + Months::new(u32::from(month) - 1),
    };

    month_start.and_hms_opt(0, 0, 0).expect("valid time")
        + Duration::days(i64::from(date.day()) - 1)
        + Duration::hours(i64::from(time.hour()))
        + Duration::minutes(i64::from(time.minute()))
}
