//! Validation of raw extraction output into an [`EventRecord`].
//!
//! The extraction service answers with a JSON object. Checks run in a fixed
//! order and stop at the first failure:
//!
//! 1. the value is an object
//! 2. `title` is a non-empty string
//! 3. `startDate` is `YYYY-MM-DD`
//! 4. `startTime` is `HH:MM`
//! 5. `endDate` is `null` or `YYYY-MM-DD`
//! 6. `endTime` is `null` or `HH:MM`
//! 7. `timeZone` is not `""`
//! 8. `location` is not `""`
//!
//! A missing optional key counts as `null`. A `timeZone` or `location` that
//! is neither a string nor `null` fails as a malformed record once all eight
//! steps pass. Only the shape of dates and times
//! is checked, not whether they exist on a calendar or whether the end comes
//! after the start.
//!
//! # Example
//!
//! ```
//! use textcal_core::validate::validate;
//! use textcal_core::ValidationError;
//!
//! let raw = serde_json::json!({
//!     "title": "",
//!     "startDate": "2025-01-01",
//!     "startTime": "09:00",
//!     "endDate": null,
//!     "endTime": null,
//!     "timeZone": null,
//!     "location": null,
//! });
//! assert_eq!(validate(&raw), Err(ValidationError::EmptyTitle));
//! ```

use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::ValidationError;
use crate::record::EventRecord;
use crate::time_zones::TimeZoneAllowList;

/// Validates extraction output with the default validator.
///
/// See [`EventRecordValidator::validate`].
pub fn validate(raw: &Value) -> Result<EventRecord, ValidationError> {
    EventRecordValidator::new().validate(raw)
}

/// Turns raw extraction output into an [`EventRecord`].
///
/// By default the time zone is only checked for the empty string; the
/// extraction schema is what restricts it to the allow-list. Call
/// [`enforce_time_zones`](Self::enforce_time_zones) to also reject zones
/// outside the list here.
#[derive(Debug, Clone, Default)]
pub struct EventRecordValidator {
    time_zones: TimeZoneAllowList,
    enforce_time_zones: bool,
}

impl EventRecordValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `time_zones` instead of the default allow-list.
    #[must_use]
    pub fn with_time_zones(mut self, time_zones: TimeZoneAllowList) -> Self {
        self.time_zones = time_zones;
        self
    }

    /// Also rejects a non-null `timeZone` that is not in the allow-list.
    #[must_use]
    pub fn enforce_time_zones(mut self, enforce: bool) -> Self {
        self.enforce_time_zones = enforce;
        self
    }

    pub fn time_zones(&self) -> &TimeZoneAllowList {
        &self.time_zones
    }

    /// Validates `raw` and returns the record it describes.
    ///
    /// Field values are carried over unchanged.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first rule `raw` violates.
    pub fn validate(&self, raw: &Value) -> Result<EventRecord, ValidationError> {
        match self.check(raw) {
            Ok(record) => {
                trace!(title = record.title(), "accepted extracted event");
                Ok(record)
            }
            Err(err) => {
                debug!(code = err.code(), "rejected extracted event: {}", err);
                Err(err)
            }
        }
    }

    fn check(&self, raw: &Value) -> Result<EventRecord, ValidationError> {
        let fields = raw.as_object().ok_or(ValidationError::MalformedRecord)?;

        let title = match fields.get("title") {
            Some(Value::String(title)) if !title.is_empty() => title.clone(),
            _ => return Err(ValidationError::EmptyTitle),
        };

        let start_date = required(fields, "startDate", ValidationError::InvalidStartDate)?;
        let start_time = required(fields, "startTime", ValidationError::InvalidStartTime)?;
        let end_date = nullable(fields, "endDate", ValidationError::InvalidEndDate)?;
        let end_time = nullable(fields, "endTime", ValidationError::InvalidEndTime)?;

        if is_empty_string(fields, "timeZone") {
            return Err(ValidationError::EmptyTimeZoneNotNull);
        }
        if is_empty_string(fields, "location") {
            return Err(ValidationError::EmptyLocationNotNull);
        }
        let time_zone = nullable_text(fields, "timeZone")?;
        let location = nullable_text(fields, "location")?;

        if self.enforce_time_zones {
            if let Some(zone) = time_zone.as_deref() {
                if !self.time_zones.contains(zone) {
                    return Err(ValidationError::UnknownTimeZone(zone.to_string()));
                }
            }
        }

        Ok(EventRecord::new(
            title, start_date, start_time, end_date, end_time, time_zone, location,
        ))
    }
}

/// A string field that must parse as `T`.
fn required<T: FromStr>(
    fields: &Map<String, Value>,
    key: &str,
    err: ValidationError,
) -> Result<T, ValidationError> {
    match fields.get(key) {
        Some(Value::String(s)) => s.parse().map_err(|_| err),
        _ => Err(err),
    }
}

/// A field that is either `null`/absent or a string that parses as `T`.
fn nullable<T: FromStr>(
    fields: &Map<String, Value>,
    key: &str,
    err: ValidationError,
) -> Result<Option<T>, ValidationError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => s.parse().map(Some).map_err(|_| err),
        Some(_) => Err(err),
    }
}

fn is_empty_string(fields: &Map<String, Value>, key: &str) -> bool {
    matches!(fields.get(key), Some(Value::String(s)) if s.is_empty())
}

/// A free-text field that is `null`/absent or a string. Runs after the
/// empty-string checks, so any other JSON type is a malformed record.
fn nullable_text(fields: &Map<String, Value>, key: &str) -> Result<Option<String>, ValidationError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::MalformedRecord),
    }
}
