//! Error types for event validation and encoder configuration.

use thiserror::Error;

/// Why an extracted event record was rejected.
///
/// Validation stops at the first violated rule, so each error names exactly
/// one condition. None of these are retryable: feeding the same record back
/// in reproduces the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input is not a JSON object, or a field has the wrong JSON type.
    #[error("event info is not a well-formed object")]
    MalformedRecord,

    /// `title` is missing or empty.
    #[error("event title is empty")]
    EmptyTitle,

    /// `startDate` is not `YYYY-MM-DD`.
    #[error("event start date is invalid")]
    InvalidStartDate,

    /// `startTime` is not `HH:MM`.
    #[error("event start time is invalid")]
    InvalidStartTime,

    /// `endDate` is neither `null` nor `YYYY-MM-DD`.
    #[error("event end date is invalid")]
    InvalidEndDate,

    /// `endTime` is neither `null` nor `HH:MM`.
    #[error("event end time is invalid")]
    InvalidEndTime,

    /// `timeZone` is the empty string instead of `null`.
    #[error("unknown time zone should be null, not an empty string")]
    EmptyTimeZoneNotNull,

    /// `location` is the empty string instead of `null`.
    #[error("unknown location should be null, not an empty string")]
    EmptyLocationNotNull,

    /// `timeZone` is not in the configured allow-list.
    #[error("time zone {0:?} is not in the allow-list")]
    UnknownTimeZone(String),
}

impl ValidationError {
    /// Returns a stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedRecord => "malformed_record",
            Self::EmptyTitle => "empty_title",
            Self::InvalidStartDate => "invalid_start_date",
            Self::InvalidStartTime => "invalid_start_time",
            Self::InvalidEndDate => "invalid_end_date",
            Self::InvalidEndTime => "invalid_end_time",
            Self::EmptyTimeZoneNotNull => "empty_time_zone_not_null",
            Self::EmptyLocationNotNull => "empty_location_not_null",
            Self::UnknownTimeZone(_) => "unknown_time_zone",
        }
    }

    /// Always `false`; kept so callers can treat every error uniformly.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Errors raised while building validator or encoder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An allow-list entry is not a known IANA time zone.
    #[error("unknown IANA time zone: {0}")]
    UnknownTimeZone(String),

    /// The allow-list has no entries.
    #[error("time zone allow-list must not be empty")]
    EmptyTimeZoneList,

    /// The calendar base URL could not be parsed.
    #[error("invalid calendar base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A default event duration of zero minutes was requested.
    #[error("default event duration must be at least one minute")]
    ZeroDuration,
}

/// A field value that does not have the expected textual shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, got {found:?}")]
pub struct ShapeError {
    pub(crate) expected: &'static str,
    pub(crate) found: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let all = [
            ValidationError::MalformedRecord,
            ValidationError::EmptyTitle,
            ValidationError::InvalidStartDate,
            ValidationError::InvalidStartTime,
            ValidationError::InvalidEndDate,
            ValidationError::InvalidEndTime,
            ValidationError::EmptyTimeZoneNotNull,
            ValidationError::EmptyLocationNotNull,
            ValidationError::UnknownTimeZone("Mars/Olympus".into()),
        ];
        let codes: std::collections::HashSet<_> = all.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), all.len());
        assert!(all.iter().all(|e| !e.is_retryable()));
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            ValidationError::EmptyTitle.to_string(),
            "event title is empty"
        );
        assert_eq!(
            ValidationError::UnknownTimeZone("Mars/Olympus".into()).to_string(),
            "time zone \"Mars/Olympus\" is not in the allow-list"
        );
        assert_eq!(
            ShapeError {
                expected: "YYYY-MM-DD",
                found: "2025-1-1".into()
            }
            .to_string(),
            "expected YYYY-MM-DD, got \"2025-1-1\""
        );
    }
}
