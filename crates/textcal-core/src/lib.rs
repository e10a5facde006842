//! Core of textcal: validate extracted events and encode calendar links.
//!
//! Raw extraction output goes through [`validate`] to become an
//! [`EventRecord`], which [`encode`] turns into a Google Calendar event
//! creation URL.

pub mod encode;
pub mod error;
pub mod record;
pub mod schema;
pub mod time_zones;
pub mod tracing;
pub mod validate;

pub use encode::{
    CalendarLinkEncoder, DurationPolicy, FixedDuration, default_end, encode,
    format_calendar_token, wall_clock,
};
pub use error::{ConfigError, ShapeError, ValidationError};
pub use record::{CalendarDate, ClockTime, EventRecord};
pub use schema::{ExtractionFormat, extraction_schema};
pub use time_zones::{DEFAULT_TIME_ZONES, TimeZoneAllowList};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use validate::{EventRecordValidator, validate};
