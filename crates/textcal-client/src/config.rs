//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/textcal/config.toml` by default. Every section is optional:
//!
//! ```toml
//! debug = false
//!
//! [logging]
//! format = "compact" # or "pretty", "json"
//! timestamps = false
//!
//! [time_zones]
//! allowed = ["America/New_York", "Europe/London"]
//! enforce = false
//!
//! [calendar]
//! base_url = "https://calendar.google.com/calendar/u/0/r/eventedit"
//! default_duration_minutes = 60
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use textcal_core::encode::GOOGLE_CALENDAR_EVENT_EDIT_URL;
use textcal_core::tracing::{TracingConfig, TracingOutputFormat};
use textcal_core::{
    CalendarLinkEncoder, ConfigError, DEFAULT_TIME_ZONES, EventRecordValidator, FixedDuration,
    TimeZoneAllowList,
};

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the textcal client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug logging, same as `--debug`.
    pub debug: bool,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Time zone allow-list settings.
    #[serde(default)]
    pub time_zones: TimeZoneSettings,

    /// Link encoding settings.
    #[serde(default)]
    pub calendar: CalendarSettings,
}

/// How log lines on stderr look.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub format: TracingOutputFormat,
    pub timestamps: bool,
}

/// Which time zones the extraction may answer with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeZoneSettings {
    /// IANA identifiers offered in the extraction schema.
    pub allowed: Vec<String>,

    /// Reject records whose time zone is not in `allowed`.
    pub enforce: bool,
}

impl Default for TimeZoneSettings {
    fn default() -> Self {
        Self {
            allowed: DEFAULT_TIME_ZONES.iter().map(|z| z.to_string()).collect(),
            enforce: false,
        }
    }
}

/// Settings for the generated calendar link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// Event creation page the query string is appended to.
    pub base_url: String,

    /// Event length when the extraction gave no complete end.
    pub default_duration_minutes: u32,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            base_url: GOOGLE_CALENDAR_EVENT_EDIT_URL.to_string(),
            default_duration_minutes: 60,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("textcal")
    }

    /// Tracing setup for this run. Debug logging is on when either the
    /// command line or the file asks for it.
    pub fn tracing_config(&self, cli_debug: bool) -> TracingConfig {
        let base = if cli_debug || self.debug {
            TracingConfig::cli_debug()
        } else {
            TracingConfig::cli_quiet()
        };
        base.with_format(self.logging.format)
            .with_timestamps(self.logging.timestamps)
    }

    /// Builds the time zone allow-list, checking every entry.
    pub fn allow_list(&self) -> Result<TimeZoneAllowList, ConfigError> {
        TimeZoneAllowList::new(self.time_zones.allowed.iter().cloned())
    }

    /// Builds the record validator described by this configuration.
    pub fn validator(&self) -> Result<EventRecordValidator, ConfigError> {
        Ok(EventRecordValidator::new()
            .with_time_zones(self.allow_list()?)
            .enforce_time_zones(self.time_zones.enforce))
    }

    /// Builds the link encoder described by this configuration.
    pub fn encoder(&self) -> Result<CalendarLinkEncoder, ConfigError> {
        let duration = FixedDuration::minutes(self.calendar.default_duration_minutes)?;
        Ok(CalendarLinkEncoder::new()
            .with_base_url(&self.calendar.base_url)?
            .with_duration_policy(duration))
    }
}
