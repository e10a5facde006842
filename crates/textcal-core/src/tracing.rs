//! Subscriber setup for the `textcal` binary.
//!
//! The validator and encoder only emit `debug`/`trace` events; nothing is
//! printed unless a subscriber is installed with [`init_tracing`]. Logs go to
//! stderr so they never mix with a link printed on stdout.
//!
//! ```ignore
//! use textcal_core::tracing::{init_tracing, TracingConfig, TracingOutputFormat};
//!
//! init_tracing(TracingConfig::cli_quiet())?;
//! init_tracing(TracingConfig::cli_debug().with_format(TracingOutputFormat::Json))?;
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, Subscriber};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*, registry::LookupSpan};

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Failed to parse env filter directive
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// Crate targets the default filter applies to.
const LOG_TARGETS: [&str; 3] = ["textcal", "textcal_core", "textcal_client"];

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingOutputFormat {
    /// One line per event
    #[default]
    Compact,
    /// Multi-line, human-readable
    Pretty,
    /// JSON lines, for callers that parse the log stream
    Json,
}

/// What [`init_tracing`] installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level for the textcal targets when neither `RUST_LOG` nor
    /// `env_filter` is set
    pub default_level: Level,
    pub output_format: TracingOutputFormat,
    /// Adds file, line and target to each event
    pub include_location: bool,
    pub include_timestamp: bool,
    /// Replaces both `RUST_LOG` and the default directive
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::cli_quiet()
    }
}

impl TracingConfig {
    /// Warnings only, no timestamps: what a normal run prints.
    #[must_use]
    pub fn cli_quiet() -> Self {
        Self {
            default_level: Level::WARN,
            output_format: TracingOutputFormat::Compact,
            include_location: false,
            include_timestamp: false,
            env_filter: None,
        }
    }

    /// Debug events with their source location, for `--debug`.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_location: true,
            ..Self::cli_quiet()
        }
    }

    /// The filter directive used when neither `RUST_LOG` nor a custom
    /// filter is set, e.g. `textcal=WARN,textcal_core=WARN,textcal_client=WARN`.
    pub fn default_directive(&self) -> String {
        LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, self.default_level))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, include: bool) -> Self {
        self.include_timestamp = include;
        self
    }

    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Builds the filter: `env_filter`, then `RUST_LOG`, then the default
    /// directive.
    ///
    /// # Errors
    ///
    /// Returns [`TracingError::EnvFilter`] if `env_filter` does not parse.
    pub fn filter(&self) -> Result<EnvFilter, TracingError> {
        match self.env_filter.as_deref() {
            Some(directive) => Ok(EnvFilter::try_new(directive)?),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))),
        }
    }

    /// The formatting layer for this configuration, writing to stderr.
    pub fn layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync + 'static>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        let base = fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_target(self.include_location);

        match (self.output_format, self.include_timestamp) {
            (TracingOutputFormat::Compact, true) => base.compact().boxed(),
            (TracingOutputFormat::Compact, false) => base.compact().without_time().boxed(),
            (TracingOutputFormat::Pretty, true) => base.pretty().boxed(),
            (TracingOutputFormat::Pretty, false) => base.pretty().without_time().boxed(),
            (TracingOutputFormat::Json, true) => base.json().boxed(),
            (TracingOutputFormat::Json, false) => base.json().without_time().boxed(),
        }
    }
}

/// Installs the global subscriber described by `config`.
///
/// Call once, at the start of `main`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set or if the custom
/// filter directive is invalid.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let subscriber = tracing_subscriber::registry()
        .with(config.filter()?)
        .with(config.layer());
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_quiet() {
        let config = TracingConfig::default();
        assert_eq!(config, TracingConfig::cli_quiet());
        assert_eq!(config.default_level, Level::WARN);
        assert_eq!(config.output_format, TracingOutputFormat::Compact);
        assert!(!config.include_location);
        assert!(!config.include_timestamp);
        assert!(config.env_filter.is_none());
    }

    #[test]
    fn test_cli_debug_config() {
        let config = TracingConfig::cli_debug();
        assert_eq!(config.default_level, Level::DEBUG);
        assert_eq!(config.output_format, TracingOutputFormat::Compact);
        assert!(config.include_location);
    }

    #[test]
    fn test_default_directive_covers_all_crates() {
        let config = TracingConfig::default().with_level(Level::DEBUG);
        assert_eq!(
            config.default_directive(),
            "textcal=DEBUG,textcal_core=DEBUG,textcal_client=DEBUG"
        );
    }

    #[test]
    fn test_builder_methods() {
        let config = TracingConfig::default()
            .with_level(Level::INFO)
            .with_format(TracingOutputFormat::Json)
            .with_timestamps(true)
            .with_env_filter("textcal_core=trace");

        assert_eq!(config.default_level, Level::INFO);
        assert_eq!(config.output_format, TracingOutputFormat::Json);
        assert!(config.include_timestamp);
        assert_eq!(config.env_filter, Some("textcal_core=trace".to_string()));
    }

    #[test]
    fn test_custom_filter() {
        let config = TracingConfig::default().with_env_filter("textcal_core=trace");
        assert!(config.filter().is_ok());

        let config = TracingConfig::default().with_env_filter("textcal_core=loud");
        assert!(matches!(config.filter(), Err(TracingError::EnvFilter(_))));
    }

    #[test]
    fn test_every_format_builds_a_layer() {
        for format in [
            TracingOutputFormat::Compact,
            TracingOutputFormat::Pretty,
            TracingOutputFormat::Json,
        ] {
            for timestamps in [true, false] {
                let config = TracingConfig::cli_debug()
                    .with_format(format)
                    .with_timestamps(timestamps)
                    .with_env_filter("textcal_core=trace");
                let subscriber = tracing_subscriber::registry()
                    .with(config.filter().unwrap())
                    .with(config.layer());
                tracing::subscriber::with_default(subscriber, || {
                    tracing::debug!(target: "textcal_core", ?format, timestamps, "layer check");
                });
            }
        }
    }

    #[test]
    fn test_format_names() {
        #[derive(Deserialize)]
        struct Logging {
            format: TracingOutputFormat,
        }
        let parsed: Logging = serde_json::from_str(r#"{"format": "json"}"#).unwrap();
        assert_eq!(parsed.format, TracingOutputFormat::Json);
        assert_eq!(
            serde_json::to_value(TracingOutputFormat::Pretty).unwrap(),
            "pretty"
        );
    }
}
