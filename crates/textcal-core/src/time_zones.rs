//! The set of IANA time zones the extraction service may answer with.

use chrono_tz::Tz;
use serde::Serialize;

use crate::error::ConfigError;

/// Zones offered to the extraction service when nothing else is configured.
pub const DEFAULT_TIME_ZONES: [&str; 6] = [
    "America/New_York",
    "America/Chicago",
    "America/Denver",
    "America/Los_Angeles",
    "Europe/London",
    "Asia/Tokyo",
];

/// An ordered, duplicate-free list of IANA time zone identifiers.
///
/// Every entry is a zone `chrono-tz` knows about. The list is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeZoneAllowList {
    zones: Vec<String>,
}

impl TimeZoneAllowList {
    /// Builds an allow-list from identifiers such as `"Europe/Paris"`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownTimeZone`] for an identifier that is not
    /// an IANA zone, and [`ConfigError::EmptyTimeZoneList`] if no identifiers
    /// were given.
    pub fn new<I, S>(ids: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut zones: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            if id.parse::<Tz>().is_err() {
                return Err(ConfigError::UnknownTimeZone(id));
            }
            if !zones.contains(&id) {
                zones.push(id);
            }
        }

        if zones.is_empty() {
            return Err(ConfigError::EmptyTimeZoneList);
        }
        Ok(Self { zones })
    }

    /// Returns `true` if `id` is in the list. Matching is exact.
    pub fn contains(&self, id: &str) -> bool {
        self.zones.iter().any(|zone| zone == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.zones.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl Default for TimeZoneAllowList {
    fn default() -> Self {
        Self {
            zones: DEFAULT_TIME_ZONES.iter().map(|z| z.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_matches_constant() {
        let list = TimeZoneAllowList::default();
        assert_eq!(list.iter().collect::<Vec<_>>(), DEFAULT_TIME_ZONES);
        assert!(list.contains("America/New_York"));
        assert!(!list.contains("Europe/Paris"));
    }

    #[test]
    fn default_zones_are_valid_iana() {
        assert!(TimeZoneAllowList::new(DEFAULT_TIME_ZONES).is_ok());
    }

    #[test]
    fn custom_list_preserves_order_and_drops_duplicates() {
        let list =
            TimeZoneAllowList::new(["Europe/Paris", "Asia/Tokyo", "Europe/Paris"]).unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), ["Europe/Paris", "Asia/Tokyo"]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn rejects_unknown_zone() {
        let err = TimeZoneAllowList::new(["Europe/Paris", "Mars/Olympus"]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownTimeZone("Mars/Olympus".into()));
    }

    #[test]
    fn rejects_empty_string_zone() {
        let err = TimeZoneAllowList::new([""]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownTimeZone(String::new()));
    }

    #[test]
    fn rejects_empty_list() {
        let err = TimeZoneAllowList::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, ConfigError::EmptyTimeZoneList);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let list = TimeZoneAllowList::default();
        assert!(!list.contains("america/new_york"));
    }

    #[test]
    fn serializes_as_array() {
        let list = TimeZoneAllowList::new(["UTC"]).unwrap();
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["UTC"]"#);
    }
}
