//! The JSON Schema handed to the extraction service.
//!
//! The extraction service is asked for strict structured output matching
//! this schema. Restricting `timeZone` to the allow-list happens here, at the
//! boundary, rather than in the validator.

use serde::Serialize;
use serde_json::{Value, json};

use crate::time_zones::TimeZoneAllowList;

/// Name under which the schema is registered with the extraction service.
pub const EXTRACTION_SCHEMA_NAME: &str = "event_extraction";

/// Builds the event schema for `time_zones`.
///
/// All seven fields are required; optional ones are nullable instead. The
/// `timeZone` enum lists the allowed zones followed by `null`.
pub fn extraction_schema(time_zones: &TimeZoneAllowList) -> Value {
    let mut zones: Vec<Value> = time_zones.iter().map(Value::from).collect();
    zones.push(Value::Null);

    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "startDate": { "type": "string" },
            "startTime": { "type": "string" },
            "endDate": { "type": ["string", "null"] },
            "endTime": { "type": ["string", "null"] },
            "timeZone": { "type": ["string", "null"], "enum": zones },
            "location": { "type": ["string", "null"] },
        },
        "required": [
            "title",
            "startDate",
            "startTime",
            "endDate",
            "endTime",
            "timeZone",
            "location",
        ],
        "additionalProperties": false,
    })
}

/// The structured-output envelope around the event schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
    pub schema: Value,
    pub strict: bool,
}

impl ExtractionFormat {
    pub fn new(time_zones: &TimeZoneAllowList) -> Self {
        Self {
            kind: "json_schema",
            name: EXTRACTION_SCHEMA_NAME,
            schema: extraction_schema(time_zones),
            strict: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema() {
        let schema = extraction_schema(&TimeZoneAllowList::default());
        insta::assert_snapshot!(serde_json::to_string_pretty(&schema).unwrap(), @r#"
        {
          "additionalProperties": false,
          "properties": {
            "endDate": {
              "type": [
                "string",
                "null"
              ]
            },
            "endTime": {
              "type": [
                "string",
                "null"
              ]
            },
            "location": {
              "type": [
                "string",
                "null"
              ]
            },
            "startDate": {
              "type": "string"
            },
            "startTime": {
              "type": "string"
            },
            "timeZone": {
              "enum": [
                "America/New_York",
                "America/Chicago",
                "America/Denver",
                "America/Los_Angeles",
                "Europe/London",
                "Asia/Tokyo",
                null
              ],
              "type": [
                "string",
                "null"
              ]
            },
            "title": {
              "type": "string"
            }
          },
          "required": [
            "title",
            "startDate",
            "startTime",
            "endDate",
            "endTime",
            "timeZone",
            "location"
          ],
          "type": "object"
        }
        "#);
    }

    #[test]
    fn time_zone_enum_ends_with_null() {
        let schema = extraction_schema(&TimeZoneAllowList::default());
        let zones = schema["properties"]["timeZone"]["enum"].as_array().unwrap();
        assert_eq!(zones.len(), 7);
        assert_eq!(zones[0], "America/New_York");
        assert_eq!(zones[5], "Asia/Tokyo");
        assert!(zones[6].is_null());
    }

    #[test]
    fn custom_zones_flow_into_enum() {
        let list = TimeZoneAllowList::new(["Europe/Paris", "UTC"]).unwrap();
        let schema = extraction_schema(&list);
        assert_eq!(
            schema["properties"]["timeZone"]["enum"],
            json!(["Europe/Paris", "UTC", null])
        );
    }

    #[test]
    fn every_property_is_required() {
        let schema = extraction_schema(&TimeZoneAllowList::default());
        let properties = schema["properties"].as_object().unwrap();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(properties.len(), required.len());
        assert!(required.iter().all(|key| properties.contains_key(*key)));
        assert_eq!(schema["additionalProperties"], false);
    }

    #[test]
    fn envelope_shape() {
        let format = ExtractionFormat::new(&TimeZoneAllowList::default());
        let value = serde_json::to_value(&format).unwrap();
        assert_eq!(value["type"], "json_schema");
        assert_eq!(value["name"], "event_extraction");
        assert_eq!(value["strict"], true);
        assert_eq!(value["schema"]["type"], "object");
    }

    #[test]
    fn accepted_records_match_schema_keys() {
        let record = crate::validate::validate(&json!({
            "title": "Standup",
            "startDate": "2025-03-10",
            "startTime": "09:00",
        }))
        .unwrap();
        let serialized = serde_json::to_value(&record).unwrap();
        let schema = extraction_schema(&TimeZoneAllowList::default());
        let mut record_keys: Vec<_> = serialized.as_object().unwrap().keys().collect();
        let mut schema_keys: Vec<_> = schema["properties"].as_object().unwrap().keys().collect();
        record_keys.sort();
        schema_keys.sort();
        assert_eq!(record_keys, schema_keys);
    }
}
