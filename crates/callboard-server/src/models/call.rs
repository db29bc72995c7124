//! Call ingestion DTOs
//!
//! The wire format is lenient: exporters send booleans as "TRUE"/"FALSE"
//! strings and numbers as either integers or numeric strings. Coercion
//! never rejects a value; anything unparsable falls back to the field's
//! documented default.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

use callboard::{normalize, NewCallRecord};

/// Incoming call record payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCallRequest {
    pub phone: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default, deserialize_with = "bool_or_string")]
    #[schema(value_type = Option<bool>)]
    pub call_human: Option<bool>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "int_or_string")]
    #[schema(value_type = Option<i64>)]
    pub attempt: Option<i64>,
    #[serde(default, deserialize_with = "int_or_string")]
    #[schema(value_type = Option<i64>)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "rfc3339_or_none")]
    #[schema(value_type = Option<String>)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CreateCallRequest {
    /// Normalize into the canonical record shape.
    ///
    /// Fields the exporter left out are derived from the status and the
    /// cleaned phone number.
    pub fn into_new_record(self) -> NewCallRecord {
        let phone = normalize::clean_phone(&self.phone);

        let status = self
            .status
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| normalize::STATUS_UNKNOWN.to_string());

        let sentiment = self
            .sentiment
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| normalize::sentiment_for(&status));

        let call_human = self
            .call_human
            .unwrap_or_else(|| normalize::needs_human(&status));

        let country = self
            .country
            .as_deref()
            .and_then(|c| c.parse().ok())
            .unwrap_or_else(|| normalize::country_for(&phone));

        NewCallRecord {
            phone,
            status,
            sentiment,
            call_human,
            summary: self.summary.unwrap_or_default(),
            attempt: self
                .attempt
                .map(|a| a.clamp(1, i64::from(i32::MAX)) as i32)
                .unwrap_or(1),
            duration: self
                .duration
                .map(|d| d.clamp(0, i64::from(i32::MAX)) as i32)
                .unwrap_or(0),
            country,
            created_at: self.created_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Boolish {
    Bool(bool),
    Text(String),
}

fn bool_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = Option::<Boolish>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Boolish::Bool(b) => b,
        Boolish::Text(s) => s.trim().eq_ignore_ascii_case("true"),
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Intish {
    Int(i64),
    Float(f64),
    Text(String),
}

fn int_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<Intish>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Intish::Int(i) => Some(i),
        Intish::Float(f) => Some(f as i64),
        Intish::Text(s) => s.trim().parse().ok(),
    }))
}

fn rfc3339_or_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use callboard::{Country, Sentiment};

    fn request(json: &str) -> CreateCallRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn coerces_string_booleans_and_numbers() {
        let record = request(
            r#"{
                "phone": "++351 911 222333",
                "status": "success",
                "sentiment": "satisfied",
                "call_human": "TRUE",
                "summary": "1 success",
                "attempt": "10",
                "duration": "150",
                "country": "PT"
            }"#,
        )
        .into_new_record();

        assert_eq!(record.phone, "+351911222333");
        assert_eq!(record.status, "success");
        assert_eq!(record.sentiment, Sentiment::Satisfied);
        assert!(record.call_human);
        assert_eq!(record.attempt, 10);
        assert_eq!(record.duration, 150);
        assert_eq!(record.country, Country::Pt);
    }

    #[test]
    fn accepts_native_types() {
        let record = request(
            r#"{
                "phone": "+34600111222",
                "status": "hang up",
                "call_human": false,
                "attempt": 3,
                "duration": 42
            }"#,
        )
        .into_new_record();

        assert!(!record.call_human);
        assert_eq!(record.attempt, 3);
        assert_eq!(record.duration, 42);
    }

    #[test]
    fn malformed_numerics_fall_back_to_defaults() {
        let record = request(
            r#"{
                "phone": "+34600111222",
                "status": "hang up",
                "attempt": "many",
                "duration": "n/a"
            }"#,
        )
        .into_new_record();

        assert_eq!(record.attempt, 1);
        assert_eq!(record.duration, 0);
    }

    #[test]
    fn derives_missing_fields_from_status_and_phone() {
        let record = request(
            r#"{"phone": "+351 911 222 333", "status": "callback requested"}"#,
        )
        .into_new_record();

        assert_eq!(record.sentiment, Sentiment::Neutral);
        assert!(record.call_human);
        assert_eq!(record.country, Country::Pt);
        assert_eq!(record.summary, "");
        assert_eq!(record.attempt, 1);
        assert_eq!(record.duration, 0);
        assert!(record.created_at.is_none());
    }

    #[test]
    fn empty_payload_defaults_to_unknown_status() {
        let record = request(r#"{"phone": "+34600111222"}"#).into_new_record();

        assert_eq!(record.status, "unknown");
        assert_eq!(record.sentiment, Sentiment::Neutral);
        assert!(!record.call_human);
    }

    #[test]
    fn parses_explicit_timestamp_and_ignores_garbage() {
        let with_ts = request(
            r#"{"phone": "+34600111222", "created_at": "2025-11-20T10:30:00Z"}"#,
        );
        assert!(with_ts.created_at.is_some());

        let with_offset = request(
            r#"{"phone": "+34600111222", "created_at": "2025-11-20T10:30:00+01:00"}"#,
        );
        assert!(with_offset.created_at.is_some());

        let garbage = request(r#"{"phone": "+34600111222", "created_at": "yesterday"}"#);
        assert!(garbage.created_at.is_none());
    }

    #[test]
    fn unrecognized_country_falls_back_to_phone_prefix() {
        let record = request(
            r#"{"phone": "+351911222333", "status": "success", "country": "XX"}"#,
        )
        .into_new_record();

        assert_eq!(record.country, Country::Pt);
    }
}
