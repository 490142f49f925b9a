//! Artifact data model and its JSON boundary encoding.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SelfqError};

/// One diary entry or story: arbitrary named fields.
pub type ProtectedRecord = serde_json::Map<String, serde_json::Value>;

/// Per-round metadata, ordered by round index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRecord {
    /// Hex-encoded 16-byte PBKDF2 salt
    pub salt: String,
    /// Hex-encoded 12-byte AES-GCM nonce
    pub nonce: String,
    /// Fingerprint of the round password
    pub password_hint: String,
}

/// The exported, self-contained file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedArtifact {
    pub signature: String,
    pub version: String,
    pub layers: usize,
    pub layer_info: Vec<LayerRecord>,
    /// Hex-encoded ciphertext of the outermost round
    pub encrypted_data: String,
    #[serde(with = "millis_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl ProtectedArtifact {
    /// Serialize to the pretty-printed JSON document written to disk.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SelfqError::Crypto(format!("Artifact serialization failed: {}", e)))
    }

    /// Decode an artifact without checking tags or layer counts.
    ///
    /// Use [`crate::export::parse_artifact`] to get the full structural gate.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| SelfqError::MalformedInput(format!("Invalid artifact structure: {}", e)))
    }
}

/// Truncate a timestamp to whole milliseconds.
///
/// `createdAt` feeds the round-password schedule, so it must survive a text
/// round trip exactly.
pub fn truncate_to_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or(at)
}

/// ISO-8601 rendering with millisecond precision and a `Z` suffix.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) mod millis_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> ProtectedArtifact {
        ProtectedArtifact {
            signature: "T-v1".to_string(),
            version: "2.0".to_string(),
            layers: 1,
            layer_info: vec![LayerRecord {
                salt: "00".repeat(16),
                nonce: "11".repeat(12),
                password_hint: "aGludA==".to_string(),
            }],
            encrypted_data: "ab".repeat(20),
            created_at: Utc.timestamp_millis_opt(1_760_000_000_123).unwrap(),
        }
    }

    #[test]
    fn test_field_names_are_camel_case() {
        let json = sample().to_json_pretty().unwrap();
        assert!(json.contains("\"layerInfo\""));
        assert!(json.contains("\"encryptedData\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"passwordHint\""));
    }

    #[test]
    fn test_created_at_keeps_milliseconds() {
        let json = sample().to_json_pretty().unwrap();
        assert!(json.contains("\"2025-10-09T08:53:20.123Z\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let decoded = ProtectedArtifact::from_json_value(value).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_accepts_offset_timestamps() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["createdAt"] = serde_json::json!("2025-10-09T10:53:20.123+02:00");
        let decoded = ProtectedArtifact::from_json_value(value).unwrap();
        assert_eq!(decoded.created_at, sample().created_at);
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value.as_object_mut().unwrap().remove("encryptedData");
        let result = ProtectedArtifact::from_json_value(value);
        assert!(matches!(result, Err(SelfqError::MalformedInput(_))));
    }

    #[test]
    fn test_truncate_to_millis() {
        let precise = Utc.timestamp_nanos(1_760_000_000_123_456_789);
        let truncated = truncate_to_millis(precise);
        assert_eq!(truncated.timestamp_millis(), 1_760_000_000_123);
        assert_eq!(truncated.timestamp_subsec_nanos(), 123_000_000);
    }
}
