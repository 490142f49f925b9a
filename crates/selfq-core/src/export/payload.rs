//! Signed plaintext: the record plus the fields injected before round 0.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::artifact::{format_timestamp, ProtectedRecord};
use super::config::EnvelopeConfig;
use crate::error::{Result, SelfqError};

/// Application signature injected into the plaintext.
pub const SIGNATURE_FIELD: &str = "__signature";

/// Creation timestamp injected into the plaintext.
pub const TIMESTAMP_FIELD: &str = "__timestamp";

/// Layer count injected into the plaintext.
pub const LAYERS_FIELD: &str = "__layers";

const RESERVED_FIELDS: [&str; 3] = [SIGNATURE_FIELD, TIMESTAMP_FIELD, LAYERS_FIELD];

/// Build the signed plaintext text encrypted by round 0.
pub fn sign(
    record: &ProtectedRecord,
    config: &EnvelopeConfig,
    created_at: &DateTime<Utc>,
) -> Result<String> {
    if let Some(field) = RESERVED_FIELDS.iter().find(|f| record.contains_key(**f)) {
        return Err(SelfqError::InvalidInput(format!(
            "Record field \"{}\" is reserved",
            field
        )));
    }

    let mut signed = record.clone();
    signed.insert(SIGNATURE_FIELD.to_string(), Value::from(config.tag.as_str()));
    signed.insert(TIMESTAMP_FIELD.to_string(), Value::from(format_timestamp(created_at)));
    signed.insert(LAYERS_FIELD.to_string(), Value::from(config.layers));

    serde_json::to_string(&signed)
        .map_err(|e| SelfqError::Crypto(format!("Record serialization failed: {}", e)))
}

/// Check the innermost plaintext and strip the injected fields.
pub fn unsign(plaintext: &str, config: &EnvelopeConfig) -> Result<ProtectedRecord> {
    let value: Value = serde_json::from_str(plaintext)
        .map_err(|e| SelfqError::InvalidPayload(format!("Recovered data is not JSON: {}", e)))?;
    let Value::Object(mut record) = value else {
        return Err(SelfqError::InvalidPayload(
            "Recovered data is not a JSON object".to_string(),
        ));
    };

    let signature = record
        .remove(SIGNATURE_FIELD)
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_default();
    if signature != config.tag {
        return Err(SelfqError::signature_mismatch(&config.tag, &signature));
    }

    let layers = record
        .remove(LAYERS_FIELD)
        .and_then(|v| v.as_u64())
        .ok_or_else(|| SelfqError::InvalidPayload("Recovered data has no layer count".to_string()))?;
    if layers != config.layers as u64 {
        return Err(SelfqError::LayerCountMismatch {
            expected: config.layers,
            found: layers as usize,
        });
    }

    record.remove(TIMESTAMP_FIELD);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> ProtectedRecord {
        json!({ "title": "Day 1", "content": "Hello" })
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_sign_injects_fields() {
        let config = EnvelopeConfig::new("T-v1");
        let text = sign(&record(), &config, &Utc::now()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value[SIGNATURE_FIELD], "T-v1");
        assert_eq!(value[LAYERS_FIELD], 3);
        assert!(value[TIMESTAMP_FIELD].as_str().unwrap().ends_with('Z'));
        assert_eq!(value["title"], "Day 1");
    }

    #[test]
    fn test_sign_unsign_restores_record() {
        let config = EnvelopeConfig::new("T-v1");
        let text = sign(&record(), &config, &Utc::now()).unwrap();
        assert_eq!(unsign(&text, &config).unwrap(), record());
    }

    #[test]
    fn test_reserved_field_rejected() {
        let mut input = record();
        input.insert(SIGNATURE_FIELD.to_string(), json!("mine"));
        let result = sign(&input, &EnvelopeConfig::new("T-v1"), &Utc::now());
        assert!(matches!(result, Err(SelfqError::InvalidInput(_))));
    }

    #[test]
    fn test_inner_signature_must_match() {
        let text = sign(&record(), &EnvelopeConfig::new("T-v1"), &Utc::now()).unwrap();
        let result = unsign(&text, &EnvelopeConfig::new("other"));
        assert!(matches!(result, Err(SelfqError::SignatureMismatch { .. })));
    }

    #[test]
    fn test_missing_inner_signature_is_mismatch() {
        let text = json!({ "title": "x", LAYERS_FIELD: 3 }).to_string();
        let result = unsign(&text, &EnvelopeConfig::new("T-v1"));
        assert!(matches!(result, Err(SelfqError::SignatureMismatch { .. })));
    }

    #[test]
    fn test_inner_layer_count_must_match() {
        let text = sign(&record(), &EnvelopeConfig::new("T-v1").with_layers(2), &Utc::now()).unwrap();
        let result = unsign(&text, &EnvelopeConfig::new("T-v1"));
        assert!(matches!(
            result,
            Err(SelfqError::LayerCountMismatch { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn test_non_object_payload_is_invalid() {
        let result = unsign("[1, 2, 3]", &EnvelopeConfig::new("T-v1"));
        assert!(matches!(result, Err(SelfqError::InvalidPayload(_))));

        let result = unsign("not json", &EnvelopeConfig::new("T-v1"));
        assert!(matches!(result, Err(SelfqError::InvalidPayload(_))));
    }
}
