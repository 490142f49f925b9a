//! Onion-encryption pipeline: protect a record into an artifact and back.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::artifact::{truncate_to_millis, LayerRecord, ProtectedArtifact, ProtectedRecord};
use super::config::EnvelopeConfig;
use super::password::RoundPassword;
use super::payload;
use super::validate::{check_artifact, parse_artifact};
use crate::crypto::cipher::{random_bytes, seal_layer};
use crate::crypto::{decrypt_layer_with_iterations, SALT_LENGTH};
use crate::error::{Result, SelfqError};

/// Protect a record with the current time as `createdAt`.
///
/// # Examples
///
/// ```
/// use selfq_core::export::{protect, recover, EnvelopeConfig};
///
/// let config = EnvelopeConfig::new("T-v1").with_kdf_iterations(1_000);
/// let record = serde_json::json!({ "title": "Day 1", "content": "Hello" });
/// let record = record.as_object().unwrap();
///
/// let artifact = protect(record, &config).unwrap();
/// assert_eq!(artifact.layer_info.len(), 3);
///
/// let text = artifact.to_json_pretty().unwrap();
/// assert_eq!(&recover(&text, &config).unwrap(), record);
/// ```
pub fn protect(record: &ProtectedRecord, config: &EnvelopeConfig) -> Result<ProtectedArtifact> {
    protect_at(record, config, Utc::now())
}

/// Protect a record with an explicit creation time.
///
/// The time is truncated to milliseconds; it anchors every round password.
pub fn protect_at(
    record: &ProtectedRecord,
    config: &EnvelopeConfig,
    created_at: DateTime<Utc>,
) -> Result<ProtectedArtifact> {
    config.validate()?;
    let created_at = truncate_to_millis(created_at);
    let millis = created_at.timestamp_millis();

    let mut current = payload::sign(record, config, &created_at)?;
    let mut layer_info = Vec::with_capacity(config.layers);

    for round in 0..config.layers {
        let salt: [u8; SALT_LENGTH] = random_bytes()?;
        let anchor = hex::encode(salt);
        let password = RoundPassword::derive(&config.tag, round, &anchor, millis);

        let layer = seal_layer(&current, password.expose(), &salt, config.kdf_iterations)?;
        debug!(
            round,
            input_chars = current.len(),
            output_chars = layer.ciphertext.len(),
            "sealed layer"
        );

        layer_info.push(LayerRecord {
            salt: layer.salt,
            nonce: layer.nonce,
            password_hint: password.fingerprint(),
        });
        current = layer.ciphertext;
    }

    info!(tag = %config.tag, layers = config.layers, "protected record");

    Ok(ProtectedArtifact {
        signature: config.tag.clone(),
        version: config.version.clone(),
        layers: config.layers,
        layer_info,
        encrypted_data: current,
        created_at,
    })
}

/// Verify and decrypt artifact text back into the original record.
///
/// All-or-nothing: either the exact record comes back or an error does.
pub fn recover(artifact_text: &str, config: &EnvelopeConfig) -> Result<ProtectedRecord> {
    config.validate()?;
    let artifact = parse_artifact(artifact_text, config).inspect_err(|err| {
        warn!(kind = ?err.kind(), "rejected artifact");
    })?;
    unwrap_layers(&artifact, config)
}

/// Verify and decrypt an already-decoded artifact.
pub fn recover_artifact(
    artifact: &ProtectedArtifact,
    config: &EnvelopeConfig,
) -> Result<ProtectedRecord> {
    config.validate()?;
    check_artifact(artifact, config).inspect_err(|err| {
        warn!(kind = ?err.kind(), "rejected artifact");
    })?;
    unwrap_layers(artifact, config)
}

fn unwrap_layers(artifact: &ProtectedArtifact, config: &EnvelopeConfig) -> Result<ProtectedRecord> {
    let millis = artifact.created_at.timestamp_millis();
    let mut current = artifact.encrypted_data.clone();

    for (round, layer) in artifact.layer_info.iter().enumerate().rev() {
        let password = RoundPassword::derive(&config.tag, round, &layer.salt, millis);
        if !password.matches_hint(&layer.password_hint) {
            warn!(round, "round password does not match stored hint");
            return Err(SelfqError::LayerPasswordMismatch { round });
        }

        current = decrypt_layer_with_iterations(
            &current,
            &layer.salt,
            &layer.nonce,
            password.expose(),
            config.kdf_iterations,
        )
        .map_err(|err| err.at_round(round))
        .inspect_err(|err| warn!(round, kind = ?err.kind(), "layer decryption failed"))?;
        debug!(round, output_chars = current.len(), "opened layer");
    }

    let record = payload::unsign(&current, config)
        .inspect_err(|err| warn!(kind = ?err.kind(), "recovered payload rejected"))?;
    info!(tag = %config.tag, fields = record.len(), "recovered record");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::TimeZone;
    use serde_json::json;

    fn config() -> EnvelopeConfig {
        EnvelopeConfig::new("T-v1").with_kdf_iterations(1_000)
    }

    fn record() -> ProtectedRecord {
        json!({ "title": "Day 1", "content": "Hello" })
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_concrete_scenario() {
        let artifact = protect(&record(), &config()).unwrap();

        assert_eq!(artifact.layers, 3);
        assert_eq!(artifact.layer_info.len(), 3);
        assert_eq!(artifact.encrypted_data.len() % 2, 0);
        assert!(hex::decode(&artifact.encrypted_data).is_ok());

        let text = artifact.to_json_pretty().unwrap();
        assert_eq!(recover(&text, &config()).unwrap(), record());
    }

    #[test]
    fn test_recover_artifact_without_text() {
        let artifact = protect(&record(), &config()).unwrap();
        assert_eq!(recover_artifact(&artifact, &config()).unwrap(), record());
    }

    #[test]
    fn test_created_at_truncated_to_millis() {
        let at = Utc.timestamp_nanos(1_760_000_000_123_456_789);
        let artifact = protect_at(&record(), &config(), at).unwrap();
        assert_eq!(artifact.created_at.timestamp_subsec_nanos(), 123_000_000);
        assert_eq!(recover_artifact(&artifact, &config()).unwrap(), record());
    }

    #[test]
    fn test_ciphertext_grows_each_round() {
        let single = protect(&record(), &config().with_layers(1)).unwrap();
        let triple = protect(&record(), &config()).unwrap();
        assert!(triple.encrypted_data.len() > 2 * single.encrypted_data.len());
    }

    #[test]
    fn test_hints_differ_between_rounds() {
        let artifact = protect(&record(), &config()).unwrap();
        let hints: Vec<&str> = artifact
            .layer_info
            .iter()
            .map(|layer| layer.password_hint.as_str())
            .collect();
        assert_ne!(hints[0], hints[1]);
        assert_ne!(hints[1], hints[2]);
    }

    #[test]
    fn test_artifact_contains_no_plaintext() {
        let text = protect(&record(), &config()).unwrap().to_json_pretty().unwrap();
        assert!(!text.contains("Hello"));
        assert!(!text.contains("Day 1"));
    }

    #[test]
    fn test_wrong_created_at_is_password_mismatch() {
        let mut artifact = protect(&record(), &config()).unwrap();
        artifact.created_at += chrono::Duration::milliseconds(1);

        let result = recover_artifact(&artifact, &config());
        assert!(matches!(
            result,
            Err(SelfqError::LayerPasswordMismatch { round: 2 })
        ));
    }

    #[test]
    fn test_swapped_layers_detected() {
        let mut artifact = protect(&record(), &config()).unwrap();
        artifact.layer_info.swap(0, 2);

        let err = recover_artifact(&artifact, &config()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LayerPasswordMismatch);
    }

    #[test]
    fn test_mismatched_iterations_fail_authentication() {
        let artifact = protect(&record(), &config()).unwrap();
        let err = recover_artifact(&artifact, &config().with_kdf_iterations(999)).unwrap_err();
        assert!(matches!(err, SelfqError::Authentication { round: 2 }));
    }

    #[test]
    fn test_other_family_rejected() {
        let artifact = protect(&record(), &config()).unwrap();
        let text = artifact.to_json_pretty().unwrap();
        let other = EnvelopeConfig::post().with_kdf_iterations(1_000);

        let err = recover(&text, &other).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SignatureMismatch);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = protect(&record(), &config().with_layers(0));
        assert!(matches!(result, Err(SelfqError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_record_round_trip() {
        let empty = ProtectedRecord::new();
        let artifact = protect(&empty, &config()).unwrap();
        assert_eq!(recover_artifact(&artifact, &config()).unwrap(), empty);
    }
}
