//! Structural gate for artifacts: everything that can be checked without a key.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::artifact::{millis_timestamp, ProtectedArtifact};
use super::config::EnvelopeConfig;
use crate::crypto::cipher::{decode_hex_array, is_lower_hex};
use crate::crypto::{NONCE_LENGTH, SALT_LENGTH, TAG_LENGTH};
use crate::error::{Result, SelfqError};

/// Key-free description of an artifact, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSummary {
    pub signature: String,
    pub version: String,
    pub layers: usize,
    #[serde(serialize_with = "millis_timestamp::serialize")]
    pub created_at: DateTime<Utc>,
    pub ciphertext_bytes: usize,
    pub password_hints: Vec<String>,
}

/// Parse artifact text and run every structural check.
///
/// Order: JSON shape, signature, version, full structure, layer counts,
/// hex fields. Tag and version are read before the full structure so a
/// foreign file is reported as such even when the rest is garbage.
pub fn parse_artifact(text: &str, config: &EnvelopeConfig) -> Result<ProtectedArtifact> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| SelfqError::MalformedInput(format!("Artifact is not valid JSON: {}", e)))?;
    let object = value
        .as_object()
        .ok_or_else(|| SelfqError::MalformedInput("Artifact is not a JSON object".to_string()))?;

    let signature = string_field(object, "signature")?;
    if signature != config.tag {
        return Err(SelfqError::signature_mismatch(&config.tag, signature));
    }
    let version = string_field(object, "version")?;
    if version != config.version {
        return Err(SelfqError::UnsupportedVersion {
            expected: config.version.clone(),
            found: version.to_string(),
        });
    }

    let artifact = ProtectedArtifact::from_json_value(value)?;
    check_artifact(&artifact, config)?;
    Ok(artifact)
}

/// Structural checks on an already-decoded artifact.
pub fn check_artifact(artifact: &ProtectedArtifact, config: &EnvelopeConfig) -> Result<()> {
    if artifact.signature != config.tag {
        return Err(SelfqError::signature_mismatch(&config.tag, &artifact.signature));
    }
    if artifact.version != config.version {
        return Err(SelfqError::UnsupportedVersion {
            expected: config.version.clone(),
            found: artifact.version.clone(),
        });
    }
    if artifact.layers != config.layers {
        return Err(SelfqError::LayerCountMismatch {
            expected: config.layers,
            found: artifact.layers,
        });
    }
    if artifact.layer_info.len() != artifact.layers {
        return Err(SelfqError::LayerCountMismatch {
            expected: artifact.layers,
            found: artifact.layer_info.len(),
        });
    }

    for (round, layer) in artifact.layer_info.iter().enumerate() {
        decode_hex_array::<SALT_LENGTH>(&layer.salt, &format!("layerInfo[{}].salt", round))?;
        decode_hex_array::<NONCE_LENGTH>(&layer.nonce, &format!("layerInfo[{}].nonce", round))?;
        if layer.password_hint.is_empty() {
            return Err(SelfqError::MalformedInput(format!(
                "layerInfo[{}].passwordHint is empty",
                round
            )));
        }
    }

    ciphertext_len(&artifact.encrypted_data)?;
    Ok(())
}

/// Summarize an artifact after the structural gate, without decrypting.
pub fn inspect(text: &str, config: &EnvelopeConfig) -> Result<ArtifactSummary> {
    let artifact = parse_artifact(text, config)?;
    Ok(ArtifactSummary {
        ciphertext_bytes: ciphertext_len(&artifact.encrypted_data)?,
        password_hints: artifact
            .layer_info
            .iter()
            .map(|layer| layer.password_hint.clone())
            .collect(),
        signature: artifact.signature,
        version: artifact.version,
        layers: artifact.layers,
        created_at: artifact.created_at,
    })
}

/// Cheap pre-check before a full recovery. Never fails; false on any problem.
pub fn is_well_formed(text: &str, config: &EnvelopeConfig) -> bool {
    parse_artifact(text, config).is_ok()
}

fn string_field<'a>(object: &'a serde_json::Map<String, Value>, name: &str) -> Result<&'a str> {
    object
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| SelfqError::MalformedInput(format!("Artifact has no \"{}\" string", name)))
}

fn ciphertext_len(encrypted_data: &str) -> Result<usize> {
    if encrypted_data.is_empty() {
        return Err(SelfqError::MalformedInput(
            "encryptedData is empty".to_string(),
        ));
    }
    if !is_lower_hex(encrypted_data) {
        return Err(SelfqError::MalformedInput(
            "encryptedData is not lowercase hex".to_string(),
        ));
    }
    let bytes = encrypted_data.len() / 2;
    if bytes < TAG_LENGTH {
        return Err(SelfqError::MalformedInput(
            "encryptedData is shorter than an authentication tag".to_string(),
        ));
    }
    Ok(bytes)
}
