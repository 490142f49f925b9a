//! Error types for selfQ core operations.
//!
//! Every failure of a protect/recover call surfaces as a distinct variant so
//! collaborators can switch on [`ErrorKind`] instead of matching message
//! text. The CLI layer maps these to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for selfQ operations.
pub type Result<T> = std::result::Result<T, SelfqError>;

/// Core error type for selfQ operations.
#[derive(Debug, Error)]
pub enum SelfqError {
    /// Artifact text is not parseable as the expected structured format
    #[error("Malformed artifact: {0}")]
    MalformedInput(String),

    /// Outer or inner signature does not equal the expected application tag
    #[error("Signature mismatch: expected \"{expected}\", found \"{found}\"")]
    SignatureMismatch { expected: String, found: String },

    /// Version field is not the recognized value
    #[error("Unsupported version: expected \"{expected}\", found \"{found}\"")]
    UnsupportedVersion { expected: String, found: String },

    /// Declared layer count disagrees with the layer list or configuration
    #[error("Layer count mismatch: expected {expected}, found {found}")]
    LayerCountMismatch { expected: usize, found: usize },

    /// Reconstructed round password does not match the stored hint
    #[error("Layer {round} password mismatch: reconstructed password does not match stored hint")]
    LayerPasswordMismatch { round: usize },

    /// Authenticated decryption tag verification failed
    #[error("Authentication failed for layer {round}: data was tampered with or key material is wrong")]
    Authentication { round: usize },

    /// Decrypted plaintext is not the expected structured payload
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Invalid caller input or engine configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Random source or cipher initialisation failure
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Fieldless discriminant of [`SelfqError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedInput,
    SignatureMismatch,
    UnsupportedVersion,
    LayerCountMismatch,
    LayerPasswordMismatch,
    Authentication,
    InvalidPayload,
    InvalidInput,
    Crypto,
    Io,
}

impl SelfqError {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SelfqError::MalformedInput(_) => ErrorKind::MalformedInput,
            SelfqError::SignatureMismatch { .. } => ErrorKind::SignatureMismatch,
            SelfqError::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
            SelfqError::LayerCountMismatch { .. } => ErrorKind::LayerCountMismatch,
            SelfqError::LayerPasswordMismatch { .. } => ErrorKind::LayerPasswordMismatch,
            SelfqError::Authentication { .. } => ErrorKind::Authentication,
            SelfqError::InvalidPayload(_) => ErrorKind::InvalidPayload,
            SelfqError::InvalidInput(_) => ErrorKind::InvalidInput,
            SelfqError::Crypto(_) => ErrorKind::Crypto,
            SelfqError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Attribute a per-layer failure to `round`.
    pub(crate) fn at_round(self, round: usize) -> Self {
        match self {
            SelfqError::Authentication { .. } => SelfqError::Authentication { round },
            SelfqError::LayerPasswordMismatch { .. } => SelfqError::LayerPasswordMismatch { round },
            other => other,
        }
    }

    pub(crate) fn signature_mismatch(expected: &str, found: &str) -> Self {
        SelfqError::SignatureMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}
