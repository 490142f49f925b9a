//! CLI error types for structured error handling.
//!
//! Every core [`ErrorKind`] maps to its own exit code so scripts can tell a
//! foreign file from a tampered one without parsing messages.

use std::fmt;

use selfq_core::{ErrorKind, SelfqError};

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug, Clone)]
pub enum CliError {
    /// Input file or config file not found
    NotFound { message: String, hint: String },

    /// Invalid user input or configuration
    InvalidInput {
        message: String,
        hint: Option<String>,
    },

    /// A layer could not be opened
    AuthFailed { message: String, hint: String },

    /// The artifact is malformed or its contents are inconsistent
    IntegrityFailed { message: String, hint: String },

    /// The artifact carries another signature tag
    SignatureMismatch { message: String, hint: String },

    /// The artifact declares an unknown version
    UnsupportedVersion { message: String, hint: String },

    /// Anything else (random source, unexpected I/O)
    Failed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error without a hint.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an InvalidInput error with a hint.
    pub fn invalid_input_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// The primary error line.
    pub fn message(&self) -> &str {
        match self {
            CliError::NotFound { message, .. }
            | CliError::InvalidInput { message, .. }
            | CliError::AuthFailed { message, .. }
            | CliError::IntegrityFailed { message, .. }
            | CliError::SignatureMismatch { message, .. }
            | CliError::UnsupportedVersion { message, .. } => message,
            CliError::Failed(message) => message,
        }
    }

    /// Suggested next step, if any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. }
            | CliError::AuthFailed { hint, .. }
            | CliError::IntegrityFailed { hint, .. }
            | CliError::SignatureMismatch { hint, .. }
            | CliError::UnsupportedVersion { hint, .. } => Some(hint),
            CliError::InvalidInput { hint, .. } => hint.as_deref(),
            CliError::Failed(_) => None,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput { .. } => exit_codes::INVALID_INPUT,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::IntegrityFailed { .. } => exit_codes::INTEGRITY_FAILED,
            CliError::SignatureMismatch { .. } => exit_codes::SIGNATURE_MISMATCH,
            CliError::UnsupportedVersion { .. } => exit_codes::UNSUPPORTED_VERSION,
            CliError::Failed(_) => exit_codes::GENERAL,
        }
    }

    /// Classify an error returned by a command handler.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        if let Some(cli) = err.downcast_ref::<CliError>() {
            return cli.clone();
        }
        if let Some(core) = err.downcast_ref::<SelfqError>() {
            return CliError::from(core);
        }
        CliError::Failed(format!("{:#}", err))
    }
}

impl From<&SelfqError> for CliError {
    fn from(err: &SelfqError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::MalformedInput => CliError::IntegrityFailed {
                message,
                hint: "The file is not a complete selfQ export. Re-export it from the source installation."
                    .to_string(),
            },
            ErrorKind::SignatureMismatch => CliError::SignatureMismatch {
                message,
                hint: "Pick the matching export family with --family (story, post) or --tag."
                    .to_string(),
            },
            ErrorKind::UnsupportedVersion => CliError::UnsupportedVersion {
                message,
                hint: "This export was written by a different selfQ release.".to_string(),
            },
            ErrorKind::LayerCountMismatch | ErrorKind::InvalidPayload => {
                CliError::IntegrityFailed {
                    message,
                    hint: "The export was modified after it was written.".to_string(),
                }
            }
            ErrorKind::LayerPasswordMismatch | ErrorKind::Authentication => {
                CliError::AuthFailed {
                    message,
                    hint: "The export was tampered with or written with different key settings."
                        .to_string(),
                }
            }
            ErrorKind::InvalidInput => CliError::InvalidInput {
                message,
                hint: None,
            },
            ErrorKind::Io => match err {
                SelfqError::Io { source } if source.kind() == std::io::ErrorKind::NotFound => {
                    CliError::NotFound {
                        message,
                        hint: "Check the path and try again.".to_string(),
                    }
                }
                _ => CliError::Failed(message),
            },
            ErrorKind::Crypto => CliError::Failed(message),
        }
    }
}

impl From<SelfqError> for CliError {
    fn from(err: SelfqError) -> Self {
        CliError::from(&err)
    }
}
