//! Envelope configuration: which tag, version and layer count an export uses.
//!
//! The story and post export families share one engine and differ only in
//! the configuration handed to it.

use crate::crypto::PBKDF2_ITERATIONS;
use crate::error::{Result, SelfqError};

/// Signature tag for story exports.
pub const STORY_TAG: &str = "selfQ-story-encrypted-v2.0";

/// Signature tag for post exports.
pub const POST_TAG: &str = "selfQ-post-encrypted-v2.0";

/// The one artifact version this engine reads and writes.
pub const DEFAULT_VERSION: &str = "2.0";

/// Number of onion layers.
pub const DEFAULT_LAYERS: usize = 3;

/// Parameters of one export family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeConfig {
    pub tag: String,
    pub version: String,
    pub layers: usize,
    pub kdf_iterations: u32,
}

impl EnvelopeConfig {
    /// Configuration for a caller-supplied tag with default version and layers.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            version: DEFAULT_VERSION.to_string(),
            layers: DEFAULT_LAYERS,
            kdf_iterations: PBKDF2_ITERATIONS,
        }
    }

    /// Story export family.
    pub fn story() -> Self {
        Self::new(STORY_TAG)
    }

    /// Post export family.
    pub fn post() -> Self {
        Self::new(POST_TAG)
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_layers(mut self, layers: usize) -> Self {
        self.layers = layers;
        self
    }

    /// Override the PBKDF2 iteration count.
    ///
    /// The count is not recorded in the artifact; protect and recover must
    /// agree on it.
    pub fn with_kdf_iterations(mut self, iterations: u32) -> Self {
        self.kdf_iterations = iterations;
        self
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.tag.trim().is_empty() {
            return Err(SelfqError::InvalidInput(
                "Signature tag cannot be empty".to_string(),
            ));
        }
        if self.version.trim().is_empty() {
            return Err(SelfqError::InvalidInput(
                "Version cannot be empty".to_string(),
            ));
        }
        if self.layers == 0 {
            return Err(SelfqError::InvalidInput(
                "Layer count must be at least 1".to_string(),
            ));
        }
        if self.kdf_iterations == 0 {
            return Err(SelfqError::InvalidInput(
                "Iteration count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self::story()
    }
}
