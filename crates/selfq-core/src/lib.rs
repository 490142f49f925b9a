//! # selfQ Core
//!
//! Encryption engine for selfQ, a client-only personal journal.
//!
//! A diary entry or story is exported into a self-contained file that can be
//! re-imported on the same or another installation, with its authenticity and
//! integrity verified, without any server or key-management service.
//!
//! ## Architecture
//!
//! - **crypto**: PBKDF2 key derivation and the single-layer AES-256-GCM cipher
//! - **export**: envelope configuration, artifact format, round-password
//!   schedule, protect/recover pipeline and the structural gate
//! - **fs**: atomic artifact writes
//! - **error**: typed failure kinds

pub mod crypto;
pub mod error;
pub mod export;
pub mod fs;

pub use error::{ErrorKind, Result, SelfqError};
pub use export::{
    inspect, is_well_formed, protect, recover, EnvelopeConfig, ProtectedArtifact, ProtectedRecord,
};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
