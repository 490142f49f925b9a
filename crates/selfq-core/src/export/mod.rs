//! Portable, signed, multi-layer encrypted exports.
//!
//! ## Pipeline
//!
//! *protect* injects the signature, timestamp and layer count into the
//! record, then runs `layers` rounds of derive-then-encrypt, each round
//! encrypting the previous round's hex ciphertext. *recover* runs the
//! structural gate, then unwinds the rounds in reverse, checking each
//! reconstructed password against its stored hint before decrypting, and
//! finally checks the inner signature.
//!
//! ## File format
//!
//! ```json
//! {
//!   "signature": "selfQ-story-encrypted-v2.0",
//!   "version": "2.0",
//!   "layers": 3,
//!   "layerInfo": [{ "salt": "…", "nonce": "…", "passwordHint": "…" }],
//!   "encryptedData": "…",
//!   "createdAt": "2026-10-14T09:30:00.000Z"
//! }
//! ```

pub mod artifact;
pub mod config;
pub mod password;
pub mod payload;
pub mod pipeline;
pub mod validate;

pub use artifact::{LayerRecord, ProtectedArtifact, ProtectedRecord};
pub use config::{EnvelopeConfig, DEFAULT_LAYERS, DEFAULT_VERSION, POST_TAG, STORY_TAG};
pub use pipeline::{protect, protect_at, recover, recover_artifact};
pub use validate::{check_artifact, inspect, is_well_formed, parse_artifact, ArtifactSummary};
