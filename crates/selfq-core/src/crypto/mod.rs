//! Cryptographic primitives for selfQ exports.
//!
//! - **PBKDF2-HMAC-SHA256**: per-layer key derivation (100 000 iterations)
//! - **AES-256-GCM**: authenticated encryption of one layer
//!
//! ## Threat Model
//!
//! We defend against:
//! - Forged or corrupted export files
//! - Silent acceptance of tampered ciphertext
//!
//! We do NOT defend against:
//! - An attacker who can run code in the exporting process
//! - Anyone holding the exported file: every round password is rebuilt
//!   from material stored in the file itself

pub mod cipher;
pub mod key;

pub use cipher::{
    decrypt_layer, decrypt_layer_with_iterations, encrypt_layer, encrypt_layer_with_iterations,
    EncryptedLayer, NONCE_LENGTH, TAG_LENGTH,
};
pub use key::{
    derive_key, derive_key_with_iterations, DerivedKey, KEY_LENGTH, PBKDF2_ITERATIONS, SALT_LENGTH,
};
