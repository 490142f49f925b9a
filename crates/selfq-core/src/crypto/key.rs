//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! Every layer of an export derives its own AES-256 key from a round password
//! and a fresh random salt. Nothing about the key is ever stored: the importer
//! re-derives it from the same inputs.

use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::{Result, SelfqError};

/// PBKDF2 iteration count used for every layer.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length in bytes.
pub const SALT_LENGTH: usize = 16;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256-GCM).
pub const KEY_LENGTH: usize = 32;

/// A layer key derived from a round password.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive a layer key with the production iteration count.
///
/// Same password + salt always produces the same key.
///
/// # Examples
///
/// ```
/// use selfq_core::crypto::derive_key;
///
/// let salt = [7u8; 16];
/// let key = derive_key("round-password", &salt).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(password: &str, salt: &[u8; SALT_LENGTH]) -> Result<DerivedKey> {
    derive_key_with_iterations(password, salt, PBKDF2_ITERATIONS)
}

/// Derive a layer key with an explicit iteration count.
pub fn derive_key_with_iterations(
    password: &str,
    salt: &[u8; SALT_LENGTH],
    iterations: u32,
) -> Result<DerivedKey> {
    if iterations == 0 {
        return Err(SelfqError::InvalidInput(
            "Iteration count must be at least 1".to_string(),
        ));
    }

    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key_bytes);

    Ok(DerivedKey::from_bytes(key_bytes))
}
