//! Single-layer AES-256-GCM encryption.
//!
//! One layer is: fresh 16-byte salt, fresh 12-byte nonce, PBKDF2 key from the
//! round password, AES-256-GCM over the UTF-8 bytes of the input. The 128-bit
//! tag is appended to the ciphertext. All three outputs travel as lowercase hex.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use super::key::{derive_key_with_iterations, PBKDF2_ITERATIONS, SALT_LENGTH};
use crate::error::{Result, SelfqError};

/// Nonce length in bytes (96 bits).
pub const NONCE_LENGTH: usize = 12;

/// Authentication tag length in bytes (128 bits).
pub const TAG_LENGTH: usize = 16;

/// Hex-encoded output of one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedLayer {
    pub ciphertext: String,
    pub salt: String,
    pub nonce: String,
}

/// Encrypt one layer with the production iteration count.
///
/// # Examples
///
/// ```
/// use selfq_core::crypto::{decrypt_layer, encrypt_layer};
///
/// let layer = encrypt_layer("dear diary", "round-password").unwrap();
/// let plain = decrypt_layer(&layer.ciphertext, &layer.salt, &layer.nonce, "round-password").unwrap();
/// assert_eq!(plain, "dear diary");
/// ```
pub fn encrypt_layer(data: &str, password: &str) -> Result<EncryptedLayer> {
    encrypt_layer_with_iterations(data, password, PBKDF2_ITERATIONS)
}

/// Decrypt one layer with the production iteration count.
///
/// # Errors
///
/// Returns `SelfqError::Authentication` if the tag does not verify, and
/// `SelfqError::MalformedInput` if any input is not valid hex of the right size.
pub fn decrypt_layer(ciphertext: &str, salt: &str, nonce: &str, password: &str) -> Result<String> {
    decrypt_layer_with_iterations(ciphertext, salt, nonce, password, PBKDF2_ITERATIONS)
}

/// Encrypt one layer with an explicit iteration count.
pub fn encrypt_layer_with_iterations(
    data: &str,
    password: &str,
    iterations: u32,
) -> Result<EncryptedLayer> {
    let salt: [u8; SALT_LENGTH] = random_bytes()?;
    seal_layer(data, password, &salt, iterations)
}

/// Encrypt one layer under a caller-chosen salt and a fresh nonce.
///
/// The pipeline picks the salt first because it anchors the round password.
pub(crate) fn seal_layer(
    data: &str,
    password: &str,
    salt: &[u8; SALT_LENGTH],
    iterations: u32,
) -> Result<EncryptedLayer> {
    let nonce: [u8; NONCE_LENGTH] = random_bytes()?;

    let key = derive_key_with_iterations(password, salt, iterations)?;
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| SelfqError::Crypto(format!("Failed to create cipher: {}", e)))?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), data.as_bytes())
        .map_err(|e| SelfqError::Crypto(format!("Encryption failed: {}", e)))?;

    Ok(EncryptedLayer {
        ciphertext: hex::encode(ciphertext),
        salt: hex::encode(salt),
        nonce: hex::encode(nonce),
    })
}

/// Decrypt one layer with an explicit iteration count.
pub fn decrypt_layer_with_iterations(
    ciphertext: &str,
    salt: &str,
    nonce: &str,
    password: &str,
    iterations: u32,
) -> Result<String> {
    let salt: [u8; SALT_LENGTH] = decode_hex_array(salt, "salt")?;
    let nonce: [u8; NONCE_LENGTH] = decode_hex_array(nonce, "nonce")?;
    let ciphertext = decode_hex(ciphertext, "ciphertext")?;
    if ciphertext.len() < TAG_LENGTH {
        return Err(SelfqError::MalformedInput(format!(
            "ciphertext is shorter than the {}-byte authentication tag",
            TAG_LENGTH
        )));
    }

    let key = derive_key_with_iterations(password, &salt, iterations)?;
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| SelfqError::Crypto(format!("Failed to create cipher: {}", e)))?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(&nonce), ciphertext.as_ref())
        .map_err(|_| SelfqError::Authentication { round: 0 })?;

    String::from_utf8(plaintext)
        .map_err(|_| SelfqError::InvalidPayload("decrypted layer is not valid UTF-8".to_string()))
}

/// Fill a fixed-size buffer from the operating system CSPRNG.
pub(crate) fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| SelfqError::Crypto(format!("Random source unavailable: {}", e)))?;
    Ok(bytes)
}

/// True when `value` is even-length hex using only `0-9a-f`.
///
/// `hex::decode` is case-insensitive; the artifact format is not.
pub(crate) fn is_lower_hex(value: &str) -> bool {
    value.len() % 2 == 0 && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Decode a lowercase hex field.
pub(crate) fn decode_hex(value: &str, field: &str) -> Result<Vec<u8>> {
    if !is_lower_hex(value) {
        return Err(SelfqError::MalformedInput(format!(
            "{} is not lowercase hex",
            field
        )));
    }
    hex::decode(value)
        .map_err(|e| SelfqError::MalformedInput(format!("{} is not valid hex: {}", field, e)))
}

/// Decode a lowercase hex field that must be exactly `N` bytes long.
pub(crate) fn decode_hex_array<const N: usize>(value: &str, field: &str) -> Result<[u8; N]> {
    let bytes = decode_hex(value, field)?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        SelfqError::MalformedInput(format!(
            "{} must be {} bytes (got {})",
            field,
            N,
            bytes.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: u32 = 1_000;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let password = "test-password-secure-123";
        let plaintext = "Hello, World! This is secret data.";

        let layer = encrypt_layer_with_iterations(plaintext, password, FAST).unwrap();
        let decrypted =
            decrypt_layer_with_iterations(&layer.ciphertext, &layer.salt, &layer.nonce, password, FAST)
                .unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_output_sizes() {
        let plaintext = "twelve bytes";
        let layer = encrypt_layer_with_iterations(plaintext, "pw", FAST).unwrap();

        assert_eq!(layer.salt.len(), SALT_LENGTH * 2);
        assert_eq!(layer.nonce.len(), NONCE_LENGTH * 2);
        assert_eq!(layer.ciphertext.len(), (plaintext.len() + TAG_LENGTH) * 2);
    }

    #[test]
    fn test_fresh_salt_and_nonce_per_call() {
        let first = encrypt_layer_with_iterations("same", "pw", FAST).unwrap();
        let second = encrypt_layer_with_iterations("same", "pw", FAST).unwrap();

        assert_ne!(first.salt, second.salt);
        assert_ne!(first.nonce, second.nonce);
        assert_ne!(first.ciphertext, second.ciphertext);
    }

    #[test]
    fn test_wrong_password_fails_authentication() {
        let layer = encrypt_layer_with_iterations("secret", "correct", FAST).unwrap();
        let result =
            decrypt_layer_with_iterations(&layer.ciphertext, &layer.salt, &layer.nonce, "wrong", FAST);

        assert!(matches!(result, Err(SelfqError::Authentication { .. })));
    }

    #[test]
    fn test_tampered_ciphertext_fails_authentication() {
        let layer = encrypt_layer_with_iterations("secret", "pw", FAST).unwrap();
        let mut bytes = hex::decode(&layer.ciphertext).unwrap();
        bytes[0] ^= 0x01;
        let tampered = hex::encode(bytes);

        let result = decrypt_layer_with_iterations(&tampered, &layer.salt, &layer.nonce, "pw", FAST);
        assert!(matches!(result, Err(SelfqError::Authentication { .. })));
    }

    #[test]
    fn test_tampered_nonce_fails_authentication() {
        let layer = encrypt_layer_with_iterations("secret", "pw", FAST).unwrap();
        let mut nonce = hex::decode(&layer.nonce).unwrap();
        nonce[11] ^= 0x80;

        let result = decrypt_layer_with_iterations(
            &layer.ciphertext,
            &layer.salt,
            &hex::encode(nonce),
            "pw",
            FAST,
        );
        assert!(matches!(result, Err(SelfqError::Authentication { .. })));
    }

    #[test]
    fn test_invalid_hex_is_malformed() {
        let layer = encrypt_layer_with_iterations("secret", "pw", FAST).unwrap();
        let result = decrypt_layer_with_iterations("zz", &layer.salt, &layer.nonce, "pw", FAST);
        assert!(matches!(result, Err(SelfqError::MalformedInput(_))));
    }

    #[test]
    fn test_uppercase_hex_is_malformed() {
        let layer = encrypt_layer_with_iterations("secret", "pw", FAST).unwrap();
        let upper = layer.ciphertext.to_ascii_uppercase();
        assert_ne!(upper, layer.ciphertext);

        let result = decrypt_layer_with_iterations(&upper, &layer.salt, &layer.nonce, "pw", FAST);
        assert!(matches!(result, Err(SelfqError::MalformedInput(_))));

        let nonce = format!("{}A", &layer.nonce[..NONCE_LENGTH * 2 - 1]);
        let result = decrypt_layer_with_iterations(&layer.ciphertext, &layer.salt, &nonce, "pw", FAST);
        assert!(matches!(result, Err(SelfqError::MalformedInput(_))));
    }

    #[test]
    fn test_is_lower_hex() {
        assert!(is_lower_hex("00ff9a"));
        assert!(is_lower_hex(""));
        assert!(!is_lower_hex("00FF"));
        assert!(!is_lower_hex("abc"));
        assert!(!is_lower_hex("zz"));
    }

    #[test]
    fn test_wrong_salt_length_is_malformed() {
        let layer = encrypt_layer_with_iterations("secret", "pw", FAST).unwrap();
        let result =
            decrypt_layer_with_iterations(&layer.ciphertext, "abcd", &layer.nonce, "pw", FAST);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("salt must be 16 bytes"));
    }

    #[test]
    fn test_truncated_ciphertext_is_malformed() {
        let layer = encrypt_layer_with_iterations("secret", "pw", FAST).unwrap();
        let result = decrypt_layer_with_iterations("00ff", &layer.salt, &layer.nonce, "pw", FAST);
        assert!(matches!(result, Err(SelfqError::MalformedInput(_))));
    }

    #[test]
    fn test_empty_plaintext_round_trip() {
        let layer = encrypt_layer_with_iterations("", "pw", FAST).unwrap();
        let decrypted =
            decrypt_layer_with_iterations(&layer.ciphertext, &layer.salt, &layer.nonce, "pw", FAST)
                .unwrap();
        assert_eq!(decrypted, "");
    }
}
