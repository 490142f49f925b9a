//! Round-password schedule and password fingerprints.
//!
//! A round password has the shape
//! `TAG-round-base64(anchor[..20])-base36(millis)`, where the anchor is the
//! round's hex salt and `millis` is the artifact's `createdAt`. Both are
//! stored in the artifact, so recovery rebuilds every password exactly.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Number of anchor characters folded into a round password.
pub const ANCHOR_CHARS: usize = 20;

/// Length of a stored password fingerprint.
pub const HINT_CHARS: usize = 16;

/// A reconstructible per-round password. Never persisted or logged.
pub struct RoundPassword(SecretString);

impl RoundPassword {
    /// Build the password for `round` from its anchor and the export time.
    pub fn derive(tag: &str, round: usize, anchor: &str, millis: i64) -> Self {
        let anchor_prefix: String = anchor.chars().take(ANCHOR_CHARS).collect();
        let password = format!(
            "{}-{}-{}-{}",
            tag,
            round,
            STANDARD.encode(anchor_prefix.as_bytes()),
            to_base36(millis)
        );
        Self(SecretString::from(password))
    }

    /// Short non-secret value stored as `passwordHint`.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.expose_secret().as_bytes());
        let mut encoded = STANDARD.encode(digest);
        encoded.truncate(HINT_CHARS);
        encoded
    }

    /// Compare against a stored hint in constant time.
    pub fn matches_hint(&self, hint: &str) -> bool {
        self.fingerprint().as_bytes().ct_eq(hint.as_bytes()).into()
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for RoundPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RoundPassword([REDACTED])")
    }
}

/// Lowercase base-36 rendering of a signed integer.
pub fn to_base36(value: i64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut magnitude = value.unsigned_abs();
    if magnitude == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while magnitude > 0 {
        out.push(DIGITS[(magnitude % 36) as usize]);
        magnitude /= 36;
    }
    if value < 0 {
        out.push(b'-');
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
