//! Password digests.
//!
//! Digests are unsalted, single-round SHA-256 rendered as lowercase hex.
//! Identical passwords produce identical digests and the hash is cheap to
//! brute-force; records created by older deployments depend on this exact
//! format, so it is kept as-is until a migration to a salted KDF lands.
use sha2::{Digest, Sha256};

/// Length of a hex-encoded digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Compute SHA256 hash of input bytes
pub fn sha256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hasher.finalize().into()
}

/// Digest a plaintext password into its storable form.
pub fn digest_password(plaintext: &str) -> String {
    hex::encode(sha256(plaintext.as_bytes()))
}

/// Check a plaintext password against a stored digest.
///
/// The comparison touches every byte regardless of where the first
/// mismatch occurs.
pub fn verify_password(plaintext: &str, stored_digest: &str) -> bool {
    let candidate = digest_password(plaintext);
    let (a, b) = (candidate.as_bytes(), stored_digest.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
