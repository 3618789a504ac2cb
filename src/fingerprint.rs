// fingerprint.rs
use sha2::{Digest, Sha256};

/// SHA-256 digest of a content string, lower-case hex.
///
/// Computed independently over the question text and the newline-joined
/// options list so either kind of edit is detectable on its own.
pub fn fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
