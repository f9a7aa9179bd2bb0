//! API key hashing and matching.
//!
//! The configured key is hashed once at startup and only the SHA-256 digest
//! is kept in memory. Incoming keys are hashed the same way and compared in
//! constant time.

use sha2::{Digest, Sha256};

/// Header name the browser client uses to pass the key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Compute the SHA-256 digest of an API key.
pub fn hash_api_key(key: &str) -> [u8; 32] {
    Sha256::digest(key.as_bytes()).into()
}

/// Check a presented key against the stored digest.
pub fn api_key_matches(expected_hash: &[u8; 32], presented: &str) -> bool {
    let presented_hash = hash_api_key(presented);
    expected_hash
        .iter()
        .zip(presented_hash.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_input_produces_same_hash() {
        assert_eq!(hash_api_key("entre-linhas-2024"), hash_api_key("entre-linhas-2024"));
    }

    #[test]
    fn matching_key_is_accepted() {
        let stored = hash_api_key("entre-linhas-2024");
        assert!(api_key_matches(&stored, "entre-linhas-2024"));
    }

    #[test]
    fn wrong_key_is_rejected() {
        let stored = hash_api_key("entre-linhas-2024");
        assert!(!api_key_matches(&stored, "entre-linhas-2025"));
        assert!(!api_key_matches(&stored, ""));
    }

    #[test]
    fn bearer_prefix_is_stripped() {
        assert_eq!(bearer_token("Bearer abc123"), Some("abc123"));
    }

    #[test]
    fn non_bearer_header_is_ignored() {
        assert_eq!(bearer_token("Basic abc123"), None);
        assert_eq!(bearer_token("Bearer "), None);
    }
}
