//! SHA-1 content hashes
//!
//! Index and manifest entries record the SHA-1 of each file as a 40
//! character hex string. These helpers compute and compare such digests so
//! callers can check a downloaded file before using it.

use sha1::{Digest, Sha1};

/// Length of a hex-encoded SHA-1 digest
pub const SHA1_HEX_LEN: usize = 40;

/// Lowercase hex SHA-1 of `content`
pub fn sha1_hex(content: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Whether `hex` looks like a SHA-1 digest (40 hex digits, any case)
pub fn is_sha1_hex(hex: &str) -> bool {
    hex.len() == SHA1_HEX_LEN && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Compare `content` against an expected hex digest, ignoring case
pub fn verify_sha1(content: &[u8], expected: &str) -> bool {
    is_sha1_hex(expected) && sha1_hex(content).eq_ignore_ascii_case(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            sha1_hex(b"hello world"),
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        );
        assert_eq!(sha1_hex(b""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn test_verify_ignores_case() {
        assert!(verify_sha1(
            b"hello world",
            "2AAE6C35C94FCFB415DBE95F408B9CE91EE846ED"
        ));
        assert!(!verify_sha1(
            b"hello world!",
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        ));
    }

    #[test]
    fn test_rejects_malformed_digest() {
        assert!(!is_sha1_hex("2aae6c35"));
        assert!(!is_sha1_hex("zzae6c35c94fcfb415dbe95f408b9ce91ee846ed"));
        assert!(!verify_sha1(b"hello world", "2aae6c35"));
    }
}
