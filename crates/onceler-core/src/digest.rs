//! Content fingerprint for migration scripts
//!
//! SHA-256 over the exact UTF-8 bytes, lowercase hex. Used only to detect
//! that a script changed; it is not a security boundary.

use sha2::{Digest, Sha256};

/// Hex length of a digest produced by [`digest`]
pub const DIGEST_HEX_LEN: usize = 64;

/// Compute the fingerprint of `text`
pub fn digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        assert_eq!(
            digest("CREATE TABLE test1 (id INT);"),
            "e82b033649c9156192bd92b6fa3b011c8f57a68dca51e0aa28bef349c7614ab7"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_whitespace_is_significant() {
        assert_ne!(digest("SELECT 1;"), digest("SELECT 1; "));
        assert_ne!(digest("SELECT 1;\n"), digest("SELECT 1;\r\n"));
    }
}
