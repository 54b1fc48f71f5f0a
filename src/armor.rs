//! Base64 armoring for sealed buffers
//!
//! Sealed buffers are raw bytes. For text transport (clipboard, text
//! files) they are encoded with the standard base64 alphabet, with
//! padding. The armor carries no prefix or version; it is purely an
//! encoding of the positional sealed format.

use crate::error::{CrypticError, ErrorCategory, ErrorKind, Result};
use base64::{Engine, engine::general_purpose::STANDARD};

/// Encode bytes as standard, padded base64.
pub fn encode(body: &[u8]) -> String {
    STANDARD.encode(body)
}

/// Decode standard base64, ignoring surrounding ASCII whitespace.
pub fn decode(armored: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(armored.trim_ascii())
        .map_err(|e| {
            CrypticError::with_source(
                ErrorCategory::User,
                ErrorKind::InvalidInput,
                format!("base64 decoding failed: {}", e),
                e,
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bytes() {
        assert_eq!(encode(b""), "");
        assert_eq!(decode("").unwrap(), b"");
    }

    #[test]
    fn test_simple_string() {
        let armored = encode(b"test");
        assert_eq!(armored, "dGVzdA==");
        assert_eq!(decode(&armored).unwrap(), b"test");
    }

    #[test]
    fn test_all_byte_values() {
        let bytes: Vec<u8> = (0..=255).collect();
        let armored = encode(&bytes);

        assert_eq!(
            armored,
            "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8gISIjJCUmJygpKissLS4vMDEyMzQ1Njc4OTo7PD0+P0BBQkNERUZHSElKS0xNTk9QUVJTVFVWV1hZWltcXV5fYGFiY2RlZmdoaWprbG1ub3BxcnN0dXZ3eHl6e3x9fn+AgYKDhIWGh4iJiouMjY6PkJGSk5SVlpeYmZqbnJ2en6ChoqOkpaanqKmqq6ytrq+wsbKztLW2t7i5uru8vb6/wMHCw8TFxsfIycrLzM3Oz9DR0tPU1dbX2Nna29zd3t/g4eLj5OXm5+jp6uvs7e7v8PHy8/T19vf4+fr7/P3+/w=="
        );
        assert_eq!(decode(&armored).unwrap(), bytes);
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(decode("  dGVzdA==\n").unwrap(), b"test");
        assert_eq!(decode("dGVzdA==\r\n").unwrap(), b"test");
    }

    #[test]
    fn test_no_whitespace_in_output() {
        let armored = encode(&vec![0x42u8; 10_000]);

        assert!(!armored.contains(' '));
        assert!(!armored.contains('\n'));
    }

    #[test]
    fn test_bad_base64() {
        let err = decode("bad$$").expect_err("expected base64 decode error");
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert!(err.source_error().is_some());
    }

    #[test]
    fn test_url_safe_alphabet_rejected() {
        let err = decode("-_8=").expect_err("expected base64 decode error");
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn test_interior_whitespace_rejected() {
        assert!(decode("dGVz dA==").is_err());
    }
}
