use std::error::Error as StdError;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCategory {
    /// Any failure that cannot be confidently attributed to the caller.
    ///
    /// Internal is never a guarantee the error was not caused by the
    /// user, merely that the code cannot tell.
    Internal,

    /// The caller provided invalid input or asked for something that
    /// cannot be done.
    User,
}

/// Condition tags for consumers that need to branch on the failure.
///
/// The core operations (derivation, seal, open, armor) only ever produce
/// `InvalidInput`, `AuthenticationFailure` and `PlatformFailure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed sealed buffer, empty password, bad salt length, bad
    /// iteration count or undecodable armor.
    InvalidInput,
    /// The AEAD tag did not verify. Covers a wrong password as well as
    /// corrupted or tampered data; the two are deliberately
    /// indistinguishable.
    AuthenticationFailure,
    /// The secure random source or a cryptographic primitive failed.
    PlatformFailure,
    /// A password could not be obtained from the configured reader.
    PassphraseUnavailable,
    /// Interaction with the filesystem, stdin/stdout, or other I/O failed.
    Io,
}

#[derive(Debug, Error)]
#[error("{msg}")]
pub struct CrypticError {
    /// Broad error category, always provided.
    pub category: ErrorCategory,
    /// Specific condition tag, always provided.
    pub kind: ErrorKind,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    msg: String,
}

impl CrypticError {
    /// Creates a new error with a category, kind and display message.
    pub fn new(category: ErrorCategory, kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            category,
            kind,
            source: None,
            msg: msg.into(),
        }
    }

    /// Creates a new error that retains the originating source error.
    pub fn with_source(
        category: ErrorCategory,
        kind: ErrorKind,
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            category,
            kind,
            source: Some(Box::new(source)),
            msg: msg.into(),
        }
    }

    /// Shorthand for a caller error of kind `InvalidInput`.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCategory::User, ErrorKind::InvalidInput, msg)
    }

    /// The user-facing message carried by the error.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the preserved source error if present.
    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Wraps the current error with a higher-level message while preserving the original as source.
    pub fn with_context(self, msg: impl Into<String>) -> Self {
        let category = self.category;
        let kind = self.kind;
        Self {
            category,
            kind,
            source: Some(Box::new(self)),
            msg: msg.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CrypticError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_preserves_kind_and_source() {
        let inner = CrypticError::invalid_input("sealed buffer too short");
        let outer = inner.with_context("failed to open");

        assert_eq!(outer.kind, ErrorKind::InvalidInput);
        assert_eq!(outer.category, ErrorCategory::User);
        assert_eq!(outer.to_string(), "failed to open");
        assert_eq!(
            outer.source_error().unwrap().to_string(),
            "sealed buffer too short"
        );
    }

    #[test]
    fn test_with_source_chains_std_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = CrypticError::with_source(
            ErrorCategory::User,
            ErrorKind::Io,
            "failed to read from x",
            io,
        );

        assert_eq!(err.message(), "failed to read from x");
        assert_eq!(StdError::source(&err).unwrap().to_string(), "gone");
    }
}
