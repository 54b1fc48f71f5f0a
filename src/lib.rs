//! Cryptic - password-based authenticated encryption
//!
//! Seals arbitrary bytes under a password into a self-contained buffer
//! (`salt ‖ nonce ‖ ciphertext‖tag`) and opens it again, using
//! PBKDF2-HMAC-SHA256 for key derivation and AES-256-GCM for encryption.
//! Also provides an entropy-based password strength estimate and a
//! base64 armor for text transport.
//!
//! The core modules ([`kdf`], [`sealedbox`], [`strength`], [`armor`]) do
//! no I/O and hold no state; every call is independent and safe to run
//! concurrently. [`passphrase`] and [`file_ops`] back the command-line
//! front end.

#![forbid(unsafe_code)]

pub mod armor;
pub mod error;
pub mod file_ops;
pub mod kdf;
pub mod passphrase;
pub mod sealedbox;
pub mod strength;

pub use error::{CrypticError, ErrorCategory, ErrorKind, Result};
pub use kdf::{DerivedKey, KdfParams, derive};
pub use sealedbox::{open, open_with, seal, seal_with};
pub use strength::{StrengthAssessment, StrengthBucket, assess};
