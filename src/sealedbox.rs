//! Encryption/decryption using PBKDF2-SHA256 + AES-256-GCM
//!
//! This module implements password-based authenticated encryption using:
//! - PBKDF2-HMAC-SHA256 (100,000 iterations by default) for key derivation
//! - AES-256-GCM with empty associated data for authenticated encryption
//!
//! The binary format is positional, with no header, version or length
//! fields:
//! - salt: 16 bytes
//! - nonce: 12 bytes
//! - ciphertext: variable length, followed by the 16-byte GCM tag

use crate::error::{CrypticError, ErrorCategory, ErrorKind, Result};
use crate::kdf::{KdfParams, SALT_LEN};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::RngCore;
use rand::rngs::OsRng;

/// Length of nonce in bytes
pub const NONCE_LEN: usize = 12;

/// Length of the GCM authentication tag in bytes
pub const TAG_LEN: usize = 16;

/// Length of the salt and nonce preceding the ciphertext
pub const HEADER_LEN: usize = SALT_LEN + NONCE_LEN;

/// Smallest buffer that can possibly open (an empty plaintext)
pub const MIN_SEALED_LEN: usize = HEADER_LEN + TAG_LEN;

const AUTH_FAILURE_MSG: &str = "decryption failed: wrong password or corrupted data";

/// Borrowed view of a sealed buffer split into its positional parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SealedParts<'a> {
    /// Key derivation salt, bytes 0..16.
    pub salt: &'a [u8; SALT_LEN],
    /// AES-GCM nonce, bytes 16..28.
    pub nonce: &'a [u8; NONCE_LEN],
    /// Ciphertext with the tag appended.
    pub ciphertext: &'a [u8],
}

impl<'a> SealedParts<'a> {
    /// Split a sealed buffer, rejecting anything too short to hold a tag.
    pub fn parse(buffer: &'a [u8]) -> Result<Self> {
        if buffer.len() < MIN_SEALED_LEN {
            return Err(CrypticError::invalid_input(format!(
                "sealed buffer is {} bytes, need at least {}; likely truncated",
                buffer.len(),
                MIN_SEALED_LEN
            )));
        }

        let (salt, rest) = buffer.split_at(SALT_LEN);
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);
        let salt = salt
            .try_into()
            .map_err(|_| CrypticError::invalid_input("failed to read salt"))?;
        let nonce = nonce
            .try_into()
            .map_err(|_| CrypticError::invalid_input("failed to read nonce"))?;

        Ok(Self {
            salt,
            nonce,
            ciphertext,
        })
    }
}

/// Seal plaintext with a password using the default iteration count.
///
/// Returns the binary format: salt(16) + nonce(12) + ciphertext||tag
pub fn seal(plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
    seal_with(&KdfParams::default(), plaintext, password)
}

/// Open a sealed buffer with a password using the default iteration count.
pub fn open(buffer: &[u8], password: &str) -> Result<Vec<u8>> {
    open_with(&KdfParams::default(), buffer, password)
}

/// Seal plaintext with a password using random salt and nonce.
pub fn seal_with(params: &KdfParams, plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
    let mut salt = [0u8; SALT_LEN];
    fill_random(&mut salt)?;

    let mut nonce = [0u8; NONCE_LEN];
    fill_random(&mut nonce)?;

    seal_deterministic(params, plaintext, password, &salt, &nonce)
}

/// Seal plaintext with a password using provided salt and nonce.
///
/// This function is ONLY for producing reproducible output in tests.
/// NEVER use this in production - always use `seal()`, which generates
/// a fresh salt and nonce per call.
pub fn seal_deterministic(
    params: &KdfParams,
    plaintext: &[u8],
    password: &str,
    salt: &[u8; SALT_LEN],
    nonce: &[u8; NONCE_LEN],
) -> Result<Vec<u8>> {
    let key = params.derive(password, salt)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key[..]));

    let sealed = cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| {
            CrypticError::new(
                ErrorCategory::Internal,
                ErrorKind::PlatformFailure,
                format!("encryption failed: {}", e),
            )
        })?;

    let mut output = Vec::with_capacity(HEADER_LEN + sealed.len());
    output.extend_from_slice(salt);
    output.extend_from_slice(nonce);
    output.extend_from_slice(&sealed);

    log::debug!(
        "sealed {} plaintext bytes into {} bytes ({} iterations)",
        plaintext.len(),
        output.len(),
        params.iterations()
    );

    Ok(output)
}

/// Open a sealed buffer with a password.
///
/// A wrong password and a tampered buffer fail identically with
/// `ErrorKind::AuthenticationFailure`.
pub fn open_with(params: &KdfParams, buffer: &[u8], password: &str) -> Result<Vec<u8>> {
    let parts = SealedParts::parse(buffer)?;

    let key = params.derive(password, parts.salt)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key[..]));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(parts.nonce), parts.ciphertext)
        .map_err(|_| {
            log::debug!("authentication failed opening {} byte buffer", buffer.len());
            CrypticError::new(
                ErrorCategory::User,
                ErrorKind::AuthenticationFailure,
                AUTH_FAILURE_MSG,
            )
        })?;

    log::debug!(
        "opened {} byte buffer into {} plaintext bytes ({} iterations)",
        buffer.len(),
        plaintext.len(),
        params.iterations()
    );

    Ok(plaintext)
}

fn fill_random(dest: &mut [u8]) -> Result<()> {
    OsRng.try_fill_bytes(dest).map_err(|e| {
        CrypticError::with_source(
            ErrorCategory::Internal,
            ErrorKind::PlatformFailure,
            format!("secure random source failed: {}", e),
            e,
        )
    })
}
