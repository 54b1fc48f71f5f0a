//! Password-based key derivation using PBKDF2-HMAC-SHA256
//!
//! Keys are derived from the UTF-8 bytes of the password and a 16-byte
//! salt. The result only lives for the duration of a single seal or open
//! call and is wiped from memory when dropped.

use crate::error::{CrypticError, Result};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Length of salt in bytes
pub const SALT_LEN: usize = 16;

/// Length of derived key in bytes
pub const KEY_LEN: usize = 32;

/// Iteration count used for every sealed buffer unless told otherwise.
///
/// The count is not stored in the sealed buffer, so changing it breaks
/// every previously sealed buffer.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Lowest iteration count accepted by [`KdfParams::hardened`].
pub const MIN_HARDENED_ITERATIONS: u32 = 10_000;

/// A derived 256-bit key, zeroed on drop.
pub type DerivedKey = Zeroizing<[u8; KEY_LEN]>;

/// Derive a 32-byte key from a password and salt.
///
/// Deterministic: the same password, salt and iteration count always
/// produce the same key.
pub fn derive(password: &str, salt: &[u8], iterations: u32) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(CrypticError::invalid_input("password must not be empty"));
    }
    if salt.len() != SALT_LEN {
        return Err(CrypticError::invalid_input(format!(
            "salt must be exactly {} bytes, got {}",
            SALT_LEN,
            salt.len()
        )));
    }
    if iterations == 0 {
        return Err(CrypticError::invalid_input(
            "iteration count must be at least 1",
        ));
    }

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key[..]);

    Ok(key)
}

/// Key derivation parameters.
///
/// Seal and open must use the same parameters; nothing in the sealed
/// buffer records them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    iterations: u32,
}

impl KdfParams {
    /// Parameters with an arbitrary iteration count (at least 1).
    ///
    /// Low counts are useful in tests; production code should use
    /// [`KdfParams::default`] or [`KdfParams::hardened`].
    pub fn new(iterations: u32) -> Result<Self> {
        if iterations == 0 {
            return Err(CrypticError::invalid_input(
                "iteration count must be at least 1",
            ));
        }
        Ok(Self { iterations })
    }

    /// Parameters that refuse iteration counts below [`MIN_HARDENED_ITERATIONS`].
    pub fn hardened(iterations: u32) -> Result<Self> {
        if iterations < MIN_HARDENED_ITERATIONS {
            return Err(CrypticError::invalid_input(format!(
                "iteration count {} is below the minimum of {}",
                iterations, MIN_HARDENED_ITERATIONS
            )));
        }
        Ok(Self { iterations })
    }

    /// PBKDF2 iteration count.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Derive a key from `password` and `salt` using these parameters.
    pub fn derive(&self, password: &str, salt: &[u8]) -> Result<DerivedKey> {
        derive(password, salt, self.iterations)
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}
