//! File sealing/opening operations
//!
//! High-level helpers for the command-line front end. Sealed files hold
//! the base64 armor of a sealed buffer followed by a newline.

use crate::armor;
use crate::error::{CrypticError, ErrorCategory, ErrorKind, Result};
use crate::kdf::KdfParams;
use crate::passphrase::PasswordReader;
use crate::sealedbox;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Seal a file with a password
///
/// Reads plaintext from `input_path`, seals it using a password from
/// `password_reader`, and writes the armored result to `output_path`.
///
/// The output file is created with mode 0o600 (read/write for owner only) on Unix systems.
pub fn seal_file(
    input_path: &Path,
    output_path: &Path,
    params: &KdfParams,
    password_reader: &mut dyn PasswordReader,
) -> Result<()> {
    let plaintext = fs::read(input_path).map_err(|e| read_error(input_path, e))?;
    let password = password_reader.read_password()?;
    let sealed = sealedbox::seal_with(params, &plaintext, &password)
        .map_err(|e| e.with_context("encryption failed"))?;
    let mut armored = armor::encode(&sealed);
    armored.push('\n');
    write_file_atomic(output_path, armored.as_bytes())
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;

    Ok(())
}

/// Open a sealed file with a password
///
/// Reads armored text from `input_path`, opens it using a password from
/// `password_reader`, and writes the plaintext to `output_path`. Nothing
/// is written unless authentication succeeds.
///
/// The output file is created with mode 0o600 (read/write for owner only) on Unix systems.
pub fn open_file(
    input_path: &Path,
    output_path: &Path,
    params: &KdfParams,
    password_reader: &mut dyn PasswordReader,
) -> Result<()> {
    let armored_bytes = fs::read(input_path).map_err(|e| read_error(input_path, e))?;
    let armored = String::from_utf8(armored_bytes).map_err(|e| {
        CrypticError::with_source(
            ErrorCategory::User,
            ErrorKind::InvalidInput,
            "input file is not valid UTF-8",
            e,
        )
    })?;
    let sealed = armor::decode(&armored).map_err(|e| e.with_context("failed to unarmor"))?;
    let password = password_reader.read_password()?;
    let plaintext = sealedbox::open_with(params, &sealed, &password)
        .map_err(|e| e.with_context("failed to decrypt"))?;
    write_file_atomic(output_path, &plaintext)
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;
    Ok(())
}

/// Write a file atomically (tempfile + fsync + rename) with mode 0o600 on Unix
///
/// Either the old file or the complete new file exists afterwards, never
/// a partial one.
fn write_file_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        CrypticError::with_source(
            ErrorCategory::User,
            ErrorKind::Io,
            format!("failed to create tempfile in {}", dir.display()),
            e,
        )
    })?;

    temp_file.write_all(contents).map_err(|e| io_error("failed to write to tempfile", e))?;
    // Flush and fsync() such that the rename later, if it succeeds, will
    // always point to a valid file.
    temp_file.flush().map_err(|e| io_error("failed to flush tempfile", e))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| io_error("failed to sync file prior to rename", e))?;

    // NamedTempFile is already created 0o600 on Unix; make it explicit.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = temp_file
            .as_file()
            .metadata()
            .map_err(|e| io_error("failed to get tempfile metadata", e))?
            .permissions();
        perms.set_mode(0o600);
        temp_file
            .as_file()
            .set_permissions(perms)
            .map_err(|e| io_error("failed to set tempfile permissions", e))?;
    }

    temp_file.persist(path).map_err(|e| {
        CrypticError::with_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            format!("failed to rename to target file {}", path.display()),
            e,
        )
    })?;
    Ok(())
}

fn io_error(msg: &str, err: io::Error) -> CrypticError {
    CrypticError::with_source(ErrorCategory::Internal, ErrorKind::Io, msg, err)
}

fn read_error(path: &Path, err: io::Error) -> CrypticError {
    let category = if err.kind() == io::ErrorKind::NotFound {
        ErrorCategory::User
    } else {
        ErrorCategory::Internal
    };
    CrypticError::with_source(
        category,
        ErrorKind::Io,
        format!("failed to read from {}", path.display()),
        err,
    )
}
