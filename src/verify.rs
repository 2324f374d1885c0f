//! SHA-256 integrity checking for downloaded files.
//!
//! A downloaded file is trustworthy only after the transfer reported
//! success *and* its digest matches the pinned reference value. The
//! fetcher never sees the reference digest; callers verify separately.

use crate::error::SetupError;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Block size for incremental hashing.
const BLOCK_SIZE: usize = 4096;

/// Compute the lowercase hex SHA-256 digest of a file.
pub fn sha256_file(path: &Path) -> Result<String, SetupError> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut block = [0u8; BLOCK_SIZE];

    loop {
        let n = file.read(&mut block)?;
        if n == 0 {
            break;
        }
        hasher.update(&block[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Check a file's SHA-256 digest against a reference hex string.
///
/// A missing file compares false rather than erroring; other read failures
/// surface as [`SetupError::Filesystem`]. Uppercase reference digests are
/// accepted.
pub fn verify_sha256(path: &Path, reference: &str) -> Result<bool, SetupError> {
    if !path.is_file() {
        return Ok(false);
    }
    Ok(sha256_file(path)? == reference.to_lowercase())
}

/// Like [`verify_sha256`], but a mismatch (or missing file) is an
/// [`SetupError::IntegrityMismatch`] carrying both digests.
pub fn ensure_sha256(path: &Path, reference: &str) -> Result<(), SetupError> {
    let actual = if path.is_file() {
        sha256_file(path)?
    } else {
        String::new()
    };

    let expected = reference.to_lowercase();
    if actual != expected {
        return Err(SetupError::IntegrityMismatch {
            path: path.display().to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}
