//! Setup error types.

use thiserror::Error;

/// Errors that can occur during project setup.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned HTTP {status} for {url}")]
    Protocol { url: String, status: u16 },

    #[error("sha256 integrity check failed for '{path}'\n  expected: {expected}\n  got:      {actual}")]
    IntegrityMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("command failed: {cmd} (exit code: {code:?})")]
    CommandFailed { cmd: String, code: Option<i32> },

    #[error("no SDK installer for platform: {0}")]
    UnsupportedPlatform(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
