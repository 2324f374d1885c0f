//! Developer setup tooling for Vulkan-based native projects.
//!
//! The `vksetup` binary verifies that a suitable Vulkan SDK is installed,
//! downloads and digest-checks the platform installer when it is not,
//! clears stale generated build artifacts, and invokes Premake to
//! regenerate project files.
//!
//! The library side is organized around one non-trivial component, the
//! verified fetcher, plus the glue around it:
//!
//! - [`fetch`] - streaming download with in-place progress and atomic
//!   cleanup of partial files
//! - [`verify`] - SHA-256 integrity checking against pinned digests
//! - [`sdk`] - SDK discovery, version comparison, installer acquisition
//! - [`clean`] - stale artifact removal
//! - [`premake`] - build-file generator invocation
//! - [`config`] - immutable setup configuration with TOML overrides
//!
//! All operations are synchronous and single-threaded; a transfer that
//! fails for any reason leaves no partial file behind.

pub mod clean;
pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod premake;
pub mod sdk;
pub mod verify;

pub use config::SetupConfig;
pub use error::SetupError;
