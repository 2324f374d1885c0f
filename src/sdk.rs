//! Vulkan SDK requirement checking and installer acquisition.
//!
//! The local SDK is discovered through the `VULKAN_SDK` environment
//! variable, whose last path component is the installed version
//! (`path/to/VulkanSDK/1.4.310.0`). When it meets the configured minimum,
//! setup proceeds; otherwise the platform installer is downloaded and its
//! digest verified before the operator is asked to run it.

use crate::config::{InstallerSpec, SdkConfig};
use crate::error::SetupError;
use crate::{fetch, verify};
use std::path::{Path, PathBuf};

/// Supported host platforms, one per installer in the SDK release table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    WindowsX64,
    WindowsArm64,
    Linux,
    MacOs,
}

impl HostPlatform {
    /// Detect the compile-time target platform.
    pub fn detect() -> Result<Self, SetupError> {
        match (std::env::consts::OS, std::env::consts::ARCH) {
            ("windows", "x86_64") => Ok(Self::WindowsX64),
            ("windows", "aarch64") => Ok(Self::WindowsArm64),
            ("linux", _) => Ok(Self::Linux),
            ("macos", _) => Ok(Self::MacOs),
            (os, arch) => Err(SetupError::UnsupportedPlatform(format!("{os}-{arch}"))),
        }
    }

    /// Key used in the installer table.
    pub fn key(&self) -> &'static str {
        match self {
            Self::WindowsX64 => "windows-x86_64",
            Self::WindowsArm64 => "windows-aarch64",
            Self::Linux => "linux",
            Self::MacOs => "macos",
        }
    }

    /// Whether the installer is a Windows executable the operator launches.
    pub fn uses_windows_installer(&self) -> bool {
        matches!(self, Self::WindowsX64 | Self::WindowsArm64)
    }
}

/// Outcome of the local SDK check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkStatus {
    /// A local SDK at least as new as the minimum was found.
    Satisfied { version: String },
    /// No local SDK, or the local version is below the minimum.
    Missing,
}

/// Extract the SDK version from a `VULKAN_SDK`-style path: its last
/// component (`C:\VulkanSDK\1.4.304.1` or `/opt/vulkan/1.4.304.1`).
pub fn version_from_sdk_path(sdk_path: &str) -> Option<String> {
    let trimmed = sdk_path.trim_end_matches(['/', '\\']);
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Check if `local` is at least `required`.
///
/// Tries semver first; SDK versions have four dotted components, so falls
/// back to numeric component-wise comparison (missing components count as
/// zero), then to string equality.
pub fn version_gte(local: &str, required: &str) -> bool {
    if let (Ok(local_ver), Ok(required_ver)) = (
        semver::Version::parse(local.trim_start_matches('v')),
        semver::Version::parse(required.trim_start_matches('v')),
    ) {
        return local_ver >= required_ver;
    }

    match (numeric_components(local), numeric_components(required)) {
        (Some(a), Some(b)) => {
            let width = a.len().max(b.len());
            for i in 0..width {
                let x = a.get(i).copied().unwrap_or(0);
                let y = b.get(i).copied().unwrap_or(0);
                if x != y {
                    return x > y;
                }
            }
            true
        }
        _ => local == required,
    }
}

fn numeric_components(version: &str) -> Option<Vec<u64>> {
    version
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect()
}

/// Check the local SDK (from `VULKAN_SDK`) against the configured minimum.
pub fn check(config: &SdkConfig, vulkan_sdk: Option<&str>) -> SdkStatus {
    let Some(local) = vulkan_sdk.and_then(version_from_sdk_path) else {
        return SdkStatus::Missing;
    };
    if version_gte(&local, &config.version) {
        SdkStatus::Satisfied { version: local }
    } else {
        SdkStatus::Missing
    }
}

/// Look up the installer for a host platform in the release table.
pub fn installer_for<'a>(
    config: &'a SdkConfig,
    platform: HostPlatform,
) -> Result<&'a InstallerSpec, SetupError> {
    config
        .installers
        .iter()
        .find(|i| i.platform == platform.key())
        .ok_or_else(|| SetupError::UnsupportedPlatform(platform.key().to_string()))
}

/// Download an SDK installer into `dest_dir` and verify its digest.
///
/// On a digest mismatch the downloaded file is removed before the error is
/// returned; only a verified installer is ever left on disk.
pub fn install(installer: &InstallerSpec, dest_dir: &Path) -> Result<PathBuf, SetupError> {
    let dest = dest_dir.join(&installer.file_name);
    fetch::fetch(&installer.url, &dest)?;

    if let Err(e) = verify::ensure_sha256(&dest, &installer.sha256) {
        // A corrupt installer must not be left on disk.
        let _ = std::fs::remove_file(&dest);
        return Err(e);
    }

    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SetupConfig;

    #[test]
    fn test_version_from_unix_path() {
        assert_eq!(
            version_from_sdk_path("/opt/vulkan/1.4.304.1"),
            Some("1.4.304.1".to_string())
        );
    }

    #[test]
    fn test_version_from_windows_path() {
        assert_eq!(
            version_from_sdk_path(r"C:\VulkanSDK\1.4.304.1"),
            Some("1.4.304.1".to_string())
        );
    }

    #[test]
    fn test_version_from_path_trailing_separator() {
        assert_eq!(
            version_from_sdk_path("/opt/vulkan/1.4.304.1/"),
            Some("1.4.304.1".to_string())
        );
    }

    #[test]
    fn test_version_from_empty_path() {
        assert_eq!(version_from_sdk_path(""), None);
        assert_eq!(version_from_sdk_path("/"), None);
    }

    #[test]
    fn test_version_gte_four_components() {
        assert!(version_gte("1.4.304.1", "1.4.304.1"));
        assert!(version_gte("1.4.310.0", "1.4.304.1"));
        assert!(version_gte("1.5.0.0", "1.4.304.1"));
        assert!(!version_gte("1.4.304.0", "1.4.304.1"));
        assert!(!version_gte("1.3.296.0", "1.4.304.1"));
    }

    #[test]
    fn test_version_gte_mixed_lengths() {
        // Missing components count as zero.
        assert!(version_gte("1.4.304.1", "1.4.304"));
        assert!(version_gte("1.4.304", "1.4.304.0"));
        assert!(!version_gte("1.4.304", "1.4.304.1"));
    }

    #[test]
    fn test_version_gte_semver() {
        assert!(version_gte("2.0.0", "1.9.9"));
        assert!(version_gte("v1.2.3", "1.2.3"));
        assert!(!version_gte("1.2.3", "1.2.4"));
    }

    #[test]
    fn test_version_gte_non_numeric_falls_back_to_equality() {
        assert!(version_gte("nightly", "nightly"));
        assert!(!version_gte("nightly", "stable"));
    }

    #[test]
    fn test_check_missing_env() {
        let config = SetupConfig::default().sdk;
        assert_eq!(check(&config, None), SdkStatus::Missing);
    }

    #[test]
    fn test_check_old_local_sdk() {
        let config = SetupConfig::default().sdk;
        assert_eq!(
            check(&config, Some("/opt/vulkan/1.3.290.0")),
            SdkStatus::Missing
        );
    }

    #[test]
    fn test_check_satisfied_reports_local_version() {
        let config = SetupConfig::default().sdk;
        assert_eq!(
            check(&config, Some("/opt/vulkan/1.4.310.0")),
            SdkStatus::Satisfied {
                version: "1.4.310.0".to_string()
            }
        );
    }

    #[test]
    fn test_installer_for_each_platform() {
        let config = SetupConfig::default().sdk;
        for platform in [
            HostPlatform::WindowsX64,
            HostPlatform::WindowsArm64,
            HostPlatform::Linux,
            HostPlatform::MacOs,
        ] {
            let installer = installer_for(&config, platform).unwrap();
            assert_eq!(installer.platform, platform.key());
            assert!(installer.url.starts_with("https://"));
        }
    }

    #[test]
    fn test_installer_for_unknown_platform_errors() {
        let mut config = SetupConfig::default().sdk;
        config.installers.retain(|i| i.platform != "linux");

        let result = installer_for(&config, HostPlatform::Linux);
        assert!(matches!(result, Err(SetupError::UnsupportedPlatform(_))));
    }
}
