//! Setup configuration.
//!
//! All tunables live in one immutable record passed into the operations
//! that need them. Built-in defaults pin the minimum SDK release; a
//! `vksetup.toml` in the project root (or `--config`) overrides them.

use crate::error::SetupError;
use serde::Deserialize;
use std::path::Path;

/// Pinned minimum Vulkan SDK release.
const SDK_VERSION: &str = "1.4.304.1";

/// Complete setup configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    pub sdk: SdkConfig,
    pub clean: CleanSpec,
    pub premake: PremakeSpec,
}

/// Minimum SDK version and the per-platform installer table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    pub version: String,
    pub installers: Vec<InstallerSpec>,
}

/// One downloadable SDK installer: where to get it, what to call it,
/// and the reference digest it must hash to.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallerSpec {
    pub platform: String,
    pub url: String,
    pub file_name: String,
    pub sha256: String,
}

/// Artifact folders and generated-file extensions removed by `clean`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CleanSpec {
    pub folders: Vec<String>,
    pub extensions: Vec<String>,
}

/// Premake script location and per-platform executables.
///
/// Platforms without a configured executable fall back to `premake5`
/// on PATH.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PremakeSpec {
    pub script: String,
    pub windows_exe: Option<String>,
    pub linux_exe: Option<String>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            sdk: SdkConfig::default(),
            clean: CleanSpec::default(),
            premake: PremakeSpec::default(),
        }
    }
}

impl Default for SdkConfig {
    fn default() -> Self {
        let base = format!("https://sdk.lunarg.com/sdk/download/{SDK_VERSION}/");
        Self {
            version: SDK_VERSION.to_string(),
            installers: vec![
                InstallerSpec {
                    platform: "windows-x86_64".to_string(),
                    url: format!("{base}windows/VulkanSDK-{SDK_VERSION}-Installer.exe"),
                    file_name: format!("VulkanSDK-{SDK_VERSION}-Installer.exe"),
                    sha256: "acb4ae0786fd3e558f8b3c36cc3eba91638984217ba8a6795ec64d2f9ffd8c4b"
                        .to_string(),
                },
                InstallerSpec {
                    platform: "windows-aarch64".to_string(),
                    url: format!("{base}warm/InstallVulkanARM64-{SDK_VERSION}.exe"),
                    file_name: format!("InstallVulkanARM64-{SDK_VERSION}.exe"),
                    sha256: "457f6f42d1be886fd2131fa6b212167730399e316e7ee33a9a8e9543f7f3ccc2"
                        .to_string(),
                },
                InstallerSpec {
                    platform: "linux".to_string(),
                    url: format!("{base}linux/vulkansdk-linux-x86_64-{SDK_VERSION}.tar.xz"),
                    file_name: format!("vulkansdk-linux-x86_64-{SDK_VERSION}.tar.xz"),
                    sha256: "79b0a1593dadc46180526250836f3e53688a9a5fb42a0e5859eb72316dc4d53e"
                        .to_string(),
                },
                InstallerSpec {
                    platform: "macos".to_string(),
                    url: format!("{base}mac/vulkansdk-macos-{SDK_VERSION}.zip"),
                    file_name: format!("vulkansdk-macos-{SDK_VERSION}.zip"),
                    sha256: "393fd11f65a4001f12fd34fdd009c38045220ca3f735bc686d97822152b0f33c"
                        .to_string(),
                },
            ],
        }
    }
}

impl Default for CleanSpec {
    fn default() -> Self {
        Self {
            folders: vec![
                "bin".to_string(),
                "bin-int".to_string(),
                "Solution".to_string(),
            ],
            extensions: vec![
                ".sln".to_string(),
                ".vcxproj".to_string(),
                ".filters".to_string(),
                ".user".to_string(),
            ],
        }
    }
}

impl Default for PremakeSpec {
    fn default() -> Self {
        Self {
            script: "Build/Build.lua".to_string(),
            windows_exe: Some("Build/Premake/Windows/premake5.exe".to_string()),
            linux_exe: Some("Build/Premake/Linux/premake5".to_string()),
        }
    }
}

impl SetupConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, SetupError> {
        toml::from_str(text).map_err(|e| SetupError::Config(e.to_string()))
    }

    /// Load a configuration file, falling back to defaults when the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, SetupError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}
