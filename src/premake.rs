//! Premake invocation for project-file generation.

use crate::config::PremakeSpec;
use crate::error::SetupError;
use crate::sdk::HostPlatform;
use std::path::Path;
use std::process::Command;

/// Computed premake arguments: script file, SDK version, then operator
/// passthrough arguments.
pub fn premake_args(spec: &PremakeSpec, sdk_version: &str, extra: &[String]) -> Vec<String> {
    let mut args = vec![
        format!("--file={}", spec.script),
        format!("--vk_version={sdk_version}"),
    ];
    args.extend(extra.iter().cloned());
    args
}

/// Pick the premake executable for the host. Platforms without a
/// configured path use `premake5` from PATH.
pub fn premake_exe(spec: &PremakeSpec, platform: HostPlatform) -> String {
    let configured = match platform {
        HostPlatform::WindowsX64 | HostPlatform::WindowsArm64 => spec.windows_exe.clone(),
        HostPlatform::Linux => spec.linux_exe.clone(),
        HostPlatform::MacOs => None,
    };
    configured.unwrap_or_else(|| "premake5".to_string())
}

/// Run premake in the project root with computed arguments.
pub fn generate(
    root: &Path,
    spec: &PremakeSpec,
    platform: HostPlatform,
    sdk_version: &str,
    extra: &[String],
) -> Result<(), SetupError> {
    let exe = premake_exe(spec, platform);
    let args = premake_args(spec, sdk_version, extra);

    let status = Command::new(&exe)
        .args(&args)
        .current_dir(root)
        .status()
        .map_err(|e| SetupError::CommandFailed {
            cmd: format!("{exe} (failed to start: {e})"),
            code: None,
        })?;

    if !status.success() {
        return Err(SetupError::CommandFailed {
            cmd: format!("{} {}", exe, args.join(" ")),
            code: status.code(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SetupConfig;

    #[test]
    fn test_premake_args_order() {
        let spec = SetupConfig::default().premake;
        let args = premake_args(&spec, "1.4.304.1", &[]);
        assert_eq!(
            args,
            vec!["--file=Build/Build.lua", "--vk_version=1.4.304.1"]
        );
    }

    #[test]
    fn test_premake_args_passthrough_appended() {
        let spec = SetupConfig::default().premake;
        let extra = vec!["vs2022".to_string(), "--verbose".to_string()];
        let args = premake_args(&spec, "1.4.304.1", &extra);
        assert_eq!(args[2..], ["vs2022", "--verbose"]);
    }

    #[test]
    fn test_premake_exe_per_platform() {
        let spec = SetupConfig::default().premake;
        assert_eq!(
            premake_exe(&spec, HostPlatform::WindowsX64),
            "Build/Premake/Windows/premake5.exe"
        );
        assert_eq!(
            premake_exe(&spec, HostPlatform::Linux),
            "Build/Premake/Linux/premake5"
        );
        // No bundled macOS binary: fall back to PATH.
        assert_eq!(premake_exe(&spec, HostPlatform::MacOs), "premake5");
    }

    #[test]
    fn test_premake_exe_unset_falls_back_to_path() {
        let mut spec = SetupConfig::default().premake;
        spec.linux_exe = None;
        assert_eq!(premake_exe(&spec, HostPlatform::Linux), "premake5");
    }

    #[test]
    fn test_generate_missing_executable_errors() {
        let dir = tempfile::tempdir().unwrap();
        let spec = PremakeSpec {
            script: "build.lua".to_string(),
            windows_exe: None,
            linux_exe: Some("./definitely-not-premake5".to_string()),
        };

        let result = generate(dir.path(), &spec, HostPlatform::Linux, "1.4.304.1", &[]);
        assert!(matches!(
            result,
            Err(SetupError::CommandFailed { code: None, .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_generate_nonzero_exit_maps_to_command_failed() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("fake-premake");
        std::fs::write(&exe, "#!/bin/sh\nexit 3\n").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let spec = PremakeSpec {
            script: "build.lua".to_string(),
            windows_exe: None,
            linux_exe: Some(exe.display().to_string()),
        };

        let result = generate(dir.path(), &spec, HostPlatform::Linux, "1.4.304.1", &[]);
        assert!(matches!(
            result,
            Err(SetupError::CommandFailed { code: Some(3), .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_generate_success() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("fake-premake");
        std::fs::write(&exe, "#!/bin/sh\nexit 0\n").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let spec = PremakeSpec {
            script: "build.lua".to_string(),
            windows_exe: None,
            linux_exe: Some(exe.display().to_string()),
        };

        generate(dir.path(), &spec, HostPlatform::Linux, "1.4.304.1", &[]).unwrap();
    }
}
