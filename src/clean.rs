//! Stale artifact cleanup before regenerating project files.

use crate::config::CleanSpec;
use crate::error::SetupError;
use std::path::{Path, PathBuf};

/// Remove output folders and generated solution files from the project
/// root (top level only). Returns the removed paths.
pub fn clean(root: &Path, spec: &CleanSpec) -> Result<Vec<PathBuf>, SetupError> {
    let mut removed = Vec::new();

    for entry in std::fs::read_dir(root)?.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        if path.is_dir() {
            if spec.folders.iter().any(|f| *f == name) {
                std::fs::remove_dir_all(&path)?;
                removed.push(path);
            }
        } else if matches_extension(&name, &spec.extensions) {
            std::fs::remove_file(&path)?;
            removed.push(path);
        }
    }

    Ok(removed)
}

fn matches_extension(name: &str, extensions: &[String]) -> bool {
    let lower = name.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&ext.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SetupConfig;

    fn project_root() -> (tempfile::TempDir, CleanSpec) {
        (tempfile::tempdir().unwrap(), SetupConfig::default().clean)
    }

    #[test]
    fn test_clean_removes_artifact_folders_and_files() {
        let (dir, spec) = project_root();
        let root = dir.path();

        std::fs::create_dir(root.join("bin")).unwrap();
        std::fs::create_dir(root.join("bin-int")).unwrap();
        std::fs::create_dir(root.join("Solution")).unwrap();
        std::fs::write(root.join("bin/app.exe"), b"x").unwrap();
        std::fs::write(root.join("Project.sln"), b"x").unwrap();
        std::fs::write(root.join("Core.vcxproj"), b"x").unwrap();

        let removed = clean(root, &spec).unwrap();
        assert_eq!(removed.len(), 5);
        assert!(!root.join("bin").exists());
        assert!(!root.join("bin-int").exists());
        assert!(!root.join("Solution").exists());
        assert!(!root.join("Project.sln").exists());
        assert!(!root.join("Core.vcxproj").exists());
    }

    #[test]
    fn test_clean_keeps_sources() {
        let (dir, spec) = project_root();
        let root = dir.path();

        std::fs::create_dir(root.join("src")).unwrap();
        std::fs::write(root.join("src/main.cpp"), b"x").unwrap();
        std::fs::write(root.join("README.md"), b"x").unwrap();
        std::fs::create_dir(root.join("bin")).unwrap();

        clean(root, &spec).unwrap();
        assert!(root.join("src/main.cpp").exists());
        assert!(root.join("README.md").exists());
        assert!(!root.join("bin").exists());
    }

    #[test]
    fn test_clean_is_top_level_only() {
        let (dir, spec) = project_root();
        let root = dir.path();

        // A nested "bin" under a kept folder stays put.
        std::fs::create_dir_all(root.join("vendor/bin")).unwrap();
        std::fs::write(root.join("vendor/tool.sln"), b"x").unwrap();

        let removed = clean(root, &spec).unwrap();
        assert!(removed.is_empty());
        assert!(root.join("vendor/bin").exists());
        assert!(root.join("vendor/tool.sln").exists());
    }

    #[test]
    fn test_clean_extension_match_is_case_insensitive() {
        let (dir, spec) = project_root();
        let root = dir.path();

        std::fs::write(root.join("Project.SLN"), b"x").unwrap();

        clean(root, &spec).unwrap();
        assert!(!root.join("Project.SLN").exists());
    }

    #[test]
    fn test_clean_does_not_remove_folder_named_like_extension() {
        let (dir, spec) = project_root();
        let root = dir.path();

        // A directory with a matching suffix is not a generated file.
        std::fs::create_dir(root.join("backups.sln")).unwrap();

        let removed = clean(root, &spec).unwrap();
        assert!(removed.is_empty());
        assert!(root.join("backups.sln").exists());
    }

    #[test]
    fn test_clean_empty_root() {
        let (dir, spec) = project_root();
        assert!(clean(dir.path(), &spec).unwrap().is_empty());
    }
}
