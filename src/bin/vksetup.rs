//! vksetup CLI - developer setup for Vulkan-based native projects
//!
//! Usage:
//!   vksetup setup [-- <premake args>...]   Full setup: SDK check, clean, generate
//!   vksetup sdk                            Check/install the Vulkan SDK only
//!   vksetup fetch <url> <dest>             Verified download
//!   vksetup verify <file> <sha256>         Digest check
//!   vksetup clean                          Remove stale build artifacts
//!   vksetup generate [-- <premake args>...] Run premake only

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use vksetup::config::SetupConfig;
use vksetup::sdk::{self, HostPlatform, SdkStatus};
use vksetup::{clean, fetch, output, premake, verify};

#[derive(Parser)]
#[command(name = "vksetup")]
#[command(about = "Developer setup for Vulkan-based native projects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root directory
    #[arg(short = 'C', long, global = true, default_value = ".")]
    root: PathBuf,

    /// Configuration file (default: <root>/vksetup.toml, built-in defaults
    /// when absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full setup: SDK check, artifact cleanup, project generation
    Setup {
        /// Install the SDK without asking
        #[arg(short = 'y', long)]
        yes: bool,

        /// Extra arguments passed through to premake
        #[arg(last = true)]
        premake_args: Vec<String>,
    },

    /// Check the local Vulkan SDK, downloading the installer if needed
    Sdk {
        /// Install the SDK without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Download a file, optionally verifying its SHA-256 digest
    Fetch {
        url: String,
        dest: PathBuf,

        /// Reference digest (64 hex characters)
        #[arg(long)]
        sha256: Option<String>,
    },

    /// Check a file's SHA-256 digest against a reference value
    Verify {
        file: PathBuf,
        sha256: String,
    },

    /// Remove stale build artifacts from the project root
    Clean,

    /// Regenerate project files with premake
    Generate {
        /// Extra arguments passed through to premake
        #[arg(last = true)]
        premake_args: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join("vksetup.toml"));
    let config = SetupConfig::load_or_default(&config_path)?;

    match cli.command {
        Commands::Setup { yes, premake_args } => setup(&cli.root, &config, yes, &premake_args),
        Commands::Sdk { yes } => {
            check_sdk(&cli.root, &config, yes)?;
            Ok(())
        }
        Commands::Fetch { url, dest, sha256 } => fetch_file(&url, &dest, sha256.as_deref()),
        Commands::Verify { file, sha256 } => verify_file(&file, &sha256),
        Commands::Clean => clean_artifacts(&cli.root, &config),
        Commands::Generate { premake_args } => {
            let platform = HostPlatform::detect()?;
            // Prefer the locally installed SDK version when one satisfies
            // the requirement, like the full setup flow does.
            let vulkan_sdk = std::env::var("VULKAN_SDK").ok();
            let version = match sdk::check(&config.sdk, vulkan_sdk.as_deref()) {
                SdkStatus::Satisfied { version } => version,
                SdkStatus::Missing => config.sdk.version.clone(),
            };
            generate(&cli.root, &config, platform, &version, &premake_args)
        }
    }
}

/// Full setup flow. When the SDK is missing the installer is fetched and
/// the operator is told to run it and rerun setup; cleanup and generation
/// happen only once the SDK requirement is satisfied.
fn setup(root: &Path, config: &SetupConfig, yes: bool, premake_args: &[String]) -> Result<()> {
    output::action("Project setup");

    let Some(sdk_version) = check_sdk(root, config, yes)? else {
        return Ok(());
    };

    clean_artifacts(root, config)?;

    let platform = HostPlatform::detect()?;
    generate(root, config, platform, &sdk_version, premake_args)
}

/// Check the SDK requirement. Returns the usable local SDK version, or
/// `None` when setup cannot continue (installer downloaded or declined).
fn check_sdk(root: &Path, config: &SetupConfig, yes: bool) -> Result<Option<String>> {
    if cfg!(target_pointer_width = "32") {
        anyhow::bail!("this project is made and tested for 64-bit platforms");
    }

    output::action("Checking Vulkan SDK");
    let vulkan_sdk = std::env::var("VULKAN_SDK").ok();

    match sdk::check(&config.sdk, vulkan_sdk.as_deref()) {
        SdkStatus::Satisfied { version } => {
            output::success(&format!(
                "Vulkan SDK {version} meets the minimum requirement ({})",
                config.sdk.version
            ));
            Ok(Some(version))
        }
        SdkStatus::Missing => {
            output::warning("Vulkan SDK is not installed or the version is not supported");

            if !yes && !confirm(&format!("Install Vulkan SDK {}?", config.sdk.version)) {
                output::skip("SDK installation declined");
                return Ok(None);
            }

            let platform = HostPlatform::detect()?;
            let installer = sdk::installer_for(&config.sdk, platform)?;

            output::detail(&format!("downloading {}", installer.url));
            let path = sdk::install(installer, root)?;
            output::success(&format!("downloaded and verified {}", path.display()));

            if platform.uses_windows_installer() {
                output::info(&format!(
                    "run {} (with debug libraries selected) and rerun setup",
                    path.display()
                ));
            } else {
                output::info(&format!(
                    "extract {} so the SDK lives under path/to/SDK/<version>/ and rerun setup",
                    path.display()
                ));
            }
            Ok(None)
        }
    }
}

fn fetch_file(url: &str, dest: &Path, sha256: Option<&str>) -> Result<()> {
    output::action(&format!("Downloading {url}"));
    let written = fetch::fetch(url, dest)?;
    output::detail(&format!("wrote {written} bytes to {}", dest.display()));

    if let Some(reference) = sha256 {
        if let Err(e) = verify::ensure_sha256(dest, reference) {
            let _ = std::fs::remove_file(dest);
            return Err(e.into());
        }
        output::success("digest verified");
    }
    Ok(())
}

fn verify_file(file: &Path, sha256: &str) -> Result<()> {
    if verify::verify_sha256(file, sha256)? {
        output::success(&format!("{} matches", file.display()));
        Ok(())
    } else {
        anyhow::bail!("{} does not match the reference digest", file.display());
    }
}

fn clean_artifacts(root: &Path, config: &SetupConfig) -> Result<()> {
    output::action("Clearing output folders");

    let removed = clean::clean(root, &config.clean)?;
    if removed.is_empty() {
        output::skip("nothing to clean");
    } else {
        for path in &removed {
            output::detail(&format!("deleted {}", path.display()));
        }
    }
    Ok(())
}

fn generate(
    root: &Path,
    config: &SetupConfig,
    platform: HostPlatform,
    sdk_version: &str,
    premake_args: &[String],
) -> Result<()> {
    output::action("Generating project files");
    premake::generate(root, &config.premake, platform, sdk_version, premake_args)?;
    output::success("project files generated");
    Ok(())
}

/// Interactive confirmation. Lives only in the CLI; the library never
/// blocks on console input.
fn confirm(question: &str) -> bool {
    print!("> {question} [Y/N]: ");
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().chars().next(), Some('y' | 'Y'))
}
