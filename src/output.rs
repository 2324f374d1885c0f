//! Colored output for setup steps.
//!
//! Uses owo-colors for terminal colors; the download progress line itself
//! is drawn by indicatif (see [`crate::fetch`]).

use owo_colors::OwoColorize;

/// Print an action header (blue, bold)
/// Example: "==> Checking Vulkan SDK"
pub fn action(message: &str) {
    println!("{} {}", "==>".blue().bold(), message.bold());
}

/// Print a detail line (dimmed prefix)
/// Example: "     deleted folder bin-int"
pub fn detail(message: &str) {
    println!("     {}", message.dimmed());
}

/// Print a success message (green)
pub fn success(message: &str) {
    println!("{} {}", "==>".green().bold(), message.green());
}

/// Print an info message (cyan)
pub fn info(message: &str) {
    println!("{} {}", "::".cyan(), message);
}

/// Print a warning message (yellow)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// Print an error message (red)
pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}

/// Print a skip message (dimmed)
/// Example: "==> nothing to clean"
pub fn skip(message: &str) {
    println!("{} {}", "==>".dimmed(), message.dimmed());
}
