//! Terminal output for a release run: status lines, warnings and the
//! release page address. Nothing here reads input.

use console::style;

use crate::boundary::BoundaryWarning;

/// Print an error to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a finished step.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a step that is in progress.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a recoverable problem; the run continues.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Show the version found in the manifest.
pub fn display_current_version(version: &str) {
    println!("当前版本: {}", style(version).cyan());
}

/// Show the version transition about to be released.
pub fn display_version_change(from: &str, to: &str) {
    println!("发布版本: {} -> {}", from, style(to).cyan());
}

/// Print the release page address so it can be opened by hand.
pub fn display_release_url(url: &str) {
    println!("\n{}\n  {}", style("Release page:").bold(), style(url).cyan());
}
