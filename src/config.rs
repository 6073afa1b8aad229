use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{NpError, Result};

/// Represents the complete configuration for np.
///
/// Every field is optional in the file; a missing file means all defaults,
/// which reproduce the conventional `package.json` + `origin` + GitHub flow.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Manifest path, relative to the working directory
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Remote queried for the repository location and pushed to
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Host serving the repository web pages
    #[serde(default = "default_web_host")]
    pub web_host: String,

    /// Release tag template with `{name}` and `{version}` placeholders
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    /// Bump commit message template with a `{version}` placeholder
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_manifest() -> String {
    "package.json".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_web_host() -> String {
    "github.com".to_string()
}

fn default_tag_pattern() -> String {
    "{name}@{version}".to_string()
}

fn default_commit_message() -> String {
    "chore: bump version to {version}".to_string()
}

fn default_true() -> bool {
    true
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Launch the release page in a browser; when false it is only printed
    #[serde(default = "default_true")]
    pub open_browser: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig { open_browser: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            manifest: default_manifest(),
            remote: default_remote(),
            web_host: default_web_host(),
            tag_pattern: default_tag_pattern(),
            commit_message: default_commit_message(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Config {
    /// Render the bump commit message for `version`.
    pub fn commit_message_for(&self, version: &str) -> String {
        self.commit_message.replace("{version}", version)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `np.toml` in the working directory
/// 3. `.np.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `cwd` - Working directory the tool runs against
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, cwd: &Path) -> Result<Config> {
    let local = cwd.join("np.toml");

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let global = config_dir.join(".np.toml");
        if global.exists() {
            fs::read_to_string(global)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse a TOML configuration document.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| NpError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.manifest, "package.json");
        assert_eq!(config.remote, "origin");
        assert_eq!(config.web_host, "github.com");
        assert_eq!(config.tag_pattern, "{name}@{version}");
        assert!(config.behavior.open_browser);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_document() {
        let config = parse_config(
            r#"
web_host = "git.example.com"

[behavior]
open_browser = false
"#,
        )
        .unwrap();
        assert_eq!(config.web_host, "git.example.com");
        assert_eq!(config.remote, "origin");
        assert!(!config.behavior.open_browser);
    }

    #[test]
    fn test_invalid_document() {
        let err = parse_config("remote = [").unwrap_err();
        assert!(matches!(err, NpError::Config(_)));
    }

    #[test]
    fn test_commit_message_for() {
        let config = Config::default();
        assert_eq!(
            config.commit_message_for("1.2.4"),
            "chore: bump version to 1.2.4"
        );
    }
}
