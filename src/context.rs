//! Per-run context: working directory, manifest and configuration.

use std::path::{Path, PathBuf};

use crate::config::{load_config, Config};
use crate::domain::ReleaseTag;
use crate::error::Result;
use crate::manifest::{Manifest, PackageInfo};

/// Everything a release run reads from its environment, captured once
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseContext {
    pub cwd: PathBuf,
    pub manifest_path: PathBuf,
    pub package: PackageInfo,
    pub config: Config,
}

impl ReleaseContext {
    /// Build a context from already known parts.
    pub fn new(cwd: impl Into<PathBuf>, package: PackageInfo, config: Config) -> Self {
        let cwd = cwd.into();
        let manifest_path = cwd.join(&config.manifest);
        ReleaseContext {
            cwd,
            manifest_path,
            package,
            config,
        }
    }

    /// Load configuration and the manifest for a run in `cwd`.
    pub fn load(cwd: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = load_config(config_path, cwd)?;
        let manifest = Manifest::load(&cwd.join(&config.manifest))?;
        Ok(Self::new(cwd, manifest.package, config))
    }

    /// Release tag of `version` for this package.
    pub fn tag_for(&self, version: &str) -> ReleaseTag {
        ReleaseTag::new(&self.config.tag_pattern, &self.package.name, version)
    }
}
