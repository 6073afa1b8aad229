//! Manifest (`package.json`) access.
//!
//! The version is rewritten with a single textual substitution so the rest
//! of the document keeps its exact bytes; the file is never re-serialized.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::error::{NpError, Result};

/// Name and version read from the manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
}

/// Raw manifest text plus its parsed package fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub raw: String,
    pub package: PackageInfo,
}

const VERSION_FIELD: &str = r#""version"\s*:\s*"[^"]+""#;

impl Manifest {
    /// Parse manifest text.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let package: PackageInfo = serde_json::from_str(&raw)
            .map_err(|e| NpError::manifest(format!("cannot read name/version: {}", e)))?;

        Ok(Manifest { raw, package })
    }

    /// Read and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            NpError::manifest(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(raw)
    }

    /// Rewrite the version field of the file at `path` in place.
    pub fn write_version(path: &Path, version: &str) -> Result<()> {
        let raw = fs::read_to_string(path)?;
        let updated = replace_version_field(&raw, version)
            .map_err(|_| NpError::FieldNotFound(path.display().to_string()))?;
        fs::write(path, updated)?;
        Ok(())
    }
}

/// Replace the value of the first `"version": "..."` field in `text`.
///
/// Every other byte is preserved. Fails with `FieldNotFound` when the
/// pattern does not occur.
pub fn replace_version_field(text: &str, version: &str) -> Result<String> {
    let re = Regex::new(VERSION_FIELD).map_err(|e| NpError::manifest(e.to_string()))?;
    let found = re
        .find(text)
        .ok_or_else(|| NpError::FieldNotFound("manifest".to_string()))?;

    let mut out = String::with_capacity(text.len() + version.len());
    out.push_str(&text[..found.start()]);
    out.push_str(&format!("\"version\": \"{}\"", version));
    out.push_str(&text[found.end()..]);
    Ok(out)
}
