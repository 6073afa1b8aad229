//! Next-version candidates and selection.
//!
//! Increments follow the npm flavour of semantic versioning: a prerelease
//! of `1.2.3` is a release that has not happened yet, so "patch" of
//! `1.2.3-1` is `1.2.3`, not `1.2.4`.

use std::fmt;

use semver::{BuildMetadata, Prerelease, Version};

use crate::error::{NpError, Result};

/// Label of the "publish without changing the version" choice.
pub const KEEP_CURRENT_LABEL: &str = "不更改，直接发布";

/// Label of the "enter a version by hand" choice.
pub const CUSTOM_LABEL: &str = "自定义";

/// Kind of increment applied to a version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
    /// Advance (or start) a prerelease, optionally under a named identifier
    Prerelease(Option<&'static str>),
}

/// Fixed order in which candidates are offered
pub const CANDIDATE_BUMPS: [VersionBump; 7] = [
    VersionBump::Patch,
    VersionBump::Minor,
    VersionBump::Major,
    VersionBump::Prerelease(None),
    VersionBump::Prerelease(Some("alpha")),
    VersionBump::Prerelease(Some("beta")),
    VersionBump::Prerelease(Some("rc")),
];

/// Parse a version string, failing with `InvalidVersion`.
pub fn parse_version(version: &str) -> Result<Version> {
    Version::parse(version).map_err(|_| NpError::invalid_version(version))
}

/// True when `version` is valid and carries a prerelease component.
pub fn is_prerelease(version: &str) -> bool {
    Version::parse(version)
        .map(|v| !v.pre.is_empty())
        .unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Identifier {
    Numeric(u64),
    Alpha(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::Alpha(s) => f.write_str(s),
        }
    }
}

fn split_prerelease(pre: &Prerelease) -> Vec<Identifier> {
    if pre.is_empty() {
        return Vec::new();
    }

    pre.as_str()
        .split('.')
        .map(|part| {
            let numeric = part.len() == 1 || !part.starts_with('0');
            match part.parse::<u64>() {
                Ok(n) if numeric => Identifier::Numeric(n),
                _ => Identifier::Alpha(part.to_string()),
            }
        })
        .collect()
}

fn join_prerelease(identifiers: &[Identifier]) -> Prerelease {
    let joined = identifiers
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(".");

    // identifiers come from an already valid prerelease or from the fixed
    // alpha/beta/rc names, so the joined string is always valid
    Prerelease::new(&joined).unwrap_or(Prerelease::EMPTY)
}

fn increment(component: u64, version: &Version) -> Result<u64> {
    component.checked_add(1).ok_or_else(|| {
        NpError::InvalidBaseVersion(format!(
            "{}: numeric component too large to increment",
            version
        ))
    })
}

/// Apply `bump` to `version`, returning a new version without build metadata.
///
/// Fails with `InvalidBaseVersion` when a component to increment is
/// already `u64::MAX`.
pub fn bump_version(version: &Version, bump: VersionBump) -> Result<Version> {
    let mut next = version.clone();
    next.build = BuildMetadata::EMPTY;
    let had_pre = !next.pre.is_empty();

    match bump {
        VersionBump::Major => {
            if next.minor != 0 || next.patch != 0 || !had_pre {
                next.major = increment(next.major, version)?;
            }
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        VersionBump::Minor => {
            if next.patch != 0 || !had_pre {
                next.minor = increment(next.minor, version)?;
            }
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        VersionBump::Patch => {
            if !had_pre {
                next.patch = increment(next.patch, version)?;
            }
            next.pre = Prerelease::EMPTY;
        }
        VersionBump::Prerelease(identifier) => {
            if !had_pre {
                next.patch = increment(next.patch, version)?;
            }

            let mut parts = split_prerelease(&next.pre);
            match parts
                .iter_mut()
                .rev()
                .find_map(|part| match part {
                    Identifier::Numeric(n) => Some(n),
                    Identifier::Alpha(_) => None,
                }) {
                Some(n) => *n = increment(*n, version)?,
                None => parts.push(Identifier::Numeric(0)),
            }

            if let Some(identifier) = identifier {
                let same_line = matches!(parts.first(), Some(Identifier::Alpha(s)) if s == identifier)
                    && matches!(parts.get(1), Some(Identifier::Numeric(_)));
                if !same_line {
                    parts = vec![
                        Identifier::Alpha(identifier.to_string()),
                        Identifier::Numeric(0),
                    ];
                }
            }

            next.pre = join_prerelease(&parts);
        }
    }

    Ok(next)
}

/// One entry in the version selection list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionChoice {
    Version(String),
    KeepCurrent,
    Custom,
}

impl VersionChoice {
    pub fn label(&self) -> &str {
        match self {
            VersionChoice::Version(v) => v,
            VersionChoice::KeepCurrent => KEEP_CURRENT_LABEL,
            VersionChoice::Custom => CUSTOM_LABEL,
        }
    }
}

impl fmt::Display for VersionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered, duplicate-free next-version suggestions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCandidates {
    versions: Vec<String>,
}

impl VersionCandidates {
    /// Derive the candidates for `current`.
    ///
    /// Fails with `InvalidBaseVersion` when `current` is not a valid
    /// semantic version or one of its increments would overflow.
    pub fn generate(current: &str) -> Result<Self> {
        let base = Version::parse(current)
            .map_err(|e| NpError::InvalidBaseVersion(format!("{}: {}", current, e)))?;

        let mut versions: Vec<String> = Vec::with_capacity(CANDIDATE_BUMPS.len());
        for bump in CANDIDATE_BUMPS {
            let candidate = bump_version(&base, bump)?.to_string();
            if !versions.contains(&candidate) {
                versions.push(candidate);
            }
        }

        Ok(VersionCandidates { versions })
    }

    /// The version strings only, without the sentinels.
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// Versions followed by the keep-current and custom sentinels.
    pub fn choices(&self) -> Vec<VersionChoice> {
        self.versions
            .iter()
            .cloned()
            .map(VersionChoice::Version)
            .chain([VersionChoice::KeepCurrent, VersionChoice::Custom])
            .collect()
    }
}

/// A validated target version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedVersion {
    pub version: String,
    /// True when the target equals the current version (publish as is)
    pub unchanged: bool,
}

/// Turn a choice into a validated target version.
///
/// `custom_input` is consulted only for [`VersionChoice::Custom`] and is
/// trimmed before validation.
pub fn resolve_selection(
    choice: &VersionChoice,
    current: &str,
    custom_input: Option<&str>,
) -> Result<SelectedVersion> {
    let tentative = match choice {
        VersionChoice::Version(v) => v.clone(),
        VersionChoice::KeepCurrent => current.to_string(),
        VersionChoice::Custom => custom_input.unwrap_or_default().trim().to_string(),
    };

    parse_version(&tentative)?;

    Ok(SelectedVersion {
        unchanged: tentative == current,
        version: tentative,
    })
}
