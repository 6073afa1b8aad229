//! Repository location and release page URLs.

use regex::Regex;
use url::Url;

use crate::domain::is_prerelease;
use crate::error::{NpError, Result};

/// `user@host:org/repo(.git)`
const SCP_LIKE: &str = r"^[^@/\s]+@[^:/\s]+:/?(?P<path>[^\s]+?)(?:\.git)?/?$";
/// `https://host/org/repo(.git)`, `ssh://git@host/org/repo`, `git://...`
const URL_LIKE: &str =
    r"^(?:https?|ssh|git|git\+ssh)://[^/\s]+/(?P<path>[^\s]+?)(?:\.git)?/?$";

/// `org/repo` path of a remote repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocation {
    pub path: String,
}

impl RemoteLocation {
    /// Extract the `org/repo` path from an SSH or URL style remote.
    pub fn parse(remote_url: &str) -> Result<Self> {
        let remote = remote_url.trim();

        for pattern in [SCP_LIKE, URL_LIKE] {
            let re = Regex::new(pattern).map_err(|e| NpError::RemoteUrlParse(e.to_string()))?;
            if let Some(path) = re.captures(remote).and_then(|c| c.name("path")) {
                let path = path.as_str().trim_matches('/');
                if path.contains('/') {
                    return Ok(RemoteLocation {
                        path: path.to_string(),
                    });
                }
            }
        }

        Err(NpError::RemoteUrlParse(remote_url.to_string()))
    }

    /// Web URL of the repository on `host`.
    pub fn web_url(&self, host: &str) -> String {
        format!("https://{}/{}", host, self.path)
    }
}

/// Address of the "draft a new release" page.
pub fn release_page_url(repo_url: &str) -> String {
    format!("{}/releases/new", repo_url)
}

/// Release page URL with the tag and notes pre-filled.
///
/// Adds `prerelease=true` when `version` carries a prerelease component.
pub fn build_release_url(base: &str, tag: &str, body: &str, version: &str) -> Result<Url> {
    let mut url =
        Url::parse(base).map_err(|e| NpError::RemoteUrlParse(format!("{}: {}", base, e)))?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("tag", tag);
        query.append_pair("body", body);
        if is_prerelease(version) {
            query.append_pair("prerelease", "true");
        }
    }

    Ok(url)
}
