use std::fmt;

/// Release tag of one package version (e.g. `my-pkg@1.2.3`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub name: String,
}

impl ReleaseTag {
    /// Render a tag from `pattern`, replacing `{name}` and `{version}`.
    pub fn new(pattern: &str, package: &str, version: &str) -> Self {
        ReleaseTag {
            name: pattern
                .replace("{name}", package)
                .replace("{version}", version),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern() {
        let tag = ReleaseTag::new("{name}@{version}", "name", "1.2.4");
        assert_eq!(tag.as_str(), "name@1.2.4");
    }

    #[test]
    fn test_scoped_package_name() {
        let tag = ReleaseTag::new("{name}@{version}", "@rc-component/np", "1.0.0-1");
        assert_eq!(tag.to_string(), "@rc-component/np@1.0.0-1");
    }

    #[test]
    fn test_custom_pattern() {
        let tag = ReleaseTag::new("v{version}", "ignored", "2.0.0");
        assert_eq!(tag.name, "v2.0.0");
    }
}
