use std::fmt;

/// Non-fatal conditions met during a release.
/// These are reported to the user and the run continues.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The user chose to continue despite uncommitted changes
    UncommittedChanges { files: Vec<String> },
    /// Commits between the two tags could not be listed
    HistoryUnavailable {
        from: String,
        to: String,
        reason: String,
    },
    /// The range between the two tags holds no commits
    NoCommitsInRange { from: String, to: String },
    /// The release page could not be opened automatically
    BrowserLaunchFailed { url: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UncommittedChanges { files } => {
                write!(
                    f,
                    "继续操作，注意这可能是一种错误... ({} uncommitted file(s))",
                    files.len()
                )
            }
            BoundaryWarning::HistoryUnavailable { from, to, reason } => {
                write!(
                    f,
                    "Cannot list commits {}...{}: {}; release notes left empty",
                    from, to, reason
                )
            }
            BoundaryWarning::NoCommitsInRange { from, to } => {
                write!(f, "No commits between '{}' and '{}'", from, to)
            }
            BoundaryWarning::BrowserLaunchFailed { url, reason } => {
                write!(f, "Cannot open browser ({}); open {} manually", reason, url)
            }
        }
    }
}
