//! Release note composition.

use log::{debug, warn};

use crate::domain::CommitRecord;
use crate::git::Repository;

/// Escape text for inclusion in an HTML/markdown body.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Format one changelog line: `- <escaped message>  <short hash>`.
pub fn format_commit_line(commit: &CommitRecord) -> String {
    format!("- {}  {}", html_escape(&commit.message), commit.short_hash())
}

/// Compare link between two tags of the repository at `repo_url`.
pub fn compare_link(repo_url: &str, from_tag: &str, to_tag: &str) -> String {
    format!("{}/compare/{}...{}", repo_url, from_tag, to_tag)
}

/// Build release notes from `commits` (newest first).
///
/// No commits yields an empty string; otherwise the changelog lines are
/// followed by a `---` separator and the compare link.
pub fn compose_release_notes(
    commits: &[CommitRecord],
    repo_url: &str,
    from_tag: &str,
    to_tag: &str,
) -> String {
    if commits.is_empty() {
        return String::new();
    }

    let lines: Vec<String> = commits.iter().map(format_commit_line).collect();
    format!(
        "{}\n\n---\n\n{}",
        lines.join("\n"),
        compare_link(repo_url, from_tag, to_tag)
    )
}

/// Outcome of collecting notes for a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedNotes {
    pub body: String,
    pub commit_count: usize,
    /// Set when the history query failed and the notes fell back to empty
    pub history_error: Option<String>,
}

/// Query the history between two tags and compose the release notes.
///
/// Commits are listed up to `log_to` when given (e.g. `HEAD` while the new
/// tag does not exist yet), otherwise up to `to_tag`. A failed history
/// query (typically a first release whose previous tag does not exist) is
/// logged and degrades to empty notes.
pub fn collect_release_notes<R: Repository + ?Sized>(
    repo: &R,
    repo_url: &str,
    from_tag: &str,
    to_tag: &str,
    log_to: Option<&str>,
) -> CollectedNotes {
    match repo.log(from_tag, log_to.unwrap_or(to_tag)) {
        Ok(commits) => {
            debug!("{} commits between {} and {}", commits.len(), from_tag, to_tag);
            CollectedNotes {
                body: compose_release_notes(&commits, repo_url, from_tag, to_tag),
                commit_count: commits.len(),
                history_error: None,
            }
        }
        Err(e) => {
            warn!("cannot list commits {}..{}: {}", from_tag, to_tag, e);
            CollectedNotes {
                body: String::new(),
                commit_count: 0,
                history_error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    const REPO: &str = "https://github.com/foo/bar";

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"a<b> & "c" 'd'"#),
            "a&lt;b&gt; &amp; &quot;c&quot; &#39;d&#39;"
        );
        assert_eq!(html_escape("修复 bug"), "修复 bug");
    }

    #[test]
    fn test_format_commit_line() {
        let commit = CommitRecord::new("fix: a<b>", "abcdef1234567");
        assert_eq!(format_commit_line(&commit), "- fix: a&lt;b&gt;  abcdef1");
    }

    #[test]
    fn test_compose_empty() {
        assert_eq!(compose_release_notes(&[], REPO, "p@1.0.0", "p@1.0.0"), "");
    }

    #[test]
    fn test_compose_notes() {
        let commits = vec![
            CommitRecord::new("chore: bump version to 1.2.4", "1111111aaaa"),
            CommitRecord::new("feat: 新功能", "2222222bbbb"),
        ];
        let notes = compose_release_notes(&commits, REPO, "name@1.2.3", "name@1.2.4");
        assert_eq!(
            notes,
            "- chore: bump version to 1.2.4  1111111\n\
             - feat: 新功能  2222222\n\
             \n\
             ---\n\
             \n\
             https://github.com/foo/bar/compare/name@1.2.3...name@1.2.4"
        );
    }

    #[test]
    fn test_collect_uses_history() {
        let mut repo = MockRepository::new();
        repo.add_history(
            "name@1.2.3",
            "name@1.2.4",
            vec![CommitRecord::new("fix: x", "abcdef1234")],
        );

        let notes = collect_release_notes(&repo, REPO, "name@1.2.3", "name@1.2.4", None);
        assert_eq!(notes.commit_count, 1);
        assert!(notes.history_error.is_none());
        assert!(notes.body.starts_with("- fix: x  abcdef1"));
    }

    #[test]
    fn test_collect_degrades_on_missing_tag() {
        let repo = MockRepository::new();

        let notes = collect_release_notes(&repo, REPO, "name@0.0.0", "name@0.1.0", None);
        assert_eq!(notes.body, "");
        assert_eq!(notes.commit_count, 0);
        assert!(notes.history_error.is_some());
    }

    #[test]
    fn test_collect_until_other_revision_keeps_tag_in_link() {
        let mut repo = MockRepository::new();
        repo.add_history(
            "name@1.2.3",
            "HEAD",
            vec![CommitRecord::new("fix: y", "1234567890")],
        );

        let notes = collect_release_notes(&repo, REPO, "name@1.2.3", "name@1.2.4", Some("HEAD"));
        assert_eq!(notes.commit_count, 1);
        assert!(notes.body.ends_with("/compare/name@1.2.3...name@1.2.4"));
    }
}
