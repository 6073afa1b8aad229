use std::path::{Path, PathBuf};

use git2::{Cred, CredentialType, PushOptions, RemoteCallbacks, Repository as Git2Repo, Sort};
use log::{debug, info};

use crate::domain::CommitRecord;
use crate::error::{NpError, Result};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| NpError::Git(git2::Error::from_str("repository has no work tree")))
    }

    fn relative_to_workdir(&self, path: &Path) -> Result<PathBuf> {
        if path.is_relative() {
            return Ok(path.to_path_buf());
        }

        let workdir = self.workdir()?.canonicalize()?;
        let absolute = path.canonicalize()?;
        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                NpError::Git(git2::Error::from_str(&format!(
                    "{} is outside the work tree {}",
                    path.display(),
                    workdir.display()
                )))
            })
    }

    /// Resolve a tag name (or any revision) to the commit it points at.
    fn resolve_commit(&self, reference: &str) -> Result<git2::Commit<'_>> {
        if let Ok(tag_ref) = self.repo.find_reference(&format!("refs/tags/{}", reference)) {
            return tag_ref.peel_to_commit().map_err(|e| {
                NpError::history(format!("tag '{}' does not point at a commit: {}", reference, e))
            });
        }

        self.repo
            .revparse_single(reference)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| NpError::history(format!("unknown revision '{}': {}", reference, e)))
    }

    fn push(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|e| {
            NpError::Git(git2::Error::from_str(&format!(
                "remote '{}' not found: {}",
                remote_name, e
            )))
        })?;

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(remote_callbacks(self.repo.config().ok()));

        remote.push(&[refspec], Some(&mut push_options))?;
        Ok(())
    }
}

/// Credentials and push status callbacks.
///
/// SSH keys from `~/.ssh` are tried first, then the SSH agent, then the
/// configured git credential helper.
fn remote_callbacks<'a>(config: Option<git2::Config>) -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();

    callbacks.credentials(move |url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            if let Some(config) = config.as_ref() {
                if let Ok(cred) = Cred::credential_helper(config, url, username_from_url) {
                    return Ok(cred);
                }
            }
        }

        Cred::default()
    });

    callbacks.push_update_reference(|refname, status| match status {
        Some(reason) => Err(git2::Error::from_str(&format!(
            "remote rejected {}: {}",
            refname, reason
        ))),
        None => Ok(()),
    });

    callbacks
}

impl super::Repository for Git2Repository {
    fn changed_files(&self) -> Result<Vec<String>> {
        let mut options = git2::StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;

        Ok(statuses
            .iter()
            .filter(|entry| !entry.status().is_ignored())
            .filter_map(|entry| entry.path().map(|p| p.to_string()))
            .collect())
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        let found = self.repo.find_remote(remote)?;
        found.url().map(|u| u.to_string()).ok_or_else(|| {
            NpError::RemoteUrlParse(format!("remote '{}' has no valid UTF-8 URL", remote))
        })
    }

    fn log(&self, from: &str, to: &str) -> Result<Vec<CommitRecord>> {
        let from_commit = self.resolve_commit(from)?;
        let to_commit = self.resolve_commit(to)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to_commit.id())?;
        revwalk.hide(from_commit.id())?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(CommitRecord {
                message: commit.summary().unwrap_or("(empty message)").to_string(),
                hash: commit.id().to_string(),
            });
        }

        Ok(commits)
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(NpError::Git(git2::Error::from_str(
                "HEAD is detached; check out a branch to release from",
            )));
        }

        head.shorthand()
            .map(|s| s.to_string())
            .ok_or_else(|| NpError::Git(git2::Error::from_str("branch name is not valid UTF-8")))
    }

    fn stage(&self, path: &Path) -> Result<()> {
        let relative = self.relative_to_workdir(path)?;
        debug!("staging {}", relative.display());

        let mut index = self.repo.index()?;
        index.add_path(&relative)?;
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        debug!("committing with message: {}", message);
        let signature = self.repo.signature()?;
        let mut index = self.repo.index()?;
        let tree = self.repo.find_tree(index.write_tree()?)?;
        let parent = self.repo.head()?.peel_to_commit()?;

        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        debug!("creating tag {}", name);
        let head = self.repo.head()?.peel_to_commit()?;
        let tagger = self.repo.signature()?;

        self.repo
            .tag(name, head.as_object(), &tagger, message, false)?;
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        info!("pushing branch {} to {}", branch, remote);
        self.push(remote, &format!("refs/heads/{0}:refs/heads/{0}", branch))
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        info!("pushing tag {} to {}", tag, remote);
        self.push(remote, &format!("refs/tags/{0}:refs/tags/{0}", tag))
    }
}
