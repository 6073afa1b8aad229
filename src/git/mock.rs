use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::CommitRecord;
use crate::error::{NpError, Result};
use crate::git::Repository;

/// A mutation recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Stage(PathBuf),
    Commit(String),
    Tag { name: String, message: String },
    PushBranch { remote: String, branch: String },
    PushTag { remote: String, tag: String },
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    changed: Vec<String>,
    remotes: HashMap<String, String>,
    history: HashMap<(String, String), Vec<CommitRecord>>,
    tags: RefCell<Vec<String>>,
    branch: String,
    operations: RefCell<Vec<MockOperation>>,
}

impl MockRepository {
    /// Create a new clean mock repository on branch `main`
    pub fn new() -> Self {
        MockRepository {
            changed: Vec::new(),
            remotes: HashMap::new(),
            history: HashMap::new(),
            tags: RefCell::new(Vec::new()),
            branch: "main".to_string(),
            operations: RefCell::new(Vec::new()),
        }
    }

    /// Mark a path as having uncommitted changes
    pub fn add_changed_file(&mut self, path: impl Into<String>) {
        self.changed.push(path.into());
    }

    pub fn set_remote(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.remotes.insert(name.into(), url.into());
    }

    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = branch.into();
    }

    /// Register an existing tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.borrow_mut().push(name.into());
    }

    /// Register the commits `log(from, to)` returns.
    ///
    /// Neither revision becomes a known tag, so a workflow can still create
    /// the `to` tag before querying the range.
    pub fn add_history(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        commits: Vec<CommitRecord>,
    ) {
        self.history.insert((from.into(), to.into()), commits);
    }

    /// Mutations performed so far, in order
    pub fn operations(&self) -> Vec<MockOperation> {
        self.operations.borrow().clone()
    }

    fn record(&self, op: MockOperation) {
        self.operations.borrow_mut().push(op);
    }

    fn has_tag(&self, name: &str) -> bool {
        self.tags.borrow().iter().any(|t| t == name)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn changed_files(&self) -> Result<Vec<String>> {
        Ok(self.changed.clone())
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        self.remotes.get(remote).cloned().ok_or_else(|| {
            NpError::Git(git2::Error::from_str(&format!(
                "remote '{}' does not exist",
                remote
            )))
        })
    }

    fn log(&self, from: &str, to: &str) -> Result<Vec<CommitRecord>> {
        if let Some(commits) = self.history.get(&(from.to_string(), to.to_string())) {
            return Ok(commits.clone());
        }

        for tag in [from, to] {
            if !self.has_tag(tag) {
                return Err(NpError::history(format!("unknown revision '{}'", tag)));
            }
        }

        Ok(Vec::new())
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.record(MockOperation::Stage(path.to_path_buf()));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(MockOperation::Commit(message.to_string()));
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.has_tag(name) {
            return Err(NpError::Git(git2::Error::from_str(&format!(
                "tag '{}' already exists",
                name
            ))));
        }

        self.tags.borrow_mut().push(name.to_string());
        self.record(MockOperation::Tag {
            name: name.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(MockOperation::PushBranch {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.record(MockOperation::PushTag {
            remote: remote.to_string(),
            tag: tag.to_string(),
        });
        Ok(())
    }
}
