//! Git operations abstraction layer
//!
//! The release workflow only talks to the [Repository] trait so every step
//! can run against [mock::MockRepository] in tests. The real implementation,
//! [repository::Git2Repository], is backed by the `git2` crate.
//!
//! ```rust
//! # use np::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> np::Result<()> {
//! let changed = repo.changed_files()?;
//! if changed.is_empty() {
//!     let commits = repo.log("pkg@1.0.0", "pkg@1.1.0")?;
//!     println!("{} commits", commits.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::Path;

use crate::domain::CommitRecord;
use crate::error::Result;

/// Repository operations used by the release workflow
///
/// Every mutating method either succeeds or returns an error that aborts
/// the run; nothing is rolled back.
pub trait Repository {
    /// Paths with uncommitted changes, untracked files included.
    ///
    /// An empty list means the working tree is clean.
    fn changed_files(&self) -> Result<Vec<String>>;

    /// Configured URL of `remote`.
    fn remote_url(&self, remote: &str) -> Result<String>;

    /// Commits reachable from `to` but not from `from`, newest first.
    ///
    /// # Returns
    /// * `Ok(Vec<CommitRecord>)` - Possibly empty list of commits
    /// * `Err(NpError::HistoryQuery)` - If either reference does not exist
    fn log(&self, from: &str, to: &str) -> Result<Vec<CommitRecord>>;

    /// Short name of the checked out branch.
    fn current_branch(&self) -> Result<String>;

    /// Stage `path` (absolute or relative to the work tree).
    fn stage(&self, path: &Path) -> Result<()>;

    /// Commit the index on top of HEAD.
    fn commit(&self, message: &str) -> Result<()>;

    /// Create an annotated tag on HEAD.
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push `branch` to `remote`.
    fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Push tag `tag` to `remote`.
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()>;
}
