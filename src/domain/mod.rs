//! Domain logic - pure release rules independent of git and the terminal

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::CommitRecord;
pub use tag::ReleaseTag;
pub use version::{
    bump_version, is_prerelease, resolve_selection, SelectedVersion, VersionBump,
    VersionCandidates, VersionChoice,
};
