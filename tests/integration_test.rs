// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::Command;

use git2::Repository as RawRepository;
use serial_test::serial;
use tempfile::TempDir;

use np::browser::RecordingBrowser;
use np::cli::{run_publish_workflow, PublishWorkflowArgs};
use np::config::Config;
use np::context::ReleaseContext;
use np::git::{Git2Repository, Repository};
use np::manifest::Manifest;
use np::ui::{Answer, ScriptedPrompter};
use np::NpError;

#[test]
#[serial]
fn test_np_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_np"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("np"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
#[serial]
fn test_np_without_manifest_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_np"))
        .arg("-C")
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Manifest error"), "stderr: {}", stderr);
}

fn commit_file(repo: &RawRepository, name: &str, content: &str, message: &str) {
    let workdir = repo.workdir().unwrap().to_path_buf();
    fs::write(workdir.join(name), content).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new(name))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = repo.signature().expect("Could not get sig");

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Could not create commit");
}

/// A work repository released as `name@1.2.3` with one commit on top, and
/// a bare repository standing in for the GitHub remote.
fn setup_test_repo() -> (TempDir, TempDir) {
    let work = TempDir::new().expect("Could not create temp dir");
    let remote = TempDir::new().expect("Could not create temp dir");
    RawRepository::init_bare(remote.path()).expect("Could not init bare repo");

    let repo = RawRepository::init(work.path()).expect("Could not init git repo");
    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    repo.remote("origin", "git@github.com:foo/bar.git")
        .expect("Could not add remote");
    repo.remote_set_pushurl("origin", remote.path().to_str())
        .expect("Could not set push url");

    commit_file(
        &repo,
        "package.json",
        "{\n  \"name\": \"name\",\n  \"version\": \"1.2.3\"\n}\n",
        "chore: bump version to 1.2.3",
    );
    Git2Repository::from_git2(RawRepository::open(work.path()).unwrap())
        .create_annotated_tag("name@1.2.3", "name@1.2.3")
        .expect("Could not create tag");
    commit_file(&repo, "README.md", "# name\n", "fix: a<b>");

    (work, remote)
}

fn current_branch(path: &Path) -> String {
    let repo = RawRepository::open(path).unwrap();
    let head = repo.head().unwrap();
    head.shorthand().unwrap().to_string()
}

#[test]
fn test_git2_repository_status_and_remote() {
    let (work, _remote) = setup_test_repo();
    let repo = Git2Repository::open(work.path()).unwrap();

    assert!(repo.changed_files().unwrap().is_empty());
    assert_eq!(
        repo.remote_url("origin").unwrap(),
        "git@github.com:foo/bar.git"
    );
    assert_eq!(repo.current_branch().unwrap(), current_branch(work.path()));

    fs::write(work.path().join("scratch.txt"), "x").unwrap();
    assert_eq!(repo.changed_files().unwrap(), vec!["scratch.txt"]);
}

#[test]
fn test_git2_repository_log() {
    let (work, _remote) = setup_test_repo();
    let repo = Git2Repository::open(work.path()).unwrap();

    let commits = repo.log("name@1.2.3", "HEAD").unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].message, "fix: a<b>");
    assert_eq!(commits[0].hash.len(), 40);

    assert!(repo.log("name@1.2.3", "name@1.2.3").unwrap().is_empty());
    assert!(matches!(
        repo.log("name@0.0.1", "HEAD"),
        Err(NpError::HistoryQuery(_))
    ));
}

#[test]
#[serial]
fn test_release_against_real_repository() {
    let (work, remote) = setup_test_repo();
    let branch = current_branch(work.path());

    let manifest = Manifest::load(&work.path().join("package.json")).unwrap();
    let ctx = ReleaseContext::new(work.path(), manifest.package, Config::default());
    let repo = Git2Repository::open(work.path()).unwrap();
    let prompter = ScriptedPrompter::new([Answer::Select("1.2.4".to_string())]);
    let browser = RecordingBrowser::new();

    let result = run_publish_workflow(
        &ctx,
        &repo,
        &prompter,
        &browser,
        &PublishWorkflowArgs::default(),
    )
    .unwrap();

    assert_eq!(result.tag, "name@1.2.4");
    assert_eq!(
        fs::read_to_string(work.path().join("package.json")).unwrap(),
        "{\n  \"name\": \"name\",\n  \"version\": \"1.2.4\"\n}\n"
    );
    assert!(repo.changed_files().unwrap().is_empty());

    let lines: Vec<&str> = result.release_notes.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("- chore: bump version to 1.2.4  "));
    assert!(lines[1].starts_with("- fix: a&lt;b&gt;  "));
    assert_eq!(lines[1].len(), "- fix: a&lt;b&gt;  ".len() + 7);
    assert_eq!(
        lines[5],
        "https://github.com/foo/bar/compare/name@1.2.3...name@1.2.4"
    );
    assert_eq!(browser.opened(), vec![result.release_url.clone()]);

    let bare = RawRepository::open_bare(remote.path()).unwrap();
    let pushed_tag = bare
        .find_reference("refs/tags/name@1.2.4")
        .expect("tag should be pushed");
    let tag = pushed_tag.peel_to_tag().expect("tag should be annotated");
    assert_eq!(tag.name(), Some("name@1.2.4"));
    let tagged = pushed_tag.peel_to_commit().unwrap();
    assert_eq!(tagged.summary(), Some("chore: bump version to 1.2.4"));

    let pushed_branch = bare
        .find_reference(&format!("refs/heads/{}", branch))
        .expect("branch should be pushed");
    assert_eq!(pushed_branch.peel_to_commit().unwrap().id(), tagged.id());
}
