//! Main release workflow orchestration
//!
//! Runs the release pipeline strictly in order, each step finishing its
//! side effect before the next one starts:
//! 1. Check the working tree (confirm to continue when dirty)
//! 2. Resolve the repository web location from the remote
//! 3. Offer next-version candidates and validate the choice
//! 4. Rewrite the manifest version, commit, tag and push
//! 5. Compose release notes between the previous and new tag
//! 6. Open the pre-filled release page
//!
//! Everything before step 4 is free of side effects, so failing there
//! leaves the repository untouched. Nothing after step 4 is rolled back.

use log::{debug, info};

use crate::boundary::BoundaryWarning;
use crate::browser::BrowserLauncher;
use crate::context::ReleaseContext;
use crate::domain::{resolve_selection, SelectedVersion, VersionCandidates, VersionChoice};
use crate::error::{NpError, Result};
use crate::git::Repository;
use crate::manifest::Manifest;
use crate::notes::collect_release_notes;
use crate::release_url::{build_release_url, release_page_url, RemoteLocation};
use crate::ui::{self, Prompter};

/// Options of the publish workflow
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishWorkflowArgs {
    /// Compute and print everything without touching the repository
    pub dry_run: bool,
}

/// Result of a successful publish workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The version released
    pub version: String,
    /// Tag of the released version
    pub tag: String,
    /// Tag of the version found in the manifest
    pub previous_tag: String,
    /// False when publishing without a version change
    pub changed: bool,
    pub release_notes: String,
    pub release_url: String,
    /// Whether the release page was handed to the browser
    pub opened: bool,
}

/// Check the working tree, asking to continue when it has changes.
pub fn check_working_tree<R, P>(repo: &R, prompter: &P) -> Result<()>
where
    R: Repository + ?Sized,
    P: Prompter + ?Sized,
{
    let files = repo.changed_files()?;
    if files.is_empty() {
        return Ok(());
    }

    debug!("uncommitted changes: {:?}", files);
    if !prompter.confirm(ui::CONFIRM_DIRTY_PROMPT, false)? {
        return Err(NpError::DirtyWorkingTree { files });
    }

    ui::display_boundary_warning(&BoundaryWarning::UncommittedChanges { files });
    Ok(())
}

/// Present the candidates for `current` and resolve the user's choice.
pub fn select_version<P>(prompter: &P, current: &str) -> Result<SelectedVersion>
where
    P: Prompter + ?Sized,
{
    let choices = VersionCandidates::generate(current)?.choices();
    let labels: Vec<String> = choices.iter().map(|c| c.label().to_string()).collect();

    let index = prompter.select(ui::SELECT_VERSION_PROMPT, &labels)?;
    let choice = choices
        .get(index)
        .ok_or_else(|| NpError::prompt(format!("selection {} out of range", index)))?;

    let custom = match choice {
        VersionChoice::Custom => Some(prompter.input(ui::CUSTOM_VERSION_PROMPT)?),
        _ => None,
    };

    resolve_selection(choice, current, custom.as_deref())
}

/// Main publish workflow
///
/// # Arguments
///
/// * `ctx` - Run context (working directory, manifest, configuration)
/// * `repo` - Repository the release is made in
/// * `prompter` - Interactive prompt facility
/// * `browser` - Launcher for the release page
/// * `args` - Workflow options
///
/// # Returns
///
/// The released version and release page, or the first fatal error
pub fn run_publish_workflow<R, P, B>(
    ctx: &ReleaseContext,
    repo: &R,
    prompter: &P,
    browser: &B,
    args: &PublishWorkflowArgs,
) -> Result<WorkflowResult>
where
    R: Repository + ?Sized,
    P: Prompter + ?Sized,
    B: BrowserLauncher + ?Sized,
{
    let config = &ctx.config;
    let current = ctx.package.version.as_str();

    check_working_tree(repo, prompter)?;

    let remote_url = repo.remote_url(&config.remote)?;
    let repo_url = RemoteLocation::parse(&remote_url)?.web_url(&config.web_host);
    debug!("repository web url: {}", repo_url);

    ui::display_current_version(current);
    let selected = select_version(prompter, current)?;

    let previous_tag = ctx.tag_for(current);
    let next_tag = if selected.unchanged {
        previous_tag.clone()
    } else {
        ctx.tag_for(&selected.version)
    };

    if !selected.unchanged {
        ui::display_version_change(current, &selected.version);

        if args.dry_run {
            ui::display_status(&format!(
                "Dry run: would update {}, commit, tag {} and push to {}",
                ctx.manifest_path.display(),
                next_tag,
                config.remote
            ));
        } else {
            let branch = repo.current_branch()?;

            Manifest::write_version(&ctx.manifest_path, &selected.version)?;
            repo.stage(&ctx.manifest_path)?;
            repo.commit(&config.commit_message_for(&selected.version))?;

            ui::display_status(&format!("Commit and tag: {}", next_tag));
            repo.create_annotated_tag(next_tag.as_str(), next_tag.as_str())?;

            ui::display_status(&format!("Push {}...", config.remote));
            repo.push_branch(&config.remote, &branch)?;
            repo.push_tag(&config.remote, next_tag.as_str())?;
            info!("released {}", next_tag);
        }
    }

    // the new tag only exists once it has been created
    let log_to = (args.dry_run && !selected.unchanged).then_some("HEAD");
    let notes = collect_release_notes(
        repo,
        &repo_url,
        previous_tag.as_str(),
        next_tag.as_str(),
        log_to,
    );

    if let Some(reason) = &notes.history_error {
        ui::display_boundary_warning(&BoundaryWarning::HistoryUnavailable {
            from: previous_tag.to_string(),
            to: next_tag.to_string(),
            reason: reason.clone(),
        });
    } else if notes.commit_count == 0 && !selected.unchanged {
        ui::display_boundary_warning(&BoundaryWarning::NoCommitsInRange {
            from: previous_tag.to_string(),
            to: next_tag.to_string(),
        });
    }

    let release_url = build_release_url(
        &release_page_url(&repo_url),
        next_tag.as_str(),
        &notes.body,
        &selected.version,
    )?
    .to_string();

    let opened = if args.dry_run || !config.behavior.open_browser {
        ui::display_release_url(&release_url);
        false
    } else {
        match browser.open(&release_url) {
            Ok(()) => true,
            Err(e) => {
                ui::display_boundary_warning(&BoundaryWarning::BrowserLaunchFailed {
                    url: release_url.clone(),
                    reason: e.to_string(),
                });
                ui::display_release_url(&release_url);
                false
            }
        }
    };

    Ok(WorkflowResult {
        version: selected.version,
        tag: next_tag.to_string(),
        previous_tag: previous_tag.to_string(),
        changed: !selected.unchanged,
        release_notes: notes.body,
        release_url,
        opened,
    })
}
