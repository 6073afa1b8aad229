use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use np::browser::SystemBrowser;
use np::cli::{run_publish_workflow, PublishWorkflowArgs};
use np::context::ReleaseContext;
use np::git::Git2Repository;
use np::ui::{self, TerminalPrompter};
use np::NpError;

#[derive(clap::Parser)]
#[command(
    name = "np",
    version,
    about = "Bump the package version, tag and push it, and open a pre-filled release page"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short = 'C', long, help = "Run in this directory instead of the current one")]
    cwd: Option<PathBuf>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Enable debug logging")]
    debug: bool,
}

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("np")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logger(args.debug)?;

    let cwd = match args.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine the working directory")?,
    };

    let ctx = match ReleaseContext::load(&cwd, args.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => exit_with(e),
    };

    let repo = match Git2Repository::open(&ctx.cwd) {
        Ok(repo) => repo,
        Err(e) => exit_with(e),
    };

    let workflow_args = PublishWorkflowArgs {
        dry_run: args.dry_run,
    };

    match run_publish_workflow(
        &ctx,
        &repo,
        &TerminalPrompter,
        &SystemBrowser,
        &workflow_args,
    ) {
        Ok(result) if workflow_args.dry_run => {
            ui::display_success(&format!("Dry run finished for {}", result.tag));
            Ok(())
        }
        Ok(result) => {
            ui::display_success(&format!("Released {}", result.tag));
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

fn exit_with(error: NpError) -> ! {
    match &error {
        NpError::InvalidVersion(version) => ui::display_error(&format!("无效的版本号: {}", version)),
        NpError::DirtyWorkingTree { .. } => {}
        other => ui::display_error(&other.to_string()),
    }
    std::process::exit(error.exit_code());
}
