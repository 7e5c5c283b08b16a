use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use git_flow_release::cli::{self, ReleaseWorkflowArgs};
use git_flow_release::ui::{self, LinePrompt};
use git_flow_release::ReleaseError;

#[derive(clap::Parser)]
#[command(
    name = "git-flow-release",
    version,
    about = "Start and finish git-flow releases with an automatically computed version"
)]
struct Args {
    #[arg(help = "Path to the repository working copy")]
    repo_path: PathBuf,

    #[arg(long, help = "Finish the release: merge, tag and push trunk and development")]
    close: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Print mutating git commands instead of running them")]
    dry_run: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv)")]
    verbose: u8,
}

fn main() -> ExitCode {
    // Usage errors exit with 1 rather than clap's default of 2
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // A closed stdout/stderr leaves nowhere to report the usage error
            e.print().ok();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let workflow_args = ReleaseWorkflowArgs {
        repo_path: args.repo_path,
        close: args.close,
        dry_run: args.dry_run,
        config_path: args.config,
    };

    let mut prompt = LinePrompt::stdio();
    let result = cli::execute(&workflow_args, &mut prompt)?;

    tracing::debug!(
        "Release {} on {} (created: {}, finished: {})",
        result.version,
        result.branch,
        result.branch_created,
        result.finished
    );

    Ok(())
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<ReleaseError>() {
        // The workflow already told the operator why it stopped
        Some(ReleaseError::Aborted(_)) => {}
        Some(ReleaseError::Command {
            command,
            stdout,
            stderr,
            ..
        }) => ui::display_command_failure(command, stdout, stderr),
        _ => ui::display_error(&format!("{:#}", err)),
    }
}
