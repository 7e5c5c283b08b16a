//! Main release workflow orchestration logic
//!
//! Drives one release run from start to finish:
//!
//! ```text
//! START -> (dirty? -> PROMPT -> discard | ABORT)
//!       -> RESOLVE_VERSION
//!       -> (branch exists? -> SKIP_START | START_RELEASE)
//!       -> (close? -> FINISH_RELEASE | DONE)
//! ```
//!
//! Nothing is retried or rolled back. The first failing git command ends the
//! run and leaves the working copy wherever that command left it.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::boundary::BoundaryWarning;
use crate::config::{load_config, Config};
use crate::domain::{ReleaseBranch, Version};
use crate::error::{ReleaseError, Result};
use crate::git::{CommandRunner, GitRepository, SystemRunner};
use crate::ui::{self, Prompt};

/// Question asked when the working copy has local modifications
pub const DISCARD_QUESTION: &str =
    "There are uncommitted changes in the repository. Discard them and proceed? (y/n): ";

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Working copy to release from, resolved to an absolute path before use
    pub repo_path: PathBuf,

    /// Finish the release after making sure its branch exists
    pub close: bool,

    /// Only report mutating commands instead of running them
    pub dry_run: bool,

    /// Path to custom config file
    pub config_path: Option<PathBuf>,
}

/// Version resolved from the repository's tags
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVersion {
    /// The tag `git describe` returned, `None` when there was none
    pub last_tag: Option<String>,

    /// Version the last tag stands for (baseline when there is no tag)
    pub current: Version,

    /// Version of the release being prepared
    pub next: Version,
}

impl ResolvedVersion {
    /// Last tag as shown to the operator
    pub fn last_tag_display(&self) -> String {
        self.last_tag
            .clone()
            .unwrap_or_else(|| self.current.to_string())
    }
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Last tag found (or the baseline version)
    pub last_tag: String,

    /// The release version
    pub version: Version,

    /// Name of the release branch
    pub branch: String,

    /// Whether local changes were thrown away before starting
    pub discarded_changes: bool,

    /// Whether this run created the release branch
    pub branch_created: bool,

    /// Whether the release was finished and pushed
    pub finished: bool,
}

/// Resolve the repository path to an absolute path.
pub fn resolve_repo_path(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .map_err(|source| ReleaseError::RepositoryPath {
            path: path.to_path_buf(),
            source,
        })
}

/// Run the release workflow against the installed `git`.
///
/// Resolves the repository path, loads its configuration and hands over to
/// [run_release_workflow].
pub fn execute(args: &ReleaseWorkflowArgs, prompt: &mut dyn Prompt) -> Result<WorkflowResult> {
    let root = resolve_repo_path(&args.repo_path)?;
    let config = load_config(args.config_path.as_deref(), &root)?;

    if args.dry_run {
        ui::display_status("Dry run: mutating git commands will only be printed");
    }

    let repo = GitRepository::new(root, SystemRunner::new())
        .with_remote(config.remote.clone())
        .with_dry_run(args.dry_run);

    run_release_workflow(&repo, &config, prompt, args.close)
}

/// Main release workflow
///
/// Orchestrates the entire release:
/// 1. Guard against uncommitted changes (prompt to discard or abort)
/// 2. Resolve the last tag and compute the next version
/// 3. Start the release branch unless it already exists
/// 4. Finish and push the release when `close` is set
///
/// # Arguments
///
/// * `repo` - Working copy to operate on
/// * `config` - Branch names, remote and versioning settings
/// * `prompt` - Source of the operator's answer to the discard question
/// * `close` - Whether to run the finish sequence
///
/// # Returns
///
/// What the run did, or the first error. Declining the discard question is
/// `ReleaseError::Aborted`.
pub fn run_release_workflow<R: CommandRunner>(
    repo: &GitRepository<R>,
    config: &Config,
    prompt: &mut dyn Prompt,
    close: bool,
) -> Result<WorkflowResult> {
    info!("Releasing from {}", repo.root().display());

    let discarded_changes = ensure_clean_worktree(repo, prompt)?;

    let resolved = resolve_version(repo, config)?;
    ui::display_release_plan(&resolved.last_tag_display(), &resolved.next.to_string());

    let branch = config.release_branch(resolved.next);
    let branch_created = if release_branch_exists(repo, &branch)? {
        ui::display_status(&format!(
            "Release branch {} already exists.",
            branch.name()
        ));
        false
    } else {
        start_release(repo, config, &branch)?;
        if repo.is_dry_run() {
            ui::display_status(&format!("Would start release {}", resolved.next));
        } else {
            ui::display_success(&format!("Started release {}", resolved.next));
        }
        !repo.is_dry_run()
    };

    if close {
        finish_release(repo, config, &branch)?;
        if repo.is_dry_run() {
            ui::display_status(&format!("Would finish and push release {}", resolved.next));
        } else {
            ui::display_success(&format!("Finished and pushed release {}", resolved.next));
        }
    } else if repo.is_dry_run() {
        ui::display_status("Release would be left unfinished. Use --close to finish and push.");
    } else {
        ui::display_status("Release started but not finished. Use --close to finish and push.");
    }

    Ok(WorkflowResult {
        last_tag: resolved.last_tag_display(),
        version: resolved.next,
        branch: branch.name().to_string(),
        discarded_changes,
        branch_created,
        finished: close && !repo.is_dry_run(),
    })
}

/// Make sure the working copy has no local modifications.
///
/// A dirty tree is only discarded after the operator confirms; any other
/// answer aborts the run before another git command is issued.
///
/// # Returns
///
/// * `Ok(false)` - The tree was already clean, nothing was asked
/// * `Ok(true)` - The operator agreed and local changes were discarded
/// * `Ok(false)` on a dry run even when the operator agreed, since nothing was touched
/// * `Err(ReleaseError::Aborted)` - The operator declined
pub fn ensure_clean_worktree<R: CommandRunner>(
    repo: &GitRepository<R>,
    prompt: &mut dyn Prompt,
) -> Result<bool> {
    if !repo.has_uncommitted_changes()? {
        return Ok(false);
    }

    if !ui::confirm(prompt, DISCARD_QUESTION)? {
        ui::display_status("Aborting release process due to uncommitted changes.");
        return Err(ReleaseError::aborted(
            "uncommitted changes were not discarded",
        ));
    }

    repo.discard_local_changes()?;
    if repo.is_dry_run() {
        ui::display_status("Would discard uncommitted changes.");
        return Ok(false);
    }

    ui::display_success("Uncommitted changes discarded.");
    Ok(true)
}

/// Read the most recent tag and compute the next release version.
///
/// Without any reachable tag the baseline `0.0.0` is used. A tag that is not
/// a `major.minor.patch` version is an error.
pub fn resolve_version<R: CommandRunner>(
    repo: &GitRepository<R>,
    config: &Config,
) -> Result<ResolvedVersion> {
    let last_tag = repo.describe_latest_tag()?;

    let current = match &last_tag {
        Some(tag) => Version::from_tag(tag, &config.versioning.tag_prefix)?,
        None => {
            let warning = BoundaryWarning::NoReachableTag {
                baseline: Version::BASELINE,
            };
            info!("{}", warning);
            ui::display_boundary_warning(&warning);
            Version::BASELINE
        }
    };

    let next = current.next_release(config.versioning.minor_rollover)?;
    info!("Resolved release {} from {}", next, current);

    Ok(ResolvedVersion {
        last_tag,
        current,
        next,
    })
}

/// Whether the release branch already exists locally.
///
/// A failed branch listing counts as "does not exist".
pub fn release_branch_exists<R: CommandRunner>(
    repo: &GitRepository<R>,
    branch: &ReleaseBranch,
) -> Result<bool> {
    let listing = repo.list_branches(branch.name())?;

    if listing.success() {
        return Ok(branch.is_listed_in(&listing.stdout));
    }

    let warning = BoundaryWarning::BranchListingFailed {
        branch: branch.name().to_string(),
        reason: listing.stderr,
    };
    info!("{}", warning);
    ui::display_boundary_warning(&warning);
    Ok(false)
}

/// Create the release branch with git-flow and publish it.
///
/// Syncs trunk and development first. Every step is fatal on failure.
pub fn start_release<R: CommandRunner>(
    repo: &GitRepository<R>,
    config: &Config,
    branch: &ReleaseBranch,
) -> Result<()> {
    let version = branch.version().to_string();

    repo.sync_branch(&config.branches.trunk)?;
    repo.sync_branch(&config.branches.development)?;
    repo.flow_release_start(&version)?;
    repo.push_branch(branch.name())
}

/// Finish the release with git-flow and push trunk, development and the tag.
///
/// Syncs trunk, development and the release branch first. Every step is fatal
/// on failure and merges already performed are not undone.
pub fn finish_release<R: CommandRunner>(
    repo: &GitRepository<R>,
    config: &Config,
    branch: &ReleaseBranch,
) -> Result<()> {
    let version = branch.version();
    let trunk = &config.branches.trunk;
    let development = &config.branches.development;

    repo.sync_branch(trunk)?;
    repo.sync_branch(development)?;
    repo.sync_branch(branch.name())?;
    repo.flow_release_finish(&version.to_string(), &config.release_message(version))?;

    repo.checkout(trunk)?;
    repo.push_branch(trunk)?;
    repo.checkout(development)?;
    repo.push_branch(development)?;
    repo.push_tag(&config.tag_name(version))
}
