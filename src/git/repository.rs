use crate::error::Result;
use crate::git::{CommandOutput, CommandRunner, GitCommand};
use crate::ui;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A working copy driven through git commands
///
/// Read-only queries always run. Mutating commands (checkout, pull, push,
/// reset, clean, git-flow operations) are only reported when dry-run is on.
pub struct GitRepository<R: CommandRunner> {
    root: PathBuf,
    runner: R,
    remote: String,
    dry_run: bool,
}

impl<R: CommandRunner> GitRepository<R> {
    /// Wrap the working copy at `root`, using `origin` as remote
    pub fn new(root: impl Into<PathBuf>, runner: R) -> Self {
        GitRepository {
            root: root.into(),
            runner,
            remote: "origin".to_string(),
            dry_run: false,
        }
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn output(&self, args: &[&str]) -> Result<(GitCommand, CommandOutput)> {
        let command = GitCommand::new(args.iter().copied());
        let output = self.runner.run(&command, &self.root)?;
        Ok((command, output))
    }

    /// Run a query whose failure is fatal
    fn query(&self, args: &[&str]) -> Result<String> {
        let (command, output) = self.output(args)?;
        output.into_result(&command)
    }

    /// Run a command that changes the repository or the remote
    fn execute(&self, args: &[&str]) -> Result<()> {
        if self.dry_run {
            let command = GitCommand::new(args.iter().copied());
            info!("Dry run, skipping `{}`", command);
            ui::display_dry_run(&command);
            return Ok(());
        }

        self.query(args).map(|_| ())
    }

    /// Most recent tag reachable from HEAD, `None` when there is none
    ///
    /// Any failure of `git describe` is read as "no tag yet".
    pub fn describe_latest_tag(&self) -> Result<Option<String>> {
        let (command, output) = self.output(&["describe", "--tags", "--abbrev=0"])?;

        if output.success() {
            let tag = output.stdout.trim();
            Ok((!tag.is_empty()).then(|| tag.to_string()))
        } else {
            debug!("`{}` found no tag: {}", command, output.stderr.trim());
            Ok(None)
        }
    }

    /// Raw output of `git branch --list <pattern>`
    ///
    /// The caller decides what a failed listing means.
    pub fn list_branches(&self, pattern: &str) -> Result<CommandOutput> {
        let (_, output) = self.output(&["branch", "--list", pattern])?;
        Ok(output)
    }

    /// Raw `git status --porcelain` output
    pub fn status_porcelain(&self) -> Result<String> {
        self.query(&["status", "--porcelain"])
    }

    pub fn has_uncommitted_changes(&self) -> Result<bool> {
        Ok(!self.status_porcelain()?.trim().is_empty())
    }

    /// Throw away tracked modifications and untracked files
    pub fn discard_local_changes(&self) -> Result<()> {
        self.execute(&["reset", "--hard"])?;
        self.execute(&["clean", "-fd"])
    }

    pub fn checkout(&self, branch: &str) -> Result<()> {
        self.execute(&["checkout", branch])
    }

    pub fn pull(&self, branch: &str) -> Result<()> {
        self.execute(&["pull", self.remote.as_str(), branch])
    }

    /// Check out `branch` and pull it from the remote
    pub fn sync_branch(&self, branch: &str) -> Result<()> {
        info!("Syncing {} from {}", branch, self.remote);
        self.checkout(branch)?;
        self.pull(branch)
    }

    pub fn push_branch(&self, branch: &str) -> Result<()> {
        info!("Pushing {} to {}", branch, self.remote);
        self.execute(&["push", self.remote.as_str(), branch])
    }

    pub fn push_tag(&self, tag: &str) -> Result<()> {
        info!("Pushing tag {} to {}", tag, self.remote);
        let refspec = format!("refs/tags/{}", tag);
        self.execute(&["push", self.remote.as_str(), refspec.as_str()])
    }

    /// `git flow release start <version>`
    pub fn flow_release_start(&self, version: &str) -> Result<()> {
        info!("Starting git-flow release {}", version);
        self.execute(&["flow", "release", "start", version])
    }

    /// `git flow release finish -m <message> <version>`
    pub fn flow_release_finish(&self, version: &str, message: &str) -> Result<()> {
        info!("Finishing git-flow release {}", version);
        self.execute(&["flow", "release", "finish", "-m", message, version])
    }
}
