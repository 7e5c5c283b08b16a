// tests/integration_test.rs
use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_git-flow-release");

#[test]
fn test_help() {
    let output = Command::new(BIN)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("git-flow-release"));
    assert!(stdout.contains("--close"));
}

#[test]
fn test_version_flag() {
    let output = Command::new(BIN)
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_repo_path_exits_with_one() {
    let output = Command::new(BIN)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_nonexistent_repo_path_exits_with_one() {
    let output = Command::new(BIN)
        .arg("/nonexistent/git-flow-release/repo")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid repository path"), "stderr: {}", stderr);
}

/// Runs against real repositories built with git2 and the installed `git`.
#[cfg(test)]
mod git_operations_tests {
    use git2::{Repository, Signature};
    use git_flow_release::git::{GitRepository, SystemRunner};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    // Helper function to setup a temporary git repo with one commit
    fn setup_test_repo() -> (TempDir, Repository) {
        let temp_dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        fs::write(temp_dir.path().join("README.md"), b"Initial content\n")
            .expect("Could not write initial file");

        let mut index = repo.index().expect("Could not get index");
        index
            .add_path(Path::new("README.md"))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        {
            let tree = repo.find_tree(tree_id).expect("Could not find tree");
            let sig = Signature::now("Test User", "test@example.com").unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
                .expect("Could not create commit");
        }

        (temp_dir, repo)
    }

    fn open(dir: &TempDir) -> GitRepository<SystemRunner> {
        GitRepository::new(dir.path(), SystemRunner::new())
    }

    fn head_commit(repo: &Repository) -> git2::Commit<'_> {
        repo.head().unwrap().peel_to_commit().unwrap()
    }

    #[test]
    fn test_describe_without_tags_is_none() {
        let (dir, _repo) = setup_test_repo();
        assert_eq!(open(&dir).describe_latest_tag().unwrap(), None);
    }

    #[test]
    fn test_describe_finds_lightweight_tag() {
        let (dir, repo) = setup_test_repo();
        let head = head_commit(&repo);
        repo.tag_lightweight("1.4.0", head.as_object(), false)
            .expect("Could not create tag");

        assert_eq!(
            open(&dir).describe_latest_tag().unwrap(),
            Some("1.4.0".to_string())
        );
    }

    #[test]
    fn test_status_detects_untracked_and_modified_files() {
        let (dir, _repo) = setup_test_repo();
        let git = open(&dir);
        assert!(!git.has_uncommitted_changes().unwrap());

        fs::write(dir.path().join("scratch.txt"), b"temp\n").unwrap();
        assert!(git.has_uncommitted_changes().unwrap());
    }

    #[test]
    fn test_discard_local_changes_restores_clean_tree() {
        let (dir, _repo) = setup_test_repo();
        let git = open(&dir);

        fs::write(dir.path().join("README.md"), b"edited\n").unwrap();
        fs::create_dir(dir.path().join("build")).unwrap();
        fs::write(dir.path().join("build").join("out.txt"), b"artifact\n").unwrap();
        assert!(git.has_uncommitted_changes().unwrap());

        git.discard_local_changes().unwrap();

        assert!(!git.has_uncommitted_changes().unwrap());
        assert!(!dir.path().join("build").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("README.md")).unwrap(),
            "Initial content\n"
        );
    }

    #[test]
    fn test_list_branches_reports_release_branch() {
        let (dir, repo) = setup_test_repo();
        let git = open(&dir);

        let before = git.list_branches("release/0.1.0").unwrap();
        assert!(before.success());
        assert!(!before.stdout.contains("release/0.1.0"));

        repo.branch("release/0.1.0", &head_commit(&repo), false)
            .expect("Could not create branch");

        let after = git.list_branches("release/0.1.0").unwrap();
        assert!(after.stdout.contains("release/0.1.0"));
    }

    #[test]
    fn test_checkout_unknown_branch_is_command_error() {
        let (dir, _repo) = setup_test_repo();
        let err = open(&dir).checkout("no-such-branch").unwrap_err();
        assert!(err.to_string().contains("git checkout no-such-branch"));
    }
}

/// End-to-end runs of the binary with a scripted `git` first on `PATH`.
#[cfg(unix)]
mod end_to_end_tests {
    use super::BIN;
    use std::fs;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use std::process::{Command, Output, Stdio};
    use tempfile::TempDir;

    const FAKE_GIT: &str = r#"#!/bin/sh
echo "$*" >> "$FAKE_GIT_STATE/calls.log"
case "$1" in
  describe)
    echo "fatal: No names found, cannot describe anything." >&2
    exit 128 ;;
  status)
    if [ -f "$FAKE_GIT_STATE/status" ]; then cat "$FAKE_GIT_STATE/status"; fi
    exit 0 ;;
  branch)
    if [ -f "$FAKE_GIT_STATE/release-branch" ]; then echo "  $3"; fi
    exit 0 ;;
  flow)
    if [ "$3" = "start" ]; then touch "$FAKE_GIT_STATE/release-branch"; fi
    exit 0 ;;
  push)
    if [ -f "$FAKE_GIT_STATE/reject-push" ]; then
      echo "remote: rejected" >&2
      exit 1
    fi
    exit 0 ;;
  *)
    exit 0 ;;
esac
"#;

    struct Sandbox {
        bin_dir: TempDir,
        state: TempDir,
        repo: TempDir,
        home: TempDir,
    }

    impl Sandbox {
        fn new() -> Self {
            let sandbox = Sandbox {
                bin_dir: TempDir::new().unwrap(),
                state: TempDir::new().unwrap(),
                repo: TempDir::new().unwrap(),
                home: TempDir::new().unwrap(),
            };

            let git = sandbox.bin_dir.path().join("git");
            fs::write(&git, FAKE_GIT).unwrap();
            fs::set_permissions(&git, fs::Permissions::from_mode(0o755)).unwrap();

            sandbox
        }

        fn state_file(&self, name: &str) -> std::path::PathBuf {
            self.state.path().join(name)
        }

        fn run(&self, extra_args: &[&str], stdin: &str) -> Output {
            let path = format!(
                "{}:{}",
                self.bin_dir.path().display(),
                std::env::var("PATH").unwrap_or_default()
            );

            let mut child = Command::new(BIN)
                .arg(self.repo.path())
                .args(extra_args)
                .env("PATH", path)
                .env("FAKE_GIT_STATE", self.state.path())
                .env("HOME", self.home.path())
                .env("XDG_CONFIG_HOME", self.home.path())
                .env_remove("CLICOLOR_FORCE")
                .env_remove("RUST_LOG")
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .expect("Failed to spawn binary");

            child
                .stdin
                .take()
                .unwrap()
                .write_all(stdin.as_bytes())
                .unwrap();

            child.wait_with_output().unwrap()
        }

        fn calls(&self) -> Vec<String> {
            let log = self.state_file("calls.log");
            if !Path::new(&log).exists() {
                return Vec::new();
            }
            fs::read_to_string(log)
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn stdout(output: &Output) -> String {
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    #[test]
    fn test_first_release_then_rerun() {
        let sandbox = Sandbox::new();

        let first = sandbox.run(&[], "");
        assert!(first.status.success(), "stderr: {}", String::from_utf8_lossy(&first.stderr));
        let out = stdout(&first);
        assert!(out.contains("Last tag: 0.0.0"), "stdout: {}", out);
        assert!(out.contains("New release version: 0.1.0"), "stdout: {}", out);
        assert!(out.contains("Started release 0.1.0"), "stdout: {}", out);
        assert!(out.contains("Use --close to finish and push."), "stdout: {}", out);

        let calls = sandbox.calls();
        assert!(calls.contains(&"flow release start 0.1.0".to_string()));
        assert!(calls.contains(&"push origin release/0.1.0".to_string()));
        assert!(!calls.iter().any(|c| c.starts_with("flow release finish")));

        let second = sandbox.run(&[], "");
        assert!(second.status.success());
        let out = stdout(&second);
        assert!(
            out.contains("Release branch release/0.1.0 already exists."),
            "stdout: {}",
            out
        );

        let starts = sandbox
            .calls()
            .iter()
            .filter(|c| c.starts_with("flow release start"))
            .count();
        assert_eq!(starts, 1);
    }

    #[test]
    fn test_close_finishes_and_pushes_tag() {
        let sandbox = Sandbox::new();

        let output = sandbox.run(&["--close"], "");
        assert!(output.status.success());
        assert!(stdout(&output).contains("Finished and pushed release 0.1.0"));

        let calls = sandbox.calls();
        assert!(calls.contains(&"flow release finish -m Release 0.1.0 0.1.0".to_string()));
        assert_eq!(
            calls.last().map(String::as_str),
            Some("push origin refs/tags/0.1.0")
        );
    }

    #[test]
    fn test_declining_discard_exits_with_one() {
        let sandbox = Sandbox::new();
        fs::write(sandbox.state_file("status"), " M src/lib.rs\n").unwrap();

        let output = sandbox.run(&[], "n\n");
        assert_eq!(output.status.code(), Some(1));

        let out = stdout(&output);
        assert!(out.contains("Discard them and proceed? (y/n)"), "stdout: {}", out);
        assert!(out.contains("Aborting release process"), "stdout: {}", out);
        assert_eq!(sandbox.calls(), vec!["status --porcelain"]);
    }

    #[test]
    fn test_accepting_discard_resets_and_cleans() {
        let sandbox = Sandbox::new();
        fs::write(sandbox.state_file("status"), "?? junk.txt\n").unwrap();

        let output = sandbox.run(&[], "y\n");
        assert!(output.status.success());
        assert!(stdout(&output).contains("Uncommitted changes discarded."));

        let calls = sandbox.calls();
        assert_eq!(&calls[..3], ["status --porcelain", "reset --hard", "clean -fd"]);
    }

    #[test]
    fn test_failed_push_reports_command_and_streams() {
        let sandbox = Sandbox::new();
        fs::write(sandbox.state_file("reject-push"), "").unwrap();

        let output = sandbox.run(&[], "");
        assert_eq!(output.status.code(), Some(1));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("git push origin release/0.1.0"), "stderr: {}", stderr);
        assert!(stderr.contains("remote: rejected"), "stderr: {}", stderr);
    }

    #[test]
    fn test_dry_run_does_not_touch_repository() {
        let sandbox = Sandbox::new();

        let output = sandbox.run(&["--dry-run", "--close"], "");
        assert!(output.status.success());
        let out = stdout(&output);
        assert!(out.contains("Would run: git flow release start 0.1.0"), "stdout: {}", out);
        assert!(out.contains("Would finish and push release 0.1.0"), "stdout: {}", out);
        assert!(!out.contains("Started release"), "stdout: {}", out);
        assert!(!out.contains("Finished and pushed"), "stdout: {}", out);

        assert_eq!(
            sandbox.calls(),
            vec![
                "status --porcelain",
                "describe --tags --abbrev=0",
                "branch --list release/0.1.0"
            ]
        );
    }
}
