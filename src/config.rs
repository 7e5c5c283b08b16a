use crate::domain::{ReleaseBranch, Version, DEFAULT_MINOR_ROLLOVER};
use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the repository root and the user config directory.
pub const CONFIG_FILE_NAME: &str = "gitflowrelease.toml";

/// Represents the complete configuration for git-flow-release.
///
/// Every field has a default, so an empty file (or no file at all) drives the
/// standard `master` / `development` / `release/` git-flow layout against `origin`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub branches: BranchesConfig,

    #[serde(default)]
    pub versioning: VersioningConfig,

    #[serde(default)]
    pub release: ReleaseConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_trunk() -> String {
    "master".to_string()
}

fn default_development() -> String {
    "development".to_string()
}

fn default_release_prefix() -> String {
    "release/".to_string()
}

fn default_minor_rollover() -> u64 {
    DEFAULT_MINOR_ROLLOVER
}

fn default_release_message() -> String {
    "Release {version}".to_string()
}

/// Names of the long-lived branches and the release branch prefix.
///
/// The prefix must match git-flow's own `gitflow.prefix.release` setting.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchesConfig {
    #[serde(default = "default_trunk")]
    pub trunk: String,

    #[serde(default = "default_development")]
    pub development: String,

    #[serde(default = "default_release_prefix")]
    pub release_prefix: String,
}

impl Default for BranchesConfig {
    fn default() -> Self {
        BranchesConfig {
            trunk: default_trunk(),
            development: default_development(),
            release_prefix: default_release_prefix(),
        }
    }
}

/// Version computation settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersioningConfig {
    /// Minor value that rolls the release over into the next major
    #[serde(default = "default_minor_rollover")]
    pub minor_rollover: u64,

    /// Prefix git-flow puts in front of version tags (`gitflow.prefix.versiontag`)
    #[serde(default)]
    pub tag_prefix: String,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        VersioningConfig {
            minor_rollover: default_minor_rollover(),
            tag_prefix: String::new(),
        }
    }
}

/// Settings for finishing a release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Tag message template, `{version}` is replaced by the release version
    #[serde(default = "default_release_message")]
    pub message: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            message: default_release_message(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            branches: BranchesConfig::default(),
            versioning: VersioningConfig::default(),
            release: ReleaseConfig::default(),
        }
    }
}

impl Config {
    /// Rejects settings that would produce broken git commands.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("remote", &self.remote),
            ("branches.trunk", &self.branches.trunk),
            ("branches.development", &self.branches.development),
            ("branches.release_prefix", &self.branches.release_prefix),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ReleaseError::config(format!("'{}' must not be empty", key)));
            }
        }

        if self.branches.trunk == self.branches.development {
            return Err(ReleaseError::config(format!(
                "trunk and development branches must differ (both are '{}')",
                self.branches.trunk
            )));
        }

        if self.versioning.minor_rollover == 0 {
            return Err(ReleaseError::config(
                "'versioning.minor_rollover' must be at least 1",
            ));
        }

        if !self.release.message.contains("{version}") {
            return Err(ReleaseError::config(
                "'release.message' must contain the {version} placeholder",
            ));
        }

        Ok(())
    }

    /// Release branch for `version`
    pub fn release_branch(&self, version: Version) -> ReleaseBranch {
        ReleaseBranch::new(&self.branches.release_prefix, version)
    }

    /// Tag name git-flow creates when finishing `version`
    pub fn tag_name(&self, version: Version) -> String {
        format!("{}{}", self.versioning.tag_prefix, version)
    }

    /// Tag message passed to `git flow release finish`
    pub fn release_message(&self, version: Version) -> String {
        self.release.message.replace("{version}", &version.to_string())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitflowrelease.toml` in the repository root
/// 3. `gitflowrelease.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// The loaded configuration is validated before it is returned.
pub fn load_config(config_path: Option<&Path>, repo_root: &Path) -> Result<Config> {
    let config = match locate_config(config_path, repo_root) {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            let contents = fs::read_to_string(&path).map_err(|e| {
                ReleaseError::config(format!("Cannot read '{}': {}", path.display(), e))
            })?;
            toml::from_str(&contents)?
        }
        None => {
            debug!("No configuration file found, using defaults");
            Config::default()
        }
    };

    config.validate()?;
    Ok(config)
}

fn locate_config(config_path: Option<&Path>, repo_root: &Path) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    let in_repo = repo_root.join(CONFIG_FILE_NAME);
    if in_repo.exists() {
        return Some(in_repo);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}
