use crate::domain::Version;

/// A git-flow release branch (e.g. `release/1.3.0`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseBranch {
    name: String,
    version: Version,
}

impl ReleaseBranch {
    /// Create the release branch for `version` under the given branch prefix
    pub fn new(prefix: &str, version: Version) -> Self {
        ReleaseBranch {
            name: format!("{}{}", prefix, version),
            version,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Check whether a `git branch --list` output mentions this branch
    ///
    /// This is a literal substring check on the listing text.
    pub fn is_listed_in(&self, listing: &str) -> bool {
        listing.contains(&self.name)
    }
}
