use crate::domain::Version;
use std::fmt;

/// Expected absences met while resolving a release.
/// These are recovered with a fallback and reported to the user, never fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// `git describe` found no reachable tag
    NoReachableTag { baseline: Version },
    /// `git branch --list` failed, the branch is treated as absent
    BranchListingFailed { branch: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoReachableTag { baseline } => {
                write!(f, "No tag reachable from HEAD, starting from {}", baseline)
            }
            BoundaryWarning::BranchListingFailed { branch, reason } => {
                let reason = reason.trim();
                if reason.is_empty() {
                    write!(
                        f,
                        "Could not list branch '{}', assuming it does not exist",
                        branch
                    )
                } else {
                    write!(
                        f,
                        "Could not list branch '{}' ({}), assuming it does not exist",
                        branch, reason
                    )
                }
            }
        }
    }
}
