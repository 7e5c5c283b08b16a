use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Minor component value at which a release rolls over into the next major.
pub const DEFAULT_MINOR_ROLLOVER: u64 = 10;

/// Release version (major.minor.patch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Version assumed when the repository has no reachable tag yet.
    pub const BASELINE: Version = Version::new(0, 0, 0);

    /// Create a new version
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string such as "1.2.3" (an optional `v`/`V` prefix is accepted)
    ///
    /// Exactly three numeric components are required. Pre-release and build
    /// metadata (`1.2.0-rc.1`, `1.2.0+build`) are accepted and discarded.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let clean = trimmed
            .strip_prefix(|c: char| c == 'v' || c == 'V')
            .unwrap_or(trimmed);

        let parsed = semver::Version::parse(clean).map_err(|e| {
            ReleaseError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z ({})",
                trimmed, e
            ))
        })?;

        Ok(Version::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Parse a tag name, stripping the configured tag prefix first
    pub fn from_tag(tag: &str, tag_prefix: &str) -> Result<Self> {
        let tag = tag.trim();
        let without_prefix = tag.strip_prefix(tag_prefix).unwrap_or(tag);
        Version::parse(without_prefix)
    }

    /// Compute the next release version
    ///
    /// The minor component is incremented; once it reaches `minor_rollover`
    /// the major component is incremented and minor starts over at 0. The
    /// patch component of a new release is always 0.
    ///
    /// Fails when the incremented component no longer fits in a `u64`.
    pub fn next_release(&self, minor_rollover: u64) -> Result<Self> {
        let minor = self.minor.checked_add(1).ok_or_else(|| self.overflow())?;
        if minor < minor_rollover {
            return Ok(Version::new(self.major, minor, 0));
        }

        let major = self.major.checked_add(1).ok_or_else(|| self.overflow())?;
        Ok(Version::new(major, 0, 0))
    }

    fn overflow(&self) -> ReleaseError {
        ReleaseError::version(format!("Cannot compute the release after {}", self))
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::BASELINE
    }
}

impl FromStr for Version {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
