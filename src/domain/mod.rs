//! Domain logic - pure release rules independent of git operations

pub mod branch;
pub mod version;

pub use branch::ReleaseBranch;
pub use version::{Version, DEFAULT_MINOR_ROLLOVER};
