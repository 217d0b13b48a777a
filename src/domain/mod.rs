//! Domain logic - pure release rules independent of git operations

pub mod branch;
pub mod channel;
pub mod commit;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use channel::Channel;
pub use commit::ParsedCommit;
pub use tag::TagPattern;
pub use version::{Version, VersionBump};
