//! Analysis engine: commit bump detection and tentative next version

pub mod commit_analyzer;
pub mod next_version;

pub use commit_analyzer::CommitAnalyzer;
pub use next_version::next_version;
