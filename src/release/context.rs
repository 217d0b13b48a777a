use crate::domain::{BranchContext, Version, VersionBump};
use crate::error::Result;
use crate::git::CommitInfo;
use chrono::NaiveDate;

/// A release already published in the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: Version,
    pub git_tag: String,
    /// Commit the tag points to, when known
    pub git_head: Option<String>,
}

impl Release {
    pub fn new(version: Version, git_tag: impl Into<String>) -> Self {
        Release {
            version,
            git_tag: git_tag.into(),
            git_head: None,
        }
    }

    /// Build a release from raw version text, failing on malformed input
    pub fn parse(version: &str, git_tag: impl Into<String>) -> Result<Self> {
        Ok(Release::new(Version::parse(version)?, git_tag))
    }

    pub fn with_head(mut self, git_head: impl Into<String>) -> Self {
        self.git_head = Some(git_head.into());
        self
    }
}

/// The release about to be made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextRelease {
    pub version: Version,
    pub git_tag: String,
    /// Bump chosen by commit analysis, `None` when supplied from outside
    pub bump: Option<VersionBump>,
}

impl NextRelease {
    pub fn new(version: Version, git_tag: impl Into<String>) -> Self {
        NextRelease {
            version,
            git_tag: git_tag.into(),
            bump: None,
        }
    }
}

/// Per-run data threaded through the release pipeline.
///
/// Built fresh for each run and never mutated in place; steps that change the
/// next release derive a new context with [`ReleaseContext::with_next_release`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseContext {
    pub branch: BranchContext,
    pub last_release: Option<Release>,
    pub next_release: NextRelease,
    /// Commits included in this release, oldest first
    pub commits: Vec<CommitInfo>,
    pub date: NaiveDate,
}

impl ReleaseContext {
    pub fn new(
        branch: BranchContext,
        last_release: Option<Release>,
        next_release: NextRelease,
    ) -> Self {
        ReleaseContext {
            branch,
            last_release,
            next_release,
            commits: Vec::new(),
            date: chrono::Local::now().date_naive(),
        }
    }

    pub fn with_commits(mut self, commits: Vec<CommitInfo>) -> Self {
        self.commits = commits;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Copy of this context with a different next version and tag
    pub fn with_next_release(&self, version: Version, git_tag: String) -> Self {
        ReleaseContext {
            next_release: NextRelease {
                version,
                git_tag,
                bump: self.next_release.bump,
            },
            ..self.clone()
        }
    }
}
