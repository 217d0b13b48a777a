use std::fmt;

/// Non-fatal conditions met while planning a release.
/// These should be reported to the user, the run decides whether to continue.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No new commits since the latest release tag
    NoNewCommits {
        latest_tag: String,
        current_commit_hash: String,
    },
    /// Commits exist but none of them warrants a release
    NoReleaseWorthyCommits { commit_count: usize },
    /// Tag follows the tag format but does not hold a valid version
    UnparsableTag { tag: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits {
                latest_tag,
                current_commit_hash,
            } => {
                let short_hash = current_commit_hash
                    .get(..7)
                    .unwrap_or(current_commit_hash.as_str());
                write!(
                    f,
                    "No new commits since tag '{}' (current: {})",
                    latest_tag, short_hash
                )
            }
            BoundaryWarning::NoReleaseWorthyCommits { commit_count } => {
                write!(
                    f,
                    "None of the {} commits since the last release triggers a release",
                    commit_count
                )
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
        }
    }
}
