use crate::config::ConventionalCommitsConfig;
use crate::domain::{ParsedCommit, VersionBump};
use crate::git::CommitInfo;

/// Analyzes commits to determine the version bump type
pub struct CommitAnalyzer {
    config: ConventionalCommitsConfig,
}

impl CommitAnalyzer {
    /// Create a new commit analyzer
    pub fn new(config: ConventionalCommitsConfig) -> Self {
        CommitAnalyzer { config }
    }

    pub fn parse(&self, message: &str) -> ParsedCommit {
        ParsedCommit::parse_with_indicators(message, &self.config.breaking_change_indicators)
    }

    /// Analyze commits and determine the version bump
    pub fn analyze(&self, commits: &[CommitInfo]) -> Option<VersionBump> {
        let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
        self.analyze_messages(&messages)
    }

    /// Analyze commit messages and determine the version bump.
    ///
    /// Returns `None` when no commit warrants a release.
    pub fn analyze_messages<S: AsRef<str>>(&self, messages: &[S]) -> Option<VersionBump> {
        let mut bump = None;

        for message in messages {
            let parsed = self.parse(message.as_ref());

            // Breaking changes win outright
            if parsed.is_breaking_change {
                return Some(VersionBump::Major);
            }

            let commit_bump = if self.config.minor_types.contains(&parsed.r#type) {
                Some(VersionBump::Minor)
            } else if self.config.patch_types.contains(&parsed.r#type) {
                Some(VersionBump::Patch)
            } else {
                None
            };

            bump = bump.max(commit_bump);
        }

        bump
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> CommitAnalyzer {
        CommitAnalyzer::new(ConventionalCommitsConfig::default())
    }

    #[test]
    fn test_analyze_major() {
        let messages = vec!["feat: new feature", "fix(api)!: breaking change"];
        assert_eq!(analyzer().analyze_messages(&messages), Some(VersionBump::Major));
    }

    #[test]
    fn test_analyze_minor() {
        let messages = vec!["fix: bug fix", "feat: new feature"];
        assert_eq!(analyzer().analyze_messages(&messages), Some(VersionBump::Minor));
    }

    #[test]
    fn test_analyze_patch() {
        let messages = vec!["fix: bug fix", "perf: faster lookups"];
        assert_eq!(analyzer().analyze_messages(&messages), Some(VersionBump::Patch));
    }

    #[test]
    fn test_analyze_no_release() {
        let messages = vec![
            "docs: update readme",
            "chore: update deps",
            "style: format code",
            "Merge branch 'beta' into alpha",
        ];
        assert_eq!(analyzer().analyze_messages(&messages), None);
    }

    #[test]
    fn test_analyze_empty() {
        let messages: Vec<String> = vec![];
        assert_eq!(analyzer().analyze_messages(&messages), None);
    }

    #[test]
    fn test_analyze_breaking_change_via_footer() {
        let messages = vec!["fix: rename API field\n\nBREAKING CHANGE: field changed from X to Y"];
        assert_eq!(analyzer().analyze_messages(&messages), Some(VersionBump::Major));
    }

    #[test]
    fn test_analyze_custom_types() {
        let config = ConventionalCommitsConfig {
            minor_types: vec!["feature".to_string()],
            patch_types: vec!["docs".to_string()],
            ..ConventionalCommitsConfig::default()
        };
        let analyzer = CommitAnalyzer::new(config);

        assert_eq!(
            analyzer.analyze_messages(&["docs: typo"]),
            Some(VersionBump::Patch)
        );
        assert_eq!(
            analyzer.analyze_messages(&["feature: search"]),
            Some(VersionBump::Minor)
        );
        assert_eq!(analyzer.analyze_messages(&["feat: search"]), None);
    }

    #[test]
    fn test_analyze_commit_infos() {
        let commits = vec![
            CommitInfo {
                hash: "a1".to_string(),
                message: "fix(ui): button styling".to_string(),
                author: "dev".to_string(),
            },
            CommitInfo {
                hash: "b2".to_string(),
                message: "feat(auth): add oauth support".to_string(),
                author: "dev".to_string(),
            },
        ];
        assert_eq!(analyzer().analyze(&commits), Some(VersionBump::Minor));
    }
}
