use crate::config::ConventionalCommitsConfig;
use crate::domain::ParsedCommit;
use crate::error::Result;
use crate::git::CommitInfo;
use crate::notes::{NotesConfig, NotesGenerator};
use crate::release::ReleaseContext;

/// Commit types shown in the notes, in display order
const SECTIONS: [(&str, &str); 4] = [
    ("feat", "Features"),
    ("fix", "Bug Fixes"),
    ("perf", "Performance Improvements"),
    ("revert", "Reverts"),
];

/// Markdown notes in the conventional-changelog layout
///
/// ```text
/// # [1.2.0-alpha.1](https://host/org/repo/compare/v1.1.0...v1.2.0-alpha.1) (2024-05-01)
///
/// ### Features
///
/// * **api:** add search endpoint ([abc1234](https://host/org/repo/commit/abc1234...))
/// ```
pub struct ConventionalNotesGenerator {
    breaking_change_indicators: Vec<String>,
}

impl ConventionalNotesGenerator {
    pub fn new(config: &ConventionalCommitsConfig) -> Self {
        ConventionalNotesGenerator {
            breaking_change_indicators: config.breaking_change_indicators.clone(),
        }
    }

    fn header(&self, config: &NotesConfig, context: &ReleaseContext) -> String {
        let next = &context.next_release;
        // Patch releases get a smaller heading
        let level = if next.version.patch() == 0 { "#" } else { "##" };

        let title = match (&config.repository_url, &context.last_release) {
            (Some(url), Some(last)) => format!(
                "[{}]({}/compare/{}...{})",
                next.version, url, last.git_tag, next.git_tag
            ),
            _ => next.version.to_string(),
        };

        format!("{} {} ({})", level, title, context.date.format("%Y-%m-%d"))
    }

    fn entry(&self, config: &NotesConfig, commit: &CommitInfo, text: &str, scope: Option<&str>) -> String {
        let scope = scope.map(|s| format!("**{}:** ", s)).unwrap_or_default();
        let reference = match &config.repository_url {
            Some(url) => format!("[{}]({}/commit/{})", commit.short_hash(), url, commit.hash),
            None => commit.short_hash().to_string(),
        };
        format!("* {}{} ({})", scope, text, reference)
    }
}

impl Default for ConventionalNotesGenerator {
    fn default() -> Self {
        ConventionalNotesGenerator::new(&ConventionalCommitsConfig::default())
    }
}

impl NotesGenerator for ConventionalNotesGenerator {
    fn generate(&self, config: &NotesConfig, context: &ReleaseContext) -> Result<String> {
        let parsed: Vec<(&CommitInfo, ParsedCommit)> = context
            .commits
            .iter()
            .map(|commit| {
                let parsed = ParsedCommit::parse_with_indicators(
                    &commit.message,
                    &self.breaking_change_indicators,
                );
                (commit, parsed)
            })
            .collect();

        let mut blocks = vec![self.header(config, context)];

        let breaking: Vec<String> = parsed
            .iter()
            .filter_map(|(commit, p)| {
                p.breaking_note
                    .as_deref()
                    .map(|note| self.entry(config, commit, note, p.scope.as_deref()))
            })
            .collect();
        if !breaking.is_empty() {
            blocks.push(format!("### ⚠ BREAKING CHANGES\n\n{}", breaking.join("\n")));
        }

        for (commit_type, title) in SECTIONS {
            let entries: Vec<String> = parsed
                .iter()
                .filter(|(_, p)| p.is_conventional && p.r#type == commit_type)
                .map(|(commit, p)| self.entry(config, commit, &p.description, p.scope.as_deref()))
                .collect();

            if !entries.is_empty() {
                blocks.push(format!("### {}\n\n{}", title, entries.join("\n")));
            }
        }

        Ok(format!("{}\n", blocks.join("\n\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BranchContext, Channel, Version};
    use crate::release::{NextRelease, Release};
    use chrono::NaiveDate;

    fn commit(hash: &str, message: &str) -> CommitInfo {
        CommitInfo {
            hash: hash.to_string(),
            message: message.to_string(),
            author: "dev".to_string(),
        }
    }

    fn context(last: Option<&str>, next: &str, commits: Vec<CommitInfo>) -> ReleaseContext {
        ReleaseContext::new(
            BranchContext::prerelease("alpha", Channel::Alpha),
            last.map(|v| Release::parse(v, format!("v{}", v)).unwrap()),
            NextRelease::new(Version::parse(next).unwrap(), format!("v{}", next)),
        )
        .with_commits(commits)
        .with_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    #[test]
    fn test_sections_without_repository_url() {
        let ctx = context(
            Some("1.1.0"),
            "1.2.0-alpha.1",
            vec![
                commit("aaaaaaa1111", "feat(api): add search endpoint"),
                commit("bbbbbbb2222", "fix: handle empty query"),
                commit("ccccccc3333", "docs: update readme"),
            ],
        );

        let notes = ConventionalNotesGenerator::default()
            .generate(&NotesConfig::default(), &ctx)
            .unwrap();

        assert_eq!(
            notes,
            "# 1.2.0-alpha.1 (2024-05-01)\n\n\
             ### Features\n\n* **api:** add search endpoint (aaaaaaa)\n\n\
             ### Bug Fixes\n\n* handle empty query (bbbbbbb)\n"
        );
    }

    #[test]
    fn test_links_with_repository_url() {
        let config = NotesConfig {
            repository_url: Some("https://github.com/org/repo".to_string()),
        };
        let ctx = context(
            Some("1.1.0"),
            "1.2.0-alpha.1",
            vec![commit("aaaaaaa1111", "feat: preview")],
        );

        let notes = ConventionalNotesGenerator::default().generate(&config, &ctx).unwrap();

        assert!(notes.starts_with(
            "# [1.2.0-alpha.1](https://github.com/org/repo/compare/v1.1.0...v1.2.0-alpha.1) (2024-05-01)"
        ));
        assert!(notes.contains(
            "* preview ([aaaaaaa](https://github.com/org/repo/commit/aaaaaaa1111))"
        ));
    }

    #[test]
    fn test_patch_release_uses_smaller_heading() {
        let ctx = context(Some("1.1.0"), "1.1.1", vec![commit("abc1234", "fix: x")]);
        let notes = ConventionalNotesGenerator::default()
            .generate(&NotesConfig::default(), &ctx)
            .unwrap();
        assert!(notes.starts_with("## 1.1.1 (2024-05-01)"));
    }

    #[test]
    fn test_breaking_changes_section() {
        let ctx = context(
            Some("1.1.0"),
            "2.0.0",
            vec![commit(
                "abc1234ffff",
                "feat(core): new config format\n\nBREAKING CHANGE: old files are rejected",
            )],
        );

        let notes = ConventionalNotesGenerator::default()
            .generate(&NotesConfig::default(), &ctx)
            .unwrap();

        assert!(notes.contains(
            "### ⚠ BREAKING CHANGES\n\n* **core:** old files are rejected (abc1234)"
        ));
        let breaking_at = notes.find("BREAKING CHANGES").unwrap();
        let features_at = notes.find("### Features").unwrap();
        assert!(breaking_at < features_at);
    }

    #[test]
    fn test_first_release_has_no_compare_link() {
        let config = NotesConfig {
            repository_url: Some("https://github.com/org/repo".to_string()),
        };
        let ctx = context(None, "1.0.0-alpha.1", vec![]);

        let notes = ConventionalNotesGenerator::default().generate(&config, &ctx).unwrap();

        assert_eq!(notes, "# 1.0.0-alpha.1 (2024-05-01)\n");
    }
}
