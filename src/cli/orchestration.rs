//! Main workflow orchestration logic
//!
//! Planning and publishing are split so the binary can ask for confirmation in
//! between, and so the whole flow can run against a mock repository in tests.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use git2::Oid;

use crate::analyzer::{next_version, CommitAnalyzer};
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{BranchContext, Version};
use crate::error::{ReleaseError, Result};
use crate::git::{CommitInfo, Repository};
use crate::notes::{prepend_changelog, NotesConfig, NotesGenerator};
use crate::release::{
    find_last_release, generate_notes, NextRelease, PromotionRule, Release, ReleaseContext,
    ReleasePlan,
};
use crate::ui::Logger;

/// Everything decided before anything is written
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    pub branch: BranchContext,
    pub last_release: Option<Release>,
    pub commits: Vec<CommitInfo>,
    /// Commit the new tag will point to
    pub head: Oid,
    pub plan: ReleasePlan,
}

/// Result of a successful publish
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The tag that was created
    pub tag: String,

    /// The branch that was released
    pub branch: String,

    /// Whether the tag was pushed to remote
    pub pushed: bool,

    /// Changelog file that received the notes
    pub changelog: Option<PathBuf>,
}

/// Pick the branch to release: the requested one, else the checked out branch.
///
/// The branch must be configured.
pub fn resolve_branch<R: Repository + ?Sized>(
    requested: Option<&str>,
    config: &Config,
    repo: &R,
) -> Result<BranchContext> {
    let name = match requested {
        Some(name) => name.to_string(),
        None => repo.current_branch()?.ok_or_else(|| {
            ReleaseError::branch("HEAD is not on a branch, use --branch to pick one")
        })?,
    };

    configured_branch(&name, config)
}

/// Look up a branch that must be configured for releases
pub fn configured_branch(name: &str, config: &Config) -> Result<BranchContext> {
    config.branch(name)?.ok_or_else(|| {
        ReleaseError::config(format!(
            "Branch '{}' is not configured for releases (configured: {})",
            name,
            config.branch_names().join(", ")
        ))
    })
}

/// Plan a release on `branch`
///
/// 1. Find the last release reachable from the branch
/// 2. Collect and analyze the commits since then
/// 3. Compute the tentative next version
/// 4. Apply the channel promotion rule and generate notes
///
/// Returns `Ok(None)` when there is nothing to release.
pub fn plan_release<R, N>(
    branch: &BranchContext,
    config: &Config,
    repo: &R,
    generator: &N,
    logger: &dyn Logger,
    date: NaiveDate,
) -> Result<Option<ReleaseOutcome>>
where
    R: Repository + ?Sized,
    N: NotesGenerator + ?Sized,
{
    let pattern = config.tag_pattern()?;
    let head = repo.get_branch_head_oid(&branch.name)?;

    let last_release = find_last_release(repo, branch, &pattern, logger)?;
    match &last_release {
        Some(last) => logger.log(&format!(
            "Found last release {} on branch '{}'",
            last.git_tag, branch.name
        )),
        None => logger.log(&format!("No previous release on branch '{}'", branch.name)),
    }

    let from = match &last_release {
        Some(last) => repo.find_tag_oid(&last.git_tag)?,
        None => None,
    };
    let commits = repo.get_commits_between(from, head)?;

    if commits.is_empty() {
        let warning = BoundaryWarning::NoNewCommits {
            latest_tag: last_release
                .as_ref()
                .map(|l| l.git_tag.clone())
                .unwrap_or_else(|| "none".to_string()),
            current_commit_hash: head.to_string(),
        };
        logger.warn(&warning.to_string());
        return Ok(None);
    }

    let analyzer = CommitAnalyzer::new(config.conventional_commits.clone());
    let Some(bump) = analyzer.analyze(&commits) else {
        let warning = BoundaryWarning::NoReleaseWorthyCommits {
            commit_count: commits.len(),
        };
        logger.warn(&warning.to_string());
        return Ok(None);
    };
    logger.log(&format!(
        "Analyzed {} commits, release type is {}",
        commits.len(),
        bump
    ));

    let tentative = next_version(branch, last_release.as_ref(), bump)?;
    let next_release = NextRelease {
        git_tag: pattern.format(&tentative),
        version: tentative,
        bump: Some(bump),
    };

    let context = ReleaseContext::new(branch.clone(), last_release.clone(), next_release)
        .with_commits(commits.clone())
        .with_date(date);

    let rule = PromotionRule::alpha(pattern);
    let plan = generate_notes(
        &rule,
        &NotesConfig::from(&config.notes),
        &context,
        generator,
        logger,
    )?;

    if repo.find_tag_oid(&plan.git_tag)?.is_some() {
        return Err(ReleaseError::tag(format!(
            "Tag '{}' already exists",
            plan.git_tag
        )));
    }

    Ok(Some(ReleaseOutcome {
        branch: branch.clone(),
        last_release,
        commits,
        head,
        plan,
    }))
}

/// Write a planned release: update the changelog, create the tag, optionally push.
///
/// The tag is created last so a failed changelog write leaves no tag behind
/// and the release can be planned again. `workdir` is the directory the
/// changelog file is resolved against.
pub fn publish_release<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    outcome: &ReleaseOutcome,
    push: bool,
    workdir: &Path,
    logger: &dyn Logger,
) -> Result<WorkflowResult> {
    let tag = &outcome.plan.git_tag;

    let changelog = if config.publish.write_changelog {
        let path = workdir.join(&config.notes.changelog_file);
        prepend_changelog(&path, &config.notes.changelog_title, &outcome.plan.notes)?;
        logger.success(&format!("Updated {}", path.display()));
        Some(path)
    } else {
        None
    };

    repo.create_tag(tag, outcome.head)?;
    logger.success(&format!("Created tag: {}", tag));

    if push {
        repo.push_tags(&config.publish.remote, &[tag.as_str()])?;
        logger.success(&format!(
            "Pushed tag: {} to {}",
            tag, config.publish.remote
        ));
    }

    Ok(WorkflowResult {
        tag: tag.clone(),
        branch: outcome.branch.name.clone(),
        pushed: push,
        changelog,
    })
}

/// Apply the promotion rule to explicit versions, without a repository.
///
/// Used to check what a release on `branch_name` would be given the last
/// published version and the tentatively computed one.
pub fn resolve_next_release<N: NotesGenerator + ?Sized>(
    branch_name: &str,
    last_release: Option<&str>,
    next_release: &str,
    config: &Config,
    generator: &N,
    logger: &dyn Logger,
    date: NaiveDate,
) -> Result<ReleasePlan> {
    let pattern = config.tag_pattern()?;
    let branch = configured_branch(branch_name, config)?;

    let last = match last_release {
        Some(text) => {
            let version = Version::parse(text)?;
            Some(Release::new(version.clone(), pattern.format(&version)))
        }
        None => None,
    };
    let next = Version::parse(next_release)?;
    let next = NextRelease::new(next.clone(), pattern.format(&next));

    let context = ReleaseContext::new(branch, last, next).with_date(date);
    generate_notes(
        &PromotionRule::alpha(pattern),
        &NotesConfig::from(&config.notes),
        &context,
        generator,
        logger,
    )
}
