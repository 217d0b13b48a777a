use crate::boundary::BoundaryWarning;
use crate::domain::{BranchContext, TagPattern};
use crate::error::Result;
use crate::git::Repository;
use crate::release::Release;
use crate::ui::Logger;

/// Find the highest release reachable from the branch head.
///
/// Release branches only look at final versions. Prerelease branches look at
/// every version, so final and beta releases merged into them are seen too.
/// Tags that follow the pattern but hold an invalid version are reported and
/// skipped.
pub fn find_last_release<R: Repository + ?Sized>(
    repo: &R,
    branch: &BranchContext,
    pattern: &TagPattern,
    logger: &dyn Logger,
) -> Result<Option<Release>> {
    let head = repo.get_branch_head_oid(&branch.name)?;
    let mut last: Option<Release> = None;

    for tag in repo.list_tags()? {
        let version = match pattern.parse(&tag) {
            Ok(Some(version)) => version,
            Ok(None) => continue,
            Err(e) => {
                logger.warn(
                    &BoundaryWarning::UnparsableTag {
                        tag: tag.clone(),
                        reason: e.to_string(),
                    }
                    .to_string(),
                );
                continue;
            }
        };

        if !branch.is_prerelease() && version.is_prerelease() {
            continue;
        }
        if last.as_ref().is_some_and(|l| l.version >= version) {
            continue;
        }

        let Some(oid) = repo.find_tag_oid(&tag)? else {
            continue;
        };
        if !repo.is_ancestor(oid, head)? {
            continue;
        }

        last = Some(Release::new(version, tag).with_head(oid.to_string()));
    }

    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Channel;
    use crate::git::MockRepository;
    use crate::ui::RecordingLogger;

    /// main: c1 (v1.0.0) - c2 (v1.1.0-beta.1) - c3 (v1.1.0) - c4
    /// alpha branches off at c4 and adds c5 (v1.2.0-alpha.1)
    fn repo() -> MockRepository {
        let mut repo = MockRepository::new();
        let c1 = repo.commit("feat: initial");
        let c2 = repo.commit("feat: search");
        let c3 = repo.commit("fix: search crash");
        let c4 = repo.commit("docs: readme");
        let c5 = repo.commit("feat: preview api");

        repo.add_tag("v1.0.0", c1);
        repo.add_tag("v1.1.0-beta.1", c2);
        repo.add_tag("v1.1.0", c3);
        repo.add_tag("v1.2.0-alpha.1", c5);
        repo.add_tag("nightly", c4);
        repo.set_branch_head("main", c4);
        repo.set_branch_head("beta", c2);
        repo.set_branch_head("alpha", c5);
        repo
    }

    #[test]
    fn test_release_branch_ignores_prereleases() {
        let last = find_last_release(
            &repo(),
            &BranchContext::release("main"),
            &TagPattern::default(),
            &RecordingLogger::new(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(last.version.to_string(), "1.1.0");
        assert_eq!(last.git_tag, "v1.1.0");
        assert!(last.git_head.is_some());
    }

    #[test]
    fn test_only_reachable_tags_count() {
        let last = find_last_release(
            &repo(),
            &BranchContext::prerelease("beta", Channel::Beta),
            &TagPattern::default(),
            &RecordingLogger::new(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(last.version.to_string(), "1.1.0-beta.1");
    }

    #[test]
    fn test_prerelease_branch_sees_all_channels() {
        let last = find_last_release(
            &repo(),
            &BranchContext::prerelease("alpha", Channel::Alpha),
            &TagPattern::default(),
            &RecordingLogger::new(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(last.version.to_string(), "1.2.0-alpha.1");
    }

    #[test]
    fn test_no_tags() {
        let mut repo = MockRepository::new();
        let c1 = repo.commit("feat: initial");
        repo.set_branch_head("main", c1);

        let last = find_last_release(
            &repo,
            &BranchContext::release("main"),
            &TagPattern::default(),
            &RecordingLogger::new(),
        )
        .unwrap();

        assert_eq!(last, None);
    }

    #[test]
    fn test_unparsable_tag_is_reported_and_skipped() {
        let mut repo = repo();
        let head = repo.get_branch_head_oid("main").unwrap();
        repo.add_tag("v2.0", head);
        let logger = RecordingLogger::new();

        let last = find_last_release(
            &repo,
            &BranchContext::release("main"),
            &TagPattern::default(),
            &logger,
        )
        .unwrap()
        .unwrap();

        assert_eq!(last.version.to_string(), "1.1.0");
        assert!(logger.contains("Cannot parse tag 'v2.0'"));
    }

    #[test]
    fn test_non_version_tags_are_skipped_quietly() {
        let mut repo = repo();
        let head = repo.get_branch_head_oid("main").unwrap();
        repo.add_tag("very-old", head);
        let logger = RecordingLogger::new();

        let last = find_last_release(
            &repo,
            &BranchContext::release("main"),
            &TagPattern::default(),
            &logger,
        )
        .unwrap()
        .unwrap();

        assert_eq!(last.git_tag, "v1.1.0");
        assert!(logger.lines().is_empty());
    }

    #[test]
    fn test_unknown_branch_is_an_error() {
        let result = find_last_release(
            &repo(),
            &BranchContext::release("develop"),
            &TagPattern::default(),
            &RecordingLogger::new(),
        );
        assert!(result.is_err());
    }
}
