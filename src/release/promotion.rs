//! Alpha channel promotion.
//!
//! The alpha track previews the next minor version beyond whatever was finalized
//! or is in beta. When the last release reachable from the alpha branch is a final
//! or beta release, plain commit analysis would keep alpha on the same minor as
//! beta; this rule moves it to `{major}.{minor + 1}.0-alpha.1` instead. Once the
//! last release is itself an alpha, the regular prerelease increment applies.

use crate::domain::{Channel, TagPattern, Version, VersionBump};
use crate::error::Result;
use crate::release::ReleaseContext;
use crate::ui::Logger;

/// Overrides the next version on the promoted prerelease branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionRule {
    branch: String,
    channel: Channel,
    tag_pattern: TagPattern,
}

impl PromotionRule {
    /// Rule for the `alpha` branch publishing to the alpha channel
    pub fn alpha(tag_pattern: TagPattern) -> Self {
        PromotionRule {
            branch: "alpha".to_string(),
            channel: Channel::Alpha,
            tag_pattern,
        }
    }

    pub fn tag_pattern(&self) -> &TagPattern {
        &self.tag_pattern
    }

    /// Decide whether the next version must be replaced.
    ///
    /// Returns the promoted version on a channel transition, `None` when the
    /// tentative version stands.
    pub fn promoted_version(
        &self,
        context: &ReleaseContext,
        logger: &dyn Logger,
    ) -> Result<Option<Version>> {
        if context.branch.name != self.branch {
            return Ok(None);
        }
        let Some(last) = context.last_release.as_ref() else {
            return Ok(None);
        };

        logger.log(&format!(
            "Applying {} promotion on branch '{}'",
            self.channel, self.branch
        ));

        let last_channel = last.version.channel();
        if last_channel == self.channel {
            logger.log(&format!(
                "Last release {} is already on the {} channel, keeping {}",
                last.version, self.channel, context.next_release.version
            ));
            return Ok(None);
        }

        logger.log(&format!(
            "Last release {} comes from the {} channel, bumping minor version",
            last.version, last_channel
        ));

        let identifier = self.channel.identifier().unwrap_or("alpha");
        let promoted = last
            .version
            .bump(VersionBump::Minor)?
            .with_prerelease(identifier, 1)?;

        logger.log(&format!(
            "Overriding next version {} with {}",
            context.next_release.version, promoted
        ));

        Ok(Some(promoted))
    }
}

impl Default for PromotionRule {
    fn default() -> Self {
        PromotionRule::alpha(TagPattern::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BranchContext;
    use crate::release::{NextRelease, Release};
    use crate::ui::RecordingLogger;

    fn context(branch: BranchContext, last: Option<&str>, next: &str) -> ReleaseContext {
        ReleaseContext::new(
            branch,
            last.map(|v| Release::parse(v, format!("v{}", v)).unwrap()),
            NextRelease::new(Version::parse(next).unwrap(), format!("v{}", next)),
        )
    }

    fn alpha() -> BranchContext {
        BranchContext::prerelease("alpha", Channel::Alpha)
    }

    #[test]
    fn test_other_branches_are_untouched() {
        let rule = PromotionRule::default();
        let logger = RecordingLogger::new();

        let main = context(BranchContext::release("main"), Some("1.1.0"), "1.2.0");
        let beta = context(
            BranchContext::prerelease("beta", Channel::Beta),
            Some("1.1.0"),
            "1.2.0-beta.1",
        );

        assert_eq!(rule.promoted_version(&main, &logger).unwrap(), None);
        assert_eq!(rule.promoted_version(&beta, &logger).unwrap(), None);
        assert!(logger.lines().is_empty());
    }

    #[test]
    fn test_first_release_is_untouched() {
        let rule = PromotionRule::default();
        let ctx = context(alpha(), None, "1.0.0-alpha.1");
        assert_eq!(
            rule.promoted_version(&ctx, &RecordingLogger::new()).unwrap(),
            None
        );
    }

    #[test]
    fn test_final_release_promotes() {
        let rule = PromotionRule::default();
        let ctx = context(alpha(), Some("1.1.0"), "1.1.1-alpha.1");
        let promoted = rule.promoted_version(&ctx, &RecordingLogger::new()).unwrap();
        assert_eq!(promoted, Some(Version::parse("1.2.0-alpha.1").unwrap()));
    }

    #[test]
    fn test_beta_release_promotes() {
        let rule = PromotionRule::default();
        let ctx = context(alpha(), Some("1.1.0-beta.2"), "1.1.0-alpha.3");
        let promoted = rule.promoted_version(&ctx, &RecordingLogger::new()).unwrap();
        assert_eq!(promoted, Some(Version::parse("1.2.0-alpha.1").unwrap()));
    }

    #[test]
    fn test_promotion_resets_patch() {
        let rule = PromotionRule::default();
        let ctx = context(alpha(), Some("2.3.7"), "2.3.8-alpha.1");
        let promoted = rule.promoted_version(&ctx, &RecordingLogger::new()).unwrap();
        assert_eq!(promoted, Some(Version::parse("2.4.0-alpha.1").unwrap()));
    }

    #[test]
    fn test_alpha_release_keeps_tentative() {
        let rule = PromotionRule::default();
        let logger = RecordingLogger::new();
        let ctx = context(alpha(), Some("1.2.0-alpha.1"), "1.2.0-alpha.2");

        assert_eq!(rule.promoted_version(&ctx, &logger).unwrap(), None);
        assert!(logger.contains("already on the alpha channel"));
    }

    #[test]
    fn test_transition_is_logged() {
        let rule = PromotionRule::default();
        let logger = RecordingLogger::new();
        let ctx = context(alpha(), Some("1.1.0-beta.2"), "1.1.0-alpha.3");

        rule.promoted_version(&ctx, &logger).unwrap();

        assert!(logger.contains("comes from the beta channel"));
        assert!(logger.contains("Overriding next version 1.1.0-alpha.3 with 1.2.0-alpha.1"));
    }

    #[test]
    fn test_exhausted_minor_is_an_error() {
        let rule = PromotionRule::default();
        let ctx = context(alpha(), Some("1.18446744073709551615.0"), "1.0.0-alpha.1");
        assert!(matches!(
            rule.promoted_version(&ctx, &RecordingLogger::new()),
            Err(crate::error::ReleaseError::Version(_))
        ));
    }

    #[test]
    fn test_other_prerelease_track_promotes() {
        let rule = PromotionRule::default();
        let ctx = context(alpha(), Some("1.1.0-rc.1"), "1.1.0-alpha.1");
        let promoted = rule.promoted_version(&ctx, &RecordingLogger::new()).unwrap();
        assert_eq!(promoted, Some(Version::parse("1.2.0-alpha.1").unwrap()));
    }
}
