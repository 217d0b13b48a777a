use crate::domain::Version;
use crate::error::Result;
use crate::notes::{NotesConfig, NotesGenerator};
use crate::release::{PromotionRule, ReleaseContext};
use crate::ui::Logger;

/// Outcome of the notes step, applied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub version: Version,
    pub git_tag: String,
    pub notes: String,
    /// Whether the promotion rule replaced the tentative version
    pub promoted: bool,
}

/// Run the promotion rule, then generate notes for the resulting release.
///
/// The incoming context is not modified. Errors from the notes generator are
/// returned unchanged.
pub fn generate_notes<N: NotesGenerator + ?Sized>(
    rule: &PromotionRule,
    notes_config: &NotesConfig,
    context: &ReleaseContext,
    generator: &N,
    logger: &dyn Logger,
) -> Result<ReleasePlan> {
    let promoted = rule.promoted_version(context, logger)?;

    let effective = match &promoted {
        Some(version) => {
            let git_tag = rule.tag_pattern().format(version);
            context.with_next_release(version.clone(), git_tag)
        }
        None => context.clone(),
    };

    let notes = generator.generate(notes_config, &effective)?;

    Ok(ReleasePlan {
        version: effective.next_release.version,
        git_tag: effective.next_release.git_tag,
        notes,
        promoted: promoted.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BranchContext, Channel};
    use crate::error::ReleaseError;
    use crate::release::{NextRelease, Release};
    use crate::ui::RecordingLogger;
    use std::cell::RefCell;

    /// Records the version it was asked to describe
    struct EchoGenerator {
        seen: RefCell<Vec<String>>,
    }

    impl NotesGenerator for EchoGenerator {
        fn generate(&self, _config: &NotesConfig, context: &ReleaseContext) -> Result<String> {
            let tag = context.next_release.git_tag.clone();
            self.seen.borrow_mut().push(tag.clone());
            Ok(format!("notes for {}", tag))
        }
    }

    struct FailingGenerator;

    impl NotesGenerator for FailingGenerator {
        fn generate(&self, _config: &NotesConfig, _context: &ReleaseContext) -> Result<String> {
            Err(ReleaseError::notes("template missing"))
        }
    }

    fn alpha_context(last: &str, next: &str) -> ReleaseContext {
        ReleaseContext::new(
            BranchContext::prerelease("alpha", Channel::Alpha),
            Some(Release::parse(last, format!("v{}", last)).unwrap()),
            NextRelease::new(Version::parse(next).unwrap(), format!("v{}", next)),
        )
    }

    #[test]
    fn test_promoted_plan_uses_new_version_for_notes() {
        let generator = EchoGenerator {
            seen: RefCell::new(Vec::new()),
        };
        let context = alpha_context("1.1.0", "1.1.1-alpha.1");

        let plan = generate_notes(
            &PromotionRule::default(),
            &NotesConfig::default(),
            &context,
            &generator,
            &RecordingLogger::new(),
        )
        .unwrap();

        assert!(plan.promoted);
        assert_eq!(plan.version.to_string(), "1.2.0-alpha.1");
        assert_eq!(plan.git_tag, "v1.2.0-alpha.1");
        assert_eq!(plan.notes, "notes for v1.2.0-alpha.1");
        assert_eq!(*generator.seen.borrow(), vec!["v1.2.0-alpha.1".to_string()]);
        assert_eq!(context.next_release.version.to_string(), "1.1.1-alpha.1");
    }

    #[test]
    fn test_unpromoted_plan_keeps_tentative_version() {
        let generator = EchoGenerator {
            seen: RefCell::new(Vec::new()),
        };
        let context = alpha_context("1.2.0-alpha.1", "1.2.0-alpha.2");

        let plan = generate_notes(
            &PromotionRule::default(),
            &NotesConfig::default(),
            &context,
            &generator,
            &RecordingLogger::new(),
        )
        .unwrap();

        assert!(!plan.promoted);
        assert_eq!(plan.git_tag, "v1.2.0-alpha.2");
        assert_eq!(plan.notes, "notes for v1.2.0-alpha.2");
    }

    #[test]
    fn test_custom_tag_pattern_on_promotion() {
        let generator = EchoGenerator {
            seen: RefCell::new(Vec::new()),
        };
        let rule = PromotionRule::alpha(crate::domain::TagPattern::new("app@{version}").unwrap());

        let plan = generate_notes(
            &rule,
            &NotesConfig::default(),
            &alpha_context("1.1.0-beta.2", "1.1.0-alpha.3"),
            &generator,
            &RecordingLogger::new(),
        )
        .unwrap();

        assert_eq!(plan.git_tag, "app@1.2.0-alpha.1");
    }

    #[test]
    fn test_generator_failure_propagates() {
        let result = generate_notes(
            &PromotionRule::default(),
            &NotesConfig::default(),
            &alpha_context("1.1.0", "1.1.1-alpha.1"),
            &FailingGenerator,
            &RecordingLogger::new(),
        );

        match result {
            Err(ReleaseError::Notes(msg)) => assert_eq!(msg, "template missing"),
            other => panic!("expected notes error, got {:?}", other),
        }
    }
}
