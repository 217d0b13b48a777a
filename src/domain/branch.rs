use crate::domain::Channel;

/// A configured release branch and the channel it publishes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub channel: Channel,
}

impl BranchContext {
    /// Create a branch publishing final releases
    pub fn release(name: impl Into<String>) -> Self {
        BranchContext {
            name: name.into(),
            channel: Channel::Final,
        }
    }

    /// Create a branch publishing prereleases on the given channel
    pub fn prerelease(name: impl Into<String>, channel: Channel) -> Self {
        BranchContext {
            name: name.into(),
            channel,
        }
    }

    pub fn is_prerelease(&self) -> bool {
        !self.channel.is_final()
    }

    /// Prerelease identifier used for versions cut from this branch
    pub fn prerelease_identifier(&self) -> Option<&str> {
        self.channel.identifier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_branch() {
        let branch = BranchContext::release("main");
        assert!(!branch.is_prerelease());
        assert_eq!(branch.prerelease_identifier(), None);
    }

    #[test]
    fn test_prerelease_branch() {
        let branch = BranchContext::prerelease("alpha", Channel::Alpha);
        assert!(branch.is_prerelease());
        assert_eq!(branch.prerelease_identifier(), Some("alpha"));
    }

    #[test]
    fn test_branch_name_independent_of_channel() {
        let branch = BranchContext::prerelease("next", Channel::Beta);
        assert_eq!(branch.name, "next");
        assert_eq!(branch.prerelease_identifier(), Some("beta"));
    }
}
