use crate::domain::Channel;
use crate::error::{ReleaseError, Result};
use semver::{BuildMetadata, Prerelease};
use std::fmt;

/// Strict semantic version
///
/// Only constructed through [`Version::parse`] or the component constructors, so
/// every value is valid semver text. Ordering follows semver precedence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(semver::Version);

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionBump {
    Patch,
    Minor,
    Major,
}

impl Version {
    /// Create a final version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version(semver::Version::new(major, minor, patch))
    }

    /// Parse version text such as `1.2.0` or `1.2.0-alpha.1`
    ///
    /// No `v` prefix is accepted here, tags go through [`crate::domain::TagPattern`].
    pub fn parse(input: &str) -> Result<Self> {
        semver::Version::parse(input)
            .map(Version)
            .map_err(|e| ReleaseError::invalid_version(input, e))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Prerelease identifiers in order, empty for a final release
    pub fn prerelease(&self) -> Vec<&str> {
        if self.0.pre.is_empty() {
            Vec::new()
        } else {
            self.0.pre.as_str().split('.').collect()
        }
    }

    pub fn is_prerelease(&self) -> bool {
        !self.0.pre.is_empty()
    }

    /// Channel this version was published to
    pub fn channel(&self) -> Channel {
        Channel::from_prerelease(&self.0.pre)
    }

    /// `major.minor.patch` without prerelease or build metadata
    pub fn core(&self) -> Self {
        Version::new(self.0.major, self.0.minor, self.0.patch)
    }

    /// Bump the release core; any prerelease suffix is discarded
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let v = &self.0;
        let bumped = match bump_type {
            VersionBump::Major => increment(v.major).map(|major| Version::new(major, 0, 0)),
            VersionBump::Minor => increment(v.minor).map(|minor| Version::new(v.major, minor, 0)),
            VersionBump::Patch => {
                increment(v.patch).map(|patch| Version::new(v.major, v.minor, patch))
            }
        };

        bumped.ok_or_else(|| {
            ReleaseError::version(format!("Cannot apply a {} bump to {}", bump_type, self))
        })
    }

    /// Same core with a `{identifier}.{iteration}` prerelease section
    pub fn with_prerelease(&self, identifier: &str, iteration: u64) -> Result<Self> {
        let text = format!("{}.{}", identifier, iteration);
        let pre = Prerelease::new(&text).map_err(|e| ReleaseError::invalid_version(text, e))?;

        let mut version = self.core().0;
        version.pre = pre;
        Ok(Version(version))
    }

    /// Next iteration on the same prerelease track
    ///
    /// Increments a trailing numeric identifier, or appends `.0` when there is none.
    /// Final versions have no prerelease track to continue.
    pub fn next_prerelease(&self) -> Result<Self> {
        if !self.is_prerelease() {
            return Err(ReleaseError::version(format!(
                "Cannot increment prerelease of final version {}",
                self
            )));
        }

        let mut ids: Vec<String> = self.prerelease().into_iter().map(String::from).collect();
        match ids.last().and_then(|id| id.parse::<u64>().ok()) {
            Some(n) => {
                let next = increment(n).ok_or_else(|| {
                    ReleaseError::version(format!(
                        "Prerelease counter of {} cannot be incremented",
                        self
                    ))
                })?;
                if let Some(last) = ids.last_mut() {
                    *last = next.to_string();
                }
            }
            None => ids.push("0".to_string()),
        }

        let text = ids.join(".");
        let pre = Prerelease::new(&text).map_err(|e| ReleaseError::invalid_version(text, e))?;

        let mut version = self.0.clone();
        version.pre = pre;
        version.build = BuildMetadata::EMPTY;
        Ok(Version(version))
    }
}

fn increment(n: u64) -> Option<u64> {
    n.checked_add(1)
}

impl From<semver::Version> for Version {
    fn from(version: semver::Version) -> Self {
        Version(version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
        }
    }
}
