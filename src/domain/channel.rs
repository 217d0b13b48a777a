//! Release channel classification
//!
//! A version belongs to exactly one channel: final (no prerelease), beta, alpha,
//! or a custom prerelease track. The channel is decided by the first prerelease
//! identifier, see https://semver.org/#spec-item-9

use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Release channel a version or branch publishes to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Final release, no prerelease identifier
    Final,
    /// Beta prerelease track
    Beta,
    /// Alpha prerelease track
    Alpha,
    /// Any other prerelease track (rc, next, ...)
    Other(String),
}

impl Channel {
    /// Classify a semver prerelease section by its first identifier
    pub fn from_prerelease(pre: &semver::Prerelease) -> Self {
        match pre.as_str().split('.').next() {
            None | Some("") => Channel::Final,
            Some("alpha") => Channel::Alpha,
            Some("beta") => Channel::Beta,
            Some(other) => Channel::Other(other.to_string()),
        }
    }

    /// Prerelease identifier of the channel, `None` for final releases
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Channel::Final => None,
            Channel::Beta => Some("beta"),
            Channel::Alpha => Some("alpha"),
            Channel::Other(id) => Some(id.as_str()),
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Channel::Final)
    }
}

impl FromStr for Channel {
    type Err = ReleaseError;

    /// Parse a prerelease identifier as it appears in configuration.
    ///
    /// The identifier must be a single semver identifier (ASCII alphanumerics
    /// and hyphens, no dots) and must not be purely numeric.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(ReleaseError::config("Empty prerelease identifier"));
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ReleaseError::config(format!(
                "Invalid prerelease identifier: '{}'",
                s
            )));
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            return Err(ReleaseError::config(format!(
                "Prerelease identifier cannot be numeric: '{}'",
                s
            )));
        }

        Ok(match s {
            "alpha" => Channel::Alpha,
            "beta" => Channel::Beta,
            other => Channel::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.identifier() {
            Some(id) => write!(f, "{}", id),
            None => write!(f, "final"),
        }
    }
}
