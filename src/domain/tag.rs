use crate::domain::Version;
use crate::error::{ReleaseError, Result};

const PLACEHOLDER: &str = "{version}";

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    prefix: String,
    suffix: String,
}

impl TagPattern {
    /// Create a tag pattern; it must contain exactly one `{version}` placeholder
    pub fn new(pattern: &str) -> Result<Self> {
        let parts: Vec<&str> = pattern.split(PLACEHOLDER).collect();
        if parts.len() != 2 {
            return Err(ReleaseError::config(format!(
                "Tag format '{}' must contain exactly one {} placeholder",
                pattern, PLACEHOLDER
            )));
        }
        if pattern.chars().any(char::is_whitespace) {
            return Err(ReleaseError::config(format!(
                "Tag format '{}' must not contain whitespace",
                pattern
            )));
        }

        Ok(TagPattern {
            prefix: parts[0].to_string(),
            suffix: parts[1].to_string(),
        })
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version="1.2.3" -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        format!("{}{}{}", self.prefix, version, self.suffix)
    }

    /// Extract the version from a tag name.
    ///
    /// Returns `Ok(None)` when the tag does not follow the pattern, including
    /// when the text in place of `{version}` does not start with a digit, and an
    /// error when it looks like a version but is not a valid one.
    pub fn parse(&self, tag: &str) -> Result<Option<Version>> {
        let version_part = tag
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_suffix(self.suffix.as_str()));

        match version_part {
            Some(text) if text.starts_with(|c: char| c.is_ascii_digit()) => {
                Version::parse(text).map(Some)
            }
            _ => Ok(None),
        }
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            prefix: "v".to_string(),
            suffix: String::new(),
        }
    }
}

impl std::fmt::Display for TagPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.prefix, PLACEHOLDER, self.suffix)
    }
}
