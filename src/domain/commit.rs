use regex::Regex;
use std::sync::OnceLock;

const DEFAULT_BREAKING_INDICATORS: [&str; 2] = ["BREAKING CHANGE:", "BREAKING-CHANGE:"];

fn header_regex() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"^([a-zA-Z]+)(?:\(([^)]+)\))?(!?):\s*(.*)$").expect("header regex is valid")
    })
}

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub is_breaking_change: bool,
    /// Text following a breaking-change footer, if any
    pub breaking_note: Option<String>,
    pub is_conventional: bool,
}

impl ParsedCommit {
    /// Parse a commit message in the Conventional Commits format
    /// Supports formats:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    /// - non-conventional text (reported as a `chore`)
    pub fn parse(message: &str) -> Self {
        let indicators: Vec<String> = DEFAULT_BREAKING_INDICATORS
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self::parse_with_indicators(message, &indicators)
    }

    /// Parse using custom breaking-change footer indicators
    pub fn parse_with_indicators(message: &str, indicators: &[String]) -> Self {
        let header = message.lines().next().unwrap_or("").trim();
        let breaking_note = find_breaking_note(message, indicators);

        if let Some(captures) = header_regex().captures(header) {
            let r#type = captures
                .get(1)
                .map(|m| m.as_str().to_lowercase())
                .unwrap_or_default();
            let scope = captures.get(2).map(|m| m.as_str().to_string());
            let has_exclamation = captures.get(3).map(|m| m.as_str()) == Some("!");
            let description = captures
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            return ParsedCommit {
                r#type,
                scope,
                is_breaking_change: has_exclamation || breaking_note.is_some(),
                breaking_note: breaking_note.or_else(|| {
                    has_exclamation.then(|| description.clone())
                }),
                description,
                is_conventional: true,
            };
        }

        ParsedCommit {
            r#type: "chore".to_string(),
            scope: None,
            description: header.to_string(),
            is_breaking_change: breaking_note.is_some(),
            breaking_note,
            is_conventional: false,
        }
    }
}

/// Footer text after the first breaking-change indicator found in the body
fn find_breaking_note(message: &str, indicators: &[String]) -> Option<String> {
    message.lines().skip(1).find_map(|line| {
        indicators.iter().find_map(|indicator| {
            line.trim_start()
                .strip_prefix(indicator.as_str())
                .map(|rest| rest.trim().to_string())
        })
    })
}
