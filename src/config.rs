use crate::domain::{BranchContext, Channel, TagPattern};
use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "releaserc.toml";

/// Represents the complete configuration for channel-release.
///
/// Contains the release branches and their channels, the tag format, conventional
/// commit rules, release notes settings and publish behavior.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_tag_format")]
    pub tag_format: String,

    #[serde(default = "default_branches")]
    pub branches: Vec<BranchConfig>,

    #[serde(default)]
    pub conventional_commits: ConventionalCommitsConfig,

    #[serde(default)]
    pub notes: NotesSettings,

    #[serde(default)]
    pub publish: PublishConfig,
}

/// A branch that releases are cut from.
///
/// `prerelease = true` publishes prereleases named after the branch,
/// `prerelease = "beta"` uses an explicit identifier, omitted means final releases.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<PrereleaseSetting>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum PrereleaseSetting {
    Flag(bool),
    Identifier(String),
}

impl BranchConfig {
    pub fn release(name: &str) -> Self {
        BranchConfig {
            name: name.to_string(),
            prerelease: None,
        }
    }

    pub fn prerelease(name: &str) -> Self {
        BranchConfig {
            name: name.to_string(),
            prerelease: Some(PrereleaseSetting::Flag(true)),
        }
    }

    /// Resolve the channel this branch publishes to
    pub fn channel(&self) -> Result<Channel> {
        match &self.prerelease {
            None | Some(PrereleaseSetting::Flag(false)) => Ok(Channel::Final),
            Some(PrereleaseSetting::Flag(true)) => self.name.parse(),
            Some(PrereleaseSetting::Identifier(id)) => id.parse(),
        }
    }
}

fn default_tag_format() -> String {
    "v{version}".to_string()
}

/// main publishes final releases, beta and alpha publish prereleases
fn default_branches() -> Vec<BranchConfig> {
    vec![
        BranchConfig::release("main"),
        BranchConfig::prerelease("beta"),
        BranchConfig::prerelease("alpha"),
    ]
}

fn default_breaking_change_indicators() -> Vec<String> {
    vec![
        "BREAKING CHANGE:".to_string(),
        "BREAKING-CHANGE:".to_string(),
    ]
}

fn default_minor_types() -> Vec<String> {
    vec!["feat".to_string()]
}

fn default_patch_types() -> Vec<String> {
    vec!["fix".to_string(), "perf".to_string()]
}

/// Configuration for conventional commit analysis.
///
/// Commit types not listed in either group do not trigger a release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConventionalCommitsConfig {
    #[serde(default = "default_breaking_change_indicators")]
    pub breaking_change_indicators: Vec<String>,

    #[serde(default = "default_minor_types")]
    pub minor_types: Vec<String>,

    #[serde(default = "default_patch_types")]
    pub patch_types: Vec<String>,
}

impl Default for ConventionalCommitsConfig {
    fn default() -> Self {
        ConventionalCommitsConfig {
            breaking_change_indicators: default_breaking_change_indicators(),
            minor_types: default_minor_types(),
            patch_types: default_patch_types(),
        }
    }
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

fn default_changelog_title() -> String {
    "# Changelog".to_string()
}

/// Release notes and changelog settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotesSettings {
    /// Base URL used for compare and commit links, e.g. `https://github.com/org/repo`
    #[serde(default)]
    pub repository_url: Option<String>,

    #[serde(default = "default_changelog_file")]
    pub changelog_file: String,

    #[serde(default = "default_changelog_title")]
    pub changelog_title: String,
}

impl Default for NotesSettings {
    fn default() -> Self {
        NotesSettings {
            repository_url: None,
            changelog_file: default_changelog_file(),
            changelog_title: default_changelog_title(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_true() -> bool {
    true
}

/// Configuration for the publish steps run after the version is decided.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PublishConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Push the created tag without asking
    #[serde(default)]
    pub push: bool,

    #[serde(default = "default_true")]
    pub write_changelog: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            remote: default_remote(),
            push: false,
            write_changelog: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag_format: default_tag_format(),
            branches: default_branches(),
            conventional_commits: ConventionalCommitsConfig::default(),
            notes: NotesSettings::default(),
            publish: PublishConfig::default(),
        }
    }
}

impl Config {
    /// Check the configuration for mistakes that would break a release run.
    pub fn validate(&self) -> Result<()> {
        self.tag_pattern()?;

        if self.branches.is_empty() {
            return Err(ReleaseError::config("No release branches configured"));
        }

        let mut seen = HashSet::new();
        let mut has_release_branch = false;
        for branch in &self.branches {
            if branch.name.trim().is_empty() {
                return Err(ReleaseError::config("Branch name cannot be empty"));
            }
            if !seen.insert(branch.name.as_str()) {
                return Err(ReleaseError::config(format!(
                    "Branch '{}' is configured more than once",
                    branch.name
                )));
            }

            let channel = branch.channel().map_err(|e| {
                ReleaseError::config(format!("Branch '{}': {}", branch.name, e))
            })?;
            has_release_branch |= channel.is_final();
        }

        if !has_release_branch {
            return Err(ReleaseError::config(
                "At least one branch must publish final releases",
            ));
        }

        Ok(())
    }

    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(&self.tag_format)
    }

    /// Look up a configured branch by name
    pub fn branch(&self, name: &str) -> Result<Option<BranchContext>> {
        match self.branches.iter().find(|b| b.name == name) {
            Some(branch) => Ok(Some(BranchContext {
                name: branch.name.clone(),
                channel: branch.channel()?,
            })),
            None => Ok(None),
        }
    }

    pub fn branch_names(&self) -> Vec<String> {
        self.branches.iter().map(|b| b.name.clone()).collect()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releaserc.toml` in current directory
/// 3. `.releaserc.toml` in user config directory
/// 4. Default configuration if no file found
///
/// The loaded configuration is validated before it is returned.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}
