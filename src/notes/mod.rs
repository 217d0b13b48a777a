//! Release notes generation and changelog output

pub mod changelog;
pub mod conventional;

pub use changelog::prepend_changelog;
pub use conventional::ConventionalNotesGenerator;

use crate::config::NotesSettings;
use crate::error::Result;
use crate::release::ReleaseContext;

/// Settings passed to every notes generator call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesConfig {
    /// Base URL for compare and commit links, without trailing slash
    pub repository_url: Option<String>,
}

impl From<&NotesSettings> for NotesConfig {
    fn from(settings: &NotesSettings) -> Self {
        NotesConfig {
            repository_url: settings
                .repository_url
                .as_ref()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
        }
    }
}

/// Produces the release notes text for a release
pub trait NotesGenerator {
    fn generate(&self, config: &NotesConfig, context: &ReleaseContext) -> Result<String>;
}
