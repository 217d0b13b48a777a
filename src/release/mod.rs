//! Release context, last-release discovery and the channel promotion rule

pub mod context;
pub mod history;
pub mod plan;
pub mod promotion;

pub use context::{NextRelease, Release, ReleaseContext};
pub use history::find_last_release;
pub use plan::{generate_notes, ReleasePlan};
pub use promotion::PromotionRule;
