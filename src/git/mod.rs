//! Git operations abstraction layer
//!
//! The release pipeline only needs a handful of repository operations: resolve
//! branch heads, walk history, read and create tags, and push. They sit behind the
//! [Repository] trait so the pipeline can run against a real repository or an
//! in-memory one in tests.
//!
//! - [repository::Git2Repository]: implementation on top of the `git2` crate
//! - [mock::MockRepository]: linear in-memory history for tests
//!
//! ```rust
//! # use channel_release::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let head = repo.get_branch_head_oid("alpha")?;
//! let commits = repo.get_commits_between(None, head)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Commit information for analysis and release notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full commit hash
    pub hash: String,
    /// The commit message
    pub message: String,
    /// The commit author
    pub author: String,
}

impl CommitInfo {
    /// First seven characters of the hash
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}

/// Repository operations used by the release pipeline
///
/// All methods return [crate::error::Result<T>]; implementations map their
/// underlying errors to the matching [crate::error::ReleaseError] variants.
pub trait Repository {
    /// Name of the checked out branch, `None` for a detached or unborn HEAD
    fn current_branch(&self) -> Result<Option<String>>;

    /// Get the OID of a local branch's HEAD
    ///
    /// # Returns
    /// * `Ok(Oid)` - Object ID of the branch's HEAD commit
    /// * `Err` - If the branch doesn't exist or if there's a Git error
    fn get_branch_head_oid(&self, branch_name: &str) -> Result<Oid>;

    /// Get commits reachable from `to_oid` but not from `from_oid`
    ///
    /// `from_oid` is exclusive and `None` means the whole history. Commits are
    /// returned oldest first.
    fn get_commits_between(&self, from_oid: Option<Oid>, to_oid: Oid) -> Result<Vec<CommitInfo>>;

    /// Get all tag names in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Find the commit a tag points to
    ///
    /// Annotated tags are peeled to their target commit.
    ///
    /// # Returns
    /// * `Ok(Some(Oid))` - Commit the tag points to
    /// * `Ok(None)` - If the tag doesn't exist
    /// * `Err` - If there's a Git error
    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>>;

    /// Whether `ancestor` is `descendant` or one of its ancestors
    fn is_ancestor(&self, ancestor: Oid, descendant: Oid) -> Result<bool>;

    /// Create a lightweight tag at the given commit
    ///
    /// Fails if the tag already exists.
    fn create_tag(&self, name: &str, oid: Oid) -> Result<()>;

    /// Push tags to a remote
    fn push_tags(&self, remote: &str, tag_names: &[&str]) -> Result<()>;
}
