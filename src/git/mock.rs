use crate::error::{ReleaseError, Result};
use crate::git::{CommitInfo, Repository};
use git2::Oid;
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock repository with a single linear history, for testing without git
///
/// Commits are appended in order, so a commit is an ancestor of every commit
/// recorded after it.
pub struct MockRepository {
    history: Vec<(Oid, CommitInfo)>,
    tags: RefCell<HashMap<String, Oid>>,
    branch_heads: HashMap<String, Oid>,
    current_branch: Option<String>,
    pushed: RefCell<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            history: Vec::new(),
            tags: RefCell::new(HashMap::new()),
            branch_heads: HashMap::new(),
            current_branch: None,
            pushed: RefCell::new(Vec::new()),
        }
    }

    /// Append a commit to the history and return its id
    pub fn commit(&mut self, message: &str) -> Oid {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&(self.history.len() as u64 + 1).to_be_bytes());
        let oid = Oid::from_bytes(&bytes).unwrap_or_else(|_| Oid::zero());

        self.history.push((
            oid,
            CommitInfo {
                hash: oid.to_string(),
                message: message.to_string(),
                author: "Mock Author".to_string(),
            },
        ));
        oid
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.get_mut().insert(name.into(), oid);
    }

    /// Set a branch head
    pub fn set_branch_head(&mut self, branch: impl Into<String>, oid: Oid) {
        self.branch_heads.insert(branch.into(), oid);
    }

    /// Set the checked out branch
    pub fn checkout(&mut self, branch: impl Into<String>) {
        self.current_branch = Some(branch.into());
    }

    /// `(remote, tag)` pairs pushed so far
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.pushed.borrow().clone()
    }

    fn position(&self, oid: Oid) -> Result<usize> {
        self.history
            .iter()
            .position(|(id, _)| *id == oid)
            .ok_or_else(|| git2::Error::from_str(&format!("Unknown commit: {}", oid)).into())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.current_branch.clone())
    }

    fn get_branch_head_oid(&self, branch_name: &str) -> Result<Oid> {
        self.branch_heads
            .get(branch_name)
            .copied()
            .ok_or_else(|| ReleaseError::branch(format!("Branch not found: {}", branch_name)))
    }

    fn get_commits_between(&self, from_oid: Option<Oid>, to_oid: Oid) -> Result<Vec<CommitInfo>> {
        let end = self.position(to_oid)? + 1;
        let start = match from_oid {
            Some(from) => (self.position(from)? + 1).min(end),
            None => 0,
        };

        Ok(self.history[start..end]
            .iter()
            .map(|(_, info)| info.clone())
            .collect())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let mut tags: Vec<String> = self.tags.borrow().keys().cloned().collect();
        tags.sort();
        Ok(tags)
    }

    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>> {
        Ok(self.tags.borrow().get(tag_name).copied())
    }

    fn is_ancestor(&self, ancestor: Oid, descendant: Oid) -> Result<bool> {
        Ok(self.position(ancestor)? <= self.position(descendant)?)
    }

    fn create_tag(&self, name: &str, oid: Oid) -> Result<()> {
        self.position(oid)?;
        let mut tags = self.tags.borrow_mut();
        if tags.contains_key(name) {
            return Err(ReleaseError::tag(format!("Tag '{}' already exists", name)));
        }
        tags.insert(name.to_string(), oid);
        Ok(())
    }

    fn push_tags(&self, remote: &str, tag_names: &[&str]) -> Result<()> {
        let tags = self.tags.borrow();
        let mut pushed = self.pushed.borrow_mut();
        for tag in tag_names {
            if !tags.contains_key(*tag) {
                return Err(ReleaseError::remote(format!("Tag '{}' does not exist", tag)));
            }
            pushed.push((remote.to_string(), tag.to_string()));
        }
        Ok(())
    }
}
