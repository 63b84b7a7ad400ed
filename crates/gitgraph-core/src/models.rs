use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::hash::CommitHash;

/// Author or committer identity. Either field may be empty — Git does not
/// require either to be non-empty in a commit object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// An immutable commit record as parsed from `git log`.
///
/// Parent hashes are deduplicated at Git's source and listed in Git's parent
/// order; the first parent is the mainline continuation for merge commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: CommitHash,
    pub parents: Vec<CommitHash>,
    pub author: Identity,
    pub committer: Identity,
    pub authored_at: DateTime<FixedOffset>,
    pub committed_at: DateTime<FixedOffset>,
    pub subject: String,
    pub body: String,
}

impl Commit {
    pub fn is_merge(&self) -> bool {
        self.parents.len() >= 2
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// The type-specific payload of a [`GitRef`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RefKind {
    LocalBranch { is_head: bool, is_protected: bool },
    RemoteBranch { remote_name: String, is_protected: bool },
    Tag { is_annotated: bool },
}

impl RefKind {
    pub fn is_head(&self) -> bool {
        matches!(self, RefKind::LocalBranch { is_head: true, .. })
    }

    pub fn is_protected(&self) -> bool {
        match self {
            RefKind::LocalBranch { is_protected, .. } => *is_protected,
            RefKind::RemoteBranch { is_protected, .. } => *is_protected,
            RefKind::Tag { .. } => false,
        }
    }
}

/// A ref (branch or tag) discovered via `for-each-ref`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitRef {
    pub name: String,
    pub full_name: String,
    pub target: CommitHash,
    pub kind: RefKind,
}

/// Aggregate counts over a repository graph, walked once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    pub total_commits: usize,
    pub local_branch_count: usize,
    pub remote_branch_count: usize,
    pub tag_count: usize,
    pub merge_count: usize,
    pub max_parent_count: usize,
    pub root_count: usize,
    pub oldest_commit_unix: Option<i64>,
    pub newest_commit_unix: Option<i64>,
}
