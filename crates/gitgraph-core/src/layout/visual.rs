use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hash::CommitHash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeType {
    Straight,
    Fork,
    Merge,
}

/// A ref materialized for rendering: protected/head flags resolved against
/// the [`super::LayoutOptions`] used for this layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualRef {
    pub name: String,
    pub full_name: String,
    pub is_head: bool,
    pub is_protected: bool,
    pub is_tag: bool,
    pub is_remote: bool,
    pub remote_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualCommit {
    pub hash: CommitHash,
    pub row: usize,
    pub lane: usize,
    pub is_merge: bool,
    pub is_branch_tip: bool,
    pub is_root: bool,
    pub is_head: bool,
    pub refs: Vec<VisualRef>,
    pub edge_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualEdge {
    pub id: String,
    pub from_hash: CommitHash,
    pub from_row: usize,
    pub from_lane: usize,
    pub to_hash: CommitHash,
    /// -1 when the parent commit is absent from the loaded commit set.
    pub to_row: i64,
    pub to_lane: usize,
    pub parent_index: usize,
    pub edge_type: EdgeType,
}

impl VisualEdge {
    pub fn row_span(&self) -> (i64, i64) {
        let from = self.from_row as i64;
        (from.min(self.to_row), from.max(self.to_row))
    }

    pub fn lane_span(&self) -> (usize, usize) {
        (self.from_lane.min(self.to_lane), self.from_lane.max(self.to_lane))
    }
}

/// The final, immutable layout: commits in row order, edges in creation
/// order, plus lookup indices. Produced by [`super::layout`] and never
/// mutated — [`super::optimize_lanes`] returns a new graph instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualGraph {
    pub commits: Vec<VisualCommit>,
    pub edges: Vec<VisualEdge>,
    pub total_rows: usize,
    pub total_lanes: usize,
    pub by_hash: HashMap<CommitHash, usize>,
    pub by_row: HashMap<usize, usize>,
    pub by_edge_id: HashMap<String, usize>,
    pub active_lanes_at_row: HashMap<usize, Vec<usize>>,
}

impl VisualGraph {
    pub fn commit_at_row(&self, row: usize) -> Option<&VisualCommit> {
        self.by_row.get(&row).map(|&i| &self.commits[i])
    }

    pub fn commit_by_hash(&self, hash: &CommitHash) -> Option<&VisualCommit> {
        self.by_hash.get(hash).map(|&i| &self.commits[i])
    }

    pub fn edge_by_id(&self, id: &str) -> Option<&VisualEdge> {
        self.by_edge_id.get(id).map(|&i| &self.edges[i])
    }

    pub(crate) fn rebuild_indices(&mut self) {
        self.by_hash = self
            .commits
            .iter()
            .enumerate()
            .map(|(i, c)| (c.hash.clone(), i))
            .collect();
        self.by_row = self.commits.iter().enumerate().map(|(i, c)| (c.row, i)).collect();
        self.by_edge_id = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
    }
}
