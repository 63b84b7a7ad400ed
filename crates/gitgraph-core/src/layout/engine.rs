use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::RepositoryGraph;
use crate::hash::CommitHash;
use crate::models::RefKind;
use crate::protected;

use super::visual::{EdgeType, VisualCommit, VisualEdge, VisualGraph, VisualRef};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOptions {
    pub protected_branches: Vec<String>,
}

#[derive(Default)]
struct LaneState {
    lane_by_commit: HashMap<CommitHash, usize>,
    active_lanes: HashMap<usize, CommitHash>,
    free_lanes: Vec<usize>,
    max_lane: Option<usize>,
}

impl LaneState {
    fn allocate(&mut self) -> usize {
        self.free_lanes.sort_unstable();
        if let Some(lane) = self.free_lanes.first().copied() {
            self.free_lanes.remove(0);
            return lane;
        }
        let next = self.max_lane.map_or(0, |m| m + 1);
        self.max_lane = Some(next);
        next
    }
}

/// Assign a (row, lane) to every commit.
///
/// `graph.topological_order` is stored in Git's default `--topo-order` log
/// order — newest first, with a parent always listed after all of its
/// children. That already satisfies "children precede parents, row 0 =
/// newest", so row assignment walks it directly; no array reversal is
/// needed unless a caller fed the builder a `--reverse`d sequence, which
/// this engine does not do.
pub fn layout(graph: &RepositoryGraph, options: &LayoutOptions) -> VisualGraph {
    let row_order: Vec<CommitHash> = graph.topological_order.clone();

    let mut state = LaneState::default();
    let mut commits: Vec<VisualCommit> = Vec::with_capacity(row_order.len());
    let mut edges: Vec<VisualEdge> = Vec::new();
    let mut active_lanes_at_row: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut assigned_lane: HashMap<CommitHash, usize> = HashMap::new();

    for (row, hash) in row_order.iter().enumerate() {
        let Some(commit) = graph.get(hash) else {
            continue;
        };

        let lane = match state.lane_by_commit.get(hash).copied() {
            Some(lane) => lane,
            None => state.allocate(),
        };
        state.active_lanes.insert(lane, hash.clone());

        let refs = graph
            .refs_at(hash)
            .iter()
            .map(|r| materialize_ref(r, &options.protected_branches))
            .collect::<Vec<_>>();

        let mut edge_ids = Vec::with_capacity(commit.parents.len());
        let is_merge = commit.is_merge();

        for (parent_index, parent) in commit.parents.iter().enumerate() {
            let parent_lane = match state.lane_by_commit.get(parent).copied() {
                Some(lane) => lane,
                None if parent_index == 0 => {
                    state.lane_by_commit.insert(parent.clone(), lane);
                    lane
                }
                None => {
                    let new_lane = state.allocate();
                    state.lane_by_commit.insert(parent.clone(), new_lane);
                    new_lane
                }
            };

            let edge_type = if is_merge && parent_index >= 1 {
                EdgeType::Merge
            } else if lane != parent_lane {
                EdgeType::Fork
            } else {
                EdgeType::Straight
            };

            let id = format!("{hash}-{parent}-{parent_index}");
            edge_ids.push(id.clone());
            edges.push(VisualEdge {
                id,
                from_hash: hash.clone(),
                from_row: row,
                from_lane: lane,
                to_hash: parent.clone(),
                to_row: -1,
                to_lane: parent_lane,
                parent_index,
                edge_type,
            });
        }

        let children = graph.children_of(hash);
        let any_child_same_lane = children
            .iter()
            .any(|child| assigned_lane.get(child) == Some(&lane));
        // `lane_by_commit` entries are never removed once a reserved commit is
        // processed, so excluding `hash` itself (and any already-emitted
        // commit) keeps a stale self-reservation from blocking a legitimate
        // free — only *pending* parent reservations should hold a lane open.
        let still_reserved = state
            .lane_by_commit
            .iter()
            .any(|(h, &l)| l == lane && h != hash && !assigned_lane.contains_key(h));
        if (children.is_empty() || !any_child_same_lane) && !still_reserved && lane > 0 {
            state.free_lanes.push(lane);
        }

        active_lanes_at_row.insert(row, sorted_keys(&state.active_lanes));
        state.active_lanes.remove(&lane);

        assigned_lane.insert(hash.clone(), lane);
        commits.push(VisualCommit {
            hash: hash.clone(),
            row,
            lane,
            is_merge,
            is_branch_tip: !refs.is_empty(),
            is_root: graph.is_root(commit),
            is_head: graph.head.as_ref() == Some(hash),
            refs,
            edge_ids,
        });
    }

    let row_by_hash: HashMap<&CommitHash, usize> = commits.iter().map(|c| (&c.hash, c.row)).collect();
    for edge in &mut edges {
        if let Some(&row) = row_by_hash.get(&edge.to_hash) {
            edge.to_row = row as i64;
        }
    }

    let total_rows = commits.len();
    let total_lanes = state.max_lane.map_or(0, |m| m + 1);

    let mut graph = VisualGraph {
        commits,
        edges,
        total_rows,
        total_lanes,
        active_lanes_at_row,
        ..VisualGraph::default()
    };
    graph.rebuild_indices();
    graph
}

fn sorted_keys(active_lanes: &HashMap<usize, CommitHash>) -> Vec<usize> {
    let mut keys: Vec<usize> = active_lanes.keys().copied().collect();
    keys.sort_unstable();
    keys
}

fn materialize_ref(git_ref: &crate::models::GitRef, patterns: &[String]) -> VisualRef {
    let is_protected = match &git_ref.kind {
        RefKind::Tag { .. } => false,
        _ => protected::is_protected(&git_ref.name, patterns),
    };
    let (is_tag, is_remote, remote_name) = match &git_ref.kind {
        RefKind::LocalBranch { .. } => (false, false, None),
        RefKind::RemoteBranch { remote_name, .. } => (false, true, Some(remote_name.clone())),
        RefKind::Tag { .. } => (true, false, None),
    };
    VisualRef {
        name: git_ref.name.clone(),
        full_name: git_ref.full_name.clone(),
        is_head: git_ref.kind.is_head(),
        is_protected,
        is_tag,
        is_remote,
        remote_name,
    }
}
