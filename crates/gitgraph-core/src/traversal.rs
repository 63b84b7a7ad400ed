use std::collections::{HashSet, VecDeque};

use crate::graph::RepositoryGraph;
use crate::hash::CommitHash;
use crate::models::RefKind;
use crate::models::RepoStats;

/// Breadth-first walk of parents starting one hop above `start`. `start`
/// itself is never included. A parent pointer to a commit absent from the
/// graph terminates that branch silently.
pub fn ancestors(graph: &RepositoryGraph, start: &CommitHash, max_depth: Option<usize>) -> Vec<CommitHash> {
    bfs(graph, start, max_depth, |g, h| g.get(h).map(|c| c.parents.as_slice()))
}

/// Symmetric to [`ancestors`], walking the child index instead of parents.
pub fn descendants(graph: &RepositoryGraph, start: &CommitHash, max_depth: Option<usize>) -> Vec<CommitHash> {
    bfs(graph, start, max_depth, |g, h| Some(g.children_of(h)))
}

fn bfs(
    graph: &RepositoryGraph,
    start: &CommitHash,
    max_depth: Option<usize>,
    neighbors: impl Fn(&RepositoryGraph, &CommitHash) -> Option<&[CommitHash]>,
) -> Vec<CommitHash> {
    let limit = max_depth.unwrap_or(usize::MAX);
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back((start.clone(), 0usize));
    visited.insert(start.clone());

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= limit {
            continue;
        }
        let Some(next) = neighbors(graph, &current) else {
            continue;
        };
        for n in next {
            if visited.insert(n.clone()) {
                order.push(n.clone());
                queue.push_back((n.clone(), depth + 1));
            }
        }
    }

    order
}

/// BFS from `target` through parents until `candidate` is found. `false` if
/// the two hashes are equal.
pub fn is_ancestor(graph: &RepositoryGraph, candidate: &CommitHash, target: &CommitHash) -> bool {
    if candidate == target {
        return false;
    }
    ancestors(graph, target, None).contains(candidate)
}

/// The first common ancestor of `a` and `b` encountered by a BFS rooted at
/// `b`. This matches Git's semantics for linear history and simple
/// branching, but is not a full lowest-common-ancestor search: criss-cross
/// merges with multiple best common ancestors may return a different one
/// than `git merge-base` would.
pub fn merge_base(graph: &RepositoryGraph, a: &CommitHash, b: &CommitHash) -> Option<CommitHash> {
    let mut a_ancestors: HashSet<CommitHash> = ancestors(graph, a, None).into_iter().collect();
    a_ancestors.insert(a.clone());

    if a_ancestors.contains(b) {
        return Some(b.clone());
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(b.clone());
    visited.insert(b.clone());

    while let Some(current) = queue.pop_front() {
        let Some(commit) = graph.get(&current) else {
            continue;
        };
        for parent in &commit.parents {
            if a_ancestors.contains(parent) {
                return Some(parent.clone());
            }
            if visited.insert(parent.clone()) {
                queue.push_back(parent.clone());
            }
        }
    }

    None
}

/// Commits reachable from `include` (inclusive) through parents, excluding
/// `exclude` and all of its ancestors. Descent stops at excluded commits —
/// their parents are never visited.
pub fn commits_between(graph: &RepositoryGraph, include: &CommitHash, exclude: &CommitHash) -> Vec<CommitHash> {
    let mut excluded: HashSet<CommitHash> = ancestors(graph, exclude, None).into_iter().collect();
    excluded.insert(exclude.clone());

    let mut visited = HashSet::new();
    let mut result = Vec::new();
    let mut queue = VecDeque::new();

    if !excluded.contains(include) {
        queue.push_back(include.clone());
        visited.insert(include.clone());
        result.push(include.clone());
    }

    while let Some(current) = queue.pop_front() {
        let Some(commit) = graph.get(&current) else {
            continue;
        };
        for parent in &commit.parents {
            if excluded.contains(parent) || !visited.insert(parent.clone()) {
                continue;
            }
            result.push(parent.clone());
            queue.push_back(parent.clone());
        }
    }

    result
}

/// Walk `commits` once, accumulating the aggregate counts in [`RepoStats`].
pub fn compute_stats(graph: &RepositoryGraph) -> RepoStats {
    let mut stats = RepoStats {
        total_commits: graph.commits.len(),
        root_count: graph.roots.len(),
        ..RepoStats::default()
    };

    for commit in graph.commits.values() {
        if commit.is_merge() {
            stats.merge_count += 1;
        }
        stats.max_parent_count = stats.max_parent_count.max(commit.parents.len());
        let unix = commit.committed_at.timestamp();
        stats.oldest_commit_unix = Some(stats.oldest_commit_unix.map_or(unix, |o| o.min(unix)));
        stats.newest_commit_unix = Some(stats.newest_commit_unix.map_or(unix, |n| n.max(unix)));
    }

    for git_ref in &graph.refs {
        match &git_ref.kind {
            RefKind::LocalBranch { .. } => stats.local_branch_count += 1,
            RefKind::RemoteBranch { .. } => stats.remote_branch_count += 1,
            RefKind::Tag { .. } => stats.tag_count += 1,
        }
    }

    stats
}
