use std::collections::HashMap;

use crate::hash::CommitHash;
use crate::models::{Commit, GitRef};

/// The canonical indexed snapshot of a repository: commits, refs, and the
/// derived indices the rest of the engine queries. Built once by
/// [`build_graph`] and never mutated afterward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryGraph {
    pub commits: HashMap<CommitHash, Commit>,
    pub refs: Vec<GitRef>,
    pub head: Option<CommitHash>,
    pub head_ref: Option<String>,
    pub children: HashMap<CommitHash, Vec<CommitHash>>,
    pub commits_by_ref: HashMap<String, CommitHash>,
    pub refs_by_commit: HashMap<CommitHash, Vec<GitRef>>,
    pub roots: Vec<CommitHash>,
    pub topological_order: Vec<CommitHash>,
}

impl RepositoryGraph {
    pub fn get(&self, hash: &CommitHash) -> Option<&Commit> {
        self.commits.get(hash)
    }

    pub fn children_of(&self, hash: &CommitHash) -> &[CommitHash] {
        self.children.get(hash).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn refs_at(&self, hash: &CommitHash) -> &[GitRef] {
        self.refs_by_commit
            .get(hash)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// A commit is a root if it has no parents, or if every parent lies
    /// outside the loaded commit set (a partial/shallow load).
    pub fn is_root(&self, commit: &Commit) -> bool {
        commit.parents.is_empty()
            || commit.parents.iter().all(|p| !self.commits.contains_key(p))
    }
}

/// Build a [`RepositoryGraph`] from a topo-ordered commit sequence and a ref
/// sequence. This cannot fail: Git output that references commits outside
/// the loaded set is tolerated, not rejected.
pub fn build_graph(
    commits: Vec<Commit>,
    refs: Vec<GitRef>,
    head: Option<CommitHash>,
    head_ref: Option<String>,
) -> RepositoryGraph {
    let mut graph = RepositoryGraph {
        head,
        head_ref,
        topological_order: commits.iter().map(|c| c.hash.clone()).collect(),
        ..RepositoryGraph::default()
    };

    for commit in &commits {
        for parent in &commit.parents {
            graph
                .children
                .entry(parent.clone())
                .or_default()
                .push(commit.hash.clone());
        }
    }

    for commit in commits {
        let hash = commit.hash.clone();
        graph.commits.insert(hash.clone(), commit);
    }

    for commit in graph.commits.values() {
        if graph.is_root(commit) {
            graph.roots.push(commit.hash.clone());
        }
    }
    // Preserve topological order among roots rather than hash-map order.
    let root_order: HashMap<&CommitHash, usize> = graph
        .topological_order
        .iter()
        .enumerate()
        .map(|(i, h)| (h, i))
        .collect();
    graph
        .roots
        .sort_by_key(|h| root_order.get(h).copied().unwrap_or(usize::MAX));

    for git_ref in refs {
        graph
            .commits_by_ref
            .insert(git_ref.name.clone(), git_ref.target.clone());
        graph
            .commits_by_ref
            .insert(git_ref.full_name.clone(), git_ref.target.clone());
        graph
            .refs_by_commit
            .entry(git_ref.target.clone())
            .or_default()
            .push(git_ref.clone());
        graph.refs.push(git_ref);
    }

    graph
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::models::{Identity, RefKind};

    fn hash(ch: char) -> CommitHash {
        CommitHash::new_unchecked(ch.to_string().repeat(40))
    }

    fn commit(hash_ch: char, parents: Vec<char>) -> Commit {
        Commit {
            hash: hash(hash_ch),
            parents: parents.into_iter().map(hash).collect(),
            author: Identity::default(),
            committer: Identity::default(),
            authored_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap(),
            committed_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap(),
            subject: String::new(),
            body: String::new(),
        }
    }

    #[test]
    fn linear_chain_has_single_root() {
        let commits = vec![commit('c', vec!['b']), commit('b', vec!['a']), commit('a', vec![])];
        let graph = build_graph(commits, vec![], Some(hash('c')), Some("main".to_string()));
        assert_eq!(graph.roots, vec![hash('a')]);
        assert_eq!(graph.children_of(&hash('a')), &[hash('b')]);
        assert_eq!(graph.children_of(&hash('b')), &[hash('c')]);
    }

    #[test]
    fn partial_load_treats_missing_parent_as_root() {
        let commits = vec![commit('c', vec!['b']), commit('b', vec!['a'])];
        let graph = build_graph(commits, vec![], None, None);
        assert_eq!(graph.roots, vec![hash('b')]);
    }

    #[test]
    fn refs_register_both_short_and_full_name() {
        let refs = vec![GitRef {
            name: "main".to_string(),
            full_name: "refs/heads/main".to_string(),
            target: hash('a'),
            kind: RefKind::LocalBranch {
                is_head: true,
                is_protected: false,
            },
        }];
        let graph = build_graph(vec![commit('a', vec![])], refs, Some(hash('a')), Some("main".to_string()));
        assert_eq!(graph.commits_by_ref.get("main"), Some(&hash('a')));
        assert_eq!(graph.commits_by_ref.get("refs/heads/main"), Some(&hash('a')));
        assert_eq!(graph.refs_at(&hash('a')).len(), 1);
    }

    #[test]
    fn ref_target_absent_from_commits_is_still_retained() {
        let refs = vec![GitRef {
            name: "ghost".to_string(),
            full_name: "refs/heads/ghost".to_string(),
            target: hash('z'),
            kind: RefKind::LocalBranch {
                is_head: false,
                is_protected: false,
            },
        }];
        let graph = build_graph(vec![commit('a', vec![])], refs, None, None);
        assert_eq!(graph.commits_by_ref.get("ghost"), Some(&hash('z')));
        assert!(!graph.commits.contains_key(&hash('z')));
    }

    #[test]
    fn octopus_merge_has_three_roots() {
        let commits = vec![
            commit('d', vec!['a', 'b', 'c']),
            commit('a', vec![]),
            commit('b', vec![]),
            commit('c', vec![]),
        ];
        let graph = build_graph(commits, vec![], None, None);
        let mut roots = graph.roots.clone();
        roots.sort();
        let mut expected = vec![hash('a'), hash('b'), hash('c')];
        expected.sort();
        assert_eq!(roots, expected);
    }
}
