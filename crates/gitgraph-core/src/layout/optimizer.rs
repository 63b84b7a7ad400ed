use std::collections::HashMap;

use super::visual::{VisualEdge, VisualGraph};

/// Two edges cross iff both row spans overlap strictly, both lane spans
/// overlap strictly, and their lane-direction signs differ (one leans
/// left-to-right, the other right-to-left). Horizontal-only edges (zero row
/// span) and vertical-only edges (zero lane span) never cross. Strict
/// inequalities are deliberate: touching-but-not-overlapping spans must not
/// count.
fn crosses(a: &VisualEdge, b: &VisualEdge, lane_of: &HashMap<usize, usize>) -> bool {
    let (a_row_lo, a_row_hi) = a.row_span();
    let (b_row_lo, b_row_hi) = b.row_span();
    if !(a_row_lo < b_row_hi && b_row_lo < a_row_hi) {
        return false;
    }

    let a_from = *lane_of.get(&a.from_lane).unwrap_or(&a.from_lane);
    let a_to = *lane_of.get(&a.to_lane).unwrap_or(&a.to_lane);
    let b_from = *lane_of.get(&b.from_lane).unwrap_or(&b.from_lane);
    let b_to = *lane_of.get(&b.to_lane).unwrap_or(&b.to_lane);

    let (a_lane_lo, a_lane_hi) = (a_from.min(a_to), a_from.max(a_to));
    let (b_lane_lo, b_lane_hi) = (b_from.min(b_to), b_from.max(b_to));
    if !(a_lane_lo < b_lane_hi && b_lane_lo < a_lane_hi) {
        return false;
    }

    let a_sign = (a_to as i64 - a_from as i64).signum();
    let b_sign = (b_to as i64 - b_from as i64).signum();
    if a_sign == 0 || b_sign == 0 {
        return false;
    }

    a_sign != b_sign
}

fn count_crossings(edges: &[VisualEdge], lane_of: &HashMap<usize, usize>) -> usize {
    let mut total = 0;
    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            if crosses(&edges[i], &edges[j], lane_of) {
                total += 1;
            }
        }
    }
    total
}

fn apply_mapping(graph: &VisualGraph, lane_of: &HashMap<usize, usize>) -> VisualGraph {
    let mut out = graph.clone();
    for commit in &mut out.commits {
        commit.lane = *lane_of.get(&commit.lane).unwrap_or(&commit.lane);
    }
    for edge in &mut out.edges {
        edge.from_lane = *lane_of.get(&edge.from_lane).unwrap_or(&edge.from_lane);
        edge.to_lane = *lane_of.get(&edge.to_lane).unwrap_or(&edge.to_lane);
    }
    for lanes in out.active_lanes_at_row.values_mut() {
        for lane in lanes.iter_mut() {
            *lane = *lane_of.get(lane).unwrap_or(lane);
        }
        lanes.sort_unstable();
    }
    out.rebuild_indices();
    out
}

/// Greedily swap adjacent lanes to reduce the number of crossing edges.
///
/// This is a local search, not an optimal minimizer: it repeatedly scans
/// every adjacent lane pair, applies the first swap that strictly lowers
/// the total crossing count, and restarts the scan, stopping when a full
/// pass finds no improving swap. Different input orderings can converge to
/// different local optima; this is accepted rather than solved exactly,
/// since optimal crossing minimization is NP-hard in general.
pub fn optimize_lanes(graph: &VisualGraph) -> VisualGraph {
    if graph.total_lanes <= 1 {
        return graph.clone();
    }

    let mut lane_of: HashMap<usize, usize> = (0..graph.total_lanes).map(|l| (l, l)).collect();
    let mut best_crossings = count_crossings(&graph.edges, &lane_of);

    loop {
        let mut improved = false;

        for lane in 0..graph.total_lanes.saturating_sub(1) {
            let other = lane + 1;
            let mut candidate = lane_of.clone();
            swap_values(&mut candidate, lane, other);

            let crossings = count_crossings(&graph.edges, &candidate);
            if crossings < best_crossings {
                lane_of = candidate;
                best_crossings = crossings;
                improved = true;
                break;
            }
        }

        if !improved {
            break;
        }
    }

    apply_mapping(graph, &lane_of)
}

fn swap_values(lane_of: &mut HashMap<usize, usize>, a: usize, b: usize) {
    for value in lane_of.values_mut() {
        if *value == a {
            *value = b;
        } else if *value == b {
            *value = a;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::hash::CommitHash;
    use crate::layout::engine::{layout, LayoutOptions};
    use crate::models::{Commit, Identity};
    use chrono::DateTime;

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

    fn test_edge(from_row: usize, from_lane: usize, to_row: i64, to_lane: usize) -> VisualEdge {
        VisualEdge {
            id: format!("{from_row}-{from_lane}-{to_row}-{to_lane}"),
            from_hash: hash('a'),
            from_row,
            from_lane,
            to_hash: hash('b'),
            to_row,
            to_lane,
            parent_index: 0,
            edge_type: crate::layout::visual::EdgeType::Fork,
        }
    }

    #[test]
    fn opposite_direction_edges_with_overlapping_spans_cross() {
        let identity: HashMap<usize, usize> = (0..4).map(|l| (l, l)).collect();
        // a: row 0->2, lane 0->2 (left-to-right); b: row 0->2, lane 2->0 (right-to-left).
        let a = test_edge(2, 0, 0, 2);
        let b = test_edge(2, 2, 0, 0);
        assert!(crosses(&a, &b, &identity));
    }

    #[test]
    fn same_direction_edges_never_cross() {
        let identity: HashMap<usize, usize> = (0..4).map(|l| (l, l)).collect();
        // Both edges span rows 0..2 and lean left-to-right (lanes overlap
        // too: a covers 0..2, b covers 1..3) but share a direction sign.
        let a = test_edge(2, 0, 0, 2);
        let b = test_edge(2, 1, 0, 3);
        assert!(!crosses(&a, &b, &identity));
    }

    #[test]
    fn touching_but_not_overlapping_spans_never_cross() {
        let identity: HashMap<usize, usize> = (0..4).map(|l| (l, l)).collect();
        // Row spans touch at row 2 but don't strictly overlap.
        let a = test_edge(2, 0, 0, 2);
        let b = test_edge(4, 2, 2, 0);
        assert!(!crosses(&a, &b, &identity));
    }

    #[test]
    fn straight_edges_never_cross() {
        let identity: HashMap<usize, usize> = (0..4).map(|l| (l, l)).collect();
        let a = test_edge(2, 1, 0, 1);
        let b = test_edge(2, 1, 0, 1);
        assert!(!crosses(&a, &b, &identity));
    }

    #[test]
    fn single_lane_graph_is_returned_unchanged() {
        let commits = vec![commit('b', vec!['a']), commit('a', vec![])];
        let graph = build_graph(commits, vec![], None, None);
        let visual = layout(&graph, &LayoutOptions::default());
        let optimized = optimize_lanes(&visual);
        assert_eq!(optimized, visual);
    }

    #[test]
    fn optimizer_never_increases_crossing_count() {
        let commits = vec![
            commit('d', vec!['b', 'c']),
            commit('b', vec!['a']),
            commit('c', vec!['a']),
            commit('a', vec![]),
        ];
        let graph = build_graph(commits, vec![], Some(hash('d')), None);
        let visual = layout(&graph, &LayoutOptions::default());
        let identity: HashMap<usize, usize> = (0..visual.total_lanes).map(|l| (l, l)).collect();
        let before = count_crossings(&visual.edges, &identity);

        let optimized = optimize_lanes(&visual);
        let identity_after: HashMap<usize, usize> = (0..optimized.total_lanes).map(|l| (l, l)).collect();
        let after = count_crossings(&optimized.edges, &identity_after);

        assert!(after <= before);
    }

    #[test]
    fn optimized_graph_preserves_commit_and_edge_counts() {
        let commits = vec![
            commit('d', vec!['a', 'b', 'c']),
            commit('a', vec![]),
            commit('b', vec![]),
            commit('c', vec![]),
        ];
        let graph = build_graph(commits, vec![], Some(hash('d')), None);
        let visual = layout(&graph, &LayoutOptions::default());
        let optimized = optimize_lanes(&visual);

        assert_eq!(optimized.commits.len(), visual.commits.len());
        assert_eq!(optimized.edges.len(), visual.edges.len());
        assert_eq!(optimized.total_lanes, visual.total_lanes);
    }
}
