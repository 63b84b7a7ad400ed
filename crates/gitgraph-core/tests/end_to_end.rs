//! Exercises the full parse -> graph -> layout pipeline against the
//! reference scenarios a renderer consuming this crate has to get right.

use chrono::DateTime;
use gitgraph_core::{
    build_graph, compute_stats, is_protected, layout, parse_git_log, parse_head, parse_refs,
    EdgeType, LayoutOptions,
};

fn rfc3339(s: &str) -> chrono::DateTime<chrono::FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("valid timestamp")
}

/// Builds one `git log` record in the `0x00`/`0x01`-delimited format the
/// parser expects: hash, parents, author name/email, authored date,
/// committer name/email, committed date, subject, body.
fn record(hash: &str, parents: &[&str], subject: &str) -> String {
    format!(
        "{hash}\x00{parents}\x00Ada Dev\x00ada@example.com\x002024-01-01T00:00:00+00:00\x00\
         Ada Dev\x00ada@example.com\x002024-01-01T00:00:00+00:00\x00{subject}\x00\x01",
        hash = hash,
        parents = parents.join(" "),
    )
}

fn h(ch: char) -> String {
    ch.to_string().repeat(40)
}

#[test]
fn linear_three_commit_chain_lays_out_newest_first_in_a_single_lane() {
    let log = [
        record(&h('c'), &[&h('b')], "third"),
        record(&h('b'), &[&h('a')], "second"),
        record(&h('a'), &[], "first"),
    ]
    .concat();

    let parsed = parse_git_log(&log);
    assert!(parsed.errors.is_empty());
    assert_eq!(parsed.commits.len(), 3);

    let refs_buffer = format!("{} refs/heads/main commit\n", h('c'));
    let refs = parse_refs(&refs_buffer, Some("main"));
    let head = parse_head(Some("main"), Some(&h('c')));

    let graph = build_graph(parsed.commits, refs, head.head_commit, head.head_ref);
    let visual = layout(&graph, &LayoutOptions::default());

    assert_eq!(visual.total_lanes, 1);
    assert_eq!(visual.total_rows, 3);
    assert_eq!(visual.commits[0].hash.as_str(), h('c'));
    assert_eq!(visual.commits[0].row, 0);
    assert_eq!(visual.commits[1].row, 1);
    assert_eq!(visual.commits[2].row, 2);
    assert!(visual.commits[2].is_root);
    assert!(visual.commits[0].is_head);
    assert!(visual.edges.iter().all(|e| e.edge_type == EdgeType::Straight));
}

#[test]
fn simple_branch_allocates_a_second_lane_and_a_fork_edge() {
    // main and feature both branch off a; main is HEAD.
    let log = [
        record(&h('m'), &[&h('a')], "main tip"),
        record(&h('f'), &[&h('a')], "feature tip"),
        record(&h('a'), &[], "base"),
    ]
    .concat();

    let parsed = parse_git_log(&log);
    let refs_buffer = format!(
        "{} refs/heads/main commit\n{} refs/heads/feature commit\n",
        h('m'),
        h('f')
    );
    let refs = parse_refs(&refs_buffer, Some("main"));
    let head = parse_head(Some("main"), Some(&h('m')));

    let graph = build_graph(parsed.commits, refs, head.head_commit, head.head_ref);
    let visual = layout(&graph, &LayoutOptions::default());

    assert_eq!(visual.total_lanes, 2);
    let main_tip = visual.commit_by_hash(&gitgraph_core::CommitHash::parse(&h('m')).unwrap()).unwrap();
    let feature_tip = visual.commit_by_hash(&gitgraph_core::CommitHash::parse(&h('f')).unwrap()).unwrap();
    assert_ne!(main_tip.lane, feature_tip.lane);
    assert!(main_tip.is_head);
    assert!(!feature_tip.is_head);
    assert!(visual.edges.iter().any(|e| e.edge_type == EdgeType::Fork));
}

#[test]
fn diamond_merge_marks_the_second_parent_edge_as_a_merge() {
    let log = [
        record(&h('d'), &[&h('b'), &h('c')], "merge"),
        record(&h('b'), &[&h('a')], "left"),
        record(&h('c'), &[&h('a')], "right"),
        record(&h('a'), &[], "base"),
    ]
    .concat();

    let parsed = parse_git_log(&log);
    let graph = build_graph(parsed.commits, vec![], None, None);
    let visual = layout(&graph, &LayoutOptions::default());
    let stats = compute_stats(&graph);

    assert_eq!(stats.merge_count, 1);
    assert_eq!(stats.root_count, 1);
    let d = visual.commit_by_hash(&gitgraph_core::CommitHash::parse(&h('d')).unwrap()).unwrap();
    assert!(d.is_merge);
    let merge_edges: Vec<_> = visual
        .edges
        .iter()
        .filter(|e| e.from_hash.as_str() == h('d') && e.edge_type == EdgeType::Merge)
        .collect();
    assert_eq!(merge_edges.len(), 1);
    assert_eq!(merge_edges[0].to_hash.as_str(), h('c'));
}

#[test]
fn octopus_merge_has_one_straight_or_fork_edge_and_n_minus_one_merge_edges() {
    let log = [
        record(&h('d'), &[&h('a'), &h('b'), &h('c')], "octopus"),
        record(&h('a'), &[], "a"),
        record(&h('b'), &[], "b"),
        record(&h('c'), &[], "c"),
    ]
    .concat();

    let parsed = parse_git_log(&log);
    let graph = build_graph(parsed.commits, vec![], None, None);
    let visual = layout(&graph, &LayoutOptions::default());
    let stats = compute_stats(&graph);

    assert_eq!(stats.root_count, 3);
    assert_eq!(stats.max_parent_count, 3);
    let d_edges: Vec<_> = visual.edges.iter().filter(|e| e.from_hash.as_str() == h('d')).collect();
    assert_eq!(d_edges.len(), 3);
    let merge_count = d_edges.iter().filter(|e| e.edge_type == EdgeType::Merge).count();
    assert_eq!(merge_count, 2);
}

#[test]
fn partial_load_treats_commits_with_unknown_parents_as_roots_without_failing() {
    // Only the tip and its immediate parent are loaded; the grandparent
    // never appears in the buffer, simulating a `-n2` shallow `git log`.
    let log = [record(&h('c'), &[&h('b')], "tip"), record(&h('b'), &[&h('a')], "middle")].concat();

    let parsed = parse_git_log(&log);
    assert!(parsed.errors.is_empty());

    let graph = build_graph(parsed.commits, vec![], None, None);
    assert_eq!(graph.roots, vec![gitgraph_core::CommitHash::parse(&h('b')).unwrap()]);

    let visual = layout(&graph, &LayoutOptions::default());
    let edge_to_missing_parent = visual.edges.iter().find(|e| e.to_hash.as_str() == h('a')).unwrap();
    assert_eq!(edge_to_missing_parent.to_row, -1);

    let b = visual.commit_by_hash(&gitgraph_core::CommitHash::parse(&h('b')).unwrap()).unwrap();
    assert!(b.is_root);
}

#[test]
fn protected_branch_globs_match_release_branches_but_not_feature_branches() {
    let patterns = vec!["main".to_string(), "release/*".to_string()];
    assert!(is_protected("main", &patterns));
    assert!(is_protected("release/1.0", &patterns));
    assert!(is_protected("release/2.1.3", &patterns));
    assert!(!is_protected("feature/login", &patterns));
    assert!(!is_protected("main2", &patterns));

    let log = [record(&h('a'), &[], "base")].concat();
    let parsed = parse_git_log(&log);
    let refs_buffer = format!("{} refs/heads/release/9.0 commit\n", h('a'));
    let refs = parse_refs(&refs_buffer, None);
    let graph = build_graph(parsed.commits, refs, None, None);
    let options = LayoutOptions {
        protected_branches: patterns,
    };
    let visual = layout(&graph, &options);
    let a = visual.commit_by_hash(&gitgraph_core::CommitHash::parse(&h('a')).unwrap()).unwrap();
    assert!(a.refs[0].is_protected);
}

#[test]
fn decoration_string_and_for_each_ref_agree_on_head_branch_and_tag() {
    let commit_hash = gitgraph_core::CommitHash::parse(&h('a')).unwrap();
    let decoration_refs =
        gitgraph_core::refs_from_decoration("HEAD -> refs/heads/main, tag: v1.0", &commit_hash);

    assert!(decoration_refs.iter().any(|r| r.name == "main"));
    assert!(decoration_refs.iter().any(|r| r.name == "v1.0"));
    let main_ref = decoration_refs.iter().find(|r| r.name == "main").unwrap();
    assert!(main_ref.kind.is_head());
}

#[test]
fn rfc3339_timestamps_round_trip_through_the_commit_model() {
    let log = [record(&h('a'), &[], "base")].concat();
    let parsed = parse_git_log(&log);
    assert_eq!(parsed.commits.len(), 1);
    assert_eq!(parsed.commits[0].authored_at, rfc3339("2024-01-01T00:00:00+00:00"));
}
