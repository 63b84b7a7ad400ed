//! Parsing, graph construction, traversal, and visual layout for Git commit
//! history — the pure, dependency-free-of-process-spawning core consumed by
//! any frontend that wants to render a commit graph.
//!
//! Nothing in this crate shells out to `git`; callers capture `git log` and
//! `git for-each-ref` output themselves (see the `gitgraph-cli` crate for an
//! example) and hand the raw buffers to [`parser`].

pub mod config;
pub mod error;
pub mod graph;
pub mod hash;
pub mod layout;
pub mod models;
pub mod parser;
pub mod protected;
pub mod traversal;

pub use config::Config;
pub use error::{GitGraphError, Result};
pub use graph::{build_graph, RepositoryGraph};
pub use hash::{is_valid_hash, CommitHash};
pub use layout::{
    bounding_box, edge_path, edge_path_to_svg, find_commit_at_position, layout, optimize_lanes,
    visible_commits, visible_edges, BoundingBox, EdgePath, EdgeType, LayoutOptions, Point, VisualCommit,
    VisualEdge, VisualGraph, VisualRef, DEFAULT_POSITION_TOLERANCE,
};
pub use models::{Commit, GitRef, Identity, RefKind, RepoStats};
pub use parser::{
    parse_git_log, parse_head, parse_refs, refs_from_decoration, HeadInfo, ParseError, ParseErrorKind,
    ParsedLog,
};
pub use protected::is_protected;
pub use traversal::{ancestors, commits_between, compute_stats, descendants, is_ancestor, merge_base};
