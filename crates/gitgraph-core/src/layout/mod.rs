pub mod engine;
pub mod optimizer;
pub mod queries;
pub mod visual;

pub use engine::{layout, LayoutOptions};
pub use optimizer::optimize_lanes;
pub use queries::{
    bounding_box, edge_path, edge_path_to_svg, find_commit_at_position, visible_commits, visible_edges,
    BoundingBox, EdgePath, Point, DEFAULT_POSITION_TOLERANCE,
};
pub use visual::{EdgeType, VisualCommit, VisualEdge, VisualGraph, VisualRef};
