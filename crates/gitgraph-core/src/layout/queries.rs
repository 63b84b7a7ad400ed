use super::visual::{EdgeType, VisualCommit, VisualEdge, VisualGraph};

/// Commits whose row falls in the inclusive range `[start, min(end, total_rows-1)]`.
pub fn visible_commits(graph: &VisualGraph, start: usize, end: usize) -> Vec<&VisualCommit> {
    if graph.total_rows == 0 {
        return Vec::new();
    }
    let end = end.min(graph.total_rows - 1);
    graph
        .commits
        .iter()
        .filter(|c| c.row >= start && c.row <= end)
        .collect()
}

/// Edges whose row span overlaps `[start, end]`.
pub fn visible_edges(graph: &VisualGraph, start: usize, end: usize) -> Vec<&VisualEdge> {
    graph
        .edges
        .iter()
        .filter(|e| {
            let (lo, hi) = e.row_span();
            lo <= end as i64 && hi >= start as i64
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_row: usize,
    pub max_row: usize,
    pub min_lane: usize,
    pub max_lane: usize,
}

/// Componentwise min/max of row and lane over the given commits and edges.
/// An empty commit set yields an all-zero box.
pub fn bounding_box(commits: &[&VisualCommit], edges: &[&VisualEdge]) -> BoundingBox {
    if commits.is_empty() {
        return BoundingBox::default();
    }

    let mut min_row = usize::MAX;
    let mut max_row = 0;
    let mut min_lane = usize::MAX;
    let mut max_lane = 0;

    for c in commits {
        min_row = min_row.min(c.row);
        max_row = max_row.max(c.row);
        min_lane = min_lane.min(c.lane);
        max_lane = max_lane.max(c.lane);
    }
    for e in edges {
        let (row_lo, row_hi) = e.row_span();
        if row_lo >= 0 {
            min_row = min_row.min(row_lo as usize);
        }
        max_row = max_row.max(row_hi.max(0) as usize);
        let (lane_lo, lane_hi) = e.lane_span();
        min_lane = min_lane.min(lane_lo);
        max_lane = max_lane.max(lane_hi);
    }

    BoundingBox {
        min_row,
        max_row,
        min_lane,
        max_lane,
    }
}

/// Find the commit at `row` whose lane is within `tolerance` of `lane`.
pub fn find_commit_at_position(graph: &VisualGraph, row: usize, lane: f64, tolerance: f64) -> Option<&VisualCommit> {
    let commit = graph.commit_at_row(row)?;
    if (commit.lane as f64 - lane).abs() <= tolerance {
        Some(commit)
    } else {
        None
    }
}

pub const DEFAULT_POSITION_TOLERANCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub row: f64,
    pub lane: f64,
}

/// A 2, 3, or 4-point polyline describing how an edge is routed.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    pub points: Vec<Point>,
}

/// Piecewise route for an edge:
/// - same-lane edges: a straight 2-point line.
/// - `merge` edges: an L-shape, horizontal first at `from_row`, then vertical.
/// - `fork` edges: a Z-shape with a midpoint row at `floor((from_row+to_row)/2)`.
pub fn edge_path(edge: &VisualEdge) -> EdgePath {
    let from = Point {
        row: edge.from_row as f64,
        lane: edge.from_lane as f64,
    };
    let to_row = if edge.to_row >= 0 {
        edge.to_row as f64
    } else {
        edge.from_row as f64
    };
    let to = Point {
        row: to_row,
        lane: edge.to_lane as f64,
    };

    if edge.from_lane == edge.to_lane {
        return EdgePath {
            points: vec![from, to],
        };
    }

    match edge.edge_type {
        EdgeType::Merge => EdgePath {
            points: vec![
                from,
                Point {
                    row: edge.from_row as f64,
                    lane: edge.to_lane as f64,
                },
                to,
            ],
        },
        EdgeType::Fork | EdgeType::Straight => {
            let mid_row = ((edge.from_row as f64 + to.row) / 2.0).floor();
            EdgePath {
                points: vec![
                    from,
                    Point {
                        row: mid_row,
                        lane: edge.from_lane as f64,
                    },
                    Point {
                        row: mid_row,
                        lane: edge.to_lane as f64,
                    },
                    to,
                ],
            }
        }
    }
}

/// Render an [`EdgePath`] as an SVG path's `d` attribute. Coordinates place
/// each (row, lane) at the center of its grid cell.
pub fn edge_path_to_svg(points: &[Point], row_height: f64, lane_width: f64, use_curves: bool) -> String {
    if points.is_empty() {
        return String::new();
    }

    let coord = |p: &Point| {
        (
            p.lane * lane_width + lane_width / 2.0,
            p.row * row_height + row_height / 2.0,
        )
    };

    let (x0, y0) = coord(&points[0]);
    let mut svg = format!("M {x0} {y0}");

    if !use_curves || points.len() < 3 {
        for p in &points[1..] {
            let (x, y) = coord(p);
            svg.push_str(&format!(" L {x} {y}"));
        }
        return svg;
    }

    for i in 1..points.len() - 1 {
        let (cx, cy) = coord(&points[i]);
        let (nx, ny) = coord(&points[i + 1]);
        let mx = (cx + nx) / 2.0;
        let my = (cy + ny) / 2.0;
        svg.push_str(&format!(" Q {cx} {cy} {mx} {my}"));
    }
    let (lx, ly) = coord(&points[points.len() - 1]);
    svg.push_str(&format!(" L {lx} {ly}"));
    svg
}
