use crate::grid::{Cell, Grid};

use super::node::Node;

/// Corner values closer than this to the line count as touching it.
const TOUCH_TOLERANCE: f64 = 1e-6;

/// Static obstacles of one planning run.
///
/// Each obstacle occupies the unit square centred on its cell.
#[derive(Debug, Clone, Default)]
pub struct ObstacleList {
    obstacles: Vec<Node>,
}

impl ObstacleList {
    /// Collects every [`Cell::Obstacle`] of `grid` in row-major order.
    pub fn from_grid(grid: &Grid) -> Self {
        let n = grid.size();
        let obstacles = grid
            .cells()
            .filter(|&(_, _, cell)| cell == Cell::Obstacle)
            .map(|(x, y, _)| Node::new(x, y, 0.0, 0.0, Node::cell_id(x, y, n), 0))
            .collect();
        Self { obstacles }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.obstacles.iter()
    }

    /// Whether the segment from `a` to `b` passes through any obstacle square.
    ///
    /// The line is written as `x = slope * y + c`, so a segment with
    /// `a.y == b.y` is the degenerate case: it is blocked by any obstacle on
    /// that row within the x span. Otherwise each obstacle overlapping the
    /// segment's bounding box has its four corners substituted into the line
    /// equation. Corners within [`TOUCH_TOLERANCE`] count as zero; a square
    /// whose corner signs sum to less than 3 in magnitude is cut or grazed.
    ///
    /// An obstacle sitting exactly on `a` or `b` is ignored.
    pub fn blocks(&self, a: &Node, b: &Node) -> bool {
        let candidates = self.obstacles.iter().filter(|o| *o != a && *o != b);
        if b.y - a.y == 0 {
            let c = b.y as f64;
            return candidates
                .filter(|o| between(o.x, a.x, b.x))
                .any(|o| o.y as f64 == c);
        }

        let slope = (b.x - a.x) as f64 / (b.y - a.y) as f64;
        let c = b.x as f64 - slope * b.y as f64;
        candidates
            .filter(|o| between(o.y, a.y, b.y) && between(o.x, a.x, b.x))
            .any(|o| {
                let ox = o.x as f64;
                let oy = o.y as f64;
                let corners = [
                    ox + 0.5 - slope * (oy + 0.5) - c,
                    ox + 0.5 - slope * (oy - 0.5) - c,
                    ox - 0.5 - slope * (oy + 0.5) - c,
                    ox - 0.5 - slope * (oy - 0.5) - c,
                ];
                let sides: f64 = corners
                    .iter()
                    .filter(|v| v.abs() > TOUCH_TOLERANCE)
                    .map(|v| v.signum())
                    .sum();
                sides.abs() < 3.0
            })
    }
}

/// Inclusive range test that accepts the bounds in either order.
fn between(v: i32, a: i32, b: i32) -> bool {
    (a >= v && v >= b) || (a <= v && v <= b)
}
