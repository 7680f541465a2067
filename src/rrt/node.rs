use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// A grid cell carrying tree bookkeeping.
///
/// Equality is positional: two nodes are equal when they sit on the same
/// cell, whatever their cost or parent. Use [`Node::same_id`] to compare
/// identities.
#[derive(Clone, Copy, Debug, Default)]
pub struct Node {
    pub x: i32,
    pub y: i32,
    /// Path length from the root.
    pub cost: f64,
    /// Heuristic cost. Always zero for RRT.
    pub h_cost: f64,
    /// Row-major cell index, `x * n + y`.
    pub id: i32,
    /// Id of the parent node. The root is its own parent.
    pub pid: i32,
}

impl Node {
    pub fn new(x: i32, y: i32, cost: f64, h_cost: f64, id: i32, pid: i32) -> Self {
        Self {
            x,
            y,
            cost,
            h_cost,
            id,
            pid,
        }
    }

    /// Root-ready node for cell `(x, y)` of an `n`-wide grid.
    pub fn at(x: i32, y: i32, n: usize) -> Self {
        let id = Self::cell_id(x, y, n);
        Self::new(x, y, 0.0, 0.0, id, id)
    }

    /// Marker for "no node". Every field is `-1`.
    pub fn sentinel() -> Self {
        Self::new(-1, -1, -1.0, -1.0, -1, -1)
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == -1
    }

    pub fn cell_id(x: i32, y: i32, n: usize) -> i32 {
        x * n as i32 + y
    }

    pub fn same_id(&self, other: &Node) -> bool {
        self.id == other.id
    }

    pub fn is_root(&self) -> bool {
        self.id == self.pid
    }

    /// Euclidean length of the `(x, y)` offset.
    pub fn norm(&self) -> f64 {
        let x = self.x as f64;
        let y = self.y as f64;
        (x * x + y * y).sqrt()
    }

    pub fn distance(&self, other: &Node) -> f64 {
        (*other - *self).norm()
    }

    pub fn total_cost(&self) -> f64 {
        self.cost + self.h_cost
    }

    /// Orders by `cost + h_cost`, cheapest first.
    pub fn cmp_total_cost(&self, other: &Node) -> Ordering {
        self.total_cost().total_cmp(&other.total_cost())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Node {}

impl Add for Node {
    type Output = Node;

    fn add(self, rhs: Node) -> Node {
        Node {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            cost: self.cost + rhs.cost,
            ..Node::default()
        }
    }
}

impl Sub for Node {
    type Output = Node;

    fn sub(self, rhs: Node) -> Node {
        Node {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            ..Node::default()
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--------------")?;
        writeln!(f, "Node          :")?;
        writeln!(f, "x             : {}", self.x)?;
        writeln!(f, "y             : {}", self.y)?;
        writeln!(f, "Cost          : {}", self.cost)?;
        writeln!(f, "Heuristic cost: {}", self.h_cost)?;
        writeln!(f, "Id            : {}", self.id)?;
        writeln!(f, "Pid           : {}", self.pid)?;
        write!(f, "--------------")
    }
}
