use log::{debug, trace};
use rand::Rng;
use rand::rngs::ThreadRng;

use super::nearest::find_nearest;
use super::node::Node;
use super::obstacle::ObstacleList;
use super::path::extract_path;
use super::sampler::{Sampler, UniformSampler};
use crate::config::RrtConfig;
use crate::error::{Result, RrtError};
use crate::grid::{Cell, Grid};

/// How a planning run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// Every accepted node in insertion order: the start first, the goal
    /// last. Unused branches are included; see [`PlanOutcome::path`].
    Path(Vec<Node>),
    /// The iteration budget ran out before the goal became reachable.
    Exhausted,
}

impl PlanOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, PlanOutcome::Path(_))
    }

    /// The whole tree, if a path was found.
    pub fn tree(&self) -> Option<&[Node]> {
        match self {
            PlanOutcome::Path(nodes) => Some(nodes),
            PlanOutcome::Exhausted => None,
        }
    }

    /// Start-to-goal path recovered by following parent links.
    pub fn path(&self) -> Option<Vec<Node>> {
        let tree = self.tree()?;
        extract_path(tree, tree.last()?)
    }

    /// The flat node list, with failure encoded as a single sentinel node.
    pub fn into_point_list(self) -> Vec<Node> {
        match self {
            PlanOutcome::Path(nodes) => nodes,
            PlanOutcome::Exhausted => vec![Node::sentinel()],
        }
    }
}

/// RRT planner over [`Grid`]s.
pub struct Rrt<R> {
    config: RrtConfig,
    rng: R,
}

impl Rrt<ThreadRng> {
    pub fn new(config: RrtConfig) -> Self {
        Self::with_rng(config, rand::rng())
    }
}

impl<R: Rng> Rrt<R> {
    /// Planner drawing samples from `rng`. Pass a seeded generator for
    /// reproducible runs.
    pub fn with_rng(config: RrtConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &RrtConfig {
        &self.config
    }

    /// Grows a tree from `start` until `goal` is directly reachable or the
    /// iteration budget is spent.
    ///
    /// Cells added to the tree are marked [`Cell::Visited`] in `grid`.
    pub fn plan(&mut self, grid: &mut Grid, start: Node, goal: Node) -> Result<PlanOutcome> {
        let mut sampler = UniformSampler::new(grid.size(), &mut self.rng)?;
        plan_with_sampler(&self.config, grid, start, goal, &mut sampler)
    }
}

/// Plans with a thread-local generator.
pub fn plan(
    grid: &mut Grid,
    start: Node,
    goal: Node,
    max_iter_factor: usize,
    threshold: f64,
) -> Result<PlanOutcome> {
    Rrt::new(RrtConfig::new(max_iter_factor, threshold)).plan(grid, start, goal)
}

/// Plans with a caller-supplied sampler.
pub fn plan_with_sampler<S: Sampler + ?Sized>(
    config: &RrtConfig,
    grid: &mut Grid,
    start: Node,
    goal: Node,
    sampler: &mut S,
) -> Result<PlanOutcome> {
    if sampler.size() != grid.size() {
        return Err(RrtError::SamplerSizeMismatch {
            sampler: sampler.size(),
            grid: grid.size(),
        });
    }
    let mut search = Search::new(config, grid, start, goal)?;
    search.run(sampler)
}

fn check_preconditions(config: &RrtConfig, grid: &Grid, start: &Node, goal: &Node) -> Result<()> {
    let n = grid.size();
    if !config.threshold.is_finite() || config.threshold < 0.0 {
        return Err(RrtError::InvalidThreshold {
            threshold: config.threshold,
        });
    }
    for node in [start, goal] {
        if !grid.in_bounds(node.x, node.y) {
            return Err(RrtError::OutOfBounds {
                x: node.x,
                y: node.y,
                size: n,
            });
        }
    }
    if !grid.is_free(start.x, start.y) {
        return Err(RrtError::StartBlocked {
            x: start.x,
            y: start.y,
        });
    }
    if !grid.is_free(goal.x, goal.y) {
        return Err(RrtError::GoalBlocked {
            x: goal.x,
            y: goal.y,
        });
    }
    for (which, node) in [("start", start), ("goal", goal)] {
        let expected = Node::cell_id(node.x, node.y, n);
        if node.id != expected {
            return Err(RrtError::IdMismatch {
                which,
                expected,
                got: node.id,
            });
        }
    }
    if !start.is_root() {
        return Err(RrtError::StartNotRoot {
            id: start.id,
            pid: start.pid,
        });
    }
    Ok(())
}

/// State of a single planning run.
struct Search<'g> {
    grid: &'g mut Grid,
    obstacles: ObstacleList,
    // Accepted nodes in insertion order
    nodes: Vec<Node>,
    goal: Node,
    threshold: f64,
    max_iter: usize,
}

impl<'g> Search<'g> {
    fn new(config: &RrtConfig, grid: &'g mut Grid, start: Node, goal: Node) -> Result<Self> {
        check_preconditions(config, grid, &start, &goal)?;
        let obstacles = ObstacleList::from_grid(grid);
        let max_iter = config.max_iterations(grid.size());
        Ok(Self {
            grid,
            obstacles,
            nodes: vec![start],
            goal,
            threshold: config.threshold,
            max_iter,
        })
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn run<S: Sampler + ?Sized>(&mut self, sampler: &mut S) -> Result<PlanOutcome> {
        let start = self.nodes[0];
        debug!(
            "[RRT] plan: n={} obstacles={} start=({},{}) goal=({},{}) threshold={} max_iter={}",
            self.grid.size(),
            self.obstacles.len(),
            start.x,
            start.y,
            self.goal.x,
            self.goal.y,
            self.threshold,
            self.max_iter
        );
        self.mark_visited(&start)?;
        if self.goal_visible(&start) {
            debug!("[RRT] goal visible from start");
            return Ok(PlanOutcome::Path(std::mem::take(&mut self.nodes)));
        }

        let mut occupied = 0usize;
        let mut unreachable = 0usize;
        for iteration in 1..=self.max_iter {
            let mut candidate = sampler.sample();
            if !self.grid.is_free(candidate.x, candidate.y) {
                occupied += 1;
                continue;
            }
            if find_nearest(&self.nodes, &mut candidate, &self.obstacles, self.threshold).is_none() {
                unreachable += 1;
                continue;
            }
            self.mark_visited(&candidate)?;
            self.nodes.push(candidate);
            trace!(
                "[RRT] accepted ({},{}) parent={} cost={:.3}",
                candidate.x, candidate.y, candidate.pid, candidate.cost
            );
            if self.goal_visible(&candidate) {
                debug!(
                    "[RRT] goal reached after {} iterations, tree size {}, cost {:.3}",
                    iteration,
                    self.len(),
                    self.goal.cost
                );
                return Ok(PlanOutcome::Path(std::mem::take(&mut self.nodes)));
            }
        }

        debug!(
            "[RRT] FAILED: budget of {} iterations exhausted (tree size {}, {} occupied, {} unreachable)",
            self.max_iter,
            self.len(),
            occupied,
            unreachable
        );
        self.nodes.clear();
        Ok(PlanOutcome::Exhausted)
    }

    /// Appends the goal when it is within the threshold of `node` and the
    /// segment between them is clear.
    fn goal_visible(&mut self, node: &Node) -> bool {
        if self.obstacles.blocks(node, &self.goal) {
            return false;
        }
        let distance = node.distance(&self.goal);
        if distance > self.threshold {
            return false;
        }
        self.goal.pid = node.id;
        self.goal.cost = node.cost + distance;
        self.nodes.push(self.goal);
        true
    }

    fn mark_visited(&mut self, node: &Node) -> Result<()> {
        self.grid.set(node.x, node.y, Cell::Visited)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{PlanOutcome, Rrt, plan_with_sampler};
    use crate::config::RrtConfig;
    use crate::error::RrtError;
    use crate::grid::{Cell, Grid};
    use crate::rrt::{Node, Sampler};

    /// Replays a fixed list of cells, then repeats the last one.
    struct Scripted {
        size: usize,
        cells: Vec<(i32, i32)>,
        next: usize,
    }

    impl Sampler for Scripted {
        fn sample(&mut self) -> Node {
            let (x, y) = self.cells[self.next.min(self.cells.len() - 1)];
            self.next += 1;
            let mut node = Node::at(x, y, self.size);
            node.pid = 0;
            node
        }

        fn size(&self) -> usize {
            self.size
        }
    }

    #[test]
    fn goal_in_reach_of_start() {
        let mut grid = Grid::new(4).unwrap();
        let config = RrtConfig::new(1, 2.0);
        let mut rrt = Rrt::with_rng(config, StdRng::seed_from_u64(1));
        let outcome = rrt.plan(&mut grid, Node::at(0, 0, 4), Node::at(1, 1, 4)).unwrap();
        let tree = outcome.tree().unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[1].pid, tree[0].id);
        assert!((tree[1].cost - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(grid.get(0, 0).unwrap(), Cell::Visited);
    }

    #[test]
    fn scripted_growth_links_each_sample() {
        let mut grid = Grid::new(8).unwrap();
        let mut sampler = Scripted {
            size: 8,
            // (0,0) is already visited, (5,5) is out of reach of the tree.
            cells: vec![(0, 0), (1, 1), (5, 5), (2, 2), (3, 3), (4, 4)],
            next: 0,
        };
        let config = RrtConfig::new(1, 1.5);
        let outcome = plan_with_sampler(
            &config,
            &mut grid,
            Node::at(0, 0, 8),
            Node::at(5, 5, 8),
            &mut sampler,
        )
        .unwrap();
        let tree = outcome.tree().unwrap();
        let cells: Vec<_> = tree.iter().map(|n| (n.x, n.y)).collect();
        assert_eq!(cells, vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4), (5, 5)]);
        for pair in tree.windows(2) {
            assert_eq!(pair[1].pid, pair[0].id);
        }
        assert!((tree[5].cost - 5.0 * 2f64.sqrt()).abs() < 1e-9);
        assert_eq!(grid.get(3, 3).unwrap(), Cell::Visited);
        // The goal itself is never marked.
        assert_eq!(grid.get(5, 5).unwrap(), Cell::Free);
    }

    #[test]
    fn exhausted_budget_clears_tree() {
        let mut grid = Grid::new(4).unwrap();
        let mut sampler = Scripted {
            size: 4,
            cells: vec![(3, 0)],
            next: 0,
        };
        let config = RrtConfig::new(2, 1.0);
        let outcome = plan_with_sampler(
            &config,
            &mut grid,
            Node::at(0, 0, 4),
            Node::at(3, 3, 4),
            &mut sampler,
        )
        .unwrap();
        assert_eq!(outcome, PlanOutcome::Exhausted);
        assert_eq!(sampler.next, 32);
        let points = outcome.into_point_list();
        assert_eq!(points.len(), 1);
        assert!(points[0].is_sentinel());
    }

    #[test]
    fn rejects_bad_preconditions() {
        let mut grid = Grid::from_rows(vec![vec![0, 1], vec![0, 0]]).unwrap();
        let mut rrt = Rrt::with_rng(RrtConfig::default(), StdRng::seed_from_u64(0));
        assert_eq!(
            rrt.plan(&mut grid, Node::at(0, 0, 2), Node::at(0, 1, 2)),
            Err(RrtError::GoalBlocked { x: 0, y: 1 })
        );
        assert_eq!(
            rrt.plan(&mut grid, Node::at(0, 1, 2), Node::at(1, 1, 2)),
            Err(RrtError::StartBlocked { x: 0, y: 1 })
        );
        assert!(matches!(
            rrt.plan(&mut grid, Node::at(0, 0, 2), Node::at(2, 0, 2)),
            Err(RrtError::OutOfBounds { .. })
        ));
        let mut start = Node::at(0, 0, 2);
        start.pid = 3;
        assert_eq!(
            rrt.plan(&mut grid, start, Node::at(1, 1, 2)),
            Err(RrtError::StartNotRoot { id: 0, pid: 3 })
        );
        let mut goal = Node::at(1, 1, 2);
        goal.id = 7;
        assert!(matches!(
            rrt.plan(&mut grid, Node::at(0, 0, 2), goal),
            Err(RrtError::IdMismatch { which: "goal", .. })
        ));
        let mut nan = Rrt::with_rng(RrtConfig::new(1, f64::NAN), StdRng::seed_from_u64(0));
        assert!(matches!(
            nan.plan(&mut grid, Node::at(0, 0, 2), Node::at(1, 1, 2)),
            Err(RrtError::InvalidThreshold { .. })
        ));
        // Nothing was marked by the rejected calls.
        assert_eq!(grid.get(0, 0).unwrap(), Cell::Free);
    }

    #[test]
    fn sampler_must_match_grid() {
        let mut grid = Grid::new(4).unwrap();
        let mut sampler = Scripted {
            size: 5,
            cells: vec![(0, 0)],
            next: 0,
        };
        let result = plan_with_sampler(
            &RrtConfig::default(),
            &mut grid,
            Node::at(0, 0, 4),
            Node::at(3, 3, 4),
            &mut sampler,
        );
        assert_eq!(
            result,
            Err(RrtError::SamplerSizeMismatch { sampler: 5, grid: 4 })
        );
    }

    #[test]
    fn off_grid_samples_are_skipped() {
        let mut grid = Grid::new(4).unwrap();
        let mut sampler = Scripted {
            size: 4,
            cells: vec![(9, 9), (-1, 2), (4, 0)],
            next: 0,
        };
        let config = RrtConfig::new(1, 1.0);
        let outcome = plan_with_sampler(
            &config,
            &mut grid,
            Node::at(0, 0, 4),
            Node::at(3, 3, 4),
            &mut sampler,
        )
        .unwrap();
        assert_eq!(outcome, PlanOutcome::Exhausted);
        assert_eq!(sampler.next, 16);
        let visited: Vec<_> = grid
            .cells()
            .filter(|&(_, _, c)| c == Cell::Visited)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(visited, vec![(0, 0)]);
    }
}
