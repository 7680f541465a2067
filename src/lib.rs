//! Rapidly-exploring random tree (RRT) planning on square occupancy grids.
//!
//! Obstacles are grid cells treated as unit squares. The planner grows a tree
//! of free cells from the start, connecting each sample to its nearest
//! reachable tree node, and stops as soon as the goal is directly reachable
//! from the newest node.
//!
//! ```no_run
//! use rrt_grid::{Grid, Node, plan};
//!
//! let mut grid = Grid::new(8)?;
//! let outcome = plan(&mut grid, Node::at(0, 0, 8), Node::at(7, 7, 8), 20, 2.0)?;
//! if let Some(path) = outcome.path() {
//!     grid.mark_path(&path)?;
//! }
//! println!("{grid}");
//! # Ok::<(), rrt_grid::RrtError>(())
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod rrt;

pub use config::{GridSettings, PlannerConfig, RrtConfig};
pub use error::RrtError;
pub use grid::{Cell, Grid};
pub use rrt::{Node, PlanOutcome, Rrt, plan};
