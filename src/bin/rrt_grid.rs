//! Plans a path across a random grid and prints the result.
//!
//! The start is the top-left cell and the goal the bottom-right one; both
//! are cleared before planning.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use rrt_grid::grid::render_costs;
use rrt_grid::{Cell, Grid, Node, PlanOutcome, PlannerConfig, Rrt};

#[derive(Parser)]
#[command(name = "rrt_grid")]
#[command(version, about = "RRT path planning on a random occupancy grid", long_about = None)]
struct Cli {
    /// YAML config file; command-line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cells per side
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Longest allowed single extension
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Iteration budget multiplier (budget = factor * n * n)
    #[arg(short, long)]
    factor: Option<usize>,

    /// Seed for grid generation and sampling
    #[arg(short, long)]
    seed: Option<u64>,

    /// Plan on a grid without obstacles
    #[arg(long)]
    empty: bool,

    /// Print without ANSI colours
    #[arg(long)]
    no_color: bool,

    /// Also print the accumulated cost of every tree cell
    #[arg(long)]
    costs: bool,
}

impl Cli {
    fn resolve(&self) -> Result<PlannerConfig> {
        let mut config = match &self.config {
            Some(path) => PlannerConfig::load(path)?,
            None => PlannerConfig::default(),
        };
        if let Some(size) = self.size {
            config.grid.size = size;
        }
        if let Some(seed) = self.seed {
            config.grid.seed = Some(seed);
        }
        if self.empty {
            config.grid.obstacle_free = true;
        }
        if let Some(threshold) = self.threshold {
            config.rrt.threshold = threshold;
        }
        if let Some(factor) = self.factor {
            config.rrt.max_iter_factor = factor;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.resolve()?;
    let color = !cli.no_color;
    let n = config.grid.size;

    let mut rng = match config.grid.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut grid = if config.grid.obstacle_free {
        Grid::new(n)?
    } else {
        Grid::random(n, &mut rng)?
    };

    let last = n as i32 - 1;
    let start = Node::at(0, 0, n);
    let goal = Node::at(last, last, n);
    grid.set(start.x, start.y, Cell::Free)?;
    grid.set(goal.x, goal.y, Cell::Free)?;
    print!("{}", grid.render(color));

    info!(
        "Planning on {n}x{n} grid with threshold {} and budget {}",
        config.rrt.threshold,
        config.rrt.max_iterations(n)
    );
    let mut planner = Rrt::with_rng(config.rrt.clone(), rng);
    let outcome = planner
        .plan(&mut grid, start, goal)
        .context("Planning could not start")?;

    match &outcome {
        PlanOutcome::Path(tree) => {
            let path = outcome
                .path()
                .context("Planner returned a tree without a path to the goal")?;
            info!(
                "Path of {} nodes found, {} nodes in tree, cost {:.3}",
                path.len(),
                tree.len(),
                rrt_grid::rrt::path_cost(&path)
            );
            if cli.costs {
                print!("{}", render_costs(n, tree));
            }
            grid.mark_path(&path)?;
        }
        PlanOutcome::Exhausted => println!("No path exists"),
    }
    print!("{}", grid.render(color));
    Ok(())
}
