//! Planner configuration, loadable from YAML.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

mod defaults {
    pub fn max_iter_factor() -> usize {
        20
    }

    pub fn threshold() -> f64 {
        2.0
    }

    pub fn grid_size() -> usize {
        8
    }
}

/// Tree growth settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RrtConfig {
    /// The iteration budget is `max_iter_factor * n * n`.
    #[serde(default = "defaults::max_iter_factor")]
    pub max_iter_factor: usize,

    /// Longest allowed single extension, in cells.
    #[serde(default = "defaults::threshold")]
    pub threshold: f64,
}

impl Default for RrtConfig {
    fn default() -> Self {
        Self {
            max_iter_factor: defaults::max_iter_factor(),
            threshold: defaults::threshold(),
        }
    }
}

impl RrtConfig {
    pub fn new(max_iter_factor: usize, threshold: f64) -> Self {
        Self {
            max_iter_factor,
            threshold,
        }
    }

    /// Iteration budget for an `n`x`n` grid.
    pub fn max_iterations(&self, size: usize) -> usize {
        self.max_iter_factor.saturating_mul(size).saturating_mul(size)
    }
}

/// Settings for generated demo grids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Cells per side.
    #[serde(default = "defaults::grid_size")]
    pub size: usize,

    /// Skip obstacle generation.
    #[serde(default)]
    pub obstacle_free: bool,

    /// Seed for grid generation and sampling.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: defaults::grid_size(),
            obstacle_free: false,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub grid: GridSettings,

    #[serde(default)]
    pub rrt: RrtConfig,
}

impl PlannerConfig {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("Could not parse planner config")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        Self::from_yaml(&contents).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_yaml::to_string(self).context("Could not serialize planner config")
    }
}
