//! Error types for grid planning.
//!
//! Only precondition violations are errors. A search that runs out of
//! iterations is a normal [`PlanOutcome::Exhausted`](crate::rrt::PlanOutcome)
//! result.

use thiserror::Error;

/// Errors raised before planning starts.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RrtError {
    #[error("invalid grid size {size}: a grid needs at least one cell per side")]
    InvalidGridSize { size: usize },

    #[error("grid row {row} has {got} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid cell value {value} at ({x}, {y}) (expected 0..=3)")]
    InvalidCellValue { value: u8, x: usize, y: usize },

    #[error("coordinate ({x}, {y}) is outside a {size}x{size} grid")]
    OutOfBounds { x: i32, y: i32, size: usize },

    #[error("start cell ({x}, {y}) is not free")]
    StartBlocked { x: i32, y: i32 },

    #[error("goal cell ({x}, {y}) is not free")]
    GoalBlocked { x: i32, y: i32 },

    #[error("{which} node has id {got}, expected {expected}")]
    IdMismatch {
        which: &'static str,
        expected: i32,
        got: i32,
    },

    #[error("start node must be its own parent (id {id}, pid {pid})")]
    StartNotRoot { id: i32, pid: i32 },

    #[error("invalid step threshold {threshold}: must be finite and non-negative")]
    InvalidThreshold { threshold: f64 },

    #[error("sampler draws from a {sampler}x{sampler} grid, planning on {grid}x{grid}")]
    SamplerSizeMismatch { sampler: usize, grid: usize },

    #[error("could not build sampling distribution: {0}")]
    Sampling(String),
}

pub type Result<T> = std::result::Result<T, RrtError>;
