//! Square occupancy grid shared between the planner and its caller.
//!
//! Cells are stored row-major: cell `(x, y)` lives at `x * n + y`, the same
//! index used for node ids.

mod render;

pub use self::render::render_costs;

use rand::Rng;

use crate::error::{Result, RrtError};
use crate::rrt::Node;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    /// Not considered yet.
    #[default]
    Free = 0,
    Obstacle = 1,
    /// Part of the search tree.
    Visited = 2,
    /// Part of the final path. Only set when a path is marked for display.
    Path = 3,
}

impl TryFrom<u8> for Cell {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Free),
            1 => Ok(Cell::Obstacle),
            2 => Ok(Cell::Visited),
            3 => Ok(Cell::Path),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-free `size`x`size` grid.
    pub fn new(size: usize) -> Result<Self> {
        // Node ids are `x * n + y` in an i32.
        if size == 0 || size.checked_mul(size).is_none_or(|c| c > i32::MAX as usize) {
            return Err(RrtError::InvalidGridSize { size });
        }
        Ok(Self {
            size,
            cells: vec![Cell::Free; size * size],
        })
    }

    /// Builds a grid from raw cell values, one row per `x`.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let mut grid = Self::new(rows.len())?;
        for (x, row) in rows.iter().enumerate() {
            if row.len() != grid.size {
                return Err(RrtError::RaggedGrid {
                    row: x,
                    expected: grid.size,
                    got: row.len(),
                });
            }
            for (y, &value) in row.iter().enumerate() {
                grid.cells[x * grid.size + y] = Cell::try_from(value)
                    .map_err(|value| RrtError::InvalidCellValue { value, x, y })?;
            }
        }
        Ok(grid)
    }

    /// Random grid where roughly two cells in `n + 1` are obstacles.
    ///
    /// Each cell draws an integer in `0..=n`; values of `n - 1` and above
    /// become obstacles.
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Result<Self> {
        let mut grid = Self::new(size)?;
        if size < 2 {
            return Ok(grid);
        }
        for cell in grid.cells.iter_mut() {
            if rng.random_range(0..=size) >= size - 1 {
                *cell = Cell::Obstacle;
            }
        }
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    fn index(&self, x: i32, y: i32) -> Result<usize> {
        if !self.in_bounds(x, y) {
            return Err(RrtError::OutOfBounds {
                x,
                y,
                size: self.size,
            });
        }
        Ok(x as usize * self.size + y as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Result<Cell> {
        Ok(self.cells[self.index(x, y)?])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<()> {
        let index = self.index(x, y)?;
        self.cells[index] = cell;
        Ok(())
    }

    /// `false` for out-of-bounds cells.
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Ok(Cell::Free))
    }

    /// Every cell in row-major order with its coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| ((i / size) as i32, (i % size) as i32, cell))
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|&c| c as u8).collect())
            .collect()
    }

    /// Marks every node of `path` as [`Cell::Path`].
    pub fn mark_path(&mut self, path: &[Node]) -> Result<()> {
        for node in path {
            self.set(node.x, node.y, Cell::Path)?;
        }
        Ok(())
    }
}
