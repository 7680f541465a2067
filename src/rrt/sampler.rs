use rand::Rng;
use rand::rngs::ThreadRng;
use rand_distr::{Distribution, Uniform};

use crate::error::{Result, RrtError};

use super::node::Node;

/// Source of candidate cells for the tree.
pub trait Sampler {
    /// Draws a fresh node: zero cost, row-major id, pid 0.
    fn sample(&mut self) -> Node;

    /// Side length of the grid being sampled.
    fn size(&self) -> usize;
}

/// Uniform draw over every cell of an `n`x`n` grid.
pub struct UniformSampler<R> {
    rng: R,
    size: usize,
    axis: Uniform<i32>,
}

impl<R: Rng> UniformSampler<R> {
    pub fn new(size: usize, rng: R) -> Result<Self> {
        let upper = i32::try_from(size).map_err(|_| RrtError::InvalidGridSize { size })?;
        let axis = Uniform::new(0, upper).map_err(|e| RrtError::Sampling(e.to_string()))?;
        Ok(Self { rng, size, axis })
    }
}

impl UniformSampler<ThreadRng> {
    pub fn thread_local(size: usize) -> Result<Self> {
        Self::new(size, rand::rng())
    }
}

impl<R: Rng> Sampler for UniformSampler<R> {
    fn sample(&mut self) -> Node {
        let x = self.axis.sample(&mut self.rng);
        let y = self.axis.sample(&mut self.rng);
        Node::new(x, y, 0.0, 0.0, Node::cell_id(x, y, self.size), 0)
    }

    fn size(&self) -> usize {
        self.size
    }
}
