use std::f64::consts::PI;

use rayon::prelude::*;

use crate::color::Sample;
use crate::pipeline::blocks::{Tile, TileGrid};

/// One scalar feature, tagged with the origin of the tile it came from.
/// Tiles never compare features against each other directly; the matcher
/// works on the flat list of all features from all tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feature {
    pub x: u32,
    pub y: u32,
    pub value: f64,
}

/// Orthonormal 2-D DCT-II over one block, with the cosine terms and
/// normalization factors precomputed for the configured block size.
#[derive(Debug, Clone)]
struct DctBasis {
    size: usize,
    cos: Vec<f64>,
    alpha: Vec<f64>,
}

impl DctBasis {
    fn new(size: usize) -> Self {
        let mut cos = vec![0.0f64; size * size];
        for u in 0..size {
            for x in 0..size {
                cos[u * size + x] =
                    ((2.0 * x as f64 + 1.0) * u as f64 * PI / (2.0 * size as f64)).cos();
            }
        }

        let alpha = (0..size)
            .map(|k| {
                if k == 0 {
                    (1.0 / size as f64).sqrt()
                } else {
                    (2.0 / size as f64).sqrt()
                }
            })
            .collect();

        Self { size, cos, alpha }
    }

    fn at(&self, freq: usize, pos: usize) -> f64 {
        self.cos[freq * self.size + pos]
    }
}

#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    block_size: u32,
    basis: DctBasis,
}

impl FeatureExtractor {
    pub fn new(block_size: u32) -> Self {
        Self {
            block_size,
            basis: DctBasis::new(block_size as usize),
        }
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Computes the nine features of one tile, in a fixed order: luma DC,
    /// the two lowest luma frequency terms, the R/G/B DC terms, then the
    /// R/G/B channel means.
    pub fn tile_features(&self, tile: &Tile) -> [Feature; 9] {
        let b = self.basis.size;
        let mut samples = Vec::with_capacity(b * b);
        for dy in 0..b {
            for dx in 0..b {
                samples.push(tile.sample(dx as u32, dy as u32));
            }
        }

        let (mut mean_r, mut mean_g, mut mean_b) = (0.0, 0.0, 0.0);
        for s in &samples {
            mean_r += s.r;
            mean_g += s.g;
            mean_b += s.b;
        }
        let inv = 1.0 / samples.len() as f64;

        let (x, y) = tile.origin();
        let tag = |value: f64| Feature { x, y, value };

        [
            tag(self.coefficient(&samples, 0, 0, |s| s.luma)),
            tag(self.coefficient(&samples, 0, 1, |s| s.luma)),
            tag(self.coefficient(&samples, 1, 0, |s| s.luma)),
            tag(self.coefficient(&samples, 0, 0, |s| s.r)),
            tag(self.coefficient(&samples, 0, 0, |s| s.g)),
            tag(self.coefficient(&samples, 0, 0, |s| s.b)),
            tag(mean_r * inv),
            tag(mean_g * inv),
            tag(mean_b * inv),
        ]
    }

    pub fn extract(&self, grid: &TileGrid) -> Vec<Feature> {
        grid.tiles()
            .flat_map(|tile| self.tile_features(&tile))
            .collect()
    }

    /// Per-tile extraction is independent, so the grid is split across the
    /// rayon pool. Output order matches the sequential version.
    pub fn extract_parallel(&self, grid: &TileGrid) -> Vec<Feature> {
        grid.origins()
            .par_iter()
            .flat_map_iter(|&(x, y)| self.tile_features(&grid.tile(x, y)))
            .collect()
    }

    /// `freq_x` runs along the sample x axis, `freq_y` along y.
    fn coefficient(
        &self,
        samples: &[Sample],
        freq_x: usize,
        freq_y: usize,
        channel: impl Fn(&Sample) -> f64,
    ) -> f64 {
        let b = self.basis.size;
        let mut sum = 0.0;
        for y in 0..b {
            let cy = self.basis.at(freq_y, y);
            for x in 0..b {
                sum += self.basis.at(freq_x, x) * cy * channel(&samples[y * b + x]);
            }
        }
        self.basis.alpha[freq_x] * self.basis.alpha[freq_y] * sum
    }
}
