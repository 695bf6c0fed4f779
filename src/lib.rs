use std::path::Path;
use std::time::{Duration, Instant};

use image::DynamicImage;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::color::YcbcrImage;
use crate::error::{CmfdError, Result};
use crate::pipeline::{
    FeatureExtractor, TileGrid, filter_neighbors, match_features, suspicious_blocks,
};

pub mod color;
pub mod error;
pub mod pipeline;
pub mod report;

/// Detection thresholds and toggles.
///
/// The thresholds are absolute counts and pixel distances, not rates, so
/// the verdict depends on input size: equal-feature collisions tally up
/// with tile count on any input, and at the defaults a featureless
/// uniform image as small as 22x22 already reports forged. Scale the
/// thresholds when analyzing large or low-texture images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Edge length of the square tiles the image is decomposed into.
    pub block_size: u32,
    /// Upper bound on the pixel distance between two sort-adjacent
    /// features for them to become a candidate pair.
    pub magnitude_threshold: f64,
    /// A displacement must be shared by strictly more candidate pairs
    /// than this before its pairs count as suspicious.
    pub symmetry_threshold: u32,
    /// Suspicious blocks further apart than this from their successor
    /// are reported as forged regions.
    pub neighbor_threshold: f64,
    /// Run the color transform and feature extraction on the rayon pool.
    pub parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            block_size: 4,
            magnitude_threshold: 0.2,
            symmetry_threshold: 72,
            neighbor_threshold: 25.0,
            parallel: true,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.block_size < 4 || self.block_size > 64 {
            return Err(CmfdError::InvalidParameter(
                "Block size must be between 4 and 64".into(),
            ));
        }
        if !self.magnitude_threshold.is_finite() || self.magnitude_threshold < 0.0 {
            return Err(CmfdError::InvalidParameter(
                "Magnitude threshold must be a non-negative finite number".into(),
            ));
        }
        if !self.neighbor_threshold.is_finite() || self.neighbor_threshold < 0.0 {
            return Err(CmfdError::InvalidParameter(
                "Neighbor threshold must be a non-negative finite number".into(),
            ));
        }
        Ok(())
    }
}

/// Copy-move forgery detector.
///
/// Stateless across images: one detector can analyze any number of inputs,
/// reusing its precomputed DCT basis.
pub struct CopyMoveDetector {
    config: DetectorConfig,
    extractor: FeatureExtractor,
}

impl CopyMoveDetector {
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        let extractor = FeatureExtractor::new(config.block_size);
        Ok(Self { config, extractor })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn detect_path<P: AsRef<Path>>(&self, path: P) -> Result<DetectionReport> {
        let image = image::open(path)?;
        self.detect(&image)
    }

    pub fn detect(&self, image: &DynamicImage) -> Result<DetectionReport> {
        let started = Instant::now();
        let rgb = image.to_rgb8();

        let planes = if self.config.parallel {
            YcbcrImage::from_rgb_parallel(&rgb)
        } else {
            YcbcrImage::from_rgb(&rgb)
        };

        let grid = TileGrid::new(&planes, self.config.block_size);
        debug!(
            "decomposed {}x{} image into {} tiles",
            planes.width(),
            planes.height(),
            grid.len()
        );

        let features = if self.config.parallel {
            self.extractor.extract_parallel(&grid)
        } else {
            self.extractor.extract(&grid)
        };
        let tiles = grid.len();
        let feature_count = features.len();

        let candidates = match_features(features, self.config.magnitude_threshold);
        debug!("{} candidate pairs passed the magnitude gate", candidates.len());
        let candidate_count = candidates.len();

        let (suspicious, shifts) = suspicious_blocks(&candidates, self.config.symmetry_threshold);
        debug!(
            "{} suspicious blocks across {} distinct shifts",
            suspicious.len(),
            shifts.distinct()
        );
        let suspicious_count = suspicious.len();

        let (regions, forged) = filter_neighbors(&suspicious, self.config.neighbor_threshold);

        let stats = PipelineStats {
            tiles,
            features: feature_count,
            candidates: candidate_count,
            suspicious: suspicious_count,
            elapsed: started.elapsed(),
        };
        info!(
            "copy-move detection finished in {:.2?}: forged={}, {} region(s)",
            stats.elapsed,
            forged,
            regions.len()
        );

        Ok(DetectionReport {
            forged,
            regions,
            dominant_shift: shifts.most_common(),
            stats,
        })
    }
}

impl Default for CopyMoveDetector {
    fn default() -> Self {
        let config = DetectorConfig::default();
        let extractor = FeatureExtractor::new(config.block_size);
        Self { config, extractor }
    }
}

/// Absolute displacement between the two tiles of a pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Shift {
    pub x: u32,
    pub y: u32,
}

/// Two matched tile origins and their displacement. The same record flows
/// through the pipeline as candidate, suspicious block and forged region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPair {
    pub xa: u32,
    pub ya: u32,
    pub xb: u32,
    pub yb: u32,
    pub shift: Shift,
}

impl BlockPair {
    pub fn new(a: (u32, u32), b: (u32, u32)) -> Self {
        Self {
            xa: a.0,
            ya: a.1,
            xb: b.0,
            yb: b.1,
            shift: Shift {
                x: a.0.abs_diff(b.0),
                y: a.1.abs_diff(b.1),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetectionReport {
    pub forged: bool,
    pub regions: Vec<BlockPair>,
    pub dominant_shift: Option<(Shift, u32)>,
    pub stats: PipelineStats,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineStats {
    pub tiles: usize,
    pub features: usize,
    pub candidates: usize,
    pub suspicious: usize,
    pub elapsed: Duration,
}
