pub mod blocks;
pub mod features;
pub mod filter;
pub mod matcher;
pub mod shift;

pub use blocks::{Tile, TileGrid};
pub use features::{Feature, FeatureExtractor};
pub use filter::filter_neighbors;
pub use matcher::match_features;
pub use shift::{ShiftHistogram, suspicious_blocks};
