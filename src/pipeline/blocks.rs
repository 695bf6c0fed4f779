use crate::color::{Sample, YcbcrImage};

/// Every overlapping block origin of an image, step one pixel, row-major.
///
/// Images smaller than the block in either dimension decompose into an
/// empty grid; the rest of the pipeline then runs over nothing.
#[derive(Debug)]
pub struct TileGrid<'a> {
    image: &'a YcbcrImage,
    block_size: u32,
    origins: Vec<(u32, u32)>,
}

/// A read-only `block_size × block_size` view into the transformed image,
/// tagged with its top-left coordinate.
#[derive(Debug, Clone, Copy)]
pub struct Tile<'a> {
    x: u32,
    y: u32,
    block_size: u32,
    image: &'a YcbcrImage,
}

impl<'a> TileGrid<'a> {
    pub fn new(image: &'a YcbcrImage, block_size: u32) -> Self {
        let (width, height) = image.dimensions();
        let origins = match (width.checked_sub(block_size), height.checked_sub(block_size)) {
            (Some(max_x), Some(max_y)) => {
                let mut origins =
                    Vec::with_capacity((max_x as usize + 1) * (max_y as usize + 1));
                for y in 0..=max_y {
                    for x in 0..=max_x {
                        origins.push((x, y));
                    }
                }
                origins
            }
            _ => Vec::new(),
        };

        Self {
            image,
            block_size,
            origins,
        }
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn origins(&self) -> &[(u32, u32)] {
        &self.origins
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    pub fn tile(&self, x: u32, y: u32) -> Tile<'a> {
        Tile {
            x,
            y,
            block_size: self.block_size,
            image: self.image,
        }
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile<'a>> + '_ {
        self.origins.iter().map(|&(x, y)| self.tile(x, y))
    }
}

impl Tile<'_> {
    pub fn origin(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Reads the sample at offset `(dx, dy)` from the tile origin.
    pub fn sample(&self, dx: u32, dy: u32) -> Sample {
        self.image.sample(self.x + dx, self.y + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn planes(width: u32, height: u32) -> YcbcrImage {
        let image = RgbImage::from_fn(width, height, |x, y| {
            let v = (x * 7 + y * 13) as u8;
            Rgb([v, v, v])
        });
        YcbcrImage::from_rgb(&image)
    }

    #[test]
    fn test_grid_counts_overlapping_origins() {
        let image = planes(8, 8);
        let grid = TileGrid::new(&image, 4);
        assert_eq!(grid.len(), 25);

        let image = planes(4, 4);
        let grid = TileGrid::new(&image, 4);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.origins()[0], (0, 0));
    }

    #[test]
    fn test_grid_is_row_major() {
        let image = planes(6, 5);
        let grid = TileGrid::new(&image, 4);
        assert_eq!(grid.origins(), &[(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_small_images_yield_empty_grid() {
        let image = planes(3, 3);
        assert!(TileGrid::new(&image, 4).is_empty());

        let image = planes(3, 100);
        assert!(TileGrid::new(&image, 4).is_empty());

        let image = planes(100, 3);
        assert!(TileGrid::new(&image, 4).is_empty());
    }

    #[test]
    fn test_tile_reads_offset_samples() {
        let image = planes(8, 8);
        let grid = TileGrid::new(&image, 4);
        let tile = grid.tile(1, 1);
        assert_eq!(tile.origin(), (1, 1));
        // Gray input, so the stored luma equals the original value.
        assert_eq!(tile.sample(1, 0).luma, (2 * 7 + 13) as f64);
        assert_eq!(tile.sample(0, 2).luma, (7 + 3 * 13) as f64);
    }
}
