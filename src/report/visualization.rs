use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::color::YcbcrImage;
use crate::error::Result;
use crate::{BlockPair, DetectionReport};

pub struct Visualizer {
    block_size: u32,
}

impl Visualizer {
    pub fn new(block_size: u32) -> Self {
        Self { block_size }
    }

    /// Marks every forged region pair on a copy of the original: hollow
    /// squares over both tiles and a segment joining their centers, one
    /// hue per pair.
    pub fn overlay(&self, original: &RgbImage, report: &DetectionReport) -> RgbImage {
        let mut vis = original.clone();

        for (i, pair) in report.regions.iter().enumerate() {
            let hue = (i as f32 * 137.5) % 360.0;
            let color = hsv_to_rgb(hue, 1.0, 1.0);
            self.mark_pair(&mut vis, pair, color);
        }

        vis
    }

    fn mark_pair(&self, image: &mut RgbImage, pair: &BlockPair, color: Rgb<u8>) {
        let size = self.block_size;
        draw_hollow_rect_mut(
            image,
            Rect::at(pair.xa as i32, pair.ya as i32).of_size(size, size),
            color,
        );
        draw_hollow_rect_mut(
            image,
            Rect::at(pair.xb as i32, pair.yb as i32).of_size(size, size),
            color,
        );

        let half = size as f32 / 2.0;
        draw_line_segment_mut(
            image,
            (pair.xa as f32 + half, pair.ya as f32 + half),
            (pair.xb as f32 + half, pair.yb as f32 + half),
            color,
        );
    }

    /// The stored planes reinterpreted as RGB channels: what the detector
    /// actually works on, colors shifted accordingly.
    pub fn plane_preview(&self, planes: &YcbcrImage) -> RgbImage {
        let (width, height) = planes.dimensions();
        let mut image = RgbImage::new(width, height);

        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let (yc, cb, cr) = planes.pixel(x, y);
            *pixel = Rgb([yc, cb, cr]);
        }

        image
    }

    pub fn luma_preview(&self, planes: &YcbcrImage) -> GrayImage {
        planes.luma_image()
    }

    pub fn render(
        &self,
        original: &RgbImage,
        planes: &YcbcrImage,
        report: &DetectionReport,
    ) -> DetectionArtifacts {
        DetectionArtifacts {
            overlay: self.overlay(original, report),
            planes: self.plane_preview(planes),
            luma: self.luma_preview(planes),
        }
    }
}

pub struct DetectionArtifacts {
    pub overlay: RgbImage,
    pub planes: RgbImage,
    pub luma: GrayImage,
}

impl DetectionArtifacts {
    pub fn save_all(&self, directory: &str) -> Result<()> {
        std::fs::create_dir_all(directory)?;

        self.overlay.save(format!("{}/overlay.png", directory))?;
        self.planes.save(format!("{}/planes.png", directory))?;
        self.luma.save(format!("{}/luma.png", directory))?;

        Ok(())
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb<u8> {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb([
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    ])
}
