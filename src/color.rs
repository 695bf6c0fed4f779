use image::{GrayImage, Luma, Rgb, RgbImage};
use ndarray::Array2;
use rayon::prelude::*;

/// One recovered image sample: the three color channels plus the stored
/// luma, all as `f64` so downstream transforms work in one domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub luma: f64,
}

/// Quantized YCbCr planes of an image, one byte per pixel per plane.
///
/// Conversion rounds to 8 bits in both directions; the recovered RGB
/// values may differ from the input by one level per channel. That loss
/// is deliberate: features computed on the recovered values stay stable
/// under re-encoding noise.
#[derive(Debug, Clone)]
pub struct YcbcrImage {
    luma: Array2<u8>,
    cb: Array2<u8>,
    cr: Array2<u8>,
}

pub fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
    let cr = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;
    (quantize(y), quantize(cb), quantize(cr))
}

pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> (u8, u8, u8) {
    let y = y as f64;
    let cb = cb as f64 - 128.0;
    let cr = cr as f64 - 128.0;
    let r = y + 1.402 * cr;
    let g = y - 0.344136 * cb - 0.714136 * cr;
    let b = y + 1.772 * cb;
    (quantize(r), quantize(g), quantize(b))
}

fn quantize(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl YcbcrImage {
    pub fn from_rgb(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let mut luma = Array2::zeros((height as usize, width as usize));
        let mut cb = Array2::zeros((height as usize, width as usize));
        let mut cr = Array2::zeros((height as usize, width as usize));

        for (x, y, pixel) in image.enumerate_pixels() {
            let (yc, cbc, crc) = rgb_to_ycbcr(pixel[0], pixel[1], pixel[2]);
            luma[[y as usize, x as usize]] = yc;
            cb[[y as usize, x as usize]] = cbc;
            cr[[y as usize, x as usize]] = crc;
        }

        Self { luma, cb, cr }
    }

    /// Same conversion with rows distributed across the rayon pool.
    pub fn from_rgb_parallel(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let (w, h) = (width as usize, height as usize);
        if w == 0 || h == 0 {
            return Self::from_rgb(image);
        }

        let rows: Vec<(Vec<u8>, Vec<u8>, Vec<u8>)> = image
            .as_raw()
            .par_chunks(w * 3)
            .map(|row| {
                let mut luma_row = Vec::with_capacity(w);
                let mut cb_row = Vec::with_capacity(w);
                let mut cr_row = Vec::with_capacity(w);
                for px in row.chunks_exact(3) {
                    let (yc, cbc, crc) = rgb_to_ycbcr(px[0], px[1], px[2]);
                    luma_row.push(yc);
                    cb_row.push(cbc);
                    cr_row.push(crc);
                }
                (luma_row, cb_row, cr_row)
            })
            .collect();

        let mut luma = Vec::with_capacity(w * h);
        let mut cb = Vec::with_capacity(w * h);
        let mut cr = Vec::with_capacity(w * h);
        for (luma_row, cb_row, cr_row) in rows {
            luma.extend(luma_row);
            cb.extend(cb_row);
            cr.extend(cr_row);
        }

        Self {
            luma: Array2::from_shape_vec((h, w), luma).expect("row count matches dimensions"),
            cb: Array2::from_shape_vec((h, w), cb).expect("row count matches dimensions"),
            cr: Array2::from_shape_vec((h, w), cr).expect("row count matches dimensions"),
        }
    }

    pub fn width(&self) -> u32 {
        self.luma.dim().1 as u32
    }

    pub fn height(&self) -> u32 {
        self.luma.dim().0 as u32
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let idx = [y as usize, x as usize];
        (self.luma[idx], self.cb[idx], self.cr[idx])
    }

    /// Recovers the color channels at `(x, y)` through the inverse
    /// transform. The luma field is the stored plane value itself.
    pub fn sample(&self, x: u32, y: u32) -> Sample {
        let (yc, cbc, crc) = self.pixel(x, y);
        let (r, g, b) = ycbcr_to_rgb(yc, cbc, crc);
        Sample {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            luma: yc as f64,
        }
    }

    pub fn to_rgb(&self) -> RgbImage {
        let (width, height) = self.dimensions();
        let mut image = RgbImage::new(width, height);

        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let (yc, cbc, crc) = self.pixel(x, y);
            let (r, g, b) = ycbcr_to_rgb(yc, cbc, crc);
            *pixel = Rgb([r, g, b]);
        }

        image
    }

    pub fn luma_image(&self) -> GrayImage {
        let (width, height) = self.dimensions();
        let mut image = GrayImage::new(width, height);

        for (x, y, pixel) in image.enumerate_pixels_mut() {
            *pixel = Luma([self.luma[[y as usize, x as usize]]]);
        }

        image
    }
}
