use cmfd::error::Result;
use cmfd::report::visualization::Visualizer;
use cmfd::{CopyMoveDetector, DetectorConfig};
use image::{DynamicImage, Rgb, RgbImage};

fn main() -> Result<()> {
    let mut image = noise_image(200, 200, 42);
    copy_region(&mut image, (20, 20), (120, 110), 56);

    let config = DetectorConfig {
        // Wide open so clones at any distance can pair up.
        magnitude_threshold: 600.0,
        ..Default::default()
    };
    let detector = CopyMoveDetector::new(config)?;
    let report = detector.detect(&DynamicImage::ImageRgb8(image.clone()))?;

    println!("Synthetic forgery: 56x56 region copied from (20, 20) to (120, 110)");
    println!();
    println!("Verdict: {}", if report.forged { "FORGED" } else { "clean" });
    if let Some((shift, count)) = report.dominant_shift {
        println!("Dominant shift: ({}, {}) seen {} times", shift.x, shift.y, count);
    }
    println!("Regions: {}", report.regions.len());

    for (i, region) in report.regions.iter().take(5).enumerate() {
        println!(
            "  {}. ({}, {}) -> ({}, {})",
            i + 1,
            region.xa,
            region.ya,
            region.xb,
            region.yb
        );
    }
    if report.regions.len() > 5 {
        println!("  ... and {} more", report.regions.len() - 5);
    }

    std::fs::create_dir_all("output")?;
    let visualizer = Visualizer::new(detector.config().block_size);
    visualizer
        .overlay(&image, &report)
        .save("output/synthetic_forgery.png")?;
    println!();
    println!("Overlay saved to output/synthetic_forgery.png");

    Ok(())
}

fn noise_image(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut state = seed;
    RgbImage::from_fn(width, height, |_, _| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let v = (state >> 33) as u32;
        Rgb([(v & 0xff) as u8, ((v >> 8) & 0xff) as u8, ((v >> 16) & 0xff) as u8])
    })
}

fn copy_region(image: &mut RgbImage, src: (u32, u32), dst: (u32, u32), size: u32) {
    for dy in 0..size {
        for dx in 0..size {
            let px = *image.get_pixel(src.0 + dx, src.1 + dy);
            image.put_pixel(dst.0 + dx, dst.1 + dy, px);
        }
    }
}
