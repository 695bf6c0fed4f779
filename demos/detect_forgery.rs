//! Copy-Move Detection Example
//!
//! Runs the full detection pipeline on an image file and saves the
//! overlay, plane previews and a JSON report.
//!
//! Run with: cargo run --example detect_forgery -- <image_path> [output_dir] [magnitude_threshold]

use std::env;
use std::fs;
use std::path::Path;

use cmfd::color::YcbcrImage;
use cmfd::error::{CmfdError, Result};
use cmfd::report::JsonReport;
use cmfd::report::visualization::Visualizer;
use cmfd::{CopyMoveDetector, DetectorConfig};
use image::GenericImageView;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Copy-Move Forgery Detection");
        println!("===========================");
        println!();
        println!("Usage: {} <image_path> [output_dir] [magnitude_threshold]", args[0]);
        println!();
        println!("Arguments:");
        println!("  image_path          - Path to the image to analyze");
        println!("  output_dir          - Optional output directory (default: ./output)");
        println!("  magnitude_threshold - Optional matcher gate (default: 0.2)");
        println!();
        println!("Example:");
        println!("  {} suspicious_photo.png ./results 300", args[0]);
        return Ok(());
    }

    let image_path = &args[1];
    let output_dir = args.get(2).map(|s| s.as_str()).unwrap_or("./output");

    if !Path::new(image_path).exists() {
        eprintln!("Error: Image file '{}' not found", image_path);
        std::process::exit(1);
    }

    let mut config = DetectorConfig::default();
    if let Some(raw) = args.get(3) {
        config.magnitude_threshold = raw.parse().map_err(|_| {
            CmfdError::InvalidParameter(format!("'{}' is not a valid threshold", raw))
        })?;
    }

    println!("Loading image...");
    let image = image::open(image_path)?;
    let (width, height) = image.dimensions();
    println!("  ✓ Image loaded: {}x{} pixels", width, height);
    println!();

    print!("Running copy-move detection... ");
    let detector = CopyMoveDetector::new(config)?;
    let report = detector.detect(&image)?;
    println!("✓ ({:.2?})", report.stats.elapsed);
    println!();

    println!("Results:");
    println!("  Verdict:           {}", if report.forged { "FORGED" } else { "clean" });
    println!("  Tiles:             {}", report.stats.tiles);
    println!("  Candidate pairs:   {}", report.stats.candidates);
    println!("  Suspicious blocks: {}", report.stats.suspicious);
    println!("  Forged regions:    {}", report.regions.len());
    if let Some((shift, count)) = report.dominant_shift {
        println!("  Dominant shift:    ({}, {}) seen {} times", shift.x, shift.y, count);
    }
    println!();

    if !report.regions.is_empty() {
        println!("Detected regions:");
        for (i, region) in report.regions.iter().take(5).enumerate() {
            println!(
                "  {}. Block ({}, {}) -> ({}, {}) | Shift: ({}, {})",
                i + 1,
                region.xa,
                region.ya,
                region.xb,
                region.yb,
                region.shift.x,
                region.shift.y
            );
        }
        if report.regions.len() > 5 {
            println!("  ... and {} more regions", report.regions.len() - 5);
        }
        println!();
    }

    let rgb = image.to_rgb8();
    let planes = YcbcrImage::from_rgb(&rgb);
    let artifacts = Visualizer::new(detector.config().block_size).render(&rgb, &planes, &report);
    artifacts.save_all(output_dir)?;

    let json = JsonReport::new(&report, detector.config()).to_json()?;
    let report_path = format!("{}/report.json", output_dir);
    fs::write(&report_path, json)?;

    println!("All outputs saved to: {}/", output_dir);
    println!("  overlay.png  - original with forged regions marked");
    println!("  planes.png   - YCbCr planes viewed as RGB");
    println!("  luma.png     - luma plane");
    println!("  report.json  - machine-readable report");

    Ok(())
}
