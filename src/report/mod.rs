pub mod visualization;

use serde::Serialize;

use crate::{DetectionReport, DetectorConfig};

#[derive(Serialize)]
pub struct JsonReport {
    pub forged: bool,
    pub region_count: usize,
    pub dominant_shift: Option<ShiftSection>,
    pub regions: Vec<RegionSection>,
    pub pipeline: PipelineSection,
    pub parameters: ParameterSection,
}

#[derive(Serialize)]
pub struct ShiftSection {
    pub x: u32,
    pub y: u32,
    pub count: u32,
}

#[derive(Serialize)]
pub struct RegionSection {
    pub x: u32,
    pub y: u32,
    pub matched_x: u32,
    pub matched_y: u32,
    pub shift_x: u32,
    pub shift_y: u32,
}

#[derive(Serialize)]
pub struct PipelineSection {
    pub tiles: usize,
    pub features: usize,
    pub candidates: usize,
    pub suspicious: usize,
    pub elapsed_ms: f64,
}

#[derive(Serialize)]
pub struct ParameterSection {
    pub block_size: u32,
    pub magnitude_threshold: f64,
    pub symmetry_threshold: u32,
    pub neighbor_threshold: f64,
}

impl JsonReport {
    pub fn new(report: &DetectionReport, config: &DetectorConfig) -> Self {
        Self {
            forged: report.forged,
            region_count: report.regions.len(),
            dominant_shift: report.dominant_shift.map(|(shift, count)| ShiftSection {
                x: shift.x,
                y: shift.y,
                count,
            }),
            regions: report
                .regions
                .iter()
                .map(|pair| RegionSection {
                    x: pair.xa,
                    y: pair.ya,
                    matched_x: pair.xb,
                    matched_y: pair.yb,
                    shift_x: pair.shift.x,
                    shift_y: pair.shift.y,
                })
                .collect(),
            pipeline: PipelineSection {
                tiles: report.stats.tiles,
                features: report.stats.features,
                candidates: report.stats.candidates,
                suspicious: report.stats.suspicious,
                elapsed_ms: report.stats.elapsed.as_secs_f64() * 1000.0,
            },
            parameters: ParameterSection {
                block_size: config.block_size,
                magnitude_threshold: config.magnitude_threshold,
                symmetry_threshold: config.symmetry_threshold,
                neighbor_threshold: config.neighbor_threshold,
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockPair, PipelineStats, Shift};
    use std::time::Duration;

    fn sample_report() -> DetectionReport {
        DetectionReport {
            forged: true,
            regions: vec![BlockPair::new((10, 20), (110, 95))],
            dominant_shift: Some((Shift { x: 100, y: 75 }, 420)),
            stats: PipelineStats {
                tiles: 1000,
                features: 9000,
                candidates: 800,
                suspicious: 500,
                elapsed: Duration::from_millis(12),
            },
        }
    }

    #[test]
    fn test_json_report_fields() {
        let report = sample_report();
        let json = JsonReport::new(&report, &DetectorConfig::default());
        let text = json.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["forged"], true);
        assert_eq!(value["region_count"], 1);
        assert_eq!(value["dominant_shift"]["x"], 100);
        assert_eq!(value["dominant_shift"]["count"], 420);
        assert_eq!(value["regions"][0]["matched_x"], 110);
        assert_eq!(value["regions"][0]["shift_y"], 75);
        assert_eq!(value["pipeline"]["tiles"], 1000);
        assert_eq!(value["parameters"]["symmetry_threshold"], 72);
    }

    #[test]
    fn test_clean_report_has_no_dominant_shift() {
        let report = DetectionReport {
            forged: false,
            regions: Vec::new(),
            dominant_shift: None,
            stats: PipelineStats::default(),
        };
        let json = JsonReport::new(&report, &DetectorConfig::default());
        let value: serde_json::Value =
            serde_json::from_str(&json.to_json().unwrap()).unwrap();
        assert_eq!(value["forged"], false);
        assert!(value["dominant_shift"].is_null());
        assert_eq!(value["regions"].as_array().unwrap().len(), 0);
    }
}
