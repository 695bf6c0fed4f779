use crate::BlockPair;
use crate::pipeline::features::Feature;

/// Sorts all features by value and pairs each with its successor when the
/// two tiles sit within `magnitude_threshold` pixels of each other.
///
/// This is a deliberate approximation: only sort-adjacent features are
/// compared, so the cost is one global sort instead of an all-pairs scan.
/// The sort is stable over `total_cmp`, which keeps ties in push order and
/// makes the candidate list reproducible bit for bit.
pub fn match_features(mut features: Vec<Feature>, magnitude_threshold: f64) -> Vec<BlockPair> {
    features.sort_by(|a, b| a.value.total_cmp(&b.value));

    let mut pairs = Vec::new();
    for window in features.windows(2) {
        let (a, b) = (&window[0], &window[1]);
        if coordinate_distance(a, b) < magnitude_threshold {
            pairs.push(BlockPair::new((a.x, a.y), (b.x, b.y)));
        }
    }

    pairs
}

fn coordinate_distance(a: &Feature, b: &Feature) -> f64 {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(x: u32, y: u32, value: f64) -> Feature {
        Feature { x, y, value }
    }

    #[test]
    fn test_zero_distance_pair_passes_default_gate() {
        let features = vec![
            feature(5, 5, 1.0),
            feature(5, 5, 1.0001),
            feature(9, 9, 99.0),
        ];
        let pairs = match_features(features, 0.2);
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].xa, pairs[0].ya), (5, 5));
        assert_eq!((pairs[0].shift.x, pairs[0].shift.y), (0, 0));
    }

    #[test]
    fn test_distant_tiles_rejected_at_default_gate() {
        let features = vec![feature(0, 0, 1.0), feature(10, 0, 1.0001)];
        assert!(match_features(features, 0.2).is_empty());
    }

    #[test]
    fn test_adjacency_follows_value_order_not_input_order() {
        let features = vec![
            feature(0, 0, 5.0),
            feature(8, 8, 1.0),
            feature(2, 2, 4.9),
        ];
        let pairs = match_features(features, 10.0);
        assert_eq!(pairs.len(), 2);
        // Sorted by value: (8,8) then (2,2) then (0,0).
        assert_eq!((pairs[0].xa, pairs[0].ya, pairs[0].xb, pairs[0].yb), (8, 8, 2, 2));
        assert_eq!((pairs[1].xa, pairs[1].ya, pairs[1].xb, pairs[1].yb), (2, 2, 0, 0));
        assert_eq!((pairs[0].shift.x, pairs[0].shift.y), (6, 6));
    }

    #[test]
    fn test_equal_values_stay_in_push_order() {
        let features = vec![feature(3, 3, 2.0), feature(4, 3, 2.0)];
        let pairs = match_features(features, 2.0);
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].xa, pairs[0].xb), (3, 4));
    }

    #[test]
    fn test_gate_is_strict() {
        // Distance exactly 1.0 is not accepted by a threshold of 1.0.
        let features = vec![feature(0, 0, 1.0), feature(1, 0, 1.1)];
        assert!(match_features(features, 1.0).is_empty());
    }

    #[test]
    fn test_empty_and_single_feature() {
        assert!(match_features(Vec::new(), 100.0).is_empty());
        assert!(match_features(vec![feature(0, 0, 1.0)], 100.0).is_empty());
    }
}
