use crate::BlockPair;

/// Walks consecutive suspicious blocks and keeps those that are far from
/// their successor. Pairs sharing a row or column are treated as grid
/// neighbors and skipped outright; for the rest, a first-block distance
/// strictly above `neighbor_threshold` records the first block as a forged
/// region. One qualifying pair is enough to mark the image forged.
pub fn filter_neighbors(suspicious: &[BlockPair], neighbor_threshold: f64) -> (Vec<BlockPair>, bool) {
    let mut regions = Vec::new();
    let mut forged = false;

    for window in suspicious.windows(2) {
        let (a, b) = (&window[0], &window[1]);
        if a.xa == b.xa || a.ya == b.ya {
            continue;
        }

        let dx = a.xa as f64 - b.xa as f64;
        let dy = a.ya as f64 - b.ya as f64;
        if (dx * dx + dy * dy).sqrt() > neighbor_threshold {
            regions.push(*a);
            forged = true;
        }
    }

    (regions, forged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(xa: u32, ya: u32) -> BlockPair {
        BlockPair::new((xa, ya), (xa + 100, ya + 100))
    }

    #[test]
    fn test_empty_and_single_inputs_stay_clean() {
        assert_eq!(filter_neighbors(&[], 25.0), (Vec::new(), false));
        assert_eq!(filter_neighbors(&[block(0, 0)], 25.0), (Vec::new(), false));
    }

    #[test]
    fn test_shared_row_or_column_is_skipped() {
        let (regions, forged) = filter_neighbors(&[block(0, 0), block(0, 90)], 25.0);
        assert!(regions.is_empty());
        assert!(!forged);

        let (regions, forged) = filter_neighbors(&[block(0, 0), block(90, 0)], 25.0);
        assert!(regions.is_empty());
        assert!(!forged);
    }

    #[test]
    fn test_nearby_blocks_are_absorbed() {
        let (regions, forged) = filter_neighbors(&[block(0, 0), block(3, 4)], 25.0);
        assert!(regions.is_empty());
        assert!(!forged);
    }

    #[test]
    fn test_distance_must_exceed_threshold() {
        // 3-4-5 triangle scaled to exactly 25.
        let (_, forged) = filter_neighbors(&[block(0, 0), block(15, 20)], 25.0);
        assert!(!forged);

        let (regions, forged) = filter_neighbors(&[block(0, 0), block(15, 21)], 25.0);
        assert!(forged);
        assert_eq!(regions, vec![block(0, 0)]);
    }

    #[test]
    fn test_first_block_of_far_pair_is_recorded() {
        let input = [block(0, 0), block(40, 40), block(41, 41)];
        let (regions, forged) = filter_neighbors(&input, 25.0);
        assert!(forged);
        // (0,0)->(40,40) qualifies; (40,40)->(41,41) is near.
        assert_eq!(regions, vec![block(0, 0)]);
    }

    #[test]
    fn test_flag_is_sticky_across_the_walk() {
        let input = [
            block(0, 0),
            block(40, 40), // far from (0,0): forged
            block(40, 80), // shares column: skipped
            block(42, 81), // near: skipped
        ];
        let (regions, forged) = filter_neighbors(&input, 25.0);
        assert!(forged);
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn test_every_qualifying_pair_contributes_a_region() {
        let input = [block(0, 0), block(40, 40), block(80, 80)];
        let (regions, forged) = filter_neighbors(&input, 25.0);
        assert!(forged);
        assert_eq!(regions, vec![block(0, 0), block(40, 40)]);
    }
}
