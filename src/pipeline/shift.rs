use std::collections::HashMap;

use crate::{BlockPair, Shift};

/// Tally of how many candidate pairs share each displacement.
#[derive(Debug, Clone, Default)]
pub struct ShiftHistogram {
    counts: HashMap<Shift, u32>,
}

impl ShiftHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the tally for `shift` and returns the new count.
    pub fn record(&mut self, shift: Shift) -> u32 {
        let count = self.counts.entry(shift).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, shift: Shift) -> u32 {
        self.counts.get(&shift).copied().unwrap_or(0)
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Highest-tallied shift; ties break toward the larger shift so the
    /// answer does not depend on map iteration order.
    pub fn most_common(&self) -> Option<(Shift, u32)> {
        self.counts
            .iter()
            .map(|(&shift, &count)| (shift, count))
            .max_by_key(|&(shift, count)| (count, shift))
    }
}

/// Walks the candidate pairs in order, tallying displacements. A pair is
/// suspicious when, counting itself, its displacement has been seen
/// strictly more than `symmetry_threshold` times.
pub fn suspicious_blocks(
    pairs: &[BlockPair],
    symmetry_threshold: u32,
) -> (Vec<BlockPair>, ShiftHistogram) {
    let mut histogram = ShiftHistogram::new();
    let mut suspicious = Vec::new();

    for pair in pairs {
        if histogram.record(pair.shift) > symmetry_threshold {
            suspicious.push(*pair);
        }
    }

    (suspicious, histogram)
}
