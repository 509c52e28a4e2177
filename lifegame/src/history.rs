//! Repeat detection over recent generations.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::grid::GridView;

/// Number of past fingerprints remembered.
pub const HISTORY_LEN: usize = 10;

/// Hash of the cell states only; generation and dimensions are ignored.
pub fn fingerprint(view: &GridView<'_>) -> u64 {
    let mut hasher = DefaultHasher::new();
    view.cells.hash(&mut hasher);
    hasher.finish()
}

/// Remembers the last [`HISTORY_LEN`] fingerprints and reports when a
/// generation repeats one of them, i.e. the pattern has settled into a
/// still life or an oscillator with period up to `HISTORY_LEN`.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    seen: [u64; HISTORY_LEN],
    count: usize,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `view`; returns `true` if it matches a remembered generation.
    pub fn check(&mut self, view: &GridView<'_>) -> bool {
        let hash = fingerprint(view);
        let filled = self.count.min(HISTORY_LEN);
        if self.seen[..filled].contains(&hash) {
            return true;
        }
        self.seen[self.count % HISTORY_LEN] = hash;
        self.count += 1;
        false
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn test_still_life_repeats_immediately() {
        let mut grid = Grid::new(6, 6);
        grid.put(2, 2, &["**", "**"]);
        let mut detector = CycleDetector::new();
        assert!(!detector.check(&grid.view()));
        grid.step();
        assert!(detector.check(&grid.view()));
    }

    #[test]
    fn test_blinker_repeats_after_two() {
        let mut grid = Grid::new(5, 5);
        grid.put(1, 2, &["***"]);
        let mut detector = CycleDetector::new();
        assert!(!detector.check(&grid.view()));
        grid.step();
        assert!(!detector.check(&grid.view()));
        grid.step();
        assert!(detector.check(&grid.view()));
    }

    #[test]
    fn test_glider_never_repeats_within_window() {
        let mut grid = Grid::new(20, 20);
        grid.put(1, 1, &[".*.", "..*", "***"]);
        let mut detector = CycleDetector::new();
        for _ in 0..HISTORY_LEN * 2 {
            assert!(!detector.check(&grid.view()));
            grid.step();
        }
    }

    #[test]
    fn test_reset_forgets() {
        let grid = Grid::new(4, 4);
        let mut detector = CycleDetector::new();
        detector.check(&grid.view());
        detector.reset();
        assert!(!detector.check(&grid.view()));
    }

    #[test]
    fn test_empty_grid_fingerprint_is_stable() {
        let a = Grid::new(4, 4);
        let b = Grid::new(4, 4);
        assert_eq!(fingerprint(&a.view()), fingerprint(&b.view()));
    }
}
