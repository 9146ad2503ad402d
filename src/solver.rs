use crate::grid::{bitcount, mask_digits, Grid};
use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use thiserror::Error;

/// The one failure the search can report: the given clues admit no completed
/// grid. A normal outcome, not a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("puzzle has no solution")]
pub struct Unsolvable;

pub struct Solver {
    rng: StdRng,
}

impl Solver {
    /// `Some(seed)` makes every solve reproducible; `None` draws fresh entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Fills every empty cell of `grid`, leaving the clues untouched. Returns
    /// the completed grid, or `Unsolvable` once the search space is exhausted.
    pub fn solve(&mut self, grid: &Grid) -> Result<Grid, Unsolvable> {
        // The search below only ever assigns empty cells, so a duplicate
        // between two given clues has to be caught up front.
        if !grid.is_valid() {
            debug!("clues conflict inside a unit; unsolvable without searching");
            return Err(Unsolvable);
        }

        fn search(grid: &mut Grid, rng: &mut StdRng, depth: usize) -> bool {
            // Most-constrained cell first. A cell with no candidates left
            // would be the minimum, so the branch dies as soon as one shows.
            let mut best: Option<usize> = None;
            let mut best_count = 10u32;
            for i in 0..81 {
                if grid.cells[i] == 0 {
                    let n = bitcount(grid.cands[i]);
                    if n == 0 {
                        trace!("dead end at r{},c{} (depth {depth})", i / 9 + 1, i % 9 + 1);
                        return false;
                    }
                    if n < best_count {
                        best_count = n;
                        best = Some(i);
                        if n == 1 { break; }
                    }
                }
            }
            // No empty cell left means the grid is complete.
            let Some(i) = best else { return true };

            let mut digits = mask_digits(grid.cands[i]);
            digits.shuffle(rng);
            for d in digits {
                trace!("try {d} at r{},c{} (depth {depth})", i / 9 + 1, i % 9 + 1);
                let mut child = grid.clone();
                child.settle(i, d);
                if search(&mut child, rng, depth + 1) {
                    *grid = child;
                    return true;
                }
            }
            trace!("exhausted r{},c{} (depth {depth}); backtracking", i / 9 + 1, i % 9 + 1);
            false
        }

        let mut work = grid.clone();
        debug!("searching; {} empty cells", work.cells.iter().filter(|&&d| d == 0).count());
        if search(&mut work, &mut self.rng, 0) {
            debug!("solved");
            Ok(work)
        } else {
            debug!("search space exhausted");
            Err(Unsolvable)
        }
    }
}

impl Default for Solver {
    fn default() -> Self { Self::new(None) }
}
