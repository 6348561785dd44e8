use rand::{Rng, seq::IndexedRandom};

use crate::maze::{Grid, TraversalState};

/// Random walk from `start`; the first entry into a cell carves the passage it came through.
///
/// The only generator here that samples uniformly among all spanning trees. Its running
/// time is the cover time of the walk, which is unbounded in the worst case.
pub fn aldous_broder<G, R>(grid: &mut G, start: G::Cell, rng: &mut R)
where
    G: Grid,
    R: Rng + ?Sized,
{
    let cell_count = grid.cell_count();
    grid.set_tag(start, TraversalState::Completed);
    let mut completed = 1;
    let mut current = start;
    let mut steps: u64 = 0;

    while completed < cell_count {
        let neighbors = grid.neighbors(current).collect::<Vec<_>>();
        let Some(&next) = neighbors.choose(rng) else {
            // Isolated cell, the walk can never leave it
            break;
        };
        if grid.tag(next) == TraversalState::Unvisited {
            grid.add_edge(current, next);
            grid.set_tag(next, TraversalState::Completed);
            completed += 1;
        }
        current = next;
        steps += 1;
    }

    tracing::trace!("[aldous-broder] covered {} cells in {} steps", completed, steps);
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::generators::testing::{assert_perfect_maze, carve_raw};

    #[test]
    fn test_aldous_broder() {
        let grid = carve_raw(|g, s, r| aldous_broder(g, s, r), 9, 7, 11);
        assert_perfect_maze(&grid, (0, 0));
    }

    /// Counts how often each distinct spanning tree comes out over `runs` seeds.
    fn tree_histogram(
        width: u16,
        height: u16,
        runs: u64,
    ) -> HashMap<Vec<((u16, u16), (u16, u16))>, u64> {
        let mut histogram = HashMap::new();
        for seed in 0..runs {
            let grid = carve_raw(|g, s, r| aldous_broder(g, s, r), width, height, seed);
            *histogram.entry(grid.edges()).or_insert(0) += 1;
        }
        histogram
    }

    #[test]
    fn test_uniform_on_two_by_two() {
        // A 4-cycle has 4 spanning trees, one per removed edge
        let runs = 4000;
        let histogram = tree_histogram(2, 2, runs);
        assert_eq!(histogram.len(), 4);
        for &count in histogram.values() {
            assert!(
                (850..=1150).contains(&count),
                "expected about {} per tree, got {:?}",
                runs / 4,
                histogram.values().collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_uniform_on_three_by_two() {
        // The 3x2 grid graph has 15 spanning trees
        let runs = 15_000;
        let histogram = tree_histogram(3, 2, runs);
        assert_eq!(histogram.len(), 15);
        for &count in histogram.values() {
            assert!(
                (800..=1200).contains(&count),
                "expected about {} per tree, got {:?}",
                runs / 15,
                histogram.values().collect::<Vec<_>>()
            );
        }
    }
}
