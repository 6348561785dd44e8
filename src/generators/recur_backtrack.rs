use rand::{Rng, seq::IndexedRandom};

use crate::maze::{Grid, TraversalState};

/// Randomized depth-first search written as plain recursion.
///
/// Carves exactly the same maze as [`super::iterative_dfs`] for the same RNG state, but the
/// call depth can reach the cell count. Only use it on small grids; the driver rejects
/// grids above [`super::RECURSIVE_DFS_CELL_LIMIT`].
pub fn recursive_dfs<G, R>(grid: &mut G, start: G::Cell, rng: &mut R)
where
    G: Grid,
    R: Rng + ?Sized,
{
    grid.set_tag(start, TraversalState::Visited);
    backtrack(grid, start, rng);
}

fn backtrack<G, R>(grid: &mut G, cell: G::Cell, rng: &mut R)
where
    G: Grid,
    R: Rng + ?Sized,
{
    // Neighbors are re-read after every return, the deeper calls may have claimed them
    while let Some(&neighbor) = grid
        .neighbors_tagged(cell, TraversalState::Unvisited)
        .choose(rng)
    {
        grid.add_edge(cell, neighbor);
        grid.set_tag(neighbor, TraversalState::Visited);
        backtrack(grid, neighbor, rng);
    }
    grid.set_tag(cell, TraversalState::Completed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{
        iterative_dfs,
        testing::{assert_perfect_maze, carve_raw},
    };

    #[test]
    fn test_recursive_dfs() {
        let grid = carve_raw(|g, s, r| recursive_dfs(g, s, r), 12, 9, 4);
        assert_perfect_maze(&grid, (0, 0));
    }

    #[test]
    fn test_matches_iterative_dfs() {
        for seed in 0..10 {
            for (width, height) in [(1, 1), (2, 2), (5, 5), (13, 4), (20, 20)] {
                let recursive = carve_raw(|g, s, r| recursive_dfs(g, s, r), width, height, seed);
                let iterative = carve_raw(|g, s, r| iterative_dfs(g, s, r), width, height, seed);
                assert_eq!(recursive.edges(), iterative.edges());
            }
        }
    }
}
