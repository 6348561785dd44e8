use rand::{Rng, seq::IndexedRandom};

use crate::maze::{Grid, TraversalState};

/// Randomized depth-first search (recursive backtracker) with an explicit stack.
///
/// Cells on the stack are `Visited`; a cell becomes `Completed` once it has no unvisited
/// neighbor left and is popped. The stack never holds a cell twice, so its depth is bounded
/// by the cell count without touching the call stack.
pub fn iterative_dfs<G, R>(grid: &mut G, start: G::Cell, rng: &mut R)
where
    G: Grid,
    R: Rng + ?Sized,
{
    grid.set_tag(start, TraversalState::Visited);

    // The stack will keep only cells of the current path
    let mut stack = Vec::with_capacity(grid.cell_count());
    stack.push(start);

    while let Some(&cell) = stack.last() {
        let neighbors = grid.neighbors_tagged(cell, TraversalState::Unvisited);

        match neighbors.choose(rng) {
            Some(&neighbor) => {
                grid.add_edge(cell, neighbor);
                grid.set_tag(neighbor, TraversalState::Visited);
                // Keep the cell below the neighbor so we can look at its other neighbors later
                stack.push(neighbor);
            }
            None => {
                grid.set_tag(cell, TraversalState::Completed);
                stack.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::{assert_perfect_maze, carve_raw};

    #[test]
    fn test_iterative_dfs() {
        let grid = carve_raw(|g, s, r| iterative_dfs(g, s, r), 15, 11, 8);
        assert_perfect_maze(&grid, (0, 0));
    }

    #[test]
    fn test_large_grid_does_not_recurse() {
        let grid = carve_raw(|g, s, r| iterative_dfs(g, s, r), 300, 300, 1);
        assert_eq!(grid.edge_count(), 300 * 300 - 1);
    }
}
