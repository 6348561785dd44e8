use rand::{Rng, seq::SliceRandom};

use crate::maze::{Direction, Grid, TraversalState};

/// Links every cell to its South or East neighbor, visiting cells in raster order.
///
/// Every chain of South/East links ends in the bottom-right cell, so the result is a tree.
/// Strongly biased: the bottom row and the right column are always straight corridors.
pub fn binary_tree<G, R>(grid: &mut G, rng: &mut R)
where
    G: Grid,
    R: Rng + ?Sized,
{
    let cells = grid.cells().collect::<Vec<_>>();
    link_south_or_east(grid, cells, rng);
}

/// Same per-cell rule as [`binary_tree`], applied in a shuffled cell order.
pub fn binary_tree_random_order<G, R>(grid: &mut G, rng: &mut R)
where
    G: Grid,
    R: Rng + ?Sized,
{
    let mut cells = grid.cells().collect::<Vec<_>>();
    cells.shuffle(rng);
    link_south_or_east(grid, cells, rng);
}

fn link_south_or_east<G, R>(grid: &mut G, cells: Vec<G::Cell>, rng: &mut R)
where
    G: Grid,
    R: Rng + ?Sized,
{
    for cell in cells {
        let south = grid.neighbor(cell, Direction::South);
        let east = grid.neighbor(cell, Direction::East);
        let target = match (south, east) {
            (Some(south), Some(east)) => Some(if rng.random_bool(0.5) { south } else { east }),
            (Some(only), None) | (None, Some(only)) => Some(only),
            // Bottom-right cell, the root of the tree
            (None, None) => None,
        };
        if let Some(target) = target {
            grid.add_edge(cell, target);
        }
        grid.set_tag(cell, TraversalState::Completed);
    }
}
