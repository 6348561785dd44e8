use rand::Rng;

use crate::maze::{Direction, Grid, TraversalState};

/// Breadth-first expansion where the next cell to expand is drawn at random from the
/// frontier instead of taken in FIFO order.
///
/// Every unvisited neighbor of the expanded cell is linked to it right away, so the
/// result branches much more than a depth-first maze.
pub fn random_bfs<G, R>(grid: &mut G, start: G::Cell, rng: &mut R)
where
    G: Grid,
    R: Rng + ?Sized,
{
    grid.set_tag(start, TraversalState::Visited);
    let mut frontier = vec![start];

    while !frontier.is_empty() {
        let index = rng.random_range(0..frontier.len());
        let cell = frontier.swap_remove(index);

        for dir in Direction::shuffled(rng) {
            let Some(neighbor) = grid.neighbor(cell, dir) else {
                continue;
            };
            if grid.tag(neighbor) != TraversalState::Unvisited {
                continue;
            }
            grid.add_edge(cell, neighbor);
            grid.set_tag(neighbor, TraversalState::Visited);
            frontier.push(neighbor);
        }
        grid.set_tag(cell, TraversalState::Completed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::{assert_perfect_maze, carve_raw};

    #[test]
    fn test_random_bfs() {
        for seed in 0..10 {
            let grid = carve_raw(|g, s, r| random_bfs(g, s, r), 16, 6, seed);
            assert_perfect_maze(&grid, (0, 0));
        }
    }

    #[test]
    fn test_start_opens_to_all_neighbors() {
        // The start is expanded first and has no visited neighbors yet
        let grid = carve_raw(|g, s, r| random_bfs(g, s, r), 5, 5, 9);
        assert!(grid.is_open((0, 0), Direction::East));
        assert!(grid.is_open((0, 0), Direction::South));
    }
}
