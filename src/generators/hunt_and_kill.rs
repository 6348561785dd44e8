use rand::{Rng, seq::IndexedRandom};

use crate::{
    generators::FrontierSet,
    maze::{Grid, TraversalState},
};

/// Hunt-and-Kill with an incrementally maintained frontier.
///
/// Kill phase: walk to a random not-yet-carved neighbor until stuck. Hunt phase: pick a
/// random frontier cell (`Visited`, not carved, next to the maze) and attach it to one of
/// its carved neighbors. The frontier replaces the classic full-grid scan for the next
/// hunt target.
pub fn hunt_and_kill<G, R>(grid: &mut G, start: G::Cell, rng: &mut R)
where
    G: Grid,
    R: Rng + ?Sized,
{
    let mut frontier = FrontierSet::new();
    let mut current = Some(start);
    carve(grid, start, &mut frontier);
    let mut hunts = 0;

    loop {
        // Kill
        while let Some(cell) = current {
            let candidates = grid
                .neighbors(cell)
                .filter(|&n| grid.tag(n) != TraversalState::Completed)
                .collect::<Vec<_>>();
            current = candidates.choose(rng).copied();
            if let Some(next) = current {
                grid.add_edge(cell, next);
                carve(grid, next, &mut frontier);
            }
        }

        // Hunt
        let Some(target) = frontier.take_random(rng) else {
            break;
        };
        let carved = grid.neighbors_tagged(target, TraversalState::Completed);
        if let Some(&anchor) = carved.choose(rng) {
            grid.add_edge(anchor, target);
            carve(grid, target, &mut frontier);
            current = Some(target);
            hunts += 1;
        }
    }

    tracing::trace!("[hunt-and-kill] finished after {} hunts", hunts);
}

/// Marks `cell` as part of the maze and moves its uncarved neighbors onto the frontier.
fn carve<G: Grid>(grid: &mut G, cell: G::Cell, frontier: &mut FrontierSet<G::Cell>) {
    grid.set_tag(cell, TraversalState::Completed);
    frontier.remove(&cell);
    for neighbor in grid.neighbors_tagged(cell, TraversalState::Unvisited) {
        grid.set_tag(neighbor, TraversalState::Visited);
        frontier.insert(neighbor);
    }
}
