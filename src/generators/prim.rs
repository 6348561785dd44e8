use std::{cmp::Ordering, collections::BinaryHeap};

use rand::Rng;

use crate::maze::{Grid, TraversalState};

/// A passage candidate leaving the tree, weighted when it was discovered.
#[derive(Debug, Clone, Copy)]
struct CutEdge<C> {
    weight: f64,
    from: C,
    to: C,
}

impl<C> PartialEq for CutEdge<C> {
    fn eq(&self, other: &Self) -> bool {
        self.weight.total_cmp(&other.weight) == Ordering::Equal
    }
}

impl<C> Eq for CutEdge<C> {}

impl<C> PartialOrd for CutEdge<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> Ord for CutEdge<C> {
    // Reversed so the max-heap pops the lightest edge first
    fn cmp(&self, other: &Self) -> Ordering {
        other.weight.total_cmp(&self.weight)
    }
}

/// Randomized Prim: grows a minimum spanning tree from `start` over random edge weights.
///
/// Each edge gets its weight when first pushed onto the heap. Edges whose far end was
/// absorbed meanwhile are dropped when popped. Cells on the cut are tagged `Visited`.
pub fn randomized_prim<G, R>(grid: &mut G, start: G::Cell, rng: &mut R)
where
    G: Grid,
    R: Rng + ?Sized,
{
    let mut heap = BinaryHeap::new();
    grid.set_tag(start, TraversalState::Completed);
    push_cut_edges(grid, start, &mut heap, rng);

    while let Some(CutEdge { from, to, .. }) = heap.pop() {
        if grid.tag(to) == TraversalState::Completed {
            continue;
        }
        grid.add_edge(from, to);
        grid.set_tag(to, TraversalState::Completed);
        push_cut_edges(grid, to, &mut heap, rng);
    }
}

fn push_cut_edges<G, R>(
    grid: &mut G,
    cell: G::Cell,
    heap: &mut BinaryHeap<CutEdge<G::Cell>>,
    rng: &mut R,
) where
    G: Grid,
    R: Rng + ?Sized,
{
    let outside = grid
        .neighbors(cell)
        .filter(|&n| grid.tag(n) != TraversalState::Completed)
        .collect::<Vec<_>>();
    for neighbor in outside {
        grid.set_tag(neighbor, TraversalState::Visited);
        heap.push(CutEdge {
            weight: rng.random::<f64>(),
            from: cell,
            to: neighbor,
        });
    }
}
