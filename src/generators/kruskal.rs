use rand::{Rng, seq::SliceRandom};

use crate::{
    maze::{Direction, Grid, TraversalState},
    partition::Partition,
};

/// Passage candidate between two adjacent cells
#[derive(Debug, Clone, Copy)]
struct Edge<C> {
    cell1: C,
    cell2: C,
}

/// Randomized Kruskal: every edge of the full grid graph, shuffled, then kept whenever its
/// two cells are still in different classes.
///
/// Edges are enumerated in raster order (East before South for each cell) before the
/// shuffle, so a given seed yields the same maze on any grid with the same layout.
pub fn randomized_kruskal<G, R>(grid: &mut G, rng: &mut R)
where
    G: Grid,
    R: Rng + ?Sized,
{
    // Collect all possible edges (walls between adjacent cells)
    let layout: &G = grid;
    let mut edges: Vec<Edge<G::Cell>> = layout
        .cells()
        .flat_map(|cell| {
            [Direction::East, Direction::South]
                .into_iter()
                .filter_map(move |dir| layout.neighbor(cell, dir))
                .map(move |neighbor| Edge {
                    cell1: cell,
                    cell2: neighbor,
                })
        })
        .collect();

    // Shuffle edges randomly
    edges.shuffle(rng);

    let mut partition = Partition::with_capacity(grid.cell_count());
    let mut kept = 0;
    let target = grid.cell_count().saturating_sub(1);

    for edge in edges {
        if kept == target {
            break;
        }
        let class1 = partition.find(edge.cell1);
        let class2 = partition.find(edge.cell2);

        // If cells are not yet connected, remove the wall between them
        if class1 != class2 {
            partition.union(class1, class2);
            grid.add_edge(edge.cell1, edge.cell2);
            kept += 1;
        }
    }

    let cells = grid.cells().collect::<Vec<_>>();
    for cell in cells {
        grid.set_tag(cell, TraversalState::Completed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{
        get_rng,
        testing::{assert_perfect_maze, carve_raw},
    };
    use crate::maze::RectGrid;

    #[test]
    fn test_randomized_kruskal() {
        let grid = carve_raw(|g, _, r| randomized_kruskal(g, r), 10, 7, 6);
        assert_perfect_maze(&grid, (0, 0));
    }

    #[test]
    fn test_reproducible_on_five_by_five() {
        let first = carve_raw(|g, _, r| randomized_kruskal(g, r), 5, 5, 2024);
        for _ in 0..5 {
            let again = carve_raw(|g, _, r| randomized_kruskal(g, r), 5, 5, 2024);
            assert_eq!(first.edges(), again.edges());
        }
        assert_eq!(first.edges().len(), 24);
    }

    #[test]
    fn test_matches_reference_shuffle() {
        // Same seed stream, same enumeration order, same Fisher-Yates shuffle: same tree
        let grid = carve_raw(|g, _, r| randomized_kruskal(g, r), 5, 5, 77);

        let mut reference = RectGrid::new(5, 5);
        let mut edges = Vec::new();
        for (x, y) in reference.cells() {
            if x + 1 < 5 {
                edges.push(((x, y), (x + 1, y)));
            }
            if y + 1 < 5 {
                edges.push(((x, y), (x, y + 1)));
            }
        }
        edges.shuffle(&mut get_rng(Some(77)));

        let mut partition = Partition::new();
        for (a, b) in edges {
            let (class_a, class_b) = (partition.find(a), partition.find(b));
            if class_a != class_b {
                partition.union(class_a, class_b);
                reference.add_edge(a, b);
            }
        }
        assert_eq!(reference.edge_count(), 24);
        assert_eq!(grid.edges(), reference.edges());
    }
}
