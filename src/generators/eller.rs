use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};

use crate::{
    maze::{Direction, Grid, TraversalState},
    partition::{ClassId, Partition},
};

/// Eller's algorithm: builds the maze one row at a time, top to bottom.
///
/// The partition tracks which cells of the current row are already connected, so joining
/// two cells of a row never closes a cycle. Every class of a row gets at least one link to
/// the next row, and the last row is joined completely, which merges everything into one tree.
pub fn eller<G, R>(grid: &mut G, rng: &mut R)
where
    G: Grid,
    R: Rng + ?Sized,
{
    let (width, height) = grid.dimensions();
    let mut partition = Partition::with_capacity(grid.cell_count());

    for y in 0..height {
        let row = (0..width)
            .filter_map(|x| grid.cell_at(x, y))
            .collect::<Vec<_>>();
        let last_row = y + 1 == height;

        // Join horizontal neighbors of different classes, always on the last row
        for pair in row.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            let (left_class, right_class) = (partition.find(left), partition.find(right));
            if left_class != right_class && (last_row || rng.random_bool(0.5)) {
                grid.add_edge(left, right);
                partition.union(left_class, right_class);
            }
        }

        if !last_row {
            link_down(grid, &row, &mut partition, rng);
        }

        for &cell in &row {
            grid.set_tag(cell, TraversalState::Completed);
        }
        tracing::trace!("[eller] row {} done", y);
    }
}

/// Randomly links cells of `row` to the row below, then forces one link for every class
/// that got none.
fn link_down<G, R>(grid: &mut G, row: &[G::Cell], partition: &mut Partition<G::Cell>, rng: &mut R)
where
    G: Grid,
    R: Rng + ?Sized,
{
    let mut linked = Vec::new();
    for &cell in row {
        if !rng.random_bool(0.5) {
            continue;
        }
        if let Some(below) = grid.neighbor(cell, Direction::South) {
            grid.add_edge(cell, below);
            let (class, below_class) = (partition.find(cell), partition.find(below));
            partition.union(class, below_class);
            linked.push(cell);
        }
    }

    // Classes are resolved only now: unions above may have moved a class root
    let linked_classes = linked
        .iter()
        .map(|&cell| partition.find(cell))
        .collect::<HashSet<_>>();

    for mut members in group_by_class(row, partition) {
        let class = partition.find(members[0]);
        if linked_classes.contains(&class) {
            continue;
        }
        members.shuffle(rng);
        let cell = members[0];
        if let Some(below) = grid.neighbor(cell, Direction::South) {
            grid.add_edge(cell, below);
            let below_class = partition.find(below);
            partition.union(class, below_class);
        }
    }

    if cfg!(debug_assertions) {
        let linked_down = row
            .iter()
            .copied()
            .filter(|&cell| {
                grid.neighbor(cell, Direction::South)
                    .is_some_and(|below| grid.adjacent(cell, below))
            })
            .map(|cell| partition.find(cell))
            .collect::<HashSet<_>>();
        debug_assert!(
            row.iter()
                .all(|&cell| linked_down.contains(&partition.find(cell))),
            "every class of the row must link to the next row"
        );
    }
}

/// Members of `row` grouped by class, groups in order of first appearance.
fn group_by_class<T>(row: &[T], partition: &mut Partition<T>) -> Vec<Vec<T>>
where
    T: Copy + Eq + std::hash::Hash,
{
    let mut groups: Vec<(ClassId, Vec<T>)> = Vec::new();
    for &cell in row {
        let class = partition.find(cell);
        match groups.iter_mut().find(|(id, _)| *id == class) {
            Some((_, members)) => members.push(cell),
            None => groups.push((class, vec![cell])),
        }
    }
    groups.into_iter().map(|(_, members)| members).collect()
}
