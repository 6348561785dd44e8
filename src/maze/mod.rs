pub mod cell;
mod direction;
mod grid;

use std::{fmt, hash::Hash};

pub use cell::GridCell;
pub use direction::Direction;
pub use grid::{Coord, RectGrid};

/// Per-cell traversal tag.
///
/// Generators only ever move a cell forward: `Unvisited -> Visited -> Completed`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalState {
    #[default]
    Unvisited,
    /// On the frontier or on the current path, not settled yet.
    Visited,
    /// Permanently part of the maze.
    Completed,
}

/// The grid contract consumed by every generator.
///
/// A generator only mutates the grid through [`Grid::add_edge`] and [`Grid::set_tag`].
pub trait Grid {
    type Cell: Copy + Eq + Hash + fmt::Debug;

    /// Number of cells in the grid.
    fn cell_count(&self) -> usize;

    /// All cells in raster order (row by row, left to right).
    fn cells(&self) -> impl Iterator<Item = Self::Cell> + '_;

    /// Whether `cell` belongs to this grid.
    fn contains(&self, cell: Self::Cell) -> bool;

    /// The geometric neighbor of `cell` in direction `dir`, if it exists.
    fn neighbor(&self, cell: Self::Cell, dir: Direction) -> Option<Self::Cell>;

    /// `(width, height)` in cells.
    fn dimensions(&self) -> (usize, usize);

    /// `(column, row)` of `cell`.
    fn coordinates(&self, cell: Self::Cell) -> (usize, usize);

    /// The cell at `(column, row)`, if it lies inside the grid.
    fn cell_at(&self, col: usize, row: usize) -> Option<Self::Cell>;

    /// Opens a passage between two neighboring cells.
    /// Returns `false` if the passage already existed.
    fn add_edge(&mut self, a: Self::Cell, b: Self::Cell) -> bool;

    /// Whether a passage exists between `a` and `b`.
    fn adjacent(&self, a: Self::Cell, b: Self::Cell) -> bool;

    /// Number of distinct passages opened so far.
    fn edge_count(&self) -> usize;

    fn tag(&self, cell: Self::Cell) -> TraversalState;

    fn set_tag(&mut self, cell: Self::Cell, state: TraversalState);

    /// Existing neighbors of `cell`, in N, E, S, W order.
    fn neighbors(&self, cell: Self::Cell) -> impl Iterator<Item = Self::Cell> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(cell, dir))
    }

    /// Neighbors of `cell` currently tagged `state`, in N, E, S, W order.
    fn neighbors_tagged(&self, cell: Self::Cell, state: TraversalState) -> Vec<Self::Cell> {
        self.neighbors(cell)
            .filter(|&n| self.tag(n) == state)
            .collect()
    }
}
