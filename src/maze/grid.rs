use std::io::Write;

use crossterm::{queue, style::Print};

use super::{Direction, Grid, GridCell, TraversalState};

/// `(x, y)` coordinate of a cell in a [`RectGrid`].
pub type Coord = (u16, u16);

/// A rectangular grid graph whose passages are stored as one direction bitmask per cell.
#[derive(Debug, Clone)]
pub struct RectGrid {
    passages: Box<[u8]>,
    tags: Box<[TraversalState]>,
    width: u16,
    height: u16,
    edges: usize,
}

impl RectGrid {
    /// Creates a grid of `width * height` cells with no passages.
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        RectGrid {
            passages: vec![0; len].into_boxed_slice(),
            tags: vec![TraversalState::Unvisited; len].into_boxed_slice(),
            width,
            height,
            edges: 0,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Checks if the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        coord.1 as usize * self.width as usize + coord.0 as usize
    }

    /// Whether the passage leaving `coord` towards `dir` is open.
    ///
    /// # Panics
    /// If `coord` is out of bounds.
    pub fn is_open(&self, coord: Coord, dir: Direction) -> bool {
        if !self.is_in_bounds(coord) {
            panic!("The given coordinate is out of bounds");
        }
        self.passages[self.ravel_index(coord)] & dir.bit() != 0
    }

    /// Closes every passage and clears every tag, so the grid can be carved again.
    pub fn reset(&mut self) {
        self.passages.fill(0);
        self.tags.fill(TraversalState::Unvisited);
        self.edges = 0;
    }

    /// All open passages in raster order, each listed once as `(cell, east or south neighbor)`.
    pub fn edges(&self) -> Vec<(Coord, Coord)> {
        self.cells()
            .flat_map(|cell| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(move |&dir| self.is_open(cell, dir))
                    .filter_map(move |dir| self.neighbor(cell, dir).map(|n| (cell, n)))
            })
            .collect()
    }

    /// Direction leading from `a` to `b` when the two cells are geometric neighbors.
    fn direction_between(a: Coord, b: Coord) -> Option<Direction> {
        let delta = (b.0 as isize - a.0 as isize, b.1 as isize - a.1 as isize);
        Direction::ALL.into_iter().find(|dir| dir.offset() == delta)
    }

    /// Wall/passage picture of the grid.
    ///
    /// n cells in each dimension -> n + 1 walls -> 2n + 1 raster cells.
    /// Cell `(x, y)` sits at raster position `(2x + 1, 2y + 1)`.
    pub fn raster(&self, start: Option<Coord>) -> Vec<Vec<GridCell>> {
        let raster_width = self.width as usize * 2 + 1;
        let raster_height = self.height as usize * 2 + 1;
        let mut raster = vec![vec![GridCell::Wall; raster_width]; raster_height];

        for (x, y) in self.cells() {
            let (rx, ry) = (x as usize * 2 + 1, y as usize * 2 + 1);
            raster[ry][rx] = if start == Some((x, y)) {
                GridCell::Start
            } else {
                GridCell::Passage
            };
            if self.is_open((x, y), Direction::East) {
                raster[ry][rx + 1] = GridCell::Passage;
            }
            if self.is_open((x, y), Direction::South) {
                raster[ry + 1][rx] = GridCell::Passage;
            }
        }
        raster
    }

    /// Writes the styled raster to `out`, one raster row per line.
    pub fn render<W: Write>(&self, out: &mut W, start: Option<Coord>) -> std::io::Result<()> {
        for row in self.raster(start) {
            for cell in row {
                queue!(out, Print(cell))?;
            }
            queue!(out, Print("\n"))?;
        }
        out.flush()
    }
}

impl Grid for RectGrid {
    type Cell = Coord;

    fn cell_count(&self) -> usize {
        self.passages.len()
    }

    fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    fn contains(&self, cell: Coord) -> bool {
        self.is_in_bounds(cell)
    }

    fn neighbor(&self, cell: Coord, dir: Direction) -> Option<Coord> {
        if !self.is_in_bounds(cell) {
            return None;
        }
        let (x, y) = cell;
        let next = match dir {
            Direction::North => (x, y.checked_sub(1)?),
            Direction::East => (x.checked_add(1)?, y),
            Direction::South => (x, y.checked_add(1)?),
            Direction::West => (x.checked_sub(1)?, y),
        };
        self.is_in_bounds(next).then_some(next)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }

    fn coordinates(&self, cell: Coord) -> (usize, usize) {
        (cell.0 as usize, cell.1 as usize)
    }

    fn cell_at(&self, col: usize, row: usize) -> Option<Coord> {
        (col < self.width as usize && row < self.height as usize)
            .then_some((col as u16, row as u16))
    }

    /// # Panics
    /// If `a` and `b` are not neighboring cells of this grid.
    fn add_edge(&mut self, a: Coord, b: Coord) -> bool {
        let dir = match Self::direction_between(a, b) {
            Some(dir) if self.is_in_bounds(a) && self.is_in_bounds(b) => dir,
            _ => panic!("Cannot open a passage between {:?} and {:?}", a, b),
        };
        let (ia, ib) = (self.ravel_index(a), self.ravel_index(b));
        if self.passages[ia] & dir.bit() != 0 {
            return false;
        }
        self.passages[ia] |= dir.bit();
        self.passages[ib] |= dir.opposite().bit();
        self.edges += 1;
        true
    }

    fn adjacent(&self, a: Coord, b: Coord) -> bool {
        match Self::direction_between(a, b) {
            Some(dir) if self.is_in_bounds(a) && self.is_in_bounds(b) => self.is_open(a, dir),
            _ => false,
        }
    }

    fn edge_count(&self) -> usize {
        self.edges
    }

    fn tag(&self, cell: Coord) -> TraversalState {
        self.tags[self.ravel_index(cell)]
    }

    fn set_tag(&mut self, cell: Coord, state: TraversalState) {
        let idx = self.ravel_index(cell);
        self.tags[idx] = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_raster_order() {
        let grid = RectGrid::new(3, 2);
        let cells = grid.cells().collect::<Vec<_>>();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(grid.cell_count(), 6);
        assert_eq!(grid.dimensions(), (3, 2));
    }

    #[test]
    fn test_neighbors_at_borders() {
        let grid = RectGrid::new(3, 3);
        let corner = grid.neighbors((0, 0)).collect::<Vec<_>>();
        assert_eq!(corner, vec![(1, 0), (0, 1)]);
        let center = grid.neighbors((1, 1)).collect::<Vec<_>>();
        assert_eq!(center, vec![(1, 0), (2, 1), (1, 2), (0, 1)]);
        assert_eq!(grid.neighbor((2, 2), Direction::East), None);
        assert_eq!(grid.neighbor((3, 3), Direction::North), None);
    }

    #[test]
    fn test_add_edge() {
        let mut grid = RectGrid::new(5, 5);
        assert!(grid.add_edge((1, 1), (2, 1)));
        // Opening the same passage again, from either side, changes nothing
        assert!(!grid.add_edge((2, 1), (1, 1)));
        assert_eq!(grid.edge_count(), 1);
        assert!(grid.adjacent((1, 1), (2, 1)));
        assert!(grid.adjacent((2, 1), (1, 1)));
        assert!(grid.is_open((1, 1), Direction::East));
        assert!(grid.is_open((2, 1), Direction::West));
        assert!(!grid.adjacent((1, 1), (1, 2)));
        assert!(!grid.adjacent((1, 1), (3, 1)));
    }

    #[test]
    #[should_panic]
    fn test_add_edge_between_distant_cells() {
        let mut grid = RectGrid::new(5, 5);
        grid.add_edge((0, 0), (2, 0));
    }

    #[test]
    #[should_panic]
    fn test_add_edge_out_of_bounds() {
        let mut grid = RectGrid::new(2, 2);
        grid.add_edge((1, 1), (2, 1));
    }

    #[test]
    fn test_edges_listed_once() {
        let mut grid = RectGrid::new(2, 2);
        grid.add_edge((1, 0), (0, 0));
        grid.add_edge((1, 1), (1, 0));
        assert_eq!(grid.edges(), vec![((0, 0), (1, 0)), ((1, 0), (1, 1))]);
    }

    #[test]
    fn test_tags_and_reset() {
        let mut grid = RectGrid::new(2, 2);
        assert_eq!(grid.tag((1, 1)), TraversalState::Unvisited);
        grid.set_tag((1, 1), TraversalState::Completed);
        grid.add_edge((0, 0), (0, 1));
        assert_eq!(grid.tag((1, 1)), TraversalState::Completed);

        grid.reset();
        assert_eq!(grid.tag((1, 1)), TraversalState::Unvisited);
        assert_eq!(grid.edge_count(), 0);
        assert!(grid.edges().is_empty());
    }

    #[test]
    fn test_raster() {
        let mut grid = RectGrid::new(2, 1);
        grid.add_edge((0, 0), (1, 0));
        let raster = grid.raster(Some((0, 0)));
        assert_eq!(raster.len(), 3);
        assert_eq!(raster[0].len(), 5);
        assert_eq!(
            raster[1],
            vec![
                GridCell::Wall,
                GridCell::Start,
                GridCell::Passage,
                GridCell::Passage,
                GridCell::Wall
            ]
        );
        assert!(raster[0].iter().all(|&c| c == GridCell::Wall));
    }

    #[test]
    fn test_render_line_count() {
        let grid = RectGrid::new(3, 2);
        let mut out = Vec::new();
        grid.render(&mut out, None).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 5);
    }
}
