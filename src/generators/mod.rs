use std::collections::{HashSet, VecDeque};

use rand::{Rng, SeedableRng, rngs::StdRng};

mod aldous_broder;
mod binary_tree;
mod dfs;
mod eller;
mod eller_inside_out;
mod frontier;
mod hunt_and_kill;
mod kruskal;
mod prim;
mod random_bfs;
mod recur_backtrack;

pub use aldous_broder::aldous_broder;
pub use binary_tree::{binary_tree, binary_tree_random_order};
pub use dfs::iterative_dfs;
pub use eller::eller;
pub use eller_inside_out::eller_inside_out;
pub use frontier::FrontierSet;
pub use hunt_and_kill::hunt_and_kill;
pub use kruskal::randomized_kruskal;
pub use prim::randomized_prim;
pub use random_bfs::random_bfs;
pub use recur_backtrack::recursive_dfs;

use crate::{
    error::{GenerationError, UnknownAlgorithm},
    maze::{Grid, TraversalState},
};

/// Largest grid the recursive depth-first search accepts.
/// Its call depth grows with the cell count.
pub const RECURSIVE_DFS_CELL_LIMIT: usize = 4096;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    AldousBroder,
    BinaryTree,
    BinaryTreeRandomOrder,
    Eller,
    EllerInsideOut,
    HuntAndKill,
    IterativeDfs,
    RecursiveDfs,
    Kruskal,
    Prim,
    RandomBfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 11] = [
        Algorithm::AldousBroder,
        Algorithm::BinaryTree,
        Algorithm::BinaryTreeRandomOrder,
        Algorithm::Eller,
        Algorithm::EllerInsideOut,
        Algorithm::HuntAndKill,
        Algorithm::IterativeDfs,
        Algorithm::RecursiveDfs,
        Algorithm::Kruskal,
        Algorithm::Prim,
        Algorithm::RandomBfs,
    ];

    /// Short name used on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Algorithm::AldousBroder => "aldous-broder",
            Algorithm::BinaryTree => "binary-tree",
            Algorithm::BinaryTreeRandomOrder => "binary-tree-random",
            Algorithm::Eller => "eller",
            Algorithm::EllerInsideOut => "eller-inside-out",
            Algorithm::HuntAndKill => "hunt-and-kill",
            Algorithm::IterativeDfs => "dfs",
            Algorithm::RecursiveDfs => "recursive-dfs",
            Algorithm::Kruskal => "kruskal",
            Algorithm::Prim => "prim",
            Algorithm::RandomBfs => "random-bfs",
        }
    }

    /// Maximum number of cells this algorithm accepts, if bounded.
    pub fn cell_limit(self) -> Option<usize> {
        match self {
            Algorithm::RecursiveDfs => Some(RECURSIVE_DFS_CELL_LIMIT),
            _ => None,
        }
    }

    /// Carves a spanning tree into `grid`, growing from `start` where the algorithm has a
    /// notion of a start cell (Binary Tree, both Eller variants and Kruskal ignore it).
    ///
    /// The grid must be fresh: no passages and every cell `Unvisited`. Rejected inputs
    /// leave the grid untouched. On success the grid holds exactly `n - 1` passages
    /// connecting every cell, and every cell is tagged `Completed`.
    pub fn generate<G, R>(
        self,
        grid: &mut G,
        start: G::Cell,
        rng: &mut R,
    ) -> Result<(), GenerationError>
    where
        G: Grid,
        R: Rng + ?Sized,
    {
        validate_input(self, grid, start)?;
        tracing::debug!(
            "[generate] {} on {:?} grid from {:?}",
            self,
            grid.dimensions(),
            grid.coordinates(start)
        );

        match self {
            Algorithm::AldousBroder => aldous_broder(grid, start, rng),
            Algorithm::BinaryTree => binary_tree(grid, rng),
            Algorithm::BinaryTreeRandomOrder => binary_tree_random_order(grid, rng),
            Algorithm::Eller => eller(grid, rng),
            Algorithm::EllerInsideOut => eller_inside_out(grid, rng)?,
            Algorithm::HuntAndKill => hunt_and_kill(grid, start, rng),
            Algorithm::IterativeDfs => iterative_dfs(grid, start, rng),
            Algorithm::RecursiveDfs => recursive_dfs(grid, start, rng),
            Algorithm::Kruskal => randomized_kruskal(grid, rng),
            Algorithm::Prim => randomized_prim(grid, start, rng),
            Algorithm::RandomBfs => random_bfs(grid, start, rng),
        }

        verify_spanning_tree(self, grid, start)?;
        tracing::debug!(
            "[generate] {} finished with {} passages",
            self,
            grid.edge_count()
        );
        Ok(())
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::AldousBroder => write!(f, "Aldous-Broder"),
            Algorithm::BinaryTree => write!(f, "Binary Tree"),
            Algorithm::BinaryTreeRandomOrder => write!(f, "Binary Tree (random order)"),
            Algorithm::Eller => write!(f, "Eller's Algorithm"),
            Algorithm::EllerInsideOut => write!(f, "Eller's Algorithm (inside-out)"),
            Algorithm::HuntAndKill => write!(f, "Hunt-and-Kill"),
            Algorithm::IterativeDfs => write!(f, "Randomized Depth-First Search (DFS)"),
            Algorithm::RecursiveDfs => write!(f, "Recursive Depth-First Search"),
            Algorithm::Kruskal => write!(f, "Kruskal's Algorithm"),
            Algorithm::Prim => write!(f, "Prim's Algorithm"),
            Algorithm::RandomBfs => write!(f, "Random Breadth-First Growth"),
        }
    }
}

impl std::str::FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.key() == key)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Picks a random start cell, then generates the maze with the given algorithm.
///
/// The RNG is seeded from `seed` when given, so the start cell and the maze are reproducible.
/// Returns the start cell.
pub fn generate_maze<G: Grid>(
    grid: &mut G,
    algorithm: Algorithm,
    seed: Option<u64>,
) -> Result<G::Cell, GenerationError> {
    let mut rng = get_rng(seed);

    let cell_count = grid.cell_count();
    if cell_count == 0 {
        return Err(GenerationError::EmptyGrid);
    }
    let start = grid
        .cells()
        .nth(rng.random_range(0..cell_count))
        .ok_or(GenerationError::EmptyGrid)?;

    algorithm.generate(grid, start, &mut rng)?;
    Ok(start)
}

fn validate_input<G: Grid>(
    algorithm: Algorithm,
    grid: &G,
    start: G::Cell,
) -> Result<(), GenerationError> {
    let cells = grid.cell_count();
    if cells == 0 {
        return Err(GenerationError::EmptyGrid);
    }
    if !grid.contains(start) {
        return Err(GenerationError::StartNotInGrid(format!("{:?}", start)));
    }

    let tagged = grid
        .cells()
        .filter(|&cell| grid.tag(cell) != TraversalState::Unvisited)
        .count();
    if grid.edge_count() != 0 || tagged != 0 {
        return Err(GenerationError::GridAlreadyCarved {
            edges: grid.edge_count(),
            tagged,
        });
    }

    match algorithm.cell_limit() {
        Some(limit) if cells > limit => Err(GenerationError::GridTooLarge {
            algorithm,
            cells,
            limit,
        }),
        _ => Ok(()),
    }
}

/// Checks the postcondition shared by every algorithm: `n - 1` passages, every cell
/// completed, every cell reachable from `start`.
fn verify_spanning_tree<G: Grid>(
    algorithm: Algorithm,
    grid: &G,
    start: G::Cell,
) -> Result<(), GenerationError> {
    let total = grid.cell_count();

    if grid.edge_count() != total - 1 {
        tracing::error!(
            "[generate] {} produced {} passages on {} cells",
            algorithm,
            grid.edge_count(),
            total
        );
        return Err(GenerationError::EdgeCountMismatch {
            algorithm,
            expected: total - 1,
            actual: grid.edge_count(),
        });
    }

    let remaining = grid
        .cells()
        .filter(|&cell| grid.tag(cell) != TraversalState::Completed)
        .count();
    if remaining != 0 {
        tracing::error!("[generate] {} left {} cells unfinished", algorithm, remaining);
        return Err(GenerationError::IncompleteTraversal {
            algorithm,
            remaining,
        });
    }

    let mut reached = HashSet::with_capacity(total);
    let mut queue = VecDeque::from([start]);
    reached.insert(start);
    while let Some(cell) = queue.pop_front() {
        for next in grid.neighbors(cell) {
            if grid.adjacent(cell, next) && reached.insert(next) {
                queue.push_back(next);
            }
        }
    }
    if reached.len() != total {
        tracing::error!(
            "[generate] {} reached {} of {} cells",
            algorithm,
            reached.len(),
            total
        );
        return Err(GenerationError::Disconnected {
            algorithm,
            reached: reached.len(),
            total,
        });
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::testing::{SHAPES, carve};
    use super::*;
    use crate::maze::RectGrid;

    #[test]
    fn test_every_algorithm_every_shape() {
        for algorithm in Algorithm::ALL {
            for (width, height) in SHAPES {
                for seed in 0..4 {
                    carve(algorithm, width, height, seed);
                }
            }
        }
    }

    #[test]
    fn test_single_cell() {
        for algorithm in Algorithm::ALL {
            let grid = carve(algorithm, 1, 1, 0);
            assert_eq!(grid.edge_count(), 0);
            assert_eq!(grid.tag((0, 0)), TraversalState::Completed);
        }
    }

    #[test]
    fn test_two_by_two_has_three_edges() {
        for algorithm in Algorithm::ALL {
            for seed in 0..16 {
                let grid = carve(algorithm, 2, 2, seed);
                assert_eq!(grid.edges().len(), 3);
            }
        }
    }

    #[test]
    fn test_deterministic_under_seed() {
        for algorithm in Algorithm::ALL {
            let first = carve(algorithm, 12, 9, 42).edges();
            let second = carve(algorithm, 12, 9, 42).edges();
            assert_eq!(first, second, "{} is not reproducible", algorithm);
        }
    }

    #[test]
    fn test_seeds_differ() {
        for algorithm in Algorithm::ALL {
            let first = carve(algorithm, 12, 9, 1).edges();
            assert!(
                (2..10).any(|seed| carve(algorithm, 12, 9, seed).edges() != first),
                "{} ignores its random source",
                algorithm
            );
        }
    }

    #[test]
    fn test_generate_maze_picks_start_in_grid() {
        let mut grid = RectGrid::new(9, 6);
        let start = generate_maze(&mut grid, Algorithm::HuntAndKill, Some(5)).unwrap();
        assert!(grid.is_in_bounds(start));

        let mut again = RectGrid::new(9, 6);
        let start_again = generate_maze(&mut again, Algorithm::HuntAndKill, Some(5)).unwrap();
        assert_eq!(start, start_again);
        assert_eq!(grid.edges(), again.edges());
    }

    #[test]
    fn test_generate_maze_without_seed() {
        let mut grid = RectGrid::new(6, 6);
        assert!(generate_maze(&mut grid, Algorithm::Prim, None).is_ok());
        assert_eq!(grid.edge_count(), 35);
    }

    #[test]
    fn test_rejects_empty_grid() {
        let mut grid = RectGrid::new(0, 4);
        let mut rng = get_rng(Some(0));
        assert_eq!(
            Algorithm::Kruskal.generate(&mut grid, (0, 0), &mut rng),
            Err(GenerationError::EmptyGrid)
        );
        assert_eq!(
            generate_maze(&mut grid, Algorithm::Kruskal, Some(0)),
            Err(GenerationError::EmptyGrid)
        );
    }

    #[test]
    fn test_rejects_start_outside_grid() {
        let mut grid = RectGrid::new(3, 3);
        let mut rng = get_rng(Some(0));
        let result = Algorithm::IterativeDfs.generate(&mut grid, (3, 0), &mut rng);
        assert!(matches!(result, Err(GenerationError::StartNotInGrid(_))));
        assert_eq!(grid.edge_count(), 0);
    }

    #[test]
    fn test_rejects_carved_grid() {
        let mut grid = RectGrid::new(3, 3);
        let mut rng = get_rng(Some(0));
        Algorithm::Prim.generate(&mut grid, (0, 0), &mut rng).unwrap();
        let result = Algorithm::Prim.generate(&mut grid, (0, 0), &mut rng);
        assert_eq!(
            result,
            Err(GenerationError::GridAlreadyCarved { edges: 8, tagged: 9 })
        );

        grid.reset();
        assert!(Algorithm::Prim.generate(&mut grid, (0, 0), &mut rng).is_ok());
    }

    #[test]
    fn test_recursive_dfs_is_gated() {
        let mut grid = RectGrid::new(100, 100);
        let mut rng = get_rng(Some(0));
        let result = Algorithm::RecursiveDfs.generate(&mut grid, (0, 0), &mut rng);
        assert_eq!(
            result,
            Err(GenerationError::GridTooLarge {
                algorithm: Algorithm::RecursiveDfs,
                cells: 10_000,
                limit: RECURSIVE_DFS_CELL_LIMIT,
            })
        );
        assert_eq!(grid.edge_count(), 0);

        // The iterative variant has no such limit
        assert!(Algorithm::IterativeDfs.generate(&mut grid, (0, 0), &mut rng).is_ok());
    }

    #[test]
    fn test_parse_keys() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.key().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!("Hunt_And_Kill".parse::<Algorithm>(), Ok(Algorithm::HuntAndKill));
        assert_eq!(
            "wilson".parse::<Algorithm>(),
            Err(UnknownAlgorithm("wilson".to_string()))
        );
    }

    #[test]
    fn test_postcondition_detects_missing_edges() {
        let mut grid = RectGrid::new(2, 1);
        grid.set_tag((0, 0), TraversalState::Completed);
        grid.set_tag((1, 0), TraversalState::Completed);
        assert_eq!(
            verify_spanning_tree(Algorithm::Kruskal, &grid, (0, 0)),
            Err(GenerationError::EdgeCountMismatch {
                algorithm: Algorithm::Kruskal,
                expected: 1,
                actual: 0,
            })
        );
    }

    #[test]
    fn test_postcondition_detects_cycle() {
        // n - 1 passages, but a closed ring on the left leaves the right column cut off
        let mut grid = RectGrid::new(3, 2);
        for cell in grid.cells().collect::<Vec<_>>() {
            grid.set_tag(cell, TraversalState::Completed);
        }
        grid.add_edge((0, 0), (1, 0));
        grid.add_edge((1, 0), (1, 1));
        grid.add_edge((1, 1), (0, 1));
        grid.add_edge((0, 1), (0, 0));
        grid.add_edge((2, 0), (2, 1));
        assert_eq!(
            verify_spanning_tree(Algorithm::Prim, &grid, (0, 0)),
            Err(GenerationError::Disconnected {
                algorithm: Algorithm::Prim,
                reached: 4,
                total: 6,
            })
        );
    }
}
