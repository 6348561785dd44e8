use thiserror::Error;

use crate::generators::Algorithm;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Cannot generate a maze on a grid without cells")]
    EmptyGrid,
    #[error("Start cell {0} is not part of the grid")]
    StartNotInGrid(String),
    #[error("Grid is already carved ({edges} passages, {tagged} tagged cells)")]
    GridAlreadyCarved { edges: usize, tagged: usize },
    #[error("{algorithm} supports at most {limit} cells, grid has {cells}")]
    GridTooLarge {
        algorithm: Algorithm,
        cells: usize,
        limit: usize,
    },
    #[error("{algorithm} produced {actual} passages, a spanning tree needs {expected}")]
    EdgeCountMismatch {
        algorithm: Algorithm,
        expected: usize,
        actual: usize,
    },
    #[error("{algorithm} left {remaining} cells not completed")]
    IncompleteTraversal { algorithm: Algorithm, remaining: usize },
    #[error("{algorithm} reached only {reached} of {total} cells from the start")]
    Disconnected {
        algorithm: Algorithm,
        reached: usize,
        total: usize,
    },
}

/// Returned when parsing an [`Algorithm`] from an unknown name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown maze generation algorithm '{0}'")]
pub struct UnknownAlgorithm(pub String);
