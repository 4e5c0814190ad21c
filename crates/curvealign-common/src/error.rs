//! Storage-level errors raised while shaping matrices.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("a matrix needs at least one column")]
    ZeroColumns,
    #[error("{len} values do not fill whole rows of {cols} columns")]
    RaggedRow { cols: usize, len: usize },
    #[error("row {row} has {found} values (expected {expected})")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}
