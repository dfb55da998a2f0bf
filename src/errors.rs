use std::io;

use thiserror::Error;

use crate::types::ColumnName;

/// Error type for schema preconditions, embedding-contract breaches, and IO
/// failures.
///
/// Per-cell coercion failures are never errors: they resolve to documented
/// fallback values (`-1` for numerics, `false` for booleans, empty string
/// for text).
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("identifier column '{column}' is absent from a non-empty input")]
    SchemaViolation { column: ColumnName },
    #[error(
        "embedder returned {actual} vectors for {expected} input strings (column '{column}')"
    )]
    EmbeddingBatchMismatch {
        column: ColumnName,
        expected: usize,
        actual: usize,
    },
    #[error(
        "embedder returned a {actual}-wide vector where {expected} was declared (column '{column}', row {row})"
    )]
    EmbeddingDimensionMismatch {
        column: ColumnName,
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("csv read failure: {0}")]
    Csv(#[from] csv::Error),
    #[error("parquet failure: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("configuration error: {0}")]
    Configuration(String),
}
