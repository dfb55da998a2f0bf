//! Text feature expansion.
//!
//! Replaces each schema text column with `D` numeric feature columns from
//! the embedding collaborator, then re-applies the nutrient sentinel fill
//! as a correctness backstop.

use tracing::debug;

use crate::constants::embedding::EMBEDDING_COLUMN_INFIX;
use crate::constants::sentinels::NUTRIENT_SENTINEL;
use crate::embed::Embedder;
use crate::errors::PrepError;
use crate::schema::ColumnSchema;
use crate::table::{Cell, ColumnKind, Table};

/// Expand the text columns of a cleaned table into embedding features.
///
/// Text columns are visited in schema order; each is embedded in a single
/// batch call (missing cells render as empty strings), producing columns
/// `"{col}_emb_{i}"` for `i in 0..D`. The source text columns are removed
/// after every expansion has succeeded, so a failed contract check leaves
/// the input recoverable from the error alone.
pub fn expand(
    mut table: Table,
    embedder: &dyn Embedder,
    schema: &ColumnSchema,
) -> Result<Table, PrepError> {
    let dimension = embedder.dimension();

    for column in &schema.text {
        let Some(idx) = table.column_index(column) else {
            continue;
        };
        let texts: Vec<String> = table
            .rows()
            .iter()
            .map(|row| match &row[idx] {
                Cell::Text(value) => value.clone(),
                Cell::Missing => String::new(),
                other => other.render().unwrap_or_default(),
            })
            .collect();

        let vectors = embedder.embed(&texts)?;
        if vectors.len() != texts.len() {
            return Err(PrepError::EmbeddingBatchMismatch {
                column: column.clone(),
                expected: texts.len(),
                actual: vectors.len(),
            });
        }
        for (row, vector) in vectors.iter().enumerate() {
            if vector.len() != dimension {
                return Err(PrepError::EmbeddingDimensionMismatch {
                    column: column.clone(),
                    row,
                    expected: dimension,
                    actual: vector.len(),
                });
            }
        }

        for feature in 0..dimension {
            let name = format!("{column}{EMBEDDING_COLUMN_INFIX}{feature}");
            let cells = vectors
                .iter()
                .map(|vector| Cell::Number(f64::from(vector[feature])))
                .collect();
            table.add_column(name, ColumnKind::Double, cells);
        }
        debug!(column = %column, features = dimension, "expanded text column");
    }

    for column in &schema.text {
        table.remove_column(column);
    }

    // Backstop: concatenation cannot reintroduce missing nutrient cells
    // when the embedder honors its contract, but the sentinel invariant is
    // cheap to enforce and load-bearing for training.
    for nutrient in &schema.nutrient {
        let Some(idx) = table.column_index(nutrient) else {
            continue;
        };
        for row in table.rows_mut() {
            let filled = match row[idx] {
                Cell::Number(value) if !value.is_nan() => continue,
                _ => Cell::Number(NUTRIENT_SENTINEL),
            };
            row[idx] = filled;
        }
    }

    Ok(table)
}
