//! Row validation and normalization engine.
//!
//! `clean` is a pure pass over an in-memory table: column projection,
//! anomaly-label derivation from raw caret markers, per-group coercion,
//! then the three counted row filters (missing identifier, empty required
//! text, duplicate identifiers). Stage order matters: the label must be
//! derived before coercion strips markers, and duplicates are resolved only
//! among rows that survived the earlier filters.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coerce::{coerce_flag, coerce_nutrient, coerce_text, has_anomaly_marker};
use crate::constants::labels::ANOMALY_LABEL_COLUMN;
use crate::errors::PrepError;
use crate::schema::{ColumnGroup, ColumnSchema};
use crate::table::{Cell, ColumnKind, RawTable, Table};
use crate::types::ColumnName;

/// Exact accounting of rows removed by each cleaning stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanCounters {
    /// Rows in the raw input.
    pub initial: usize,
    /// Rows dropped for a missing identifier cell.
    pub removed_no_identifier: usize,
    /// Rows dropped for missing or blank required text.
    pub removed_empty_text: usize,
    /// Rows dropped as duplicate identifiers (keep-first after sort).
    pub removed_duplicates: usize,
    /// Rows in the cleaned output.
    pub retained: usize,
    /// `initial - retained`.
    pub total_removed: usize,
}

impl CleanCounters {
    /// Surface the six summary numbers to the log. Observational only.
    pub fn log(&self) {
        info!(
            initial = self.initial,
            removed_no_identifier = self.removed_no_identifier,
            removed_empty_text = self.removed_empty_text,
            removed_duplicates = self.removed_duplicates,
            retained = self.retained,
            total_removed = self.total_removed,
            "clean pass complete"
        );
    }
}

/// Cleaned table plus the removal accounting for the pass that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CleanOutcome {
    /// The cleaned, deduplicated table.
    pub table: Table,
    /// Per-stage removal accounting.
    pub counters: CleanCounters,
}

/// Clean a raw table against `schema`.
///
/// Never fails on malformed cells (each coercion has a fallback). The one
/// fatal precondition is an identifier column wholly absent from a
/// non-empty input: passing every row unfiltered would be silent data
/// corruption, so that is a [`PrepError::SchemaViolation`].
pub fn clean(raw: RawTable, schema: &ColumnSchema) -> Result<CleanOutcome, PrepError> {
    let initial = raw.row_count();

    let identifier_idx = raw.column_index(&schema.identifier);
    if identifier_idx.is_none() && initial > 0 {
        return Err(PrepError::SchemaViolation {
            column: schema.identifier.clone(),
        });
    }

    // Stage 1: projection. Schema columns present in the input, in schema
    // order; the derived label column is appended separately below.
    let mut projected: Vec<(&str, ColumnGroup, usize)> = Vec::new();
    for name in schema.kept_columns() {
        if name == ANOMALY_LABEL_COLUMN {
            continue;
        }
        let Some(group) = schema.group_of(name) else {
            continue;
        };
        if let Some(idx) = raw.column_index(name) {
            projected.push((name, group, idx));
        }
    }

    // Raw-column indexes feeding label derivation (stage 3). An existing
    // label column is OR'd in so re-cleaning already-cleaned data cannot
    // lose labels whose markers were stripped by the first pass.
    let marker_idxs: Vec<usize> = schema
        .marker_columns()
        .filter_map(|name| raw.column_index(name))
        .collect();
    let prior_label_idx = raw.column_index(ANOMALY_LABEL_COLUMN);

    let required_text_slot = schema.required_text.as_deref().and_then(|name| {
        raw.column_index(name)?;
        projected.iter().position(|(col, _, _)| *col == name)
    });

    let mut counters = CleanCounters {
        initial,
        ..CleanCounters::default()
    };

    // Stages 2-7 run row-wise: typing and label derivation for every row,
    // then the identifier and required-text filters in that order.
    let mut survivors: Vec<(String, Vec<Cell>)> = Vec::with_capacity(initial);
    for row in raw.rows() {
        let anomaly = marker_idxs
            .iter()
            .any(|&idx| row[idx].as_deref().is_some_and(has_anomaly_marker))
            || prior_label_idx.is_some_and(|idx| coerce_flag(row[idx].as_deref()));

        // Stage 6: identifier null-check runs against pre-coercion cells.
        let identifier = match identifier_idx.and_then(|idx| row[idx].as_deref()) {
            Some(value) => value.to_string(),
            None => {
                counters.removed_no_identifier += 1;
                continue;
            }
        };

        let mut cells: Vec<Cell> = Vec::with_capacity(projected.len() + 1);
        for &(_, group, idx) in &projected {
            let value = row[idx].as_deref();
            let cell = match group {
                ColumnGroup::Identifier => Cell::Text(identifier.clone()),
                ColumnGroup::Text => Cell::Text(coerce_text(value)),
                ColumnGroup::Nutrient => Cell::Number(coerce_nutrient(value)),
                ColumnGroup::Tag | ColumnGroup::Flag => Cell::Bool(coerce_flag(value)),
            };
            cells.push(cell);
        }

        // Stage 7: required-text completeness, checked on the coerced value
        // so quality markers alone cannot satisfy it.
        if let Some(slot) = required_text_slot {
            let empty = cells[slot].as_str().is_none_or(str::is_empty);
            if empty {
                counters.removed_empty_text += 1;
                continue;
            }
        }

        cells.push(Cell::Number(if anomaly { 1.0 } else { 0.0 }));
        survivors.push((identifier, cells));
    }

    // Stage 8: stable sort by identifier ascending, keep first per key.
    let before_dedup = survivors.len();
    survivors.sort_by(|a, b| a.0.cmp(&b.0));
    survivors.dedup_by(|next, kept| next.0 == kept.0);
    counters.removed_duplicates = before_dedup - survivors.len();

    counters.retained = survivors.len();
    counters.total_removed = initial - counters.retained;

    let mut columns: IndexMap<ColumnName, ColumnKind> = projected
        .iter()
        .map(|&(name, group, _)| (name.to_string(), kind_for(group)))
        .collect();
    columns.insert(ANOMALY_LABEL_COLUMN.to_string(), ColumnKind::Double);

    let mut table = Table::new(columns);
    for (_, cells) in survivors {
        table.push_row(cells);
    }

    Ok(CleanOutcome { table, counters })
}

fn kind_for(group: ColumnGroup) -> ColumnKind {
    match group {
        ColumnGroup::Identifier | ColumnGroup::Text => ColumnKind::Utf8,
        ColumnGroup::Nutrient => ColumnKind::Double,
        ColumnGroup::Tag | ColumnGroup::Flag => ColumnKind::Boolean,
    }
}
