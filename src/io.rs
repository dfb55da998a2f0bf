//! Table ingestion and artifact serialization.
//!
//! Header names are matched exactly against the schema downstream; no
//! renaming or synonym matching happens here. Empty CSV cells map to
//! missing values, mirroring the loader the dataset was originally cleaned
//! with, which is what gives the engine's identifier filter its null-check
//! semantics. IO failures propagate; nothing is swallowed.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use parquet::basic::{ConvertedType, Repetition, Type as PhysicalType};
use parquet::data_type::{BoolType, ByteArray, ByteArrayType, DoubleType};
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::types::Type;
use tracing::info;

use crate::errors::PrepError;
use crate::table::{Cell, ColumnKind, RawTable, Table};

/// Read a raw table from a CSV file path.
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<RawTable, PrepError> {
    let reader = csv::Reader::from_path(path.as_ref())?;
    read_csv_records(reader)
}

/// Read a raw table from any CSV byte stream.
pub fn read_csv(reader: impl Read) -> Result<RawTable, PrepError> {
    read_csv_records(csv::Reader::from_reader(reader))
}

fn read_csv_records<R: Read>(mut reader: csv::Reader<R>) -> Result<RawTable, PrepError> {
    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut table = RawTable::new(headers);
    for record in reader.into_records() {
        let record = record?;
        table.push_row(
            record
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(table)
}

/// Write a typed table as a Parquet file with one row group.
///
/// All fields are written REQUIRED: cleaned and expanded tables carry no
/// missing cells, and a stray `Missing` here is a pipeline bug surfaced as
/// a configuration error rather than papered over with a null.
pub fn write_parquet(table: &Table, path: impl AsRef<Path>) -> Result<(), PrepError> {
    let path = path.as_ref();
    let columns: Vec<(String, ColumnKind)> = table
        .columns()
        .map(|(name, kind)| (name.to_string(), kind))
        .collect();

    let file = File::create(path)?;
    let properties = Arc::new(WriterProperties::builder().build());
    let mut writer = SerializedFileWriter::new(file, parquet_schema(&columns)?, properties)?;

    let mut row_group = writer.next_row_group()?;
    let mut column_idx = 0;
    while let Some(mut column_writer) = row_group.next_column()? {
        let (name, kind) = &columns[column_idx];
        match kind {
            ColumnKind::Utf8 => {
                let values = column_values(table, column_idx, name, |cell| {
                    cell.as_str().map(ByteArray::from)
                })?;
                column_writer
                    .typed::<ByteArrayType>()
                    .write_batch(&values, None, None)?;
            }
            ColumnKind::Double => {
                let values = column_values(table, column_idx, name, Cell::as_number)?;
                column_writer
                    .typed::<DoubleType>()
                    .write_batch(&values, None, None)?;
            }
            ColumnKind::Boolean => {
                let values = column_values(table, column_idx, name, Cell::as_bool)?;
                column_writer
                    .typed::<BoolType>()
                    .write_batch(&values, None, None)?;
            }
        }
        column_writer.close()?;
        column_idx += 1;
    }
    row_group.close()?;
    writer.close()?;

    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        path = %path.display(),
        "wrote parquet artifact"
    );
    Ok(())
}

fn parquet_schema(columns: &[(String, ColumnKind)]) -> Result<Arc<Type>, PrepError> {
    let mut fields = Vec::with_capacity(columns.len());
    for (name, kind) in columns {
        let (physical, converted) = match kind {
            ColumnKind::Utf8 => (PhysicalType::BYTE_ARRAY, ConvertedType::UTF8),
            ColumnKind::Double => (PhysicalType::DOUBLE, ConvertedType::NONE),
            ColumnKind::Boolean => (PhysicalType::BOOLEAN, ConvertedType::NONE),
        };
        let field = Type::primitive_type_builder(name, physical)
            .with_repetition(Repetition::REQUIRED)
            .with_converted_type(converted)
            .build()?;
        fields.push(Arc::new(field));
    }
    Ok(Arc::new(
        Type::group_type_builder("table").with_fields(fields).build()?,
    ))
}

fn column_values<T>(
    table: &Table,
    column_idx: usize,
    name: &str,
    extract: impl Fn(&Cell) -> Option<T>,
) -> Result<Vec<T>, PrepError> {
    table
        .rows()
        .iter()
        .map(|row| {
            extract(&row[column_idx]).ok_or_else(|| {
                PrepError::Configuration(format!(
                    "column '{name}' holds a cell that does not match its declared kind"
                ))
            })
        })
        .collect()
}
