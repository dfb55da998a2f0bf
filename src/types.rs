/// Column name used in schemas and tables.
/// Examples: `gtin`, `ingredients_text`, `calories`
pub type ColumnName = String;
/// Global Trade Item Number, the record's unique identifier.
/// Example: `00012345678905`
pub type Gtin = String;
/// Raw cell value as read from the source, before any coercion.
/// Examples: `50^`, `TRUE`, `milk, sugar`
pub type RawCellValue = String;
/// Name of a generated embedding feature column.
/// Example: `product_name_emb_17`
pub type EmbeddingColumnName = String;
