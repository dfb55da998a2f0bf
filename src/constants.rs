/// Constants used by caret-marker detection and stripping.
pub mod markers {
    /// Trailing character marking a cell as quality-flagged upstream.
    pub const CARET_MARKER: char = '^';
}

/// Constants used by nutrient coercion.
pub mod sentinels {
    /// In-domain stand-in for an unknown or unparseable nutrient reading.
    /// Distinct from a genuine reading of zero.
    pub const NUTRIENT_SENTINEL: f64 = -1.0;
}

/// Constants used by label derivation and boolean coercion.
pub mod labels {
    /// Name of the derived per-row anomaly column.
    pub const ANOMALY_LABEL_COLUMN: &str = "label_is_anomaly";
    /// Uppercased tokens accepted as boolean `true`.
    pub const TRUE_TOKENS: [&str; 2] = ["TRUE", "1"];
    /// Uppercased tokens accepted as boolean `false`.
    pub const FALSE_TOKENS: [&str; 2] = ["FALSE", "0"];
}

/// Constants used by embedding-column bookkeeping.
pub mod embedding {
    /// Infix joining a source column name and a feature index.
    /// Example output column: `product_name_emb_0`.
    pub const EMBEDDING_COLUMN_INFIX: &str = "_emb_";
    /// Vector width of the reference embedding model (all-MiniLM-L6-v2).
    pub const DEFAULT_EMBEDDING_DIM: usize = 384;
}
