use crate::constants::embedding::DEFAULT_EMBEDDING_DIM;
use crate::errors::PrepError;
use crate::hash::stable_hash_str;

/// External embedding collaborator: free text in, fixed-width vectors out.
///
/// Implementations must be deterministic for a fixed model identity and
/// must return one vector per input string, in input order, each exactly
/// [`dimension`](Embedder::dimension) wide. The expander validates both and
/// fails loudly on a breach rather than silently misaligning columns.
pub trait Embedder {
    /// Fixed vector width for this model identity.
    fn dimension(&self) -> usize;

    /// Embed a batch of strings, one call per column.
    ///
    /// Implementations may batch or parallelize internally; the caller
    /// relies only on order and width.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, PrepError>;
}

/// Deterministic stand-in for a real embedding model.
///
/// Feature `i` of a string is a stable hash of `(i, text)` mapped into
/// `[-1, 1]`. Useful for dry runs and tests; carries no semantic signal.
#[derive(Clone, Debug)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn feature(&self, text: &str, index: usize) -> f32 {
        let hash = stable_hash_str(index as u64, text);
        (hash as f64 / u64::MAX as f64 * 2.0 - 1.0) as f32
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIM)
    }
}

impl Embedder for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, PrepError> {
        Ok(texts
            .iter()
            .map(|text| {
                (0..self.dimension)
                    .map(|index| self.feature(text, index))
                    .collect()
            })
            .collect())
    }
}
