use crate::types::Embedding;

/// Maps a non-empty text to a fixed-length vector.
///
/// Implementations are loaded once and reused for every page; `dim` never
/// changes over the lifetime of an instance.
pub trait Embedder: Send + Sync {
    /// Stable name of the underlying model.
    fn model_id(&self) -> &str;
    /// Length of every vector returned by `embed`.
    fn dim(&self) -> usize;
    fn embed(&self, text: &str) -> anyhow::Result<Embedding>;
}
