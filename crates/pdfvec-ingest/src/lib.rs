use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing::debug;

use pdfvec_core::extract::PdfPages;
use pdfvec_core::traits::Embedder;
use pdfvec_core::types::NewRecord;
use pdfvec_store::StoreWriter;

/// Outcome of one document's ingestion pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub filename: String,
    pub page_count: usize,
    /// Records appended (and committed) for this document.
    pub records: usize,
    /// Pages without extractable text.
    pub skipped: Vec<u32>,
    /// Commit events during this pass, including the final one.
    pub commits: usize,
}

/// Extract, embed and store every non-blank page of `path`, in page order.
///
/// The store commits every `commit_interval` records and once more after the
/// last page. Any failure aborts the pass; rows committed before it remain.
pub fn ingest_pdf(path: &Path, embedder: &dyn Embedder, store: &mut StoreWriter) -> Result<IngestReport> {
    let mut pages = PdfPages::open(path).with_context(|| format!("open {}", path.display()))?;
    let filename = pages.filename().to_string();
    let commits_before = store.commits();
    let mut records = 0usize;

    for page in pages.by_ref() {
        let page = page.with_context(|| format!("extract text from {}", filename))?;
        let embedding = embedder.embed(&page.text).with_context(|| format!("embed page {} of {}", page.number, filename))?;
        if embedding.len() != embedder.dim() {
            bail!("{} returned {} dims for page {}, expected {}", embedder.model_id(), embedding.len(), page.number, embedder.dim());
        }
        store.append(NewRecord { filename: filename.clone(), page: page.number, text: page.text, embedding })?;
        records += 1;
    }
    store.commit()?;

    let report = IngestReport {
        filename,
        page_count: pages.page_count(),
        records,
        skipped: pages.skipped().to_vec(),
        commits: store.commits() - commits_before,
    };
    debug!(?report, "ingest finished");
    Ok(report)
}
