//! Page-by-page text extraction from PDF files.
//!
//! [`PdfPages`] owns the parsed document for the duration of one pass and
//! yields the trimmed text of every page that has any. Blank pages (for
//! example scanned images without a text layer) are logged and skipped so no
//! embedding is ever computed for them.

use std::path::Path;
use std::vec;

use lopdf::Document;
use tracing::info;

use crate::error::Result;
use crate::types::PageText;

pub struct PdfPages {
    doc: Document,
    filename: String,
    numbers: vec::IntoIter<u32>,
    page_count: usize,
    skipped: Vec<u32>,
    finished: bool,
}

impl PdfPages {
    /// Parse the document at `path`. The caller has already checked that the
    /// file exists; parse failures are returned as-is.
    pub fn open(path: &Path) -> Result<Self> {
        let doc = Document::load(path)?;
        let filename = path
            .file_name()
            .map_or_else(|| path.to_string_lossy().to_string(), |n| n.to_string_lossy().to_string());
        // get_pages is keyed by 1-based page number in document order
        let numbers: Vec<u32> = doc.get_pages().into_keys().collect();
        let page_count = numbers.len();
        info!(file = %filename, pages = page_count, "Processing PDF: {} with {} pages.", filename, page_count);
        Ok(Self { doc, filename, numbers: numbers.into_iter(), page_count, skipped: Vec::new(), finished: false })
    }

    /// Base name of the source file, used as the record's provenance.
    pub fn filename(&self) -> &str { &self.filename }

    pub fn page_count(&self) -> usize { self.page_count }

    /// Page numbers skipped so far because they had no extractable text.
    pub fn skipped(&self) -> &[u32] { &self.skipped }
}

impl Iterator for PdfPages {
    type Item = Result<PageText>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(number) = self.numbers.next() else {
                if !self.finished {
                    self.finished = true;
                    info!(file = %self.filename, "Finished processing PDF: {}.", self.filename);
                }
                return None;
            };
            let raw = match self.doc.extract_text(&[number]) {
                Ok(raw) => raw,
                Err(e) => return Some(Err(e.into())),
            };
            let text = raw.trim();
            if text.is_empty() {
                info!(page = number, "Page {} has no text. Skipping.", number);
                self.skipped.push(number);
                continue;
            }
            info!(page = number, "Processing page {}/{}...", number, self.page_count);
            return Some(Ok(PageText { number, text: text.to_string() }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fixtures::write_pdf;
    use tempfile::TempDir;

    #[test]
    fn yields_pages_in_order_with_one_based_numbers() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("three.pdf");
        write_pdf(&path, &["alpha page", "bravo page", "charlie page"]).unwrap();

        let mut pages = PdfPages::open(&path).expect("open");
        assert_eq!(pages.page_count(), 3);
        assert_eq!(pages.filename(), "three.pdf");
        let got: Vec<PageText> = pages.by_ref().collect::<Result<_>>().expect("extract");
        let numbers: Vec<u32> = got.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(got[0].text.contains("alpha"));
        assert!(got[2].text.contains("charlie"));
        assert!(pages.skipped().is_empty());
    }

    #[test]
    fn text_is_trimmed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("padded.pdf");
        write_pdf(&path, &["   padded words   "]).unwrap();

        let page = PdfPages::open(&path).unwrap().next().unwrap().unwrap();
        assert_eq!(page.text, page.text.trim());
        assert!(page.text.starts_with("padded"));
    }

    #[test]
    fn blank_pages_are_skipped_and_reported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("gap.pdf");
        write_pdf(&path, &["first", "", "third"]).unwrap();

        let mut pages = PdfPages::open(&path).unwrap();
        let numbers: Vec<u32> = pages.by_ref().map(|p| p.unwrap().number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(pages.skipped(), &[2]);
    }

    #[test]
    fn all_blank_document_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blank.pdf");
        write_pdf(&path, &["", ""]).unwrap();

        let mut pages = PdfPages::open(&path).unwrap();
        assert!(pages.next().is_none());
        assert!(pages.next().is_none(), "exhausted iterator stays exhausted");
        assert_eq!(pages.skipped(), &[1, 2]);
    }

    #[test]
    fn non_pdf_input_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.pdf");
        std::fs::write(&path, b"plain text, not a pdf").unwrap();

        assert!(matches!(PdfPages::open(&path), Err(Error::Pdf(_))));
    }
}
