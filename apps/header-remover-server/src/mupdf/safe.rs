//! Scoped PDF document
//!
//! A [`SafeDocument`] owns one MuPDF document for the duration of a single
//! redaction call.
//!
//! # Design
//!
//! MuPDF documents are not thread-safe and hold a thread-local context.
//! A `SafeDocument` is therefore:
//!
//! 1. Opened from request bytes on the blocking worker thread
//! 2. Mutated page by page on that same thread
//! 3. Serialized and dropped before the worker returns
//!
//! Nothing is shared between requests.

use mupdf::pdf::{PdfDocument, PdfPage, PdfWriteOptions};

use super::page::MupdfPage;
use crate::document::{RedactError, RedactResult};
use crate::redact::RedactableDocument;

/// How far into the file the `%PDF-` marker may appear
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Garbage collection level for output: drop unreferenced objects, merge
/// duplicates and compact the xref
const GARBAGE_LEVEL: i32 = 4;

/// Check for the `%PDF-` marker near the start of the data
pub fn has_pdf_header(data: &[u8]) -> bool {
    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}

/// Single-owner MuPDF document
pub struct SafeDocument {
    doc: PdfDocument,
    page_count: usize,
}

impl SafeDocument {
    /// Open a PDF from bytes
    ///
    /// Every failure here is an `InvalidInput`: the upload is not a PDF we
    /// can work with.
    pub fn from_bytes(data: &[u8]) -> RedactResult<Self> {
        let open_failed = |reason: String| RedactError::invalid_input(format!("PDF açılamadı: {}", reason));

        if !has_pdf_header(data) {
            return Err(open_failed("missing %PDF header".to_string()));
        }

        let doc = PdfDocument::from_bytes(data).map_err(|e| open_failed(e.to_string()))?;

        if doc.needs_password().map_err(|e| open_failed(e.to_string()))? {
            return Err(open_failed("document is password protected".to_string()));
        }

        let page_count = doc.page_count().map_err(|e| open_failed(e.to_string()))?;
        let page_count = usize::try_from(page_count)
            .map_err(|_| open_failed(format!("invalid page count {}", page_count)))?;

        tracing::debug!(pages = page_count, bytes = data.len(), "Opened PDF");

        Ok(Self { doc, page_count })
    }

    /// Write options for the output document
    fn write_options() -> PdfWriteOptions {
        let mut options = PdfWriteOptions::default();
        options.set_compress(true);
        options.set_garbage_level(GARBAGE_LEVEL);
        options
    }
}

impl RedactableDocument for SafeDocument {
    type Page = MupdfPage;

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn load_page(&self, index: usize) -> RedactResult<MupdfPage> {
        let number = i32::try_from(index)
            .map_err(|_| RedactError::processing(format!("page index {} out of range", index)))?;
        let page = self.doc.load_page(number)?;
        let page = PdfPage::try_from(page)?;
        Ok(MupdfPage::new(page, index))
    }

    fn write(&self) -> RedactResult<Vec<u8>> {
        let mut out = Vec::new();
        self.doc.write_to_with_options(&mut out, Self::write_options())?;
        Ok(out)
    }
}
