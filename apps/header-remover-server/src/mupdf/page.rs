//! MuPDF page adapter
//!
//! Implements [`BandSearch`] on top of structured text and
//! [`RedactablePage`] on top of MuPDF redaction annotations.

use std::cell::OnceCell;

use mupdf::color::AnnotationColor;
use mupdf::pdf::{PdfAnnotationType, PdfPage, PdfRedactImageMethod, PdfRedactOptions};

use super::stext::{extract_lines, from_mupdf_rect, search_lines, to_mupdf_rect, GlyphLine};
use crate::document::{Rect, RedactResult, SearchError};
use crate::redact::{BandSearch, RedactablePage};

/// Fill colour left behind by a redaction
const REDACTION_FILL: AnnotationColor = AnnotationColor::Rgb {
    red: 1.0,
    green: 1.0,
    blue: 1.0,
};

/// Text and any image touched by a region are removed outright; no black
/// boxes are drawn, so the white interior colour is what remains.
const REDACT_OPTIONS: PdfRedactOptions = PdfRedactOptions {
    image_method: PdfRedactImageMethod::Remove,
    ..PdfRedactOptions::mupdf_default()
};

/// A loaded PDF page
pub struct MupdfPage {
    page: PdfPage,
    /// Zero-based, for logging
    index: usize,
    /// Structured text, extracted on the first search
    lines: OnceCell<Vec<GlyphLine>>,
}

impl MupdfPage {
    pub(crate) fn new(page: PdfPage, index: usize) -> Self {
        Self {
            page,
            index,
            lines: OnceCell::new(),
        }
    }

    fn lines(&self) -> Result<&[GlyphLine], SearchError> {
        if let Some(lines) = self.lines.get() {
            return Ok(lines);
        }
        let lines = extract_lines(&self.page)?;
        Ok(self.lines.get_or_init(|| lines))
    }
}

impl BandSearch for MupdfPage {
    fn supports_clip(&self) -> bool {
        true
    }

    fn search(
        &self,
        term: &str,
        clip: Option<&Rect>,
        ignore_case: bool,
    ) -> Result<Vec<Rect>, SearchError> {
        let lines = self.lines()?;
        Ok(search_lines(lines, term, clip, ignore_case))
    }
}

impl RedactablePage for MupdfPage {
    fn bounds(&self) -> RedactResult<Rect> {
        let bounds = self.page.bounds()?;
        Ok(from_mupdf_rect(&bounds))
    }

    fn redact_regions(&mut self, regions: &[Rect]) -> RedactResult<()> {
        for region in regions {
            let mut annot = self.page.create_annotation(PdfAnnotationType::Redact)?;
            annot.set_rect(to_mupdf_rect(region))?;
            annot.set_interior_color(REDACTION_FILL)?;
        }

        // Applies every redaction annotation on the page and deletes them
        self.page.redact_with_options(REDACT_OPTIONS)?;
        tracing::debug!(page = self.index + 1, regions = regions.len(), "Applied redactions");

        // Page content changed
        self.lines = OnceCell::new();
        Ok(())
    }
}
