//! Header Redactor
//!
//! Walks every page of a document, searches the top band for header terms,
//! merges the hits and redacts the merged regions.
//!
//! The orchestration here only talks to pages through [`BandSearch`] and
//! [`RedactablePage`], so it runs unchanged against MuPDF
//! ([`crate::mupdf::SafeDocument`]) or an in-memory page in tests.

mod terms;

pub use terms::HeaderTerms;

use serde::Serialize;

use crate::document::{
    detection_band, mm_to_pt, MergeStrategy, Rect, RedactError, RedactResult, SearchError,
};
use crate::mupdf::SafeDocument;

/// Default top band height in millimetres
pub const DEFAULT_BAND_MM: f64 = 25.0;

/// Default left/right margin in millimetres
pub const DEFAULT_MARGIN_MM: f64 = 0.0;

/// Text search with positional results
pub trait BandSearch {
    /// Whether `search` honours a clip rectangle
    fn supports_clip(&self) -> bool;

    /// Literal search for `term`, one rectangle per match
    ///
    /// With `clip` set, only matches lying in the clip are returned.
    fn search(
        &self,
        term: &str,
        clip: Option<&Rect>,
        ignore_case: bool,
    ) -> Result<Vec<Rect>, SearchError>;
}

/// A page that can be searched and redacted
pub trait RedactablePage: BandSearch {
    /// Page rectangle in points
    fn bounds(&self) -> RedactResult<Rect>;

    /// Permanently remove content under `regions`, leaving white fill
    fn redact_regions(&mut self, regions: &[Rect]) -> RedactResult<()>;
}

/// An open document owned by a single redaction call
pub trait RedactableDocument {
    type Page: RedactablePage;

    fn page_count(&self) -> usize;

    fn load_page(&self, index: usize) -> RedactResult<Self::Page>;

    /// Serialize the whole document
    fn write(&self) -> RedactResult<Vec<u8>>;
}

/// Search `term` inside `band`
///
/// Uses a clipped search when the page supports one. Otherwise, or when the
/// clipped search fails, searches the whole page and keeps only hits that
/// intersect the band.
pub fn search_in_band<P: BandSearch + ?Sized>(
    page: &P,
    term: &str,
    band: &Rect,
    ignore_case: bool,
) -> Result<Vec<Rect>, SearchError> {
    if page.supports_clip() {
        match page.search(term, Some(band), ignore_case) {
            Ok(hits) => return Ok(hits),
            Err(e) => {
                tracing::debug!(term, error = %e, "Clipped search failed, retrying on full page");
            }
        }
    }

    let hits = page.search(term, None, ignore_case)?;
    Ok(hits.into_iter().filter(|hit| hit.intersects(band)).collect())
}

/// User-facing redaction parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedactionOptions {
    /// Top band height in millimetres
    pub band_mm: f64,
    /// Left/right inset of the band in millimetres
    pub margin_mm: f64,
    /// Case-insensitive matching
    pub ignore_case: bool,
    pub merge_strategy: MergeStrategy,
}

impl Default for RedactionOptions {
    fn default() -> Self {
        Self {
            band_mm: DEFAULT_BAND_MM,
            margin_mm: DEFAULT_MARGIN_MM,
            ignore_case: false,
            merge_strategy: MergeStrategy::default(),
        }
    }
}

impl RedactionOptions {
    pub fn validate(&self) -> RedactResult<()> {
        if !self.band_mm.is_finite() || self.band_mm < 0.0 {
            return Err(RedactError::invalid_input(format!(
                "band_mm sıfır veya pozitif olmalıdır: {}",
                self.band_mm
            )));
        }
        if !self.margin_mm.is_finite() || self.margin_mm < 0.0 {
            return Err(RedactError::invalid_input(format!(
                "margin_mm sıfır veya pozitif olmalıdır: {}",
                self.margin_mm
            )));
        }
        Ok(())
    }
}

/// Counters collected while redacting one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionSummary {
    pub pages_processed: usize,
    /// Pages where at least one region was redacted
    pub pages_modified: usize,
    /// Raw search hits across all terms, before merging
    pub matches: usize,
    pub regions_redacted: usize,
    /// Term searches that failed and counted as zero matches
    pub degraded_searches: usize,
}

/// Output of [`remove_headers`]
#[derive(Debug)]
pub struct RedactedPdf {
    pub bytes: Vec<u8>,
    pub summary: RedactionSummary,
}

/// Applies header redaction to documents
#[derive(Debug, Clone)]
pub struct HeaderRedactor {
    terms: HeaderTerms,
    ignore_case: bool,
    merge_strategy: MergeStrategy,
    band_pt: f32,
    margin_pt: f32,
}

impl HeaderRedactor {
    pub fn new(terms: HeaderTerms, options: &RedactionOptions) -> RedactResult<Self> {
        options.validate()?;

        Ok(Self {
            terms,
            ignore_case: options.ignore_case,
            merge_strategy: options.merge_strategy,
            band_pt: mm_to_pt(options.band_mm) as f32,
            margin_pt: mm_to_pt(options.margin_mm) as f32,
        })
    }

    /// Band for a page with the given bounds
    pub fn band_for(&self, page_bounds: &Rect) -> Rect {
        detection_band(page_bounds, self.band_pt, self.margin_pt)
    }

    /// Redact one page, returning the number of regions redacted
    pub fn redact_page<P: RedactablePage>(
        &self,
        page: &mut P,
        page_index: usize,
        summary: &mut RedactionSummary,
    ) -> RedactResult<usize> {
        let band = self.band_for(&page.bounds()?);

        let mut hits = Vec::new();
        for term in self.terms.iter() {
            match search_in_band(&*page, term, &band, self.ignore_case) {
                Ok(found) => hits.extend(found),
                Err(e) => {
                    summary.degraded_searches += 1;
                    tracing::warn!(
                        page = page_index + 1,
                        term,
                        error = %e,
                        "Header search failed, treating as no matches"
                    );
                }
            }
        }

        summary.pages_processed += 1;
        if hits.is_empty() {
            return Ok(0);
        }

        let regions = self.merge_strategy.merge(&hits);
        page.redact_regions(&regions)?;

        tracing::debug!(
            page = page_index + 1,
            matches = hits.len(),
            regions = regions.len(),
            "Redacted header regions"
        );

        summary.matches += hits.len();
        summary.regions_redacted += regions.len();
        summary.pages_modified += 1;
        Ok(regions.len())
    }

    /// Redact every page in order, then serialize
    pub fn redact_document<D: RedactableDocument>(&self, doc: &D) -> RedactResult<RedactedPdf> {
        let mut summary = RedactionSummary::default();

        for index in 0..doc.page_count() {
            let mut page = doc.load_page(index)?;
            self.redact_page(&mut page, index, &mut summary)?;
        }

        let bytes = doc.write()?;
        Ok(RedactedPdf { bytes, summary })
    }
}

/// Remove header text from every page of a PDF
///
/// Blocking and CPU-bound; call from `spawn_blocking` in async code. The
/// MuPDF document lives only inside this call and is dropped on every
/// return path.
pub fn remove_headers(
    pdf: &[u8],
    header_texts: &str,
    options: &RedactionOptions,
) -> RedactResult<RedactedPdf> {
    let terms = HeaderTerms::parse(header_texts)?;
    let redactor = HeaderRedactor::new(terms, options)?;
    let doc = SafeDocument::from_bytes(pdf)?;

    redactor.redact_document(&doc)
}
