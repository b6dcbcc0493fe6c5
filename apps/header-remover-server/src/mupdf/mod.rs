//! Low-level MuPDF Wrapper
//!
//! This module is the only place that talks to the MuPDF library. It
//! provides the document and page implementations the header redactor
//! runs against.
//!
//! # Thread Safety
//!
//! MuPDF's `fz_context` is **NOT thread-safe**. Documents are opened, used
//! and dropped on one blocking worker thread per request and never cross an
//! await point.
//!
//! # Usage
//!
//! ```rust,ignore
//! use header_remover_server::mupdf::SafeDocument;
//! use header_remover_server::redact::{HeaderRedactor, HeaderTerms, RedactionOptions};
//!
//! let doc = SafeDocument::from_bytes(&pdf_bytes)?;
//! let terms = HeaderTerms::parse("CONFIDENTIAL DRAFT")?;
//! let redactor = HeaderRedactor::new(terms, &RedactionOptions::default())?;
//! let redacted = redactor.redact_document(&doc)?;
//! ```

mod page;
mod safe;
mod stext;

pub use page::MupdfPage;
pub use safe::{has_pdf_header, SafeDocument};
pub use stext::{extract_lines, quad_to_rect, search_lines, Glyph, GlyphLine};
