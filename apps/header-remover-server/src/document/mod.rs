//! Format-agnostic redaction building blocks
//!
//! - `types`: page geometry (rectangles, detection band, unit conversion)
//! - `merge`: rectangle union-merge strategies
//! - `error`: redaction and search errors

pub mod error;
pub mod merge;
pub mod types;

pub use error::{RedactError, RedactResult, SearchError};
pub use merge::{merge_connected, merge_first_match, MergeStrategy};
pub use types::{detection_band, mm_to_pt, Rect, MM_PER_INCH, PT_PER_INCH};
