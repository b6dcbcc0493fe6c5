//! Page geometry types
//!
//! Rectangles are expressed in PDF points using MuPDF's page space:
//! the origin is the top-left corner of the page and y grows downwards.

use serde::{Deserialize, Serialize};

/// Points per inch in PDF user space
pub const PT_PER_INCH: f64 = 72.0;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Convert millimetres to PDF points
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_INCH / MM_PER_INCH
}

/// Axis-aligned rectangle given by its corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// True if the rectangle has no area
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Inclusive overlap test: rectangles sharing only an edge or a corner
    /// count as intersecting.
    pub fn touches(&self, other: &Rect) -> bool {
        other.x1 >= self.x0 && other.x0 <= self.x1 && other.y1 >= self.y0 && other.y0 <= self.y1
    }

    /// Strict overlap test used for band filtering
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.x1 > self.x0
            && other.x0 < self.x1
            && other.y1 > self.y0
            && other.y0 < self.y1
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }
}

/// Top band of a page in which header text is searched
///
/// The band spans the full page width minus `margin_pt` on each side and
/// `band_pt` points down from the top edge.
pub fn detection_band(page: &Rect, band_pt: f32, margin_pt: f32) -> Rect {
    Rect {
        x0: page.x0 + margin_pt,
        y0: page.y0,
        x1: page.x1 - margin_pt,
        y1: page.y0 + band_pt,
    }
}
