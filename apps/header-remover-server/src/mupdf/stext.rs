//! Structured Text Search
//!
//! Literal search over MuPDF's structured text. Each glyph carries its quad,
//! so a match maps to the union of its glyph boxes. Matches never span
//! lines; runs of whitespace on the page and in the term compare equal to a
//! single space.

use mupdf::{Page, Quad, TextPageFlags};

use crate::document::Rect;

/// One character with its box in page space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub rect: Rect,
}

/// Glyphs of one text line, in reading order
pub type GlyphLine = Vec<Glyph>;

/// Bounding rectangle of a MuPDF quad
pub fn quad_to_rect(quad: &Quad) -> Rect {
    Rect::new(
        quad.ul.x.min(quad.ll.x),
        quad.ul.y.min(quad.ur.y),
        quad.ur.x.max(quad.lr.x),
        quad.ll.y.max(quad.lr.y),
    )
}

pub fn from_mupdf_rect(rect: &mupdf::Rect) -> Rect {
    Rect::new(rect.x0, rect.y0, rect.x1, rect.y1)
}

pub fn to_mupdf_rect(rect: &Rect) -> mupdf::Rect {
    mupdf::Rect {
        x0: rect.x0,
        y0: rect.y0,
        x1: rect.x1,
        y1: rect.y1,
    }
}

/// Extract every text line of a page with per-glyph boxes
pub fn extract_lines(page: &Page) -> Result<Vec<GlyphLine>, mupdf::Error> {
    let text_page = page.to_text_page(TextPageFlags::empty())?;
    let mut lines = Vec::new();

    for block in text_page.blocks() {
        for line in block.lines() {
            let glyphs: GlyphLine = line
                .chars()
                .filter_map(|ch| {
                    ch.char().map(|c| Glyph {
                        ch: c,
                        rect: quad_to_rect(&ch.quad()),
                    })
                })
                .collect();

            if !glyphs.is_empty() {
                lines.push(glyphs);
            }
        }
    }

    Ok(lines)
}

fn chars_match(page_char: char, term_char: char, ignore_case: bool) -> bool {
    if page_char == term_char {
        return true;
    }
    ignore_case && page_char.to_lowercase().eq(term_char.to_lowercase())
}

/// Term chars with whitespace runs collapsed to one space
fn normalize_term(term: &str) -> Vec<char> {
    let mut chars = Vec::with_capacity(term.len());
    for word in term.split_whitespace() {
        if !chars.is_empty() {
            chars.push(' ');
        }
        chars.extend(word.chars());
    }
    chars
}

/// Line glyphs with whitespace runs collapsed to their first glyph
fn normalize_line(line: &[Glyph]) -> Vec<Glyph> {
    let mut glyphs: Vec<Glyph> = Vec::with_capacity(line.len());
    for glyph in line {
        if glyph.ch.is_whitespace() {
            if glyphs.last().map_or(false, |g| g.ch == ' ') {
                continue;
            }
            glyphs.push(Glyph { ch: ' ', ..*glyph });
        } else {
            glyphs.push(*glyph);
        }
    }
    glyphs
}

/// Find non-overlapping occurrences of `term` in one line
///
/// Returns the glyph slices of every match.
fn find_in_line(line: &[Glyph], term: &[char], ignore_case: bool) -> Vec<Vec<Glyph>> {
    let mut found = Vec::new();
    if term.is_empty() || line.len() < term.len() {
        return found;
    }

    let mut start = 0;
    while start + term.len() <= line.len() {
        let window = &line[start..start + term.len()];
        let is_match = window
            .iter()
            .zip(term)
            .all(|(glyph, &c)| chars_match(glyph.ch, c, ignore_case));

        if is_match {
            found.push(window.to_vec());
            start += term.len();
        } else {
            start += 1;
        }
    }

    found
}

/// Box covering the visible glyphs of a match
fn match_rect(glyphs: &[Glyph]) -> Option<Rect> {
    glyphs
        .iter()
        .filter(|g| !g.ch.is_whitespace())
        .map(|g| g.rect)
        .reduce(|acc, r| acc.union(&r))
}

/// Search extracted lines for `term`
///
/// With a clip, a match is kept only when each of its visible glyphs
/// intersects the clip.
pub fn search_lines(
    lines: &[GlyphLine],
    term: &str,
    clip: Option<&Rect>,
    ignore_case: bool,
) -> Vec<Rect> {
    let needle = normalize_term(term);
    let mut hits = Vec::new();

    for line in lines {
        let line = normalize_line(line);
        for glyphs in find_in_line(&line, &needle, ignore_case) {
            if let Some(clip) = clip {
                let inside = glyphs
                    .iter()
                    .filter(|g| !g.ch.is_whitespace())
                    .all(|g| g.rect.intersects(clip));
                if !inside {
                    continue;
                }
            }
            if let Some(rect) = match_rect(&glyphs) {
                hits.push(rect);
            }
        }
    }

    hits
}
