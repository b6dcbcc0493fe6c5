//! Header term parsing

use crate::document::{RedactError, RedactResult};

/// Characters that end a line of header text
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}',
    '\u{2029}',
];

fn is_line_break(c: char) -> bool {
    LINE_BREAKS.contains(&c)
}

/// Non-empty list of header strings to look for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTerms(Vec<String>);

impl HeaderTerms {
    /// Parse newline-separated header text
    ///
    /// Any Unicode line break separates terms, including a lone `\r`. Each
    /// line is trimmed and blank lines are dropped. Fails when nothing is
    /// left.
    pub fn parse(text: &str) -> RedactResult<Self> {
        let terms: Vec<String> = text
            .split(is_line_break)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if terms.is_empty() {
            return Err(RedactError::invalid_input(
                "En az bir header metni girilmelidir.",
            ));
        }

        Ok(Self(terms))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
