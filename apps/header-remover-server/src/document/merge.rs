//! Rectangle union-merge
//!
//! Search hits for neighbouring words or for several header terms often
//! overlap. They are folded into bounding regions before redaction so each
//! area is redacted once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::Rect;

/// How overlapping match rectangles are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// Greedy single pass. An input grows the first accumulated region it
    /// touches and stops there, so a rectangle bridging two earlier regions
    /// can leave them touching.
    FirstMatch,
    /// Connected components. Every region a rectangle touches is absorbed,
    /// repeatedly, so no two outputs touch.
    #[default]
    Connected,
}

impl MergeStrategy {
    pub fn merge(self, rects: &[Rect]) -> Vec<Rect> {
        match self {
            MergeStrategy::FirstMatch => merge_first_match(rects),
            MergeStrategy::Connected => merge_connected(rects),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MergeStrategy::FirstMatch => "first-match",
            MergeStrategy::Connected => "connected",
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-match" | "first_match" | "greedy" => Ok(MergeStrategy::FirstMatch),
            "connected" | "components" => Ok(MergeStrategy::Connected),
            other => Err(format!("unknown merge strategy '{}'", other)),
        }
    }
}

/// Greedy first-match merge, order dependent, O(n*m)
pub fn merge_first_match(rects: &[Rect]) -> Vec<Rect> {
    let mut merged: Vec<Rect> = Vec::new();

    for rect in rects {
        match merged.iter_mut().find(|m| m.touches(rect)) {
            Some(region) => *region = region.union(rect),
            None => merged.push(*rect),
        }
    }

    merged
}

/// Full connected-components merge
///
/// Output regions never touch each other, and merging the output again
/// returns it unchanged.
pub fn merge_connected(rects: &[Rect]) -> Vec<Rect> {
    let mut merged: Vec<Rect> = Vec::with_capacity(rects.len());

    for rect in rects {
        let mut current = *rect;

        // Absorbing a region can grow `current` into regions the same pass
        // already skipped.
        loop {
            let before = merged.len();
            merged.retain(|region| {
                if region.touches(&current) {
                    current = current.union(region);
                    false
                } else {
                    true
                }
            });
            if merged.len() == before {
                break;
            }
        }

        merged.push(current);
    }

    merged
}
