//! Layout-aware text reconstruction for PDF pages.
//!
//! A PDF decoder yields positioned fragments, not lines. This stage turns one
//! page's fragments into text using only the vertical distance between
//! consecutive baselines:
//!
//! | `|Δy|`                          | emitted before the fragment |
//! |---------------------------------|-----------------------------|
//! | first fragment, or `< same_line_gap` | nothing (same line)    |
//! | `> paragraph_gap`               | `"\n\n"` (paragraph break)  |
//! | otherwise                       | `"\n"` (new line)           |
//!
//! Every fragment is followed by a single space. Fragments are never
//! reordered, and the stage cannot fail; at worst paragraphs come out over- or
//! under-segmented.

use crate::config::HeuristicParams;
use serde::{Deserialize, Serialize};

/// A run of text at a given baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    /// Baseline Y coordinate in page units.
    pub y: f32,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, y: f32) -> Self {
        Self {
            text: text.into(),
            y,
        }
    }
}

/// Reconstruct one page.
pub fn reconstruct_page(fragments: &[TextFragment], params: &HeuristicParams) -> String {
    let capacity = fragments.iter().map(|f| f.text.len() + 2).sum();
    let mut page = String::with_capacity(capacity);
    let mut last_y: Option<f32> = None;

    for fragment in fragments {
        if let Some(prev) = last_y {
            let gap = (fragment.y - prev).abs();
            if gap > params.paragraph_gap {
                page.push_str("\n\n");
            } else if gap >= params.same_line_gap {
                page.push('\n');
            }
        }
        page.push_str(&fragment.text);
        page.push(' ');
        last_y = Some(fragment.y);
    }

    page
}

/// Reconstruct every page and concatenate them, each followed by a line break.
pub fn reconstruct_document(pages: &[Vec<TextFragment>], params: &HeuristicParams) -> String {
    let mut text = String::new();
    for fragments in pages {
        text.push_str(&reconstruct_page(fragments, params));
        text.push('\n');
    }
    text
}
