//! Fallback rules that keep a draft well-formed when structure is missing.

use crate::config::HeuristicParams;
use crate::output::ExperienceEntry;

/// Substituted for documents that decode to no text.
pub const EMPTY_DOCUMENT_TEXT: &str = "No readable text found in document.";

/// Substituted for a missing or implausible name.
pub const PLACEHOLDER_NAME: &str = "Scanned User";

/// The single entry emitted when no experience section was found: the head of
/// the raw text, for the user to review by hand.
pub fn review_entry(raw: &str, params: &HeuristicParams) -> ExperienceEntry {
    let description = match raw.char_indices().nth(params.raw_review_chars) {
        Some((idx, _)) => raw[..idx].to_string(),
        None => raw.to_string(),
    };
    ExperienceEntry {
        company: "Parsed from Document".into(),
        position: "Raw Text Review".into(),
        dates: "Review Below".into(),
        location: String::new(),
        description,
    }
}

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|l| !l.is_empty())
}

/// First line of the header section, else of the whole text.
///
/// Returns the name and whether the placeholder had to be used.
pub fn guess_name(header: &str, raw: &str, params: &HeuristicParams) -> (String, bool) {
    let candidate = first_line(header).or_else(|| first_line(raw)).unwrap_or("");
    let len = candidate.chars().count();
    if len == 0 || len > params.name_max_chars {
        (PLACEHOLDER_NAME.to_string(), true)
    } else {
        (candidate.to_string(), false)
    }
}
