//! Lexical patterns shared by the segmentation and field-extraction stages.
//!
//! Each pattern is compiled once into a `Lazy<Regex>` static; the helper
//! functions are what the stages actually call.

use once_cell::sync::Lazy;
use regex::Regex;

/// Glyphs that open a bullet line.
pub const BULLET_GLYPHS: &[char] = &['•', '-', '*', '>', '<', '▪'];

/// Bullet prefix used when descriptions are re-bulleted.
pub const BULLET: &str = "• ";

const MONTH: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?";

/// Month-name/bare-year/`M/YYYY` start, a range separator, then an end token
/// or an open-ended marker. Case-insensitive. Whitespace is horizontal only, so
/// a range never spans two lines.
pub static RE_DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    let point = format!(r"(?:{MONTH}[ \t]*\d{{4}}|\d{{1,2}}/\d{{4}}|\d{{4}})");
    Regex::new(&format!(
        r"(?i)\b{point}[ \t]*(?:[-–—]+|to)[ \t]*(?:{point}|present|current|now)\b"
    ))
    .unwrap()
});

/// Education variant: no `M/YYYY` form, and words may sit between the
/// separator and the end token (`2014 - expected 2018`).
pub static RE_EDUCATION_DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    let point = format!(r"(?:{MONTH}[ \t]*\d{{4}}|\d{{4}})");
    Regex::new(&format!(
        r"(?i)\b{point}[ \t]*(?:[-–—]+|to)[ \t\w]*(?:{point}|present|current)\b"
    ))
    .unwrap()
});

/// Bare year between 1900 and 2099.
pub static RE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

/// "Capitalized Words, STATE", e.g. `San Francisco, CA`.
pub static RE_LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][a-zA-Z\s]+,\s*[A-Z]{2,})\b").unwrap());

static RE_LEADING_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s\-|,–—]+").unwrap());

static RE_TRAILING_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-|,–—]+$").unwrap());

/// Whether the (trimmed) line starts with a bullet glyph.
pub fn is_bullet(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .is_some_and(|c| BULLET_GLYPHS.contains(&c))
}

/// Whether the line contains a full date range.
pub fn has_date_range(line: &str) -> bool {
    RE_DATE_RANGE.is_match(line)
}

/// First date range in `text`, or failing that the first bare year.
pub fn find_dates(text: &str) -> Option<&str> {
    RE_DATE_RANGE
        .find(text)
        .or_else(|| RE_YEAR.find(text))
        .map(|m| m.as_str())
}

/// Education dates: the education range, or failing that the first bare year.
pub fn find_education_dates(text: &str) -> Option<&str> {
    RE_EDUCATION_DATE_RANGE
        .find(text)
        .or_else(|| RE_YEAR.find(text))
        .map(|m| m.as_str())
}

/// Remove one leading bullet glyph and the whitespace after it.
pub fn strip_leading_bullet(s: &str) -> &str {
    let trimmed = s.trim_start();
    match trimmed.chars().next() {
        Some(c) if BULLET_GLYPHS.contains(&c) => trimmed[c.len_utf8()..].trim_start(),
        _ => trimmed,
    }
}

/// Trim whitespace and dangling separators (`- | , –`) from both ends.
pub fn trim_separators(s: &str) -> String {
    let s = RE_TRAILING_SEPARATORS.replace(s, "");
    RE_LEADING_SEPARATORS.replace(&s, "").into_owned()
}

/// Truncate to at most `cap` characters, then trim.
pub fn truncate_chars(s: &str, cap: usize) -> String {
    match s.char_indices().nth(cap) {
        Some((idx, _)) => s[..idx].trim().to_string(),
        None => s.trim().to_string(),
    }
}
