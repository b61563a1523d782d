//! Recency ordering of experience entries.

use crate::output::ExperienceEntry;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Reverse;

/// Key assigned to open-ended ranges; sorts above every real year.
pub const OPEN_ENDED: u32 = u32::MAX;

static RE_OPEN_ENDED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:present|current|now)\b").unwrap());

static RE_FOUR_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

/// Sort key for a `dates` string: [`OPEN_ENDED`] for ranges that run to the
/// present, otherwise the largest four-digit number, otherwise 0.
pub fn recency_key(dates: &str) -> u32 {
    if RE_OPEN_ENDED.is_match(dates) {
        return OPEN_ENDED;
    }
    RE_FOUR_DIGITS
        .find_iter(dates)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// Most recent first. Stable: equal keys keep document order.
pub fn sort_by_recency(entries: &mut [ExperienceEntry]) {
    entries.sort_by_key(|e| Reverse(recency_key(&e.dates)));
}
