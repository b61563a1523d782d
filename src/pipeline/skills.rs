//! Skill list extraction.

use crate::output::dedup_capped;
use crate::pipeline::patterns::strip_leading_bullet;

/// Parse a skills section: comma- or newline-separated items, bullets
/// stripped, single characters dropped, de-duplicated in order, capped.
pub fn parse_skill_section(text: &str, cap: usize) -> Vec<String> {
    let items = text
        .split([',', '\n'])
        .map(|item| strip_leading_bullet(item.trim()).trim())
        .filter(|item| item.chars().count() > 1)
        .map(str::to_string)
        .collect();
    dedup_capped(items, cap)
}

/// Vocabulary entries that occur anywhere in `text`, case-insensitively, in
/// vocabulary order.
pub fn scan_vocabulary(text: &str, vocabulary: &[String]) -> Vec<String> {
    let haystack = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .cloned()
        .collect()
}
