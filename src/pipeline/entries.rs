//! Entry segmentation: split a section's text into one block per job or school.
//!
//! Section text is first split into blank-line-delimited paragraphs. Within a
//! paragraph, experience blocks are cut with a small state machine that tracks
//! whether the scan is inside a bulleted description; education blocks are cut
//! on date lines. Every returned block holds trimmed, non-blank lines.

use crate::config::HeuristicParams;
use crate::pipeline::patterns::{find_education_dates, has_date_range, is_bullet};

/// One job or school: trimmed, non-blank lines in document order.
pub type EntryBlock = Vec<String>;

/// Split on blank lines. Paragraphs that are entirely blank are dropped.
pub fn split_paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

/// Cut the experience section into job blocks.
///
/// A new block starts at line `i` when the current chunk is non-empty and
/// either:
///
/// * the scan has passed a bullet and line `i` is a non-bullet that carries a
///   date range, is short, or is followed by a date line; or
/// * no bullet has been seen, the chunk already holds more than
///   `fallback_min_chunk_lines` lines, and line `i` carries a date range or is
///   a short line followed by one.
pub fn segment_experience(text: &str, params: &HeuristicParams) -> Vec<EntryBlock> {
    let mut blocks = Vec::new();

    for paragraph in split_paragraphs(text) {
        let lines: Vec<&str> = paragraph.iter().map(|l| l.trim()).collect();
        let mut chunk: EntryBlock = Vec::new();
        let mut in_description = false;

        for (i, line) in lines.iter().enumerate() {
            let bullet = is_bullet(line);
            if bullet {
                in_description = true;
            }

            let has_date = has_date_range(line);
            let next_has_date = lines.get(i + 1).is_some_and(|next| has_date_range(next));
            let len = line.chars().count();

            let new_job = in_description
                && !bullet
                && (has_date || len < params.short_header_chars || next_has_date);
            let fallback = !in_description
                && chunk.len() > params.fallback_min_chunk_lines
                && (has_date || (next_has_date && len < params.lookahead_header_chars));

            if !chunk.is_empty() && (new_job || fallback) {
                blocks.push(std::mem::take(&mut chunk));
                in_description = false;
            }
            chunk.push(line.to_string());
        }

        if !chunk.is_empty() {
            blocks.push(chunk);
        }
    }

    blocks
}

/// Cut the education section into school blocks.
///
/// A dated line closes the current block once it holds at least two lines. A
/// dated line arriving when the block already carries a date opens a new one.
/// Blocks without any date stay whole.
pub fn segment_education(text: &str) -> Vec<EntryBlock> {
    let mut blocks = Vec::new();

    for paragraph in split_paragraphs(text) {
        let mut chunk: EntryBlock = Vec::new();
        let mut chunk_dated = false;

        for line in paragraph.iter().map(|l| l.trim()) {
            let dated = find_education_dates(line).is_some();

            if dated && chunk_dated && !chunk.is_empty() {
                blocks.push(std::mem::take(&mut chunk));
                chunk_dated = false;
            }
            chunk.push(line.to_string());
            chunk_dated |= dated;

            if dated && chunk.len() >= 2 {
                blocks.push(std::mem::take(&mut chunk));
                chunk_dated = false;
            }
        }

        if !chunk.is_empty() {
            blocks.push(chunk);
        }
    }

    blocks
}
