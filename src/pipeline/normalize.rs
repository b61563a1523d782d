//! Text cleanup applied to decoded text before segmentation.
//!
//! Decoders hand back whatever the document contained: Windows line endings
//! from TXT exports, zero-width joiners and soft hyphens from word processors,
//! non-breaking spaces from PDF generators. Left in place they break skill
//! matching (`"Pyth\u{AD}on"`) and contact patterns, so they are removed
//! first. Rules run in the order listed in [`normalize_text`].

/// Apply all cleanup rules.
///
/// 1. Normalise line endings (CRLF / CR → LF)
/// 2. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens, joiners)
/// 3. Replace non-breaking and other fixed-width spaces with a plain space
pub fn normalize_text(input: &str) -> String {
    let s = normalise_line_endings(input);
    let s = remove_invisible_chars(&s);
    replace_special_spaces(&s)
}

// ── Rule 1: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 2: Remove invisible Unicode characters ──────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Rule 3: Fixed-width spaces → plain space ─────────────────────────────────

fn replace_special_spaces(input: &str) -> String {
    input.replace(['\u{00A0}', '\u{2007}', '\u{202F}', '\u{2009}'], " ")
}
