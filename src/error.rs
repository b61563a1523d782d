//! Error types for the edgequake-resume library.
//!
//! Two distinct types reflect two distinct outcomes:
//!
//! * [`ExtractError`] (**fatal**): no text could be produced at all (missing
//!   file, unsupported extension, corrupt PDF, wrong password). Returned as
//!   `Err(ExtractError)` from the `extract*` entry points that do I/O. No
//!   partial draft exists when this is returned.
//!
//! * [`Fallback`] (**non-fatal**): a heuristic stage found no structure and a
//!   fallback rule produced a generic value instead. Stored inside
//!   [`crate::output::ExtractionOutput`] so callers can tell a confident
//!   extraction from a placeholder one without inspecting the content.
//!
//! Field-level misses (no location, no dates in an entry) are neither: they
//! resolve to empty strings.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the edgequake-resume library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Resume file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The declared extension is not one of pdf, doc, docx, txt.
    #[error("Unsupported file format '{extension}'\nPlease upload a PDF, DOCX, or TXT file.")]
    UnsupportedFormat { extension: String },

    // ── Decode errors ─────────────────────────────────────────────────────
    /// The decoder could not produce any text from the payload.
    #[error("Could not read this {format} file: {detail}")]
    DecodeFailed { format: String, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired,

    /// A password was provided but it is wrong.
    #[error("Wrong password for encrypted PDF")]
    WrongPassword,

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy,\n\
or install pdfium into a directory on the system library path.\n"
    )]
    PdfiumBindingFailed(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output JSON file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A fallback rule that fired during extraction.
///
/// Recorded in [`crate::output::ExtractionOutput::fallbacks`] in the order the
/// rules fired.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// The decoded text was empty; a placeholder sentence was parsed instead.
    #[error("document contained no readable text")]
    EmptyDocument,

    /// No experience section was found; a single raw-text review entry was emitted.
    #[error("no experience section found; emitted a raw-text review entry")]
    NoExperienceSection,

    /// The guessed name was empty or longer than the configured limit.
    #[error("name could not be guessed; used placeholder")]
    PlaceholderName,

    /// No skills section was found; skills came from the reference vocabulary.
    #[error("no skills section found; matched {found} skills from the reference vocabulary")]
    SkillVocabularyScan { found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_display() {
        let e = ExtractError::UnsupportedFormat {
            extension: "odt".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("'odt'"), "got: {msg}");
        assert!(msg.contains("PDF, DOCX, or TXT"));
    }

    #[test]
    fn decode_failed_display() {
        let e = ExtractError::DecodeFailed {
            format: "docx".into(),
            detail: "missing word/document.xml".into(),
        };
        assert!(e.to_string().contains("docx"));
        assert!(e.to_string().contains("missing word/document.xml"));
    }

    #[test]
    fn download_timeout_display() {
        let e = ExtractError::DownloadTimeout {
            url: "https://example.com/cv.pdf".into(),
            secs: 30,
        };
        assert!(e.to_string().contains("30s"));
        assert!(e.to_string().contains("cv.pdf"));
    }

    #[test]
    fn fallback_display_counts_skills() {
        let f = Fallback::SkillVocabularyScan { found: 3 };
        assert!(f.to_string().contains("matched 3 skills"));
    }

    #[test]
    fn fallback_serialises_snake_case() {
        let json = serde_json::to_string(&Fallback::NoExperienceSection).unwrap();
        assert_eq!(json, "\"no_experience_section\"");
    }
}
