//! # edgequake-resume
//!
//! Turn a resume (PDF, DOCX or plain text) into a structured, editable draft.
//!
//! ## Why heuristics?
//!
//! Resumes have no schema. What they do have is a handful of conventions that
//! hold across most templates: a name on the first line, section headings
//! drawn from a small vocabulary, one block per job opened by a short header
//! line and a date range, bulleted descriptions. This crate follows those
//! conventions with deterministic rules, so extraction is instant, runs
//! offline, and always produces a well-formed draft; when a convention is not
//! followed a fallback rule fills the gap and is reported back to the caller.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF / DOCX / TXT
//!  │
//!  ├─ 1. Input     resolve local file or download from URL
//!  ├─ 2. Decode    pdfium fragments / docx-rs paragraphs / UTF-8 (spawn_blocking)
//!  ├─ 3. Layout    rebuild lines and paragraphs from PDF fragment Y gaps
//!  ├─ 4. Sections  bucket lines under their heading
//!  ├─ 5. Entries   cut experience and education into blocks
//!  ├─ 6. Fields    company, position, dates, location, description
//!  ├─ 7. Sort      most recent job first
//!  └─ 8. Assemble  contact details, skills, fallbacks → ResumeDraft
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_resume::{extract, ExtractionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::default();
//!     let output = extract("resume.pdf", &config).await?;
//!     println!("{}", serde_json::to_string_pretty(&output.draft)?);
//!     for fallback in &output.fallbacks {
//!         eprintln!("note: {fallback}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Merging into a draft the user has already edited:
//!
//! ```rust
//! use edgequake_resume::{extract_text, ExtractionConfig, ResumeDraft};
//!
//! let mut draft = ResumeDraft::default();
//! draft.personal.email = "me@example.com".into();
//!
//! let config = ExtractionConfig::default();
//! let output = extract_text("Jane Doe\nBuilt tools in Python", &config);
//! draft.apply(output.parsed, config.heuristics.max_skills);
//!
//! assert_eq!(draft.personal.full_name, "Jane Doe");
//! assert_eq!(draft.personal.email, "me@example.com");
//! assert_eq!(draft.skills, vec!["Python"]);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resume2json` binary (clap + anyhow + tracing-subscriber + indicatif) |
//! | `docx`  | on      | DOCX decoding via docx-rs |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! edgequake-resume = { version = "0.1", default-features = false, features = ["docx"] }
//! ```
//!
//! PDF decoding needs a pdfium shared library at runtime: set
//! `PDFIUM_LIB_PATH` or install it on the system library path.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod style;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder, HeuristicParams};
pub use error::{ExtractError, Fallback};
pub use extract::{
    extract, extract_document, extract_fragments, extract_sync, extract_text, extract_to_file,
};
pub use output::{
    EducationEntry, ExperienceEntry, ExtractionOutput, ExtractionStats, ParsedResume,
    PersonalInfo, ResumeDraft, SkillsUpdate,
};
pub use pipeline::input::{DocumentFormat, RawDocument};
pub use pipeline::layout::TextFragment;
pub use pipeline::sections::{SectionKey, SectionMap};
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback, Stage};
pub use style::{modernize, modernize_draft};
