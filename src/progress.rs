//! Progress-callback trait for stage-boundary extraction events.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::ExtractionConfigBuilder::progress_callback`] to receive an
//! event each time the pipeline enters or leaves one of its [`Stage`]s.
//! Events are emitted from the real stage boundaries, so a terminal spinner or
//! a web socket sees exactly as much progress as has actually been made.
//!
//! # Example
//!
//! ```rust
//! use edgequake_resume::{ExtractionConfig, ExtractionProgressCallback, Stage};
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Default)]
//! struct Recorder {
//!     stages: Mutex<Vec<Stage>>,
//! }
//!
//! impl ExtractionProgressCallback for Recorder {
//!     fn on_stage_start(&self, stage: Stage) {
//!         self.stages.lock().unwrap().push(stage);
//!     }
//! }
//!
//! let recorder = Arc::new(Recorder::default());
//! let config = ExtractionConfig::builder()
//!     .progress_callback(recorder.clone() as Arc<dyn ExtractionProgressCallback>)
//!     .build()
//!     .unwrap();
//!
//! edgequake_resume::extract_text("Jane Doe\nExperience\nAcme\n2020 - 2022", &config);
//! assert_eq!(recorder.stages.lock().unwrap().first(), Some(&Stage::Sections));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One step of the extraction pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Byte payload → text or positioned fragments.
    Decode,
    /// PDF fragments → paragraph-structured text.
    Layout,
    /// Lines → named sections.
    Sections,
    /// Section text → entry blocks.
    Entries,
    /// Entry blocks → structured fields.
    Fields,
    /// Experience entries → most recent first.
    Sort,
    /// Contact fields, skills, fallbacks → final draft.
    Assemble,
}

impl Stage {
    /// Human-readable status line for progress displays.
    pub fn message(self) -> &'static str {
        match self {
            Stage::Decode => "Reading file contents...",
            Stage::Layout => "Reconstructing page layout...",
            Stage::Sections => "Analyzing document structure...",
            Stage::Entries => "Extracting work experience...",
            Stage::Fields => "Identifying roles, dates and locations...",
            Stage::Sort => "Ordering experience by recency...",
            Stage::Assemble => "Structuring parsed data...",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Decode => "decode",
            Stage::Layout => "layout",
            Stage::Sections => "sections",
            Stage::Entries => "entries",
            Stage::Fields => "fields",
            Stage::Sort => "sort",
            Stage::Assemble => "assemble",
        };
        f.write_str(name)
    }
}

/// Called by the extraction pipeline at each stage boundary.
///
/// Implementations must be `Send + Sync`: the async entry points run the
/// decoders on a blocking thread pool. All methods default to no-ops so
/// callers only override what they care about.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called when a stage begins.
    fn on_stage_start(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called when a stage ends.
    ///
    /// # Arguments
    /// * `stage`: the stage that just finished
    /// * `items`: what the stage produced: pages decoded, lines
    ///   reconstructed, headings consumed, entry blocks, entries, or skills
    fn on_stage_complete(&self, stage: Stage, items: usize) {
        let _ = (stage, items);
    }

    /// Called once after the draft has been assembled.
    ///
    /// # Arguments
    /// * `fallbacks`: how many fallback rules fired
    fn on_extraction_complete(&self, fallbacks: usize) {
        let _ = fallbacks;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ExtractionConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;
