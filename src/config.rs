//! Configuration types for resume extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. The heuristic thresholds live in a
//! separate [`HeuristicParams`] struct that (de)serialises with serde, so a
//! set of values tuned against a corpus of real resumes can be stored as JSON
//! and loaded with `--heuristics params.json`.

use crate::error::ExtractError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference vocabulary scanned when a resume has no skills section.
pub const DEFAULT_SKILL_VOCABULARY: &[&str] = &[
    "JavaScript",
    "HTML",
    "CSS",
    "React",
    "Node.js",
    "Python",
    "Java",
    "SQL",
    "Management",
    "Sales",
    "Design",
    "Figma",
    "AWS",
    "Docker",
    "Marketing",
    "Excel",
    "C++",
    "Agile",
];

/// Tunable thresholds used by the layout, segmentation and field heuristics.
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```rust
/// use edgequake_resume::HeuristicParams;
///
/// let params: HeuristicParams = serde_json::from_str(r#"{ "short_header_chars": 40 }"#).unwrap();
/// assert_eq!(params.short_header_chars, 40);
/// assert_eq!(params.paragraph_gap, 14.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicParams {
    /// Vertical delta below which two PDF fragments share a line. Default: 5.
    pub same_line_gap: f32,

    /// Vertical delta above which a blank line (paragraph break) is emitted. Default: 14.
    pub paragraph_gap: f32,

    /// A non-bullet line shorter than this, seen after a bullet, starts a new job. Default: 50.
    pub short_header_chars: usize,

    /// A line shorter than this followed by a date line may start a new job
    /// when no bullets have been seen. Default: 60.
    pub lookahead_header_chars: usize,

    /// Minimum chunk size (exclusive) before the date-only boundary can fire. Default: 2.
    pub fallback_min_chunk_lines: usize,

    /// How many leading lines of an entry are searched for the first bullet. Default: 4.
    pub bullet_scan_lines: usize,

    /// Bullet-less descriptions longer than this are split into sentences. Default: 30.
    pub synthesize_bullets_min_chars: usize,

    /// Maximum number of skills kept. Default: 20.
    pub max_skills: usize,

    /// A guessed name longer than this is replaced by a placeholder. Default: 50.
    pub name_max_chars: usize,

    /// Characters of raw text copied into the fallback review entry. Default: 1500.
    pub raw_review_chars: usize,

    /// Skills searched for when the resume has no skills section.
    pub skill_vocabulary: Vec<String>,
}

impl Default for HeuristicParams {
    fn default() -> Self {
        Self {
            same_line_gap: 5.0,
            paragraph_gap: 14.0,
            short_header_chars: 50,
            lookahead_header_chars: 60,
            fallback_min_chunk_lines: 2,
            bullet_scan_lines: 4,
            synthesize_bullets_min_chars: 30,
            max_skills: 20,
            name_max_chars: 50,
            raw_review_chars: 1500,
            skill_vocabulary: DEFAULT_SKILL_VOCABULARY
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl HeuristicParams {
    /// Check the invariants the heuristics rely on.
    pub fn validate(&self) -> Result<(), ExtractError> {
        let valid_gap = |g: f32| g.is_finite() && g >= 0.0;
        if !valid_gap(self.same_line_gap) || !valid_gap(self.paragraph_gap) {
            return Err(ExtractError::InvalidConfig(
                "layout gaps must be non-negative numbers".into(),
            ));
        }
        if self.same_line_gap > self.paragraph_gap {
            return Err(ExtractError::InvalidConfig(format!(
                "same_line_gap ({}) must not exceed paragraph_gap ({})",
                self.same_line_gap, self.paragraph_gap
            )));
        }
        if self.bullet_scan_lines == 0 {
            return Err(ExtractError::InvalidConfig(
                "bullet_scan_lines must be ≥ 1".into(),
            ));
        }
        if self.max_skills == 0 {
            return Err(ExtractError::InvalidConfig("max_skills must be ≥ 1".into()));
        }
        Ok(())
    }
}

/// Configuration for one resume extraction.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_resume::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .short_header_chars(45)
///     .max_skills(15)
///     .build()
///     .unwrap();
/// assert_eq!(config.heuristics.max_skills, 15);
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Heuristic thresholds shared by every stage.
    pub heuristics: HeuristicParams,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Receives stage-boundary events. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            heuristics: HeuristicParams::default(),
            password: None,
            download_timeout_secs: 120,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("heuristics", &self.heuristics)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl fmt::Debug for ExtractionConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl ExtractionConfigBuilder {
    /// Replace every heuristic at once, e.g. with values loaded from JSON.
    pub fn heuristics(mut self, params: HeuristicParams) -> Self {
        self.config.heuristics = params;
        self
    }

    pub fn same_line_gap(mut self, gap: f32) -> Self {
        self.config.heuristics.same_line_gap = gap;
        self
    }

    pub fn paragraph_gap(mut self, gap: f32) -> Self {
        self.config.heuristics.paragraph_gap = gap;
        self
    }

    pub fn short_header_chars(mut self, n: usize) -> Self {
        self.config.heuristics.short_header_chars = n;
        self
    }

    pub fn lookahead_header_chars(mut self, n: usize) -> Self {
        self.config.heuristics.lookahead_header_chars = n;
        self
    }

    pub fn max_skills(mut self, n: usize) -> Self {
        self.config.heuristics.max_skills = n;
        self
    }

    pub fn skill_vocabulary<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.heuristics.skill_vocabulary = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs.max(1);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractError> {
        self.config.heuristics.validate()?;
        Ok(self.config)
    }
}
