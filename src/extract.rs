//! Extraction entry points.
//!
//! The text engine ([`extract_text`], [`extract_fragments`]) is a pure
//! function of its input and configuration: no I/O, no shared state, and the
//! same input always yields the same draft. The async entry points wrap it with
//! input resolution and decoding.

use crate::config::ExtractionConfig;
use crate::error::{ExtractError, Fallback};
use crate::output::{ExtractionOutput, ExtractionStats, ParsedResume, ResumeDraft, SkillsUpdate};
use crate::pipeline::decode::{self, DecodedText};
use crate::pipeline::input::{self, RawDocument};
use crate::pipeline::layout::{self, TextFragment};
use crate::pipeline::sections::{self, SectionKey};
use crate::pipeline::{contact, entries, fallback, fields, normalize, skills, sort};
use crate::progress::{ProgressCallback, Stage};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Forwards stage boundaries to the configured callback and the log.
struct Reporter<'a>(Option<&'a ProgressCallback>);

impl<'a> Reporter<'a> {
    fn new(config: &'a ExtractionConfig) -> Self {
        Self(config.progress_callback.as_ref())
    }

    fn start(&self, stage: Stage) {
        debug!("Stage {} started", stage);
        if let Some(cb) = self.0 {
            cb.on_stage_start(stage);
        }
    }

    fn complete(&self, stage: Stage, items: usize) {
        debug!("Stage {} complete: {} items", stage, items);
        if let Some(cb) = self.0 {
            cb.on_stage_complete(stage, items);
        }
    }

    fn finish(&self, fallbacks: usize) {
        if let Some(cb) = self.0 {
            cb.on_extraction_complete(fallbacks);
        }
    }
}

/// Extract a resume from already-decoded text.
///
/// Never fails: missing structure is resolved by fallback rules, which are
/// listed in [`ExtractionOutput::fallbacks`].
///
/// ```rust
/// use edgequake_resume::{extract_text, ExtractionConfig};
///
/// let text = "Jane Doe\njane@example.com\n\nExperience\nAcme Corp\nEngineer | 2019 - Present\n• Built the API\n";
/// let output = extract_text(text, &ExtractionConfig::default());
/// assert_eq!(output.draft.personal.full_name, "Jane Doe");
/// assert_eq!(output.draft.experience[0].company, "Acme Corp");
/// assert_eq!(output.draft.experience[0].dates, "2019 - Present");
/// ```
pub fn extract_text(text: &str, config: &ExtractionConfig) -> ExtractionOutput {
    run(text, 0, config, Instant::now())
}

/// Extract a resume from positioned PDF fragments, one list per page.
pub fn extract_fragments(pages: &[Vec<TextFragment>], config: &ExtractionConfig) -> ExtractionOutput {
    let start = Instant::now();
    let reporter = Reporter::new(config);

    reporter.start(Stage::Layout);
    let text = layout::reconstruct_document(pages, &config.heuristics);
    reporter.complete(Stage::Layout, text.lines().count());

    run(&text, pages.len(), config, start)
}

/// Decode a document and extract a resume from it.
///
/// # Errors
/// Returns `Err(ExtractError)` when the payload cannot be decoded at all
/// (corrupt file, wrong password, unsupported format). No partial draft is
/// produced in that case.
pub async fn extract_document(
    doc: RawDocument,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let start = Instant::now();
    let reporter = Reporter::new(config);
    let format = doc.format;

    reporter.start(Stage::Decode);
    let decoded = decode::decode(doc, config.password.clone()).await?;
    reporter.complete(Stage::Decode, decoded.page_count());
    debug!("Decoded {} document", format);

    let output = match decoded {
        DecodedText::Pages(pages) => {
            reporter.start(Stage::Layout);
            let text = layout::reconstruct_document(&pages, &config.heuristics);
            reporter.complete(Stage::Layout, text.lines().count());
            run(&text, pages.len(), config, start)
        }
        DecodedText::Plain(text) => run(&text, 0, config, start),
    };
    Ok(output)
}

/// Extract a resume from a local file path or HTTP/HTTPS URL.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input`: local path or URL ending in `.pdf`, `.doc`, `.docx` or `.txt`
/// * `config`: extraction configuration
pub async fn extract(
    input_str: impl AsRef<str>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let input_str = input_str.as_ref();
    info!("Starting extraction: {}", input_str);

    let doc = input::resolve_input(input_str, config.download_timeout_secs).await?;
    extract_document(doc, config).await
}

/// Synchronous wrapper around [`extract`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    input_str: impl AsRef<str>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ExtractError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(extract(input_str, config))
}

/// Extract a resume and write the draft to a JSON file.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn extract_to_file(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionStats, ExtractError> {
    let output = extract(input_str, config).await?;
    let path = output_path.as_ref();
    let json = serde_json::to_string_pretty(&output.draft)
        .map_err(|e| ExtractError::Internal(format!("Failed to serialise draft: {}", e)))?;
    write_atomic(path, json.as_bytes()).await?;
    Ok(output.stats)
}

/// Write `contents` to `path` via a sibling temp file and a rename.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ExtractError> {
    let write_err = |e| ExtractError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, contents)
        .await
        .map_err(write_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_err)?;
    Ok(())
}

/// The text engine: sections → entries → fields → sort → assemble.
fn run(text: &str, pages: usize, config: &ExtractionConfig, start: Instant) -> ExtractionOutput {
    let params = &config.heuristics;
    let reporter = Reporter::new(config);
    let mut fallbacks = Vec::new();

    // Heuristics run on cleaned text; the review entry quotes the input as given.
    let mut source = text;
    let mut clean = normalize::normalize_text(text);
    if clean.trim().is_empty() {
        warn!("Document contains no readable text");
        source = fallback::EMPTY_DOCUMENT_TEXT;
        clean = source.to_string();
        fallbacks.push(Fallback::EmptyDocument);
    }

    // ── Sections ─────────────────────────────────────────────────────────
    reporter.start(Stage::Sections);
    let seg = sections::segment_sections(&clean);
    reporter.complete(Stage::Sections, seg.headings);
    let sections = seg.sections;

    // ── Entries ──────────────────────────────────────────────────────────
    reporter.start(Stage::Entries);
    let has_experience = sections.has(SectionKey::Experience);
    let experience_blocks = if has_experience {
        entries::segment_experience(&sections.experience, params)
    } else {
        Vec::new()
    };
    let education_blocks = if sections.has(SectionKey::Education) {
        entries::segment_education(&sections.education)
    } else {
        Vec::new()
    };
    reporter.complete(
        Stage::Entries,
        experience_blocks.len() + education_blocks.len(),
    );

    // ── Fields ───────────────────────────────────────────────────────────
    reporter.start(Stage::Fields);
    let mut experience: Vec<_> = experience_blocks
        .iter()
        .enumerate()
        .map(|(i, block)| fields::extract_experience(block, i + 1, params))
        .collect();
    let education: Vec<_> = education_blocks
        .iter()
        .enumerate()
        .map(|(i, block)| fields::extract_education(block, i + 1))
        .collect();
    reporter.complete(Stage::Fields, experience.len() + education.len());

    // ── Sort ─────────────────────────────────────────────────────────────
    reporter.start(Stage::Sort);
    sort::sort_by_recency(&mut experience);
    reporter.complete(Stage::Sort, experience.len());

    // ── Assemble ─────────────────────────────────────────────────────────
    reporter.start(Stage::Assemble);
    let experience_entries = experience.len();
    if experience.is_empty() {
        debug!("No experience section; emitting raw text review entry");
        experience.push(fallback::review_entry(source, params));
        fallbacks.push(Fallback::NoExperienceSection);
    }

    let (full_name, placeholder) = fallback::guess_name(&sections.header, &clean, params);
    if placeholder {
        fallbacks.push(Fallback::PlaceholderName);
    }

    let contact = contact::extract_contact(&clean);
    debug!("Found {} contact fields", contact.found());

    let summary = Some(sections.summary.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let skills = if sections.has(SectionKey::Skills) {
        SkillsUpdate::Replace(skills::parse_skill_section(
            &sections.skills,
            params.max_skills,
        ))
    } else {
        let found = skills::scan_vocabulary(&clean, &params.skill_vocabulary);
        fallbacks.push(Fallback::SkillVocabularyScan { found: found.len() });
        SkillsUpdate::Merge(found)
    };

    let parsed = ParsedResume {
        full_name,
        email: contact.email,
        phone: contact.phone,
        linkedin: contact.linkedin,
        website: contact.website,
        summary,
        experience,
        education,
        skills,
    };
    let draft = ResumeDraft::default().with_applied(parsed.clone(), params.max_skills);
    reporter.complete(Stage::Assemble, draft.skills.len());

    let stats = ExtractionStats {
        pages,
        lines: seg.lines,
        headings: seg.headings,
        experience_entries,
        education_entries: draft.education.len(),
        skills: draft.skills.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Extraction complete: {} experience, {} education, {} skills, {} fallbacks in {}ms",
        stats.experience_entries,
        stats.education_entries,
        stats.skills,
        fallbacks.len(),
        stats.duration_ms
    );
    reporter.finish(fallbacks.len());

    ExtractionOutput {
        draft,
        parsed,
        sections,
        fallbacks,
        stats,
    }
}
