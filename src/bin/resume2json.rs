//! CLI binary for edgequake-resume.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ExtractionConfig` and prints the resulting draft as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_resume::extract::write_atomic;
use edgequake_resume::{
    extract, modernize_draft, ExtractionConfig, ExtractionOutput, ExtractionProgressCallback,
    HeuristicParams, ProgressCallback, ResumeDraft, Stage,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner showing the current stage, plus one
/// log line per finished stage.
struct CliProgressCallback {
    bar: ProgressBar,
    stages: AtomicUsize,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Parsing");
        bar.set_message("Opening document…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            stages: AtomicUsize::new(0),
        })
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_stage_start(&self, stage: Stage) {
        self.bar.set_message(stage.message());
    }

    fn on_stage_complete(&self, stage: Stage, items: usize) {
        self.stages.fetch_add(1, Ordering::SeqCst);
        self.bar.println(format!(
            "  {} {:<9} {}",
            green("✓"),
            stage.to_string(),
            dim(&format!("{items:>4} items")),
        ));
    }

    fn on_extraction_complete(&self, fallbacks: usize) {
        self.bar.finish_and_clear();
        let stages = self.stages.load(Ordering::SeqCst);
        if fallbacks == 0 {
            eprintln!("{} {} stages complete", green("✔"), bold(&stages.to_string()));
        } else {
            eprintln!(
                "{} {} stages complete  ({} fallbacks)",
                yellow("⚠"),
                bold(&stages.to_string()),
                fallbacks
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Parse a resume (draft JSON on stdout)
  resume2json resume.pdf

  # Write to a file
  resume2json resume.docx -o draft.json

  # Merge into a draft you already edited (contact fields you typed are kept
  # when the document does not contain them)
  resume2json resume.pdf --merge draft.json -o draft.json

  # Rewrite phrasing of the summary and descriptions
  resume2json resume.txt --modernize

  # See how the document was split into sections
  resume2json resume.pdf --sections

  # Full output: draft, raw parse, sections, fallbacks and stats
  resume2json https://example.com/cv.pdf --full

  # Tuned thresholds
  resume2json resume.pdf --heuristics params.json

HEURISTICS FILE:
  A JSON object with any of these keys (missing keys keep their defaults):
    same_line_gap (5), paragraph_gap (14), short_header_chars (50),
    lookahead_header_chars (60), fallback_min_chunk_lines (2),
    bullet_scan_lines (4), synthesize_bullets_min_chars (30), max_skills (20),
    name_max_chars (50), raw_review_chars (1500), skill_vocabulary ([...])

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to libpdfium (file or directory); otherwise the
                          system library path is searched
  RUST_LOG                Override the log filter (e.g. edgequake_resume=debug)
"#;

/// Turn PDF, DOCX and plain-text resumes into structured JSON drafts.
#[derive(Parser, Debug)]
#[command(
    name = "resume2json",
    version,
    about = "Turn PDF, DOCX and plain-text resumes into structured JSON drafts",
    long_about = "Extract name, contact details, summary, work experience, education and skills \
from a resume (local file or URL) using layout-aware, deterministic heuristics. Runs offline; \
no model or API key is involved.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local resume file (.pdf, .doc, .docx, .txt) or HTTP/HTTPS URL.
    input: String,

    /// Write JSON to this file instead of stdout.
    #[arg(short, long, env = "RESUME2JSON_OUTPUT")]
    output: Option<PathBuf>,

    /// Existing draft JSON to merge the parse into.
    #[arg(long, env = "RESUME2JSON_MERGE")]
    merge: Option<PathBuf>,

    /// JSON file with heuristic thresholds.
    #[arg(long, env = "RESUME2JSON_HEURISTICS")]
    heuristics: Option<PathBuf>,

    /// Rewrite the summary and descriptions with stronger verbs and fixed spelling.
    #[arg(long, env = "RESUME2JSON_MODERNIZE")]
    modernize: bool,

    /// Print the per-section text instead of the draft.
    #[arg(long, conflicts_with = "full")]
    sections: bool,

    /// Print the full extraction output (draft, parse, sections, fallbacks, stats).
    #[arg(long, env = "RESUME2JSON_FULL")]
    full: bool,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "RESUME2JSON_PASSWORD")]
    password: Option<String>,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "RESUME2JSON_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Disable progress spinner.
    #[arg(long, env = "RESUME2JSON_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "RESUME2JSON_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "RESUME2JSON_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner provides all the feedback that matters to the user, so
    // INFO-level library logs are suppressed while it is active.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress && !cli.verbose {
        Some(CliProgressCallback::new() as Arc<dyn ExtractionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb).await?;

    let base = match cli.merge {
        Some(ref path) => Some(read_draft(path).await?),
        None => None,
    };

    // ── Run extraction ───────────────────────────────────────────────────
    let mut output = extract(&cli.input, &config)
        .await
        .context("Extraction failed")?;

    if let Some(base) = base {
        output.draft = base.with_applied(output.parsed.clone(), config.heuristics.max_skills);
    }
    if cli.modernize {
        modernize_draft(&mut output.draft);
    }

    let json = render_json(&cli, &output)?;

    if let Some(ref path) = cli.output {
        write_atomic(path, json.as_bytes())
            .await
            .context("Failed to write output")?;
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(json.as_bytes())
            .context("Failed to write to stdout")?;
        handle.write_all(b"\n").ok();
    }

    if !cli.quiet {
        print_summary(&output, cli.output.as_deref());
    }

    Ok(())
}

/// Map CLI args to `ExtractionConfig`.
async fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ExtractionConfig> {
    let mut builder = ExtractionConfig::builder().download_timeout_secs(cli.download_timeout);

    if let Some(ref path) = cli.heuristics {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read heuristics from {:?}", path))?;
        let params: HeuristicParams = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid heuristics JSON in {:?}", path))?;
        builder = builder.heuristics(params);
    }
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

async fn read_draft(path: &Path) -> Result<ResumeDraft> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read draft from {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid draft JSON in {:?}", path))
}

fn render_json(cli: &Cli, output: &ExtractionOutput) -> Result<String> {
    let json = if cli.sections {
        serde_json::to_string_pretty(&output.sections)
    } else if cli.full {
        serde_json::to_string_pretty(output)
    } else {
        serde_json::to_string_pretty(&output.draft)
    };
    json.context("Failed to serialise output")
}

fn print_summary(output: &ExtractionOutput, path: Option<&Path>) {
    let stats = &output.stats;
    let target = path
        .map(|p| format!("  →  {}", bold(&p.display().to_string())))
        .unwrap_or_default();
    eprintln!(
        "{}  {} jobs, {} schools, {} skills  {}ms{}",
        green("✔"),
        stats.experience_entries,
        stats.education_entries,
        stats.skills,
        stats.duration_ms,
        target,
    );
    for fallback in &output.fallbacks {
        eprintln!("   {} {}", yellow("•"), dim(&fallback.to_string()));
    }
}
