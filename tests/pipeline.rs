//! Integration tests for the text engine.
//!
//! Everything here runs through the public API only and needs no pdfium
//! library: PDF input is simulated with positioned fragments.
//!
//! Run with:
//!   cargo test --test pipeline

use edgequake_resume::pipeline::sections::{classify_heading, segment_sections};
use edgequake_resume::{
    extract_fragments, extract_text, ExtractionConfig, Fallback, ResumeDraft, SectionKey,
    TextFragment,
};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn config() -> ExtractionConfig {
    ExtractionConfig::default()
}

const CLEAR_HEADINGS: &str = "\
Jane Doe
jane.doe@example.com | (555) 010-2299

Summary
Backend engineer focused on payments.

Experience
Acme Corp, Springfield, IL
2020 - 2022
• Built the billing API
• Cut invoice latency in half

Globex, Shelbyville, IL
2018 - 2020
• Migrated batch jobs
• Ran the on-call rotation

Education
State University
B.Sc. Computer Science
2014 - 2018

Skills
Rust, Go, PostgreSQL
";

const KEYWORD_BULLETS: &str = "\
Jane Doe
Experience
Acme Corp
Engineer | 2019 - 2021
- Experience designing payment APIs
- Education outreach lead for interns
- Shipped the billing service
Globex
Data Analyst 2017
- Present weekly findings to leadership
Education
State University
2013 - expected 2017
";

fn assert_partition(text: &str) {
    let seg = segment_sections(text);
    let body: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty() && classify_heading(l).is_none())
        .collect();

    for line in &body {
        let owners = SectionKey::ALL
            .iter()
            .filter(|key| seg.sections.get(**key).lines().any(|l| l == *line))
            .count();
        assert_eq!(owners, 1, "line {line:?} owned by {owners} sections");
    }
    let total: usize = SectionKey::ALL
        .iter()
        .map(|key| seg.sections.get(*key).lines().count())
        .sum();
    assert_eq!(total, body.len());
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn clear_headings_yield_two_clean_entries() {
    let output = extract_text(CLEAR_HEADINGS, &config());
    let jobs = &output.draft.experience;

    assert_eq!(jobs.len(), 2, "jobs: {jobs:#?}");

    assert_eq!(jobs[0].company, "Acme Corp");
    assert_eq!(jobs[0].location, "Springfield, IL");
    assert_eq!(jobs[0].dates, "2020 - 2022");
    assert_eq!(
        jobs[0].description,
        "• Built the billing API\n• Cut invoice latency in half"
    );

    assert_eq!(jobs[1].company, "Globex");
    assert_eq!(jobs[1].location, "Shelbyville, IL");
    assert_eq!(jobs[1].dates, "2018 - 2020");

    for job in jobs {
        assert!(!job.company.contains(&job.dates));
        assert!(!job.company.contains(&job.location));
        assert!(!job.description.contains(&job.dates));
    }

    assert!(output.fallbacks.is_empty(), "{:?}", output.fallbacks);
}

#[test]
fn clear_headings_fill_the_rest_of_the_draft() {
    let draft = extract_text(CLEAR_HEADINGS, &config()).draft;

    assert_eq!(draft.personal.full_name, "Jane Doe");
    assert_eq!(draft.personal.email, "jane.doe@example.com");
    assert_eq!(draft.personal.phone, "(555) 010-2299");
    assert_eq!(draft.summary, "Backend engineer focused on payments.");
    assert_eq!(draft.skills, vec!["Rust", "Go", "PostgreSQL"]);

    assert_eq!(draft.education.len(), 1);
    assert_eq!(draft.education[0].school, "State University");
    assert_eq!(draft.education[0].degree, "B.Sc. Computer Science");
    assert_eq!(draft.education[0].dates, "2014 - 2018");
}

#[test]
fn no_headings_yield_one_review_entry() {
    let filler = "Worked on many different things over the years without a heading. ";
    let text = format!("Jane Doe\n{}", filler.repeat(40));
    let output = extract_text(&text, &config());

    let jobs = &output.draft.experience;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].company, "Parsed from Document");
    assert_eq!(jobs[0].position, "Raw Text Review");
    assert_eq!(jobs[0].dates, "Review Below");
    assert_eq!(jobs[0].description, &text[..1500]);
    assert!(output.fallbacks.contains(&Fallback::NoExperienceSection));
}

#[test]
fn skills_are_scanned_when_no_skills_heading() {
    let text = "\
Jane Doe

Experience
Acme Corp
Engineer | 2019 - Present
• Wrote Python services deployed on AWS
";
    let output = extract_text(text, &config());

    assert!(output.draft.skills.contains(&"Python".to_string()));
    assert!(output.draft.skills.contains(&"AWS".to_string()));
    assert!(output
        .fallbacks
        .iter()
        .any(|f| matches!(f, Fallback::SkillVocabularyScan { .. })));
}

#[test]
fn jobs_are_sorted_most_recent_first() {
    let text = "\
Experience
Initech
Analyst | 2015 - 2017
• Quarterly reports
Hooli
Engineer | 2020 - Present
• Search infrastructure
Globex
Developer | 2017 - 2020
• Internal tools
";
    let jobs = extract_text(text, &config()).draft.experience;
    let dates: Vec<&str> = jobs.iter().map(|j| j.dates.as_str()).collect();
    let companies: Vec<&str> = jobs.iter().map(|j| j.company.as_str()).collect();

    assert_eq!(dates, vec!["2020 - Present", "2017 - 2020", "2015 - 2017"]);
    assert_eq!(companies, vec!["Hooli", "Globex", "Initech"]);
    assert_eq!(jobs[0].position, "Engineer");
}

#[test]
fn pipeline_is_idempotent() {
    let cfg = config();
    let first = extract_text(CLEAR_HEADINGS, &cfg);
    let second = extract_text(CLEAR_HEADINGS, &cfg);

    assert_eq!(first.draft, second.draft);
    assert_eq!(first.parsed, second.parsed);
    assert_eq!(first.sections, second.sections);
    assert_eq!(first.fallbacks, second.fallbacks);
}

#[test]
fn pdf_fragments_are_laid_out_then_parsed() {
    // Δy: 1 (same line), 21 (paragraph), 8 (line), 8, 8
    let page = vec![
        TextFragment::new("Jane", 700.0),
        TextFragment::new("Doe", 701.0),
        TextFragment::new("Experience", 680.0),
        TextFragment::new("Acme Corp", 672.0),
        TextFragment::new("2019 - Present", 664.0),
        TextFragment::new("• Built the API", 656.0),
    ];
    let output = extract_fragments(&[page], &config());

    assert_eq!(output.stats.pages, 1);
    assert_eq!(output.draft.personal.full_name, "Jane Doe");
    assert_eq!(output.draft.experience.len(), 1);
    assert_eq!(output.draft.experience[0].company, "Acme Corp");
    assert_eq!(output.draft.experience[0].dates, "2019 - Present");
    assert_eq!(output.draft.experience[0].description, "• Built the API");
}

#[test]
fn parse_merges_into_an_edited_draft() {
    let mut draft = ResumeDraft::default();
    draft.personal.email = "typed@example.com".into();
    draft.personal.job_title = "Staff Engineer".into();
    draft.skills = vec!["Rust".into(), "Python".into()];

    let output = extract_text(
        "John Roe\n\nExperience\nAcme Corp\nEngineer | 2019 - Present\n• Shipped Docker images\n",
        &config(),
    );
    draft.apply(output.parsed, 20);

    assert_eq!(draft.personal.full_name, "John Roe");
    assert_eq!(draft.personal.email, "typed@example.com");
    assert_eq!(draft.personal.job_title, "Staff Engineer");
    assert_eq!(draft.skills, vec!["Rust", "Python", "Docker"]);
    assert_eq!(draft.experience[0].company, "Acme Corp");
}

#[test]
fn keyword_led_bullets_stay_in_the_job() {
    let output = extract_text(KEYWORD_BULLETS, &config());
    let jobs = &output.draft.experience;

    assert_eq!(jobs.len(), 2, "jobs: {jobs:#?}");
    assert_eq!(jobs[0].company, "Acme Corp");
    assert_eq!(
        jobs[0].description,
        "- Experience designing payment APIs\n\
         - Education outreach lead for interns\n\
         - Shipped the billing service"
    );
    assert_eq!(output.draft.education.len(), 1);
    assert_eq!(output.draft.education[0].school, "State University");
    assert_eq!(output.draft.education[0].dates, "2013 - expected 2017");
}

#[test]
fn open_ended_marker_on_next_line_is_not_a_range() {
    let jobs = extract_text(KEYWORD_BULLETS, &config()).draft.experience;

    assert_eq!(jobs[1].company, "Globex");
    assert_eq!(jobs[1].position, "Data Analyst");
    assert_eq!(jobs[1].dates, "2017");
    for job in &jobs {
        assert!(!job.dates.contains('\n'), "{:?}", job.dates);
        assert!(!job.description.contains(&job.dates), "{job:#?}");
    }
}

#[test]
fn review_entry_keeps_line_endings_and_spaces() {
    let text = "Jane Doe\r\nWorked\u{a0}on things for years.\r\n";
    let output = extract_text(text, &config());

    assert_eq!(output.draft.experience.len(), 1);
    assert_eq!(output.draft.experience[0].description, text);
}

// ── Properties ───────────────────────────────────────────────────────────────

#[test]
fn keyword_led_lines_are_partitioned_too() {
    assert_partition(KEYWORD_BULLETS);
    assert_partition(
        "Summary\nSkills-driven lead\n* Skills\n1. Education\nProjects\n- Projects shipped: 4\n",
    );
}

#[test]
fn sections_partition_non_heading_lines() {
    assert_partition(CLEAR_HEADINGS);
    let seg = segment_sections(CLEAR_HEADINGS);

    let body: Vec<&str> = CLEAR_HEADINGS
        .lines()
        .filter(|l| !l.trim().is_empty() && classify_heading(l).is_none())
        .collect();

    for line in &body {
        let owners = SectionKey::ALL
            .iter()
            .filter(|key| seg.sections.get(**key).lines().any(|l| l == *line))
            .count();
        assert_eq!(owners, 1, "line {line:?} owned by {owners} sections");
    }

    // Relative order is kept inside a section.
    let experience: Vec<&str> = seg.sections.experience.lines().collect();
    let expected: Vec<&str> = body
        .iter()
        .copied()
        .filter(|l| experience.contains(l))
        .collect();
    assert_eq!(experience, expected);
}

#[test]
fn every_field_respects_its_cap() {
    let long = "Very Long Company Name ".repeat(10);
    let text = format!(
        "Experience\n{long}\n{long}\n2019 - Present\n• {}\n",
        "detail ".repeat(50)
    );
    let jobs = extract_text(&text, &config()).draft.experience;

    assert_eq!(jobs.len(), 1);
    assert!(jobs[0].company.chars().count() <= 100);
    assert!(jobs[0].position.chars().count() <= 100);
    assert!(jobs[0].dates.chars().count() <= 50);
    assert!(jobs[0].location.chars().count() <= 50);
}
