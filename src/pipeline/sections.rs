//! Section segmentation: bucket every line of a resume into a named section.
//!
//! The classifier is an ordered table of `(section, heading keywords)` pairs,
//! evaluated top to bottom with the first match winning. A heading line
//! switches the current section and is consumed; every other non-blank line
//! is appended, verbatim, to the section that is current when it is read.
//! Text before the first heading belongs to [`SectionKey::Header`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// The closed set of resume sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Header,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Achievements,
}

impl SectionKey {
    pub const ALL: [SectionKey; 7] = [
        SectionKey::Header,
        SectionKey::Summary,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Projects,
        SectionKey::Achievements,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Header => "header",
            SectionKey::Summary => "summary",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
            SectionKey::Projects => "projects",
            SectionKey::Achievements => "achievements",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heading keywords per section, in match order.
pub const SECTION_TABLE: &[(SectionKey, &[&str])] = &[
    (
        SectionKey::Experience,
        &[
            "experience",
            "work experience",
            "employment",
            "professional experience",
            "history",
        ],
    ),
    (SectionKey::Education, &["education", "academic background"]),
    (
        SectionKey::Skills,
        &["skills", "technical skills", "core competencies", "expertise"],
    ),
    (
        SectionKey::Projects,
        &["projects", "personal projects", "academic projects"],
    ),
    (
        SectionKey::Achievements,
        &["achievements", "awards", "certifications", "honors"],
    ),
    (
        SectionKey::Summary,
        &["summary", "profile", "objective", "about me"],
    ),
];

/// Accumulated raw text per section. Each line keeps a trailing `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMap {
    pub header: String,
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub projects: String,
    pub achievements: String,
}

impl SectionMap {
    pub fn get(&self, key: SectionKey) -> &str {
        match key {
            SectionKey::Header => &self.header,
            SectionKey::Summary => &self.summary,
            SectionKey::Experience => &self.experience,
            SectionKey::Education => &self.education,
            SectionKey::Skills => &self.skills,
            SectionKey::Projects => &self.projects,
            SectionKey::Achievements => &self.achievements,
        }
    }

    fn get_mut(&mut self, key: SectionKey) -> &mut String {
        match key {
            SectionKey::Header => &mut self.header,
            SectionKey::Summary => &mut self.summary,
            SectionKey::Experience => &mut self.experience,
            SectionKey::Education => &mut self.education,
            SectionKey::Skills => &mut self.skills,
            SectionKey::Projects => &mut self.projects,
            SectionKey::Achievements => &mut self.achievements,
        }
    }

    /// Whether the section holds anything but whitespace.
    pub fn has(&self, key: SectionKey) -> bool {
        !self.get(key).trim().is_empty()
    }
}

/// Result of segmenting one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub sections: SectionMap,
    /// Heading lines consumed.
    pub headings: usize,
    /// Non-blank lines read, headings included.
    pub lines: usize,
}

/// Trim, lowercase, then keep only ASCII letters and whitespace.
///
/// Stripping happens after the trim, so a line led by a bullet or a number
/// keeps its leading space and never equals a keyword.
fn normalise_heading(line: &str) -> String {
    line.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect()
}

fn keyword_matches(norm: &str, keyword: &str) -> bool {
    norm == keyword
        || norm.strip_prefix(keyword) == Some("s")
        || norm
            .strip_prefix(keyword)
            .is_some_and(|rest| rest.starts_with(' '))
}

/// Classify a line as a section heading, first table entry wins.
pub fn classify_heading(line: &str) -> Option<SectionKey> {
    let norm = normalise_heading(line);
    if norm.is_empty() {
        return None;
    }
    SECTION_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| keyword_matches(&norm, k)))
        .map(|(key, _)| *key)
}

/// Split reconstructed text into sections.
pub fn segment_sections(text: &str) -> Segmentation {
    let mut seg = Segmentation::default();
    let mut current = SectionKey::Header;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        seg.lines += 1;

        if let Some(key) = classify_heading(line) {
            debug!("Heading '{}' → {}", line.trim(), key);
            current = key;
            seg.headings += 1;
        } else {
            let buf = seg.sections.get_mut(current);
            buf.push_str(line);
            buf.push('\n');
        }
    }

    seg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_variants() {
        assert_eq!(classify_heading("EXPERIENCE"), Some(SectionKey::Experience));
        assert_eq!(classify_heading("Work Experience:"), Some(SectionKey::Experience));
        assert_eq!(classify_heading("Experiences"), Some(SectionKey::Experience));
        assert_eq!(classify_heading("Education & Training"), Some(SectionKey::Education));
        assert_eq!(classify_heading("Technical Skills"), Some(SectionKey::Skills));
        assert_eq!(classify_heading("About Me"), Some(SectionKey::Summary));
        assert_eq!(classify_heading("Awards"), Some(SectionKey::Achievements));
        assert_eq!(classify_heading("Acme Corp"), None);
        assert_eq!(classify_heading("2020 - 2022"), None);
    }

    #[test]
    fn prefix_requires_word_boundary() {
        assert_eq!(classify_heading("Experienced engineer"), None);
        assert_eq!(classify_heading("Skillset"), None);
    }

    #[test]
    fn bullets_led_by_a_keyword_are_not_headings() {
        assert_eq!(classify_heading("- Experience designing payment APIs"), None);
        assert_eq!(classify_heading("• Education outreach lead for interns"), None);
        assert_eq!(classify_heading("* Skills"), None);
        assert_eq!(classify_heading("  Experience  "), Some(SectionKey::Experience));
    }

    #[test]
    fn keyword_led_bullets_stay_in_their_section() {
        let text = "\
Experience
Acme Corp
Engineer | 2019 - 2021
- Experience designing payment APIs
- Education outreach lead for interns
- Shipped the billing service
";
        let seg = segment_sections(text);
        assert_eq!(seg.headings, 1);
        assert_eq!(seg.sections.experience.lines().count(), 5);
        assert!(seg.sections.education.is_empty());
    }

    #[test]
    fn table_order_decides_ambiguous_lines() {
        // "history" (experience) is checked before "education"
        assert_eq!(
            classify_heading("History of education"),
            Some(SectionKey::Experience)
        );
    }

    #[test]
    fn lines_before_first_heading_go_to_header() {
        let seg = segment_sections("Jane Doe\njane@example.com\n\nSummary\nBuilder of things.");
        assert_eq!(seg.sections.header, "Jane Doe\njane@example.com\n");
        assert_eq!(seg.sections.summary, "Builder of things.\n");
        assert_eq!(seg.headings, 1);
        assert_eq!(seg.lines, 4);
    }

    #[test]
    fn headings_are_consumed_and_lines_keep_original_text() {
        let text = "Experience\n  Acme Corp  \n• Shipped\nSkills\nRust, Go\nExperience\nBeta LLC\n";
        let seg = segment_sections(text);
        assert_eq!(seg.sections.experience, "  Acme Corp  \n• Shipped\nBeta LLC\n");
        assert_eq!(seg.sections.skills, "Rust, Go\n");
        assert!(!seg.sections.experience.contains("Experience"));
        assert_eq!(seg.headings, 3);
    }

    #[test]
    fn every_non_heading_line_lands_in_exactly_one_section() {
        let text = "Jane\nObjective\nGrow\nEducation\nState U\nB.S.\nProjects\nTool\nHonors\nDean's list\n";
        let seg = segment_sections(text);
        let mut all: Vec<&str> = SectionKey::ALL
            .iter()
            .flat_map(|k| seg.sections.get(*k).lines())
            .collect();
        all.sort_unstable();
        let mut expected = vec!["Jane", "Grow", "State U", "B.S.", "Tool", "Dean's list"];
        expected.sort_unstable();
        assert_eq!(all, expected);
    }

    #[test]
    fn has_ignores_whitespace() {
        let map = SectionMap {
            skills: "  \n".into(),
            ..Default::default()
        };
        assert!(!map.has(SectionKey::Skills));
    }
}
