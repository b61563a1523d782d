//! Output types: the structured resume record and extraction metadata.
//!
//! [`ParsedResume`] is what the engine infers from one document.
//! [`ResumeDraft`] is the record the editing layer owns; a parse is merged
//! into it with [`ResumeDraft::apply`], which is where the "leave untouched
//! when not found" rules live.

use crate::error::Fallback;
use crate::pipeline::sections::SectionMap;
use serde::{Deserialize, Serialize};

/// Contact block of a resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
}

/// One job. Every field is always present; missing values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub dates: String,
    pub location: String,
    pub description: String,
}

/// One school.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub dates: String,
    pub location: String,
}

/// The structured resume record handed to the editing and rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDraft {
    pub personal: PersonalInfo,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    /// Ordered, case-sensitive, de-duplicated.
    pub skills: Vec<String>,
}

/// How the parsed skills should be combined with a draft's existing skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "skills")]
pub enum SkillsUpdate {
    /// A skills section was found; its items replace the draft's skills.
    Replace(Vec<String>),
    /// Skills were found by vocabulary scan; union them with the draft's skills.
    Merge(Vec<String>),
}

impl SkillsUpdate {
    pub fn skills(&self) -> &[String] {
        match self {
            SkillsUpdate::Replace(s) | SkillsUpdate::Merge(s) => s,
        }
    }
}

/// Everything the engine inferred from one document.
///
/// `None` means "not found"; applying the parse leaves the corresponding draft
/// field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
    /// Never empty: the fallback review entry is used when nothing was segmented.
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: SkillsUpdate,
}

impl ResumeDraft {
    /// Merge a parse into this draft.
    ///
    /// * name and experience are always replaced
    /// * contact fields and the summary are replaced only when found
    /// * education is replaced only when at least one entry was found
    /// * skills are replaced or unioned per [`SkillsUpdate`], then capped at `max_skills`
    pub fn apply(&mut self, parsed: ParsedResume, max_skills: usize) {
        self.personal.full_name = parsed.full_name;
        if let Some(email) = parsed.email {
            self.personal.email = email;
        }
        if let Some(phone) = parsed.phone {
            self.personal.phone = phone;
        }
        if let Some(linkedin) = parsed.linkedin {
            self.personal.linkedin = linkedin;
        }
        if let Some(website) = parsed.website {
            self.personal.website = website;
        }
        if let Some(summary) = parsed.summary {
            self.summary = summary;
        }

        self.experience = parsed.experience;
        if !parsed.education.is_empty() {
            self.education = parsed.education;
        }

        match parsed.skills {
            SkillsUpdate::Replace(skills) => {
                self.skills = dedup_capped(skills, max_skills);
            }
            SkillsUpdate::Merge(found) if !found.is_empty() => {
                let mut merged = std::mem::take(&mut self.skills);
                merged.extend(found);
                self.skills = dedup_capped(merged, max_skills);
            }
            SkillsUpdate::Merge(_) => {}
        }
    }

    /// Return a copy of this draft with `parsed` applied.
    pub fn with_applied(&self, parsed: ParsedResume, max_skills: usize) -> Self {
        let mut draft = self.clone();
        draft.apply(parsed, max_skills);
        draft
    }
}

/// Remove duplicates (first occurrence wins) and keep at most `cap` items.
pub(crate) fn dedup_capped(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len().min(cap));
    for item in items {
        if out.len() == cap {
            break;
        }
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Counters describing one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages decoded (0 for text inputs).
    pub pages: usize,
    /// Non-blank lines in the reconstructed text.
    pub lines: usize,
    /// Heading lines consumed by the section segmenter.
    pub headings: usize,
    pub experience_entries: usize,
    pub education_entries: usize,
    pub skills: usize,
    pub duration_ms: u64,
}

/// The complete result of one extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    /// A fresh draft with the parse applied.
    pub draft: ResumeDraft,
    /// The raw parse, for merging into an existing draft.
    pub parsed: ParsedResume,
    /// Per-section text the parse was derived from.
    pub sections: SectionMap,
    /// Fallback rules that fired, in order.
    pub fallbacks: Vec<Fallback>,
    pub stats: ExtractionStats,
}
