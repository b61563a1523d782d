//! Field extraction: turn an entry block into a structured entry.

use crate::config::HeuristicParams;
use crate::output::{EducationEntry, ExperienceEntry};
use crate::pipeline::patterns::{
    find_dates, find_education_dates, is_bullet, strip_leading_bullet, trim_separators,
    truncate_chars, BULLET, RE_LOCATION,
};
use once_cell::sync::Lazy;
use regex::Regex;

const TITLE_CAP: usize = 100;
const DATES_CAP: usize = 50;
const LOCATION_CAP: usize = 50;

/// Sentence end: three letters, a period, then whitespace.
static RE_SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]{3}\.\s+").unwrap());

/// Pull a `City, ST` location out of `field`, leaving the rest trimmed.
fn take_location(field: &mut String) -> Option<String> {
    let caps = RE_LOCATION.captures(field.as_str())?;
    let whole = caps.get(0)?.range();
    let location = caps[1].to_string();
    field.replace_range(whole, "");
    *field = trim_separators(field);
    Some(location)
}

fn strip_dates(field: &str, dates: &str) -> String {
    if dates.is_empty() {
        return field.trim().to_string();
    }
    trim_separators(&field.replacen(dates, "", 1))
}

fn clean_title(field: &str, dates: &str) -> String {
    strip_leading_bullet(&strip_dates(field, dates))
        .trim()
        .to_string()
}

/// Split bullet-less prose into one bullet per sentence.
fn synthesize_bullets(text: &str) -> String {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in RE_SENTENCE_END.find_iter(text) {
        // the period sits right after the three ASCII letters
        let end = m.start() + 4;
        sentences.push(text[start..end].trim());
        start = m.end();
    }
    sentences.push(text[start..].trim());

    sentences
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(|s| format!("{BULLET}{s}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove every occurrence of `dates`, repeating until none is left since a
/// removal can join two halves into a new occurrence.
fn remove_all(text: &str, dates: &str) -> String {
    let mut out = text.to_string();
    while !dates.is_empty() && out.contains(dates) {
        out = out.replace(dates, "");
    }
    out
}

fn description(lines: &[String], dates: &str, params: &HeuristicParams) -> String {
    let joined = remove_all(&lines.join("\n"), dates);
    let kept: Vec<&str> = joined
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let text = kept.join("\n");

    let has_bullets = kept.iter().any(|l| is_bullet(l));
    if !has_bullets && text.chars().count() > params.synthesize_bullets_min_chars {
        synthesize_bullets(&text)
    } else {
        text
    }
}

/// Extract one job from its block. `ordinal` is 1-based and only used for the
/// placeholder company name.
pub fn extract_experience(
    block: &[String],
    ordinal: usize,
    params: &HeuristicParams,
) -> ExperienceEntry {
    let lines: Vec<String> = block
        .iter()
        .filter(|l| !l.trim().is_empty())
        .cloned()
        .collect();

    let desc_start = lines
        .iter()
        .take(params.bullet_scan_lines)
        .position(|l| is_bullet(l))
        .unwrap_or(2);

    let mut company = if desc_start > 0 {
        lines.first().cloned().unwrap_or_default()
    } else {
        format!("Experience {ordinal}")
    };
    let mut position = if desc_start > 1 {
        lines.get(1).cloned().unwrap_or_default()
    } else {
        String::new()
    };
    if desc_start > 2 {
        if let Some(third) = lines.get(2) {
            position.push(' ');
            position.push_str(third);
        }
    }

    let location = take_location(&mut company)
        .or_else(|| take_location(&mut position))
        .unwrap_or_default();

    let joined = lines.join("\n");
    let dates = find_dates(&joined).unwrap_or_default().to_string();

    let company = clean_title(&company, &dates);
    let position = clean_title(&position, &dates);
    let description = description(lines.get(desc_start..).unwrap_or_default(), &dates, params);

    let company = truncate_chars(&company, TITLE_CAP);
    ExperienceEntry {
        company: if company.is_empty() {
            "Experience".to_string()
        } else {
            company
        },
        position: truncate_chars(&position, TITLE_CAP),
        dates: truncate_chars(&dates, DATES_CAP),
        location: truncate_chars(&location, LOCATION_CAP),
        description,
    }
}

/// Extract one school from its block.
pub fn extract_education(block: &[String], ordinal: usize) -> EducationEntry {
    let lines: Vec<&str> = block
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut school = lines
        .first()
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Institution {ordinal}"));
    let mut degree = lines.get(1).map(|s| s.to_string()).unwrap_or_default();

    let location = take_location(&mut school)
        .or_else(|| take_location(&mut degree))
        .unwrap_or_default();

    let joined = lines.join("\n");
    let dates = find_education_dates(&joined).unwrap_or_default().to_string();

    EducationEntry {
        school: truncate_chars(&clean_title(&school, &dates), TITLE_CAP),
        degree: truncate_chars(&clean_title(&degree, &dates), TITLE_CAP),
        dates: truncate_chars(&dates, DATES_CAP),
        location: truncate_chars(&location, LOCATION_CAP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str) -> Vec<String> {
        text.lines().map(String::from).collect()
    }

    #[test]
    fn header_lines_and_bullets() {
        let entry = extract_experience(
            &block("Company Name, City, ST\nSoftware Engineer | 2020 - Present\n• Built APIs\n• Led migrations"),
            1,
            &HeuristicParams::default(),
        );
        assert_eq!(entry.company, "Company Name");
        assert_eq!(entry.location, "City, ST");
        assert_eq!(entry.position, "Software Engineer");
        assert_eq!(entry.dates, "2020 - Present");
        assert_eq!(entry.description, "• Built APIs\n• Led migrations");
    }

    #[test]
    fn third_header_line_joins_position() {
        let entry = extract_experience(
            &block("Acme\nEngineer\n2018 - 2020\n• Shipped"),
            1,
            &HeuristicParams::default(),
        );
        assert_eq!(entry.position, "Engineer");
        assert_eq!(entry.dates, "2018 - 2020");
        assert_eq!(entry.description, "• Shipped");
    }

    #[test]
    fn leading_bullet_gives_placeholder_company() {
        let entry = extract_experience(
            &block("• Did the thing\n• Did another"),
            3,
            &HeuristicParams::default(),
        );
        assert_eq!(entry.company, "Experience 3");
        assert_eq!(entry.position, "");
        assert_eq!(entry.description, "• Did the thing\n• Did another");
    }

    #[test]
    fn description_never_contains_dates() {
        let entry = extract_experience(
            &block("Acme\nEngineer\n2019 - 2021\nReturned in 2019 - 2021 for a second stint"),
            1,
            &HeuristicParams::default(),
        );
        assert_eq!(entry.dates, "2019 - 2021");
        assert!(!entry.description.contains("2019 - 2021"));
    }

    #[test]
    fn dates_never_span_two_lines() {
        let entry = extract_experience(
            &block("Acme\nEngineer\nGrew revenue\nShipped in 2018\n- 2019 roadmap"),
            1,
            &HeuristicParams::default(),
        );
        assert_eq!(entry.dates, "2018");
        assert!(!entry.dates.contains('\n'));
        assert!(!entry.description.contains(&entry.dates));
        assert!(entry.description.contains("2019 roadmap"));

        let entry = extract_experience(
            &block("Globex\nData Analyst 2019\n- Present weekly findings to leadership"),
            1,
            &HeuristicParams::default(),
        );
        assert_eq!(entry.position, "Data Analyst");
        assert_eq!(entry.dates, "2019");
    }

    #[test]
    fn removing_dates_repeats_until_gone() {
        let entry = extract_experience(
            &block("Acme, 2018\nIntern\nReleased v20201818 of the tool"),
            1,
            &HeuristicParams::default(),
        );
        assert_eq!(entry.dates, "2018");
        assert!(!entry.description.contains("2018"), "{}", entry.description);
    }

    #[test]
    fn bulletless_prose_is_split_into_sentences() {
        let entry = extract_experience(
            &block("Acme\nEngineer 2020 - 2022\nBuilt the platform. Mentored four engineers. Ran ops."),
            1,
            &HeuristicParams::default(),
        );
        assert_eq!(
            entry.description,
            "• Built the platform.\n• Mentored four engineers.\n• Ran ops."
        );
    }

    #[test]
    fn short_prose_is_left_alone() {
        let entry = extract_experience(
            &block("Acme\nEngineer\nWrote code."),
            1,
            &HeuristicParams::default(),
        );
        assert_eq!(entry.description, "Wrote code.");
    }

    #[test]
    fn date_only_company_falls_back_to_label() {
        let entry = extract_experience(
            &block("2016 - 2018\nConsultant"),
            1,
            &HeuristicParams::default(),
        );
        assert_eq!(entry.company, "Experience");
        assert_eq!(entry.position, "Consultant");
    }

    #[test]
    fn bare_year_is_used_when_no_range() {
        let entry = extract_experience(
            &block("Acme, 2018\nIntern"),
            1,
            &HeuristicParams::default(),
        );
        assert_eq!(entry.dates, "2018");
        assert_eq!(entry.company, "Acme");
    }

    #[test]
    fn fields_are_capped() {
        let long = "x".repeat(300);
        let entry = extract_experience(
            &block(&format!("{long}\n{long}")),
            1,
            &HeuristicParams::default(),
        );
        assert_eq!(entry.company.chars().count(), 100);
        assert_eq!(entry.position.chars().count(), 100);
    }

    #[test]
    fn education_fields() {
        let entry = extract_education(
            &block("State University, Austin, TX\nB.S. Computer Science\n2012 - 2016"),
            1,
        );
        assert_eq!(entry.school, "State University");
        assert_eq!(entry.location, "Austin, TX");
        assert_eq!(entry.degree, "B.S. Computer Science");
        assert_eq!(entry.dates, "2012 - 2016");
    }

    #[test]
    fn education_strips_dates_from_titles() {
        let entry = extract_education(&block("City College 2012\nA.A."), 1);
        assert_eq!(entry.school, "City College");
        assert_eq!(entry.dates, "2012");
    }

    #[test]
    fn education_range_with_words_before_end() {
        let entry = extract_education(
            &block("State University\nB.A. History\n2014 - expected 2018"),
            1,
        );
        assert_eq!(entry.dates, "2014 - expected 2018");
        assert_eq!(entry.degree, "B.A. History");
    }

    #[test]
    fn empty_education_block_gets_placeholder() {
        assert_eq!(extract_education(&[], 2).school, "Institution 2");
    }
}
