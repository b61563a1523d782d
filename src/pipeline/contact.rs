//! Contact details found anywhere in the raw text.

use crate::pipeline::patterns::has_date_range;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9_-]+").unwrap());

// Permissive on purpose; candidates are filtered by digit count afterwards.
static RE_PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\d{1,4}?[-.\s]?\(?\d{1,3}?\)?[-.\s]?\d{1,4}[-.\s]?\d{1,4}[-.\s]?\d{1,9}")
        .unwrap()
});

static RE_LINKEDIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com/in/[A-Za-z0-9_%-]+").unwrap());

static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:https?://|www\.)[^\s,;|<>()]+").unwrap());

const MIN_PHONE_DIGITS: usize = 7;

/// Contact fields; `None` when not present in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

impl ContactInfo {
    pub fn found(&self) -> usize {
        [&self.email, &self.phone, &self.linkedin, &self.website]
            .iter()
            .filter(|f| f.is_some())
            .count()
    }
}

pub fn find_email(text: &str) -> Option<String> {
    RE_EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// First phone-like run on a single line with at least seven digits that is
/// not a date range.
pub fn find_phone(text: &str) -> Option<String> {
    text.lines()
        .flat_map(|line| RE_PHONE.find_iter(line))
        .map(|m| m.as_str().trim())
        .find(|candidate| {
            candidate.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
                && !has_date_range(candidate)
        })
        .map(str::to_string)
}

pub fn find_linkedin(text: &str) -> Option<String> {
    RE_LINKEDIN.find(text).map(|m| m.as_str().to_string())
}

/// First URL that is not a LinkedIn profile.
pub fn find_website(text: &str) -> Option<String> {
    RE_URL
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', '/']))
        .find(|url| !url.to_lowercase().contains("linkedin.com"))
        .map(str::to_string)
}

pub fn extract_contact(text: &str) -> ContactInfo {
    ContactInfo {
        email: find_email(text),
        phone: find_phone(text),
        linkedin: find_linkedin(text),
        website: find_website(text),
    }
}
