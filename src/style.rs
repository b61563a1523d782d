//! Phrasing rewriter: vocabulary upgrades and common misspelling fixes.
//!
//! Applied on request (`--modernize`) to the free-text parts of a draft. The
//! rules are plain word-bounded substitutions run in a fixed order; no rule's
//! output matches any rule's input, so rewriting twice changes nothing.

use crate::output::ResumeDraft;
use once_cell::sync::Lazy;
use regex::Regex;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn rule(pattern: &str, replacement: &'static str) -> Rule {
    Rule {
        pattern: Regex::new(pattern).unwrap(),
        replacement,
    }
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        // ── Vocabulary ──────────────────────────────────────────────────────
        rule(r"(?i)\bManaged\b", "Directed"),
        rule(r"(?i)\bLed\b", "Spearheaded"),
        rule(r"(?i)\bWorked with\b", "Collaborated extensively with"),
        rule(r"(?i)\bdid\b", "executed"),
        rule(r"(?i)\bmade\b", "engineered"),
        rule(r"(?i)\bhelped\b", "facilitated"),
        rule(r"(?i)\bgreat\b", "exceptional"),
        // ── Spelling ────────────────────────────────────────────────────────
        rule(r"(?i)\bteh\b", "the"),
        rule(r"(?i)\brecieve\b", "receive"),
        rule(r"(?i)\bacheive\b", "achieve"),
        rule(r"\bits'\B", "its"),
    ]
});

/// Apply every rule, in order.
pub fn modernize(text: &str) -> String {
    RULES.iter().fold(text.to_string(), |acc, rule| {
        rule.pattern.replace_all(&acc, rule.replacement).into_owned()
    })
}

/// Rewrite the summary and every experience description in place.
pub fn modernize_draft(draft: &mut ResumeDraft) {
    draft.summary = modernize(&draft.summary);
    for entry in &mut draft.experience {
        entry.description = modernize(&entry.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::ExperienceEntry;

    #[test]
    fn vocabulary_upgrades() {
        assert_eq!(
            modernize("Managed a team and worked with sales. Led the migration."),
            "Directed a team and Collaborated extensively with sales. Spearheaded the migration."
        );
        assert_eq!(modernize("helped make great tools"), "facilitated make exceptional tools");
    }

    #[test]
    fn words_are_bounded() {
        assert_eq!(modernize("Ledger and madeira"), "Ledger and madeira");
    }

    #[test]
    fn spelling_fixes() {
        assert_eq!(modernize("teh team did recieve"), "the team executed receive");
        assert_eq!(modernize("acheive its' goals"), "achieve its goals");
    }

    #[test]
    fn rewriting_is_idempotent() {
        let once = modernize("Managed, did, made and helped. Worked with teh best.");
        assert_eq!(modernize(&once), once);
    }

    #[test]
    fn draft_rewrites_summary_and_descriptions_only() {
        let mut draft = ResumeDraft {
            summary: "I did things".into(),
            experience: vec![ExperienceEntry {
                company: "Made Inc".into(),
                description: "• Made tools".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        modernize_draft(&mut draft);
        assert_eq!(draft.summary, "I executed things");
        assert_eq!(draft.experience[0].description, "• engineered tools");
        assert_eq!(draft.experience[0].company, "Made Inc");
    }
}
