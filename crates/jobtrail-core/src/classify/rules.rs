//! The ordered rule data the classifier runs on.
//!
//! Rules are plain lists so each one can be tested on its own; the
//! classifier walks them top to bottom and the first rule whose capture
//! survives trimming wins.

use std::sync::LazyLock;

use regex::Regex;

/// Subject patterns for the job title, most specific first.
const TITLE_PATTERNS: &[&str] = &[
    r"(?i)(?:application for|applying for|position[:\s]+)([^-|,\n]+)",
    r"(?i)([^-|,\n]+)(?:\s*-\s*job|position|role|opening)",
    r"(?i)job[:\s]+([^-|,\n]+)",
    r"(?i)([a-zA-Z\s]+(?:engineer|developer|manager|analyst|specialist|coordinator|assistant|intern))",
    r"(?i)([a-zA-Z\s]+(?:software|frontend|backend|full.?stack|data|web|mobile))",
];

/// Subject patterns for the company name.
const COMPANY_SUBJECT_PATTERNS: &[&str] = &[
    r"(?i)from\s+([^-|,\n]+)",
    r"(?i)at\s+([^-|,\n]+)",
    r"([A-Z][a-zA-Z\s&]+(?:Inc|LLC|Corp|Ltd|Company|Technologies|Tech|Solutions|Systems))",
    r"@([a-zA-Z0-9.-]+\.[a-zA-Z]{2,})",
];

/// Snippet patterns for the company name, tried after the subject yields
/// nothing.
const COMPANY_SNIPPET_PATTERNS: &[&str] = &[
    r"(?:from|at|with)\s+([A-Z][a-zA-Z\s&]+(?:Inc|LLC|Corp|Ltd|Company|Technologies|Tech|Solutions|Systems))",
    r"([A-Z][a-zA-Z\s&]+(?:Inc|LLC|Corp|Ltd|Company|Technologies|Tech|Solutions|Systems))",
    r"(?i)dear\s+(?:candidate|applicant),?\s*(?:thank you for your interest in)\s+([^.\n]+)",
    r"(?i)([A-Z][a-zA-Z\s]+)\s+(?:team|hiring|recruiter|hr)",
];

/// Keywords that mark a rejection. Checked before everything else.
pub(super) const REJECTION_KEYWORDS: &[&str] = &[
    "rejected",
    "not selected",
    "unsuccessful",
    "regret to inform",
    "sorry to inform",
    "thank you for your interest",
];

/// Keywords that mark an offer or progression.
pub(super) const SELECTION_KEYWORDS: &[&str] = &[
    "congratulations",
    "pleased to inform",
    "offer",
    "selected",
    "move forward",
    "next round",
];

/// Keywords that mark interview/screening activity.
pub(super) const INTERVIEW_KEYWORDS: &[&str] =
    &["interview", "schedule", "meeting", "call", "assessment"];

/// Subject hints that make the delimiter-split title fallback worth trying.
pub(super) const TITLE_FALLBACK_HINTS: &[&str] = &["interview", "application", "position"];

/// Delimiters the title fallback splits the subject on.
pub(super) const TITLE_DELIMITERS: &[char] = &['-', '|', ','];

pub(super) static TITLE_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(TITLE_PATTERNS));

pub(super) static COMPANY_SUBJECT_RULES: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(COMPANY_SUBJECT_PATTERNS));

pub(super) static COMPANY_SNIPPET_RULES: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(COMPANY_SNIPPET_PATTERNS));

/// Pulls the domain out of a sender address.
pub(super) static EMAIL_DOMAIN_RULE: LazyLock<Regex> =
    LazyLock::new(|| compile_one(r"@([a-zA-Z0-9.-]+\.[a-zA-Z]{2,})"));

/// Hosting prefixes stripped before the domain label becomes a name.
pub(super) static DOMAIN_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| compile_one(r"(?i)^(?:www\.|mail\.)"));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| compile_one(p)).collect()
}

// Patterns are literals; a failure here is caught by test_all_rules_compile.
#[allow(clippy::expect_used)]
fn compile_one(pattern: &str) -> Regex {
    Regex::new(pattern).expect("invalid classifier rule pattern")
}
