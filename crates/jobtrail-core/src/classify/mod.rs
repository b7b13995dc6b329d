//! Email classifier: ordered regex heuristics guessing a job title,
//! company name and application status from an email's subject, snippet
//! and sender.
//!
//! The functions here are pure and total: any input yields a non-empty
//! title and company and a definite [`JobStatus`]. There is no scoring —
//! the first rule that produces a usable capture wins.

mod rules;

use regex::Regex;

use crate::job::JobStatus;

/// Placeholder title when nothing in the subject looks like one.
const DEFAULT_TITLE: &str = "Job Application";

/// Placeholder company when subject, snippet and sender all yield nothing.
const DEFAULT_COMPANY: &str = "Company";

/// The title fallback truncates the subject head to this many characters.
const MAX_TITLE_LEN: usize = 50;

/// What the classifier extracted from one email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Guessed job title.
    pub title: String,
    /// Guessed company name.
    pub company: String,
    /// Guessed application status.
    pub status: JobStatus,
}

/// Classifies an email into a title, company and status.
#[must_use]
pub fn classify(subject: &str, snippet: &str, sender: &str) -> Classification {
    Classification {
        title: extract_title(subject),
        company: extract_company(subject, snippet, sender),
        status: extract_status(subject, snippet),
    }
}

/// Guesses the job title from the subject.
///
/// Walks the title rules in order; when none capture anything and the
/// subject still smells job-related, falls back to the text before the
/// first delimiter, capped at 50 characters. Never returns an empty
/// string.
#[must_use]
pub fn extract_title(subject: &str) -> String {
    if let Some(title) = first_capture(&rules::TITLE_RULES, subject) {
        return title;
    }

    let lower = subject.to_lowercase();
    if rules::TITLE_FALLBACK_HINTS.iter().any(|k| lower.contains(k)) {
        let head: String = subject
            .split(rules::TITLE_DELIMITERS)
            .next()
            .unwrap_or("")
            .trim()
            .chars()
            .take(MAX_TITLE_LEN)
            .collect();
        let head = head.trim();
        if !head.is_empty() {
            return head.to_string();
        }
    }

    DEFAULT_TITLE.to_string()
}

/// Guesses the company name.
///
/// Subject rules first, then snippet rules, then the sender's email
/// domain (with `www.`/`mail.` stripped and the first label capitalized).
/// Never returns an empty string.
#[must_use]
pub fn extract_company(subject: &str, snippet: &str, sender: &str) -> String {
    if let Some(company) = first_capture(&rules::COMPANY_SUBJECT_RULES, subject) {
        return company;
    }
    if let Some(company) = first_capture(&rules::COMPANY_SNIPPET_RULES, snippet) {
        return company;
    }
    if let Some(company) = company_from_sender_domain(sender) {
        return company;
    }

    DEFAULT_COMPANY.to_string()
}

/// Guesses the application status from keyword hits.
///
/// Priority is fixed: rejection beats selection beats interview
/// activity. Matching is case-insensitive substring search across both
/// subject and snippet.
#[must_use]
pub fn extract_status(subject: &str, snippet: &str) -> JobStatus {
    let subject = subject.to_lowercase();
    let snippet = snippet.to_lowercase();
    let hit = |keyword: &&str| subject.contains(*keyword) || snippet.contains(*keyword);

    if rules::REJECTION_KEYWORDS.iter().any(hit) {
        return JobStatus::Rejected;
    }
    if rules::SELECTION_KEYWORDS.iter().any(hit) {
        return JobStatus::Selected;
    }
    if rules::INTERVIEW_KEYWORDS.iter().any(hit) {
        return JobStatus::Applied;
    }

    JobStatus::NotSeen
}

/// First rule whose group-1 capture is non-empty after trimming.
fn first_capture(rule_list: &[Regex], text: &str) -> Option<String> {
    rule_list.iter().find_map(|rule| {
        rule.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    })
}

/// Derives a company name from the sender's email domain.
fn company_from_sender_domain(sender: &str) -> Option<String> {
    let caps = rules::EMAIL_DOMAIN_RULE.captures(sender)?;
    let domain = caps.get(1)?.as_str();
    let domain = rules::DOMAIN_PREFIX.replace(domain, "");

    let label = domain.split('.').next().unwrap_or("");
    let mut chars = label.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
