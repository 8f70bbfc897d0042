//! Contact details pulled from resume text with regular expressions.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+").expect("valid email regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\-\s]{6,}\d").expect("valid phone regex"));

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactInfo {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

/// Extracts emails and phone numbers (deduplicated, first appearance first) and
/// derives a display name from the file stem.
pub fn parse_basic_info(text: &str, filename: &str) -> ContactInfo {
    let emails = distinct_matches(&EMAIL_RE, text);
    let phones = distinct_matches(&PHONE_RE, text);
    ContactInfo {
        name: name_from_filename(filename),
        email: emails.first().cloned(),
        phone: phones.first().cloned(),
        emails,
        phones,
    }
}

pub fn name_from_filename(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
        .to_string()
}

fn distinct_matches(re: &Regex, text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    re.find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
