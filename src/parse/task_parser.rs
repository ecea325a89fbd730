use chrono::NaiveDate;
use thiserror::Error;

/// Control byte used internally as an edit placeholder; source files
/// must not corrupt on encountering it, so it is normalized to a space
/// before tokenizing.
pub const PLACEHOLDER: char = '\u{10}';

/// Why a line was skipped. Skips are per-line and never abort a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("line is blank")]
    Blank,
    #[error("line has no body text")]
    EmptyBody,
}

/// The structural fields of one todo.txt line, before date enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLine {
    pub complete: bool,
    pub priority: Option<char>,
    pub created: Option<NaiveDate>,
    pub completed: Option<NaiveDate>,
    /// Body with attribute tokens retained; markers and leading dates
    /// stripped.
    pub body: String,
    pub projects: Vec<String>,
    pub contexts: Vec<String>,
    /// `key:value` extension pairs; first occurrence per key wins.
    pub extensions: Vec<(String, String)>,
}

impl ParsedLine {
    /// The value of an extension key, if present.
    pub fn extension(&self, key: &str) -> Option<&str> {
        self.extensions
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse one raw line into its structural fields.
///
/// Grammar, in order: optional `x ` completion marker, optional
/// completion date, optional `(A)`..`(Z)` priority, optional creation
/// date, body. For completed lines with two leading dates the first is
/// the completion date and the second the creation date.
pub fn parse(line: &str) -> Result<ParsedLine, SkipReason> {
    let line = line.replace(PLACEHOLDER, " ");
    let mut rest = line.trim();
    if rest.is_empty() {
        return Err(SkipReason::Blank);
    }

    let mut parsed = ParsedLine::default();

    if let Some(after) = rest.strip_prefix("x ") {
        parsed.complete = true;
        rest = after.trim_start();
        if let Some((date, after)) = take_date(rest) {
            parsed.completed = Some(date);
            rest = after;
        }
    }

    if let Some((priority, after)) = take_priority(rest) {
        parsed.priority = Some(priority);
        rest = after;
    }

    if let Some((date, after)) = take_date(rest) {
        if parsed.complete && parsed.completed.is_none() {
            parsed.completed = Some(date);
        } else {
            parsed.created = Some(date);
        }
        rest = after;
        // Completed lines carry "completion creation": a second date
        // right after the completion date is the creation date.
        if parsed.complete && parsed.created.is_none()
            && let Some((date, after)) = take_date(rest)
        {
            parsed.created = Some(date);
            rest = after;
        }
    }

    if rest.is_empty() {
        return Err(SkipReason::EmptyBody);
    }
    parsed.body = rest.to_string();

    for word in parsed.body.split_whitespace() {
        if let Some(tag) = word.strip_prefix('+') {
            if !tag.is_empty() && !parsed.projects.iter().any(|p| p == tag) {
                parsed.projects.push(tag.to_string());
            }
        } else if let Some(tag) = word.strip_prefix('@') {
            if !tag.is_empty() && !parsed.contexts.iter().any(|c| c == tag) {
                parsed.contexts.push(tag.to_string());
            }
        } else if let Some((key, value)) = word.split_once(':')
            && !key.is_empty()
            && !value.is_empty()
            && !parsed.extensions.iter().any(|(k, _)| k == key)
        {
            parsed
                .extensions
                .push((key.to_string(), value.to_string()));
        }
    }

    Ok(parsed)
}

/// Take a leading `YYYY-MM-DD` token, returning the date and the rest.
fn take_date(s: &str) -> Option<(NaiveDate, &str)> {
    let token = s.split_whitespace().next()?;
    if token.len() != 10 {
        return None;
    }
    let date = NaiveDate::parse_from_str(token, "%Y-%m-%d").ok()?;
    Some((date, s[token.len()..].trim_start()))
}

/// Take a leading `(A)`..`(Z)` priority marker.
fn take_priority(s: &str) -> Option<(char, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() >= 3
        && bytes[0] == b'('
        && bytes[1].is_ascii_uppercase()
        && bytes[2] == b')'
        && (bytes.len() == 3 || bytes[3] == b' ')
    {
        Some((bytes[1] as char, s[3..].trim_start()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parse_minimal_line() {
        let parsed = parse("Buy milk").unwrap();
        assert_eq!(parsed.body, "Buy milk");
        assert!(!parsed.complete);
        assert_eq!(parsed.priority, None);
        assert!(parsed.projects.is_empty());
    }

    #[test]
    fn parse_full_incomplete_line() {
        let parsed = parse("(A) 2024-12-20 Buy milk due:2025-01-01 +errands @home").unwrap();
        assert_eq!(parsed.priority, Some('A'));
        assert_eq!(parsed.created, Some(date("2024-12-20")));
        assert_eq!(parsed.body, "Buy milk due:2025-01-01 +errands @home");
        assert_eq!(parsed.projects, vec!["errands"]);
        assert_eq!(parsed.contexts, vec!["home"]);
        assert_eq!(parsed.extension("due"), Some("2025-01-01"));
    }

    #[test]
    fn parse_completed_line_with_both_dates() {
        let parsed = parse("x 2025-01-01 2024-12-20 Buy milk").unwrap();
        assert!(parsed.complete);
        assert_eq!(parsed.completed, Some(date("2025-01-01")));
        assert_eq!(parsed.created, Some(date("2024-12-20")));
        assert_eq!(parsed.body, "Buy milk");
    }

    #[test]
    fn parse_completed_line_with_single_date() {
        let parsed = parse("x 2025-01-01 Buy milk").unwrap();
        assert_eq!(parsed.completed, Some(date("2025-01-01")));
        assert_eq!(parsed.created, None);
    }

    #[test]
    fn x_without_space_is_body() {
        let parsed = parse("xylophone practice").unwrap();
        assert!(!parsed.complete);
        assert_eq!(parsed.body, "xylophone practice");
    }

    #[test]
    fn priority_must_lead_and_be_uppercase() {
        assert_eq!(parse("(a) lowercase").unwrap().priority, None);
        assert_eq!(parse("Buy (A) milk").unwrap().priority, None);
        assert_eq!(parse("(A)").map(|p| p.body), Err(SkipReason::EmptyBody));
        assert_eq!(parse("(AB) wide").unwrap().priority, None);
    }

    #[test]
    fn completed_line_keeps_priority_after_marker() {
        let parsed = parse("x (B) 2025-01-01 tidy desk").unwrap();
        assert!(parsed.complete);
        assert_eq!(parsed.priority, Some('B'));
        assert_eq!(parsed.completed, Some(date("2025-01-01")));
    }

    #[test]
    fn markers_must_start_the_word() {
        let parsed = parse("mail info@example.org about a+b +real @also").unwrap();
        assert_eq!(parsed.projects, vec!["real"]);
        assert_eq!(parsed.contexts, vec!["also"]);
    }

    #[test]
    fn tags_are_deduplicated_in_order() {
        let parsed = parse("ship it +rel @desk +rel +crate @desk").unwrap();
        assert_eq!(parsed.projects, vec!["rel", "crate"]);
        assert_eq!(parsed.contexts, vec!["desk"]);
    }

    #[test]
    fn first_extension_occurrence_wins() {
        let parsed = parse("review pm:20 pm:99 rec:1w h:1").unwrap();
        assert_eq!(parsed.extension("pm"), Some("20"));
        assert_eq!(parsed.extension("rec"), Some("1w"));
        assert_eq!(parsed.extension("h"), Some("1"));
    }

    #[test]
    fn empty_key_or_value_is_not_an_extension() {
        let parsed = parse("read ch:").unwrap();
        assert_eq!(parsed.extension("ch"), None);
        let parsed = parse("read :7").unwrap();
        assert!(parsed.extensions.is_empty());
    }

    #[test]
    fn placeholder_byte_becomes_space() {
        let parsed = parse("call\u{10}dentist").unwrap();
        assert_eq!(parsed.body, "call dentist");
    }

    #[test]
    fn blank_and_marker_only_lines_are_skipped() {
        assert_eq!(parse("   "), Err(SkipReason::Blank));
        assert_eq!(parse("x 2025-01-01"), Err(SkipReason::EmptyBody));
    }

    #[test]
    fn parse_is_deterministic() {
        let line = "(C) 2024-11-02 write report due:2025-02-01 +work @desk pm:40";
        assert_eq!(parse(line), parse(line));
    }
}
