// Shared prompt fragments. Each collaborator that calls the LLM keeps its own
// prompts.rs alongside it; only cross-cutting pieces live here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for free-text HR assistance calls.
pub const HR_ASSISTANT_SYSTEM: &str = "You are an experienced technical recruiter. \
    Be factual and concise. Only describe what the resume text supports; \
    do not invent employers, dates, or skills.";

/// Truncates `text` to at most `max_chars` characters without splitting a UTF-8 sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Replaces each `{key}` placeholder in `template` with its value in one pass.
///
/// Substituted text is never rescanned, so a value that itself contains
/// `{other_key}` comes through verbatim. Unknown `{...}` spans are kept.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_chars("resume", 100), "resume");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("Zürich office", 3), "Zür");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let filled = fill_template(
            "JD: {jd}\nCV: {cv}",
            &[("jd", "see {cv}"), ("cv", "Rust {jd}")],
        );
        assert_eq!(filled, "JD: see {cv}\nCV: Rust {jd}");
    }

    #[test]
    fn test_fill_template_keeps_unknown_braces() {
        let filled = fill_template(r#"[{"text": "{name}"}] {"#, &[("name", "Go")]);
        assert_eq!(filled, r#"[{"text": "Go"}] {"#);
    }
}
