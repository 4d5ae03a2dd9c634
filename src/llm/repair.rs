//! Best-effort repair of malformed LLM JSON output.
//!
//! Truncated responses are common when the model runs out of output budget;
//! several repair strategies are tried in sequence before giving up with a
//! descriptive error. Partial data is never returned silently.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{RecapError, Result};

static TRAILING_COMMA_ARRAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\]").unwrap());
static TRAILING_COMMA_OBJECT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\}").unwrap());

/// Parse JSON from an LLM response, handling markdown code fences and
/// attempting repair of truncated output.
pub fn parse_llm_json(response_text: &str) -> Result<Value> {
    let text = strip_code_fences(response_text.trim()).trim();

    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(err) => {
            if let Some(repaired) = try_repair(text) {
                tracing::debug!("repaired malformed backend JSON");
                return Ok(repaired);
            }
            Err(RecapError::MalformedResponse(format!(
                "failed to parse summary JSON: {}. {}",
                err,
                error_context(text)
            )))
        }
    }
}

fn strip_code_fences(text: &str) -> &str {
    let mut text = text;
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text
}

fn unclosed_counts(text: &str) -> (usize, usize) {
    let open_braces = text.matches('{').count().saturating_sub(text.matches('}').count());
    let open_brackets = text.matches('[').count().saturating_sub(text.matches(']').count());
    (open_braces, open_brackets)
}

/// Describe what looks wrong with unparseable JSON.
fn error_context(text: &str) -> String {
    let (open_braces, open_brackets) = unclosed_counts(text);

    let mut issues = Vec::new();
    if open_braces > 0 {
        issues.push(format!("{} unclosed braces", open_braces));
    }
    if open_brackets > 0 {
        issues.push(format!("{} unclosed brackets", open_brackets));
    }
    if ends_inside_string(text) {
        issues.push("unterminated string (response likely cut off mid-text)".to_string());
    }

    if issues.is_empty() {
        "The response may be malformed.".to_string()
    } else {
        format!("Issues detected: {}.", issues.join(", "))
    }
}

fn try_repair(text: &str) -> Option<Value> {
    // Strategy 1: close an unterminated string first, then balance the
    // remaining structures.
    let repaired = fix_unterminated_string(text);
    let (open_braces, open_brackets) = unclosed_counts(&repaired);

    if open_braces > 0 || open_brackets > 0 {
        let closers = format!("{}{}", "]".repeat(open_brackets), "}".repeat(open_braces));

        let mut attempts = vec![format!("{}{}", repaired, closers)];
        if let Some(pos) = repaired.rfind(',') {
            attempts.push(format!("{}{}", &repaired[..pos], closers));
        }
        if let Some(pos) = repaired.rfind("\",") {
            let bracket = if open_brackets > 0 { "\"]" } else { "\"" };
            attempts.push(format!(
                "{}{}{}",
                &repaired[..pos],
                bracket,
                "}".repeat(open_braces)
            ));
        }
        attempts.push(format!(
            "{}{}",
            trim_to_last_complete_item(&repaired),
            closers
        ));

        for attempt in attempts {
            let cleaned = TRAILING_COMMA_ARRAY_RE.replace_all(&attempt, "]");
            let cleaned = TRAILING_COMMA_OBJECT_RE.replace_all(&cleaned, "}");
            if let Ok(value) = serde_json::from_str(&cleaned) {
                return Some(value);
            }
        }
    }

    // Strategy 2: find a balanced top-level object substring.
    let start = text.find('{')?;
    let mut depth = 0i64;
    for (offset, ch) in text[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let candidate = &text[start..start + offset + 1];
                    return serde_json::from_str(candidate).ok();
                }
            }
            _ => {}
        }
    }

    None
}

/// Whether a naive quote scan ends inside a string literal.
fn ends_inside_string(text: &str) -> bool {
    let mut in_string = false;
    let mut escape_next = false;

    for ch in text.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ => {}
        }
    }

    in_string
}

/// Close a string the response was cut off in the middle of.
fn fix_unterminated_string(text: &str) -> String {
    if !ends_inside_string(text) {
        return text.to_string();
    }

    let mut result = text;
    // Drop an incomplete trailing escape sequence.
    if let Some(stripped) = result.strip_suffix('\\') {
        result = stripped;
    }

    let mut result = result.trim_end().to_string();
    if result.ends_with(',') {
        result.pop();
    }
    result.push('"');
    result
}

/// Trim to the last complete array item or object property.
fn trim_to_last_complete_item(text: &str) -> &str {
    const TERMINATORS: &[&str] = &["\"},", "\"],", "\"},\n", "\"],\n"];

    let mut best_pos = None;
    for term in TERMINATORS {
        if let Some(pos) = text.rfind(term) {
            let end = pos + term.len();
            if best_pos.map_or(true, |prev| end > prev) {
                best_pos = Some(end);
            }
        }
    }

    match best_pos {
        Some(end) => text[..end].trim_end_matches(',').trim_end(),
        None => text,
    }
}
