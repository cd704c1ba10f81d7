//! Named extraction rules
//!
//! These are line/regex heuristics over loosely structured files, not
//! grammars. Each rule is a standalone static so it can be tested in
//! isolation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// `EXPOSE <port>` in a build file. Only the first port of a directive is taken.
pub static EXPOSE_PORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"EXPOSE\s+(\d+)").expect("valid regex"));

/// `ENV <NAME>` where NAME is upper-snake-case.
pub static ENV_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)ENV\s+([A-Z_][A-Z0-9_]*)(?:[\s=]|$)").expect("valid regex")
});

/// Top-level compose keys: identifiers indented by exactly two spaces.
pub static COMPOSE_SERVICE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^ {2}(\w+):").expect("valid regex"));

/// First `image:` value anywhere in the manifest.
pub static COMPOSE_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"image:\s+(.+)").expect("valid regex"));

/// Host port in a `- "<port>:..."` list entry.
pub static COMPOSE_HOST_PORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"- ["']?(\d+):"#).expect("valid regex"));

/// Opening of an `environment:` block.
pub static COMPOSE_ENV_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"environment:").expect("valid regex"));

/// Line starting a new two-space-indented key; ends an `environment:` block.
pub static COMPOSE_BLOCK_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n  [a-z]").expect("valid regex"));

/// `- NAME=...` or `- NAME:` entries inside an environment block.
pub static COMPOSE_ENV_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"- ([A-Z_][A-Z0-9_]*)[=:]").expect("valid regex"));

/// First level-1 markdown heading.
pub static DOC_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").expect("valid regex"));

/// First blank-line-delimited paragraph.
pub static DOC_PARAGRAPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\n\n(.+?)(?:\n\n|\z)").expect("valid regex"));

/// `#` or `##` heading titled "Environment Variables", any case.
pub static DOC_ENV_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)##?\s+Environment Variables").expect("valid regex"));

/// Next `#`/`##` heading; ends the environment section.
pub static DOC_SECTION_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n##?\s+").expect("valid regex"));

/// Backtick-quoted upper-snake-case token.
pub static DOC_ENV_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([A-Z_][A-Z0-9_]*)`").expect("valid regex"));

/// Collect capture group 1 of every match, in order, duplicates kept.
/// Rewrite CRLF line endings to LF. The rules below only match `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

pub fn capture_all(rule: &Regex, text: &str) -> Vec<String> {
    rule.captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Capture group 1 of the first match.
pub fn capture_first(rule: &Regex, text: &str) -> Option<String> {
    rule.captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// The text following the first `start` match, up to the next `end` match
/// (or end of input).
pub fn section_after<'a>(start: &Regex, end: &Regex, text: &'a str) -> Option<&'a str> {
    let rest = &text[start.find(text)?.end()..];
    let stop = end.find(rest).map_or(rest.len(), |m| m.start());
    Some(&rest[..stop])
}
