//! README parsing utilities

use crate::extractors::facts::DocFacts;
use crate::extractors::rules::{
    capture_all, capture_first, normalize_newlines, section_after, DOC_ENV_SECTION,
    DOC_ENV_TOKEN, DOC_PARAGRAPH, DOC_SECTION_END, DOC_TITLE,
};
use crate::fs::FileSystem;
use std::path::Path;

pub const README_FILES: &[&str] = &["README.md", "readme.md", "README", "README.txt"];

const DESCRIPTION_LINES: usize = 3;
const DESCRIPTION_MAX_CHARS: usize = 200;

pub fn inspect<F: FileSystem + ?Sized>(
    repo_path: &Path,
    fs: &F,
    repo_name: &str,
) -> Option<DocFacts> {
    let (name, path) = fs.find_first(repo_path, README_FILES)?;
    let content = fs.read_lossy(&path).ok()?;
    Some(parse(&name, &content, repo_name))
}

pub fn parse(file_name: &str, content: &str, repo_name: &str) -> DocFacts {
    let content: &str = &normalize_newlines(content);
    let title = capture_first(&DOC_TITLE, content)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| repo_name.to_string());

    let documented_env_vars = section_after(&DOC_ENV_SECTION, &DOC_SECTION_END, content)
        .map(|section| capture_all(&DOC_ENV_TOKEN, section))
        .unwrap_or_default();

    DocFacts {
        doc_file: file_name.to_string(),
        title,
        description: description(content),
        mentions_docker: content.to_lowercase().contains("docker"),
        documented_env_vars,
    }
}

/// First paragraph after a blank line, first three lines joined by spaces,
/// cut to 200 characters.
fn description(content: &str) -> String {
    let paragraph = capture_first(&DOC_PARAGRAPH, content).unwrap_or_default();
    let joined = paragraph
        .trim()
        .lines()
        .take(DESCRIPTION_LINES)
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join(" ");
    joined.chars().take(DESCRIPTION_MAX_CHARS).collect()
}
