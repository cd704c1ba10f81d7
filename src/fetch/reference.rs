//! Repository reference parsing

use super::FetchError;
use serde::Serialize;
use std::fmt;

/// A parsed repository URL.
///
/// Accepts `https://host/owner/name(.git)` and `git@host:owner/name(.git)`
/// forms; owner and name are taken from the last two path segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRef {
    pub url: String,
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        let url = input.trim();
        let trimmed = url.trim_end_matches('/');

        let segments: Vec<&str> = trimmed
            .split(['/', ':'])
            .filter(|s| !s.is_empty())
            .collect();

        if segments.len() < 2 {
            return Err(FetchError::InvalidReference(input.to_string()));
        }

        let last = segments[segments.len() - 1];
        let owner = segments[segments.len() - 2];
        let name = strip_extension(last);

        if name.is_empty() || owner.is_empty() {
            return Err(FetchError::InvalidReference(input.to_string()));
        }

        Ok(Self {
            url: url.to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// Removes one trailing extension, keeping dotfiles intact (`repo.git` -> `repo`).
fn strip_extension(segment: &str) -> &str {
    match segment.rfind('.') {
        Some(idx) if idx > 0 => &segment[..idx],
        _ => segment,
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
