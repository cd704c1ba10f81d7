//! Docker Compose file parsing utilities

use crate::extractors::facts::ComposeFacts;
use crate::extractors::rules::{
    capture_all, capture_first, normalize_newlines, section_after, COMPOSE_BLOCK_END,
    COMPOSE_ENV_BLOCK, COMPOSE_ENV_ENTRY, COMPOSE_HOST_PORT, COMPOSE_IMAGE, COMPOSE_SERVICE_KEY,
};
use crate::fs::FileSystem;
use std::path::Path;
use tracing::debug;

/// Candidate manifest names, first match wins
pub const COMPOSE_FILES: &[&str] = &[
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
];

pub fn inspect<F: FileSystem + ?Sized>(repo_path: &Path, fs: &F) -> Option<ComposeFacts> {
    let (name, path) = fs.find_first(repo_path, COMPOSE_FILES)?;
    let content = fs.read_lossy(&path).ok()?;
    Some(parse(&name, &content))
}

/// Dependency flags look at the whole file, not at any one service block,
/// so a mention in a comment or an unrelated service still counts.
pub fn parse(file_name: &str, content: &str) -> ComposeFacts {
    let content: &str = &normalize_newlines(content);
    let lower = content.to_lowercase();

    let env_vars = section_after(&COMPOSE_ENV_BLOCK, &COMPOSE_BLOCK_END, content)
        .map(|block| capture_all(&COMPOSE_ENV_ENTRY, block))
        .unwrap_or_default();

    let facts = ComposeFacts {
        compose_file: file_name.to_string(),
        compose_services: capture_all(&COMPOSE_SERVICE_KEY, content),
        primary_image: capture_first(&COMPOSE_IMAGE, content).map(|s| s.trim().to_string()),
        compose_ports: capture_all(&COMPOSE_HOST_PORT, content),
        env_vars,
        needs_postgres: lower.contains("postgres"),
        needs_redis: lower.contains("redis"),
        needs_mysql: lower.contains("mysql") || lower.contains("mariadb"),
    };

    debug!(
        file = file_name,
        services = ?facts.compose_services,
        image = ?facts.primary_image,
        ports = ?facts.compose_ports,
        "Parsed compose manifest"
    );
    facts
}
