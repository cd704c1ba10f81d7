//! Dockerfile parsing utilities

use crate::extractors::facts::BuildFileFacts;
use crate::extractors::rules::{capture_all, normalize_newlines, ENV_DECLARATION, EXPOSE_PORT};
use crate::fs::FileSystem;
use std::path::Path;
use tracing::debug;

pub const BUILD_FILE: &str = "Dockerfile";

/// Parse EXPOSE and ENV directives from the Dockerfile at the repository root
pub fn inspect<F: FileSystem + ?Sized>(repo_path: &Path, fs: &F) -> Option<BuildFileFacts> {
    let content = fs.read_lossy(&repo_path.join(BUILD_FILE)).ok()?;
    Some(parse(&content))
}

pub fn parse(content: &str) -> BuildFileFacts {
    let content: &str = &normalize_newlines(content);
    let facts = BuildFileFacts {
        exposed_ports: capture_all(&EXPOSE_PORT, content),
        declared_env_vars: capture_all(&ENV_DECLARATION, content),
    };
    debug!(
        ports = ?facts.exposed_ports,
        env_vars = facts.declared_env_vars.len(),
        "Parsed Dockerfile"
    );
    facts
}
