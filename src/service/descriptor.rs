//! The confirmed service record handed to the integrator

use crate::extractors::FactSheet;
use serde::Serialize;

const FALLBACK_NAME: &str = "service";

/// Finalized, user-confirmed description of the service to register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    /// Lowercase `[a-z0-9-]` identifier; container, volume and profile name.
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub port: String,
    pub image: String,
    pub hostname: String,
    pub needs_postgres: bool,
    pub needs_redis: bool,
}

impl ServiceDescriptor {
    /// Prefix for shell/env variables: `my-app` becomes `MY_APP`.
    pub fn env_prefix(&self) -> String {
        self.name.to_uppercase().replace('-', "_")
    }

    pub fn hostname_var(&self) -> String {
        format!("{}_HOSTNAME", self.env_prefix())
    }

    pub fn secret_var(&self) -> String {
        format!("{}_APP_SECRET", self.env_prefix())
    }

    pub fn volume_name(&self) -> String {
        format!("{}_data", self.name)
    }
}

/// Lowercases and drops every character outside `[a-z0-9-]`.
///
/// Idempotent: normalizing an already-normalized name returns it unchanged.
pub fn normalize_service_name(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Prompt defaults derived from a fact sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub port: String,
    pub image: String,
}

impl Defaults {
    /// Port comes from the compose manifest only; build-file `EXPOSE` ports
    /// are never consulted here.
    pub fn from_facts(facts: &FactSheet, default_port: u16) -> Self {
        let squashed = facts.repo_name.to_lowercase().replace(['-', '_'], "");
        let name = match normalize_service_name(&squashed) {
            n if n.is_empty() => FALLBACK_NAME.to_string(),
            n => n,
        };

        Self {
            name,
            display_name: facts.title().to_string(),
            description: facts.description().unwrap_or_default().to_string(),
            port: facts
                .compose_ports()
                .first()
                .cloned()
                .unwrap_or_else(|| default_port.to_string()),
            image: facts.primary_image().map_or_else(
                || format!("{}/{}:latest", facts.repo_owner, facts.repo_name),
                str::to_string,
            ),
        }
    }
}
