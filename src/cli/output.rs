//! Output formatting for fact sheets
//!
//! JSON and YAML come straight from the `Serialize` impls; the human format is
//! a tree with one branch per inspected artifact.
//!
//! # Example
//!
//! ```ignore
//! use svcgraft::cli::output::{OutputFormat, OutputFormatter};
//!
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! let output = formatter.format(&facts)?;
//! println!("{}", output);
//! ```

use anyhow::{Context, Result};
use std::fmt::Write as _;

use crate::config::GraftConfig;
use crate::extractors::FactSheet;

const HEAVY_RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";
const BRANCH: &str = "\u{251C}\u{2500}";
const LAST: &str = "\u{2514}\u{2500}";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, facts: &FactSheet) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(facts).context("Failed to serialize fact sheet to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(facts).context("Failed to serialize fact sheet to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(facts)),
        }
    }

    /// Always plain text; used for `-v` runs.
    pub fn format_config(&self, config: &GraftConfig) -> String {
        config.to_string()
    }

    fn format_human(&self, facts: &FactSheet) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "\u{2713} Fact Sheet: {}/{}", facts.repo_owner, facts.repo_name);
        let _ = writeln!(out, "{}\n", HEAVY_RULE);
        let _ = writeln!(out, "Source:       {}", facts.source_url);
        let _ = writeln!(out, "Title:        {}", facts.title());
        if let Some(description) = facts.description().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "Description:  {}", description);
        }
        out.push('\n');

        out.push_str("Build File:\n");
        match &facts.build_file {
            Some(build) => {
                let _ = writeln!(out, "{} Exposed Ports: {}", BRANCH, list(&build.exposed_ports));
                let _ = writeln!(out, "{} Env Vars:      {}", LAST, list(&build.declared_env_vars));
            }
            None => {
                let _ = writeln!(out, "{} (not found)", LAST);
            }
        }
        out.push('\n');

        out.push_str("Compose:\n");
        match &facts.compose {
            Some(compose) => {
                let _ = writeln!(out, "{} File:      {}", BRANCH, compose.compose_file);
                let _ = writeln!(out, "{} Services:  {}", BRANCH, list(&compose.compose_services));
                let _ = writeln!(
                    out,
                    "{} Image:     {}",
                    BRANCH,
                    compose.primary_image.as_deref().unwrap_or("(none)")
                );
                let _ = writeln!(out, "{} Ports:     {}", BRANCH, list(&compose.compose_ports));
                let _ = writeln!(out, "{} Env Vars:  {}", BRANCH, list(&compose.env_vars));
                let _ = writeln!(out, "{} Depends:   {}", LAST, dependencies(facts));
            }
            None => {
                let _ = writeln!(out, "{} (not found)", LAST);
            }
        }
        out.push('\n');

        out.push_str("Documentation:\n");
        match &facts.docs {
            Some(docs) => {
                let _ = writeln!(out, "{} File:             {}", BRANCH, docs.doc_file);
                let _ = writeln!(out, "{} Mentions Docker:  {}", BRANCH, docs.mentions_docker);
                let _ = writeln!(
                    out,
                    "{} Env Vars:         {}",
                    LAST,
                    list(&docs.documented_env_vars)
                );
            }
            None => {
                let _ = writeln!(out, "{} (not found)", LAST);
            }
        }

        if let Some(package) = &facts.package {
            out.push_str("\nPackage:\n");
            let _ = writeln!(
                out,
                "{} Name:     {}",
                BRANCH,
                package.name.as_deref().unwrap_or("(none)")
            );
            let _ = writeln!(
                out,
                "{} Version:  {}",
                LAST,
                package.version.as_deref().unwrap_or("(none)")
            );
        }

        out
    }
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

fn dependencies(facts: &FactSheet) -> String {
    let deps: Vec<String> = [
        (facts.needs_postgres(), "postgres"),
        (facts.needs_redis(), "redis"),
        (facts.needs_mysql(), "mysql"),
    ]
    .iter()
    .filter(|(needed, _)| *needed)
    .map(|(_, name)| name.to_string())
    .collect();
    list(&deps)
}
