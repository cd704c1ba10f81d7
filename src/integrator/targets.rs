//! The deployment files a service is registered in

use crate::fs::FileSystem;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Manifest,
    EnvTemplate,
    ReverseProxy,
    Wizard,
    Secrets,
    Report,
}

impl TargetKind {
    /// Fixed mutation order
    pub const ALL: [TargetKind; 6] = [
        TargetKind::Manifest,
        TargetKind::EnvTemplate,
        TargetKind::ReverseProxy,
        TargetKind::Wizard,
        TargetKind::Secrets,
        TargetKind::Report,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TargetKind::Manifest => "docker-compose.yml",
            TargetKind::EnvTemplate => ".env.example",
            TargetKind::ReverseProxy => "Caddyfile",
            TargetKind::Wizard => "wizard (04_wizard.sh)",
            TargetKind::Secrets => "secrets (03_generate_secrets.sh)",
            TargetKind::Report => "final report (07_final_report.sh)",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const MANIFEST_PATH: &str = "docker-compose.yml";
pub const ENV_TEMPLATE_PATH: &str = ".env.example";
pub const REVERSE_PROXY_CANDIDATES: &[&str] = &["config/caddy/Caddyfile", "Caddyfile"];
pub const WIZARD_PATH: &str = "scripts/install/04_wizard.sh";
pub const SECRETS_PATH: &str = "scripts/install/03_generate_secrets.sh";
pub const REPORT_PATH: &str = "scripts/install/07_final_report.sh";

/// Absolute locations of every target under one project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLayout {
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub env_template: PathBuf,
    pub reverse_proxy: PathBuf,
    pub wizard: PathBuf,
    pub secrets: PathBuf,
    pub report: PathBuf,
}

impl TargetLayout {
    /// The reverse-proxy file is the first existing candidate, defaulting to
    /// the first one so a missing file is reported at its preferred path.
    pub fn resolve(root: &Path, fs: &dyn FileSystem) -> Self {
        let reverse_proxy = fs
            .find_first(root, REVERSE_PROXY_CANDIDATES)
            .map_or_else(|| root.join(REVERSE_PROXY_CANDIDATES[0]), |(_, p)| p);

        Self {
            root: root.to_path_buf(),
            manifest: root.join(MANIFEST_PATH),
            env_template: root.join(ENV_TEMPLATE_PATH),
            reverse_proxy,
            wizard: root.join(WIZARD_PATH),
            secrets: root.join(SECRETS_PATH),
            report: root.join(REPORT_PATH),
        }
    }

    pub fn path(&self, kind: TargetKind) -> &Path {
        match kind {
            TargetKind::Manifest => &self.manifest,
            TargetKind::EnvTemplate => &self.env_template,
            TargetKind::ReverseProxy => &self.reverse_proxy,
            TargetKind::Wizard => &self.wizard,
            TargetKind::Secrets => &self.secrets,
            TargetKind::Report => &self.report,
        }
    }

    /// Path relative to the project root, for display.
    pub fn relative(&self, kind: TargetKind) -> PathBuf {
        let path = self.path(kind);
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }

    pub fn missing(&self, fs: &dyn FileSystem) -> Vec<PathBuf> {
        TargetKind::ALL
            .iter()
            .map(|kind| self.path(*kind))
            .filter(|path| !fs.is_file(path))
            .map(Path::to_path_buf)
            .collect()
    }
}
