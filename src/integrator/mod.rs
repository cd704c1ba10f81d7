//! Registering a service in the deployment project's files
//!
//! Each `add_to_*` operation is an independent read-modify-write of one
//! target file. Anchored insertions are described as data in [`plans`];
//! the text they insert comes from [`fragments`].

pub mod anchor;
pub mod fragments;
pub mod plans;
mod targets;

pub use anchor::{Placement, Via};
pub use targets::{TargetKind, TargetLayout};

use crate::fs::FileSystem;
use crate::service::ServiceDescriptor;
use anchor::InsertionPlan;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Target files not found: {}", display_paths(.0))]
    MissingTargets(Vec<PathBuf>),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One fragment written (or not) during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub fragment: &'static str,
    pub via: Via,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub kind: TargetKind,
    pub path: PathBuf,
    pub insertions: Vec<Insertion>,
}

impl StepReport {
    pub fn skipped(&self) -> bool {
        self.insertions.iter().any(|i| i.via == Via::Skipped)
    }
}

pub struct Integrator {
    fs: Arc<dyn FileSystem>,
    layout: TargetLayout,
    domain: String,
}

impl Integrator {
    pub fn new(fs: Arc<dyn FileSystem>, project_root: &Path, domain: impl Into<String>) -> Self {
        let layout = TargetLayout::resolve(project_root, fs.as_ref());
        Self {
            fs,
            layout,
            domain: domain.into(),
        }
    }

    /// Fails if any target file is absent, before anything is written.
    pub fn preflight(&self) -> Result<(), IntegrationError> {
        let missing = self.layout.missing(self.fs.as_ref());
        if missing.is_empty() {
            debug!(root = %self.layout.root.display(), "All target files present");
            Ok(())
        } else {
            Err(IntegrationError::MissingTargets(missing))
        }
    }

    pub fn apply(
        &self,
        kind: TargetKind,
        descriptor: &ServiceDescriptor,
    ) -> Result<StepReport, IntegrationError> {
        match kind {
            TargetKind::Manifest => self.add_to_docker_compose(descriptor),
            TargetKind::EnvTemplate => self.add_to_env_example(descriptor),
            TargetKind::ReverseProxy => self.add_to_caddyfile(descriptor),
            TargetKind::Wizard => self.add_to_wizard(descriptor),
            TargetKind::Secrets => self.add_to_secrets(descriptor),
            TargetKind::Report => self.add_to_final_report(descriptor),
        }
    }

    /// Service stanza, then its named volume. The two insertions are
    /// separate read-modify-write passes over the same file.
    pub fn add_to_docker_compose(
        &self,
        d: &ServiceDescriptor,
    ) -> Result<StepReport, IntegrationError> {
        let service = self.splice(TargetKind::Manifest, &plans::compose_service(), |_| {
            fragments::compose_service(d)
        })?;
        let volume = self.splice(TargetKind::Manifest, &plans::compose_volume(), |_| {
            fragments::compose_volume(d)
        })?;

        Ok(self.report(
            TargetKind::Manifest,
            vec![
                Insertion {
                    fragment: "service",
                    via: service,
                },
                Insertion {
                    fragment: "volume",
                    via: volume,
                },
            ],
        ))
    }

    pub fn add_to_env_example(
        &self,
        d: &ServiceDescriptor,
    ) -> Result<StepReport, IntegrationError> {
        let via = self.append(TargetKind::EnvTemplate, &fragments::env_block(d, &self.domain))?;
        Ok(self.single(TargetKind::EnvTemplate, "environment block", via))
    }

    pub fn add_to_caddyfile(&self, d: &ServiceDescriptor) -> Result<StepReport, IntegrationError> {
        let via = self.append(TargetKind::ReverseProxy, &fragments::caddy_block(d))?;
        Ok(self.single(TargetKind::ReverseProxy, "site block", via))
    }

    pub fn add_to_wizard(&self, d: &ServiceDescriptor) -> Result<StepReport, IntegrationError> {
        let via = self.splice(TargetKind::Wizard, &plans::wizard_entry(), |_| {
            fragments::wizard_entry(d)
        })?;
        Ok(self.single(TargetKind::Wizard, "menu entry", via))
    }

    pub fn add_to_secrets(&self, d: &ServiceDescriptor) -> Result<StepReport, IntegrationError> {
        let via = self.splice(TargetKind::Secrets, &plans::secret_declaration(), |_| {
            fragments::secret_declaration(d)
        })?;
        Ok(self.single(TargetKind::Secrets, "secret declaration", via))
    }

    pub fn add_to_final_report(
        &self,
        d: &ServiceDescriptor,
    ) -> Result<StepReport, IntegrationError> {
        let via = self.splice(TargetKind::Report, &plans::report_section(), |placement| {
            fragments::report_section(d, placement)
        })?;
        Ok(self.single(TargetKind::Report, "report section", via))
    }

    fn splice<R>(
        &self,
        kind: TargetKind,
        plan: &InsertionPlan,
        render: R,
    ) -> Result<Via, IntegrationError>
    where
        R: Fn(Placement) -> String,
    {
        let path = self.layout.path(kind);
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| IntegrationError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let (updated, via) = plan.apply(&content, render);
        match updated {
            Some(updated) => {
                self.fs
                    .write_string(path, &updated)
                    .map_err(|source| IntegrationError::Write {
                        path: path.to_path_buf(),
                        source,
                    })?;
                info!(target_file = %kind, via = ?via, "Inserted fragment");
            }
            None => {
                warn!(
                    target_file = %kind,
                    path = %path.display(),
                    "No anchor found, fragment not inserted"
                );
            }
        }
        Ok(via)
    }

    fn append(&self, kind: TargetKind, text: &str) -> Result<Via, IntegrationError> {
        let path = self.layout.path(kind);
        self.fs
            .append_string(path, text)
            .map_err(|source| IntegrationError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        info!(target_file = %kind, "Appended fragment");
        Ok(Via::Appended)
    }

    fn single(&self, kind: TargetKind, fragment: &'static str, via: Via) -> StepReport {
        self.report(kind, vec![Insertion { fragment, via }])
    }

    fn report(&self, kind: TargetKind, insertions: Vec<Insertion>) -> StepReport {
        StepReport {
            kind,
            path: self.layout.relative(kind),
            insertions,
        }
    }
}
