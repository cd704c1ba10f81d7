//! Runs every inspector over a fetched repository

use super::facts::FactSheet;
use super::parsers::{docker_compose, dockerfile, package_json, readme};
use crate::fetch::RepoRef;
use crate::fs::FileSystem;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Extractor {
    fs: Arc<dyn FileSystem>,
}

impl Extractor {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Builds the fact sheet for the repository checked out at `repo_path`.
    ///
    /// Inspectors write disjoint sections, so their order does not matter
    /// and none can overwrite another's findings.
    pub fn analyze(&self, reference: &RepoRef, repo_path: &Path) -> FactSheet {
        let fs = self.fs.as_ref();
        let mut facts = FactSheet::new(reference);

        facts.build_file = dockerfile::inspect(repo_path, fs);
        facts.compose = docker_compose::inspect(repo_path, fs);
        facts.docs = readme::inspect(repo_path, fs, &reference.name);
        facts.package = package_json::inspect(repo_path, fs);

        debug!(
            build_file = facts.has_build_file(),
            compose = facts.has_compose_file(),
            docs = facts.docs.is_some(),
            package = facts.package.is_some(),
            "Inspection complete"
        );
        info!(repo = %reference, "Repository analyzed");

        facts
    }
}
