//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use svcgraft::fetch::{FetchError, RepoFetcher, RepoRef};
use tempfile::TempDir;

#[allow(dead_code)]
pub fn get_svcgraft_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.join("svcgraft")
}

/// Writes a fixed set of files as the "cloned" repository
#[allow(dead_code)]
pub struct FixtureFetcher {
    files: Vec<(&'static str, String)>,
}

#[allow(dead_code)]
impl FixtureFetcher {
    pub fn new(files: &[(&'static str, &str)]) -> Self {
        Self {
            files: files.iter().map(|(n, c)| (*n, c.to_string())).collect(),
        }
    }
}

impl RepoFetcher for FixtureFetcher {
    fn fetch(&self, _reference: &RepoRef, dest: &Path) -> Result<(), FetchError> {
        fs::create_dir_all(dest).map_err(FetchError::Workspace)?;
        for (name, content) in &self.files {
            let path = dest.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(FetchError::Workspace)?;
            }
            fs::write(path, content).map_err(FetchError::Workspace)?;
        }
        Ok(())
    }
}

#[allow(dead_code)]
pub fn fixture_project_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

/// Copies the fixture deployment project into a fresh temp dir
#[allow(dead_code)]
pub fn fixture_project() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    copy_tree(&fixture_project_dir(), dir.path());
    dir
}

fn copy_tree(from: &Path, to: &Path) {
    fs::create_dir_all(to).expect("Failed to create directory");
    for entry in fs::read_dir(from).expect("Failed to read fixture dir") {
        let entry = entry.expect("Failed to read entry");
        let target = to.join(entry.file_name());
        if entry.file_type().expect("Failed to stat entry").is_dir() {
            copy_tree(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).expect("Failed to copy fixture file");
        }
    }
}

/// Contents of every target file, for before/after comparison
#[allow(dead_code)]
pub fn snapshot(root: &Path) -> Vec<(String, String)> {
    [
        "docker-compose.yml",
        ".env.example",
        "config/caddy/Caddyfile",
        "scripts/install/04_wizard.sh",
        "scripts/install/03_generate_secrets.sh",
        "scripts/install/07_final_report.sh",
    ]
    .iter()
    .map(|rel| {
        let content = fs::read_to_string(root.join(rel)).expect("Failed to read target");
        (rel.to_string(), content)
    })
    .collect()
}
