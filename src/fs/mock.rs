//! In-memory FileSystem for tests

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

/// In-memory file tree. Every write is also recorded so tests can assert
/// which paths a run touched.
#[derive(Debug, Default)]
pub struct MockFileSystem {
    files: RwLock<BTreeMap<PathBuf, String>>,
    writes: RwLock<Vec<PathBuf>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        self.files
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(normalize(path.as_ref()), content.to_string());
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&normalize(path.as_ref()))
            .cloned()
    }

    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.writes
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn record_write(&self, path: PathBuf) {
        self.writes
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(path);
    }
}

/// Drops `.` components so `./Dockerfile` and `Dockerfile` address the same entry.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let path = normalize(path);
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files.contains_key(&path) || files.keys().any(|p| p.starts_with(&path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&normalize(path))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.contents(path)
            .ok_or_else(|| anyhow!("File not found: {}", path.display()))
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        self.read_to_string(path).map(String::into_bytes)
    }

    fn write_string(&self, path: &Path, content: &str) -> Result<()> {
        let path = normalize(path);
        self.record_write(path.clone());
        self.files
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path, content.to_string());
        Ok(())
    }

    fn append_string(&self, path: &Path, content: &str) -> Result<()> {
        let path = normalize(path);
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        let existing = files
            .get_mut(&path)
            .ok_or_else(|| anyhow!("File not found: {}", path.display()))?;
        existing.push_str(content);
        drop(files);
        self.record_write(path);
        Ok(())
    }
}
