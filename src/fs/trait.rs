//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Abstraction over file system operations for testability
///
/// Reads serve the repository inspectors, writes serve the target-file
/// mutations. Paths are used as given; callers join them onto a root.
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Read raw file contents
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// Replace file contents
    fn write_string(&self, path: &Path, content: &str) -> Result<()>;

    /// Append to the end of an existing file
    fn append_string(&self, path: &Path, content: &str) -> Result<()>;

    /// Read a file as text, replacing invalid UTF-8 sequences.
    ///
    /// Fails only when the file cannot be read at all.
    fn read_lossy(&self, path: &Path) -> Result<String> {
        let bytes = self.read_bytes(path)?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(path = %path.display(), "File is not valid UTF-8, decoding lossily");
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }

    /// Return the first candidate (joined onto `base`) that is a regular file
    fn find_first(&self, base: &Path, candidates: &[&str]) -> Option<(String, PathBuf)> {
        candidates.iter().find_map(|name| {
            let path = base.join(name);
            self.is_file(&path).then(|| (name.to_string(), path))
        })
    }
}
