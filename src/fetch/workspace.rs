//! Scoped temporary workspace

use super::{FetchError, RepoFetcher, RepoRef};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// Owning handle on the ephemeral clone directory.
///
/// Dropping the workspace deletes the directory and everything fetched into it.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn acquire() -> Result<Self, FetchError> {
        let dir = tempfile::Builder::new()
            .prefix("svcgraft-")
            .tempdir()
            .map_err(FetchError::Workspace)?;
        debug!(path = %dir.path().display(), "Workspace created");
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Fetch `reference` into `<root>/<name>` and return that path.
    pub fn fetch(
        &self,
        fetcher: &dyn RepoFetcher,
        reference: &RepoRef,
    ) -> Result<PathBuf, FetchError> {
        let dest = self.root().join(&reference.name);
        fetcher.fetch(reference, &dest)?;
        Ok(dest)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        debug!(path = %self.dir.path().display(), "Removing workspace");
    }
}
