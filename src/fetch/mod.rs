//! Repository retrieval into a throwaway workspace
//!
//! A [`Workspace`] owns a temporary directory for the lifetime of one run;
//! the directory is removed when the value is dropped, on every exit path.
//! [`RepoFetcher`] implementations populate it from a [`RepoRef`].

mod git;
mod reference;
mod workspace;

pub use git::GitFetcher;
pub use reference::RepoRef;
pub use workspace::Workspace;

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid repository reference '{0}': expected <host>/<owner>/<name>")]
    InvalidReference(String),

    #[error("Failed to run '{program}': {source}")]
    GitUnavailable {
        program: String,
        source: std::io::Error,
    },

    #[error("Clone of {url} failed ({status}): {stderr}")]
    CloneFailed {
        url: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to prepare workspace: {0}")]
    Workspace(#[source] std::io::Error),
}

/// Retrieves a single-revision copy of a repository into `dest`.
///
/// `dest` does not exist yet; its parent is the workspace root.
pub trait RepoFetcher {
    fn fetch(&self, reference: &RepoRef, dest: &Path) -> Result<(), FetchError>;
}
