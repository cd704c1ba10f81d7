//! Shallow clone through the `git` executable

use super::{FetchError, RepoFetcher, RepoRef};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct GitFetcher {
    program: String,
}

impl GitFetcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn clone_command(&self, reference: &RepoRef, dest: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("clone")
            .arg("--depth")
            .arg("1")
            .arg(&reference.url)
            .arg(dest)
            .env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new("git")
    }
}

impl RepoFetcher for GitFetcher {
    fn fetch(&self, reference: &RepoRef, dest: &Path) -> Result<(), FetchError> {
        debug!(url = %reference.url, dest = %dest.display(), "Running shallow clone");

        let output = self
            .clone_command(reference, dest)
            .output()
            .map_err(|source| FetchError::GitUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(FetchError::CloneFailed {
                url: reference.url.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!(repo = %reference, "Repository cloned");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_clone_command_is_shallow() {
        let fetcher = GitFetcher::default();
        let reference = RepoRef::parse("https://github.com/acme/app.git").unwrap();
        let cmd = fetcher.clone_command(&reference, Path::new("/tmp/ws/app"));

        assert_eq!(cmd.get_program(), OsStr::new("git"));
        let args: Vec<&OsStr> = cmd.get_args().collect();
        assert_eq!(
            args,
            vec![
                OsStr::new("clone"),
                OsStr::new("--depth"),
                OsStr::new("1"),
                OsStr::new("https://github.com/acme/app.git"),
                OsStr::new("/tmp/ws/app"),
            ]
        );
    }

    #[test]
    fn test_missing_program_is_reported() {
        let fetcher = GitFetcher::new("svcgraft-no-such-git-binary");
        let reference = RepoRef::parse("https://github.com/acme/app").unwrap();
        let err = fetcher
            .fetch(&reference, Path::new("/tmp/svcgraft-never-created"))
            .unwrap_err();
        assert!(matches!(err, FetchError::GitUnavailable { .. }));
    }
}
