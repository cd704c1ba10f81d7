//! package.json parsing utilities

use crate::extractors::facts::PackageFacts;
use crate::fs::FileSystem;
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

pub const PACKAGE_FILE: &str = "package.json";

#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    name: Option<String>,
    description: Option<String>,
    version: Option<String>,
}

pub fn inspect<F: FileSystem + ?Sized>(repo_path: &Path, fs: &F) -> Option<PackageFacts> {
    let content = fs.read_lossy(&repo_path.join(PACKAGE_FILE)).ok()?;
    Some(parse(&content))
}

/// A manifest that does not parse still marks the project as Node.js.
pub fn parse(content: &str) -> PackageFacts {
    let manifest = serde_json::from_str::<PackageManifest>(content).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unparseable package.json");
        PackageManifest::default()
    });

    PackageFacts {
        name: manifest.name,
        description: manifest.description,
        version: manifest.version,
        is_nodejs: true,
    }
}
