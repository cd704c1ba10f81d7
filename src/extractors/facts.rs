//! Best-effort fact sheet produced by inspecting a repository
//!
//! Each inspector owns one section. A section is `None` when its source
//! artifact was absent, so "not found" and "found but empty" stay distinct.

use crate::fetch::RepoRef;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactSheet {
    pub repo_name: String,
    pub repo_owner: String,
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_file: Option<BuildFileFacts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compose: Option<ComposeFacts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<DocFacts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageFacts>,
}

/// Facts from the container build file at the repository root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildFileFacts {
    pub exposed_ports: Vec<String>,
    pub declared_env_vars: Vec<String>,
}

/// Facts from the first compose manifest found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposeFacts {
    pub compose_file: String,
    pub compose_services: Vec<String>,
    pub primary_image: Option<String>,
    pub compose_ports: Vec<String>,
    pub env_vars: Vec<String>,
    pub needs_postgres: bool,
    pub needs_redis: bool,
    pub needs_mysql: bool,
}

/// Facts from the README-like documentation file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocFacts {
    pub doc_file: String,
    pub title: String,
    pub description: String,
    pub mentions_docker: bool,
    pub documented_env_vars: Vec<String>,
}

/// Facts from a Node-style `package.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageFacts {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub is_nodejs: bool,
}

impl FactSheet {
    pub fn new(reference: &RepoRef) -> Self {
        Self {
            repo_name: reference.name.clone(),
            repo_owner: reference.owner.clone(),
            source_url: reference.url.clone(),
            build_file: None,
            compose: None,
            docs: None,
            package: None,
        }
    }

    pub fn has_build_file(&self) -> bool {
        self.build_file.is_some()
    }

    pub fn has_compose_file(&self) -> bool {
        self.compose.is_some()
    }

    /// True when either a build file or a compose manifest was found.
    pub fn has_build_signal(&self) -> bool {
        self.has_build_file() || self.has_compose_file()
    }

    pub fn exposed_ports(&self) -> &[String] {
        self.build_file
            .as_ref()
            .map_or(&[], |b| b.exposed_ports.as_slice())
    }

    pub fn compose_ports(&self) -> &[String] {
        self.compose
            .as_ref()
            .map_or(&[], |c| c.compose_ports.as_slice())
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.compose.as_ref()?.primary_image.as_deref()
    }

    pub fn needs_postgres(&self) -> bool {
        self.compose.as_ref().is_some_and(|c| c.needs_postgres)
    }

    pub fn needs_redis(&self) -> bool {
        self.compose.as_ref().is_some_and(|c| c.needs_redis)
    }

    pub fn needs_mysql(&self) -> bool {
        self.compose.as_ref().is_some_and(|c| c.needs_mysql)
    }

    /// Documentation title, falling back to the repository name.
    pub fn title(&self) -> &str {
        self.docs
            .as_ref()
            .map_or(self.repo_name.as_str(), |d| d.title.as_str())
    }

    /// Documentation description when non-empty, else the package description.
    pub fn description(&self) -> Option<&str> {
        self.docs
            .as_ref()
            .map(|d| d.description.as_str())
            .filter(|d| !d.is_empty())
            .or_else(|| {
                self.package
                    .as_ref()?
                    .description
                    .as_deref()
                    .filter(|d| !d.is_empty())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> FactSheet {
        FactSheet::new(&RepoRef::parse("https://github.com/acme/widget.git").unwrap())
    }

    #[test]
    fn test_empty_sheet() {
        let facts = sheet();
        assert_eq!(facts.repo_name, "widget");
        assert_eq!(facts.repo_owner, "acme");
        assert!(!facts.has_build_signal());
        assert!(facts.exposed_ports().is_empty());
        assert!(facts.compose_ports().is_empty());
        assert!(!facts.needs_postgres());
        assert_eq!(facts.title(), "widget");
        assert_eq!(facts.description(), None);
    }

    #[test]
    fn test_description_prefers_docs_over_package() {
        let mut facts = sheet();
        facts.package = Some(PackageFacts {
            description: Some("from package".to_string()),
            is_nodejs: true,
            ..Default::default()
        });
        assert_eq!(facts.description(), Some("from package"));

        facts.docs = Some(DocFacts {
            description: "from readme".to_string(),
            ..Default::default()
        });
        assert_eq!(facts.description(), Some("from readme"));
    }

    #[test]
    fn test_empty_doc_description_falls_through() {
        let mut facts = sheet();
        facts.docs = Some(DocFacts {
            title: "Widget".to_string(),
            ..Default::default()
        });
        assert_eq!(facts.description(), None);
        assert_eq!(facts.title(), "Widget");
    }

    #[test]
    fn test_serialization_omits_absent_sections() {
        let json = serde_json::to_value(sheet()).unwrap();
        assert!(json.get("compose").is_none());
        assert_eq!(json["repo_name"], "widget");
    }
}
