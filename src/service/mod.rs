//! Turning a fact sheet into a confirmed [`ServiceDescriptor`]

mod descriptor;
mod prompt;

pub use descriptor::{normalize_service_name, Defaults, ServiceDescriptor};
pub use prompt::{AutoPrompter, DialoguerPrompter, PromptError, Prompter};

use crate::extractors::FactSheet;
use tracing::warn;

/// Asks for each descriptor field in turn, offering the computed default.
///
/// The answered name is normalized; if nothing survives normalization the
/// default name is used instead.
pub fn collect_descriptor(
    facts: &FactSheet,
    defaults: &Defaults,
    prompter: &dyn Prompter,
) -> Result<ServiceDescriptor, PromptError> {
    let raw_name = prompter.input("Service name", &defaults.name)?;
    let name = match normalize_service_name(&raw_name) {
        n if n.is_empty() => {
            warn!(input = %raw_name, fallback = %defaults.name, "Service name normalized to nothing");
            defaults.name.clone()
        }
        n => n,
    };

    let display_name = prompter.input("Display name", &defaults.display_name)?;
    let description = prompter.input("Description", &defaults.description)?;
    let port = prompter.input("Internal port", &defaults.port)?;
    let image = prompter.input("Docker image", &defaults.image)?;
    let hostname = prompter.input("Hostname subdomain", &name)?;

    Ok(ServiceDescriptor {
        name,
        display_name,
        description,
        port,
        image,
        hostname,
        needs_postgres: facts.needs_postgres(),
        needs_redis: facts.needs_redis(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::ComposeFacts;
    use crate::fetch::RepoRef;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    struct Scripted {
        answers: RefCell<VecDeque<&'static str>>,
        asked: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().copied().collect()),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl Prompter for Scripted {
        fn input(&self, prompt: &str, default: &str) -> Result<String, PromptError> {
            self.asked.borrow_mut().push(prompt.to_string());
            Ok(match self.answers.borrow_mut().pop_front() {
                Some("") | None => default.to_string(),
                Some(answer) => answer.to_string(),
            })
        }

        fn confirm(&self, _prompt: &str) -> Result<bool, PromptError> {
            Ok(true)
        }
    }

    fn facts() -> FactSheet {
        let mut facts = FactSheet::new(&RepoRef::parse("https://github.com/acme/widget").unwrap());
        facts.compose = Some(ComposeFacts {
            needs_postgres: true,
            ..Default::default()
        });
        facts
    }

    #[test]
    fn test_all_defaults() {
        let facts = facts();
        let defaults = Defaults::from_facts(&facts, 3000);
        let prompter = Scripted::new(&[]);

        let descriptor = collect_descriptor(&facts, &defaults, &prompter).unwrap();

        assert_eq!(descriptor.name, "widget");
        assert_eq!(descriptor.hostname, "widget");
        assert_eq!(descriptor.port, "3000");
        assert!(descriptor.needs_postgres);
        assert!(!descriptor.needs_redis);
        assert_eq!(
            *prompter.asked.borrow(),
            vec![
                "Service name",
                "Display name",
                "Description",
                "Internal port",
                "Docker image",
                "Hostname subdomain"
            ]
        );
    }

    #[test]
    fn test_answered_name_is_normalized_and_drives_hostname_default() {
        let facts = facts();
        let defaults = Defaults::from_facts(&facts, 3000);
        let prompter = Scripted::new(&["My Widget!", "", "", "8081"]);

        let descriptor = collect_descriptor(&facts, &defaults, &prompter).unwrap();

        assert_eq!(descriptor.name, "mywidget");
        assert_eq!(descriptor.hostname, "mywidget");
        assert_eq!(descriptor.port, "8081");
    }

    #[test]
    fn test_name_that_normalizes_to_nothing_uses_default() {
        let facts = facts();
        let defaults = Defaults::from_facts(&facts, 3000);
        let prompter = Scripted::new(&["!!!"]);

        let descriptor = collect_descriptor(&facts, &defaults, &prompter).unwrap();
        assert_eq!(descriptor.name, "widget");
    }
}
