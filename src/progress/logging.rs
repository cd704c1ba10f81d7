//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::FetchStarted { url } => {
                info!(url = %url, "Cloning repository");
            }
            ProgressEvent::Fetched { repo } => {
                info!(repo = %repo, "Repository cloned");
            }
            ProgressEvent::Analyzed {
                repo,
                build_file,
                compose_file,
                doc_file,
                needs_postgres,
                needs_redis,
            } => {
                info!(
                    repo = %repo,
                    build_file,
                    compose_file = ?compose_file,
                    doc_file = ?doc_file,
                    needs_postgres,
                    needs_redis,
                    "Analysis complete"
                );
            }
            ProgressEvent::DescriptorReady { fields } => {
                for (key, value) in fields {
                    debug!(field = %key, value = %value, "Descriptor field");
                }
            }
            ProgressEvent::StepStarted { index, total, label } => {
                info!(
                    step = %format!("{}/{}", index, total),
                    target_file = %label,
                    "Updating"
                );
            }
            ProgressEvent::StepCompleted {
                label,
                path,
                skipped,
            } => {
                if *skipped {
                    warn!(target_file = %label, path = %path.display(), "Step incomplete");
                } else {
                    info!(target_file = %label, path = %path.display(), "Step complete");
                }
            }
            ProgressEvent::ManualStep {
                index,
                total,
                instruction,
            } => {
                warn!(
                    step = %format!("{}/{}", index, total),
                    instruction = %instruction,
                    "Manual step required"
                );
            }
            ProgressEvent::Completed { name, display_name } => {
                info!(service = %name, display = %display_name, "Integration complete");
            }
            ProgressEvent::Cancelled => {
                warn!("Integration cancelled");
            }
            ProgressEvent::Failed { error } => {
                warn!(error = %error, "Run failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_logging_all_events() {
        let handler = LoggingHandler;

        let events = vec![
            ProgressEvent::FetchStarted {
                url: "https://github.com/acme/widget".to_string(),
            },
            ProgressEvent::Fetched {
                repo: "acme/widget".to_string(),
            },
            ProgressEvent::Analyzed {
                repo: "widget".to_string(),
                build_file: true,
                compose_file: None,
                doc_file: Some("README.md".to_string()),
                needs_postgres: false,
                needs_redis: false,
            },
            ProgressEvent::DescriptorReady {
                fields: vec![("name", "widget".to_string())],
            },
            ProgressEvent::StepStarted {
                index: 1,
                total: 7,
                label: "docker-compose.yml".to_string(),
            },
            ProgressEvent::StepCompleted {
                label: "docker-compose.yml".to_string(),
                path: PathBuf::from("docker-compose.yml"),
                skipped: true,
            },
            ProgressEvent::ManualStep {
                index: 7,
                total: 7,
                instruction: "Add Widget to README.md".to_string(),
            },
            ProgressEvent::Completed {
                name: "widget".to_string(),
                display_name: "Widget".to_string(),
            },
            ProgressEvent::Cancelled,
            ProgressEvent::Failed {
                error: "Test error".to_string(),
            },
        ];

        for event in events {
            handler.on_progress(&event);
        }
    }
}
