use super::state::{RunState, StateTracker};
use super::PipelineError;
use crate::config::GraftConfig;
use crate::extractors::{Extractor, FactSheet};
use crate::fetch::{RepoFetcher, RepoRef, Workspace};
use crate::fs::FileSystem;
use crate::integrator::{Integrator, StepReport, TargetKind};
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::service::{collect_descriptor, Defaults, Prompter, ServiceDescriptor};
use std::sync::Arc;
use tracing::{debug, info};

const CONFIRM_PROMPT: &str = "Proceed with integration?";

/// How a run that did not fail ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed {
        descriptor: ServiceDescriptor,
        steps: Vec<StepReport>,
    },
    Cancelled,
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Completed { .. } => 0,
            RunOutcome::Cancelled => 1,
        }
    }
}

/// Threads a repository through fetch, analysis, confirmation and the
/// target-file mutations.
pub struct Orchestrator {
    fetcher: Box<dyn RepoFetcher>,
    fs: Arc<dyn FileSystem>,
    prompter: Box<dyn Prompter>,
    handler: Arc<dyn ProgressHandler>,
    config: GraftConfig,
}

impl Orchestrator {
    pub fn new(
        fetcher: Box<dyn RepoFetcher>,
        fs: Arc<dyn FileSystem>,
        prompter: Box<dyn Prompter>,
        handler: Arc<dyn ProgressHandler>,
        config: GraftConfig,
    ) -> Self {
        Self {
            fetcher,
            fs,
            prompter,
            handler,
            config,
        }
    }

    /// Fetch and analyze only; no target file is touched.
    pub fn inspect(&self, url: &str) -> Result<FactSheet, PipelineError> {
        let mut state = StateTracker::new();
        let result = self.fetch_and_analyze(url, &mut state);
        if let Err(err) = &result {
            self.abort(&mut state, err);
        }
        result
    }

    pub fn run(&self, url: &str) -> Result<RunOutcome, PipelineError> {
        let mut state = StateTracker::new();
        let result = self.run_tracked(url, &mut state);
        if let Err(err) = &result {
            self.abort(&mut state, err);
        }
        debug!(states = ?state.history(), "Run finished");
        result
    }

    fn abort(&self, state: &mut StateTracker, err: &PipelineError) {
        state.advance(RunState::Aborted);
        self.handler.on_progress(&ProgressEvent::Failed {
            error: err.to_string(),
        });
    }

    fn run_tracked(
        &self,
        url: &str,
        state: &mut StateTracker,
    ) -> Result<RunOutcome, PipelineError> {
        let facts = self.fetch_and_analyze(url, state)?;

        if !facts.has_build_signal() {
            return Err(PipelineError::NoBuildSignal);
        }

        let integrator = Integrator::new(
            self.fs.clone(),
            &self.config.project_root,
            self.config.domain.clone(),
        );
        integrator.preflight()?;

        let defaults = Defaults::from_facts(&facts, self.config.port_fallback());
        let descriptor = collect_descriptor(&facts, &defaults, self.prompter.as_ref())?;
        self.handler.on_progress(&ProgressEvent::DescriptorReady {
            fields: summary_fields(&descriptor),
        });

        if !self.prompter.confirm(CONFIRM_PROMPT)? {
            state.advance(RunState::Cancelled);
            info!(service = %descriptor.name, "Integration declined");
            self.handler.on_progress(&ProgressEvent::Cancelled);
            return Ok(RunOutcome::Cancelled);
        }
        state.advance(RunState::Confirmed);

        let total = TargetKind::ALL.len() + 1;
        let mut steps = Vec::with_capacity(TargetKind::ALL.len());
        for (i, kind) in TargetKind::ALL.iter().copied().enumerate() {
            state.advance(RunState::Mutating(kind));
            self.handler.on_progress(&ProgressEvent::StepStarted {
                index: i + 1,
                total,
                label: kind.label().to_string(),
            });

            let report = integrator.apply(kind, &descriptor)?;
            self.handler.on_progress(&ProgressEvent::StepCompleted {
                label: kind.label().to_string(),
                path: report.path.clone(),
                skipped: report.skipped(),
            });
            steps.push(report);
        }

        self.handler.on_progress(&ProgressEvent::ManualStep {
            index: total,
            total,
            instruction: format!("Add {} to README.md", descriptor.display_name),
        });

        state.advance(RunState::Done);
        self.handler.on_progress(&ProgressEvent::Completed {
            name: descriptor.name.clone(),
            display_name: descriptor.display_name.clone(),
        });

        Ok(RunOutcome::Completed { descriptor, steps })
    }

    /// The workspace lives only for this call and is removed on every path.
    fn fetch_and_analyze(
        &self,
        url: &str,
        state: &mut StateTracker,
    ) -> Result<FactSheet, PipelineError> {
        let reference = RepoRef::parse(url)?;

        self.handler.on_progress(&ProgressEvent::FetchStarted {
            url: reference.url.clone(),
        });
        let workspace = Workspace::acquire()?;
        let repo_path = workspace.fetch(self.fetcher.as_ref(), &reference)?;
        state.advance(RunState::Fetched);
        self.handler.on_progress(&ProgressEvent::Fetched {
            repo: reference.to_string(),
        });

        let facts = Extractor::new(self.fs.clone()).analyze(&reference, &repo_path);
        state.advance(RunState::Analyzed);
        self.handler.on_progress(&ProgressEvent::Analyzed {
            repo: facts.repo_name.clone(),
            build_file: facts.has_build_file(),
            compose_file: facts.compose.as_ref().map(|c| c.compose_file.clone()),
            doc_file: facts.docs.as_ref().map(|d| d.doc_file.clone()),
            needs_postgres: facts.needs_postgres(),
            needs_redis: facts.needs_redis(),
        });

        Ok(facts)
    }
}

fn summary_fields(d: &ServiceDescriptor) -> Vec<(&'static str, String)> {
    vec![
        ("name", d.name.clone()),
        ("display_name", d.display_name.clone()),
        ("description", d.description.clone()),
        ("port", d.port.clone()),
        ("image", d.image.clone()),
        ("hostname", d.hostname.clone()),
        ("needs_postgres", d.needs_postgres.to_string()),
        ("needs_redis", d.needs_redis.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use crate::fs::MockFileSystem;
    use crate::progress::NoOpHandler;
    use crate::service::{AutoPrompter, PromptError};
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// Puts fixed files under the clone destination in the mock filesystem
    struct MockFetcher {
        fs: Arc<MockFileSystem>,
        files: Vec<(&'static str, &'static str)>,
        dest: Arc<Mutex<Option<PathBuf>>>,
    }

    impl RepoFetcher for MockFetcher {
        fn fetch(&self, _reference: &RepoRef, dest: &Path) -> Result<(), FetchError> {
            for (name, content) in &self.files {
                self.fs.add_file(dest.join(name), content);
            }
            *self.dest.lock().unwrap() = Some(dest.to_path_buf());
            Ok(())
        }
    }

    struct Decline;

    impl Prompter for Decline {
        fn input(&self, _prompt: &str, default: &str) -> Result<String, PromptError> {
            Ok(default.to_string())
        }

        fn confirm(&self, _prompt: &str) -> Result<bool, PromptError> {
            Ok(false)
        }
    }

    fn project(fs: &MockFileSystem) {
        fs.add_file("proj/docker-compose.yml", "services:\n  n8n:\n    image: n8n\n\nvolumes:\n  n8n_data:\n");
        fs.add_file("proj/.env.example", "");
        fs.add_file("proj/Caddyfile", "");
        fs.add_file("proj/scripts/install/04_wizard.sh", "base_services_data=(\n)\n");
        fs.add_file("proj/scripts/install/03_generate_secrets.sh", "VARS=(\n)\n");
        fs.add_file("proj/scripts/install/07_final_report.sh", "echo\n");
    }

    fn config() -> GraftConfig {
        GraftConfig {
            project_root: PathBuf::from("proj"),
            default_port: 3000,
            domain: "example.org".to_string(),
            git_program: "git".to_string(),
            log_level: "warn".to_string(),
        }
    }

    fn orchestrator(
        fs: &Arc<MockFileSystem>,
        files: Vec<(&'static str, &'static str)>,
        prompter: Box<dyn Prompter>,
    ) -> (Orchestrator, Arc<Mutex<Option<PathBuf>>>) {
        let dest = Arc::new(Mutex::new(None));
        let fetcher = MockFetcher {
            fs: fs.clone(),
            files,
            dest: dest.clone(),
        };
        let orchestrator = Orchestrator::new(
            Box::new(fetcher),
            fs.clone(),
            prompter,
            Arc::new(NoOpHandler),
            config(),
        );
        (orchestrator, dest)
    }

    #[test]
    fn test_build_file_only_uses_default_port() {
        let fs = Arc::new(MockFileSystem::new());
        project(&fs);
        let (orchestrator, _) = orchestrator(
            &fs,
            vec![("Dockerfile", "FROM python:3.12\nEXPOSE 5000\n")],
            Box::new(AutoPrompter),
        );

        let outcome = orchestrator.run("https://github.com/acme/flask-app").unwrap();
        assert_eq!(outcome.exit_code(), 0);

        match outcome {
            RunOutcome::Completed { descriptor, steps } => {
                assert_eq!(descriptor.port, "3000");
                assert_eq!(descriptor.name, "flaskapp");
                assert!(!descriptor.needs_postgres);
                assert_eq!(steps.len(), 6);
                assert_eq!(steps[0].kind, TargetKind::Manifest);
            }
            RunOutcome::Cancelled => panic!("run was cancelled"),
        }
        assert!(fs
            .contents("proj/docker-compose.yml")
            .unwrap()
            .contains("  flaskapp:\n    image: acme/flask-app:latest\n"));
    }

    #[test]
    fn test_no_build_signal_writes_nothing() {
        let fs = Arc::new(MockFileSystem::new());
        project(&fs);
        let (orchestrator, _) = orchestrator(
            &fs,
            vec![("README.md", "# Widget\n")],
            Box::new(AutoPrompter),
        );

        let err = orchestrator.run("https://github.com/acme/widget").unwrap_err();
        assert!(matches!(err, PipelineError::NoBuildSignal));
        assert_eq!(err.exit_code(), 1);
        assert!(fs.written_paths().is_empty());
    }

    #[test]
    fn test_decline_writes_nothing() {
        let fs = Arc::new(MockFileSystem::new());
        project(&fs);
        let (orchestrator, _) = orchestrator(
            &fs,
            vec![("Dockerfile", "FROM alpine\n")],
            Box::new(Decline),
        );

        let outcome = orchestrator.run("https://github.com/acme/widget").unwrap();
        assert_eq!(outcome, RunOutcome::Cancelled);
        assert_eq!(outcome.exit_code(), 1);
        assert!(fs.written_paths().is_empty());
    }

    #[test]
    fn test_missing_targets_abort_before_prompting() {
        let fs = Arc::new(MockFileSystem::new());
        let (orchestrator, _) = orchestrator(
            &fs,
            vec![("Dockerfile", "FROM alpine\n")],
            Box::new(AutoPrompter),
        );

        let err = orchestrator.run("https://github.com/acme/widget").unwrap_err();
        assert!(matches!(err, PipelineError::Integration(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_invalid_reference_is_fatal() {
        let fs = Arc::new(MockFileSystem::new());
        let (orchestrator, _) = orchestrator(&fs, vec![], Box::new(AutoPrompter));

        let err = orchestrator.run("widget").unwrap_err();
        assert!(matches!(err, PipelineError::Fetch(FetchError::InvalidReference(_))));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_workspace_removed_after_inspect() {
        let fs = Arc::new(MockFileSystem::new());
        let (orchestrator, dest) = orchestrator(
            &fs,
            vec![(
                "docker-compose.yml",
                "services:\n  app:\n    image: acme/widget:2\n    ports:\n      - \"8080:80\"\n",
            )],
            Box::new(AutoPrompter),
        );

        let facts = orchestrator.inspect("https://github.com/acme/widget").unwrap();
        assert_eq!(facts.compose_ports(), ["8080"]);
        assert_eq!(facts.primary_image(), Some("acme/widget:2"));

        let dest = dest.lock().unwrap().clone().unwrap();
        let workspace_root = dest.parent().unwrap();
        assert!(!workspace_root.exists());
    }
}
