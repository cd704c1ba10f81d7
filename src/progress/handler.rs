//! Progress handler trait and events

use std::path::PathBuf;

/// Events emitted while a run moves through fetch, analysis and integration
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Clone started
    FetchStarted { url: String },

    /// Repository available in the workspace
    Fetched { repo: String },

    /// Inspectors finished
    Analyzed {
        repo: String,
        build_file: bool,
        compose_file: Option<String>,
        doc_file: Option<String>,
        needs_postgres: bool,
        needs_redis: bool,
    },

    /// Descriptor collected and awaiting confirmation
    DescriptorReady { fields: Vec<(&'static str, String)> },

    StepStarted {
        index: usize,
        total: usize,
        label: String,
    },

    StepCompleted {
        label: String,
        path: PathBuf,
        skipped: bool,
    },

    /// A step the operator has to do by hand
    ManualStep {
        index: usize,
        total: usize,
        instruction: String,
    },

    /// Every mutation applied
    Completed { name: String, display_name: String },

    /// Confirmation declined
    Cancelled,

    /// Run stopped before integration
    Failed { error: String },
}

/// Trait for handling progress events during a run
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
