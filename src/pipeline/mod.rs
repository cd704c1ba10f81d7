//! End-to-end run: fetch, analyze, confirm, integrate

mod orchestrator;
mod state;

pub use orchestrator::{Orchestrator, RunOutcome};
pub use state::{RunState, StateTracker};

use crate::config::ConfigError;
use crate::fetch::FetchError;
use crate::integrator::IntegrationError;
use crate::service::PromptError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("No Docker support found: the repository has neither a Dockerfile nor a compose file")]
    NoBuildSignal,

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Integration(#[from] IntegrationError),
}

impl PipelineError {
    /// `1` when the repository cannot be integrated, `2` for every other failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::NoBuildSignal => 1,
            _ => 2,
        }
    }
}
