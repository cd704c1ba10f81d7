//! svcgraft - register containerized repositories as services in a deployment project
//!
//! A run clones a repository into a throwaway workspace, extracts a best-effort
//! [`FactSheet`] from its Dockerfile, compose file, README and `package.json`,
//! turns it into a confirmed [`ServiceDescriptor`], and inserts the service
//! into the project's compose file, env template, Caddyfile and installer
//! scripts.
//!
//! # Example Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use svcgraft::{GitFetcher, GraftConfig, Orchestrator, RealFileSystem};
//! use svcgraft::progress::LoggingHandler;
//! use svcgraft::service::AutoPrompter;
//!
//! let config = GraftConfig::default();
//! let orchestrator = Orchestrator::new(
//!     Box::new(GitFetcher::new(config.git_program.clone())),
//!     Arc::new(RealFileSystem),
//!     Box::new(AutoPrompter),
//!     Arc::new(LoggingHandler),
//!     config,
//! );
//! let outcome = orchestrator.run("https://github.com/requarks/wiki")?;
//! std::process::exit(outcome.exit_code());
//! ```
//!
//! # Project Structure
//!
//! - [`fetch`]: repository references, workspace and cloning
//! - [`extractors`]: inspectors and the fact sheet
//! - [`service`]: descriptor defaults and prompting
//! - [`integrator`]: anchor tables and target-file mutations
//! - [`pipeline`]: the run state machine

pub mod cli;
pub mod config;
pub mod extractors;
pub mod fetch;
pub mod fs;
pub mod integrator;
pub mod pipeline;
pub mod progress;
pub mod service;
pub mod util;

pub use config::{ConfigError, GraftConfig};
pub use extractors::{Extractor, FactSheet};
pub use fetch::{FetchError, GitFetcher, RepoFetcher, RepoRef, Workspace};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use integrator::{IntegrationError, Integrator, TargetKind};
pub use pipeline::{Orchestrator, PipelineError, RunOutcome, RunState};
pub use service::ServiceDescriptor;
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
