//! Subcommand handlers
//!
//! Each handler wires the production collaborators together, runs the
//! pipeline and maps the result to a process exit code.

use super::commands::{InspectArgs, IntegrateArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::GraftConfig;
use crate::fetch::GitFetcher;
use crate::fs::RealFileSystem;
use crate::pipeline::{Orchestrator, PipelineError};
use crate::progress::{CompositeHandler, ConsoleHandler, LoggingHandler, ProgressHandler};
use crate::service::{AutoPrompter, DialoguerPrompter, Prompter};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Exit code for configuration and other fatal errors
const EXIT_FATAL: i32 = 2;

pub fn handle_integrate(args: &IntegrateArgs, quiet: bool, verbose: bool) -> i32 {
    let config = GraftConfig::default().with_project_root(args.project_root.clone());
    if let Err(e) = config.validate() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        return EXIT_FATAL;
    }
    if verbose {
        eprintln!("{}", OutputFormatter::new(OutputFormat::Human).format_config(&config));
    }

    if !quiet {
        ConsoleHandler::banner();
    }

    let prompter: Box<dyn Prompter> = if args.auto {
        info!("Auto mode: accepting all defaults");
        Box::new(AutoPrompter)
    } else {
        Box::new(DialoguerPrompter::new())
    };

    let orchestrator = Orchestrator::new(
        Box::new(GitFetcher::new(config.git_program.clone())),
        Arc::new(RealFileSystem),
        prompter,
        progress_handler(quiet),
        config,
    );

    match orchestrator.run(&args.repo_url) {
        Ok(outcome) => {
            debug!(exit_code = outcome.exit_code(), "Integration finished");
            outcome.exit_code()
        }
        Err(e) => failure(&e, quiet),
    }
}

pub fn handle_inspect(args: &InspectArgs, quiet: bool) -> i32 {
    let config = GraftConfig::default();
    if let Err(e) = config.validate() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        return EXIT_FATAL;
    }

    // Narration would corrupt machine-readable output on stdout
    let format: OutputFormat = args.format.into();
    let narrate = !quiet && format == OutputFormat::Human;

    let orchestrator = Orchestrator::new(
        Box::new(GitFetcher::new(config.git_program.clone())),
        Arc::new(RealFileSystem),
        Box::new(AutoPrompter),
        progress_handler(!narrate),
        config,
    );

    let facts = match orchestrator.inspect(&args.repo_url) {
        Ok(facts) => facts,
        Err(e) => return failure(&e, !narrate),
    };

    match OutputFormatter::new(format).format(&facts) {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            eprintln!("Error: {:#}", e);
            EXIT_FATAL
        }
    }
}

fn progress_handler(quiet: bool) -> Arc<dyn ProgressHandler> {
    if quiet {
        Arc::new(LoggingHandler)
    } else {
        Arc::new(CompositeHandler::new(vec![
            Box::new(ConsoleHandler::new()),
            Box::new(LoggingHandler),
        ]))
    }
}

/// The console handler already printed the error when narration is on.
fn failure(err: &PipelineError, quiet: bool) -> i32 {
    error!(error = %err, "Run failed");
    if quiet {
        eprintln!("Error: {}", err);
    }
    err.exit_code()
}
