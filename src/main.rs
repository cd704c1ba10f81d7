use svcgraft::cli::commands::{CliArgs, Commands};
use svcgraft::cli::handlers::{handle_inspect, handle_integrate};
use svcgraft::config::DEFAULT_LOG_LEVEL;
use svcgraft::util::logging::{init_logging, json_from_env, parse_level, LoggingConfig};
use svcgraft::VERSION;

use clap::Parser;
use std::env;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("svcgraft v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Integrate(integrate_args) => {
            handle_integrate(integrate_args, args.quiet, args.verbose)
        }
        Commands::Inspect(inspect_args) => handle_inspect(inspect_args, args.quiet),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let mut config = if let Some(level_str) = &args.log_level {
        LoggingConfig::with_level(parse_level(level_str))
    } else if args.verbose {
        LoggingConfig::development()
    } else if args.quiet {
        LoggingConfig::with_level(Level::ERROR)
    } else {
        let level_str =
            env::var("SVCGRAFT_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
        LoggingConfig::with_level(parse_level(&level_str))
    };
    config.use_json = json_from_env();

    init_logging(config);
}
