pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, InspectArgs, IntegrateArgs};
pub use output::{OutputFormat, OutputFormatter};
