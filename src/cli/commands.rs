use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Registers a containerized repository as a service in a deployment project
#[derive(Parser, Debug)]
#[command(
    name = "svcgraft",
    about = "Register a containerized repository as a service in a deployment project",
    version,
    author,
    long_about = "svcgraft clones a repository, inspects its Dockerfile, compose file, README \
                  and package.json, asks you to confirm the service details, and then adds the \
                  service to docker-compose.yml, .env.example, the Caddyfile and the installer \
                  scripts of the deployment project."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Analyze a repository and integrate it as a service",
        long_about = "Clones the repository, extracts its facts, prompts for the service \
                      details and edits the deployment project's files.\n\n\
                      Examples:\n  \
                      svcgraft integrate https://github.com/requarks/wiki\n  \
                      svcgraft integrate https://github.com/requarks/wiki --auto\n  \
                      svcgraft integrate git@github.com:acme/widget.git --project-root ../installer"
    )]
    Integrate(IntegrateArgs),

    #[command(
        about = "Show the facts extracted from a repository",
        long_about = "Clones the repository and prints its fact sheet without touching any \
                      project file.\n\n\
                      Examples:\n  \
                      svcgraft inspect https://github.com/requarks/wiki\n  \
                      svcgraft inspect https://github.com/requarks/wiki --format json"
    )]
    Inspect(InspectArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct IntegrateArgs {
    #[arg(value_name = "REPO_URL", help = "Repository URL")]
    pub repo_url: String,

    #[arg(long, help = "Accept every default and skip the confirmation prompt")]
    pub auto: bool,

    #[arg(
        long,
        value_name = "DIR",
        help = "Deployment project root (defaults to SVCGRAFT_PROJECT_ROOT or the current directory)"
    )]
    pub project_root: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    #[arg(value_name = "REPO_URL", help = "Repository URL")]
    pub repo_url: String,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
