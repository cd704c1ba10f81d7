//! Configuration management for svcgraft
//!
//! Settings are loaded from environment variables with sensible defaults.
//! Command-line flags override individual values after loading.
//!
//! # Environment Variables
//!
//! - `SVCGRAFT_PROJECT_ROOT`: Deployment project to modify - default: current directory
//! - `SVCGRAFT_DEFAULT_PORT`: Internal port offered when the repository declares none - default: "3000"
//! - `SVCGRAFT_DOMAIN`: Domain suffix for generated hostnames - default: "yourdomain.com"
//! - `SVCGRAFT_GIT`: Git executable used for cloning - default: "git"
//! - `SVCGRAFT_LOG_LEVEL`: Logging level - default: "warn"
//!
//! # Example
//!
//! ```no_run
//! use svcgraft::GraftConfig;
//! use std::env;
//!
//! env::set_var("SVCGRAFT_DOMAIN", "example.org");
//!
//! let config = GraftConfig::default();
//! config.validate().expect("Invalid configuration");
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Default values for configuration
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DOMAIN: &str = "yourdomain.com";
pub const DEFAULT_GIT: &str = "git";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Main configuration structure for svcgraft
///
/// `Default::default()` loads from the environment with fallback defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraftConfig {
    /// Root of the deployment project whose files are edited
    pub project_root: PathBuf,

    /// Port offered when the compose file declares no host port
    pub default_port: u32,

    /// Domain suffix for `<NAME>_HOSTNAME` in `.env.example`
    pub domain: String,

    /// Git executable
    pub git_program: String,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GraftConfig {
    fn default() -> Self {
        // Env, then working directory. `--project-root` is applied later.
        let project_root = env::var("SVCGRAFT_PROJECT_ROOT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_port = env::var("SVCGRAFT_DEFAULT_PORT")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(u32::from(DEFAULT_PORT));

        let domain = env::var("SVCGRAFT_DOMAIN").unwrap_or_else(|_| DEFAULT_DOMAIN.to_string());

        let git_program = env::var("SVCGRAFT_GIT").unwrap_or_else(|_| DEFAULT_GIT.to_string());

        let log_level = env::var("SVCGRAFT_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            project_root,
            default_port,
            domain,
            git_program,
            log_level,
        }
    }
}

impl GraftConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any value is out of range or empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=65535).contains(&self.default_port) {
            return Err(ConfigError::ValidationFailed(format!(
                "Default port must be between 1 and 65535, got {}",
                self.default_port
            )));
        }

        if self.domain.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Domain cannot be empty".to_string(),
            ));
        }

        if self.git_program.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Git executable cannot be empty".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn with_project_root(mut self, root: Option<PathBuf>) -> Self {
        if let Some(root) = root {
            self.project_root = root;
        }
        self
    }

    /// The default port as a `u16`, for a validated configuration.
    pub fn port_fallback(&self) -> u16 {
        u16::try_from(self.default_port).unwrap_or(DEFAULT_PORT)
    }
}

impl fmt::Display for GraftConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Svcgraft Configuration:")?;
        writeln!(f, "  Project Root: {}", self.project_root.display())?;
        writeln!(f, "  Default Port: {}", self.default_port)?;
        writeln!(f, "  Domain: {}", self.domain)?;
        writeln!(f, "  Git: {}", self.git_program)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
