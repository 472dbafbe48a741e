//! Command-line interface for component views.
//!
//! The `components` binary renders, resolves and lists components described by a
//! project's `components.toml`.
//!
//! # Commands
//!
//! - `render` - render a component and print the output
//! - `resolve` - show which template a render would use, without rendering
//! - `list` - show every registered variant with its path, parent and templates
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - no logging
//! - `--config` / `-c` - configuration file (also `COMPONENTS_CONFIG`)
//!
//! `RUST_LOG` takes precedence over both logging flags when set.
//!
//! # Examples
//!
//! ```bash
//! components render LeafComponent --action show --var title=Hello
//! components render UsersComponent --template shared/card --assigns '{"user": {"name": "Ada"}}'
//! components resolve LeafComponent show
//! components --config site/components.toml list --format json
//! ```

mod list;
mod render;
mod resolve;

pub use list::ListCommand;
pub use render::RenderCommand;
pub use resolve::ResolveCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::ComponentsConfig;

/// Runtime settings derived from the global flags.
///
/// Separated from [`Cli`] so tests can execute commands with an explicit
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level filter, `None` to disable logging. `RUST_LOG` wins when set.
    pub log_level: Option<String>,

    /// Configuration file overriding the default lookup.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Settings with logging disabled and the default config lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Does nothing when logging is disabled. A second call is a no-op.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(level)
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load the project configuration these settings point at.
    pub fn load_components_config(&self) -> Result<ComponentsConfig> {
        ComponentsConfig::load(self.config_path.as_deref())
    }
}

/// Render Rails-style components from the command line.
#[derive(Parser, Debug)]
#[command(
    name = "components",
    about = "Render controller-like components with inferred, inherited templates",
    version,
    long_about = "Components behave like controller actions but render like views: the template is \
                  named after the rendering operation and looked up along the component's \
                  inheritance chain."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging of template resolution.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Disable logging entirely; only errors are printed.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file.
    ///
    /// Defaults to `$COMPONENTS_CONFIG`, then `./components.toml`.
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a component and print the output.
    Render(RenderCommand),

    /// Show which template a component would render, without rendering it.
    Resolve(ResolveCommand),

    /// List registered components and their templates.
    List(ListCommand),
}

impl Cli {
    /// Execute the parsed command with settings derived from the global flags.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Translate the global flags into a [`CliConfig`].
    ///
    /// `--verbose` selects `debug`, `--quiet` disables logging, and the default is
    /// `info`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit configuration.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();
        let components = config.load_components_config()?;

        match self.command {
            Commands::Render(cmd) => cmd.execute(&components),
            Commands::Resolve(cmd) => cmd.execute(&components),
            Commands::List(cmd) => cmd.execute(&components),
        }
    }
}
