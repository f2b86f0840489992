use clap::{Parser, Subcommand};

/// Job board API server.
#[derive(Debug, Parser)]
#[command(name = "jobboard-backend", version, about)]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(short = 'c', long = "config-path", env = "JOBBOARD_CONFIG_PATH")]
    pub config_path: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Apply migrations and serve the HTTP API (default)
    Serve,
    /// Apply migrations and exit
    Migrate,
}

impl CliArgs {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}
