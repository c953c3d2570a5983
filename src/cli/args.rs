//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};

use super::{resolve_base_dir, resolve_config_location, LaunchProfile, Role};
use crate::launcher::config::PauseMode;

/// Parsed command intent from CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Launch(LaunchProfile),
    Probe(LaunchProfile),
}

/// Optional CLI commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Show which interpreter would be used and the exact command, without launching.
    Probe(ProbeArgs),
}

/// Arguments for `probe`.
#[derive(Debug, Clone, Args)]
pub struct ProbeArgs {
    /// Role whose entry module would be launched.
    #[arg(value_enum)]
    pub role: Role,
}

/// Command-line arguments of the general launcher.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Run the server or client entry module with the project's interpreter",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Role to launch.
    #[arg(value_enum)]
    pub role: Option<Role>,
    /// Path to launcher.toml (overrides VENV_LAUNCH_CONFIG).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Directory searched for virtual environments (defaults to the launcher's directory).
    #[arg(long = "base-dir")]
    pub base_dir: Option<PathBuf>,
    /// Whether to wait for Enter after a failed system-interpreter launch.
    #[arg(long, value_enum)]
    pub pause: Option<PauseMode>,
    /// Optional CLI command mode.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` for `role` from CLI args and environment variables.
    pub fn build(&self, role: Role) -> Result<LaunchProfile> {
        let base_dir = resolve_base_dir(self.base_dir.clone())?;
        let config_location = resolve_config_location(self.config_override.clone(), &base_dir)?;

        Ok(LaunchProfile {
            role,
            base_dir,
            config_location,
            pause_override: self.pause,
        })
    }

    /// Parse CLI args into either launch mode or probe mode.
    pub fn into_command(self) -> Result<ParsedCommand> {
        match (&self.command, self.role) {
            (Some(CliCommand::Probe(args)), _) => {
                Ok(ParsedCommand::Probe(self.build(args.role)?))
            }
            (None, Some(role)) => Ok(ParsedCommand::Launch(self.build(role)?)),
            (None, None) => Err(anyhow!(
                "a role is required: `venv-launch server` or `venv-launch client`"
            )),
        }
    }
}

/// Arguments of the parameterless `start-server` / `start-client` binaries.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Start the application with the project's interpreter")]
pub struct RoleLauncherArgs {}
