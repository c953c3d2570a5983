//! LaunchProfile and base-dir/config resolution.
use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::{
    launcher::config::{ConfigLocation, PauseMode, CONFIG_ENV_KEY},
    lib::paths::launcher_dir,
};

/// Which application entry point to launch.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Role {
    Server,
    Client,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Server => "server",
            Role::Client => "client",
        }
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchProfile {
    pub role: Role,
    pub base_dir: PathBuf,
    pub config_location: ConfigLocation,
    pub pause_override: Option<PauseMode>,
}

impl LaunchProfile {
    /// Profile used by the parameterless role launchers.
    pub fn for_role(role: Role) -> Result<Self> {
        let base_dir = resolve_base_dir(None)?;
        let config_location = resolve_config_location(None, &base_dir)?;
        Ok(Self {
            role,
            base_dir,
            config_location,
            pause_override: None,
        })
    }
}

/// Resolve the base directory: CLI override (made absolute) → launcher executable directory.
pub fn resolve_base_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    match override_dir {
        Some(dir) => absolutize(dir),
        None => launcher_dir().context("failed to locate launcher directory"),
    }
}

/// Resolve the config location in the order: CLI override → env var → `launcher.toml` in base dir.
pub fn resolve_config_location(
    override_path: Option<PathBuf>,
    base_dir: &std::path::Path,
) -> Result<ConfigLocation> {
    let explicit = override_path.or_else(|| {
        env::var_os(CONFIG_ENV_KEY)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    });

    match explicit {
        Some(path) => Ok(ConfigLocation::explicit(absolutize(path)?)),
        None => Ok(ConfigLocation::default_in(base_dir)),
    }
}

fn absolutize(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(cwd.join(path))
}
