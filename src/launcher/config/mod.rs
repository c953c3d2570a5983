//! Load and validate launcher configuration.
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod interpreter;
pub mod remediation;
pub mod roles;
pub mod telemetry;

pub use interpreter::{
    parse_interpreter_section, InterpreterSection, RawInterpreterSection,
    DEFAULT_SYSTEM_INTERPRETER, DEFAULT_VENV_DIRS,
};
pub use remediation::{
    parse_remediation_section, PauseMode, RawRemediationSection, RemediationSection,
};
pub use roles::{
    parse_roles_section, RawRolesSection, RolesSection, DEFAULT_CLIENT_MODULE,
    DEFAULT_SERVER_MODULE,
};

pub const CONFIG_ENV_KEY: &str = "VENV_LAUNCH_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "launcher.toml";

/// Where the configuration comes from and whether it has to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub required: bool,
}

impl ConfigLocation {
    /// A file the user named explicitly; it must exist.
    pub fn explicit(path: PathBuf) -> Self {
        Self {
            path,
            required: true,
        }
    }

    /// `launcher.toml` next to the launcher; optional.
    pub fn default_in(base_dir: &Path) -> Self {
        Self {
            path: base_dir.join(DEFAULT_CONFIG_FILE),
            required: false,
        }
    }
}

/// Top-level configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LauncherConfig {
    pub interpreter: InterpreterSection,
    pub roles: RolesSection,
    pub remediation: RemediationSection,
    /// `None` when built-in defaults were used.
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawLauncherConfig {
    interpreter: Option<RawInterpreterSection>,
    roles: Option<RawRolesSection>,
    remediation: Option<RawRemediationSection>,
}

impl LauncherConfig {
    /// Load from `location`, falling back to defaults when an optional file is absent.
    pub fn load(location: &ConfigLocation) -> Result<Self, ConfigError> {
        if !location.path.exists() {
            if location.required {
                let error = ConfigError::NotFound {
                    path: location.path.clone(),
                };
                error!(
                    target: "venv_launch::config",
                    path = %location.path.display(),
                    reason = %error,
                    "Configuration file is missing"
                );
                return Err(error);
            }
            telemetry::log_defaults(&location.path);
            return Ok(Self::default());
        }

        Self::load_from_path(location.path.clone())
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "venv_launch::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "venv_launch::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawLauncherConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "venv_launch::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "venv_launch::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawLauncherConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let interpreter = parse_interpreter_section(raw.interpreter, &path)?;
        let roles = parse_roles_section(raw.roles, &path)?;
        let remediation = parse_remediation_section(raw.remediation);

        Ok(Self {
            interpreter,
            roles,
            remediation,
            source_path: Some(path),
        })
    }
}
