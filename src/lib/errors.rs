use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating the launcher configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file {path} does not exist")]
    NotFound { path: PathBuf },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures raised by the launch sequence itself (not by the launched program).
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Failed to read the current working directory: {source}")]
    CurrentDir {
        #[source]
        source: io::Error,
    },
    #[error("Failed to change working directory to {path}: {source}")]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to restore working directory {path}: {source}")]
    RestoreDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to resolve the launcher directory: {message}")]
    BaseDir { message: String },
    #[error("Failed while waiting for `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Remediation text shown when the system interpreter cannot run a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remediation {
    pub headline: String,
    pub guidance: String,
}

impl Remediation {
    pub fn for_system_fallback(role: &str, venv_dirs: &[String]) -> Self {
        let names = venv_dirs
            .iter()
            .map(|name| format!("'{name}'"))
            .collect::<Vec<_>>()
            .join(" or ");
        Self {
            headline: format!("Failed to start {role} with system interpreter."),
            guidance: format!(
                "Create a local virtual environment named {names} and install the {role} dependencies."
            ),
        }
    }
}
