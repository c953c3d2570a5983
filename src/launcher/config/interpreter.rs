use std::path::Path;

use serde::Deserialize;

use crate::lib::{errors::ConfigError, paths::is_nonempty_relative};

pub const DEFAULT_VENV_DIRS: [&str; 2] = [".venv", "venv"];
pub const DEFAULT_SYSTEM_INTERPRETER: &str = "python";

/// Interpreter discovery settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterSection {
    /// Local environment directory names in priority order ("A" then "B").
    pub venv_dirs: [String; 2],
    /// Program looked up on `PATH` when no local environment exists.
    pub system: String,
}

impl Default for InterpreterSection {
    fn default() -> Self {
        Self {
            venv_dirs: DEFAULT_VENV_DIRS.map(String::from),
            system: DEFAULT_SYSTEM_INTERPRETER.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawInterpreterSection {
    pub venv_dirs: Option<Vec<String>>,
    pub system: Option<String>,
}

pub fn parse_interpreter_section(
    raw: Option<RawInterpreterSection>,
    path: &Path,
) -> Result<InterpreterSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let defaults = InterpreterSection::default();

    let venv_dirs = match raw.venv_dirs {
        Some(dirs) => validate_venv_dirs(dirs, path)?,
        None => defaults.venv_dirs,
    };

    let system = match raw.system {
        Some(system) if system.trim().is_empty() => {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "interpreter.system",
                message: "Provide a program name such as `python` or `python3`".into(),
            })
        }
        Some(system) => system.trim().to_string(),
        None => defaults.system,
    };

    Ok(InterpreterSection { venv_dirs, system })
}

fn validate_venv_dirs(dirs: Vec<String>, path: &Path) -> Result<[String; 2], ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "interpreter.venv_dirs",
        message: message.to_string(),
    };

    let [first, second]: [String; 2] = dirs
        .try_into()
        .map_err(|_| invalid("List exactly two directory names in priority order"))?;

    for dir in [&first, &second] {
        if !is_nonempty_relative(Path::new(dir)) {
            return Err(invalid("Directory names must be non-empty and relative"));
        }
    }
    if first == second {
        return Err(invalid("Directory names must be distinct"));
    }

    Ok([first, second])
}
