//! Platform layout of virtual environment directories and launcher paths.

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::lib::errors::LaunchError;

#[cfg(windows)]
const VENV_BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
const VENV_BIN_DIR: &str = "bin";

#[cfg(windows)]
const ACTIVATE_SCRIPT: &str = "activate.bat";
#[cfg(not(windows))]
const ACTIVATE_SCRIPT: &str = "activate";

#[cfg(windows)]
const VENV_INTERPRETER: &str = "python.exe";
#[cfg(not(windows))]
const VENV_INTERPRETER: &str = "python";

/// Program name an activated environment resolves through `PATH`.
pub const ACTIVATED_PROGRAM: &str = "python";

/// Paths inside one virtual environment directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenvLayout {
    pub root: PathBuf,
}

impl VenvLayout {
    pub fn new(base_dir: &Path, name: &str) -> Self {
        Self {
            root: base_dir.join(name),
        }
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root.join(VENV_BIN_DIR)
    }

    pub fn activate_script(&self) -> PathBuf {
        self.bin_dir().join(ACTIVATE_SCRIPT)
    }

    pub fn interpreter(&self) -> PathBuf {
        self.bin_dir().join(VENV_INTERPRETER)
    }
}

/// Directory containing the running launcher executable.
pub fn launcher_dir() -> Result<PathBuf, LaunchError> {
    let exe = env::current_exe().map_err(|err| LaunchError::BaseDir {
        message: err.to_string(),
    })?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| LaunchError::BaseDir {
            message: format!("{} has no parent directory", exe.display()),
        })
}

/// Returns true if the path is non-empty and relative.
pub fn is_nonempty_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_relative()
}
