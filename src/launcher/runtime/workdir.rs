use std::{
    env,
    path::{Path, PathBuf},
};

use tracing::{debug, error};

use crate::lib::errors::LaunchError;

/// Changes the process working directory and puts the caller's back when released.
///
/// `restore` reports failures; dropping an unrestored guard (early return, panic)
/// still attempts the restore and logs if it fails.
#[derive(Debug)]
pub struct WorkingDirGuard {
    original: PathBuf,
    restored: bool,
}

impl WorkingDirGuard {
    pub fn enter(target: &Path) -> Result<Self, LaunchError> {
        let original = env::current_dir().map_err(|source| LaunchError::CurrentDir { source })?;
        env::set_current_dir(target).map_err(|source| LaunchError::ChangeDir {
            path: target.to_path_buf(),
            source,
        })?;
        debug!(
            target: "venv_launch::runtime",
            from = %original.display(),
            to = %target.display(),
            "Changed working directory"
        );
        Ok(Self {
            original,
            restored: false,
        })
    }

    pub fn original(&self) -> &Path {
        &self.original
    }

    pub fn restore(mut self) -> Result<(), LaunchError> {
        self.restored = true;
        env::set_current_dir(&self.original).map_err(|source| LaunchError::RestoreDir {
            path: self.original.clone(),
            source,
        })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(err) = env::set_current_dir(&self.original) {
            error!(
                target: "venv_launch::runtime",
                path = %self.original.display(),
                reason = %err,
                "Failed to restore working directory"
            );
        }
    }
}
