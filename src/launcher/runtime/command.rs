//! Child command construction, including the scoped activation override.

use std::{
    collections::BTreeMap,
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use serde_json::{json, Value};
use tokio::process::Command;
use tracing::warn;

use crate::{
    launcher::discovery::InterpreterSource,
    lib::paths::{VenvLayout, ACTIVATED_PROGRAM},
};

/// Variables an activation script would unset.
const ACTIVATION_REMOVED_VARS: &[&str] = &["PYTHONHOME"];

/// Everything needed to spawn the interpreter for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub current_dir: PathBuf,
    pub env_overrides: BTreeMap<String, OsString>,
    pub env_removals: Vec<String>,
}

impl CommandPlan {
    /// Build the plan for `source`; `inherited_path` is the launcher's own `PATH`.
    pub fn build(
        source: &InterpreterSource,
        module: &str,
        base_dir: &Path,
        inherited_path: Option<OsString>,
    ) -> Self {
        let args = vec!["-m".to_string(), module.to_string()];
        let mut plan = Self {
            program: PathBuf::new(),
            args,
            current_dir: base_dir.to_path_buf(),
            env_overrides: BTreeMap::new(),
            env_removals: Vec::new(),
        };

        match source {
            InterpreterSource::Activation { layout, .. } => {
                plan.apply_activation(layout, inherited_path);
            }
            InterpreterSource::Direct { interpreter, .. } => {
                plan.program = interpreter.clone();
            }
            InterpreterSource::SystemFallback { program } => {
                plan.program = PathBuf::from(program);
            }
        }

        plan
    }

    /// `python` is resolved through the prepended search path; when the bin directory cannot
    /// be expressed as a search path entry, the interpreter is addressed by its full path.
    fn apply_activation(&mut self, layout: &VenvLayout, inherited_path: Option<OsString>) {
        let mut entries = vec![layout.bin_dir()];
        if let Some(path) = inherited_path.as_deref() {
            entries.extend(env::split_paths(path));
        }
        match env::join_paths(&entries) {
            Ok(search_path) => {
                self.program = PathBuf::from(ACTIVATED_PROGRAM);
                self.env_overrides.insert("PATH".into(), search_path);
            }
            Err(err) => {
                warn!(
                    target: "venv_launch::runtime",
                    bin_dir = %layout.bin_dir().display(),
                    reason = %err,
                    "Cannot prepend environment to PATH; running its interpreter directly"
                );
                self.program = layout.interpreter();
            }
        }

        self.env_overrides
            .insert("VIRTUAL_ENV".into(), layout.root.clone().into_os_string());
        self.env_removals = ACTIVATION_REMOVED_VARS
            .iter()
            .map(|name| name.to_string())
            .collect();
    }

    /// Convert into a command whose standard streams are inherited from the launcher.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command.current_dir(&self.current_dir);
        for (key, value) in &self.env_overrides {
            command.env(key, value);
        }
        for key in &self.env_removals {
            command.env_remove(key);
        }
        command
    }

    pub fn display_program(&self) -> String {
        self.program.display().to_string()
    }

    /// JSON view used by the dry-run output.
    pub fn to_json(&self) -> Value {
        let env: BTreeMap<&str, String> = self
            .env_overrides
            .iter()
            .map(|(key, value)| (key.as_str(), value.to_string_lossy().into_owned()))
            .collect();
        json!({
            "program": self.display_program(),
            "args": self.args,
            "current_dir": self.current_dir.display().to_string(),
            "env": env,
            "env_removed": self.env_removals,
        })
    }
}
