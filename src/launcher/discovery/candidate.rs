//! Ordered interpreter candidates and the source finally selected.
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{launcher::config::InterpreterSection, lib::paths::VenvLayout};

/// How a local candidate is invoked once its probe path exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationForm {
    Activation,
    Direct,
}

/// One local entry of the fixed priority list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterCandidate {
    pub venv_name: String,
    pub layout: VenvLayout,
    pub form: InvocationForm,
}

impl InterpreterCandidate {
    pub fn probe_path(&self) -> PathBuf {
        match self.form {
            InvocationForm::Activation => self.layout.activate_script(),
            InvocationForm::Direct => self.layout.interpreter(),
        }
    }

    pub fn into_source(self) -> InterpreterSource {
        match self.form {
            InvocationForm::Activation => InterpreterSource::Activation {
                venv_name: self.venv_name,
                layout: self.layout,
            },
            InvocationForm::Direct => InterpreterSource::Direct {
                venv_name: self.venv_name,
                interpreter: self.layout.interpreter(),
            },
        }
    }
}

/// Local candidates in priority order: both activation scripts, then both interpreters.
/// The system interpreter is not listed because it is never probed.
pub fn local_candidates(base_dir: &Path, section: &InterpreterSection) -> Vec<InterpreterCandidate> {
    [InvocationForm::Activation, InvocationForm::Direct]
        .into_iter()
        .flat_map(|form| {
            section.venv_dirs.iter().map(move |name| InterpreterCandidate {
                venv_name: name.clone(),
                layout: VenvLayout::new(base_dir, name),
                form,
            })
        })
        .collect()
}

/// The interpreter chosen for this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterpreterSource {
    Activation {
        venv_name: String,
        #[serde(serialize_with = "serialize_layout")]
        layout: VenvLayout,
    },
    Direct {
        venv_name: String,
        interpreter: PathBuf,
    },
    SystemFallback {
        program: String,
    },
}

impl InterpreterSource {
    pub const fn label(&self) -> &'static str {
        match self {
            InterpreterSource::Activation { .. } => "activation",
            InterpreterSource::Direct { .. } => "direct",
            InterpreterSource::SystemFallback { .. } => "system",
        }
    }

    pub fn is_system_fallback(&self) -> bool {
        matches!(self, InterpreterSource::SystemFallback { .. })
    }

    /// Human-readable line printed before the program starts.
    pub fn describe(&self) -> String {
        match self {
            InterpreterSource::Activation { venv_name, .. } => {
                format!("Using virtual environment '{venv_name}' (activated).")
            }
            InterpreterSource::Direct {
                venv_name,
                interpreter,
            } => format!(
                "Using virtual environment '{venv_name}' interpreter {}.",
                interpreter.display()
            ),
            InterpreterSource::SystemFallback { program } => {
                format!("No local virtual environment found. Using system interpreter `{program}`.")
            }
        }
    }
}

fn serialize_layout<S>(layout: &VenvLayout, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    layout.root.serialize(serializer)
}
