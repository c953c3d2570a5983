//! Interpreter discovery: first existing candidate wins, system interpreter otherwise.
use std::path::Path;

use tracing::{debug, info};

use crate::launcher::config::InterpreterSection;

mod candidate;
mod probe;

pub use candidate::{local_candidates, InterpreterCandidate, InterpreterSource, InvocationForm};
pub use probe::{FsProbe, PathProbe};

/// Probe the local candidates in priority order and pick exactly one source.
pub fn discover(
    base_dir: &Path,
    section: &InterpreterSection,
    probe: &impl PathProbe,
) -> InterpreterSource {
    for candidate in local_candidates(base_dir, section) {
        let probe_path = candidate.probe_path();
        if probe.exists(&probe_path) {
            info!(
                target: "venv_launch::discovery",
                venv = %candidate.venv_name,
                form = ?candidate.form,
                probe_path = %probe_path.display(),
                "Selected local interpreter candidate"
            );
            return candidate.into_source();
        }
        debug!(
            target: "venv_launch::discovery",
            probe_path = %probe_path.display(),
            "Candidate not present"
        );
    }

    info!(
        target: "venv_launch::discovery",
        program = %section.system,
        "No local virtual environment found; falling back to system interpreter"
    );
    InterpreterSource::SystemFallback {
        program: section.system.clone(),
    }
}
