//! Entry point for venv-launch.
use std::process::ExitCode;

fn main() -> ExitCode {
    venv_launch::cli::main_entry()
}
