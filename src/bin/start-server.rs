//! Parameterless launcher for the server role.
use std::process::ExitCode;

use venv_launch::cli::{role_entry, Role};

fn main() -> ExitCode {
    role_entry(Role::Server)
}
