//! Parameterless launcher for the client role.
use std::process::ExitCode;

use venv_launch::cli::{role_entry, Role};

fn main() -> ExitCode {
    role_entry(Role::Client)
}
