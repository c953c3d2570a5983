//! CLI entrypoint module structure.
use std::process::ExitCode;

use clap::Parser;

use crate::{
    launcher::runtime::{probe_profile, process_exit_code, run_profile, RuntimeExit},
    lib::telemetry,
};

pub mod args;
pub mod profile;

pub use args::{CliCommand, LaunchProfileArgs, ParsedCommand, ProbeArgs, RoleLauncherArgs};
pub use profile::{resolve_base_dir, resolve_config_location, LaunchProfile, Role};

/// Entry point of the `venv-launch` binary.
pub fn main_entry() -> ExitCode {
    match bootstrap_general() {
        Ok(code) => process_exit_code(code),
        Err(exit) => exit.report(),
    }
}

/// Entry point of the parameterless role binaries.
pub fn role_entry(role: Role) -> ExitCode {
    match bootstrap_role(role) {
        Ok(code) => process_exit_code(code),
        Err(exit) => exit.report(),
    }
}

fn bootstrap_general() -> Result<i32, RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let args = LaunchProfileArgs::parse();
    let command = args.into_command().map_err(RuntimeExit::from_error)?;

    match command {
        ParsedCommand::Launch(profile) => block_on_launch(profile),
        ParsedCommand::Probe(profile) => {
            let report = probe_profile(&profile)?;
            println!("{report}");
            Ok(0)
        }
    }
}

fn bootstrap_role(role: Role) -> Result<i32, RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let _args = RoleLauncherArgs::parse();
    let profile = LaunchProfile::for_role(role).map_err(RuntimeExit::from_error)?;
    block_on_launch(profile)
}

fn block_on_launch(profile: LaunchProfile) -> Result<i32, RuntimeExit> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(RuntimeExit::from_error)?;
    let result = runtime.block_on(run_profile(profile));
    // A prompt dismissed by Ctrl-C leaves a blocking stdin read behind.
    runtime.shutdown_background();
    result
}
