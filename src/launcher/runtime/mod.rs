//! Launch sequence: working directory scope, child invocation, and status propagation.
mod command;
mod interrupt;
mod operator;
mod startup;
mod workdir;

pub use command::CommandPlan;
pub use interrupt::Interrupts;
pub use operator::{ConsoleOperator, Operator};
pub use startup::{
    launch, probe_profile, process_exit_code, run_profile, ChildStatus, LaunchOutcome,
    LaunchRequest, RuntimeExit, EXIT_CANNOT_EXECUTE, EXIT_NOT_FOUND, EXIT_SIGNAL_BASE,
};
pub use workdir::WorkingDirGuard;

/// Serializes tests that change the process working directory.
#[cfg(test)]
pub(crate) static CWD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
