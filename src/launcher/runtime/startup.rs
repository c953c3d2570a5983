use std::{
    env, io,
    path::PathBuf,
    process::{ExitCode, ExitStatus},
};

use anyhow::Error;
use serde_json::json;
use tokio::process::Child;
use tracing::{info, warn, Instrument};

use crate::{
    cli::{LaunchProfile, Role},
    launcher::{
        config::{LauncherConfig, PauseMode},
        discovery::{discover, FsProbe, InterpreterSource, PathProbe},
        runtime::{CommandPlan, ConsoleOperator, Interrupts, Operator, WorkingDirGuard},
    },
    lib::{
        errors::{LaunchError, Remediation},
        telemetry::LaunchSpan,
    },
};

/// Exit code when the selected interpreter does not exist.
pub const EXIT_NOT_FOUND: i32 = 127;
/// Exit code when the selected interpreter exists but could not be started.
pub const EXIT_CANNOT_EXECUTE: i32 = 126;
/// Offset added to a terminating signal number.
pub const EXIT_SIGNAL_BASE: i32 = 128;

/// Bundles a fatal launcher error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:#}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

/// Convert a launch status into a process exit code.
///
/// Statuses outside `0..=255` (only possible on Windows) collapse to a generic failure.
pub fn process_exit_code(code: i32) -> ExitCode {
    u8::try_from(code)
        .map(ExitCode::from)
        .unwrap_or(ExitCode::FAILURE)
}

/// Everything one launch needs, resolved ahead of time.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    pub role: Role,
    pub base_dir: PathBuf,
    pub config: LauncherConfig,
    pub pause: PauseMode,
}

impl LaunchRequest {
    pub fn module(&self) -> &str {
        self.config.roles.module_for(self.role)
    }
}

/// How the launched program ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildStatus {
    Exited(i32),
    Signaled(i32),
    NotStarted { not_found: bool, message: String },
}

impl ChildStatus {
    fn from_exit_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ChildStatus::Exited(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ChildStatus::Signaled(signal);
            }
        }
        ChildStatus::Exited(1)
    }

    fn from_spawn_error(err: &io::Error) -> Self {
        ChildStatus::NotStarted {
            not_found: err.kind() == io::ErrorKind::NotFound,
            message: err.to_string(),
        }
    }

    /// Status the launcher itself exits with.
    pub fn exit_code(&self) -> i32 {
        match self {
            ChildStatus::Exited(code) => *code,
            ChildStatus::Signaled(signal) => EXIT_SIGNAL_BASE + signal,
            ChildStatus::NotStarted { not_found: true, .. } => EXIT_NOT_FOUND,
            ChildStatus::NotStarted { .. } => EXIT_CANNOT_EXECUTE,
        }
    }
}

/// Result of one launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    pub source: InterpreterSource,
    pub status: ChildStatus,
    pub remediation_shown: bool,
}

impl LaunchOutcome {
    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }
}

/// Resolve an interpreter, run the role's module, and surface its status.
///
/// The caller's working directory is restored before this returns, on every path.
pub async fn launch(
    request: &LaunchRequest,
    probe: &impl PathProbe,
    operator: &mut impl Operator,
) -> Result<LaunchOutcome, LaunchError> {
    let module = request.module();
    let span = LaunchSpan::start(request.role.as_str(), module);
    let guard = WorkingDirGuard::enter(&request.base_dir)?;

    let source = discover(&request.base_dir, &request.config.interpreter, probe);
    println!("{}", source.describe());

    let plan = CommandPlan::build(&source, module, &request.base_dir, env::var_os("PATH"));
    let status = match run_child(&plan).instrument(span.span().clone()).await {
        Ok(status) => status,
        Err(err) => {
            guard.restore()?;
            return Err(err);
        }
    };

    let remediation_shown = source.is_system_fallback() && status.exit_code() != 0;
    if remediation_shown {
        let remediation = Remediation::for_system_fallback(
            request.role.as_str(),
            &request.config.interpreter.venv_dirs,
        );
        operator.show(&remediation);
        if request.pause.should_block(operator.stdin_is_terminal()) {
            if let Err(err) = operator.acknowledge().await {
                warn!(
                    target: "venv_launch::runtime",
                    reason = %err,
                    "Failed to read acknowledgment"
                );
            }
        }
    }

    guard.restore()?;
    span.finish(source.label(), status.exit_code());

    Ok(LaunchOutcome {
        source,
        status,
        remediation_shown,
    })
}

async fn run_child(plan: &CommandPlan) -> Result<ChildStatus, LaunchError> {
    info!(
        target: "venv_launch::runtime",
        program = %plan.display_program(),
        args = ?plan.args,
        current_dir = %plan.current_dir.display(),
        "Starting interpreter"
    );

    // Registered before the spawn so an early Ctrl-C cannot kill the launcher.
    let interrupts = match Interrupts::listen() {
        Ok(interrupts) => Some(interrupts),
        Err(err) => {
            warn!(
                target: "venv_launch::runtime",
                reason = %err,
                "Failed to listen for interrupts"
            );
            None
        }
    };

    let mut child = match plan.to_command().spawn() {
        Ok(child) => child,
        Err(err) => {
            warn!(
                target: "venv_launch::runtime",
                program = %plan.display_program(),
                reason = %err,
                "Interpreter could not be started"
            );
            eprintln!("Failed to start `{}`: {err}", plan.display_program());
            return Ok(ChildStatus::from_spawn_error(&err));
        }
    };

    let status = wait_through_interrupts(&mut child, interrupts)
        .await
        .map_err(|source| LaunchError::Wait {
            program: plan.display_program(),
            source,
        })?;
    Ok(ChildStatus::from_exit_status(status))
}

/// Wait for `child`, absorbing interrupts; the child receives them from the terminal itself.
async fn wait_through_interrupts(
    child: &mut Child,
    interrupts: Option<Interrupts>,
) -> io::Result<ExitStatus> {
    let Some(mut interrupts) = interrupts else {
        return child.wait().await;
    };

    loop {
        tokio::select! {
            status = child.wait() => return status,
            received = interrupts.recv() => {
                if received.is_none() {
                    return child.wait().await;
                }
                info!(
                    target: "venv_launch::runtime",
                    "Interrupt received; waiting for interpreter to exit"
                );
            }
        }
    }
}

/// Load configuration for `profile` and launch with the real console.
pub async fn run_profile(profile: LaunchProfile) -> Result<i32, RuntimeExit> {
    let config = LauncherConfig::load(&profile.config_location).map_err(RuntimeExit::from_error)?;
    let pause = profile.pause_override.unwrap_or(config.remediation.pause);
    let request = LaunchRequest {
        role: profile.role,
        base_dir: profile.base_dir,
        config,
        pause,
    };

    let outcome = launch(&request, &FsProbe, &mut ConsoleOperator)
        .await
        .map_err(RuntimeExit::from_error)?;
    Ok(outcome.exit_code())
}

/// Discovery-only view of what `run_profile` would execute.
pub fn probe_profile(profile: &LaunchProfile) -> Result<String, RuntimeExit> {
    let config = LauncherConfig::load(&profile.config_location).map_err(RuntimeExit::from_error)?;
    let module = config.roles.module_for(profile.role);
    let source = discover(&profile.base_dir, &config.interpreter, &FsProbe);
    let plan = CommandPlan::build(&source, module, &profile.base_dir, env::var_os("PATH"));

    let payload = json!({
        "role": profile.role.as_str(),
        "module": module,
        "base_dir": profile.base_dir.display().to_string(),
        "config_path": config.source_path.as_ref().map(|path| path.display().to_string()),
        "source": source,
        "command": plan.to_json(),
    });
    serde_json::to_string_pretty(&payload).map_err(RuntimeExit::from_error)
}
