use std::{env, io, path::Path};

use anyhow::Result;

use venv_launch::{
    cli::Role,
    launcher::{
        config::{InterpreterSection, LauncherConfig, PauseMode},
        discovery::{FsProbe, InterpreterSource},
        runtime::{launch, ChildStatus, LaunchOutcome, LaunchRequest, Operator, EXIT_NOT_FOUND},
    },
    lib::errors::{LaunchError, Remediation},
};

use crate::common::{serial, Project};

#[derive(Default)]
struct RecordingOperator {
    terminal: bool,
    shown: Vec<Remediation>,
    acknowledged: usize,
}

impl Operator for RecordingOperator {
    fn stdin_is_terminal(&self) -> bool {
        self.terminal
    }

    fn show(&mut self, remediation: &Remediation) {
        self.shown.push(remediation.clone());
    }

    async fn acknowledge(&mut self) -> io::Result<()> {
        self.acknowledged += 1;
        Ok(())
    }
}

fn request(project: &Project, role: Role, system: &Path, pause: PauseMode) -> LaunchRequest {
    LaunchRequest {
        role,
        base_dir: project.root().to_path_buf(),
        config: LauncherConfig {
            interpreter: InterpreterSection {
                system: system.display().to_string(),
                ..InterpreterSection::default()
            },
            ..LauncherConfig::default()
        },
        pause,
    }
}

async fn launch_restoring_cwd(
    request: &LaunchRequest,
    operator: &mut RecordingOperator,
) -> Result<LaunchOutcome> {
    let before = env::current_dir()?;
    let outcome = launch(request, &FsProbe, operator).await;
    assert_eq!(
        env::current_dir()?,
        before,
        "working directory must be restored"
    );
    Ok(outcome?)
}

#[tokio::test]
async fn first_activation_wins_when_everything_exists() -> Result<()> {
    let _serial = serial();
    let project = Project::new()?;
    project.add_activation(".venv")?;
    project.add_interpreter(".venv", 0)?;
    project.add_activation("venv")?;
    project.add_interpreter("venv", 0)?;
    let system = project.add_system_interpreter(0)?;

    let mut operator = RecordingOperator::default();
    let outcome = launch_restoring_cwd(
        &request(&project, Role::Server, &system, PauseMode::Never),
        &mut operator,
    )
    .await?;

    match &outcome.source {
        InterpreterSource::Activation { venv_name, .. } => assert_eq!(venv_name, ".venv"),
        other => panic!("Unexpected source: {other:?}"),
    }
    assert_eq!(outcome.exit_code(), 0);
    assert!(!outcome.remediation_shown);
    assert!(operator.shown.is_empty());
    Ok(())
}

#[tokio::test]
async fn second_activation_propagates_child_failure_without_remediation() -> Result<()> {
    let _serial = serial();
    let project = Project::new()?;
    project.add_activation("venv")?;
    project.add_interpreter("venv", 3)?;
    let system = project.add_system_interpreter(0)?;

    let mut operator = RecordingOperator::default();
    let outcome = launch_restoring_cwd(
        &request(&project, Role::Client, &system, PauseMode::Always),
        &mut operator,
    )
    .await?;

    match &outcome.source {
        InterpreterSource::Activation { venv_name, .. } => assert_eq!(venv_name, "venv"),
        other => panic!("Unexpected source: {other:?}"),
    }
    assert_eq!(outcome.status, ChildStatus::Exited(3));
    assert!(!outcome.remediation_shown);
    assert_eq!(operator.acknowledged, 0);
    Ok(())
}

#[tokio::test]
async fn interpreter_without_activation_runs_directly() -> Result<()> {
    let _serial = serial();
    let project = Project::new()?;
    let interpreter = project.add_interpreter(".venv", 5)?;
    let system = project.add_system_interpreter(0)?;

    let mut operator = RecordingOperator::default();
    let outcome = launch_restoring_cwd(
        &request(&project, Role::Server, &system, PauseMode::Always),
        &mut operator,
    )
    .await?;

    assert_eq!(
        outcome.source,
        InterpreterSource::Direct {
            venv_name: ".venv".into(),
            interpreter,
        }
    );
    assert_eq!(outcome.exit_code(), 5);
    assert!(operator.shown.is_empty());
    Ok(())
}

#[tokio::test]
async fn system_fallback_success_prints_no_remediation() -> Result<()> {
    let _serial = serial();
    let project = Project::new()?;
    let system = project.add_system_interpreter(0)?;

    let mut operator = RecordingOperator::default();
    let outcome = launch_restoring_cwd(
        &request(&project, Role::Server, &system, PauseMode::Always),
        &mut operator,
    )
    .await?;

    assert!(outcome.source.is_system_fallback());
    assert_eq!(outcome.exit_code(), 0);
    assert!(!outcome.remediation_shown);
    assert_eq!(operator.acknowledged, 0);
    Ok(())
}

#[tokio::test]
async fn system_fallback_failure_shows_remediation_and_waits() -> Result<()> {
    let _serial = serial();
    let project = Project::new()?;
    let system = project.add_system_interpreter(2)?;

    let mut operator = RecordingOperator::default();
    let outcome = launch_restoring_cwd(
        &request(&project, Role::Server, &system, PauseMode::Always),
        &mut operator,
    )
    .await?;

    assert_eq!(outcome.exit_code(), 2);
    assert!(outcome.remediation_shown);
    assert_eq!(
        operator.shown,
        vec![Remediation::for_system_fallback(
            "server",
            &[".venv".to_string(), "venv".to_string()]
        )]
    );
    assert_eq!(operator.acknowledged, 1);
    Ok(())
}

#[tokio::test]
async fn auto_pause_does_not_block_without_terminal() -> Result<()> {
    let _serial = serial();
    let project = Project::new()?;
    let system = project.add_system_interpreter(9)?;

    let mut operator = RecordingOperator {
        terminal: false,
        ..RecordingOperator::default()
    };
    let outcome = launch_restoring_cwd(
        &request(&project, Role::Client, &system, PauseMode::Auto),
        &mut operator,
    )
    .await?;

    assert_eq!(outcome.exit_code(), 9);
    assert_eq!(operator.shown.len(), 1);
    assert_eq!(operator.acknowledged, 0);
    Ok(())
}

#[tokio::test]
async fn missing_system_interpreter_is_not_found_with_remediation() -> Result<()> {
    let _serial = serial();
    let project = Project::new()?;
    let missing = project.root().join("no-such-dir").join("python");

    let mut operator = RecordingOperator {
        terminal: true,
        ..RecordingOperator::default()
    };
    let outcome = launch_restoring_cwd(
        &request(&project, Role::Server, &missing, PauseMode::Auto),
        &mut operator,
    )
    .await?;

    assert!(matches!(
        outcome.status,
        ChildStatus::NotStarted {
            not_found: true,
            ..
        }
    ));
    assert_eq!(outcome.exit_code(), EXIT_NOT_FOUND);
    assert!(outcome.remediation_shown);
    assert_eq!(operator.acknowledged, 1);
    Ok(())
}

#[tokio::test]
async fn missing_base_dir_fails_before_any_launch() -> Result<()> {
    let _serial = serial();
    let project = Project::new()?;
    let system = project.add_system_interpreter(0)?;
    let mut request = request(&project, Role::Server, &system, PauseMode::Never);
    request.base_dir = project.root().join("missing");

    let before = env::current_dir()?;
    let mut operator = RecordingOperator::default();
    let error = launch(&request, &FsProbe, &mut operator)
        .await
        .expect_err("missing base dir must fail");

    assert!(matches!(error, LaunchError::ChangeDir { .. }));
    assert_eq!(env::current_dir()?, before);
    assert!(operator.shown.is_empty());
    Ok(())
}
