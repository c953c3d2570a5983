//! Telemetry initialization and launch span helpers.

use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format developer logs on stderr.
///
/// Defaults to `warn` so the launched program's output is not interleaved with
/// launcher logs unless `RUST_LOG` asks for them.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper to record start and finish of one launch.
pub struct LaunchSpan {
    span: Span,
    started_at: Instant,
    run_id: Uuid,
}

impl LaunchSpan {
    /// Start a launch span.
    pub fn start(role: &str, module: &str) -> Self {
        let run_id = Uuid::new_v4();
        let span = info_span!(
            target: "venv_launch::runtime",
            "launch",
            %run_id,
            role,
            module
        );
        Self {
            span,
            started_at: Instant::now(),
            run_id,
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Close the span while recording the chosen source and exit code.
    pub fn finish(self, source: &'static str, exit_code: i32) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "venv_launch::runtime",
            run_id = %self.run_id,
            source,
            exit_code,
            elapsed_ms = elapsed_ms,
            "Launched program exited"
        );
    }
}
