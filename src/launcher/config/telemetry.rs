use tracing::{debug, info};

use super::{LauncherConfig, CONFIG_ENV_KEY};

pub fn log_defaults(path: &std::path::Path) {
    debug!(
        target: "venv_launch::config",
        path = %path.display(),
        env = CONFIG_ENV_KEY,
        "No launcher configuration found; using built-in defaults"
    );
}

pub fn log_loaded(config: &LauncherConfig) {
    info!(
        target: "venv_launch::config",
        path = %config
            .source_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
        venv_dirs = ?config.interpreter.venv_dirs,
        system_interpreter = %config.interpreter.system,
        server_module = %config.roles.server,
        client_module = %config.roles.client,
        pause = config.remediation.pause.as_str(),
        "Configuration file loaded successfully"
    );
}
