use std::path::Path;

use serde::Deserialize;

use crate::{cli::Role, lib::errors::ConfigError};

pub const DEFAULT_SERVER_MODULE: &str = "server.app";
pub const DEFAULT_CLIENT_MODULE: &str = "client.app_main";

/// Entry module per role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolesSection {
    pub server: String,
    pub client: String,
}

impl Default for RolesSection {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER_MODULE.to_string(),
            client: DEFAULT_CLIENT_MODULE.to_string(),
        }
    }
}

impl RolesSection {
    pub fn module_for(&self, role: Role) -> &str {
        match role {
            Role::Server => &self.server,
            Role::Client => &self.client,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawRolesSection {
    pub server: Option<String>,
    pub client: Option<String>,
}

pub fn parse_roles_section(
    raw: Option<RawRolesSection>,
    path: &Path,
) -> Result<RolesSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let server = raw
        .server
        .unwrap_or_else(|| DEFAULT_SERVER_MODULE.to_string());
    validate_module(&server, "roles.server", path)?;
    let client = raw
        .client
        .unwrap_or_else(|| DEFAULT_CLIENT_MODULE.to_string());
    validate_module(&client, "roles.client", path)?;

    Ok(RolesSection { server, client })
}

/// Module identifiers are passed verbatim after `-m`.
fn validate_module(module: &str, field: &'static str, path: &Path) -> Result<(), ConfigError> {
    if !module.is_empty() && !module.chars().any(char::is_whitespace) {
        return Ok(());
    }

    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field,
        message: "Use a non-empty module name without whitespace, e.g. `server.app`".into(),
    })
}
