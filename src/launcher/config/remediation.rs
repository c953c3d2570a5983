use clap::ValueEnum;
use serde::Deserialize;

/// When to wait for the operator after printing remediation text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PauseMode {
    /// Wait only when stdin is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl PauseMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PauseMode::Auto => "auto",
            PauseMode::Always => "always",
            PauseMode::Never => "never",
        }
    }

    /// Resolve the mode against whether stdin is interactive.
    pub fn should_block(&self, stdin_is_terminal: bool) -> bool {
        match self {
            PauseMode::Auto => stdin_is_terminal,
            PauseMode::Always => true,
            PauseMode::Never => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemediationSection {
    pub pause: PauseMode,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawRemediationSection {
    pub pause: Option<PauseMode>,
}

pub fn parse_remediation_section(raw: Option<RawRemediationSection>) -> RemediationSection {
    RemediationSection {
        pause: raw.and_then(|raw| raw.pause).unwrap_or_default(),
    }
}
