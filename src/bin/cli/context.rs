//! Configuration and session loading shared by all commands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::cli::args::Cli;
use namewise::{NamewiseConfig, RenameSession};

/// Global options every command needs.
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub session: Option<PathBuf>,
}

impl From<&Cli> for GlobalOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            config: cli.config.clone(),
            session: cli.session.clone(),
        }
    }
}

/// Load the layered configuration for this run.
pub fn load_configuration(config_file: Option<&Path>) -> anyhow::Result<NamewiseConfig> {
    NamewiseConfig::load_layered(config_file).with_context(|| match config_file {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })
}

/// A session bound to the file it was read from.
pub struct SessionContext {
    pub config: NamewiseConfig,
    pub session: RenameSession,
    pub path: PathBuf,
}

impl SessionContext {
    /// Load configuration, then the session file if it exists.
    pub fn open(options: &GlobalOptions) -> anyhow::Result<Self> {
        let config = load_configuration(options.config.as_deref())?;
        Self::open_with(options, config)
    }

    /// Like [`open`](Self::open) with an already adjusted configuration.
    pub fn open_with(options: &GlobalOptions, config: NamewiseConfig) -> anyhow::Result<Self> {
        let path = options
            .session
            .clone()
            .unwrap_or_else(|| config.session.resolve_session_file());

        let mut session = RenameSession::from_config(&config)?;
        if path.exists() {
            session
                .load(&path)
                .with_context(|| format!("Failed to load session from {}", path.display()))?;
        } else {
            debug!("no session at {}, starting fresh", path.display());
        }

        Ok(Self {
            config,
            session,
            path,
        })
    }

    /// Write the session back to its file.
    pub fn save(&self) -> anyhow::Result<()> {
        self.session
            .save(&self.path)
            .with_context(|| format!("Failed to save session to {}", self.path.display()))
    }
}
