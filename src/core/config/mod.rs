//! Configuration types and management for namewise.
//!
//! Configuration is layered: built-in defaults, then an optional YAML file,
//! then `NAMEWISE_*` environment variables. The CLI applies its own flags on
//! top of the result.

pub mod validation;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::errors::{NamewiseError, Result};

pub use validation::{
    validate_http_url, validate_non_empty, validate_positive_u64, validate_range_f32,
};

/// Environment variable holding the inference service API key.
pub const ENV_API_KEY: &str = "NAMEWISE_API_KEY";
/// Environment variable overriding the inference service endpoint.
pub const ENV_API_URL: &str = "NAMEWISE_API_URL";
/// Environment variable overriding the model identifier.
pub const ENV_MODEL: &str = "NAMEWISE_MODEL";

/// File names probed in the working directory when no `--config` is given.
pub const IMPLICIT_CONFIG_FILES: &[&str] = &[".namewise.yml", ".namewise.yaml"];

/// Main configuration for namewise
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamewiseConfig {
    /// Inference service settings
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Rename execution settings
    #[serde(default)]
    pub rename: RenameConfig,

    /// Session and history settings
    #[serde(default)]
    pub session: SessionConfig,
}

impl NamewiseConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            NamewiseError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        serde_yaml::from_str(&content).map_err(Into::into)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            NamewiseError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Build the effective configuration: defaults, optional file, environment.
    ///
    /// With `explicit == None` the working directory is probed for one of
    /// [`IMPLICIT_CONFIG_FILES`].
    pub fn load_layered(explicit: Option<&Path>) -> Result<Self> {
        let implicit = if explicit.is_none() {
            IMPLICIT_CONFIG_FILES
                .iter()
                .map(PathBuf::from)
                .find(|p| p.exists())
        } else {
            None
        };

        let mut config = match explicit.map(Path::to_path_buf).or(implicit) {
            Some(path) => {
                debug!("loading configuration from {}", path.display());
                Self::from_yaml_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Overlay values taken from `NAMEWISE_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = non_empty_env(ENV_API_KEY) {
            self.inference.api_key = key;
        }
        if let Some(url) = non_empty_env(ENV_API_URL) {
            self.inference.api_url = url;
        }
        if let Some(model) = non_empty_env(ENV_MODEL) {
            self.inference.model = model;
        }
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> Result<()> {
        self.inference.validate()?;
        self.rename.validate()?;
        Ok(())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Settings for the pattern inference service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Bearer token; usually supplied through `NAMEWISE_API_KEY`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    /// Chat-completions endpoint
    #[serde(default = "InferenceConfig::default_api_url")]
    pub api_url: String,

    /// Model identifier sent with every request
    #[serde(default = "InferenceConfig::default_model")]
    pub model: String,

    /// Sampling temperature; kept low so answers stay consistent
    #[serde(default = "InferenceConfig::default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "InferenceConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: Self::default_api_url(),
            model: Self::default_model(),
            temperature: Self::default_temperature(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

/// Default value providers for [`InferenceConfig`].
impl InferenceConfig {
    fn default_api_url() -> String {
        "https://api.openai.com/v1/chat/completions".to_string()
    }

    fn default_model() -> String {
        "gpt-3.5-turbo".to_string()
    }

    const fn default_temperature() -> f32 {
        0.3
    }

    const fn default_timeout_secs() -> u64 {
        30
    }

    /// Whether both a key and an endpoint are present.
    pub fn is_api_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.api_url.trim().is_empty()
    }

    /// Validate inference settings. The API key is checked at call time.
    pub fn validate(&self) -> Result<()> {
        validate_http_url(&self.api_url, "inference.api_url")?;
        validate_non_empty(&self.model, "inference.model")?;
        validate_range_f32(self.temperature, 0.0, 2.0, "inference.temperature")?;
        validate_positive_u64(self.timeout_secs, "inference.timeout_secs")?;
        Ok(())
    }
}

/// Settings for applying renames to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameConfig {
    /// Copy each source file into `backup_directory` before renaming it
    #[serde(default)]
    pub backup_originals: bool,

    /// Where backups go; relative paths resolve against each file's directory
    #[serde(default = "RenameConfig::default_backup_directory")]
    pub backup_directory: PathBuf,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            backup_originals: false,
            backup_directory: Self::default_backup_directory(),
        }
    }
}

impl RenameConfig {
    fn default_backup_directory() -> PathBuf {
        PathBuf::from("backup")
    }

    /// Validate rename settings
    pub fn validate(&self) -> Result<()> {
        if self.backup_originals && self.backup_directory.as_os_str().is_empty() {
            return Err(NamewiseError::config_field(
                "backup_directory must be set when backup_originals is enabled",
                "rename.backup_directory",
            ));
        }
        Ok(())
    }
}

/// Settings for the working session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum number of analysis results kept in history; 0 keeps everything
    #[serde(default)]
    pub max_history: usize,

    /// Session file used when the CLI gets no `--session`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
}

impl SessionConfig {
    /// Resolve the session file: configured path, else the platform data dir.
    pub fn resolve_session_file(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("namewise")
                .join("session.json")
        })
    }
}
