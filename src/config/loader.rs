//! Configuration Loader
//!
//! Environment-aware configuration loading. Handles TOML file discovery,
//! environment detection, and layering of environment variable overrides.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{Config, Environment, File, FileFormat};
use tracing::{debug, info};

use super::error::{ConfigResult, ConfigurationError};
use super::SuiteConfig;
use crate::constants::system;

const BASE_FILE_STEM: &str = "blogsuite";
const ENV_PREFIX: &str = "BLOGSUITE";
const ENV_SEPARATOR: &str = "__";

/// Loaded, validated configuration together with where it came from
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: SuiteConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment.
    /// Lets tests pick an environment without touching process variables.
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(|| PathBuf::from("config"));
        Self::load_layered(config_directory, environment, Self::environment_source())
    }

    /// Load a single explicitly named file, still honouring environment variables.
    ///
    /// Unlike directory discovery, a missing file is an error here.
    pub fn load_from_path(path: &Path) -> ConfigResult<Arc<ConfigManager>> {
        if !path.is_file() {
            return Err(ConfigurationError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let environment = Self::detect_environment();
        debug!(path = %path.display(), environment = %environment, "Loading configuration file");

        let config: SuiteConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Self::environment_source())
            .build()?
            .try_deserialize()?;

        config.validate()?;

        let config_directory = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Arc::new(ConfigManager {
            config,
            environment,
            config_directory,
        }))
    }

    /// Wrap an in-memory configuration, validating it first
    pub fn from_config(config: SuiteConfig) -> ConfigResult<Arc<ConfigManager>> {
        config.validate()?;
        Ok(Arc::new(ConfigManager {
            config,
            environment: Self::detect_environment(),
            config_directory: PathBuf::from("config"),
        }))
    }

    pub(crate) fn load_layered(
        config_directory: PathBuf,
        environment: &str,
        env_source: Environment,
    ) -> ConfigResult<Arc<ConfigManager>> {
        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let base_file = config_directory.join(format!("{BASE_FILE_STEM}.toml"));
        let env_file = config_directory.join(format!("{BASE_FILE_STEM}.{environment}.toml"));

        let config: SuiteConfig = Config::builder()
            .add_source(File::from(base_file.as_path()).format(FileFormat::Toml).required(false))
            .add_source(File::from(env_file.as_path()).format(FileFormat::Toml).required(false))
            .add_source(env_source)
            .build()?
            .try_deserialize()?;

        config.validate()?;

        info!(
            environment = %environment,
            max_retries = config.agent.max_retries,
            max_concurrent_agents = config.orchestration.max_concurrent_agents,
            phases = config.orchestration.phases.len(),
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    fn environment_source() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Detect the current environment from environment variables
    pub fn detect_environment() -> String {
        env::var("BLOGSUITE_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| system::DEFAULT_ENVIRONMENT.to_string())
            .to_lowercase()
    }
}
