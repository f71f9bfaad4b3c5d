//! Layered configuration loading.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{
    ConfigError, DEFAULT_BASE_URL, DEFAULT_BASIC_PASSWORD, DEFAULT_BASIC_USERNAME,
    DEFAULT_BEARER_TOKEN, SuiteConfig, parse_base_url,
};
use crate::adapters::DEFAULT_USER_AGENT;

/// Prefix of every environment variable the loader reads.
pub const ENV_PREFIX: &str = "STUBPROBE_";

/// One configuration layer. Every key is optional; set keys win over lower
/// layers.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Stub base URL.
    pub base_url: Option<String>,
    /// Bearer token.
    pub bearer_token: Option<String>,
    /// Basic auth user.
    pub basic_username: Option<String>,
    /// Basic auth password.
    pub basic_password: Option<String>,
    /// Request timeout in milliseconds; `0` means no explicit timeout.
    pub timeout_ms: Option<u64>,
    /// User agent.
    pub user_agent: Option<String>,
}

impl ConfigFile {
    fn merge(&mut self, upper: Self) {
        fn take<T>(lower: &mut Option<T>, upper: Option<T>) {
            if upper.is_some() {
                *lower = upper;
            }
        }
        take(&mut self.base_url, upper.base_url);
        take(&mut self.bearer_token, upper.bearer_token);
        take(&mut self.basic_username, upper.basic_username);
        take(&mut self.basic_password, upper.basic_password);
        take(&mut self.timeout_ms, upper.timeout_ms);
        take(&mut self.user_agent, upper.user_agent);
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// `--base-url`
    pub base_url: Option<String>,
    /// `--timeout-ms`
    pub timeout_ms: Option<u64>,
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Builds a [`SuiteConfig`] from defaults, file, environment and overrides.
pub struct ConfigLoader<E = fn(&str) -> Option<String>> {
    env: E,
}

impl ConfigLoader {
    /// Reads environment variables from the current process.
    #[must_use]
    pub fn from_process_env() -> Self {
        Self { env: process_env }
    }
}

impl<E> ConfigLoader<E>
where
    E: Fn(&str) -> Option<String>,
{
    /// Uses `env` to look up `STUBPROBE_*` variables.
    pub const fn with_env(env: E) -> Self {
        Self { env }
    }

    /// Resolves the configuration.
    ///
    /// # Errors
    /// - Returns error if the file cannot be read or parsed
    /// - Returns error if a numeric environment value does not parse
    /// - Returns error if the final base URL is invalid
    pub async fn load(
        &self,
        file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<SuiteConfig, ConfigError> {
        let mut layers = ConfigFile::default();
        if let Some(path) = file {
            layers.merge(Self::read_file(path).await?);
        }
        layers.merge(self.env_layer()?);
        layers.merge(ConfigFile {
            base_url: overrides.base_url.clone(),
            timeout_ms: overrides.timeout_ms,
            ..ConfigFile::default()
        });

        let base_url = parse_base_url(layers.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let config = SuiteConfig {
            base_url,
            bearer_token: layers
                .bearer_token
                .unwrap_or_else(|| DEFAULT_BEARER_TOKEN.to_string()),
            basic_username: layers
                .basic_username
                .unwrap_or_else(|| DEFAULT_BASIC_USERNAME.to_string()),
            basic_password: layers
                .basic_password
                .unwrap_or_else(|| DEFAULT_BASIC_PASSWORD.to_string()),
            timeout_ms: layers.timeout_ms.filter(|ms| *ms > 0),
            user_agent: layers
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        };
        debug!(base_url = %config.base_url, timeout_ms = ?config.timeout_ms, "configuration loaded");
        Ok(config)
    }

    /// Reads one YAML layer from disk.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not valid YAML.
    pub async fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn var(&self, name: &str) -> Option<String> {
        (self.env)(&format!("{ENV_PREFIX}{name}")).filter(|v| !v.is_empty())
    }

    fn env_layer(&self) -> Result<ConfigFile, ConfigError> {
        let timeout_ms = match self.var("TIMEOUT_MS") {
            Some(value) => Some(value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                name: format!("{ENV_PREFIX}TIMEOUT_MS"),
                value,
            })?),
            None => None,
        };

        Ok(ConfigFile {
            base_url: self.var("BASE_URL"),
            bearer_token: self.var("BEARER_TOKEN"),
            basic_username: self.var("BASIC_USER"),
            basic_password: self.var("BASIC_PASSWORD"),
            timeout_ms,
            user_agent: self.var("USER_AGENT"),
        })
    }
}
