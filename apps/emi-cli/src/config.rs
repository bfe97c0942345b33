//! Layered application configuration.
//!
//! Sources, later ones winning: built-in defaults, the YAML file given with
//! `--config`, `EMI__*` environment variables (`__` separates nested keys),
//! then command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use emi_calculator_sdk::CalculatorClientConfig;
use emi_form::DisplayConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Prefix of environment overrides, e.g. `EMI__CALCULATOR__BASE_URL`
pub const ENV_PREFIX: &str = "EMI__";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive when neither `RUST_LOG` nor `-v` is given
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub calculator: CalculatorClientConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Values given on the command line that take precedence over every file
/// and environment source.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Load defaults, then the optional YAML file, then the environment.
    ///
    /// # Errors
    /// Returns an error if a source cannot be read or does not match the
    /// configuration schema.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)
            .extract()
            .context("failed to load configuration")
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn apply_cli_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(base_url) = &overrides.base_url {
            self.calculator.base_url.clone_from(base_url);
        }
    }

    /// Effective configuration as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to render configuration")
    }
}
