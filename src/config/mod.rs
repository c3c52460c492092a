use crate::models::{DEFAULT_THEME, MAX_TIMEOUT, Palette, ThemeRegistry};
use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::time::Duration;

/// Prefix of every environment variable the server reads (`HITL_THEME`, ...)
pub const ENV_PREFIX: &str = "HITL";

/// Startup settings.
///
/// Read once from `HITL_*` environment variables; anything not set falls back
/// to the defaults below.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Theme active when the server starts
    pub theme: String,

    /// Minimum dialog width in logical pixels
    pub dialog_width: u32,

    /// Minimum dialog height in logical pixels
    pub dialog_height: u32,

    /// Default request timeout in seconds
    pub timeout_secs: u64,

    pub debug: bool,

    /// Directory for daily-rotated log files; no file logging when unset
    pub log_dir: Option<Utf8PathBuf>,

    pub log_json: bool,

    /// YAML file with extra palettes (`name: {bg: ..., fg: ...}`)
    pub themes_file: Option<Utf8PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            dialog_width: 450,
            dialog_height: 250,
            timeout_secs: 300,
            debug: false,
            log_dir: None,
            log_json: false,
            themes_file: None,
        }
    }
}

impl Settings {
    /// Load settings from the process environment
    pub fn load() -> Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings from an explicit variable map instead of the process
    /// environment. Keys use the full variable name (`HITL_THEME`).
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn from_environment(env: Environment) -> Result<Self> {
        let defaults = Self::default();

        let settings: Settings = Config::builder()
            .set_default("theme", defaults.theme)?
            .set_default("dialog_width", defaults.dialog_width)?
            .set_default("dialog_height", defaults.dialog_height)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("debug", defaults.debug)?
            .set_default("log_json", defaults.log_json)?
            .add_source(env.try_parsing(true))
            .build()
            .context("Failed to read HITL_* environment")?
            .try_deserialize()
            .context("Invalid HITL_* setting")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values no dialog could work with
    pub fn validate(&self) -> Result<()> {
        if self.dialog_width == 0 || self.dialog_height == 0 {
            bail!(
                "Dialog size must be non-zero (got {}x{})",
                self.dialog_width,
                self.dialog_height
            );
        }
        if self.timeout_secs == 0 {
            bail!("HITL_TIMEOUT_SECS must be greater than zero");
        }
        if self.timeout_secs > MAX_TIMEOUT.as_secs() {
            bail!(
                "HITL_TIMEOUT_SECS must not exceed {} (got {})",
                MAX_TIMEOUT.as_secs(),
                self.timeout_secs
            );
        }
        Ok(())
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Built-in themes plus any from `themes_file`, with `theme` checked
    /// against the result
    pub fn theme_registry(&self) -> Result<ThemeRegistry> {
        let mut registry = ThemeRegistry::builtin();

        if let Some(path) = &self.themes_file {
            let extra = load_theme_file(path)?;
            tracing::info!("Loaded {} theme(s) from {}", extra.len(), path);
            registry
                .extend(extra)
                .with_context(|| format!("Invalid theme in {}", path))?;
        }

        registry
            .require(&self.theme)
            .context("HITL_THEME does not name a registered theme")?;
        Ok(registry)
    }
}

/// Read a YAML mapping of theme name to palette
pub fn load_theme_file(path: &Utf8Path) -> Result<IndexMap<String, Palette>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read themes file: {}", path))?;

    let themes: IndexMap<String, Palette> = serde_yaml_ng::from_str(&contents)
        .with_context(|| format!("Failed to parse themes file: {}", path))?;

    Ok(themes)
}
