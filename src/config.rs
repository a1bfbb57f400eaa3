//! Configuration System
//!
//! Dashboard settings (DOM contract, endpoint, currency, palette) plus the
//! preview server and its logging. Loaded from TOML; the preview server also
//! honours `BANKDASH_*` environment overrides. The dashboard section never
//! reads the environment.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::charts::spec::{default_palette, PaletteColor};
use crate::format::CURRENCY_SYMBOL;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub preview: PreviewConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Browser-side dashboard settings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Aggregate-data endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Paths that count as the dashboard route
    #[serde(default = "default_dashboard_paths")]
    pub dashboard_paths: Vec<String>,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default)]
    pub elements: ElementIds,

    /// Chart colours, cycled by category index
    #[serde(default = "default_palette")]
    pub palette: Vec<PaletteColor>,
}

fn default_endpoint() -> String {
    "/api/chart-data".to_string()
}

fn default_dashboard_paths() -> Vec<String> {
    vec!["/".to_string(), String::new()]
}

fn default_currency_symbol() -> String {
    CURRENCY_SYMBOL.to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            dashboard_paths: default_dashboard_paths(),
            currency_symbol: default_currency_symbol(),
            elements: ElementIds::default(),
            palette: default_palette(),
        }
    }
}

/// DOM contract with the host page
#[derive(Debug, Clone, Deserialize)]
pub struct ElementIds {
    #[serde(default = "default_account_type_chart")]
    pub account_type_chart: String,

    #[serde(default = "default_owner_chart")]
    pub owner_chart: String,

    #[serde(default = "default_frn_chart")]
    pub frn_chart: String,

    /// Class marking elements whose text is a currency amount
    #[serde(default = "default_currency_class")]
    pub currency_class: String,

    /// Selector for the footer text holding the year
    #[serde(default = "default_footer_selector")]
    pub footer_selector: String,

    /// Class toggled by the collapsible helper
    #[serde(default = "default_hidden_class")]
    pub hidden_class: String,
}

fn default_account_type_chart() -> String {
    "accountTypeChart".to_string()
}

fn default_owner_chart() -> String {
    "ownerChart".to_string()
}

fn default_frn_chart() -> String {
    "frnChart".to_string()
}

fn default_currency_class() -> String {
    "currency-display".to_string()
}

fn default_footer_selector() -> String {
    ".footer .text-muted".to_string()
}

fn default_hidden_class() -> String {
    "d-none".to_string()
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            account_type_chart: default_account_type_chart(),
            owner_chart: default_owner_chart(),
            frn_chart: default_frn_chart(),
            currency_class: default_currency_class(),
            footer_selector: default_footer_selector(),
            hidden_class: default_hidden_class(),
        }
    }
}

impl ElementIds {
    /// Mount point id for a chart slot
    pub fn chart_id(&self, slot: crate::charts::ChartSlot) -> &str {
        use crate::charts::ChartSlot;
        match slot {
            ChartSlot::AccountType => &self.account_type_chart,
            ChartSlot::Owner => &self.owner_chart,
            ChartSlot::Institution => &self.frn_chart,
        }
    }
}

/// Preview server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory with the host page and the built wasm bundle
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Aggregate payload served at the chart-data endpoint
    #[serde(default = "default_fixture_path")]
    pub fixture_path: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8086
}

fn default_static_dir() -> String {
    "./static".to_string()
}

fn default_fixture_path() -> String {
    "./fixtures/chart-data.json".to_string()
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            fixture_path: default_fixture_path(),
        }
    }
}

impl PreviewConfig {
    /// Bind address
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            origin: "<inline>".to_string(),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            origin: path.display().to_string(),
            error: e.to_string(),
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Defaults with environment variable overrides
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Apply `BANKDASH_*` overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`. Only preview and logging settings can be
    /// overridden.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("BANKDASH_PREVIEW_HOST") {
            self.preview.host = host;
        }
        if let Some(port) = lookup("BANKDASH_PREVIEW_PORT") {
            match port.parse() {
                Ok(p) => self.preview.port = p,
                Err(_) => tracing::warn!("Ignoring invalid BANKDASH_PREVIEW_PORT: {}", port),
            }
        }
        if let Some(dir) = lookup("BANKDASH_STATIC_DIR") {
            self.preview.static_dir = dir;
        }
        if let Some(path) = lookup("BANKDASH_FIXTURE") {
            self.preview.fixture_path = path;
        }

        if let Some(level) = lookup("BANKDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("BANKDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Reject settings the dashboard cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dashboard.validate()
    }
}

impl DashboardConfig {
    /// Parse the dashboard settings as a document of their own (keys at the
    /// top level), the form handed to the browser crate
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            origin: "<dashboard>".to_string(),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must not be empty".to_string()));
        }
        if self.endpoint.is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config {origin}: {error}")]
    Parse { origin: String, error: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Bankdash Configuration
#
# Environment variables override the preview and logging settings:
# - BANKDASH_PREVIEW_HOST
# - BANKDASH_PREVIEW_PORT
# - BANKDASH_STATIC_DIR
# - BANKDASH_FIXTURE
# - BANKDASH_LOG_LEVEL
# - BANKDASH_LOG_FORMAT

[dashboard]
# Aggregate-data endpoint
endpoint = "/api/chart-data"

# Paths treated as the dashboard route
dashboard_paths = ["/", ""]

# Currency symbol for tooltips, ticks and currency displays
currency_symbol = "£"

[dashboard.elements]
account_type_chart = "accountTypeChart"
owner_chart = "ownerChart"
frn_chart = "frnChart"
currency_class = "currency-display"
footer_selector = ".footer .text-muted"
hidden_class = "d-none"

[preview]
# Preview server host
host = "127.0.0.1"

# Preview server port
port = 8086

# Host page and built wasm bundle
static_dir = "./static"

# Aggregate payload served at the chart-data endpoint
fixture_path = "./fixtures/chart-data.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json
format = "pretty"
"#
    .to_string()
}
