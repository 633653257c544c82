//! Application configuration management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Dataset generator configuration.
    #[serde(default)]
    pub generator: GeneratorSettings,
    /// ETL pipeline configuration.
    #[serde(default)]
    pub etl: EtlSettings,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Dataset generator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorSettings {
    /// Number of financial rows to generate.
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Seed for the pseudo-random source.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// First possible posting date.
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    /// Number of days in the posting window.
    #[serde(default = "default_days")]
    pub days: u32,
    /// Group reporting currency code.
    #[serde(default = "default_group_currency")]
    pub group_currency: String,
    /// Share of rows turned into intercompany transactions, in percent.
    #[serde(default = "default_intercompany_percent")]
    pub intercompany_percent: u32,
}

fn default_rows() -> usize {
    150_000
}

fn default_seed() -> u64 {
    42
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

fn default_days() -> u32 {
    365
}

fn default_group_currency() -> String {
    "USD".to_string()
}

fn default_intercompany_percent() -> u32 {
    5
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            seed: default_seed(),
            start_date: default_start_date(),
            days: default_days(),
            group_currency: default_group_currency(),
            intercompany_percent: default_intercompany_percent(),
        }
    }
}

/// ETL pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EtlSettings {
    /// Financial transactions CSV source.
    #[serde(default = "default_financial_csv")]
    pub financial_csv: PathBuf,
    /// Audit journal CSV source.
    #[serde(default = "default_audit_csv")]
    pub audit_csv: PathBuf,
    /// Directory receiving the `model` subdirectory.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// File format of the model tables.
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Fail the run when a fact row has no matching dimension row.
    #[serde(default)]
    pub strict_joins: bool,
}

fn default_financial_csv() -> PathBuf {
    PathBuf::from("Dynamics_NAV_Financials_150000_Enterprise.csv")
}

fn default_audit_csv() -> PathBuf {
    PathBuf::from("Dynamics_NAV_Audit_Journals_150000_Enterprise.csv")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("analytics_output")
}

impl Default for EtlSettings {
    fn default() -> Self {
        Self {
            financial_csv: default_financial_csv(),
            audit_csv: default_audit_csv(),
            output_dir: default_output_dir(),
            output_format: OutputFormat::default(),
            strict_joins: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// File format for the analytics model tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Columnar Parquet files.
    #[default]
    Parquet,
    /// Comma-separated text files.
    Csv,
}

impl OutputFormat {
    /// File extension for this format, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "parquet" => Ok(Self::Parquet),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unsupported output format: {other}")),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration, layering an explicit file over the defaults.
    ///
    /// Order: `config/default`, `config/<RUN_MODE>`, `extra_file`, then
    /// `LEDGERSTAR__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing or any source is malformed.
    pub fn load_from(extra_file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("LEDGERSTAR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
