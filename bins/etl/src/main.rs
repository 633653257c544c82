//! Ledgerstar ETL
//!
//! Builds the star-schema analytics model from the financial and audit CSVs.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use ledgerstar_core::etl::{EtlPipeline, JoinPolicy};
use ledgerstar_io::{CsvTableSource, ModelWriter};
use ledgerstar_shared::{AppConfig, AppError, AppResult, OutputFormat, init_tracing};

#[derive(Parser)]
#[command(name = "etl")]
#[command(about = "Run the analytics ETL pipeline")]
#[command(version)]
struct Cli {
    /// Path to the financial CSV source
    #[arg(long)]
    financial_csv: Option<PathBuf>,

    /// Path to the audit CSV source
    #[arg(long)]
    audit_csv: Option<PathBuf>,

    /// Directory for the dimensional model outputs
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Output format of the model tables: parquet or csv
    #[arg(long)]
    output_format: Option<OutputFormat>,

    /// Fail when a transaction has no matching dimension member
    #[arg(long)]
    strict_joins: bool,

    /// Extra configuration file layered over config/default
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(cli: Cli, config: AppConfig) -> AppResult<()> {
    let settings = config.etl;
    let financial_csv = cli.financial_csv.unwrap_or(settings.financial_csv);
    let audit_csv = cli.audit_csv.unwrap_or(settings.audit_csv);
    let output_dir = cli.output_dir.unwrap_or(settings.output_dir);
    let output_format = cli.output_format.unwrap_or(settings.output_format);
    let join_policy = JoinPolicy::from_strict(cli.strict_joins || settings.strict_joins);

    info!(
        financial = %financial_csv.display(),
        audit = %audit_csv.display(),
        format = %output_format,
        ?join_policy,
        "Starting ETL"
    );

    let mut writer = ModelWriter::create(&output_dir, output_format)?;
    let summary = EtlPipeline::new(
        CsvTableSource::new(financial_csv),
        CsvTableSource::new(audit_csv),
    )
    .with_join_policy(join_policy)
    .run(&mut writer)?;

    for (table, rows) in &summary.rows {
        info!(table = %table, rows, "Loaded");
    }
    info!("ETL completed. Model files saved in: {}", summary.location);
    Ok(())
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match AppConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let err = AppError::from(err);
            eprintln!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };
    if let Err(err) = init_tracing(&config.logging) {
        eprintln!("{err}");
        return ExitCode::from(err.exit_code());
    }

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.error_code(), %err, "ETL failed");
            ExitCode::from(err.exit_code())
        }
    }
}
