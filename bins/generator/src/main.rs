//! Ledgerstar dataset generator
//!
//! Writes a synthetic financial transactions CSV and its audit-journal CSV.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info};

use ledgerstar_core::generator::{DatasetGenerator, GeneratorParams};
use ledgerstar_io::write_records;
use ledgerstar_shared::{AppConfig, AppError, AppResult, init_tracing};

#[derive(Parser)]
#[command(name = "generator")]
#[command(about = "Generate synthetic enterprise financial and audit datasets")]
#[command(version)]
struct Cli {
    /// Number of financial rows (default from config: 150000)
    #[arg(long)]
    rows: Option<usize>,

    /// Seed for the pseudo-random source (default from config: 42)
    #[arg(long)]
    seed: Option<u64>,

    /// Output path of the financial CSV
    #[arg(long)]
    financial_out: Option<PathBuf>,

    /// Output path of the audit-journal CSV
    #[arg(long)]
    audit_out: Option<PathBuf>,

    /// Extra configuration file layered over config/default
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(cli: Cli, config: &AppConfig) -> AppResult<()> {
    let mut params = GeneratorParams::from(&config.generator);
    if let Some(rows) = cli.rows {
        params.rows = rows;
    }
    let seed = cli.seed.unwrap_or(config.generator.seed);
    let financial_out = cli.financial_out.unwrap_or_else(|| {
        PathBuf::from(format!("Dynamics_NAV_Financials_{}_Enterprise.csv", params.rows))
    });
    let audit_out = cli.audit_out.unwrap_or_else(|| {
        PathBuf::from(format!("Dynamics_NAV_Audit_Journals_{}_Enterprise.csv", params.rows))
    });

    info!(rows = params.rows, seed, "Generating dataset");
    let mut rng = StdRng::seed_from_u64(seed);
    let dataset = DatasetGenerator::generate(&mut rng, &params)?;

    write_records(&financial_out, &dataset.financial)?;
    write_records(&audit_out, &dataset.audit)?;

    info!(
        financial = %financial_out.display(),
        audit = %audit_out.display(),
        "Datasets generated"
    );
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

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.error_code(), %err, "Generation failed");
            ExitCode::from(err.exit_code())
        }
    }
}
