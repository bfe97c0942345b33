#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
mod config;
mod interactive;
mod logging;
mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use emi_calculator::OfflineCalculatorClient;
use emi_calculator_sdk::{EmiCalculatorClient, EmiHttpClient};
use emi_form::{CurrencyFormatter, FormController};

use crate::config::{AppConfig, CliOverrides};

/// EMI calculator - monthly installment and loan totals
#[derive(Parser)]
#[command(name = "emi")]
#[command(about = "EMI calculator - monthly installment and loan totals")]
#[command(version)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Calculation service base URL (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate once and print the result
    Calculate(CalculateArgs),
    /// Fill in the form line by line
    Interactive {
        /// Calculate in-process instead of calling the service
        #[arg(long)]
        offline: bool,
    },
    /// Validate configuration and exit
    Check,
}

#[derive(Args)]
struct CalculateArgs {
    /// Loan amount
    #[arg(long, allow_negative_numbers = true)]
    amount: Option<f64>,

    /// Yearly interest rate in percent
    #[arg(long, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Loan term in years
    #[arg(long, allow_negative_numbers = true)]
    term: Option<f64>,

    /// Calculate in-process instead of calling the service
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config
        && !Path::new(path).is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.to_string_lossy());
    }

    // 1) defaults -> 2) YAML (if provided) -> 3) env (EMI__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        base_url: cli.base_url.clone(),
    });

    logging::init(&config.logging, cli.verbose);
    tracing::debug!(base_url = %config.calculator.base_url, "configuration loaded");

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_json()?);
        return Ok(ExitCode::SUCCESS);
    }

    match cli.command.unwrap_or(Commands::Interactive { offline: false }) {
        Commands::Calculate(args) => calculate(&config, &args).await,
        Commands::Interactive { offline } => {
            let client = build_client(&config, offline)?;
            interactive::run(client, &CurrencyFormatter::from(&config.display)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check => check_config(&config),
    }
}

fn build_client(config: &AppConfig, offline: bool) -> Result<Arc<dyn EmiCalculatorClient>> {
    if offline {
        tracing::debug!("using in-process calculator");
        return Ok(Arc::new(OfflineCalculatorClient::default()));
    }
    let client = EmiHttpClient::new(&config.calculator).with_context(|| {
        format!(
            "failed to create calculation client for {}",
            config.calculator.base_url
        )
    })?;
    tracing::debug!(endpoint = client.endpoint(), "using calculation service");
    Ok(Arc::new(client))
}

async fn calculate(config: &AppConfig, args: &CalculateArgs) -> Result<ExitCode> {
    let client = build_client(config, args.offline)?;
    let formatter = CurrencyFormatter::from(&config.display);

    let mut controller = FormController::new(client);
    controller.set_amount(args.amount);
    controller.set_rate(args.rate);
    controller.set_term(args.term);

    let state = controller.submit().await;
    println!("{}", render::outcome(state, &formatter));

    Ok(if state.error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn check_config(config: &AppConfig) -> Result<ExitCode> {
    tracing::info!("Checking configuration...");
    println!("Configuration is valid");
    println!("{}", config.to_json()?);
    Ok(ExitCode::SUCCESS)
}
