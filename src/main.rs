// CDP Report - daily UC1 audience report from the Customer Data Platform
// Copyright (c) 2025 CDP Report Contributors
// Licensed under the MIT License

use cdp_report::cli::{Cli, Commands};
use cdp_report::config::{load_report_config, ReportConfig};
use cdp_report::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_report_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration");
            eprintln!("   Error: {e}");
            process::exit(2);
        }
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(config.application.log_level.as_str());
    let guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "CDP Report - daily UC1 audience report"
    );

    let exit_code = match execute_command(&cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors; flush the file log first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: &ReportConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Print(args) => args.execute(config).await,
        Commands::Email(args) => args.execute(config).await,
        Commands::ListQueries(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(config, cli.config.as_deref()).await,
    }
}
