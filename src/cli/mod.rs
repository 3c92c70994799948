//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the report using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// CDP Report - daily UC1 audience report from the Customer Data Platform
#[derive(Parser, Debug)]
#[command(name = "cdp-report")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (environment variables only when omitted)
    #[arg(short, long, env = "CDP_REPORT_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CDP_REPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the report and print each line as it arrives
    Print(commands::print::PrintArgs),

    /// Run the report and email it
    Email(commands::email::EmailArgs),

    /// Show every report query without contacting the CDP
    ListQueries(commands::list_queries::ListQueriesArgs),

    /// Validate configuration
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_print() {
        let cli = Cli::parse_from(["cdp-report", "print"]);
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Commands::Print(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["cdp-report", "--config", "report.toml", "print"]);
        assert_eq!(cli.config.as_deref(), Some("report.toml"));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["cdp-report", "--log-level", "debug", "print"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_email() {
        let cli = Cli::parse_from([
            "cdp-report",
            "email",
            "--fail-on-delivery-error",
            "--to",
            "ops@example.com",
        ]);
        match cli.command {
            Commands::Email(args) => {
                assert!(args.fail_on_delivery_error);
                assert_eq!(args.to.as_deref(), Some("ops@example.com"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_list_queries_with_section() {
        let cli = Cli::parse_from(["cdp-report", "list-queries", "--section", "professions"]);
        match cli.command {
            Commands::ListQueries(args) => assert_eq!(args.section.as_deref(), Some("professions")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["cdp-report", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["cdp-report"]).is_err());
    }
}
