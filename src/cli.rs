//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BizPulse - business analysis intake and enrichment
///
/// Submit a company's details and sales CSV, enrich the stored analysis
/// with recommendations, charts and predictions from the analytics
/// backend, and view the result.
///
/// Examples:
///   bizpulse intake --company Acme --industry Retail --csv q1.csv
///   bizpulse intake --company Acme --industry Retail --csv q1.csv --then-enrich
///   bizpulse enrich --backend-url http://localhost:5000
///   bizpulse show --format json
///   bizpulse init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    ///
    /// If not specified, looks for .bizpulse.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Session store file (overrides config)
    #[arg(long, value_name = "FILE", global = true)]
    pub store: Option<PathBuf>,

    /// Analytics backend base URL (overrides config)
    #[arg(long, value_name = "URL", env = "BIZPULSE_BACKEND_URL", global = true)]
    pub backend_url: Option<String>,

    /// Request timeout in seconds
    ///
    /// Default: no timeout beyond the HTTP client's own.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Delay before enrichment starts, in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    pub delay_ms: Option<u64>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output, no animation)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Stages of the analysis flow.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Submit company details and the CSV to analyze
    Intake {
        /// Company name
        #[arg(long, value_name = "NAME", default_value = "")]
        company: String,

        /// Industry the company operates in
        #[arg(long, value_name = "INDUSTRY", default_value = "")]
        industry: String,

        /// CSV file with the business data
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Identifier the backend assigned to the uploaded CSV
        #[arg(long, value_name = "ID")]
        filename: Option<String>,

        /// JSON file with precomputed KPIs
        #[arg(long, value_name = "FILE")]
        kpis: Option<PathBuf>,

        /// JSON file with the business profile
        #[arg(long, value_name = "FILE")]
        profile: Option<PathBuf>,

        /// Continue straight into enrichment
        #[arg(long)]
        then_enrich: bool,
    },

    /// Enrich the stored analysis from the backend
    Enrich,

    /// Show the stored analysis
    Show {
        /// Output format (text, json)
        #[arg(long, default_value = "text", value_name = "FORMAT")]
        format: OutputFormat,
    },

    /// Generate a default .bizpulse.toml configuration file
    InitConfig,
}

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown-style text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref url) = self.backend_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Backend URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            command: Command::Enrich,
            config: None,
            store: None,
            backend_url: None,
            timeout: None,
            delay_ms: None,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_parse_intake() {
        let args = Args::try_parse_from([
            "bizpulse",
            "intake",
            "--company",
            "Acme",
            "--industry",
            "Retail",
            "--csv",
            "q1.csv",
            "--then-enrich",
            "--store",
            "/tmp/s.json",
        ])
        .unwrap();

        assert_eq!(args.store, Some(PathBuf::from("/tmp/s.json")));
        match args.command {
            Command::Intake {
                company,
                industry,
                csv,
                then_enrich,
                ..
            } => {
                assert_eq!(company, "Acme");
                assert_eq!(industry, "Retail");
                assert_eq!(csv, Some(PathBuf::from("q1.csv")));
                assert!(then_enrich);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_show_json() {
        let args = Args::try_parse_from(["bizpulse", "show", "--format", "json"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Show {
                format: OutputFormat::Json
            }
        ));
    }

    #[test]
    fn test_validation_invalid_backend_url() {
        let mut args = make_args();
        args.backend_url = Some("localhost:5000".to_string());
        assert!(args.validate().is_err());

        args.backend_url = Some("http://localhost:5000".to_string());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
