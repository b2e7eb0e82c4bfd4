//! BizPulse - business analysis intake and enrichment client
//!
//! Collects a company's details and data file, enriches the stored
//! analysis with recommendations, charts and predictions from the
//! analytics backend, and renders the result.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error or invalid input
//!   3 - No stored analysis found (start again from intake)

mod aggregation;
mod backend;
mod cli;
mod config;
mod error;
mod intake;
mod loading;
mod models;
mod report;
mod store;

use aggregation::{AggregationSequence, CallOutcome};
use anyhow::{Context, Result};
use backend::HttpBackend;
use chrono::Local;
use cli::{Args, Command, OutputFormat};
use config::{Config, CONFIG_FILE};
use error::SubmitError;
use intake::IntakeForm;
use loading::LoadingAnimation;
use models::Navigation;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use store::{load_record, FileStore};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Exit code when the flow has to restart at the entry page.
const EXIT_NO_RECORD: i32 = 3;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if matches!(args.command, Command::InitConfig) {
        return handle_init_config();
    }

    init_logging(&args);

    info!("BizPulse v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle init-config: generate a default .bizpulse.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to point at your analytics backend and session store.");
    Ok(())
}

/// Initialize logging based on verbosity settings. `RUST_LOG` wins when set.
fn init_logging(args: &Args) {
    let level = args.log_level().to_string().to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Dispatch the requested stage. Returns the exit code.
async fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let mut store = FileStore::new(&config.general.store_path);
    debug!("Session store: {}", store.path().display());

    match args.command.clone() {
        Command::Intake {
            company,
            industry,
            csv,
            filename,
            kpis,
            profile,
            then_enrich,
        } => {
            let form = IntakeForm {
                company_name: company,
                industry,
                csv_file: csv,
                filename,
                kpis: read_json_file(kpis.as_deref())?,
                profile: read_json_file(profile.as_deref())?,
            };

            let code = run_intake(&mut store, &config, form)?;
            if code == 0 && then_enrich {
                return run_enrich(&mut store, &config, args.quiet).await;
            }
            Ok(code)
        }
        Command::Enrich => run_enrich(&mut store, &config, args.quiet).await,
        Command::Show { format } => run_show(&store, &config, format),
        Command::InitConfig => handle_init_config().map(|_| 0),
    }
}

/// Validate and save the intake form.
fn run_intake(store: &mut FileStore, config: &Config, form: IntakeForm) -> Result<i32> {
    let today = Local::now().date_naive();

    match intake::submit(store, &config.general.storage_key, form, today) {
        Ok((record, next)) => {
            println!(
                "✅ Saved analysis request for {} ({})",
                record.company_name, record.industry
            );
            println!("   File: {}", record.file_name);
            println!("➡️  Next: {}", config.pages.path_for(next));
            Ok(0)
        }
        Err(SubmitError::Invalid(e)) => {
            eprintln!("⚠️  {}", e);
            Ok(1)
        }
        Err(SubmitError::Store(e)) => Err(e).context("Failed to save analysis request"),
    }
}

/// Run the enrichment sequence against the configured backend.
async fn run_enrich(store: &mut FileStore, config: &Config, quiet: bool) -> Result<i32> {
    let timeout = config.backend.timeout_seconds.map(Duration::from_secs);
    let backend = HttpBackend::new(&config.backend.base_url, timeout)
        .context("Failed to create HTTP client")?;

    println!("🔬 Analyzing your data...");
    println!("   Backend: {}", backend.base_url());

    let animation = (!quiet).then(|| {
        let interval = Duration::from_millis(config.loading.step_interval_ms);
        tokio::spawn(LoadingAnimation::new(interval).run())
    });

    let result = AggregationSequence::new(&mut *store, &backend, &config.general.storage_key)
        .with_chart_types(config.backend.chart_types.clone())
        .with_trigger_delay(Duration::from_millis(config.loading.trigger_delay_ms))
        .run()
        .await;

    if let Some(handle) = animation {
        handle.abort();
    }

    let summary = result.context("Failed to save enriched analysis")?;
    debug!("Navigating to {} page", summary.navigation);

    match summary.navigation {
        Navigation::Entry => {
            eprintln!("❌ No data found! Start a new analysis first.");
            eprintln!("➡️  Next: {}", config.pages.path_for(Navigation::Entry));
            Ok(EXIT_NO_RECORD)
        }
        next => {
            println!("\n📊 Enrichment Summary:");
            for (task, outcome) in &summary.outcomes {
                match outcome {
                    CallOutcome::Success => println!("   ✅ {}", task),
                    CallOutcome::Failed(reason) => println!("   ❌ {} skipped: {}", task, reason),
                }
            }
            if summary.succeeded() < summary.outcomes.len() {
                warn!(
                    "{} of {} enrichment calls failed",
                    summary.outcomes.len() - summary.succeeded(),
                    summary.outcomes.len()
                );
            }
            let enriched = summary
                .record
                .as_ref()
                .map_or(0, |r| r.enrichment_count());
            println!(
                "💾 Data saved to {} ({}/3 enrichments)",
                store.path().display(),
                enriched
            );
            println!("➡️  Next: {}", config.pages.path_for(next));
            Ok(0)
        }
    }
}

/// Render the stored analysis.
fn run_show(store: &FileStore, config: &Config, format: OutputFormat) -> Result<i32> {
    let Some(record) = load_record(store, &config.general.storage_key)? else {
        eprintln!("❌ No analysis found. Run `bizpulse intake` first.");
        return Ok(EXIT_NO_RECORD);
    };

    let output = match format {
        OutputFormat::Text => report::render_text(&record),
        OutputFormat::Json => report::render_json(&record)?,
    };
    println!("{}", output);
    Ok(0)
}

/// Read an optional JSON payload from disk.
fn read_json_file(path: Option<&Path>) -> Result<Option<Value>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;
    Ok(Some(value))
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
