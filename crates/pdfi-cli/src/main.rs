//! CLI entry point for the pdf-importer model registry.
//!
//! This binary opens the interactive registry UI and offers a couple of
//! one-shot helpers for working with extraction schemas.
//!
//! # Usage
//!
//! ```bash
//! pdfi [OPTIONS] <COMMAND>
//!
//! # Interactive TUI over a sandbox registry seeded with sample data
//! pdfi tui --demo --latency-ms 400
//!
//! # Print the starter invoice schema
//! pdfi template > invoice.schema.json
//!
//! # Reformat a schema file (or stdin)
//! pdfi fmt --input invoice.schema.json
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::{Read, Write};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use pdfi_core::{Config, schema};
use pdfi_registry::{ImportSource, InMemoryRegistry, RegistryClient};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Manage the extraction models used by pdf-importer.
///
/// Models pair a name with a JSON Schema; imports run OCR over a PDF and
/// extract JSON matching the chosen model's schema.
#[derive(Parser)]
#[command(name = "pdfi", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON configuration file.
    #[arg(short, long, global = true, env = "PDFI_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Delay every registry call by this many milliseconds.
    ///
    /// Overrides `registry.simulated_latency_ms` from the configuration file.
    #[arg(long, global = true, env = "PDFI_LATENCY_MS")]
    latency_ms: Option<u64>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Start the interactive model registry.
    Tui {
        /// Seed the sandbox registry with sample models and imports.
        #[arg(long)]
        demo: bool,
    },

    /// Print the starter invoice schema.
    Template,

    /// Reformat schema text with two-space indentation.
    Fmt {
        /// Schema file to read (defaults to stdin).
        #[arg(short, long)]
        input: Option<Utf8PathBuf>,
    },
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default. Output
/// goes to stderr so `template` and `fmt` keep stdout clean.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},mio=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the optional file and CLI overrides.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be read, parsed, or
/// fails validation.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => {
            if !path.is_file() {
                return Err(eyre!("Config file does not exist: {path}"));
            }
            Config::load(path).wrap_err_with(|| format!("Failed to load config from {path}"))?
        }
        None => Config::default(),
    };

    if let Some(latency) = cli.latency_ms {
        config.registry.simulated_latency_ms = latency;
    }
    if let Commands::Tui { demo: true } = cli.command {
        config.registry.seed_demo_data = true;
    }

    config.validate()?;
    debug!(?config, "Configuration resolved");
    Ok(config)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs the interactive TUI over an in-memory registry.
///
/// # Errors
///
/// Returns an error if the TUI fails.
async fn run_tui(config: Config) -> color_eyre::Result<()> {
    let registry = Arc::new(InMemoryRegistry::from_config(&config.registry));
    info!(
        models = registry.model_count(),
        latency_ms = config.registry.simulated_latency_ms,
        "Starting TUI"
    );

    let client: Arc<dyn RegistryClient> = Arc::clone(&registry) as Arc<dyn RegistryClient>;
    let imports: Arc<dyn ImportSource> = registry;

    // Handle SIGTERM for graceful shutdown on Unix
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            result = pdfi_tui::run(config, client, imports) => {
                result.map_err(|e| eyre!("TUI error: {}", e))?;
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        pdfi_tui::run(config, client, imports)
            .await
            .map_err(|e| eyre!("TUI error: {}", e))?;
    }

    Ok(())
}

/// Prints the starter schema.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
fn run_template() -> color_eyre::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", schema::default_template().to_pretty_string())?;
    Ok(())
}

/// Reads schema text from `input` (or stdin) and prints it reformatted.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not valid JSON.
fn run_fmt(input: Option<&Utf8Path>) -> color_eyre::Result<()> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path.as_std_path())
            .wrap_err_with(|| format!("Failed to read {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .wrap_err("Failed to read stdin")?;
            buf
        }
    };

    let formatted = reformat(&text, input)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{formatted}")?;
    Ok(())
}

/// Reformats schema text, naming the source in the error.
fn reformat(text: &str, source: Option<&Utf8Path>) -> color_eyre::Result<String> {
    schema::format(text).map_err(|fault| {
        let source = source.map_or("<stdin>", Utf8Path::as_str);
        eyre!(
            "{source}:{}:{}: {}",
            fault.line(),
            fault.column(),
            fault.message()
        )
    })
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Route to appropriate command
    match cli.command {
        Commands::Tui { .. } => {
            let config = build_config(&cli)?;
            run_tui(config).await
        }
        Commands::Template => run_template(),
        Commands::Fmt { ref input } => run_fmt(input.as_deref()),
    }
}
