//! HelmScan CLI entry point.
//!
//! This binary provides the command-line interface for HelmScan.

use clap::Parser;
use helmscan::cli::{Cli, Commands, ScanArgs};
use helmscan::{Config, Discovery, HelmScanError};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Configuration files looked up in the working directory, in order.
const DEFAULT_CONFIG_PATHS: [&str; 3] = ["helmscan.yaml", "helmscan.yml", ".helmscan.yaml"];

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");

            eprintln!("Error: {e}");

            let mut causes = e.chain().skip(1).peekable();
            if causes.peek().is_some() {
                eprintln!("\nCaused by:");
                for (i, cause) in causes.enumerate() {
                    eprintln!("  {i}: {cause}");
                }
            }

            let code = e
                .downcast_ref::<HelmScanError>()
                .map_or(1, HelmScanError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        // RUST_LOG wins over the verbose flag
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let base_level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            EnvFilter::new(format!("warn,helmscan={base_level}"))
        })
    };

    // stdout carries the report
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    tracing::debug!("Loading configuration");
    let config = load_config(&cli)?;
    tracing::debug!("Configuration loaded successfully");

    match cli.command {
        Commands::Scan(args) => scan(config, &args).await,

        Commands::Init => {
            let config_path = std::path::Path::new(DEFAULT_CONFIG_PATHS[0]);

            if config_path.exists() {
                anyhow::bail!("Configuration file already exists: {}", config_path.display());
            }

            std::fs::write(config_path, Config::example_yaml())?;
            println!("Created example configuration: {}", config_path.display());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Validate(args) => {
            let config_content = std::fs::read_to_string(&args.config)
                .map_err(|e| HelmScanError::io(&args.config, e, file!(), line!()))?;
            match Config::from_yaml(&config_content).and_then(|config| config.validate()) {
                Ok(()) => {
                    println!("Configuration is valid: {}", args.config.display());
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

async fn scan(mut config: Config, args: &ScanArgs) -> anyhow::Result<ExitCode> {
    config.merge_cli_args(args);
    tracing::debug!(mode = %config.scan.mode, "Executing scan command");

    let result = Discovery::new(config.clone()).run().await?;

    let reporter = helmscan::reporter::Reporter::new(&config);
    let report = reporter.generate(&result, config.output.format)?;

    if let Some(output_path) = &args.output {
        std::fs::write(output_path, &report)
            .map_err(|e| HelmScanError::io(output_path, e, file!(), line!()))?;
        tracing::info!(path = %output_path.display(), "Report written");
    } else {
        println!("{report}");
    }

    Ok(ExitCode::SUCCESS)
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(ref config_path) = cli.config {
        tracing::debug!(path = %config_path.display(), "Loading configuration from explicit path");
        let content = std::fs::read_to_string(config_path)
            .map_err(|e| HelmScanError::io(config_path, e, file!(), line!()))?;
        return Ok(Config::from_yaml(&content)?);
    }

    tracing::debug!("Searching for default configuration files");
    for path in &DEFAULT_CONFIG_PATHS {
        let path = std::path::Path::new(path);
        if path.exists() {
            tracing::debug!(path = %path.display(), "Found configuration file");
            let content = std::fs::read_to_string(path)
                .map_err(|e| HelmScanError::io(path, e, file!(), line!()))?;
            return Ok(Config::from_yaml(&content)?);
        }
    }

    tracing::debug!("No configuration file found, using default configuration");
    Ok(Config::default())
}
