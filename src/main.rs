//! hcldoc CLI entry point.
//!
//! This binary provides the command-line interface for hcldoc.

use clap::Parser;
use hcldoc::cli::{Cli, Commands};
use hcldoc::{Config, Documenter};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Configuration files looked up in the working directory, in order.
const DEFAULT_CONFIG_FILES: [&str; 3] = ["hcldoc.yaml", "hcldoc.yml", ".hcldoc.yaml"];

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");

            eprintln!("Error: {e}");

            let mut chain = e.chain().skip(1).peekable();
            if chain.peek().is_some() {
                eprintln!("\nCaused by:");
                for (i, cause) in chain.enumerate() {
                    eprintln!("  {i}: {cause}");
                }
            }

            let code = e
                .downcast_ref::<hcldoc::HclDocError>()
                .map_or(1, hcldoc::HclDocError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        // RUST_LOG wins over the verbosity flag
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let base_level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            EnvFilter::new(format!("warn,hcldoc={base_level}"))
        })
    };

    // Logs go to stderr so stdout stays a clean document
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
    match cli.command {
        Commands::Generate(ref args) => {
            tracing::debug!("Loading configuration");
            let mut config = load_config(&cli)?;

            tracing::debug!("Executing generate command");
            config.merge_cli_args(args);

            let documenter = Documenter::new(config);
            let documented = documenter.document(&args.paths).await?;

            for error in &documented.skipped {
                eprintln!("Warning: skipped {error}");
            }

            let output = &documenter.config().output;
            let rendered = documented.doc.serialize(output.format, output.pretty)?;

            if let Some(output_path) = &args.output {
                std::fs::write(output_path, &rendered)?;
                tracing::info!(path = %output_path.display(), "Documentation written");
            } else {
                println!("{rendered}");
            }

            Ok(ExitCode::SUCCESS)
        }

        Commands::Init => {
            let config_path = Path::new(DEFAULT_CONFIG_FILES[0]);

            if config_path.exists() {
                anyhow::bail!("Configuration file already exists: {}", config_path.display());
            }

            std::fs::write(config_path, Config::example_yaml())?;
            println!("Created example configuration: {}", config_path.display());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Validate(ref args) => {
            let content = std::fs::read_to_string(&args.file)?;
            match Config::from_yaml(&content) {
                Ok(_) => {
                    println!("Configuration is valid: {}", args.file.display());
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    Ok(ExitCode::from(1))
                }
            }
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(ref config_path) = cli.config {
        tracing::debug!(path = %config_path.display(), "Loading configuration from explicit path");
        let content = std::fs::read_to_string(config_path)?;
        return Ok(Config::from_yaml(&content)?);
    }

    for path in DEFAULT_CONFIG_FILES {
        if Path::new(path).exists() {
            tracing::debug!(path = %path, "Found configuration file");
            let content = std::fs::read_to_string(path)?;
            return Ok(Config::from_yaml(&content)?);
        }
    }

    tracing::debug!("No configuration file found, using default configuration");
    Ok(Config::default())
}
