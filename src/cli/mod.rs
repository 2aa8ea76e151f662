//! Command-line interface module.
//!
//! This module defines the CLI structure using Clap, including
//! all commands, arguments, and options.
//!
//! # Commands
//!
//! - `generate`: Extract the documentation model of one or more modules
//! - `init`: Create an example configuration file
//! - `validate`: Validate a configuration file
//!
//! # Example Usage
//!
//! ```bash
//! # Document a module as JSON
//! hcldoc generate ./modules/vpc
//!
//! # Required inputs first, as YAML, into a file
//! hcldoc generate ./modules/vpc --sort-by-required --format yaml --output vpc.yaml
//!
//! # Initialize configuration
//! hcldoc init
//!
//! # Validate configuration
//! hcldoc validate hcldoc.yaml
//! ```

use crate::types::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// hcldoc - documentation model extractor for Terraform/OpenTofu modules.
#[derive(Parser, Debug)]
#[command(
    name = "hcldoc",
    author,
    version,
    about = "Documentation model extractor for Terraform/OpenTofu modules",
    long_about = "hcldoc reads a module's .tf files and extracts its providers, resources, \
                  inputs, outputs, required Terraform version and header comment."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "HCLDOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the documentation model of Terraform/OpenTofu modules
    #[command(visible_alias = "gen")]
    Generate(GenerateArgs),

    /// Create an example configuration file
    Init,

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Arguments for the generate command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Module directories to document (merged into one model)
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// List inputs without a default first
    #[arg(long)]
    pub sort_by_required: bool,

    /// Output format (overrides the configuration file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Continue with the remaining files if some fail to parse
    #[arg(long)]
    pub continue_on_error: bool,

    /// Maximum directory depth to read
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Patterns to exclude (glob patterns)
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude_patterns: Vec<String>,
}

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(id = "file", value_name = "FILE", default_value = "hcldoc.yaml")]
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parsing() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_command() {
        let cli = Cli::parse_from(["hcldoc", "generate", "./terraform"]);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.paths, vec![PathBuf::from("./terraform")]);
                assert!(!args.sort_by_required);
                assert_eq!(args.format, None);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_with_options() {
        let cli = Cli::parse_from([
            "hcldoc",
            "generate",
            "./terraform",
            "--sort-by-required",
            "--format",
            "yaml",
            "--output",
            "doc.yaml",
            "--exclude",
            "*_override.tf",
        ]);
        match cli.command {
            Commands::Generate(args) => {
                assert!(args.sort_by_required);
                assert_eq!(args.format, Some(OutputFormat::Yaml));
                assert_eq!(args.output, Some(PathBuf::from("doc.yaml")));
                assert_eq!(args.exclude_patterns, vec!["*_override.tf".to_string()]);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_requires_path() {
        assert!(Cli::try_parse_from(["hcldoc", "generate"]).is_err());
    }

    #[test]
    fn test_init_command() {
        let cli = Cli::parse_from(["hcldoc", "init"]);
        assert!(matches!(cli.command, Commands::Init));
    }

    #[test]
    fn test_validate_command() {
        let cli = Cli::parse_from(["hcldoc", "validate", "custom.yaml"]);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.file, PathBuf::from("custom.yaml"));
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_validate_file_does_not_set_global_config() {
        let cli = Cli::parse_from(["hcldoc", "validate", "bad.yaml"]);
        assert_eq!(cli.config, None);

        let cli = Cli::parse_from(["hcldoc", "--config", "hcldoc.yaml", "validate", "bad.yaml"]);
        assert_eq!(cli.config, Some(PathBuf::from("hcldoc.yaml")));
        match cli.command {
            Commands::Validate(args) => assert_eq!(args.file, PathBuf::from("bad.yaml")),
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::parse_from([
            "hcldoc",
            "-vvv",
            "--config",
            "custom.yaml",
            "generate",
            "./terraform",
        ]);
        assert_eq!(cli.verbose, 3);
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    }

    #[test]
    fn test_alias() {
        let cli = Cli::parse_from(["hcldoc", "gen", "./terraform"]);
        assert!(matches!(cli.command, Commands::Generate(_)));
    }
}
