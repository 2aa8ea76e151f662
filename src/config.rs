//! Configuration module for hcldoc.
//!
//! This module handles loading and validating configuration from:
//! - YAML configuration files (`hcldoc.yaml`)
//! - Environment variables
//! - CLI arguments
//!
//! # Configuration File Format
//!
//! ```yaml
//! # hcldoc.yaml
//!
//! # Scanning options
//! scan:
//!   exclude_patterns:
//!     - "*_override.tf"
//!   continue_on_error: false
//!   max_depth: 1
//!
//! # Documentation options
//! doc:
//!   sort_by_required: true
//!
//! # Output options
//! output:
//!   format: json
//!   pretty: true
//! ```

use crate::error::Result;
use crate::types::OutputFormat;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static BRACED_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("Invalid regex"));

static BARE_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("Invalid regex"));

/// Scanning options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Patterns to exclude from scanning (glob patterns).
    pub exclude_patterns: Vec<String>,

    /// Continue with the remaining files if some fail to parse.
    pub continue_on_error: bool,

    /// Maximum directory depth; 1 reads only the module's own files.
    pub max_depth: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            exclude_patterns: Vec::new(),
            continue_on_error: false,
            max_depth: default_max_depth(),
        }
    }
}

/// Documentation options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocOptions {
    /// List inputs without a default before the others.
    pub sort_by_required: bool,
}

/// Output options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Serialization format.
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

/// Main configuration structure with nested sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scanning options
    pub scan: ScanOptions,

    /// Documentation options
    pub doc: DocOptions,

    /// Output options
    pub output: OutputOptions,
}

fn default_max_depth() -> usize {
    1
}

impl Config {
    /// Load configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(content: &str) -> Result<Self> {
        tracing::debug!("Parsing configuration from YAML");
        let expanded = expand_env_vars(content);

        let config: Self = serde_yaml::from_str(&expanded).map_err(|e| crate::err!(ConfigParse {
            message: e.to_string(),
            source: Some(Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }))?;

        tracing::debug!(
            exclude_patterns = config.scan.exclude_patterns.len(),
            continue_on_error = config.scan.continue_on_error,
            sort_by_required = config.doc.sort_by_required,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Generate an example YAML configuration.
    #[must_use]
    pub fn example_yaml() -> String {
        r#"# hcldoc Configuration File

# Scanning options
scan:
  # Patterns to exclude from scanning (glob patterns)
  exclude_patterns:
    - "*_override.tf"

  # Continue with the remaining files if some fail to parse
  continue_on_error: false

  # Directory depth to read (1 = only the module's own files)
  max_depth: 1

# Documentation options
doc:
  # List required inputs (no default) before optional ones
  sort_by_required: false

# Output options
output:
  # Serialization format: json or yaml
  format: json

  # Pretty-print JSON output
  pretty: true
"#
        .to_string()
    }

    /// Merge CLI arguments into the configuration.
    pub fn merge_cli_args(&mut self, args: &crate::cli::GenerateArgs) {
        if !args.exclude_patterns.is_empty() {
            self.scan
                .exclude_patterns
                .extend(args.exclude_patterns.iter().cloned());
        }
        if args.continue_on_error {
            self.scan.continue_on_error = true;
        }
        if let Some(max_depth) = args.max_depth {
            self.scan.max_depth = max_depth;
        }
        if args.sort_by_required {
            self.doc.sort_by_required = true;
        }
        if let Some(format) = args.format {
            self.output.format = format;
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. Unset variables are left as written.
fn expand_env_vars(content: &str) -> String {
    let mut result = content.to_string();

    for re in [&*BRACED_VAR, &*BARE_VAR] {
        for cap in re.captures_iter(content) {
            if let Ok(value) = std::env::var(&cap[1]) {
                result = result.replace(&cap[0], &value);
            }
        }
    }

    result
}
