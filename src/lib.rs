//! # hcldoc
//!
//! A documentation model extractor for Terraform/OpenTofu modules.
//!
//! hcldoc reads the `.tf` files of a module and extracts everything a
//! module's documentation is made of: the required Terraform version, the
//! header comment of `main.tf`, the providers and resources it declares, and
//! its input variables and outputs, each with their description.
//!
//! ## Features
//!
//! - **HCL parsing**: `.tf` files are parsed with the lossless `hcl-edit`
//!   parser, so comments and raw token text survive
//! - **Descriptions from comments**: a variable or output without a
//!   `description` attribute is described by the comment right above it
//! - **Deterministic output**: inputs sorted by name (optionally required
//!   first), outputs sorted by name
//! - **Multiple output formats**: JSON and YAML
//!
//! ## Example
//!
//! ```rust,no_run
//! use hcldoc::{Config, Documenter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let documenter = Documenter::new(config);
//!
//!     let doc = documenter.document_path("./modules/vpc").await?;
//!     println!("{}", doc.to_json(true)?);
//!
//!     Ok(())
//! }
//! ```

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod assembler;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod parser;
pub mod syntax;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use error::{HclDocError, Result};
pub use types::{Doc, Input, Output, OutputFormat, Provider, Resource, Value, ValueKind};

use std::path::Path;

/// A documentation model together with the files left out of it.
#[derive(Debug)]
pub struct Documented {
    /// The assembled model
    pub doc: Doc,
    /// Errors of the files skipped because `continue_on_error` is set
    pub skipped: Vec<HclDocError>,
}

/// Main orchestrator that reads module directories and builds their [`Doc`].
///
/// # Example
///
/// ```rust,no_run
/// use hcldoc::{Config, Documenter};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let documenter = Documenter::new(Config::default());
///
///     // Merge two directories into one model
///     let doc = documenter.document_paths(&["./vpc", "./vpc/extra"]).await?;
///
///     println!("Found {} inputs", doc.inputs.len());
///     Ok(())
/// }
/// ```
pub struct Documenter {
    config: Config,
}

impl Documenter {
    /// Create a new documenter with the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Document a single module directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path doesn't exist or isn't accessible
    /// - HCL parsing fails
    /// - A declaration has an unexpected shape
    pub async fn document_path<P: AsRef<Path>>(&self, path: P) -> Result<Doc> {
        self.document_paths(&[path.as_ref()]).await
    }

    /// Document several directories as one module.
    ///
    /// Files skipped under `continue_on_error` are dropped silently; use
    /// [`Documenter::document`] to get them.
    ///
    /// # Errors
    ///
    /// Returns an error if any path fails to parse or extract.
    pub async fn document_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Doc> {
        Ok(self.document(paths).await?.doc)
    }

    /// Document several directories as one module, keeping the errors of
    /// skipped files.
    ///
    /// Files are read directory by directory, in the order given, and
    /// sorted by path within each directory.
    ///
    /// # Errors
    ///
    /// Returns an error if any path fails to parse or extract.
    pub async fn document<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Documented> {
        let parser = parser::HclParser::new(&self.config);
        let mut files = Vec::new();
        let mut skipped = Vec::new();

        for path in paths {
            let path = path.as_ref();
            tracing::info!(path = %path.display(), "Reading module");
            let parsed = parser.parse_directory(path).await?;
            files.extend(parsed.files);
            skipped.extend(parsed.skipped);
        }

        let doc = assembler::create(&files, self.config.doc.sort_by_required)?;
        Ok(Documented { doc, skipped })
    }

    /// The configuration this documenter was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}
