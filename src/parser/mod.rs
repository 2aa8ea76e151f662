//! HCL front-end for Terraform/OpenTofu files.
//!
//! This module turns `.tf` source text into the [`crate::syntax`] tree. The
//! grammar is handled by the lossless `hcl-edit` parser that `hcl-rs`
//! re-exports, so comments, line numbers and the raw text of every token are
//! read from the parsed tree itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use hcldoc::parser::HclParser;
//! use hcldoc::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let parser = HclParser::new(&config);
//!
//!     let parsed = parser.parse_directory("./terraform".as_ref()).await?;
//!     println!("Parsed {} files, skipped {}", parsed.files.len(), parsed.skipped.len());
//!     Ok(())
//! }
//! ```

mod hcl;

pub use self::hcl::{HclParser, ParsedDirectory};

use crate::syntax::SourceFile;

/// File extensions to document.
pub const TERRAFORM_EXTENSIONS: &[&str] = &[".tf"];

/// Files and directories to skip during scanning.
pub const SKIP_FILES: &[&str] = &[".terraform", ".terragrunt-cache", "terraform.tfstate"];

/// Trait for parsing HCL content.
///
/// This trait allows for different parsing implementations
/// (e.g., for testing with prebuilt trees).
pub trait Parser: Send + Sync {
    /// Parse a single file's contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the HCL content is invalid.
    fn parse_content(&self, content: &str, file_path: &std::path::Path) -> crate::Result<SourceFile>;
}
