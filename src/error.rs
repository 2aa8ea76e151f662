//! Error types for hcldoc.
//!
//! This module defines the error hierarchy using `thiserror`. Every
//! variant records where it was raised (`src_path`/`src_line`) so that a
//! failure deep inside an extractor can be traced back without a backtrace.
//!
//! # Error Categories
//!
//! - **IO errors**: reading module directories and files
//! - **Parse errors**: HCL the front-end could not parse
//! - **Extraction errors**: trees this crate does not know how to interpret
//! - **Config errors**: invalid configuration files
//!
//! # Example
//!
//! ```rust
//! use hcldoc::error::{HclDocError, Result};
//!
//! fn read_module(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .map_err(|e| HclDocError::io(path, e, file!(), line!()))
//! }
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Macro to create errors with automatic source location tracking.
///
/// Usage:
/// ```ignore
/// return Err(err!(DirectoryNotFound { path: path.to_path_buf() }));
/// ```
#[macro_export]
macro_rules! err {
    ($variant:ident { $($field:ident: $value:expr),* $(,)? }) => {
        $crate::error::HclDocError::$variant {
            $($field: $value,)*
            src_path: file!(),
            src_line: line!(),
        }
    };
}

/// A specialized Result type for hcldoc operations.
pub type Result<T> = std::result::Result<T, HclDocError>;

/// The main error type for hcldoc.
#[derive(Error, Debug)]
pub enum HclDocError {
    // =========================================================================
    // I/O and File System Errors
    // =========================================================================
    /// I/O error with path context.
    #[error("I/O error at '{path}' ({src_path}:{src_line}): {source}")]
    Io {
        /// The path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Directory not found.
    #[error("Directory not found: {path} ({src_path}:{src_line})")]
    DirectoryNotFound {
        /// The missing directory path
        path: PathBuf,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // HCL Parsing Errors
    // =========================================================================
    /// HCL parsing error.
    #[error("Failed to parse HCL in '{file}' \n\t({src_path}:{src_line}): {message}")]
    HclParse {
        /// The file being parsed
        file: PathBuf,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Extraction Errors
    // =========================================================================
    /// A `resource` block whose type cannot be split into namespace and item.
    #[error("Malformed resource type '{resource_type}' in '{file}' ({src_path}:{src_line}): expected '<namespace>_<item>'")]
    MalformedResourceType {
        /// The file declaring the resource
        file: PathBuf,
        /// The offending type label
        resource_type: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// A syntax tree node did not have the shape its block kind requires.
    #[error("Unexpected structure in '{block}' block of '{file}' ({src_path}:{src_line}): {message}")]
    StructuralMismatch {
        /// The file declaring the block
        file: PathBuf,
        /// The block kind (e.g. "provider")
        block: String,
        /// Description of the mismatch
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration parsing error.
    #[error("Failed to parse configuration ({src_path}:{src_line}): {message}")]
    ConfigParse {
        /// Error message
        message: String,
        /// The underlying error (if any)
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Generic Errors
    // =========================================================================
    /// Internal error (should not happen in normal operation).
    #[error("Internal error ({src_path}:{src_line}): {message}")]
    Internal {
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },
}

impl HclDocError {
    /// Creates an `Io` error.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error, src_path: &'static str, src_line: u32) -> Self {
        Self::Io { path: path.into(), source, src_path, src_line }
    }

    /// Creates a `StructuralMismatch` error that is not yet tied to a file.
    ///
    /// The assembler attaches the file with [`HclDocError::in_file`].
    #[must_use]
    pub fn mismatch(block: &str, message: String, src_path: &'static str, src_line: u32) -> Self {
        Self::StructuralMismatch {
            file: PathBuf::new(),
            block: block.to_string(),
            message,
            src_path,
            src_line,
        }
    }

    /// Stamps extraction errors that carry no file yet with `path`.
    #[must_use]
    pub fn in_file(mut self, path: &Path) -> Self {
        match &mut self {
            Self::MalformedResourceType { file, .. }
            | Self::StructuralMismatch { file, .. }
            | Self::HclParse { file, .. }
                if file.as_os_str().is_empty() =>
            {
                *file = path.to_path_buf();
            }
            _ => {}
        }
        self
    }

    /// Determines if the error is recoverable (e.g., should continue with other files).
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::HclParse { .. }
                | Self::MalformedResourceType { .. }
                | Self::StructuralMismatch { .. }
                | Self::ConfigParse { .. }
        )
    }

    /// Returns the appropriate exit code for the error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => 13,
            Self::DirectoryNotFound { .. } => 15,
            Self::ConfigParse { .. } => 18,
            Self::HclParse { .. } => 23,
            Self::MalformedResourceType { .. } | Self::StructuralMismatch { .. } => 24,
            _ => 1,
        }
    }
}

impl From<serde_json::Error> for HclDocError {
    fn from(source: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("JSON serialization error: {source}"),
            src_path: file!(),
            src_line: line!(),
        }
    }
}

impl From<serde_yaml::Error> for HclDocError {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Internal {
            message: format!("YAML serialization error: {source}"),
            src_path: file!(),
            src_line: line!(),
        }
    }
}

/// A utility for collecting multiple errors during parsing or processing.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<HclDocError>,
}

impl ErrorCollector {
    /// Create a new error collector.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn add(&mut self, error: HclDocError) {
        self.errors.push(error);
    }

    /// Get the number of collected errors.
    #[must_use]
    pub fn count(&self) -> usize {
        self.errors.len()
    }

    /// The collected errors, in the order they were added.
    #[must_use]
    pub fn into_errors(self) -> Vec<HclDocError> {
        self.errors
    }
}
