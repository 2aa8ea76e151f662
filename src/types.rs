//! Documentation model produced by the assembler.
//!
//! This module defines:
//! - [`Doc`], the aggregate for a whole module
//! - [`Provider`], [`Resource`], [`Input`] and [`Output`] entries
//! - [`Value`], the tagged default value of an input
//! - [`OutputFormat`] for serializing the model

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Display value of an input without a default.
pub const REQUIRED: &str = "required";

/// Base URL of the provider reference documentation.
pub const PROVIDERS_DOC_URL: &str = "https://www.terraform.io/docs/providers";

/// A declared `provider` block.
///
/// # Example HCL
///
/// ```hcl
/// provider "aws" {
///   region = "us-east-1"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Provider name (e.g., "aws")
    pub name: String,
    /// Link to the provider's reference documentation
    pub documentation: String,
}

/// A declared `resource` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Local name of the resource (e.g., "web")
    pub name: String,
    /// Namespaced type (e.g., "aws_instance")
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Link to the resource type's reference documentation
    pub documentation: String,
}

/// Kind tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Scalar literal
    String,
    /// Object
    Map,
    /// List
    List,
}

/// A tagged attribute value. Only scalars carry their literal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    /// The value's kind
    #[serde(rename = "type")]
    pub kind: ValueKind,
    /// Literal text, empty for maps and lists
    pub literal: String,
}

impl Value {
    /// A scalar value.
    #[must_use]
    pub fn string(literal: impl Into<String>) -> Self {
        Self { kind: ValueKind::String, literal: literal.into() }
    }

    /// An object value.
    #[must_use]
    pub fn map() -> Self {
        Self { kind: ValueKind::Map, literal: String::new() }
    }

    /// A list value.
    #[must_use]
    pub fn list() -> Self {
        Self { kind: ValueKind::List, literal: String::new() }
    }

    /// Text shown for the value: the literal, `<map>` or `<list>`.
    #[must_use]
    pub fn display(&self) -> &str {
        match self.kind {
            ValueKind::String => &self.literal,
            ValueKind::Map => "<map>",
            ValueKind::List => "<list>",
        }
    }
}

/// A `variable` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    /// Variable name
    pub name: String,
    /// Description from the `description` attribute or the leading comment
    pub description: String,
    /// Default value, `None` when the input is required
    pub default: Option<Value>,
    /// Type expression as written, `"string"` when unspecified
    #[serde(rename = "type")]
    pub input_type: String,
}

impl Input {
    /// The default's display text, or [`REQUIRED`] without a default.
    #[must_use]
    pub fn value(&self) -> &str {
        self.default.as_ref().map_or(REQUIRED, Value::display)
    }

    /// Whether the input has no default.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// An `output` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    /// Output name
    pub name: String,
    /// Trimmed description
    pub description: String,
}

/// Documentation of one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doc {
    /// Last non-empty `required_version`, empty if unconstrained
    pub version: String,
    /// Header comment of `main.tf`
    pub comment: String,
    /// Providers in declaration order
    pub providers: Vec<Provider>,
    /// Resources in declaration order
    pub resources: Vec<Resource>,
    /// Inputs, ordered by the assembler
    pub inputs: Vec<Input>,
    /// Outputs, ordered by name
    pub outputs: Vec<Output>,
}

impl Doc {
    /// Serialize the model as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Serialize the model as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Serialize the model in `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn serialize(&self, format: OutputFormat, pretty: bool) -> Result<String> {
        match format {
            OutputFormat::Json => self.to_json(pretty),
            OutputFormat::Yaml => self.to_yaml(),
        }
    }
}

/// Inputs ordered by name.
pub fn by_name(a: &Input, b: &Input) -> Ordering {
    a.name.cmp(&b.name)
}

/// Inputs without a default first, then by name.
pub fn by_required(a: &Input, b: &Input) -> Ordering {
    b.is_required()
        .cmp(&a.is_required())
        .then_with(|| a.name.cmp(&b.name))
}

/// Serialization format of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format
    #[default]
    Json,
    /// YAML format
    Yaml,
}
