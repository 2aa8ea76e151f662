//! Extraction passes over a file's top-level items.
//!
//! Each pass reads the same item list and produces one slice of the
//! [`Doc`](crate::types::Doc):
//!
//! 1. **Version**: `terraform { required_version = ... }`
//! 2. **Providers**: `provider "<name>"` blocks
//! 3. **Resources**: `resource "<type>" "<name>"` blocks
//! 4. **Inputs**: `variable "<name>"` blocks with description, type and default
//! 5. **Outputs**: `output "<name>"` blocks with description
//!
//! The passes are independent; the assembler runs all of them per file.
//!
//! # Example
//!
//! ```rust
//! use hcldoc::extract;
//! use hcldoc::syntax::{Item, Key, Node};
//!
//! let items = vec![Item::new(
//!     vec![Key::ident("variable"), Key::quoted("region")],
//!     Node::Object(Vec::new()),
//! )];
//!
//! let inputs = extract::inputs(&items).unwrap();
//! assert_eq!(inputs[0].value(), "required");
//! ```

mod comment;
mod inputs;
mod outputs;
mod providers;
mod resources;
mod version;

pub use comment::{clean, header};
pub use inputs::inputs;
pub use outputs::outputs;
pub use providers::providers;
pub use resources::resources;
pub use version::version;

use crate::syntax::{Item, Key, Node};
use crate::types::Value;

/// Resolve attribute `key` among `items` into a tagged value.
///
/// Only the first matching item is considered. Scalars use their decoded
/// string value when there is one and their raw text otherwise.
#[must_use]
pub fn get(items: &[Item], key: &str) -> Option<Value> {
    let item = items.iter().find(|item| item.is(key))?;

    let value = match &item.value {
        Node::Literal(lit) => Value::string(lit.value.as_deref().unwrap_or(&lit.text)),
        Node::Object(_) => Value::map(),
        Node::List(_) => Value::list(),
    };

    Some(value)
}

/// The `description` attribute's literal, or an empty string.
fn description(items: &[Item]) -> String {
    get(items, "description").map(|v| v.literal).unwrap_or_default()
}

/// Description of a `variable` or `output` block.
///
/// The attribute wins; the cleaned leading comment is the fallback.
fn describe(item: &Item, items: &[Item]) -> String {
    let desc = description(items);
    if !desc.is_empty() {
        return desc;
    }

    item.lead_comment
        .as_deref()
        .map(clean)
        .unwrap_or_default()
}

/// Name of a `variable` or `output` block.
///
/// Falls back to the raw token when it does not decode as a quoted string.
fn block_name(key: &Key) -> String {
    match key.unquote() {
        name if name.is_empty() => key.text.clone(),
        name => name,
    }
}
