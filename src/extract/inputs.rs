//! `variable` block extraction.

use super::{block_name, describe, get};
use crate::error::Result;
use crate::syntax::Item;
use crate::types::Input;

/// Type recorded for a variable without a `type` attribute.
const DEFAULT_TYPE: &str = "string";

/// All `variable` blocks of `list`, in declaration order.
///
/// Type expressions are kept as opaque text.
///
/// # Errors
///
/// Returns `StructuralMismatch` if a block has no name label or no body.
pub fn inputs(list: &[Item]) -> Result<Vec<Input>> {
    let mut ret = Vec::new();

    for item in list.iter().filter(|item| item.is("variable")) {
        let name = block_name(item.name_key()?);
        let items = item.object()?;

        let input_type = match get(items, "type") {
            Some(t) if !t.literal.is_empty() => t.literal,
            _ => DEFAULT_TYPE.to_string(),
        };

        ret.push(Input {
            description: describe(item, items),
            default: get(items, "default"),
            input_type,
            name,
        });
    }

    tracing::trace!(count = ret.len(), "Extracted inputs");
    Ok(ret)
}
