//! `output` block extraction.

use super::{block_name, describe};
use crate::error::Result;
use crate::syntax::Item;
use crate::types::Output;

/// All `output` blocks of `list`, in declaration order.
///
/// # Errors
///
/// Returns `StructuralMismatch` if a block has no name label or no body.
pub fn outputs(list: &[Item]) -> Result<Vec<Output>> {
    let mut ret = Vec::new();

    for item in list.iter().filter(|item| item.is("output")) {
        let name = block_name(item.name_key()?);
        let description = describe(item, item.object()?).trim().to_string();

        ret.push(Output { name, description });
    }

    tracing::trace!(count = ret.len(), "Extracted outputs");
    Ok(ret)
}
