//! `required_version` extraction.

use crate::error::{HclDocError, Result};
use crate::syntax::{Item, Node};

/// The last non-empty `required_version` of the `terraform` blocks in `list`.
///
/// Only a block whose *first* attribute is `required_version` counts; any
/// other layout yields an empty string.
///
/// # Errors
///
/// Returns `StructuralMismatch` if a `terraform` block has no body or its
/// `required_version` is not a scalar.
pub fn version(list: &[Item]) -> Result<String> {
    let mut ret = String::new();

    for item in list.iter().filter(|item| item.is("terraform")) {
        let Some(first) = item.object()?.first() else {
            continue;
        };

        if !first.is("required_version") {
            continue;
        }

        let Node::Literal(lit) = &first.value else {
            return Err(HclDocError::mismatch(
                "terraform",
                "required_version is not a literal".to_string(),
                file!(),
                line!(),
            ));
        };

        let version = lit.text.trim_matches('"');
        if !version.trim().is_empty() {
            ret = version.to_string();
        }
    }

    tracing::trace!(version = %ret, "Extracted required_version");
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Key, Literal};

    fn terraform(body: Vec<Item>) -> Item {
        Item::new(vec![Key::ident("terraform")], Node::Object(body))
    }

    fn attr(key: &str, value: &str) -> Item {
        Item::new(vec![Key::ident(key)], Node::Literal(Literal::string(value)))
    }

    #[test]
    fn test_version() {
        let list = vec![terraform(vec![attr("required_version", ">= 0.12")])];
        assert_eq!(version(&list).unwrap(), ">= 0.12");
    }

    #[test]
    fn test_version_last_wins() {
        let list = vec![
            terraform(vec![attr("required_version", "0.11")]),
            terraform(vec![attr("required_version", "0.12")]),
            terraform(vec![attr("required_version", "  ")]),
        ];
        assert_eq!(version(&list).unwrap(), "0.12");
    }

    #[test]
    fn test_version_must_be_first_attribute() {
        let list = vec![terraform(vec![
            attr("backend", "s3"),
            attr("required_version", "0.12"),
        ])];
        assert_eq!(version(&list).unwrap(), "");
    }

    #[test]
    fn test_version_empty_block() {
        assert_eq!(version(&[terraform(Vec::new())]).unwrap(), "");
    }

    #[test]
    fn test_version_list_value_is_mismatch() {
        let list = vec![terraform(vec![Item::new(
            vec![Key::ident("required_version")],
            Node::List(Vec::new()),
        )])];
        assert!(version(&list).is_err());
    }
}
