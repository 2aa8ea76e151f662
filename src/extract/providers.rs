//! `provider` block extraction.

use crate::error::Result;
use crate::syntax::Item;
use crate::types::{Provider, PROVIDERS_DOC_URL};

/// All `provider` blocks of `list`, in declaration order, with links to
/// their reference documentation.
///
/// # Errors
///
/// Returns `StructuralMismatch` if a `provider` block has no name label.
pub fn providers(list: &[Item]) -> Result<Vec<Provider>> {
    let mut ret = Vec::new();

    for item in list.iter().filter(|item| item.is("provider")) {
        let name = item.name_key()?.trim_quotes().to_string();
        let documentation = format!("{PROVIDERS_DOC_URL}/{name}");

        ret.push(Provider { name, documentation });
    }

    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HclDocError;
    use crate::syntax::{Key, Node};

    fn provider(keys: Vec<Key>) -> Item {
        Item::new(keys, Node::Object(Vec::new()))
    }

    #[test]
    fn test_providers_keep_order_and_duplicates() {
        let list = vec![
            provider(vec![Key::ident("provider"), Key::quoted("google")]),
            provider(vec![Key::ident("provider"), Key::quoted("aws")]),
            provider(vec![Key::ident("provider"), Key::quoted("aws")]),
        ];

        let names: Vec<_> = providers(&list).unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["google", "aws", "aws"]);
    }

    #[test]
    fn test_provider_documentation() {
        let list = vec![provider(vec![Key::ident("provider"), Key::ident("aws")])];
        let result = providers(&list).unwrap();

        assert_eq!(result[0].documentation, "https://www.terraform.io/docs/providers/aws");
    }

    #[test]
    fn test_provider_without_label() {
        let list = vec![provider(vec![Key::ident("provider")])];
        assert!(matches!(
            providers(&list),
            Err(HclDocError::StructuralMismatch { .. })
        ));
    }
}
