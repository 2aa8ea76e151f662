//! `resource` block extraction.

use crate::error::Result;
use crate::syntax::Item;
use crate::types::{Resource, PROVIDERS_DOC_URL};
use std::path::PathBuf;

/// All `resource` blocks of `list`, in declaration order, with links to
/// their reference documentation.
///
/// The type `aws_instance` splits on its first `_` into the namespace `aws`
/// and the item `instance`.
///
/// # Errors
///
/// Returns `StructuralMismatch` if a block lacks its type or name label, and
/// `MalformedResourceType` if the type has no `_`.
pub fn resources(list: &[Item]) -> Result<Vec<Resource>> {
    let mut ret = Vec::new();

    for item in list.iter().filter(|item| item.is("resource")) {
        let name = item.resource_name_key()?.trim_quotes().to_string();
        let resource_type = item.type_key()?.trim_quotes().to_string();

        let Some((namespace, kind)) = resource_type.split_once('_') else {
            return Err(crate::err!(MalformedResourceType {
                file: PathBuf::new(),
                resource_type: resource_type,
            }));
        };
        let documentation = format!("{PROVIDERS_DOC_URL}/{namespace}/r/{kind}.html");

        ret.push(Resource { name, resource_type, documentation });
    }

    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HclDocError;
    use crate::syntax::{Key, Node};
    use pretty_assertions::assert_eq;

    fn resource(labels: &[&str]) -> Item {
        let mut keys = vec![Key::ident("resource")];
        keys.extend(labels.iter().map(|l| Key::quoted(l)));
        Item::new(keys, Node::Object(Vec::new()))
    }

    #[test]
    fn test_resource() {
        let result = resources(&[resource(&["aws_instance", "web"])]).unwrap();

        assert_eq!(
            result,
            vec![Resource {
                name: "web".to_string(),
                resource_type: "aws_instance".to_string(),
                documentation: "https://www.terraform.io/docs/providers/aws/r/instance.html".to_string(),
            }]
        );
    }

    #[test]
    fn test_resource_splits_on_first_separator() {
        let result = resources(&[resource(&["google_compute_instance", "vm"])]).unwrap();
        assert_eq!(
            result[0].documentation,
            "https://www.terraform.io/docs/providers/google/r/compute_instance.html"
        );
    }

    #[test]
    fn test_resource_type_without_separator() {
        let err = resources(&[resource(&["instance", "web"])]).unwrap_err();
        assert!(matches!(
            err,
            HclDocError::MalformedResourceType { ref resource_type, .. } if resource_type == "instance"
        ));
    }

    #[test]
    fn test_resource_missing_name() {
        let err = resources(&[resource(&["aws_instance"])]).unwrap_err();
        assert!(matches!(err, HclDocError::StructuralMismatch { .. }));
    }

    #[test]
    fn test_other_blocks_ignored() {
        let data = Item::new(
            vec![Key::ident("data"), Key::quoted("aws_ami"), Key::quoted("ubuntu")],
            Node::Object(Vec::new()),
        );
        assert!(resources(&[data]).unwrap().is_empty());
    }
}
