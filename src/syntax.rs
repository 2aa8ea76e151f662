//! Syntax tree consumed by the documentation extractors.
//!
//! The tree is deliberately small: every top-level structure of a file is an
//! [`Item`] with an ordered list of [`Key`] tokens and exactly one [`Node`]
//! value. Front-ends (see [`crate::parser`]) build it; the extractors in
//! [`crate::extract`] only ever read it.
//!
//! ```hcl
//! # Instance name.
//! variable "name" {
//!   default = "web"
//! }
//! ```
//!
//! becomes an item with keys `variable` and `"name"`, an object value holding
//! one `default` item, and a leading comment of `["# Instance name."]`.

use crate::error::{HclDocError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A key token of an item, e.g. `resource`, `"aws_instance"` or `web`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    /// Raw token text, including the surrounding quotes when `quoted`
    pub text: String,
    /// Whether the token was written as a quoted string
    pub quoted: bool,
}

impl Key {
    /// An unquoted identifier key.
    #[must_use]
    pub fn ident(text: impl Into<String>) -> Self {
        Self { text: text.into(), quoted: false }
    }

    /// A quoted key built from its decoded value.
    #[must_use]
    pub fn quoted(value: &str) -> Self {
        Self { text: quote(value), quoted: true }
    }

    /// The token text with every leading and trailing `"` removed.
    #[must_use]
    pub fn trim_quotes(&self) -> &str {
        self.text.trim_matches('"')
    }

    /// Decodes the token as a quoted string literal.
    ///
    /// Returns an empty string when the token is not a well-formed quoted
    /// literal (bare identifiers included), so callers decide the fallback.
    #[must_use]
    pub fn unquote(&self) -> String {
        unquote(&self.text).unwrap_or_default()
    }
}

/// A scalar token: a string, number, bool, null or an opaque expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    /// Raw token text as written in the source
    pub text: String,
    /// Decoded string value, present for string literals and heredocs
    pub value: Option<String>,
}

impl Literal {
    /// A string literal built from its decoded value.
    #[must_use]
    pub fn string(value: &str) -> Self {
        Self { text: quote(value), value: Some(value.to_string()) }
    }

    /// A non-string token kept as raw text.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self { text: text.into(), value: None }
    }
}

/// The value of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Scalar token
    Literal(Literal),
    /// `[ ... ]`
    List(Vec<Node>),
    /// `{ ... }`, a block body or an object expression
    Object(Vec<Item>),
}

/// One keyed structure: a block, an attribute, or an object entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Key tokens in source order
    pub keys: Vec<Key>,
    /// The item's value
    pub value: Node,
    /// Raw comment lines directly preceding the item, if any
    pub lead_comment: Option<Vec<String>>,
}

impl Item {
    /// Create an item without a leading comment.
    #[must_use]
    pub fn new(keys: Vec<Key>, value: Node) -> Self {
        Self { keys, value, lead_comment: None }
    }

    /// Attach a leading comment.
    #[must_use]
    pub fn with_lead_comment(mut self, lines: Vec<String>) -> Self {
        self.lead_comment = Some(lines);
        self
    }

    /// Text of the first key token.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.keys.first().map(|k| k.text.as_str())
    }

    /// Whether the first key token equals `kind`. Items without keys never match.
    #[must_use]
    pub fn is(&self, kind: &str) -> bool {
        self.kind() == Some(kind)
    }

    /// The second key token: the name of a `provider`, `variable` or `output`.
    ///
    /// # Errors
    ///
    /// Returns `StructuralMismatch` if the item has fewer than two keys.
    pub fn name_key(&self) -> Result<&Key> {
        self.key_at(1, "name label")
    }

    /// The second key token of a `resource` block: its namespaced type.
    ///
    /// # Errors
    ///
    /// Returns `StructuralMismatch` if the item has fewer than two keys.
    pub fn type_key(&self) -> Result<&Key> {
        self.key_at(1, "type label")
    }

    /// The third key token of a `resource` block: its local name.
    ///
    /// # Errors
    ///
    /// Returns `StructuralMismatch` if the item has fewer than three keys.
    pub fn resource_name_key(&self) -> Result<&Key> {
        self.key_at(2, "name label")
    }

    /// The nested items of an object-valued item.
    ///
    /// # Errors
    ///
    /// Returns `StructuralMismatch` if the value is a literal or a list.
    pub fn object(&self) -> Result<&[Item]> {
        match &self.value {
            Node::Object(items) => Ok(items),
            Node::Literal(_) | Node::List(_) => Err(HclDocError::mismatch(
                self.kind().unwrap_or_default(),
                "expected a block body".to_string(),
                file!(),
                line!(),
            )),
        }
    }

    fn key_at(&self, index: usize, what: &str) -> Result<&Key> {
        self.keys.get(index).ok_or_else(|| {
            HclDocError::mismatch(
                self.kind().unwrap_or_default(),
                format!("missing {what} (found {} key(s))", self.keys.len()),
                file!(),
                line!(),
            )
        })
    }
}

/// Consecutive comments, as grouped by the front-end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentGroup {
    /// 1-based source line of the first comment
    pub line: usize,
    /// Raw text of each comment, markers included
    pub comments: Vec<String>,
}

/// A parsed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Top-level items in source order
    pub items: Vec<Item>,
    /// All comment groups in source order
    pub comments: Vec<CommentGroup>,
}

/// A parsed file together with the path it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path of the source file
    pub path: PathBuf,
    /// The parsed tree
    pub file: File,
}

impl SourceFile {
    /// Pair a tree with its path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, file: File) -> Self {
        Self { path: path.into(), file }
    }
}

/// Quote `value` as an HCL string literal.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Decode a double-quoted literal; `None` if `text` is not one.
fn unquote(text: &str) -> Option<String> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => return None,
            '\\' => {
                let decoded = match chars.next()? {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    '"' => '"',
                    '\\' => '\\',
                    'u' => hex_char(&mut chars, 4)?,
                    'U' => hex_char(&mut chars, 8)?,
                    _ => return None,
                };
                out.push(decoded);
            }
            c => out.push(c),
        }
    }

    Some(out)
}

fn hex_char(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(r#""web""#, "web" ; "plain")]
    #[test_case(r#""a\"b""#, "a\"b" ; "escaped quote")]
    #[test_case(r#""tab\there""#, "tab\there" ; "escaped tab")]
    #[test_case(r#""été""#, "été" ; "non ascii")]
    #[test_case(r#""\u00e9t\u00e9""#, "été" ; "unicode escape")]
    #[test_case("web", "" ; "bare identifier")]
    #[test_case(r#""broken\q""#, "" ; "unknown escape")]
    #[test_case(r#""a"b""#, "" ; "inner quote")]
    fn test_unquote(text: &str, expected: &str) {
        let key = Key { text: text.to_string(), quoted: text.starts_with('"') };
        assert_eq!(key.unquote(), expected);
    }

    #[test]
    fn test_quote_round_trip() {
        let key = Key::quoted("line\n\"quoted\"");
        assert!(key.quoted);
        assert_eq!(key.unquote(), "line\n\"quoted\"");
    }

    #[test]
    fn test_trim_quotes() {
        assert_eq!(Key::quoted("aws").trim_quotes(), "aws");
        assert_eq!(Key::ident("aws").trim_quotes(), "aws");
        assert_eq!(Key::ident("\"\"aws\"").trim_quotes(), "aws");
    }

    #[test]
    fn test_is_without_keys() {
        let item = Item::new(Vec::new(), Node::Object(Vec::new()));
        assert!(!item.is("variable"));
        assert_eq!(item.kind(), None);
    }

    #[test]
    fn test_named_accessors() {
        let item = Item::new(
            vec![Key::ident("resource"), Key::quoted("aws_instance"), Key::quoted("web")],
            Node::Object(Vec::new()),
        );
        assert_eq!(item.type_key().unwrap().trim_quotes(), "aws_instance");
        assert_eq!(item.resource_name_key().unwrap().trim_quotes(), "web");

        let short = Item::new(vec![Key::ident("provider")], Node::Object(Vec::new()));
        let err = short.name_key().unwrap_err();
        assert!(matches!(
            err,
            HclDocError::StructuralMismatch { ref block, .. } if block == "provider"
        ));
    }

    #[test]
    fn test_object_on_literal_is_mismatch() {
        let item = Item::new(vec![Key::ident("variable")], Node::Literal(Literal::raw("1")));
        assert!(item.object().is_err());
    }
}
