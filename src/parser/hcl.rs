//! HCL file parser implementation.
//!
//! This module provides the parsing front-end using the `hcl-edit` parser
//! re-exported by `hcl-rs`, and converts its lossless AST into the
//! [`crate::syntax`] tree. Comments and line numbers come from the
//! decor and spans the parser keeps on every structure.

use crate::config::Config;
use crate::error::{ErrorCollector, HclDocError, Result};
use crate::parser::{Parser, SKIP_FILES, TERRAFORM_EXTENSIONS};
use crate::syntax::{CommentGroup, File, Item, Key, Literal, Node, SourceFile};

use hcl::edit::expr::{Expression, ObjectKey};
use hcl::edit::structure::{BlockLabel, Body, Structure};
use hcl::edit::{Decorate, Span};
use hcl::expr::TemplateExpr;
use std::path::Path;
use walkdir::WalkDir;

/// HCL parser for Terraform/OpenTofu files.
///
/// The parser walks a module directory, reads `.tf` files, and builds one
/// [`SourceFile`] per file.
pub struct HclParser {
    /// Configuration for parsing behavior
    config: Config,
}

/// The outcome of reading one directory.
#[derive(Debug, Default)]
pub struct ParsedDirectory {
    /// Parsed files, sorted by path
    pub files: Vec<SourceFile>,
    /// Errors of the files skipped because `continue_on_error` is set
    pub skipped: Vec<HclDocError>,
}

impl HclParser {
    /// Create a new HCL parser with the given configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Parse all Terraform files in a directory.
    ///
    /// Files are returned sorted by path so that assembling them is
    /// reproducible.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory doesn't exist or if parsing fails
    /// for any file (unless `continue_on_error` is enabled in config, in
    /// which case the failure is reported in [`ParsedDirectory::skipped`]).
    pub async fn parse_directory(&self, path: &Path) -> Result<ParsedDirectory> {
        if !path.is_dir() {
            return Err(crate::err!(DirectoryNotFound {
                path: path.to_path_buf(),
            }));
        }

        let mut files = Vec::new();
        let mut error_collector = ErrorCollector::new();

        for entry in WalkDir::new(path)
            .max_depth(self.config.scan.max_depth)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.should_skip(e.path()))
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read directory entry");
                    continue;
                }
            };

            let file_path = entry.path();
            if file_path.is_dir() || !self.is_terraform_file(file_path) {
                continue;
            }

            tracing::debug!(file = %file_path.display(), "Parsing file");

            match self.parse_file(file_path).await {
                Ok(parsed) => files.push(parsed),
                Err(e) => {
                    if self.config.scan.continue_on_error && e.is_recoverable() {
                        tracing::warn!(
                            file = %file_path.display(),
                            "failed to parse file, continuing: {}",
                            e
                        );
                        error_collector.add(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));

        tracing::info!(
            files = files.len(),
            errors = error_collector.count(),
            "Parsing complete"
        );

        Ok(ParsedDirectory {
            files,
            skipped: error_collector.into_errors(),
        })
    }

    /// Parse a single Terraform file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn parse_file(&self, path: &Path) -> Result<SourceFile> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| HclDocError::io(path, e, file!(), line!()))?;

        self.parse_content(&content, path)
    }

    /// Check if a path should be skipped.
    fn should_skip(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if file_name.starts_with('.') {
            tracing::debug!(path = %path.display(), reason = "hidden file/directory", "Skipping path");
            return true;
        }

        if SKIP_FILES.iter().any(|s| file_name == *s) {
            tracing::debug!(path = %path.display(), reason = "known skip file", "Skipping path");
            return true;
        }

        if self.config.scan.exclude_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(file_name) || p.matches_path(path))
                .unwrap_or(false)
        }) {
            tracing::debug!(path = %path.display(), reason = "matches exclude pattern", "Skipping path");
            return true;
        }

        false
    }

    /// Check if a file is a Terraform file.
    fn is_terraform_file(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        TERRAFORM_EXTENSIONS
            .iter()
            .any(|ext| path_str.ends_with(ext))
    }
}

impl Parser for HclParser {
    fn parse_content(&self, content: &str, file_path: &Path) -> Result<SourceFile> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let body = hcl::edit::parser::parse_body(content).map_err(|e| crate::err!(HclParse {
            file: file_path.to_path_buf(),
            message: e.to_string(),
        }))?;

        let source = Source::new(content);
        let file = File {
            items: source.body(&body),
            comments: source.comment_groups(&body),
        };

        Ok(SourceFile::new(file_path, file))
    }
}

/// A comment with the 1-based lines it spans.
#[derive(Debug)]
struct Comment {
    text: String,
    start_line: usize,
    end_line: usize,
}

/// Source text of one file, used to recover raw tokens and line numbers.
struct Source<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> Source<'a> {
    fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    /// 1-based line of a byte offset.
    fn line(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }

    fn body(&self, body: &Body) -> Vec<Item> {
        body.iter().map(|structure| self.structure(structure)).collect()
    }

    fn structure(&self, structure: &Structure) -> Item {
        let item = match structure {
            Structure::Attribute(attr) => Item::new(
                vec![Key::ident(attr.key.as_str())],
                self.expression(&attr.value),
            ),
            Structure::Block(block) => {
                let mut keys = vec![Key::ident(block.ident.as_str())];
                keys.extend(block.labels.iter().map(|label| match label {
                    BlockLabel::String(s) => Key::quoted(s.value()),
                    BlockLabel::Ident(id) => Key::ident(id.as_str()),
                }));

                Item::new(keys, Node::Object(self.body(&block.body)))
            }
        };

        match self.lead_comment(structure) {
            Some(lines) => item.with_lead_comment(lines),
            None => item,
        }
    }

    /// Convert an expression into a node.
    ///
    /// Anything that is not a string, array or object (numbers, bools,
    /// references, function calls, type constraints) becomes a literal holding
    /// the expression's source text.
    fn expression(&self, expr: &Expression) -> Node {
        match expr {
            Expression::String(s) => Node::Literal(Literal {
                text: self.raw(expr),
                value: Some(s.value().clone()),
            }),
            Expression::Array(array) => {
                Node::List(array.iter().map(|value| self.expression(value)).collect())
            }
            Expression::Object(object) => Node::Object(
                object
                    .iter()
                    .map(|(key, value)| {
                        Item::new(vec![self.object_key(key)], self.expression(value.expr()))
                    })
                    .collect(),
            ),
            Expression::StringTemplate(_) | Expression::HeredocTemplate(_) => {
                Node::Literal(Literal {
                    text: self.raw(expr),
                    value: template_value(expr),
                })
            }
            other => Node::Literal(Literal::raw(self.raw(other))),
        }
    }

    fn object_key(&self, key: &ObjectKey) -> Key {
        match key {
            ObjectKey::Ident(id) => Key::ident(id.as_str()),
            ObjectKey::Expression(Expression::String(s)) => Key::quoted(s.value()),
            ObjectKey::Expression(expr) => Key::ident(self.raw(expr)),
        }
    }

    /// Source text of an expression, as written.
    fn raw(&self, expr: &Expression) -> String {
        expr.span()
            .and_then(|span| self.text.get(span))
            .map_or_else(|| expression_text(expr), |text| text.trim().to_string())
    }

    /// The comment group ending on the line right above a structure.
    fn lead_comment(&self, structure: &Structure) -> Option<Vec<String>> {
        let span = structure.span()?;
        let prefix = structure.decor().prefix()?;
        let offset = span.start.checked_sub(prefix.len())?;

        let groups = group(self.comments(prefix, offset));
        let last = groups.last()?;
        let end_line = last.last()?.end_line;

        (end_line + 1 == self.line(span.start))
            .then(|| last.iter().map(|c| c.text.clone()).collect())
    }

    /// Comment groups of a file: the comments in front of each top-level
    /// structure and those after the last one.
    ///
    /// Comments trailing a structure on its own line, and comments inside
    /// block bodies, are not part of any group.
    fn comment_groups(&self, body: &Body) -> Vec<CommentGroup> {
        let mut comments = Vec::new();

        for structure in body.iter() {
            let (Some(span), Some(prefix)) = (structure.span(), structure.decor().prefix()) else {
                continue;
            };
            if let Some(offset) = span.start.checked_sub(prefix.len()) {
                comments.extend(self.comments(prefix, offset));
            }
        }

        if let Some(suffix) = body.decor().suffix() {
            let offset = self.text.len().saturating_sub(suffix.len());
            comments.extend(self.comments(suffix, offset));
        }

        group(comments)
            .into_iter()
            .map(|group| CommentGroup {
                line: group.first().map_or(0, |c| c.start_line),
                comments: group.into_iter().map(|c| c.text).collect(),
            })
            .collect()
    }

    /// Split parser trivia (whitespace and comments only) starting at byte
    /// `offset` into its comments.
    fn comments(&self, trivia: &str, offset: usize) -> Vec<Comment> {
        let mut comments = Vec::new();
        let mut pos = 0;

        while pos < trivia.len() {
            let rest = &trivia[pos..];
            let trimmed = rest.trim_start();
            if trimmed.is_empty() {
                break;
            }

            let start = pos + rest.len() - trimmed.len();
            let len = if trimmed.starts_with("/*") {
                trimmed[2..].find("*/").map_or(trimmed.len(), |i| i + 4)
            } else {
                trimmed.find('\n').unwrap_or(trimmed.len())
            };

            let text = trimmed[..len].trim_end();
            comments.push(Comment {
                text: text.to_string(),
                start_line: self.line(offset + start),
                end_line: self.line(offset + start + text.len().saturating_sub(1)),
            });

            pos = start + len;
        }

        comments
    }
}

/// Group comments on adjacent lines.
fn group(comments: Vec<Comment>) -> Vec<Vec<Comment>> {
    let mut groups: Vec<Vec<Comment>> = Vec::new();

    for comment in comments {
        match groups.last_mut() {
            Some(group) if group.last().is_some_and(|c| comment.start_line <= c.end_line + 1) => {
                group.push(comment);
            }
            _ => groups.push(vec![comment]),
        }
    }

    groups
}

/// Decoded value of a quoted or heredoc template.
fn template_value(expr: &Expression) -> Option<String> {
    match hcl::Expression::from(expr.clone()) {
        hcl::Expression::TemplateExpr(template) => match *template {
            TemplateExpr::QuotedString(s) => Some(s),
            TemplateExpr::Heredoc(heredoc) => Some(heredoc.template),
        },
        _ => None,
    }
}

/// Format an expression back to HCL text.
fn expression_text(expr: &Expression) -> String {
    hcl::format::to_string(&hcl::Expression::from(expr.clone())).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Failed to format expression");
        String::new()
    })
}
