//! Merges per-file extraction results into one [`Doc`].
//!
//! Files are processed in the order given. Providers and resources keep
//! that order; inputs and outputs are sorted once every file is merged.

use crate::error::Result;
use crate::extract;
use crate::syntax::SourceFile;
use crate::types::{by_name, by_required, Doc};
use std::path::Path;

/// File stem whose header comment documents the module.
const MAIN_FILE_STEM: &str = "main";

/// Build the documentation model from `files`.
///
/// With `sort_by_required`, inputs without a default come first; otherwise
/// inputs are ordered by name. Outputs are always ordered by name.
///
/// # Errors
///
/// Returns the first extraction error, stamped with the offending file.
pub fn create(files: &[SourceFile], sort_by_required: bool) -> Result<Doc> {
    let mut doc = Doc::default();

    for source in files {
        merge_file(&mut doc, source).map_err(|e| e.in_file(&source.path))?;
    }

    if sort_by_required {
        doc.inputs.sort_by(by_required);
    } else {
        doc.inputs.sort_by(by_name);
    }
    doc.outputs.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!(
        files = files.len(),
        providers = doc.providers.len(),
        resources = doc.resources.len(),
        inputs = doc.inputs.len(),
        outputs = doc.outputs.len(),
        "Assembled documentation"
    );

    Ok(doc)
}

fn merge_file(doc: &mut Doc, source: &SourceFile) -> Result<()> {
    let list = &source.file.items;
    tracing::debug!(file = %source.path.display(), items = list.len(), "Extracting file");

    let version = extract::version(list)?;
    if !version.is_empty() {
        doc.version = version;
    }

    doc.providers.extend(extract::providers(list)?);
    doc.resources.extend(extract::resources(list)?);
    doc.inputs.extend(extract::inputs(list)?);
    doc.outputs.extend(extract::outputs(list)?);

    if is_main(&source.path) {
        if let Some(group) = source.file.comments.first() {
            doc.comment = extract::header(group);
        }
    }

    Ok(())
}

fn is_main(path: &Path) -> bool {
    path.file_stem().and_then(|s| s.to_str()) == Some(MAIN_FILE_STEM)
}
