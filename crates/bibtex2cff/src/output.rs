//! Writing the citation file

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::error::{ConvertError, Result};

/// File name used when no output path is given
pub const DEFAULT_OUTPUT: &str = "CITATION.cff";

/// Render a hyphen-keyed document as YAML, keeping key order
pub fn render_cff(document: &Value) -> Result<String> {
    Ok(serde_yaml::to_string(document)?)
}

/// Render and write the document, replacing any existing file
pub fn save_cff(document: &Value, path: &Path) -> Result<()> {
    let rendered = render_cff(document)?;
    std::fs::write(path, rendered).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "wrote citation file");
    Ok(())
}
