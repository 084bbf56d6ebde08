//! Reading the source BibTeX record

use std::path::Path;

use cff_domain::Definition;
use tracing::{debug, warn};

use crate::error::{ConvertError, Result};

/// Read a `.bib` file and return its first entry as a raw field mapping
pub fn read_bibtex_file(path: &Path) -> Result<Definition> {
    let content = std::fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "read BibTeX file");
    read_bibtex_str(&content)
}

/// Parse BibTeX text and return its first entry as a raw field mapping
pub fn read_bibtex_str(content: &str) -> Result<Definition> {
    let parsed = cff_bibtex::parse(content.to_string())?;

    for error in &parsed.errors {
        warn!(line = error.line, column = error.column, "{}", error.message);
    }
    if parsed.entries.len() > 1 {
        warn!(
            entries = parsed.entries.len(),
            "only the first BibTeX entry is converted"
        );
    }

    let entry = parsed.into_first_entry()?;
    debug!(cite_key = %entry.cite_key, entry_type = entry.entry_type.as_str(), "selected entry");
    Ok(entry.to_record())
}
