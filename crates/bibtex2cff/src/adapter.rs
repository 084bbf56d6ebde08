//! Entry-type adapter
//!
//! Maps a raw BibTeX record onto the intermediate [`BibliographicRecord`].
//! Software entries keep every field; datasets and `@misc` entries lose
//! `version`, which has no meaning for them.

use cff_bibtex::{BibTeXEntryType, ENTRY_TYPE_KEY};
use cff_domain::{parse_author_string, BibliographicRecord, Definition, Schema};
use serde_json::Value;
use tracing::debug;

use crate::error::{ConvertError, Result};

/// Record shape selected by the entry type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Software,
    Dataset,
}

impl RecordKind {
    /// Select the shape for an entry type tag (case-insensitive)
    pub fn from_entry_type(tag: &str) -> Result<Self> {
        match BibTeXEntryType::from_str(tag) {
            BibTeXEntryType::Software => Ok(Self::Software),
            BibTeXEntryType::Dataset | BibTeXEntryType::Misc => Ok(Self::Dataset),
            BibTeXEntryType::Other(name) => Err(ConvertError::UnsupportedEntryType(name)),
        }
    }

    fn keeps_version(self) -> bool {
        matches!(self, Self::Software)
    }

    /// Drop fields the shape does not carry, then parse and validate
    pub fn build(self, raw: &Definition) -> Result<BibliographicRecord> {
        let mut fields = raw.clone();
        if !self.keeps_version() && fields.remove("version").is_some() {
            debug!(kind = ?self, "dropped version field");
        }

        if let Some(Value::String(authors)) = fields.get("author") {
            let people = parse_author_string(authors);
            debug!(count = people.len(), "parsed author list");
            fields.insert("author".to_string(), serde_json::to_value(people)?);
        }

        Ok(Schema::bibliographic(&fields)?)
    }
}

/// Build the intermediate record for a raw field mapping carrying `ENTRYTYPE`
pub fn adapt(raw: &Definition) -> Result<BibliographicRecord> {
    let tag = raw
        .get(ENTRY_TYPE_KEY)
        .and_then(Value::as_str)
        .ok_or(ConvertError::MissingEntryType)?;
    RecordKind::from_entry_type(tag)?.build(raw)
}
