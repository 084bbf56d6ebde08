//! BibTeX entry data structures

use serde_json::{Map, Value};

/// Key under which the entry type is stored in a record mapping
pub const ENTRY_TYPE_KEY: &str = "ENTRYTYPE";

/// Key under which the cite key is stored in a record mapping
pub const ENTRY_ID_KEY: &str = "ID";

/// BibTeX entry type
///
/// Only the categories that map onto a citation file get their own variant;
/// everything else is carried through as written so callers can report it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BibTeXEntryType {
    Software,
    Dataset,
    Misc,
    Other(String),
}

impl BibTeXEntryType {
    /// Parse an entry type from a string (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "software" => Self::Software,
            "dataset" => Self::Dataset,
            "misc" => Self::Misc,
            other => Self::Other(other.to_string()),
        }
    }

    /// Lower-case type name as it appears after the `@`
    pub fn as_str(&self) -> &str {
        match self {
            Self::Software => "software",
            Self::Dataset => "dataset",
            Self::Misc => "misc",
            Self::Other(name) => name,
        }
    }
}

/// A single BibTeX field (key-value pair)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibTeXField {
    pub key: String,
    pub value: String,
}

/// A parsed BibTeX entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibTeXEntry {
    pub cite_key: String,
    pub entry_type: BibTeXEntryType,
    pub fields: Vec<BibTeXField>,
}

impl BibTeXEntry {
    /// Create a new BibTeX entry
    pub fn new(cite_key: impl Into<String>, entry_type: BibTeXEntryType) -> Self {
        Self {
            cite_key: cite_key.into(),
            entry_type,
            fields: Vec::new(),
        }
    }

    /// Add a field to the entry
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push(BibTeXField {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Get a field value by key (case-insensitive)
    pub fn get_field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key.eq_ignore_ascii_case(key))
            .map(|f| f.value.as_str())
    }

    /// Flatten the entry into the raw record mapping consumed by the converter.
    ///
    /// Field keys are lower-cased; a repeated field keeps its last value.
    /// `ENTRYTYPE` and `ID` carry the entry type and cite key.
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert(
            ENTRY_TYPE_KEY.to_string(),
            Value::String(self.entry_type.as_str().to_string()),
        );
        record.insert(ENTRY_ID_KEY.to_string(), Value::String(self.cite_key.clone()));
        for field in &self.fields {
            record.insert(field.key.to_lowercase(), Value::String(field.value.clone()));
        }
        record
    }
}
