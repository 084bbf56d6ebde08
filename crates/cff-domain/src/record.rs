//! Intermediate and final record shapes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::person::{Identifier, PersonName};

/// Loosely-typed field mapping, keyed in underscore-case
pub type Definition = Map<String, Value>;

/// Message used when none is supplied
pub const DEFAULT_MESSAGE: &str = "If you use this software, please cite it as below.";

/// Accepted license identifiers
pub const LICENSES: [&str; 16] = [
    "AGPL-3.0-or-later",
    "Apache-2.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "CC-BY-4.0",
    "CC-BY-SA-4.0",
    "CC0-1.0",
    "EPL-2.0",
    "GPL-2.0-or-later",
    "GPL-3.0-or-later",
    "ISC",
    "LGPL-2.1-or-later",
    "LGPL-3.0-or-later",
    "MIT",
    "MPL-2.0",
    "Unlicense",
];

/// A single BibTeX entry after author parsing and validation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BibliographicRecord {
    pub author: Vec<PersonName>,
    pub title: String,
    pub month: String,
    pub year: i64,
    pub publisher: String,
    pub url: String,
    pub doi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl BibliographicRecord {
    /// Field mapping used as the imported merge layer
    pub fn to_definition(&self) -> Result<Definition, serde_json::Error> {
        into_map(serde_json::to_value(self)?)
    }
}

/// The complete citation metadata, in output field order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CitationRecord {
    pub cff_version: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    pub author: Vec<PersonName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<Vec<Identifier>>,
    pub doi: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_artifact: Option<String>,
    pub license: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    pub date_released: String,
}

impl CitationRecord {
    /// Underscore-keyed mapping of the record, absent fields omitted
    pub fn to_definition(&self) -> Result<Definition, serde_json::Error> {
        into_map(serde_json::to_value(self)?)
    }
}

fn into_map(value: Value) -> Result<Definition, serde_json::Error> {
    serde_json::from_value(value)
}
