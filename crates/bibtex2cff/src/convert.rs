//! The conversion pipeline

use std::path::Path;

use cff_domain::{CitationRecord, Definition, Schema};
use serde_json::Value;
use tracing::{debug, info};

use crate::adapter::adapt;
use crate::clock::Clock;
use crate::error::Result;
use crate::keys::to_hyphen_case;
use crate::layers::{merge_layers, Defaults, Layer, Overrides};
use crate::reader::read_bibtex_file;

/// Runs conversions with a fixed set of defaults and overrides.
///
/// Each call builds and discards its own layers; a converter can be reused
/// for any number of records.
pub struct Converter<'a> {
    defaults: Defaults,
    overrides: Overrides,
    clock: &'a dyn Clock,
}

impl<'a> Converter<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self {
            defaults: Defaults::default(),
            overrides: Overrides::default(),
            clock,
        }
    }

    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Merge a raw BibTeX record into a validated citation record
    pub fn convert(&self, raw: &Definition) -> Result<CitationRecord> {
        let imported = adapt(raw)?;
        debug!(title = %imported.title, authors = imported.author.len(), "validated BibTeX record");

        let merged = merge_layers([
            (Layer::Defaults, self.defaults.to_layer(self.clock)),
            (Layer::Imported, imported.to_definition()?),
            (Layer::Overrides, self.overrides.to_layer()?),
        ]);

        let citation = Schema::citation(&merged)?;
        info!(title = %citation.title, version = %citation.version, "built citation record");
        Ok(citation)
    }

    /// Convert and render as the hyphen-keyed document handed to the writer
    pub fn document(&self, raw: &Definition) -> Result<Value> {
        let citation = self.convert(raw)?;
        to_document(&citation)
    }

    /// Read the first entry of a `.bib` file and convert it
    pub fn convert_file(&self, path: &Path) -> Result<Value> {
        let raw = read_bibtex_file(path)?;
        self.document(&raw)
    }
}

/// Hyphen-keyed mapping of a citation record
pub fn to_document(citation: &CitationRecord) -> Result<Value> {
    Ok(to_hyphen_case(&Value::Object(citation.to_definition()?)))
}
