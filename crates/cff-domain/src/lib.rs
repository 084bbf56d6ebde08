//! Citation metadata domain types
//!
//! This crate provides the records a BibTeX entry passes through on its way
//! to a `CITATION.cff` document:
//! - PersonName: one author, split heuristically from a BibTeX author list
//! - BibliographicRecord: the validated shape of a single BibTeX entry
//! - CitationRecord: the validated shape of the final citation file
//! - Schema: rule tables and the one validator that consults them

pub mod error;
pub mod names;
pub mod person;
pub mod record;
pub mod schema;

pub use error::{Rule, ValidationError, Violation};
pub use names::{parse_author_string, parse_name, split_authors, NameLayout};
pub use person::{Identifier, PersonName};
pub use record::{BibliographicRecord, CitationRecord, Definition, DEFAULT_MESSAGE, LICENSES};
pub use schema::{validate, Check, FieldKind, FieldRule, Schema};
