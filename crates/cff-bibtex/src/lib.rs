//! BibTeX reading for bibtex2cff
//!
//! This crate turns the text of a `.bib` file into [`BibTeXEntry`] values and
//! hands the first one on as a flat field mapping, which is the shape the
//! conversion core consumes.
//!
//! Features:
//! - Nom-based parser for `@string`, `@preamble`, `@comment` and entries
//! - Braced and quoted field values, `#` concatenation, nested braces
//! - Built-in month macros (`jan` expands to `January`)

mod entry;
mod months;
pub mod parser;

pub use entry::{BibTeXEntry, BibTeXEntryType, BibTeXField, ENTRY_ID_KEY, ENTRY_TYPE_KEY};
pub use months::expand_month_macro;
pub use parser::{parse, read_first_entry, BibTeXParseError, BibTeXParseResult, ParseError};
