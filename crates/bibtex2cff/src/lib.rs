//! Convert a single BibTeX entry into `CITATION.cff` metadata
//!
//! The conversion runs as one synchronous pipeline:
//! 1. read the first entry of a `.bib` file ([`reader`])
//! 2. pick the record shape for its entry type and parse authors ([`adapter`])
//! 3. validate the intermediate record
//! 4. merge defaults, the imported record and overrides ([`layers`])
//! 5. validate the citation record
//! 6. rename keys to hyphen-case ([`keys`]) and write YAML ([`output`])

pub mod adapter;
pub mod cli;
pub mod clock;
pub mod config;
pub mod convert;
pub mod error;
pub mod keys;
pub mod layers;
pub mod logging;
pub mod output;
pub mod reader;

pub use adapter::{adapt, RecordKind};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use convert::Converter;
pub use error::{ConfigError, ConvertError, Result};
pub use keys::{rename_keys, to_hyphen_case};
pub use layers::{merge_layers, Defaults, Layer, Overrides};
pub use output::{render_cff, save_cff, DEFAULT_OUTPUT};
pub use reader::{read_bibtex_file, read_bibtex_str};
