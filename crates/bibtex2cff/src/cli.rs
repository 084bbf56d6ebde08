//! Command-line surface

use std::path::PathBuf;

use cff_domain::{Identifier, PersonName};
use clap::{Args, Parser};
use tracing::info;

use crate::clock::Clock;
use crate::config::Config;
use crate::convert::Converter;
use crate::error::Result;
use crate::layers::Overrides;
use crate::output::{save_cff, DEFAULT_OUTPUT};

#[derive(Parser, Debug)]
#[command(name = "bibtex2cff")]
#[command(version, about = "Convert a BibTeX entry into a CITATION.cff file")]
pub struct Cli {
    /// BibTeX file to convert; only its first entry is used
    #[arg(value_name = "BIBFILE", value_parser = bib_path)]
    pub bibfile: PathBuf,

    /// Output file
    #[arg(short = 'o', long = "outfile", value_name = "OUTFILE")]
    pub outfile: Option<PathBuf>,

    /// Configuration file (defaults to ./bibtex2cff.toml, then the user config dir)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub fields: FieldArgs,

    #[command(flatten)]
    pub identifiers: IdentifierArgs,

    #[command(flatten)]
    pub authors: AuthorArgs,
}

#[derive(Args, Debug, Default)]
#[command(next_help_heading = "Field overrides")]
pub struct FieldArgs {
    #[arg(long)]
    pub message: Option<String>,
    #[arg(long = "abstract")]
    pub abstract_text: Option<String>,
    #[arg(long)]
    pub repository: Option<String>,
    #[arg(long)]
    pub repository_code: Option<String>,
    #[arg(long)]
    pub repository_artifact: Option<String>,
    #[arg(long)]
    pub doi: Option<String>,
    /// SPDX license identifier
    #[arg(long)]
    pub license: Option<String>,
    /// Release date as YYYY-MM-DD
    #[arg(long)]
    pub date_released: Option<String>,
    #[arg(long)]
    pub month: Option<String>,
    #[arg(long)]
    pub year: Option<i64>,
    #[arg(long)]
    pub publisher: Option<String>,
    /// Version of the cited work
    #[arg(long = "version-string")]
    pub version_string: Option<String>,
    /// Keyword (repeatable)
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,
    #[arg(long)]
    pub commit: Option<String>,
}

/// Identifier lists, zipped by position
#[derive(Args, Debug, Default)]
#[command(next_help_heading = "Identifiers")]
pub struct IdentifierArgs {
    #[arg(long = "identifier-type")]
    pub kind: Vec<String>,
    #[arg(long = "identifier-value")]
    pub value: Vec<String>,
    #[arg(long = "identifier-description")]
    pub description: Vec<String>,
}

/// Author lists, zipped by position into a replacement author list
#[derive(Args, Debug, Default)]
#[command(next_help_heading = "Authors")]
pub struct AuthorArgs {
    #[arg(long)]
    pub family_name: Vec<String>,
    #[arg(long)]
    pub given_name: Vec<String>,
    #[arg(long)]
    pub name_particle: Vec<String>,
    #[arg(long)]
    pub name_suffix: Vec<String>,
    #[arg(long)]
    pub affiliation: Vec<String>,
    #[arg(long)]
    pub orcid: Vec<String>,
    #[arg(long)]
    pub email: Vec<String>,
}

impl IdentifierArgs {
    pub fn to_identifiers(&self) -> Vec<Identifier> {
        let count = longest(&[&self.kind, &self.value, &self.description]);
        (0..count)
            .map(|i| Identifier {
                kind: nth(&self.kind, i),
                value: nth(&self.value, i),
                description: nth(&self.description, i),
            })
            .collect()
    }
}

impl AuthorArgs {
    /// Authors missing a family name get an empty one, which validation rejects
    pub fn to_people(&self) -> Vec<PersonName> {
        let count = longest(&[
            &self.family_name,
            &self.given_name,
            &self.name_particle,
            &self.name_suffix,
            &self.affiliation,
            &self.orcid,
            &self.email,
        ]);
        (0..count)
            .map(|i| PersonName {
                given_name: nth(&self.given_name, i),
                name_particle: nth(&self.name_particle, i),
                family_name: nth(&self.family_name, i).unwrap_or_default(),
                name_suffix: nth(&self.name_suffix, i),
                orcid: nth(&self.orcid, i),
                affiliation: nth(&self.affiliation, i),
                email: nth(&self.email, i),
            })
            .collect()
    }
}

impl Cli {
    /// Overrides given on the command line
    pub fn overrides(&self) -> Overrides {
        let fields = &self.fields;
        Overrides {
            message: fields.message.clone(),
            abstract_text: fields.abstract_text.clone(),
            repository: fields.repository.clone(),
            repository_code: fields.repository_code.clone(),
            repository_artifact: fields.repository_artifact.clone(),
            doi: fields.doi.clone(),
            license: fields.license.clone(),
            date_released: fields.date_released.clone(),
            month: fields.month.clone(),
            year: fields.year,
            publisher: fields.publisher.clone(),
            version: fields.version_string.clone(),
            keywords: fields.keywords.clone(),
            commit: fields.commit.clone(),
            identifiers: self.identifiers.to_identifiers(),
            author: self.authors.to_people(),
        }
    }

    pub fn outfile(&self) -> PathBuf {
        self.outfile
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}

/// Convert the file named on the command line and write the citation file.
///
/// Returns the path written.
pub fn run(cli: &Cli, clock: &dyn Clock) -> Result<PathBuf> {
    let config = Config::discover(cli.config.as_deref())?;
    let overrides = cli.overrides().or(config.overrides);

    let document = Converter::new(clock)
        .with_defaults(config.defaults)
        .with_overrides(overrides)
        .convert_file(&cli.bibfile)?;

    let outfile = cli.outfile();
    save_cff(&document, &outfile)?;
    info!(input = %cli.bibfile.display(), output = %outfile.display(), "conversion finished");
    Ok(outfile)
}

fn bib_path(value: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(value);
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("bib") => Ok(path),
        _ => Err(format!("`{value}` is not a .bib file")),
    }
}

fn longest(lists: &[&Vec<String>]) -> usize {
    lists.iter().map(|list| list.len()).max().unwrap_or(0)
}

fn nth(list: &[String], index: usize) -> Option<String> {
    list.get(index).cloned()
}
