//! BibTeX parser implementation using nom
//!
//! The parser is lenient the way reference managers expect: an entry that
//! fails to parse is recorded as a [`BibTeXParseError`] and scanning resumes
//! at the next `@`.
//!
//! Handles:
//! - `@string` definitions (case-insensitive names, usable in later values)
//! - `@preamble` and `@comment` blocks
//! - Braced and quoted field values, nested braces, `#` concatenation
//! - Bare numbers and macro references, with month macros predefined

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::map,
    sequence::{delimited, preceded, terminated},
    IResult,
};
use std::collections::HashMap;

use crate::entry::{BibTeXEntry, BibTeXEntryType};
use crate::months::builtin_macros;

/// Position and description of an entry that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibTeXParseError {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

/// Result of parsing a BibTeX document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibTeXParseResult {
    pub entries: Vec<BibTeXEntry>,
    pub preambles: Vec<String>,
    /// User `@string` definitions, keyed by lower-cased name
    pub strings: HashMap<String, String>,
    pub errors: Vec<BibTeXParseError>,
}

impl BibTeXParseResult {
    /// Take the first entry of the document.
    ///
    /// A document without entries reports its first syntax error if it has
    /// one, and [`ParseError::NoEntries`] otherwise.
    pub fn into_first_entry(self) -> Result<BibTeXEntry, ParseError> {
        if let Some(entry) = self.entries.into_iter().next() {
            return Ok(entry);
        }
        match self.errors.into_iter().next() {
            Some(error) => Err(ParseError::InvalidSyntax {
                line: error.line,
                column: error.column,
                message: error.message,
            }),
            None => Err(ParseError::NoEntries),
        }
    }
}

/// Error type for parsing failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid BibTeX syntax at line {line}, column {column}: {message}")]
    InvalidSyntax {
        line: u32,
        column: u32,
        message: String,
    },
    #[error("no BibTeX entry found")]
    NoEntries,
}

/// Parse a BibTeX document
pub fn parse(input: String) -> Result<BibTeXParseResult, ParseError> {
    Ok(parse_document(&input))
}

/// Parse a document and return its first entry
pub fn read_first_entry(input: &str) -> Result<BibTeXEntry, ParseError> {
    parse_document(input).into_first_entry()
}

/// Result of parsing an @ block
enum AtBlock {
    Entry(BibTeXEntry),
    String(String, String),
    Preamble(String),
    Comment,
}

fn parse_document(input: &str) -> BibTeXParseResult {
    let mut result = BibTeXParseResult {
        entries: Vec::new(),
        preambles: Vec::new(),
        strings: HashMap::new(),
        errors: Vec::new(),
    };
    let mut macros = builtin_macros();
    let mut remaining = skip_junk(input);

    while !remaining.is_empty() {
        match parse_at_block(remaining, &macros) {
            Ok((rest, block)) => {
                match block {
                    AtBlock::Entry(entry) => result.entries.push(entry),
                    AtBlock::String(name, value) => {
                        macros.insert(name.clone(), value.clone());
                        result.strings.insert(name, value);
                    }
                    AtBlock::Preamble(text) => result.preambles.push(text),
                    AtBlock::Comment => {}
                }
                remaining = rest;
            }
            Err(_) => {
                let (line, column) = position_of(input, remaining);
                result.errors.push(BibTeXParseError {
                    line,
                    column,
                    message: "failed to parse entry".to_string(),
                });
                // Resume at the next block
                remaining = &remaining[1..];
            }
        }
        remaining = skip_junk(remaining);
    }

    result
}

/// Advance to the next `@`, skipping text and `%` comments in between
fn skip_junk(input: &str) -> &str {
    let mut rest = input;
    loop {
        let trimmed = rest.trim_start();
        if let Some(comment) = trimmed.strip_prefix('%') {
            rest = comment.find('\n').map_or("", |pos| &comment[pos..]);
            continue;
        }
        return match trimmed.find(['@', '%']) {
            Some(0) => trimmed,
            Some(pos) if trimmed.as_bytes()[pos] == b'%' => {
                rest = &trimmed[pos..];
                continue;
            }
            Some(pos) => &trimmed[pos..],
            None => "",
        };
    }
}

/// 1-based line and column of `rest` inside `input`
fn position_of(input: &str, rest: &str) -> (u32, u32) {
    let consumed = &input[..input.len() - rest.len()];
    let line = consumed.matches('\n').count() + 1;
    let column = consumed
        .rsplit('\n')
        .next()
        .map_or(0, |tail| tail.chars().count())
        + 1;
    (line as u32, column as u32)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')(input)
}

/// Parse an @ block (entry, string, preamble, or comment)
fn parse_at_block<'a>(
    input: &'a str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, AtBlock> {
    let (rest, kind) = preceded(
        terminated(char('@'), multispace0),
        take_while1(|c: char| c.is_ascii_alphanumeric()),
    )(input)?;

    match kind.to_lowercase().as_str() {
        "string" => {
            let (rest, (name, value)) = braced_body(rest, |body| {
                let (body, name) = identifier(body)?;
                let (body, _) = delimited(multispace0, char('='), multispace0)(body)?;
                let (body, value) = parse_field_value(body, macros)?;
                Ok((body, (name.to_lowercase(), value)))
            })?;
            Ok((rest, AtBlock::String(name, value)))
        }
        "preamble" => {
            let (rest, text) = braced_body(rest, |body| parse_field_value(body, macros))?;
            Ok((rest, AtBlock::Preamble(text)))
        }
        "comment" => {
            let (rest, _) = multispace0(rest)?;
            if rest.starts_with('{') {
                let (rest, _) = parse_braced_content(rest)?;
                Ok((rest, AtBlock::Comment))
            } else {
                let end = rest.find('\n').unwrap_or(rest.len());
                Ok((&rest[end..], AtBlock::Comment))
            }
        }
        _ => {
            let entry_type = BibTeXEntryType::from_str(kind);
            let (rest, entry) =
                braced_body(rest, |body| parse_entry_body(body, entry_type, macros))?;
            Ok((rest, AtBlock::Entry(entry)))
        }
    }
}

/// Run `inner` between `{` and `}`, allowing whitespace on both sides
fn braced_body<'a, T>(
    input: &'a str,
    inner: impl FnOnce(&'a str) -> IResult<&'a str, T>,
) -> IResult<&'a str, T> {
    let (rest, _) = delimited(multispace0, char('{'), multispace0)(input)?;
    let (rest, value) = inner(rest)?;
    let (rest, _) = preceded(multispace0, char('}'))(rest)?;
    Ok((rest, value))
}

fn parse_entry_body<'a>(
    input: &'a str,
    entry_type: BibTeXEntryType,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, BibTeXEntry> {
    let (rest, cite_key) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || "_-:./+".contains(c))(input)?;
    let (mut rest, _) = preceded(multispace0, char(','))(rest)?;

    let mut entry = BibTeXEntry::new(cite_key, entry_type);
    loop {
        let (after_ws, _) = multispace0(rest)?;
        if after_ws.starts_with('}') {
            return Ok((after_ws, entry));
        }

        let (after_field, (key, value)) = parse_single_field(after_ws, macros)?;
        entry.add_field(key, value);

        // Trailing comma is optional on the last field
        let (after_field, _) = multispace0(after_field)?;
        rest = after_field.strip_prefix(',').unwrap_or(after_field);
    }
}

fn parse_single_field<'a>(
    input: &'a str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, (&'a str, String)> {
    let (rest, key) = identifier(input)?;
    let (rest, _) = delimited(multispace0, char('='), multispace0)(rest)?;
    let (rest, value) = parse_field_value(rest, macros)?;
    Ok((rest, (key, value)))
}

/// Parse a field value: one or more parts joined with `#`
fn parse_field_value<'a>(
    input: &'a str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, String> {
    let mut value = String::new();
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0(remaining)?;
        let (rest, part) = alt((
            parse_braced_value,
            parse_quoted_value,
            map(take_while1(|c: char| c.is_ascii_digit()), |s: &str| {
                s.to_string()
            }),
            map(identifier, |name: &str| {
                macros
                    .get(&name.to_lowercase())
                    .cloned()
                    .unwrap_or_else(|| name.to_string())
            }),
        ))(rest)?;
        value.push_str(&part);

        let (rest, _) = multispace0(rest)?;
        match rest.strip_prefix('#') {
            Some(next) => remaining = next,
            None => return Ok((rest, value)),
        }
    }
}

/// Parse a braced value, dropping only the outermost braces
fn parse_braced_value(input: &str) -> IResult<&str, String> {
    let (rest, content) = parse_braced_content(input)?;
    Ok((rest, content[1..content.len() - 1].to_string()))
}

/// Match a balanced `{...}` group, returning it with its braces
fn parse_braced_content(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('{') {
        return Err(nom_error(input));
    }

    let mut depth = 0usize;
    let mut chars = input.char_indices();
    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[pos + 1..], &input[..pos + 1]));
                }
            }
            '\\' => {
                chars.next();
            }
            _ => {}
        }
    }

    Err(nom_error(input))
}

/// Parse a quoted value; quotes inside braces do not terminate it
fn parse_quoted_value(input: &str) -> IResult<&str, String> {
    let Some(body) = input.strip_prefix('"') else {
        return Err(nom_error(input));
    };

    let mut value = String::new();
    let mut depth = 0usize;
    let mut chars = body.char_indices();
    while let Some((pos, c)) = chars.next() {
        match c {
            '"' if depth == 0 => return Ok((&body[pos + 1..], value)),
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '\\' => {
                value.push(c);
                if let Some((_, escaped)) = chars.next() {
                    value.push(escaped);
                }
                continue;
            }
            _ => {}
        }
        value.push(c);
    }

    Err(nom_error(input))
}

fn nom_error(input: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Char))
}
