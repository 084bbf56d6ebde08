//! Author-name parsing
//!
//! BibTeX packs every author into one string joined by `and`. Each segment is
//! then split by one of two layouts: "Family, Given [Suffix]" when it has a
//! comma, or "Given [Suffix] Family" when it does not.
//!
//! The split is a fixed heuristic. It cannot tell a middle name from a
//! suffix, nor a multi-word family name ("van der Berg") from either, and
//! callers relying on the exact token positions below should not expect it
//! to.

use lazy_static::lazy_static;
use regex::Regex;

use crate::person::PersonName;

lazy_static! {
    static ref AND_SEPARATOR: Regex = Regex::new(r"(?i) and ").unwrap();
}

/// How a single name segment is laid out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameLayout {
    /// "Doe, John" or "Doe, John Jr."
    FamilyFirst,
    /// "John Doe" or "John Jr. Doe"
    GivenFirst,
}

impl NameLayout {
    /// Pick the layout for a segment
    pub fn detect(segment: &str) -> Self {
        if segment.contains(',') {
            Self::FamilyFirst
        } else {
            Self::GivenFirst
        }
    }

    /// Split a segment according to this layout
    pub fn split(self, segment: &str) -> PersonName {
        match self {
            Self::FamilyFirst => split_family_first(segment),
            Self::GivenFirst => split_given_first(segment),
        }
    }
}

/// Parse a BibTeX author list into people, keeping input order
pub fn parse_author_string(input: &str) -> Vec<PersonName> {
    split_authors(input)
        .into_iter()
        .map(|segment| parse_name(&segment))
        .collect()
}

/// Split an author list on ` and ` (any case), trimming each segment
pub fn split_authors(input: &str) -> Vec<String> {
    AND_SEPARATOR
        .split(input)
        .map(|segment| segment.trim().to_string())
        .collect()
}

/// Parse one name segment
pub fn parse_name(segment: &str) -> PersonName {
    NameLayout::detect(segment).split(segment)
}

fn split_family_first(segment: &str) -> PersonName {
    let (family, rest) = segment.split_once(',').unwrap_or((segment, ""));
    // Single-space split: ", John Jr." yields ["", "John", "Jr."]
    let tokens: Vec<&str> = rest.split(' ').collect();

    // Empty parts are kept as written; validation rejects them
    let mut person = PersonName::new(family.trim());
    if tokens.len() > 2 {
        person.given_name = Some(tokens[1].trim().to_string());
        person.name_suffix = Some(tokens[2].trim().to_string());
    } else {
        person.given_name = Some(rest.trim().to_string());
    }
    person
}

fn split_given_first(segment: &str) -> PersonName {
    let tokens: Vec<&str> = segment.split_whitespace().collect();
    let Some((family, leading)) = tokens.split_last() else {
        return PersonName::new("");
    };

    let mut person = PersonName::new(*family);
    person.given_name = leading.first().map(|given| given.to_string());
    if tokens.len() == 3 {
        person.name_suffix = Some(tokens[1].to_string());
    }
    person
}
