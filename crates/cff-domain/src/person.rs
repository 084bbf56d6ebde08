//! Person and identifier entries of a citation record

use serde::{Deserialize, Serialize};

/// One author of the cited work
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_particle: Option<String>,
    pub family_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl PersonName {
    /// Create a person with just a family name
    pub fn new(family_name: impl Into<String>) -> Self {
        Self {
            family_name: family_name.into(),
            ..Self::default()
        }
    }

    /// Builder method to add given name
    pub fn with_given_name(mut self, given: impl Into<String>) -> Self {
        self.given_name = Some(given.into());
        self
    }

    /// Builder method to add suffix
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.name_suffix = Some(suffix.into());
        self
    }

    /// Builder method to add ORCID
    pub fn with_orcid(mut self, orcid: impl Into<String>) -> Self {
        self.orcid = Some(orcid.into());
        self
    }

    /// Format as "Given Family" for display
    pub fn display_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        parts.extend(self.given_name.as_deref());
        parts.extend(self.name_particle.as_deref());
        parts.push(&self.family_name);
        let mut name = parts.join(" ");
        if let Some(suffix) = &self.name_suffix {
            name.push_str(", ");
            name.push_str(suffix);
        }
        name
    }
}

/// An additional identifier (DOI, URL, SWHID...) for the cited work
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identifier {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
