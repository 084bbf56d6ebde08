//! Layered definition merging
//!
//! A citation record is assembled from three layers, later layers winning:
//! built-in defaults, the imported BibTeX record, then explicit overrides.
//! Merging is shallow: a key present in a later layer replaces the earlier
//! value wholly, lists and nested mappings included.

use cff_domain::{Definition, Identifier, PersonName};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::clock::Clock;

pub const DEFAULT_CFF_VERSION: &str = "1.2.0";
pub const DEFAULT_LICENSE: &str = "Unlicense";
pub const DEFAULT_VERSION: &str = "0.0.1";

/// Name of a merge layer, in precedence order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Defaults,
    Imported,
    Overrides,
}

/// Overridable default values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    #[serde(alias = "cff-version")]
    pub cff_version: Option<String>,
    pub license: Option<String>,
    pub version: Option<String>,
    #[serde(alias = "date-released")]
    pub date_released: Option<String>,
}

impl Defaults {
    /// Resolve the defaults layer, reading the clock only when no release
    /// date was configured.
    pub fn to_layer(&self, clock: &dyn Clock) -> Definition {
        let date_released = match &self.date_released {
            Some(date) => date.clone(),
            None => clock.today().format("%Y-%m-%d").to_string(),
        };

        let mut layer = Definition::new();
        layer.insert(
            "cff_version".to_string(),
            text(self.cff_version.as_deref().unwrap_or(DEFAULT_CFF_VERSION)),
        );
        layer.insert(
            "license".to_string(),
            text(self.license.as_deref().unwrap_or(DEFAULT_LICENSE)),
        );
        layer.insert(
            "version".to_string(),
            text(self.version.as_deref().unwrap_or(DEFAULT_VERSION)),
        );
        layer.insert("date_released".to_string(), Value::String(date_released));
        layer
    }
}

/// Explicitly supplied values; unset fields do not take part in the merge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(alias = "repository-code", skip_serializing_if = "Option::is_none")]
    pub repository_code: Option<String>,
    #[serde(alias = "repository-artifact", skip_serializing_if = "Option::is_none")]
    pub repository_artifact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(alias = "date-released", skip_serializing_if = "Option::is_none")]
    pub date_released: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<Identifier>,
    /// Replaces the imported author list as a whole
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<PersonName>,
}

impl Overrides {
    /// Fill every unset field from `fallback`
    pub fn or(self, fallback: Overrides) -> Overrides {
        fn list<T>(primary: Vec<T>, fallback: Vec<T>) -> Vec<T> {
            if primary.is_empty() {
                fallback
            } else {
                primary
            }
        }

        Overrides {
            message: self.message.or(fallback.message),
            abstract_text: self.abstract_text.or(fallback.abstract_text),
            repository: self.repository.or(fallback.repository),
            repository_code: self.repository_code.or(fallback.repository_code),
            repository_artifact: self.repository_artifact.or(fallback.repository_artifact),
            doi: self.doi.or(fallback.doi),
            license: self.license.or(fallback.license),
            date_released: self.date_released.or(fallback.date_released),
            month: self.month.or(fallback.month),
            year: self.year.or(fallback.year),
            publisher: self.publisher.or(fallback.publisher),
            version: self.version.or(fallback.version),
            keywords: list(self.keywords, fallback.keywords),
            commit: self.commit.or(fallback.commit),
            identifiers: list(self.identifiers, fallback.identifiers),
            author: list(self.author, fallback.author),
        }
    }

    /// The overrides layer: only the fields that were set
    pub fn to_layer(&self) -> Result<Definition, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(self)?)
    }
}

/// Fold layers left to right; a non-null value in a later layer replaces
/// the earlier one, nulls are skipped.
pub fn merge_layers<I>(layers: I) -> Definition
where
    I: IntoIterator<Item = (Layer, Definition)>,
{
    let mut merged = Definition::new();
    for (layer, fields) in layers {
        let mut replaced = 0usize;
        for (key, value) in fields {
            if value.is_null() {
                continue;
            }
            if merged.insert(key, value).is_some() {
                replaced += 1;
            }
        }
        debug!(?layer, total = merged.len(), replaced, "merged layer");
    }
    merged
}

fn text(value: &str) -> Value {
    Value::String(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use serde_json::json;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    fn definition(value: Value) -> Definition {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_builtin_defaults() {
        let layer = Defaults::default().to_layer(&clock());
        assert_eq!(
            Value::Object(layer),
            json!({
                "cff_version": "1.2.0",
                "license": "Unlicense",
                "version": "0.0.1",
                "date_released": "2024-03-01"
            })
        );
    }

    #[test]
    fn test_configured_defaults_win_over_builtins() {
        let defaults = Defaults {
            license: Some("MIT".to_string()),
            date_released: Some("2020-01-01".to_string()),
            ..Defaults::default()
        };
        let layer = defaults.to_layer(&clock());
        assert_eq!(layer["license"], "MIT");
        assert_eq!(layer["date_released"], "2020-01-01");
        assert_eq!(layer["cff_version"], "1.2.0");
    }

    #[test]
    fn test_later_layers_replace_whole_values() {
        let merged = merge_layers([
            (
                Layer::Defaults,
                definition(json!({"version": "0.0.1", "license": "Unlicense"})),
            ),
            (
                Layer::Imported,
                definition(json!({
                    "version": "2.0.4",
                    "author": [{"family_name": "Lisa"}, {"family_name": "Bot"}]
                })),
            ),
            (
                Layer::Overrides,
                definition(json!({"author": [{"family_name": "Doe"}], "license": null})),
            ),
        ]);

        assert_eq!(merged["version"], "2.0.4");
        assert_eq!(merged["license"], "Unlicense");
        assert_eq!(merged["author"], json!([{"family_name": "Doe"}]));
    }

    #[test]
    fn test_empty_overrides_keep_imported_over_defaults() {
        let defaults = Defaults::default().to_layer(&clock());
        let imported = definition(json!({"title": "T", "version": "1.0.0"}));
        let merged = merge_layers([
            (Layer::Defaults, defaults.clone()),
            (Layer::Imported, imported.clone()),
            (Layer::Overrides, Overrides::default().to_layer().unwrap()),
        ]);

        let mut expected = defaults;
        for (key, value) in imported {
            expected.insert(key, value);
        }
        assert_eq!(merged, expected);
        assert_eq!(merged.len(), 5);
    }

    #[test]
    fn test_override_layer_skips_unset_fields() {
        let overrides = Overrides {
            abstract_text: Some("About".to_string()),
            repository_code: Some("https://example.com/code".to_string()),
            year: Some(2022),
            ..Overrides::default()
        };
        assert_eq!(
            Value::Object(overrides.to_layer().unwrap()),
            json!({
                "abstract": "About",
                "repository_code": "https://example.com/code",
                "year": 2022
            })
        );
    }

    #[test]
    fn test_or_prefers_primary() {
        let primary = Overrides {
            doi: Some("10.1/cli".to_string()),
            ..Overrides::default()
        };
        let fallback = Overrides {
            doi: Some("10.1/config".to_string()),
            message: Some("Cite me".to_string()),
            keywords: vec!["config".to_string()],
            ..Overrides::default()
        };
        let combined = primary.or(fallback);
        assert_eq!(combined.doi.as_deref(), Some("10.1/cli"));
        assert_eq!(combined.message.as_deref(), Some("Cite me"));
        assert_eq!(combined.keywords, vec!["config"]);
    }
}
