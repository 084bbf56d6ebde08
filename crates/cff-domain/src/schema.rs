//! Rule-table schema validation
//!
//! Each schema is a table of [`FieldRule`]s. One generic walker checks a
//! [`Definition`] against a table, coercing values the way a lenient model
//! layer would (digit strings become integers, numbers become text, URLs are
//! re-serialized in canonical form) and collecting every violation before
//! failing.
//!
//! Keys that have no rule are dropped from the normalized mapping.

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use crate::error::{Rule, ValidationError, Violation};
use crate::record::{BibliographicRecord, CitationRecord, Definition, DEFAULT_MESSAGE, LICENSES};

/// Value shape expected for a field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Url,
    Email,
    People,
    Identifiers,
    TextList,
}

/// A constraint applied after the value has the right shape
#[derive(Clone, Debug)]
pub enum Check {
    /// Minimum characters for text, minimum items for lists
    MinLength(usize),
    Pattern(Regex),
    OneOf(&'static [&'static str]),
    AtLeast(i64),
}

/// One row of a schema table
#[derive(Clone, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub checks: Vec<Check>,
    /// Filled in when the field is absent
    pub default: Option<&'static str>,
}

impl FieldRule {
    fn required(field: &'static str, kind: FieldKind) -> Self {
        Self {
            field,
            kind,
            required: true,
            checks: Vec::new(),
            default: None,
        }
    }

    fn optional(field: &'static str, kind: FieldKind) -> Self {
        Self {
            required: false,
            ..Self::required(field, kind)
        }
    }

    fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    fn non_empty(self) -> Self {
        self.check(Check::MinLength(1))
    }

    fn pattern(self, pattern: &str) -> Self {
        self.check(Check::Pattern(Regex::new(pattern).unwrap()))
    }

    fn or_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }
}

lazy_static! {
    static ref PERSON_RULES: Vec<FieldRule> = vec![
        FieldRule::optional("given_name", FieldKind::Text).non_empty(),
        FieldRule::optional("name_particle", FieldKind::Text).non_empty(),
        FieldRule::required("family_name", FieldKind::Text).non_empty(),
        FieldRule::optional("name_suffix", FieldKind::Text).non_empty(),
        FieldRule::optional("orcid", FieldKind::Url),
        FieldRule::optional("affiliation", FieldKind::Text),
        FieldRule::optional("email", FieldKind::Email),
    ];

    static ref IDENTIFIER_RULES: Vec<FieldRule> = vec![
        FieldRule::optional("type", FieldKind::Text),
        FieldRule::optional("value", FieldKind::Text),
        FieldRule::optional("description", FieldKind::Text),
    ];

    static ref BIBLIOGRAPHIC_RULES: Vec<FieldRule> = vec![
        FieldRule::required("author", FieldKind::People).non_empty(),
        FieldRule::required("title", FieldKind::Text).non_empty(),
        FieldRule::required("month", FieldKind::Text)
            .non_empty()
            .pattern(r"^[A-Za-z]+$"),
        FieldRule::required("year", FieldKind::Integer).check(Check::AtLeast(1800)),
        FieldRule::required("publisher", FieldKind::Text).non_empty(),
        FieldRule::required("url", FieldKind::Url),
        FieldRule::required("doi", FieldKind::Text).non_empty(),
        FieldRule::optional("version", FieldKind::Text).non_empty(),
    ];

    static ref CITATION_RULES: Vec<FieldRule> = vec![
        FieldRule::required("cff_version", FieldKind::Text).pattern(r"^1\.2\.\d$"),
        FieldRule::required("title", FieldKind::Text).non_empty(),
        FieldRule::optional("message", FieldKind::Text)
            .non_empty()
            .or_default(DEFAULT_MESSAGE),
        FieldRule::optional("abstract", FieldKind::Text).non_empty(),
        FieldRule::required("author", FieldKind::People).non_empty(),
        FieldRule::optional("identifiers", FieldKind::Identifiers).non_empty(),
        FieldRule::required("doi", FieldKind::Text).non_empty(),
        FieldRule::required("url", FieldKind::Url),
        FieldRule::optional("repository", FieldKind::Url),
        FieldRule::optional("repository_code", FieldKind::Url),
        FieldRule::optional("repository_artifact", FieldKind::Url),
        FieldRule::required("license", FieldKind::Text)
            .non_empty()
            .check(Check::OneOf(&LICENSES)),
        FieldRule::optional("keywords", FieldKind::TextList).non_empty(),
        FieldRule::required("version", FieldKind::Text).non_empty(),
        FieldRule::optional("commit", FieldKind::Text)
            .non_empty()
            .pattern(r"^[a-f0-9]{40}$"),
        FieldRule::required("date_released", FieldKind::Text).pattern(r"^\d{4}-\d{2}-\d{2}$"),
    ];

    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// The two record schemas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schema {
    /// One BibTeX entry, before merging
    Bibliographic,
    /// The merged citation file
    Citation,
}

impl Schema {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bibliographic => "bibliographic",
            Self::Citation => "citation",
        }
    }

    pub fn rules(self) -> &'static [FieldRule] {
        match self {
            Self::Bibliographic => &BIBLIOGRAPHIC_RULES,
            Self::Citation => &CITATION_RULES,
        }
    }

    /// Validate and build the intermediate record
    pub fn bibliographic(fields: &Definition) -> Result<BibliographicRecord, ValidationError> {
        validate(Self::Bibliographic, fields)
    }

    /// Validate and build the final record
    pub fn citation(fields: &Definition) -> Result<CitationRecord, ValidationError> {
        validate(Self::Citation, fields)
    }
}

/// Check `fields` against `schema` and build the typed record from the
/// normalized values.
pub fn validate<T: DeserializeOwned>(
    schema: Schema,
    fields: &Definition,
) -> Result<T, ValidationError> {
    let mut violations = Vec::new();
    let normalized = check_fields(schema.rules(), fields, "", &mut violations);

    if !violations.is_empty() {
        return Err(ValidationError {
            schema: schema.name(),
            violations,
        });
    }

    serde_json::from_value(Value::Object(normalized)).map_err(|_| ValidationError {
        schema: schema.name(),
        violations: vec![Violation {
            field: schema.name().to_string(),
            rule: Rule::TypeMismatch {
                expected: "a well-formed record",
            },
        }],
    })
}

fn check_fields(
    rules: &[FieldRule],
    fields: &Map<String, Value>,
    prefix: &str,
    violations: &mut Vec<Violation>,
) -> Definition {
    let mut normalized = Map::new();

    for rule in rules {
        let path = format!("{prefix}{}", rule.field);
        match fields.get(rule.field).filter(|v| !v.is_null()) {
            Some(value) => {
                if let Some(value) = check_value(rule, value, &path, violations) {
                    normalized.insert(rule.field.to_string(), value);
                }
            }
            None => {
                if let Some(default) = rule.default {
                    normalized.insert(rule.field.to_string(), Value::String(default.to_string()));
                } else if rule.required {
                    violations.push(Violation {
                        field: path,
                        rule: Rule::RequiredMissing,
                    });
                }
            }
        }
    }

    normalized
}

/// Coerce one value to its field kind, then apply the rule's checks
fn check_value(
    rule: &FieldRule,
    value: &Value,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<Value> {
    let before = violations.len();
    let coerced = coerce(rule.kind, value, path, violations)?;

    for check in &rule.checks {
        if let Some(broken) = apply_check(check, &coerced) {
            violations.push(Violation {
                field: path.to_string(),
                rule: broken,
            });
        }
    }

    (violations.len() == before).then_some(coerced)
}

fn coerce(
    kind: FieldKind,
    value: &Value,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<Value> {
    match kind {
        FieldKind::Text => match as_text(value) {
            Some(text) => Some(Value::String(text)),
            None => type_mismatch(path, "a string", violations),
        },
        FieldKind::Integer => match as_integer(value) {
            Some(number) => Some(Value::from(number)),
            None => type_mismatch(path, "an integer", violations),
        },
        FieldKind::Url => match value.as_str() {
            Some(raw) => match canonical_url(raw) {
                Ok(url) => Some(Value::String(url)),
                Err(reason) => {
                    violations.push(Violation {
                        field: path.to_string(),
                        rule: Rule::InvalidUrl { reason },
                    });
                    None
                }
            },
            None => type_mismatch(path, "a URL string", violations),
        },
        FieldKind::Email => match value.as_str() {
            Some(raw) if EMAIL.is_match(raw) => Some(Value::String(raw.to_string())),
            Some(_) => {
                violations.push(Violation {
                    field: path.to_string(),
                    rule: Rule::PatternMismatch {
                        pattern: EMAIL.as_str().to_string(),
                    },
                });
                None
            }
            None => type_mismatch(path, "an email string", violations),
        },
        FieldKind::People => match value.as_array() {
            Some(items) => nested_list(items, &PERSON_RULES, path, violations).map(Value::Array),
            None => type_mismatch(path, "a list of people", violations),
        },
        FieldKind::Identifiers => match value.as_array() {
            Some(items) => {
                nested_list(items, &IDENTIFIER_RULES, path, violations).map(Value::Array)
            }
            None => type_mismatch(path, "a list of identifiers", violations),
        },
        FieldKind::TextList => match value.as_array() {
            Some(items) => text_list(items, path, violations).map(Value::Array),
            None => type_mismatch(path, "a list of strings", violations),
        },
    }
}

fn type_mismatch(
    path: &str,
    expected: &'static str,
    violations: &mut Vec<Violation>,
) -> Option<Value> {
    violations.push(Violation {
        field: path.to_string(),
        rule: Rule::TypeMismatch { expected },
    });
    None
}

/// Validate each element of a list of mappings against `rules`.
///
/// Returns `None` when any element failed.
fn nested_list(
    items: &[Value],
    rules: &[FieldRule],
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<Vec<Value>> {
    let before = violations.len();

    let mut normalized = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item.as_object() {
            Some(fields) => {
                let prefix = format!("{path}.{i}.");
                normalized.push(Value::Object(check_fields(rules, fields, &prefix, violations)));
            }
            None => {
                type_mismatch(&format!("{path}.{i}"), "a mapping", violations);
            }
        }
    }

    (violations.len() == before).then_some(normalized)
}

fn text_list(items: &[Value], path: &str, violations: &mut Vec<Violation>) -> Option<Vec<Value>> {
    let before = violations.len();

    let mut texts = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match as_text(item) {
            Some(text) => texts.push(Value::String(text)),
            None => {
                type_mismatch(&format!("{path}.{i}"), "a string", violations);
            }
        }
    }

    (violations.len() == before).then_some(texts)
}

fn apply_check(check: &Check, value: &Value) -> Option<Rule> {
    match check {
        Check::MinLength(min) => {
            let len = match value {
                Value::String(s) => s.chars().count(),
                Value::Array(items) => items.len(),
                _ => return None,
            };
            (len < *min).then_some(Rule::LengthViolation { min: *min })
        }
        Check::Pattern(regex) => {
            let text = value.as_str()?;
            (!regex.is_match(text)).then(|| Rule::PatternMismatch {
                pattern: regex.as_str().to_string(),
            })
        }
        Check::OneOf(allowed) => {
            let text = value.as_str()?;
            (!allowed.contains(&text)).then(|| Rule::EnumMismatch {
                allowed: allowed.iter().map(|s| s.to_string()).collect(),
            })
        }
        Check::AtLeast(min) => {
            let number = value.as_i64()?;
            (number < *min).then_some(Rule::RangeViolation { min: *min })
        }
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => {
            let digits = s.trim();
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            digits.parse().ok()
        }
        _ => None,
    }
}

/// Parse an absolute http(s) URL and return its canonical serialization
fn canonical_url(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme `{}`", url.scheme()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err("missing host".to_string());
    }
    Ok(url.to_string())
}
