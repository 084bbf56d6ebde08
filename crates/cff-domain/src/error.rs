//! Validation errors

use std::fmt;

/// The specific rule a field broke
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    RequiredMissing,
    TypeMismatch { expected: &'static str },
    PatternMismatch { pattern: String },
    EnumMismatch { allowed: Vec<String> },
    LengthViolation { min: usize },
    RangeViolation { min: i64 },
    InvalidUrl { reason: String },
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::RequiredMissing => write!(f, "field required"),
            Rule::TypeMismatch { expected } => write!(f, "expected {expected}"),
            Rule::PatternMismatch { pattern } => write!(f, "does not match pattern `{pattern}`"),
            Rule::EnumMismatch { allowed } => {
                write!(f, "must be one of: {}", allowed.join(", "))
            }
            Rule::LengthViolation { min } => write!(f, "length must be at least {min}"),
            Rule::RangeViolation { min } => write!(f, "must be greater than or equal to {min}"),
            Rule::InvalidUrl { reason } => write!(f, "invalid http(s) URL: {reason}"),
        }
    }
}

/// One violated field, addressed by a dotted path such as `author.0.family_name`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub rule: Rule,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.rule)
    }
}

/// Every violation found while checking one record against a schema
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{schema} record failed validation:{}", render(.violations))]
pub struct ValidationError {
    pub schema: &'static str,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Violations reported for a given field path
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.field == field)
    }

    /// Whether the given field path was reported at all
    pub fn mentions(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }
}

fn render(violations: &[Violation]) -> String {
    violations.iter().map(|v| format!("\n  - {v}")).collect()
}
