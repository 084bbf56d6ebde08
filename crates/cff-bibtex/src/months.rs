//! Built-in month macros
//!
//! Standard BibTeX styles predefine `jan` through `dec`. A bare `month = jan`
//! therefore reads as `January`, while a braced `{jan}` stays literal.

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref MONTHS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("jan", "January");
        m.insert("feb", "February");
        m.insert("mar", "March");
        m.insert("apr", "April");
        m.insert("may", "May");
        m.insert("jun", "June");
        m.insert("jul", "July");
        m.insert("aug", "August");
        m.insert("sep", "September");
        m.insert("oct", "October");
        m.insert("nov", "November");
        m.insert("dec", "December");
        m
    };
}

/// Expand a month macro name (case-insensitive), if it is one
pub fn expand_month_macro(name: &str) -> Option<&'static str> {
    MONTHS.get(name.to_lowercase().as_str()).copied()
}

/// Seed table for the parser's macro lookup
pub(crate) fn builtin_macros() -> HashMap<String, String> {
    MONTHS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_known_month() {
        assert_eq!(expand_month_macro("jan"), Some("January"));
        assert_eq!(expand_month_macro("DEC"), Some("December"));
    }

    #[test]
    fn test_unknown_is_none() {
        assert_eq!(expand_month_macro("january"), None);
        assert_eq!(expand_month_macro("zenodo"), None);
    }

    #[test]
    fn test_builtin_table_has_twelve_months() {
        assert_eq!(builtin_macros().len(), 12);
    }
}
