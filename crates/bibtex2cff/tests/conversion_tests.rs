//! End-to-end conversion tests

mod common;

use bibtex2cff::{
    read_bibtex_file, read_bibtex_str, render_cff, save_cff, Clock, ConvertError, Converter,
    Overrides, SystemClock,
};
use cff_domain::{PersonName, LICENSES};
use chrono::NaiveDate;
use common::fixtures::{fixed_clock, fixture_path, write_file};
use serde_json::{json, Value};

// === Worked examples ===

#[test]
fn test_mona_lisa() {
    let clock = fixed_clock();
    let overrides = Overrides {
        repository: Some(
            "https://docs.github.com/en/repositories/managing-your-repositorys-settings-and-features/customizing-your-repository/about-citation-files"
                .to_string(),
        ),
        ..Overrides::default()
    };
    let document = Converter::new(&clock)
        .with_overrides(overrides)
        .convert_file(&fixture_path("mona_lisa.bib"))
        .unwrap();

    assert_eq!(
        document["author"],
        json!([
            {"given-name": "Mona", "family-name": "Lisa"},
            {"given-name": "Hew", "family-name": "Bot"}
        ])
    );
    assert_eq!(document["doi"], "10.5281/zenodo.1234");
    assert_eq!(
        document["repository"],
        "https://docs.github.com/en/repositories/managing-your-repositorys-settings-and-features/customizing-your-repository/about-citation-files"
    );
    assert_eq!(document["version"], "2.0.4");
    assert_eq!(document["title"], "{My Research Software}");
    assert_eq!(document["url"], "https://github.com/github-linguist/linguist");
    assert_eq!(document["cff-version"], "1.2.0");
    assert_eq!(document["license"], "Unlicense");
    assert_eq!(
        document["message"],
        "If you use this software, please cite it as below."
    );
}

#[test]
fn test_output_key_order() {
    let clock = fixed_clock();
    let document = Converter::new(&clock)
        .convert_file(&fixture_path("mona_lisa.bib"))
        .unwrap();
    let keys: Vec<&str> = document
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec![
            "cff-version",
            "title",
            "message",
            "author",
            "doi",
            "url",
            "license",
            "version",
            "date-released",
        ]
    );
}

#[test]
fn test_misc_entry() {
    let raw = read_bibtex_file(&fixture_path("misc.bib")).unwrap();
    assert_eq!(raw["author"], "Test Author");
    assert_eq!(raw["month"], "January");
    assert_eq!(raw["year"], "2022");

    let clock = fixed_clock();
    let overrides = Overrides {
        repository: Some("https://repo.example.com".to_string()),
        ..Overrides::default()
    };
    let document = Converter::new(&clock)
        .with_overrides(overrides)
        .document(&raw)
        .unwrap();
    assert_eq!(
        document["author"],
        json!([{"given-name": "Test", "family-name": "Author"}])
    );
    assert_eq!(document["doi"], "10.1234/5678");
    assert_eq!(document["repository"], "https://repo.example.com/");
}

// === Name parsing through the pipeline ===

fn authors_of(author: &str) -> Vec<PersonName> {
    let raw = read_bibtex_str(&format!(
        "@software{{k, author = {{{author}}}, title = {{T}}, month = jan, year = 2020, \
         publisher = {{P}}, url = {{https://example.com}}, doi = {{10.1/x}}}}"
    ))
    .unwrap();
    let clock = fixed_clock();
    Converter::new(&clock).convert(&raw).unwrap().author
}

#[test]
fn test_given_first_name() {
    assert_eq!(
        authors_of("John Doe"),
        vec![PersonName::new("Doe").with_given_name("John")]
    );
}

#[test]
fn test_family_first_name_with_suffix() {
    assert_eq!(
        authors_of("Doe, John Jr."),
        vec![PersonName::new("Doe")
            .with_given_name("John")
            .with_suffix("Jr.")]
    );
}

#[test]
fn test_author_order_is_kept() {
    assert_eq!(
        authors_of("John Doe and Jane Smith"),
        vec![
            PersonName::new("Doe").with_given_name("John"),
            PersonName::new("Smith").with_given_name("Jane"),
        ]
    );
}

// === Entry types ===

#[test]
fn test_misc_version_is_dropped() {
    let clock = fixed_clock();
    let citation = Converter::new(&clock)
        .convert(&read_bibtex_file(&fixture_path("misc.bib")).unwrap())
        .unwrap();
    // The fixture carries version 9.9.9; only the default survives.
    assert_eq!(citation.version, "0.0.1");
}

#[test]
fn test_unsupported_entry_type() {
    let clock = fixed_clock();
    let err = Converter::new(&clock)
        .convert_file(&fixture_path("article.bib"))
        .unwrap_err();
    match err {
        ConvertError::UnsupportedEntryType(kind) => assert_eq!(kind, "article"),
        other => panic!("unexpected error {other}"),
    }
}

// === Validation ===

#[test]
fn test_invalid_license_lists_allowed_values() {
    let clock = fixed_clock();
    let overrides = Overrides {
        license: Some("WTFPL".to_string()),
        ..Overrides::default()
    };
    let err = Converter::new(&clock)
        .with_overrides(overrides)
        .convert_file(&fixture_path("mona_lisa.bib"))
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("license"));
    for license in LICENSES {
        assert!(message.contains(license), "{license} missing from {message}");
    }
}

#[test]
fn test_every_violation_is_reported() {
    let clock = fixed_clock();
    let err = Converter::new(&clock)
        .convert_file(&fixture_path("incomplete.bib"))
        .unwrap_err();
    let ConvertError::Validation(error) = err else {
        panic!("expected a validation error");
    };

    assert_eq!(error.schema, "bibliographic");
    for field in ["title", "month", "year", "publisher", "url", "doi"] {
        assert!(error.mentions(field), "{field} not reported: {error}");
    }
    assert!(!error.mentions("author"));
}

#[test]
fn test_bad_override_url() {
    let clock = fixed_clock();
    let overrides = Overrides {
        repository_code: Some("not a url".to_string()),
        ..Overrides::default()
    };
    let err = Converter::new(&clock)
        .with_overrides(overrides)
        .convert_file(&fixture_path("mona_lisa.bib"))
        .unwrap_err();
    let ConvertError::Validation(error) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(error.schema, "citation");
    assert!(error.mentions("repository_code"));
}

// === Release date ===

#[test]
fn test_release_date_defaults_to_today() {
    let before = SystemClock.today();
    let document = Converter::new(&SystemClock)
        .convert_file(&fixture_path("mona_lisa.bib"))
        .unwrap();
    let after = SystemClock.today();

    let released = document["date-released"].as_str().unwrap();
    let date = NaiveDate::parse_from_str(released, "%Y-%m-%d").unwrap();
    assert_eq!(date.format("%Y-%m-%d").to_string(), released);
    assert!(before <= date && date <= after, "{date} outside {before}..={after}");
}

#[test]
fn test_release_date_override() {
    let clock = fixed_clock();
    let overrides = Overrides {
        date_released: Some("2017-12-01".to_string()),
        ..Overrides::default()
    };
    let document = Converter::new(&clock)
        .with_overrides(overrides)
        .convert_file(&fixture_path("mona_lisa.bib"))
        .unwrap();
    assert_eq!(document["date-released"], "2017-12-01");
}

// === Output ===

#[test]
fn test_saved_file_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let clock = fixed_clock();
    let document = Converter::new(&clock)
        .convert_file(&fixture_path("mona_lisa.bib"))
        .unwrap();

    let path = dir.path().join("CITATION.cff");
    save_cff(&document, &path).unwrap();

    let written: Value =
        serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, document);
    assert_eq!(written["title"], "{My Research Software}");
    assert!(render_cff(&document).unwrap().starts_with("cff-version: 1.2.0\n"));
}

#[test]
fn test_first_entry_only() {
    let dir = tempfile::tempdir().unwrap();
    let mona_lisa = std::fs::read_to_string(fixture_path("mona_lisa.bib")).unwrap();
    let path = write_file(
        dir.path(),
        "two.bib",
        &format!("{mona_lisa}\n@software{{second, title = {{Second}}}}\n"),
    );

    let clock = fixed_clock();
    let document = Converter::new(&clock).convert_file(&path).unwrap();
    assert_eq!(document["title"], "{My Research Software}");
}
