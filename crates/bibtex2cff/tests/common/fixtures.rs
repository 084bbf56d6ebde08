//! Test fixture loading utilities

use std::path::{Path, PathBuf};

use bibtex2cff::FixedClock;
use chrono::NaiveDate;

/// Get the path to a BibTeX fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join("bibtex")
        .join(name)
}

/// Write `content` as `<dir>/<name>` and return its path
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content)
        .unwrap_or_else(|_| panic!("Failed to write fixture: {}", path.display()));
    path
}

/// A clock pinned to 2024-03-01
#[allow(dead_code)]
pub fn fixed_clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
}
