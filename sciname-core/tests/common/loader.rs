//! Fixture loading from YAML files

use serde::Deserialize;
use std::path::Path;

/// A single test case from a fixture file
#[derive(Debug, Clone, Deserialize)]
pub struct NameCase {
    pub id: String,
    pub desc: String,
    pub name: String,
    #[serde(default)]
    pub expect: Expected,
}

/// Expected attributes of the parse. Only keys present in the fixture are
/// checked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expected {
    pub parsed: Option<bool>,
    pub canonical: Option<String>,
    pub canonical_full: Option<String>,
    pub stemmed: Option<String>,
    /// Rank as rendered in JSON: `none`, `variety`, ...
    pub rank: Option<String>,
    pub cardinality: Option<u8>,
    pub authors: Option<Vec<String>>,
    pub ex_authors: Option<Vec<String>>,
    pub year: Option<u16>,
    pub parenthesized: Option<bool>,
    pub autonym: Option<bool>,
    pub hybrid_parents: Option<Vec<String>>,
    /// `genus` or `epithet`
    pub hybrid_position: Option<String>,
    /// `approximation` or `comparison`
    pub surrogate: Option<String>,
    /// Warning codes as rendered in JSON, in detection order.
    pub warnings: Option<Vec<String>>,
    pub quality: Option<u32>,
    pub tail: Option<String>,
}

/// Load all test cases from a YAML fixture file
pub fn load_fixtures(path: &Path) -> Vec<NameCase> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {:?}: {}", path, e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {:?}: {}", path, e))
}

/// Load fixtures from the standard fixtures directory
pub fn load_fixtures_by_name(name: &str) -> Vec<NameCase> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.yaml", name));
    load_fixtures(&path)
}
