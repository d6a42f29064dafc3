//! Test harness for running fixture cases with stochastic variations

use crate::common::{Expected, Gen, NameCase};
use sciname_core::{Hybrid, HybridPosition, ParsedName, ScientificNameParser, Surrogate};

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub input: String,
    pub seed: u64,
    pub errors: Vec<String>,
}

fn json_str<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        other => format!("{:?}", other),
    }
}

fn check<T: PartialEq + std::fmt::Debug>(
    errors: &mut Vec<String>,
    what: &str,
    expected: &Option<T>,
    actual: T,
) {
    if let Some(expected) = expected {
        if *expected != actual {
            errors.push(format!("{}: expected {:?}, got {:?}", what, expected, actual));
        }
    }
}

/// Compare every attribute the fixture specifies.
fn check_expected(expect: &Expected, name: &ParsedName, errors: &mut Vec<String>) {
    let authorship = name.authorship();
    let owned = |v: Vec<&str>| v.into_iter().map(String::from).collect::<Vec<_>>();

    check(errors, "parsed", &expect.parsed, name.parsed());
    check(errors, "canonical", &expect.canonical, name.canonical_name().to_string());
    check(
        errors,
        "canonical_full",
        &expect.canonical_full,
        name.canonical_name_full().to_string(),
    );
    check(errors, "stemmed", &expect.stemmed, name.canonical_name_stemmed().to_string());
    check(errors, "rank", &expect.rank, json_str(&name.rank()));
    check(errors, "cardinality", &expect.cardinality, name.cardinality());
    let authors = authorship.map(|a| owned(a.authors())).unwrap_or_default();
    check(errors, "authors", &expect.authors, authors);
    let ex_authors = authorship.map(|a| owned(a.ex_authors())).unwrap_or_default();
    check(errors, "ex_authors", &expect.ex_authors, ex_authors);
    let year = authorship.and_then(|a| a.year()).map(|y| y.value);
    check(errors, "year", &expect.year.map(Some), year);
    let parenthesized = authorship.map_or(false, |a| a.parenthesized());
    check(errors, "parenthesized", &expect.parenthesized, parenthesized);
    check(errors, "autonym", &expect.autonym, name.is_autonym());

    let parents = match name.hybrid() {
        Some(Hybrid::Formula { parents }) => Some(parents.clone()),
        _ => None,
    };
    check(errors, "hybrid_parents", &expect.hybrid_parents.clone().map(Some), parents);
    let position = match name.hybrid() {
        Some(Hybrid::Named { position: HybridPosition::Genus }) => Some("genus".to_string()),
        Some(Hybrid::Named { position: HybridPosition::Epithet }) => Some("epithet".to_string()),
        _ => None,
    };
    check(errors, "hybrid_position", &expect.hybrid_position.clone().map(Some), position);
    let surrogate = match name.surrogate() {
        Some(Surrogate::Approximation { .. }) => Some("approximation".to_string()),
        Some(Surrogate::Comparison { .. }) => Some("comparison".to_string()),
        None => None,
    };
    check(errors, "surrogate", &expect.surrogate.clone().map(Some), surrogate);

    let warnings: Vec<String> = name.warnings().iter().map(json_str).collect();
    check(errors, "warnings", &expect.warnings, warnings);
    check(errors, "quality", &expect.quality, name.quality());
    check(errors, "tail", &expect.tail, name.unparsed_tail().to_string());
}

/// Run a single test case (canonical, no variations)
pub fn run_test(case: &NameCase, parser: &ScientificNameParser) -> TestResult {
    let mut errors = Vec::new();
    match parser.parse(&case.name) {
        Ok(name) => {
            check_expected(&case.expect, &name, &mut errors);
            if format!("{}{}", name.consumed(), name.unparsed_tail()) != name.verbatim() {
                errors.push("consumed + tail differs from verbatim".to_string());
            }
            match parser.canonicalize(&name) {
                Ok((canonical, _)) if canonical == name.canonical_name() => {}
                Ok((canonical, _)) => errors.push(format!(
                    "canonical {:?} reparses to {:?}",
                    name.canonical_name(),
                    canonical
                )),
                Err(e) => errors.push(format!("canonical reparse failed: {}", e)),
            }
        }
        Err(e) => errors.push(format!("parse failed: {}", e)),
    }

    TestResult {
        passed: errors.is_empty(),
        input: case.name.clone(),
        seed: 0,
        errors,
    }
}

/// Run test with stochastic whitespace variations
///
/// Applies independent variations:
/// - 30% chance of leading and of trailing whitespace
/// - each single space widened to a geometric run of spaces and tabs
///
/// Whitespace never changes what a name means, so the canonical forms,
/// authorship and hybrid attributes must match the fixture exactly. Quality
/// may only grow, since extra whitespace adds warnings.
pub fn run_with_variations(
    case: &NameCase,
    gen: &mut Gen,
    parser: &ScientificNameParser,
) -> TestResult {
    let mut input = gen.padding();
    for (i, word) in case.name.split(' ').enumerate() {
        if i > 0 {
            if gen.chance(0.5) {
                input.push_str(&gen.whitespace());
            } else {
                input.push(' ');
            }
        }
        input.push_str(word);
    }
    input.push_str(&gen.padding());

    let mut errors = Vec::new();
    match (parser.parse(&case.name), parser.parse(&input)) {
        (Ok(base), Ok(varied)) => {
            let expect = Expected {
                warnings: None,
                quality: None,
                tail: None,
                ..case.expect.clone()
            };
            check_expected(&expect, &varied, &mut errors);
            if varied.quality() < base.quality() {
                errors.push(format!(
                    "quality dropped from {} to {}",
                    base.quality(),
                    varied.quality()
                ));
            }
            let words = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
            if words(varied.unparsed_tail()) != words(base.unparsed_tail()) {
                errors.push(format!(
                    "tail {:?} differs from {:?}",
                    varied.unparsed_tail(),
                    base.unparsed_tail()
                ));
            }
        }
        (Err(e), _) | (_, Err(e)) => errors.push(format!("parse failed: {}", e)),
    }

    TestResult {
        passed: errors.is_empty(),
        input,
        seed: gen.seed,
        errors,
    }
}

impl TestResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case_id: &str) {
        eprintln!("\n=== FAILED: {} ===", case_id);
        eprintln!("Seed: {} (set SCINAME_TEST_SEED={} to reproduce)", self.seed, self.seed);
        eprintln!("\nInput: {:?}", self.input);
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
