//! Property-based tests for the name parser
//!
//! These tests verify invariants that must hold for ANY input, not just
//! carefully crafted examples. proptest generates inputs and shrinks
//! failures to minimal cases.

use proptest::prelude::*;
use serde_json::Value;

use sciname_core::tables::{APPROXIMATION_MARKERS, AUTHOR_PARTICLES, RANK_MARKERS};
use sciname_core::{render, ParsedName, RenderOptions, ScientificNameParser};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 200,
        max_shrink_iters: 200,
        ..ProptestConfig::default()
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn parse(input: &str) -> Option<std::sync::Arc<ParsedName>> {
    ScientificNameParser::instance().parse(input).ok()
}

/// A lowercase word the grammar reads as a plain epithet.
fn epithet() -> impl Strategy<Value = String> {
    "[a-z]{2,7}(us|a|um|is|ensis)".prop_filter("reserved word", |w| {
        !RANK_MARKERS.contains_key(w.as_str())
            && !APPROXIMATION_MARKERS.contains(w.as_str())
            && !AUTHOR_PARTICLES.contains(w.as_str())
    })
}

fn genus() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,9}"
}

fn author() -> impl Strategy<Value = String> {
    prop_oneof!["[A-Z][a-z]{2,8}", "[A-Z][a-z]{0,4}\\."]
}

/// Well-formed names: genus, species, optional infraspecies and authorship.
fn well_formed() -> impl Strategy<Value = String> {
    (
        genus(),
        epithet(),
        prop::option::of((prop::sample::select(vec!["", "var. ", "subsp. ", "f. "]), epithet())),
        prop::option::of(author()),
        prop::option::of(1753u16..2024),
    )
        .prop_map(|(g, s, infra, author, year)| {
            let mut name = format!("{} {}", g, s);
            if let Some((rank, word)) = infra {
                name.push_str(&format!(" {}{}", rank, word));
            }
            if let Some(author) = author {
                name.push(' ');
                name.push_str(&author);
                if let Some(year) = year {
                    name.push_str(&format!(", {}", year));
                }
            }
            name
        })
}

/// Name-shaped noise: words, abbreviations, years, brackets and hybrid signs.
const NAMELIKE: &str = "[A-Za-z×x().,&\\[\\]?0-9 '-]{0,120}";

/// Characters that can never extend a name word.
fn noise() -> impl Strategy<Value = String> {
    "[$#%@!*+=~^]{1,6}"
}

// =============================================================================
// Property: Parser Never Panics
// =============================================================================

proptest! {
    #![proptest_config(config())]

    /// Any string either parses or is rejected as empty; nothing panics.
    #[test]
    fn parser_never_panics(input in "\\PC{0,200}") {
        let _ = parse(&input);
    }

    /// Name-shaped noise exercises the grammar's backtracking paths. Only
    /// blank input is rejected, and whatever parses has a canonical name
    /// that reparses to itself.
    #[test]
    fn parser_never_panics_namelike(input in NAMELIKE) {
        let parser = ScientificNameParser::instance();
        match parser.parse(&input) {
            Err(e) => {
                prop_assert!(e.is_invalid_argument(), "unexpected error: {}", e);
                prop_assert!(input.trim().is_empty(), "rejected {:?}", input);
            }
            Ok(name) => {
                let (canonical, stemmed) = parser.canonicalize(&name).unwrap();
                prop_assert_eq!(canonical.as_str(), name.canonical_name(), "input {:?}", input);
                prop_assert_eq!(stemmed.as_str(), name.canonical_name_stemmed());
            }
        }
    }
}

// =============================================================================
// Property: Completeness
// =============================================================================

proptest! {
    #![proptest_config(config())]

    /// The consumed prefix and the unparsed tail reassemble the input, and
    /// every position lies inside the consumed prefix in document order.
    /// Only empty input is an error.
    #[test]
    fn consumed_plus_tail_is_verbatim(input in "\\PC{1,120}") {
        let result = ScientificNameParser::instance().parse(&input);
        if let Err(e) = &result {
            prop_assert!(e.is_invalid_argument(), "unexpected error: {}", e);
        }
        if let Ok(name) = result {
            prop_assert_eq!(format!("{}{}", name.consumed(), name.unparsed_tail()), input.clone());
            let mut prev_end = 0;
            for p in name.positions() {
                prop_assert!(p.span.start < p.span.end);
                prop_assert!(p.span.start >= prev_end);
                prop_assert!(p.span.end <= name.consumed().len());
                prop_assert!(input.get(p.span.range()).is_some());
                prev_end = p.span.end;
            }
        }
    }

    /// Well-formed names are consumed entirely with no warnings.
    #[test]
    fn well_formed_names_are_clean(input in well_formed()) {
        let name = parse(&input).unwrap();
        prop_assert!(name.parsed());
        prop_assert_eq!(name.unparsed_tail(), "");
        prop_assert_eq!(name.quality(), 0, "warnings: {:?}", name.warnings());
    }
}

// =============================================================================
// Property: Determinism, Monotonic Quality, Rendering
// =============================================================================

proptest! {
    #![proptest_config(config())]

    /// Two independent parsers agree on every input.
    #[test]
    fn parsing_is_deterministic(input in "\\PC{1,80}") {
        let fresh = ScientificNameParser::default();
        let a = parse(&input);
        let b = fresh.parse(&input).ok();
        prop_assert_eq!(a.as_deref(), b.as_deref());
    }

    /// Appending noise can only make the quality worse.
    #[test]
    fn quality_is_monotonic_under_noise(input in well_formed(), junk in noise()) {
        let clean = parse(&input).unwrap();
        let noisy = parse(&format!("{} {}", input, junk)).unwrap();
        prop_assert!(noisy.quality() > clean.quality());
        prop_assert_eq!(noisy.canonical_name(), clean.canonical_name());
        prop_assert_eq!(noisy.unparsed_tail(), junk.as_str());
    }

    /// Pretty and compact JSON differ only in whitespace.
    #[test]
    fn pretty_and_compact_agree(input in "\\PC{1,80}") {
        if let Some(name) = parse(&input) {
            let compact = render(&name, &RenderOptions::compact()).unwrap();
            let pretty = render(&name, &RenderOptions::pretty()).unwrap();
            let compact: Value = serde_json::from_str(&compact).unwrap();
            let pretty: Value = serde_json::from_str(&pretty).unwrap();
            prop_assert_eq!(compact, pretty);
        }
    }

    /// Parsing a canonical name yields the same canonical name.
    #[test]
    fn canonicalization_is_idempotent(input in well_formed()) {
        let parser = ScientificNameParser::instance();
        let name = parser.parse(&input).unwrap();
        let (canonical, stemmed) = parser.canonicalize(&name).unwrap();
        prop_assert_eq!(canonical.as_str(), name.canonical_name());
        prop_assert_eq!(stemmed.as_str(), name.canonical_name_stemmed());
    }
}
