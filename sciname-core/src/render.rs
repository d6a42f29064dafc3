//! JSON rendering.
//!
//! Rendering is a read-only projection of a [`ParsedName`] through borrowed
//! view structs; it can run any number of times with different options.
//!
//! Optional attributes (`authorship`, `hybrid`, `surrogate`, years, empty
//! author lists) are omitted, never rendered as `null`. Top-level keys
//! always appear in [`Field::ALL`] order.

use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::name::{
    AuthorTeam, Authorship, Hybrid, HybridPosition, ParsedName, PositionKind, Rank, Surrogate,
};
use crate::quality::Warning;

/// Version of the JSON layout produced here.
pub const SCHEMA_VERSION: u32 = 1;

/// Version of this crate, rendered as `parserVersion`.
pub const PARSER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Top-level keys of the rendered object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SchemaVersion,
    ParserVersion,
    Id,
    Verbatim,
    Parsed,
    CanonicalName,
    CanonicalNameFull,
    CanonicalNameStemmed,
    Rank,
    Cardinality,
    Authorship,
    Hybrid,
    Surrogate,
    Autonym,
    Quality,
    Warnings,
    UnparsedTail,
    Positions,
}

impl Field {
    /// Every field, in rendering order.
    pub const ALL: [Field; 18] = [
        Field::SchemaVersion,
        Field::ParserVersion,
        Field::Id,
        Field::Verbatim,
        Field::Parsed,
        Field::CanonicalName,
        Field::CanonicalNameFull,
        Field::CanonicalNameStemmed,
        Field::Rank,
        Field::Cardinality,
        Field::Authorship,
        Field::Hybrid,
        Field::Surrogate,
        Field::Autonym,
        Field::Quality,
        Field::Warnings,
        Field::UnparsedTail,
        Field::Positions,
    ];

    /// JSON key.
    pub fn key(self) -> &'static str {
        match self {
            Field::SchemaVersion => "schemaVersion",
            Field::ParserVersion => "parserVersion",
            Field::Id => "id",
            Field::Verbatim => "verbatim",
            Field::Parsed => "parsed",
            Field::CanonicalName => "canonicalName",
            Field::CanonicalNameFull => "canonicalNameFull",
            Field::CanonicalNameStemmed => "canonicalNameStemmed",
            Field::Rank => "rank",
            Field::Cardinality => "cardinality",
            Field::Authorship => "authorship",
            Field::Hybrid => "hybrid",
            Field::Surrogate => "surrogate",
            Field::Autonym => "autonym",
            Field::Quality => "quality",
            Field::Warnings => "warnings",
            Field::UnparsedTail => "unparsedTail",
            Field::Positions => "positions",
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.key() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown field {:?}", s)))
    }
}

/// How to render a name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Indent with two spaces; otherwise no insignificant whitespace.
    pub pretty: bool,
    /// Restrict output to these top-level keys. Order is always that of
    /// [`Field::ALL`]; absent optional keys stay absent.
    pub fields: Option<Vec<Field>>,
}

impl RenderOptions {
    pub fn compact() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true, fields: None }
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields = Some(fields.into_iter().collect());
        self
    }
}

/// Render `name` as JSON.
pub fn render(name: &ParsedName, options: &RenderOptions) -> Result<String> {
    let view = NameView::new(name);
    let Some(fields) = &options.fields else {
        return Ok(write(&view, options.pretty)?);
    };

    let mut value = serde_json::to_value(&view)?;
    if let Value::Object(map) = &mut value {
        map.retain(|key, _| fields.iter().any(|f| f.key() == key.as_str()));
    }
    Ok(write(&value, options.pretty)?)
}

/// Single-line JSON.
pub fn render_compact(name: &ParsedName) -> Result<String> {
    render(name, &RenderOptions::compact())
}

/// Indented JSON.
pub fn render_pretty(name: &ParsedName) -> Result<String> {
    render(name, &RenderOptions::pretty())
}

fn write<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

impl ParsedName {
    /// Render with all fields.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        render(self, &RenderOptions { pretty, fields: None })
    }
}

// ============================================================================
// Views
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NameView<'n> {
    schema_version: u32,
    parser_version: &'static str,
    id: String,
    verbatim: &'n str,
    parsed: bool,
    canonical_name: &'n str,
    canonical_name_full: &'n str,
    canonical_name_stemmed: &'n str,
    rank: Rank,
    cardinality: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    authorship: Option<AuthorshipView<'n>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hybrid: Option<HybridView<'n>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    surrogate: Option<SurrogateView<'n>>,
    autonym: bool,
    quality: u32,
    warnings: Vec<WarningView>,
    unparsed_tail: &'n str,
    positions: Vec<(PositionKind, usize, usize)>,
}

impl<'n> NameView<'n> {
    fn new(name: &'n ParsedName) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            parser_version: PARSER_VERSION,
            id: name.id().hyphenated().to_string(),
            verbatim: name.verbatim(),
            parsed: name.parsed(),
            canonical_name: name.canonical_name(),
            canonical_name_full: name.canonical_name_full(),
            canonical_name_stemmed: name.canonical_name_stemmed(),
            rank: name.rank(),
            cardinality: name.cardinality(),
            authorship: name.authorship().map(AuthorshipView::new),
            hybrid: name.hybrid().map(HybridView::new),
            surrogate: name.surrogate().map(SurrogateView::new),
            autonym: name.is_autonym(),
            quality: name.quality(),
            warnings: name.warnings().iter().copied().map(WarningView::new).collect(),
            unparsed_tail: name.unparsed_tail(),
            positions: name
                .positions()
                .iter()
                .map(|p| (p.kind, p.span.start, p.span.end))
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthorshipView<'n> {
    verbatim: &'n str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    authors: Vec<&'n str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ex_authors: Vec<&'n str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    in_authors: Vec<&'n str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<u16>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    year_approximate: bool,
    parenthesized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    basionym: Option<TeamView<'n>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    combination: Option<TeamView<'n>>,
}

impl<'n> AuthorshipView<'n> {
    fn new(a: &'n Authorship) -> Self {
        let year = a.year();
        Self {
            verbatim: &a.verbatim,
            authors: a.authors(),
            ex_authors: a.ex_authors(),
            in_authors: a.in_authors(),
            year: year.map(|y| y.value),
            year_approximate: year.map_or(false, |y| y.approximate),
            parenthesized: a.parenthesized(),
            basionym: a.basionym.as_ref().map(TeamView::new),
            combination: a.combination.as_ref().map(TeamView::new),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TeamView<'n> {
    #[serde(skip_serializing_if = "no_names")]
    authors: &'n [String],
    #[serde(skip_serializing_if = "no_names")]
    ex_authors: &'n [String],
    #[serde(skip_serializing_if = "no_names")]
    in_authors: &'n [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<u16>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    year_approximate: bool,
}

impl<'n> TeamView<'n> {
    fn new(team: &'n AuthorTeam) -> Self {
        Self {
            authors: &team.authors,
            ex_authors: &team.ex_authors,
            in_authors: &team.in_authors,
            year: team.year.map(|y| y.value),
            year_approximate: team.year.map_or(false, |y| y.approximate),
        }
    }
}

fn no_names(names: &&[String]) -> bool {
    names.is_empty()
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum HybridView<'n> {
    Formula { parents: &'n [String] },
    Named { position: HybridPosition },
}

impl<'n> HybridView<'n> {
    fn new(hybrid: &'n Hybrid) -> Self {
        match hybrid {
            Hybrid::Formula { parents } => HybridView::Formula { parents },
            Hybrid::Named { position } => HybridView::Named { position: *position },
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum SurrogateView<'n> {
    Approximation { marker: &'n str },
    Comparison { marker: &'n str },
}

impl<'n> SurrogateView<'n> {
    fn new(surrogate: &'n Surrogate) -> Self {
        match surrogate {
            Surrogate::Approximation { marker } => SurrogateView::Approximation { marker },
            Surrogate::Comparison { marker } => SurrogateView::Comparison { marker },
        }
    }
}

#[derive(Serialize)]
struct WarningView {
    code: Warning,
    weight: u32,
    message: &'static str,
}

impl WarningView {
    fn new(warning: Warning) -> Self {
        Self {
            code: warning,
            weight: warning.weight(),
            message: warning.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::canonical::Canonicalizer;
    use crate::grammar::Grammar;
    use crate::tokenizer::tokenize;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(input: &str) -> ParsedName {
        let tokens = tokenize(input);
        let candidate = Grammar::default().best(&tokens);
        build(input, &tokens, candidate, &Canonicalizer::default()).unwrap()
    }

    fn value(name: &ParsedName, options: &RenderOptions) -> Value {
        serde_json::from_str(&render(name, options).unwrap()).unwrap()
    }

    #[test]
    fn test_key_order() {
        let name = parse("Bubo bubo (Linnaeus, 1758)");
        let json = render_compact(&name).unwrap();
        let keys = [
            "\"schemaVersion\"",
            "\"id\"",
            "\"verbatim\"",
            "\"canonicalName\"",
            "\"authorship\"",
            "\"quality\"",
            "\"positions\"",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| json.find(k).unwrap_or_else(|| panic!("{} missing", k)))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", json);
    }

    #[test]
    fn test_authorship_object() {
        let name = parse("Bubo bubo (Linnaeus, 1758)");
        let v = value(&name, &RenderOptions::default());
        assert_eq!(
            v["authorship"],
            json!({
                "verbatim": "(Linnaeus, 1758)",
                "authors": ["Linnaeus"],
                "year": 1758,
                "parenthesized": true,
                "basionym": { "authors": ["Linnaeus"], "year": 1758 }
            })
        );
        assert_eq!(v["rank"], json!("none"));
        assert_eq!(v["positions"][0], json!(["genus", 0, 4]));
    }

    #[test]
    fn test_optional_fields_omitted() {
        let v = value(&parse("Homo sapiens"), &RenderOptions::default());
        let map = v.as_object().unwrap();
        assert!(!map.contains_key("authorship"));
        assert!(!map.contains_key("hybrid"));
        assert!(!map.contains_key("surrogate"));
        assert!(!render_compact(&parse("Homo sapiens")).unwrap().contains("null"));
    }

    #[test]
    fn test_hybrid_views() {
        let v = value(&parse("Aus bus × Aus cus"), &RenderOptions::default());
        assert_eq!(v["hybrid"], json!({ "kind": "formula", "parents": ["Aus bus", "Aus cus"] }));
        let v = value(&parse("× Aus bus"), &RenderOptions::default());
        assert_eq!(v["hybrid"], json!({ "kind": "named", "position": "genus" }));
    }

    #[test]
    fn test_warnings_view() {
        let v = value(&parse("Homo sapiens $$$"), &RenderOptions::default());
        assert_eq!(v["unparsedTail"], json!("$$$"));
        assert_eq!(v["warnings"][0]["code"], json!("tailUnparsed"));
        assert_eq!(v["warnings"][0]["weight"], json!(3));
    }

    #[test]
    fn test_field_selection() {
        let name = parse("Homo sapiens L.");
        let options = RenderOptions::compact().with_fields([Field::Quality, Field::CanonicalName]);
        assert_eq!(
            render(&name, &options).unwrap(),
            r#"{"canonicalName":"Homo sapiens","quality":0}"#
        );
        let options = RenderOptions::compact().with_fields([Field::Hybrid]);
        assert_eq!(render(&name, &options).unwrap(), "{}");
    }

    #[test]
    fn test_pretty_and_compact_agree() {
        let name = parse("Aus bus var. cus (L.) Mill. 1768");
        let compact = render_compact(&name).unwrap();
        let pretty = render_pretty(&name).unwrap();
        assert!(!compact.contains('\n'));
        assert!(pretty.contains("\n  \"verbatim\""));
        assert_eq!(
            serde_json::from_str::<Value>(&compact).unwrap(),
            serde_json::from_str::<Value>(&pretty).unwrap()
        );
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.key().parse::<Field>().unwrap(), field);
        }
        assert!("nope".parse::<Field>().unwrap_err().is_invalid_argument());
    }
}
