//! Scientific name parser
//!
//! Parses Latin uninomials, binomials, trinomials, named hybrids and hybrid
//! formulas into a structured [`ParsedName`], and renders it as stable JSON.
//! Malformed input never fails: whatever no rule can consume becomes the
//! unparsed tail and lowers the quality score.
//!
//! # Architecture
//!
//! - **tokenizer.rs** - Raw string → `Token` stream with byte spans
//! - **grammar/** - Productions over the token slice, candidate scoring and selection
//! - **builder.rs** - Selected candidate → `ParsedName`, positions, invariants
//! - **canonical.rs** - Canonical, full and stemmed canonical forms
//! - **render.rs** - serde views and JSON output
//! - **parser.rs** - `ScientificNameParser` facade, singleton, result cache
//! - **tables.rs** - Static rank, author and stemming tables
//!
//! # Example
//!
//! ```
//! use sciname_core::{render_compact, ScientificNameParser};
//!
//! let name = ScientificNameParser::instance().parse("Homo sapiens L.").unwrap();
//! assert_eq!(name.canonical_name(), "Homo sapiens");
//! assert_eq!(name.quality(), 0);
//! assert!(render_compact(&name).unwrap().contains(r#""canonicalName":"Homo sapiens""#));
//! ```

pub mod builder;
pub mod cache;
pub mod canonical;
pub mod config;
pub mod error;
pub mod grammar;
pub mod name;
pub mod parser;
pub mod quality;
pub mod render;
pub mod span;
pub mod tables;
pub mod token;
pub mod tokenizer;

pub use cache::NameCache;
pub use canonical::{stem, Canonicalizer};
pub use config::ParserConfig;
pub use error::{Error, Result};
pub use grammar::{Candidate, Grammar, Production};
pub use name::{
    AuthorTeam, Authorship, Canonical, Hybrid, HybridPosition, ParsedName, Position, PositionKind,
    Rank, Surrogate, Year,
};
pub use parser::ScientificNameParser;
pub use quality::Warning;
pub use render::{
    render, render_compact, render_pretty, Field, RenderOptions, PARSER_VERSION, SCHEMA_VERSION,
};
pub use span::Span;
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize, Tokenizer};
