//! Parser facade.
//!
//! Wires the pipeline together:
//!
//! ```text
//! verbatim ─► tokenize ─► Grammar::candidates ─► Grammar::select
//!          ─► build ─► Arc<ParsedName>
//! ```
//!
//! A parser holds only read-only state (grammar bounds, canonicalizer
//! options) plus the result cache, so one instance can serve any number of
//! threads.

use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::builder::build;
use crate::cache::NameCache;
use crate::canonical::Canonicalizer;
use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::grammar::Grammar;
use crate::name::ParsedName;
use crate::render::{render, RenderOptions};
use crate::tokenizer::tokenize;

static INSTANCE: Lazy<ScientificNameParser> =
    Lazy::new(|| ScientificNameParser::new(ParserConfig::default()));

/// Scientific name parser.
///
/// ```
/// use sciname_core::ScientificNameParser;
///
/// let parser = ScientificNameParser::instance();
/// let name = parser.parse("Bubo bubo (Linnaeus, 1758)").unwrap();
/// assert_eq!(name.canonical_name(), "Bubo bubo");
/// assert_eq!(name.authorship().unwrap().year().unwrap().value, 1758);
/// ```
#[derive(Debug)]
pub struct ScientificNameParser {
    config: ParserConfig,
    grammar: Grammar,
    canonicalizer: Canonicalizer,
    cache: NameCache,
}

impl Default for ScientificNameParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl ScientificNameParser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            grammar: Grammar::new(&config),
            canonicalizer: Canonicalizer::new(&config),
            cache: NameCache::new(config.cache_capacity),
            config,
        }
    }

    /// Process-wide parser with the default configuration.
    pub fn instance() -> &'static ScientificNameParser {
        &INSTANCE
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn cache(&self) -> &NameCache {
        &self.cache
    }

    /// Parse one name string.
    ///
    /// Malformed names are not errors; they come back with an unparsed tail
    /// and a nonzero quality. Only empty or whitespace-only input fails.
    pub fn parse(&self, verbatim: &str) -> Result<Arc<ParsedName>> {
        if verbatim.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "name string is empty or whitespace".to_string(),
            ));
        }
        if let Some(hit) = self.cache.get(verbatim) {
            trace!(verbatim, "cache hit");
            return Ok(hit);
        }

        let tokens = tokenize(verbatim);
        trace!(?tokens, "tokens");
        let candidates = self.grammar.candidates(&tokens);
        debug!(verbatim, candidates = candidates.len(), "matched");
        let best = Grammar::select(candidates, tokens.len());
        let name = Arc::new(build(verbatim, &tokens, best, &self.canonicalizer)?);
        debug!(
            verbatim,
            canonical = name.canonical_name(),
            quality = name.quality(),
            "parsed"
        );

        self.cache.insert(Arc::clone(&name));
        Ok(name)
    }

    /// Like [`parse`](Self::parse), for callers that may have no string.
    pub fn parse_opt(&self, verbatim: Option<&str>) -> Result<Arc<ParsedName>> {
        match verbatim {
            Some(s) => self.parse(s),
            None => Err(Error::InvalidArgument("no name string given".to_string())),
        }
    }

    /// Alias of [`parse`](Self::parse).
    pub fn from_string(&self, verbatim: &str) -> Result<Arc<ParsedName>> {
        self.parse(verbatim)
    }

    /// Reparse the canonical name of `name`, returning the canonical and
    /// stemmed canonical forms of that reparse. For a parsed name these
    /// equal the forms already on `name`.
    pub fn canonicalize(&self, name: &ParsedName) -> Result<(String, String)> {
        if name.canonical_name().is_empty() {
            return Ok((String::new(), String::new()));
        }
        let reparsed = self.parse(name.canonical_name())?;
        Ok((
            reparsed.canonical_name().to_string(),
            reparsed.canonical_name_stemmed().to_string(),
        ))
    }

    pub fn render(&self, name: &ParsedName, options: &RenderOptions) -> Result<String> {
        render(name, options)
    }

    /// All fields, indented when `pretty`.
    pub fn render_json_string(&self, name: &ParsedName, pretty: bool) -> Result<String> {
        name.to_json(pretty)
    }

    /// All fields on a single line.
    pub fn render_compact_json(&self, name: &ParsedName) -> Result<String> {
        name.to_json(false)
    }
}
