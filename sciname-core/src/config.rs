//! Parser configuration.

use serde::Deserialize;

use crate::error::Result;

/// Options fixed when a [`ScientificNameParser`](crate::ScientificNameParser)
/// is constructed.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// use sciname_core::ParserConfig;
///
/// let config = ParserConfig::from_json(r#"{ "cacheCapacity": null, "stem": false }"#).unwrap();
/// assert_eq!(config.cache_capacity, None);
/// assert!(!config.stem);
/// assert_eq!(config.max_infraspecies, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Result cache size. `None` is unbounded, `Some(0)` disables caching.
    pub cache_capacity: Option<usize>,
    /// Upper bound on infraspecific epithets per name.
    pub max_infraspecies: usize,
    /// Compute the stemmed canonical name; otherwise it equals the simple one.
    pub stem: bool,
    /// Transliterate diacritics and ligatures in canonical names.
    pub normalize_diacritics: bool,
}

pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;
pub const DEFAULT_MAX_INFRASPECIES: usize = 4;

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            cache_capacity: Some(DEFAULT_CACHE_CAPACITY),
            max_infraspecies: DEFAULT_MAX_INFRASPECIES,
            stem: true,
            normalize_diacritics: true,
        }
    }
}

impl ParserConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_cache_capacity(mut self, capacity: Option<usize>) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_max_infraspecies(mut self, max: usize) -> Self {
        self.max_infraspecies = max;
        self
    }

    pub fn with_stem(mut self, stem: bool) -> Self {
        self.stem = stem;
        self
    }

    pub fn with_normalize_diacritics(mut self, normalize: bool) -> Self {
        self.normalize_diacritics = normalize;
        self
    }
}
