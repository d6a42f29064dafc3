//! Canonical forms.
//!
//! Three forms are produced from a matched name:
//!
//! - **simple** - name words only: no authorship, rank markers, annotations
//!   or hybrid signs on names. Subgenus is omitted.
//! - **full** - simple plus rank markers (normalized, `ssp` → `subsp.`) and
//!   hybrid signs.
//! - **stemmed** - simple with each epithet reduced by [`stem`]. Genus is
//!   never stemmed.
//!
//! Hybrid formula parents are joined with ` × ` in every form.
//!
//! Canonicalization is idempotent: parsing a simple canonical name yields
//! the same simple canonical name.

use crate::config::ParserConfig;
use crate::grammar::node::{EpithetNode, GenusNode, NameNode, SpeciesNode};
use crate::name::Canonical;
use crate::quality::Warning;
use crate::tables::{MIN_STEM_LEN, RANK_MARKERS, STEM_SUFFIXES, TRANSLITERATIONS};
use crate::tokenizer::HYBRID_SIGN;

/// Builds canonical forms with the configured normalization options.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    stem: bool,
    normalize_diacritics: bool,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Canonicalizer::new(&ParserConfig::default())
    }
}

impl Canonicalizer {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            stem: config.stem,
            normalize_diacritics: config.normalize_diacritics,
        }
    }

    /// Canonical forms of `node`, plus `NonAsciiCharacters` if anything had
    /// to be transliterated.
    pub fn canonicalize(&self, node: &NameNode<'_>) -> (Canonical, Vec<Warning>) {
        let mut forms = Forms::new(self);
        forms.name(node);
        let warnings = if forms.transliterated {
            vec![Warning::NonAsciiCharacters]
        } else {
            Vec::new()
        };
        let stemmed = if self.stem { forms.stemmed } else { forms.simple.clone() };
        let canonical = Canonical {
            simple: forms.simple,
            full: forms.full,
            stemmed,
        };
        (canonical, warnings)
    }

    fn normalize(&self, word: &str, transliterated: &mut bool) -> String {
        if !self.normalize_diacritics || word.is_ascii() {
            return word.to_string();
        }
        let mut out = String::with_capacity(word.len());
        for c in word.chars() {
            match TRANSLITERATIONS.get(&c) {
                Some(ascii) => {
                    *transliterated = true;
                    out.push_str(ascii);
                }
                None => out.push(c),
            }
        }
        out
    }
}

/// The three forms under construction.
struct Forms<'c> {
    canonicalizer: &'c Canonicalizer,
    simple: String,
    full: String,
    stemmed: String,
    transliterated: bool,
}

impl<'c> Forms<'c> {
    fn new(canonicalizer: &'c Canonicalizer) -> Self {
        Self {
            canonicalizer,
            simple: String::new(),
            full: String::new(),
            stemmed: String::new(),
            transliterated: false,
        }
    }

    fn name(&mut self, node: &NameNode<'_>) {
        match node {
            NameNode::Uninomial(u) => self.genus(&u.word),
            NameNode::Species(s) => self.species(s),
            NameNode::Approximation(a) => {
                self.genus(&a.genus);
                if let Some(species) = a.species {
                    self.epithet_word(species.text);
                }
            }
            NameNode::HybridFormula(f) => {
                for (i, parent) in f.parents.iter().enumerate() {
                    if i > 0 {
                        self.push_all(&format!(" {} ", HYBRID_SIGN));
                    }
                    self.name(parent);
                }
            }
        }
    }

    fn species(&mut self, s: &SpeciesNode<'_>) {
        self.genus(&s.genus);
        self.epithet(&s.species);
        for infra in &s.infraspecies {
            self.epithet(infra);
        }
    }

    fn genus(&mut self, genus: &GenusNode<'_>) {
        if genus.hybrid_sign.is_some() {
            self.full.push(HYBRID_SIGN);
            self.full.push(' ');
        }
        let word = self
            .canonicalizer
            .normalize(genus.word.text, &mut self.transliterated);
        self.simple.push_str(&word);
        self.full.push_str(&word);
        self.stemmed.push_str(&word);
    }

    fn epithet(&mut self, epithet: &EpithetNode<'_>) {
        let marker = epithet
            .rank
            .and_then(|r| RANK_MARKERS.get(r.text))
            .and_then(|rank| rank.marker());
        if let Some(marker) = marker {
            self.full.push(' ');
            self.full.push_str(marker);
        }
        if epithet.hybrid_sign.is_some() {
            self.full.push(' ');
            self.full.push(HYBRID_SIGN);
        }
        self.epithet_word(epithet.word.text);
    }

    fn epithet_word(&mut self, text: &str) {
        let word = self.canonicalizer.normalize(text, &mut self.transliterated);
        self.simple.push(' ');
        self.simple.push_str(&word);
        self.full.push(' ');
        self.full.push_str(&word);
        self.stemmed.push(' ');
        self.stemmed.push_str(&stem(&word));
    }

    fn push_all(&mut self, s: &str) {
        self.simple.push_str(s);
        self.full.push_str(s);
        self.stemmed.push_str(s);
    }
}

/// Reduce a Latin epithet to its stem.
///
/// `j` and `v` are first folded to `i` and `u`; then the first suffix of
/// [`STEM_SUFFIXES`] that leaves at least [`MIN_STEM_LEN`] characters is
/// replaced. At most one replacement is made.
pub fn stem(epithet: &str) -> String {
    let word: String = epithet
        .chars()
        .map(|c| match c {
            'j' => 'i',
            'v' => 'u',
            c => c,
        })
        .collect();

    for (suffix, replacement) in STEM_SUFFIXES {
        if let Some(base) = word.strip_suffix(suffix) {
            if base.chars().count() >= MIN_STEM_LEN {
                return format!("{}{}", base, replacement);
            }
        }
    }
    word
}
