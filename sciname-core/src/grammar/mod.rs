//! Grammar engine: token stream → ranked candidate parses.
//!
//! Each [`Production`] is tried from the first token with its own cursor
//! and scratch state. A production either fails or yields one
//! [`Candidate`] covering some prefix of the tokens. Candidates are ranked
//! by cost, compared lexicographically:
//!
//! 1. tokens left unconsumed (fewer is better)
//! 2. sum of irregularity warning weights (lower is better)
//! 3. production priority (declaration order of [`Production::ALL`])
//!
//! The last component is unique per candidate, so selection is fully
//! deterministic.
//!
//! Inside a production, optional sub-rules (subgenus, authorship,
//! infraspecies, hybrid parents) are attempted on a copy of the cursor and
//! abandoned on failure, rolling back any warnings they recorded. Every
//! repetition consumes at least one token, so matching always terminates.

pub mod authorship;
pub mod cursor;
pub mod node;

use tracing::trace;

use crate::config::ParserConfig;
use crate::quality::{self, Warning};
use crate::tables::{
    APPROXIMATION_MARKERS, AUTHOR_JOINERS, AUTHOR_PARTICLES, COMPARISON_MARKERS, EX_MARKERS,
    IN_MARKERS,
};
use crate::token::{Token, TokenKind};

use self::authorship::{authorship, is_author_word};
use self::cursor::{Cursor, Scratch};
use self::node::{
    ApproximationNode, AuthorshipNode, EpithetNode, FormulaNode, GenusNode, NameNode, SpeciesNode,
    UninomialNode, WordNode,
};

/// Top-level productions, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Production {
    HybridFormula,
    NamedHybrid,
    Approximation,
    Comparison,
    Infraspecific,
    Binomial,
    Uninomial,
}

impl Production {
    /// All productions in priority order.
    pub const ALL: [Production; 7] = [
        Production::HybridFormula,
        Production::NamedHybrid,
        Production::Approximation,
        Production::Comparison,
        Production::Infraspecific,
        Production::Binomial,
        Production::Uninomial,
    ];

    #[inline]
    pub fn priority(self) -> usize {
        self as usize
    }
}

/// One complete match of a production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub production: Production,
    pub node: NameNode<'a>,
    /// Number of tokens consumed from the start of the stream.
    pub consumed: usize,
    pub warnings: Vec<Warning>,
}

impl<'a> Candidate<'a> {
    /// Ranking key; lower is better.
    pub fn cost(&self, total_tokens: usize) -> (usize, u32, usize) {
        (
            total_tokens.saturating_sub(self.consumed),
            quality::score(&self.warnings),
            self.production.priority(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Infra {
    Forbidden,
    Optional,
    Required,
}

/// Compiled grammar. Holds no per-parse state and is shared by reference.
#[derive(Debug, Clone)]
pub struct Grammar {
    max_infraspecies: usize,
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::new(&ParserConfig::default())
    }
}

impl Grammar {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            max_infraspecies: config.max_infraspecies.max(1),
        }
    }

    /// Every production that matches, in priority order.
    pub fn candidates<'a>(&self, tokens: &[Token<'a>]) -> Vec<Candidate<'a>> {
        if tokens.is_empty() {
            return Vec::new();
        }
        Production::ALL
            .iter()
            .filter_map(|&production| self.attempt(production, tokens))
            .collect()
    }

    /// Pick the minimum-cost candidate.
    pub fn select<'a>(
        candidates: Vec<Candidate<'a>>,
        total_tokens: usize,
    ) -> Option<Candidate<'a>> {
        candidates.into_iter().min_by_key(|c| c.cost(total_tokens))
    }

    /// Candidates followed by selection.
    pub fn best<'a>(&self, tokens: &[Token<'a>]) -> Option<Candidate<'a>> {
        Self::select(self.candidates(tokens), tokens.len())
    }

    fn attempt<'a>(&self, production: Production, tokens: &[Token<'a>]) -> Option<Candidate<'a>> {
        let start = Cursor::new(tokens);
        let mut scratch = Scratch::default();

        let matched = match production {
            Production::HybridFormula => self.hybrid_formula(start, &mut scratch),
            Production::NamedHybrid => self.named_hybrid(start, &mut scratch),
            Production::Approximation => self.approximation(start, &mut scratch),
            Production::Comparison => self.comparison(start, &mut scratch),
            Production::Infraspecific => self
                .species(start, &mut scratch, false, Infra::Required)
                .map(|(s, cur)| (NameNode::Species(s), cur)),
            Production::Binomial => self
                .species(start, &mut scratch, false, Infra::Forbidden)
                .map(|(s, cur)| (NameNode::Species(s), cur)),
            Production::Uninomial => self.uninomial(start, &mut scratch, false),
        };

        let Some((node, end)) = matched else {
            trace!(?production, "no match");
            return None;
        };
        let mut warnings = scratch.into_warnings();
        quality::dedup(&mut warnings);
        trace!(?production, consumed = end.pos(), ?warnings, "candidate");
        Some(Candidate { production, node, consumed: end.pos(), warnings })
    }

    // ---- Productions ----

    fn hybrid_formula<'t, 'a>(
        &self,
        cur: Cursor<'t, 'a>,
        scratch: &mut Scratch,
    ) -> Option<(NameNode<'a>, Cursor<'t, 'a>)> {
        let (first, mut cur) = self.formula_parent(cur, scratch)?;
        let mut parents = vec![first];
        let mut signs = Vec::new();

        while let Some((sign, after_sign)) = cur.hybrid_sign() {
            signs.push(sign);
            let checkpoint = scratch.checkpoint();
            match self.formula_parent(after_sign, scratch) {
                Some((parent, next)) => {
                    parents.push(parent);
                    cur = next;
                }
                None => {
                    scratch.rollback(checkpoint);
                    scratch.warn(Warning::HybridFormulaIncomplete);
                    cur = after_sign;
                    break;
                }
            }
        }

        if signs.is_empty() {
            return None;
        }
        Some((NameNode::HybridFormula(FormulaNode { parents, signs }), cur))
    }

    fn formula_parent<'t, 'a>(
        &self,
        cur: Cursor<'t, 'a>,
        scratch: &mut Scratch,
    ) -> Option<(NameNode<'a>, Cursor<'t, 'a>)> {
        let checkpoint = scratch.checkpoint();
        if let Some((species, next)) = self.species(cur, scratch, false, Infra::Optional) {
            return Some((NameNode::Species(species), next));
        }
        scratch.rollback(checkpoint);
        self.uninomial(cur, scratch, false)
    }

    fn named_hybrid<'t, 'a>(
        &self,
        cur: Cursor<'t, 'a>,
        scratch: &mut Scratch,
    ) -> Option<(NameNode<'a>, Cursor<'t, 'a>)> {
        let checkpoint = scratch.checkpoint();
        let (node, next) = match self.species(cur, scratch, true, Infra::Optional) {
            Some((species, next)) => (NameNode::Species(species), next),
            None => {
                scratch.rollback(checkpoint);
                self.uninomial(cur, scratch, true)?
            }
        };
        node.has_named_hybrid_sign().then_some((node, next))
    }

    fn approximation<'t, 'a>(
        &self,
        cur: Cursor<'t, 'a>,
        scratch: &mut Scratch,
    ) -> Option<(NameNode<'a>, Cursor<'t, 'a>)> {
        let (genus, after_genus) = self.genus(cur, scratch, false, true)?;

        // `Aus bus sp.` first, then `Aus sp.`
        let checkpoint = scratch.checkpoint();
        let (species, at) = match epithet_word(after_genus, scratch) {
            Some((w, next)) if approximation_marker(next).is_some() => (Some(w), next),
            _ => {
                scratch.rollback(checkpoint);
                (None, after_genus)
            }
        };
        // `A. sp.` names nothing: a bare abbreviation is not a uninomial.
        if genus.abbreviated && species.is_none() {
            return None;
        }
        let (marker, next) = approximation_marker(at)?;
        scratch.warn(Warning::Approximation);
        let node = ApproximationNode {
            genus,
            species,
            marker: word(marker),
        };
        Some((NameNode::Approximation(node), next))
    }

    fn comparison<'t, 'a>(
        &self,
        cur: Cursor<'t, 'a>,
        scratch: &mut Scratch,
    ) -> Option<(NameNode<'a>, Cursor<'t, 'a>)> {
        let (genus, cur) = self.genus(cur, scratch, false, true)?;
        let (marker, cur) = cur.bump_if(|t| {
            matches!(t.kind, TokenKind::Word | TokenKind::Abbreviation)
                && COMPARISON_MARKERS.contains(t.text)
        })?;
        let (species, cur) = self.epithet(cur, scratch, false, false)?;
        let (infraspecies, cur) = self.infraspecies(cur, scratch, false);
        scratch.warn(Warning::NameComparison);
        let node = SpeciesNode {
            genus,
            subgenus: None,
            comparison: Some(word(marker)),
            species,
            infraspecies,
        };
        Some((NameNode::Species(node), cur))
    }

    fn species<'t, 'a>(
        &self,
        cur: Cursor<'t, 'a>,
        scratch: &mut Scratch,
        signs: bool,
        infra: Infra,
    ) -> Option<(SpeciesNode<'a>, Cursor<'t, 'a>)> {
        let (genus, mut cur) = self.genus(cur, scratch, signs, true)?;

        // `(Bus)` is a subgenus only when an epithet follows; otherwise it
        // is left for the authorship rule.
        let mut subgenus = None;
        if let Some((sub, after)) = subgenus_word(cur) {
            let epithet_follows = after.peek().map_or(false, |t| {
                (t.kind == TokenKind::Word && is_epithet_text(t.text))
                    || (signs && t.kind == TokenKind::HybridMarker)
            });
            if epithet_follows {
                subgenus = Some(sub);
                cur = after;
            }
        }

        let (species, cur) = self.epithet(cur, scratch, signs, false)?;
        let (infraspecies, cur) = match infra {
            Infra::Forbidden => (Vec::new(), cur),
            Infra::Optional | Infra::Required => self.infraspecies(cur, scratch, signs),
        };
        if infra == Infra::Required && infraspecies.is_empty() {
            return None;
        }

        let node = SpeciesNode {
            genus,
            subgenus,
            comparison: None,
            species,
            infraspecies,
        };
        Some((node, cur))
    }

    fn infraspecies<'t, 'a>(
        &self,
        mut cur: Cursor<'t, 'a>,
        scratch: &mut Scratch,
        signs: bool,
    ) -> (Vec<EpithetNode<'a>>, Cursor<'t, 'a>) {
        let mut epithets = Vec::new();
        while epithets.len() < self.max_infraspecies {
            let checkpoint = scratch.checkpoint();
            match self.epithet(cur, scratch, signs, true) {
                Some((epithet, next)) => {
                    epithets.push(epithet);
                    cur = next;
                }
                None => {
                    scratch.rollback(checkpoint);
                    break;
                }
            }
        }
        (epithets, cur)
    }

    fn uninomial<'t, 'a>(
        &self,
        cur: Cursor<'t, 'a>,
        scratch: &mut Scratch,
        signs: bool,
    ) -> Option<(NameNode<'a>, Cursor<'t, 'a>)> {
        let (word, cur) = self.genus(cur, scratch, signs, false)?;
        let (authorship, cur) = optional_authorship(cur, scratch);
        Some((NameNode::Uninomial(UninomialNode { word, authorship }), cur))
    }

    // ---- Words ----

    fn genus<'t, 'a>(
        &self,
        mut cur: Cursor<'t, 'a>,
        scratch: &mut Scratch,
        signs: bool,
        allow_abbreviation: bool,
    ) -> Option<(GenusNode<'a>, Cursor<'t, 'a>)> {
        let mut hybrid_sign = None;
        if signs {
            if let Some((sign, next)) = cur.hybrid_sign() {
                hybrid_sign = Some(sign);
                cur = next;
            }
        }

        let (tok, next) = cur.bump()?;
        let abbreviated = match tok.kind {
            TokenKind::Word | TokenKind::AuthorWord if is_genus_text(tok.text) => false,
            TokenKind::Abbreviation | TokenKind::AuthorWord
                if allow_abbreviation && is_genus_abbreviation(tok.text) =>
            {
                scratch.warn(Warning::AbbreviatedGenus);
                true
            }
            _ => return None,
        };

        let node = GenusNode {
            word: word(tok),
            abbreviated,
            hybrid_sign,
        };
        Some((node, next))
    }

    fn epithet<'t, 'a>(
        &self,
        mut cur: Cursor<'t, 'a>,
        scratch: &mut Scratch,
        signs: bool,
        ranked: bool,
    ) -> Option<(EpithetNode<'a>, Cursor<'t, 'a>)> {
        let mut rank = None;
        if ranked {
            if let Some((marker, next)) = cur.bump_if(|t| t.kind == TokenKind::RankMarker) {
                if !marker.text.ends_with('.') && marker.text != "forma" {
                    scratch.warn(Warning::RankMarkerWithoutDot);
                }
                rank = Some(word(marker));
                cur = next;
            }
        }

        let mut hybrid_sign = None;
        if signs {
            if let Some((sign, next)) = cur.hybrid_sign() {
                hybrid_sign = Some(sign);
                cur = next;
            }
        }

        let (word, cur) = epithet_word(cur, scratch)?;
        let (authorship, cur) = optional_authorship(cur, scratch);
        let node = EpithetNode {
            rank,
            hybrid_sign,
            word,
            authorship,
        };
        Some((node, cur))
    }
}

fn optional_authorship<'t, 'a>(
    cur: Cursor<'t, 'a>,
    scratch: &mut Scratch,
) -> (Option<AuthorshipNode>, Cursor<'t, 'a>) {
    let checkpoint = scratch.checkpoint();
    match authorship(cur, scratch) {
        Some((node, next)) => (Some(node), next),
        None => {
            scratch.rollback(checkpoint);
            (None, cur)
        }
    }
}

fn approximation_marker<'t, 'a>(cur: Cursor<'t, 'a>) -> Option<(&'t Token<'a>, Cursor<'t, 'a>)> {
    cur.bump_if(|t| {
        matches!(t.kind, TokenKind::Word | TokenKind::Abbreviation)
            && APPROXIMATION_MARKERS.contains(t.text)
    })
}

fn subgenus_word<'t, 'a>(cur: Cursor<'t, 'a>) -> Option<(WordNode<'a>, Cursor<'t, 'a>)> {
    let (_, cur) = cur.punct('(')?;
    let (tok, cur) = cur.bump_if(|t| {
        matches!(t.kind, TokenKind::Word | TokenKind::AuthorWord) && is_genus_text(t.text)
    })?;
    let (_, cur) = cur.punct(')')?;
    Some((word(tok), cur))
}

fn epithet_word<'t, 'a>(
    cur: Cursor<'t, 'a>,
    scratch: &mut Scratch,
) -> Option<(WordNode<'a>, Cursor<'t, 'a>)> {
    let (tok, next) = cur.bump_if(|t| {
        t.kind == TokenKind::Word
            && is_epithet_text(t.text)
            && !is_function_word(t.text)
    })?;

    // `Aus de Candolle`: `de` is far more likely an author particle.
    if AUTHOR_PARTICLES.contains(tok.text) && next.peek().map_or(false, is_author_word) {
        scratch.warn(Warning::AuthorParticleAsEpithet);
    }
    Some((word(tok), next))
}

#[inline]
fn word<'a>(tok: &Token<'a>) -> WordNode<'a> {
    WordNode { text: tok.text, span: tok.span }
}

/// Words that join or annotate names and are never epithets.
fn is_function_word(text: &str) -> bool {
    AUTHOR_JOINERS.contains(text)
        || EX_MARKERS.contains(text)
        || IN_MARKERS.contains(text)
        || APPROXIMATION_MARKERS.contains(text)
        || COMPARISON_MARKERS.contains(text)
}

/// `Homo`, `Aëdes`, `Pseudo-nitzschia`
pub fn is_genus_text(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_uppercase()
        && text.chars().count() >= 2
        && chars.all(|c| c.is_lowercase() || c == '-')
        && !text.ends_with('-')
}

/// `A.`, `Ab.`, `Chr.`
pub fn is_genus_abbreviation(text: &str) -> bool {
    let Some(stem) = text.strip_suffix('.') else {
        return false;
    };
    let mut chars = stem.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_uppercase() && stem.chars().count() <= 3 && chars.all(char::is_lowercase)
}

/// `sapiens`, `novae-angliae`
pub fn is_epithet_text(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_lowercase()
        && first.is_alphabetic()
        && text.chars().count() >= 2
        && chars.all(|c| c.is_lowercase() || c == '-' || c == '\'' || c == '’')
}
