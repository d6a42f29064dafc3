//! Name model builder: selected candidate → [`ParsedName`].
//!
//! Pure function of its inputs. User input never makes it fail; an
//! [`Error::Internal`] here means a grammar node broke an invariant the
//! builder relies on.

use once_cell::sync::Lazy;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::canonical::Canonicalizer;
use crate::error::{Error, Result};
use crate::grammar::node::{AuthorNode, AuthorshipNode, EpithetNode, GenusNode, NameNode, TeamNode};
use crate::grammar::{Candidate, Production};
use crate::name::{
    AuthorTeam, Authorship, Canonical, Hybrid, HybridPosition, ParsedName, Position, PositionKind,
    Rank, Surrogate, Year,
};
use crate::quality::{self, Warning};
use crate::span::Span;
use crate::tables::RANK_MARKERS;
use crate::token::Token;

/// Namespace for name ids: UUID v5 of `globalnames.org` in the DNS namespace.
pub static NAME_NAMESPACE: Lazy<Uuid> =
    Lazy::new(|| Uuid::new_v5(&Uuid::NAMESPACE_DNS, b"globalnames.org"));

/// Stable id of a verbatim name string.
pub fn name_id(verbatim: &str) -> Uuid {
    Uuid::new_v5(&NAME_NAMESPACE, verbatim.as_bytes())
}

/// Assemble the result of one parse.
///
/// `candidate` is `None` when no production matched; the result is then
/// unparsed and the whole input (after leading whitespace) is the tail.
pub fn build(
    verbatim: &str,
    tokens: &[Token<'_>],
    candidate: Option<Candidate<'_>>,
    canonicalizer: &Canonicalizer,
) -> Result<ParsedName> {
    let consumed = candidate.as_ref().map_or(0, |c| c.consumed);
    if consumed > tokens.len() {
        return Err(internal(format!(
            "candidate consumed {} of {} tokens",
            consumed,
            tokens.len()
        )));
    }
    let tail_start = tokens.get(consumed).map_or(verbatim.len(), |t| t.span.start);

    let mut warnings = quality::whitespace_warnings(verbatim);
    let mut name = ParsedName {
        verbatim: verbatim.to_string(),
        id: name_id(verbatim),
        parsed: false,
        canonical: Canonical::default(),
        rank: Rank::None,
        cardinality: 0,
        authorship: None,
        hybrid: None,
        surrogate: None,
        autonym: false,
        warnings: Vec::new(),
        quality: 0,
        tail_start,
        positions: Vec::new(),
    };

    if let Some(candidate) = candidate {
        warnings.extend_from_slice(&candidate.warnings);
        let (canonical, canonical_warnings) = canonicalizer.canonicalize(&candidate.node);
        warnings.extend(canonical_warnings);

        let mut positions = Vec::new();
        collect_positions(&candidate.node, &mut positions);
        validate_positions(verbatim, tail_start, &positions)?;

        name.parsed = true;
        name.canonical = canonical;
        name.rank = rank(&candidate.node)?;
        name.cardinality = cardinality(&candidate.node);
        name.authorship = candidate.node.authorship().map(|a| authorship(verbatim, a));
        name.hybrid = hybrid(&candidate, canonicalizer)?;
        name.surrogate = surrogate(&candidate.node);
        name.autonym = is_autonym(&candidate.node);
        name.positions = positions;

        debug!(
            production = ?candidate.production,
            consumed = candidate.consumed,
            total = tokens.len(),
            "built name"
        );
    }

    if tail_start < verbatim.len() {
        warnings.push(Warning::TailUnparsed);
    }
    quality::dedup(&mut warnings);
    name.quality = quality::score(&warnings);
    name.warnings = warnings;
    Ok(name)
}

fn internal(message: String) -> Error {
    warn!(%message, "parser invariant violated");
    Error::Internal(message)
}

// ============================================================================
// Positions
// ============================================================================

fn collect_positions(node: &NameNode<'_>, out: &mut Vec<Position>) {
    match node {
        NameNode::Uninomial(u) => {
            genus_positions(&u.word, PositionKind::Uninomial, out);
            if let Some(a) = &u.authorship {
                authorship_positions(a, out);
            }
        }
        NameNode::Species(s) => {
            genus_positions(&s.genus, PositionKind::Genus, out);
            if let Some(sub) = s.subgenus {
                push(out, PositionKind::InfragenericEpithet, sub.span);
            }
            if let Some(cf) = s.comparison {
                push(out, PositionKind::AnnotationIdentification, cf.span);
            }
            epithet_positions(&s.species, PositionKind::SpecificEpithet, out);
            for infra in &s.infraspecies {
                epithet_positions(infra, PositionKind::InfraspecificEpithet, out);
            }
        }
        NameNode::Approximation(a) => {
            genus_positions(&a.genus, PositionKind::Genus, out);
            if let Some(species) = a.species {
                push(out, PositionKind::SpecificEpithet, species.span);
            }
            push(out, PositionKind::AnnotationIdentification, a.marker.span);
        }
        NameNode::HybridFormula(f) => {
            let mut signs = f.signs.iter();
            for parent in &f.parents {
                collect_positions(parent, out);
                if let Some(sign) = signs.next() {
                    push(out, PositionKind::HybridChar, *sign);
                }
            }
        }
    }
}

fn genus_positions(genus: &GenusNode<'_>, kind: PositionKind, out: &mut Vec<Position>) {
    if let Some(sign) = genus.hybrid_sign {
        push(out, PositionKind::HybridChar, sign);
    }
    push(out, kind, genus.word.span);
}

fn epithet_positions(epithet: &EpithetNode<'_>, kind: PositionKind, out: &mut Vec<Position>) {
    if let Some(rank) = epithet.rank {
        push(out, PositionKind::Rank, rank.span);
    }
    if let Some(sign) = epithet.hybrid_sign {
        push(out, PositionKind::HybridChar, sign);
    }
    push(out, kind, epithet.word.span);
    if let Some(a) = &epithet.authorship {
        authorship_positions(a, out);
    }
}

fn authorship_positions(node: &AuthorshipNode, out: &mut Vec<Position>) {
    for team in node.basionym.iter().chain(node.combination.iter()) {
        let authors = team.authors.iter().chain(&team.ex_authors).chain(&team.in_authors);
        for author in authors {
            for word in &author.words {
                push(out, PositionKind::AuthorWord, *word);
            }
            if let Some(filius) = author.filius {
                push(out, PositionKind::AuthorWordFilius, filius);
            }
        }
        if let Some(year) = team.year {
            let kind = if year.approximate {
                PositionKind::ApproximateYear
            } else {
                PositionKind::Year
            };
            push(out, kind, year.span);
        }
    }
}

#[inline]
fn push(out: &mut Vec<Position>, kind: PositionKind, span: Span) {
    out.push(Position { kind, span });
}

/// Positions must be non-empty, on char boundaries, inside the consumed
/// prefix, non-overlapping and in document order.
fn validate_positions(verbatim: &str, tail_start: usize, positions: &[Position]) -> Result<()> {
    let mut prev_end = 0;
    for p in positions {
        let Span { start, end } = p.span;
        if start >= end || end > tail_start {
            return Err(internal(format!(
                "{:?} at {}..{} outside 0..{}",
                p.kind, start, end, tail_start
            )));
        }
        if !verbatim.is_char_boundary(start) || !verbatim.is_char_boundary(end) {
            return Err(internal(format!(
                "{:?} at {}..{} splits a character",
                p.kind, start, end
            )));
        }
        if start < prev_end {
            return Err(internal(format!(
                "{:?} at {}..{} overlaps previous position",
                p.kind, start, end
            )));
        }
        prev_end = end;
    }
    Ok(())
}

// ============================================================================
// Fields
// ============================================================================

fn rank(node: &NameNode<'_>) -> Result<Rank> {
    let NameNode::Species(s) = node else {
        return Ok(Rank::None);
    };
    match s.infraspecies.iter().rev().find_map(|i| i.rank) {
        None => Ok(Rank::None),
        Some(marker) => RANK_MARKERS
            .get(marker.text)
            .copied()
            .ok_or_else(|| internal(format!("unknown rank marker {:?}", marker.text))),
    }
}

fn cardinality(node: &NameNode<'_>) -> u8 {
    match node {
        NameNode::Uninomial(_) => 1,
        NameNode::Species(s) if s.comparison.is_some() => 0,
        NameNode::Species(s) => u8::try_from(2 + s.infraspecies.len()).unwrap_or(u8::MAX),
        NameNode::Approximation(_) | NameNode::HybridFormula(_) => 0,
    }
}

fn hybrid(candidate: &Candidate<'_>, canonicalizer: &Canonicalizer) -> Result<Option<Hybrid>> {
    match &candidate.node {
        NameNode::HybridFormula(f) => {
            let n = f.parents.len();
            if n == 0 || !(f.signs.len() + 1 == n || f.signs.len() == n) {
                return Err(internal(format!(
                    "hybrid formula with {} parents and {} signs",
                    n,
                    f.signs.len()
                )));
            }
            let parents = f
                .parents
                .iter()
                .map(|p| canonicalizer.canonicalize(p).0.simple)
                .collect();
            Ok(Some(Hybrid::Formula { parents }))
        }
        node if candidate.production == Production::NamedHybrid => {
            let genus_sign = match node {
                NameNode::Uninomial(u) => u.word.hybrid_sign.is_some(),
                NameNode::Species(s) => s.genus.hybrid_sign.is_some(),
                NameNode::Approximation(a) => a.genus.hybrid_sign.is_some(),
                NameNode::HybridFormula(_) => false,
            };
            let position = if genus_sign {
                HybridPosition::Genus
            } else {
                HybridPosition::Epithet
            };
            Ok(Some(Hybrid::Named { position }))
        }
        _ => Ok(None),
    }
}

fn surrogate(node: &NameNode<'_>) -> Option<Surrogate> {
    match node {
        NameNode::Approximation(a) => Some(Surrogate::Approximation {
            marker: a.marker.text.to_string(),
        }),
        NameNode::Species(s) => s.comparison.map(|cf| Surrogate::Comparison {
            marker: cf.text.to_string(),
        }),
        _ => None,
    }
}

fn is_autonym(node: &NameNode<'_>) -> bool {
    match node {
        NameNode::Species(s) => s
            .infraspecies
            .last()
            .map_or(false, |infra| infra.word.text == s.species.word.text),
        _ => false,
    }
}

fn authorship(verbatim: &str, node: &AuthorshipNode) -> Authorship {
    Authorship {
        verbatim: node.span.slice(verbatim).unwrap_or_default().to_string(),
        basionym: node.basionym.as_ref().map(team),
        combination: node.combination.as_ref().map(team),
    }
}

fn team(node: &TeamNode) -> AuthorTeam {
    fn names(authors: &[AuthorNode]) -> Vec<String> {
        authors.iter().map(|a| a.name.clone()).collect()
    }
    AuthorTeam {
        authors: names(&node.authors),
        ex_authors: names(&node.ex_authors),
        in_authors: names(&node.in_authors),
        year: node.year.map(|y| Year {
            value: y.value,
            approximate: y.approximate,
        }),
    }
}
