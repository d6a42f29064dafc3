//! Matched grammar nodes.
//!
//! The parse tree produced by a successful production. Nodes keep the
//! spans of the tokens they matched so the builder can compute positions;
//! name words borrow from the input.

use crate::span::Span;

/// A single matched word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordNode<'a> {
    pub text: &'a str,
    pub span: Span,
}

/// Genus, or the word of a uninomial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenusNode<'a> {
    pub word: WordNode<'a>,
    /// Written as `A.`
    pub abbreviated: bool,
    /// `×` directly before the word (named hybrid).
    pub hybrid_sign: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearNode {
    pub value: u16,
    pub approximate: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorNode {
    /// Name with whitespace runs collapsed: `de Candolle`, `J.E.Sm.`
    pub name: String,
    /// One span per word, particles included: `de`, `Candolle`.
    pub words: Vec<Span>,
    /// `f.` or `fil.` after the name.
    pub filius: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamNode {
    pub authors: Vec<AuthorNode>,
    pub ex_authors: Vec<AuthorNode>,
    pub in_authors: Vec<AuthorNode>,
    pub year: Option<YearNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorshipNode {
    pub basionym: Option<TeamNode>,
    pub combination: Option<TeamNode>,
    pub span: Span,
}

/// Species or infraspecific epithet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpithetNode<'a> {
    /// Rank marker before the epithet (infraspecies only).
    pub rank: Option<WordNode<'a>>,
    /// `×` directly before the epithet (named hybrid).
    pub hybrid_sign: Option<Span>,
    pub word: WordNode<'a>,
    pub authorship: Option<AuthorshipNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesNode<'a> {
    pub genus: GenusNode<'a>,
    pub subgenus: Option<WordNode<'a>>,
    /// `cf.` between genus and species.
    pub comparison: Option<WordNode<'a>>,
    pub species: EpithetNode<'a>,
    pub infraspecies: Vec<EpithetNode<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UninomialNode<'a> {
    pub word: GenusNode<'a>,
    pub authorship: Option<AuthorshipNode>,
}

/// `Aus sp.`, `Aus bus aff.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproximationNode<'a> {
    pub genus: GenusNode<'a>,
    pub species: Option<WordNode<'a>>,
    pub marker: WordNode<'a>,
}

/// `Aus bus × Aus cus`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaNode<'a> {
    pub parents: Vec<NameNode<'a>>,
    /// One sign between each pair of parents, plus a dangling one when the
    /// formula is incomplete.
    pub signs: Vec<Span>,
}

impl<'a> FormulaNode<'a> {
    pub fn is_complete(&self) -> bool {
        self.signs.len() + 1 == self.parents.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameNode<'a> {
    Uninomial(UninomialNode<'a>),
    Species(SpeciesNode<'a>),
    Approximation(ApproximationNode<'a>),
    HybridFormula(FormulaNode<'a>),
}

impl<'a> NameNode<'a> {
    /// Authorship of the most specific element that has one.
    ///
    /// In `Aus bus L. subsp. bus` the autonym is unauthored, so this is `L.`.
    pub fn authorship(&self) -> Option<&AuthorshipNode> {
        match self {
            NameNode::Uninomial(u) => u.authorship.as_ref(),
            NameNode::Species(s) => s
                .infraspecies
                .iter()
                .rev()
                .chain(std::iter::once(&s.species))
                .find_map(|epithet| epithet.authorship.as_ref()),
            NameNode::Approximation(_) => None,
            NameNode::HybridFormula(_) => None,
        }
    }

    /// Whether any hybrid sign is attached to a genus or epithet.
    pub fn has_named_hybrid_sign(&self) -> bool {
        match self {
            NameNode::Uninomial(u) => u.word.hybrid_sign.is_some(),
            NameNode::Species(s) => {
                s.genus.hybrid_sign.is_some()
                    || s.species.hybrid_sign.is_some()
                    || s.infraspecies.iter().any(|i| i.hybrid_sign.is_some())
            }
            NameNode::Approximation(a) => a.genus.hybrid_sign.is_some(),
            NameNode::HybridFormula(_) => false,
        }
    }
}
