//! The parse result model.
//!
//! A [`ParsedName`] is built once per parse by the builder and never
//! mutated afterwards. Fields are private; accessors hand out borrowed
//! views so that the verbatim/position invariants cannot be broken by
//! callers.

use serde::Serialize;
use uuid::Uuid;

use crate::quality::Warning;
use crate::span::Span;

/// Infraspecific rank, taken from the last explicit rank marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Rank {
    /// No rank marker: uninomials, binomials and unmarked trinomials.
    #[default]
    None,
    Subspecies,
    Variety,
    Subvariety,
    Forma,
    Subforma,
    Nothosubspecies,
    Nothovariety,
    Nothoforma,
    Cultivar,
}

impl Rank {
    /// Normalized marker used in full canonical names.
    pub fn marker(self) -> Option<&'static str> {
        Some(match self {
            Rank::None => return None,
            Rank::Subspecies => "subsp.",
            Rank::Variety => "var.",
            Rank::Subvariety => "subvar.",
            Rank::Forma => "f.",
            Rank::Subforma => "subf.",
            Rank::Nothosubspecies => "nothosubsp.",
            Rank::Nothovariety => "nothovar.",
            Rank::Nothoforma => "nothof.",
            Rank::Cultivar => "cv.",
        })
    }
}

/// Publication year of an author team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Year {
    pub value: u16,
    /// `1758?`, `[1758]` or `(1758)`
    pub approximate: bool,
}

/// One author team: `Smith & Jones ex Brown in Green, 1900`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorTeam {
    pub authors: Vec<String>,
    pub ex_authors: Vec<String>,
    pub in_authors: Vec<String>,
    pub year: Option<Year>,
}

/// Authorship of the most specific element of a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorship {
    /// Authorship as written, sliced from the verbatim input.
    pub verbatim: String,
    /// Team in parentheses: the original describing authors.
    pub basionym: Option<AuthorTeam>,
    /// Team outside parentheses: the authors of the current combination.
    pub combination: Option<AuthorTeam>,
}

impl Authorship {
    fn teams(&self) -> impl Iterator<Item = &AuthorTeam> {
        self.basionym.iter().chain(self.combination.iter())
    }

    /// Basionym authors followed by combination authors.
    pub fn authors(&self) -> Vec<&str> {
        self.teams()
            .flat_map(|t| t.authors.iter().map(String::as_str))
            .collect()
    }

    pub fn ex_authors(&self) -> Vec<&str> {
        self.teams()
            .flat_map(|t| t.ex_authors.iter().map(String::as_str))
            .collect()
    }

    pub fn in_authors(&self) -> Vec<&str> {
        self.teams()
            .flat_map(|t| t.in_authors.iter().map(String::as_str))
            .collect()
    }

    /// Basionym year when present, otherwise the combination year.
    pub fn year(&self) -> Option<Year> {
        self.teams().find_map(|t| t.year)
    }

    /// Whether the authorship carries a parenthesized basionym team.
    pub fn parenthesized(&self) -> bool {
        self.basionym.is_some()
    }
}

/// Where the hybrid sign of a named hybrid sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HybridPosition {
    /// `× Aus bus`
    Genus,
    /// `Aus × bus`
    Epithet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hybrid {
    /// `Aus bus × Aus cus`. Parents are canonical names, left to right.
    /// An incomplete formula (`Aus bus ×`) lists only the parents found.
    Formula { parents: Vec<String> },
    /// Nothotaxon written with a hybrid sign.
    Named { position: HybridPosition },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surrogate {
    /// `Aus sp.`, `Aus bus aff.`
    Approximation { marker: String },
    /// `Aus cf. bus`
    Comparison { marker: String },
}

/// Semantic field located by a [`Position`].
///
/// Rendered in snake case: `specific_epithet`, `author_word`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionKind {
    Uninomial,
    Genus,
    /// Subgenus in parentheses.
    InfragenericEpithet,
    SpecificEpithet,
    InfraspecificEpithet,
    Rank,
    HybridChar,
    /// `sp.`, `aff.`, `cf.`
    AnnotationIdentification,
    /// One word of an author name.
    AuthorWord,
    /// `f.` in `Hook. f.`
    AuthorWordFilius,
    Year,
    ApproximateYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub kind: PositionKind,
    pub span: Span,
}

/// Canonical forms of a name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Canonical {
    /// Without authorship, rank markers or hybrid signs on names.
    pub simple: String,
    /// With rank markers and hybrid signs.
    pub full: String,
    /// `simple` with Latin epithet endings normalized.
    pub stemmed: String,
}

/// Result of parsing one name string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub(crate) verbatim: String,
    pub(crate) id: Uuid,
    pub(crate) parsed: bool,
    pub(crate) canonical: Canonical,
    pub(crate) rank: Rank,
    pub(crate) cardinality: u8,
    pub(crate) authorship: Option<Authorship>,
    pub(crate) hybrid: Option<Hybrid>,
    pub(crate) surrogate: Option<Surrogate>,
    pub(crate) autonym: bool,
    pub(crate) warnings: Vec<Warning>,
    pub(crate) quality: u32,
    pub(crate) tail_start: usize,
    pub(crate) positions: Vec<Position>,
}

impl ParsedName {
    /// The input exactly as given.
    pub fn verbatim(&self) -> &str {
        &self.verbatim
    }

    /// UUID v5 of the verbatim string.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// False when no grammar rule matched anything.
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical.simple
    }

    pub fn canonical_name_full(&self) -> &str {
        &self.canonical.full
    }

    pub fn canonical_name_stemmed(&self) -> &str {
        &self.canonical.stemmed
    }

    pub fn canonical(&self) -> &Canonical {
        &self.canonical
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// 1 for uninomials, 2 for binomials, 3+ for infraspecific names and 0
    /// for hybrid formulas, surrogates and unparsed input.
    pub fn cardinality(&self) -> u8 {
        self.cardinality
    }

    pub fn authorship(&self) -> Option<&Authorship> {
        self.authorship.as_ref()
    }

    pub fn hybrid(&self) -> Option<&Hybrid> {
        self.hybrid.as_ref()
    }

    pub fn is_hybrid(&self) -> bool {
        self.hybrid.is_some()
    }

    pub fn surrogate(&self) -> Option<&Surrogate> {
        self.surrogate.as_ref()
    }

    pub fn is_autonym(&self) -> bool {
        self.autonym
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// 0 for a clean parse; grows with each detected irregularity.
    pub fn quality(&self) -> u32 {
        self.quality
    }

    /// The part of the input no grammar rule consumed.
    pub fn unparsed_tail(&self) -> &str {
        &self.verbatim[self.tail_start..]
    }

    /// The consumed prefix of the input, separators included.
    ///
    /// `consumed() + unparsed_tail() == verbatim()` always holds.
    pub fn consumed(&self) -> &str {
        &self.verbatim[..self.tail_start]
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Text of the verbatim input at a position.
    pub fn position_text(&self, position: &Position) -> &str {
        position.span.slice(&self.verbatim).unwrap_or("")
    }
}
