//! Irregularity warnings and the quality score.
//!
//! Every warning carries a fixed weight. The quality of a parse is the sum
//! of the weights of its (de-duplicated) warnings, so a clean name scores 0
//! and each detected irregularity can only raise the score.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Warning {
    /// Input ended with tokens no rule could consume.
    TailUnparsed,
    LeadingSpace,
    TrailingSpace,
    MultipleSpaces,
    /// Genus written as `A.`
    AbbreviatedGenus,
    /// Letters outside the canonical Latin alphabet were transliterated.
    NonAsciiCharacters,
    /// A word that usually opens an author name was read as an epithet.
    AuthorParticleAsEpithet,
    RankMarkerWithoutDot,
    /// `1758?`, `[1758]` or `(1758)`
    ApproximateYear,
    /// Basionym authorship opened with `(` but never closed.
    UnbalancedParenthesis,
    /// `Aus bus ×` - a hybrid sign with no parent after it.
    HybridFormulaIncomplete,
    /// `Aus sp.`
    Approximation,
    /// `Aus cf. bus`
    NameComparison,
}

impl Warning {
    /// Weight added to the quality score.
    pub fn weight(self) -> u32 {
        match self {
            Warning::TailUnparsed => 3,
            Warning::LeadingSpace | Warning::TrailingSpace | Warning::MultipleSpaces => 1,
            Warning::AbbreviatedGenus => 2,
            Warning::NonAsciiCharacters => 1,
            Warning::AuthorParticleAsEpithet => 2,
            Warning::RankMarkerWithoutDot => 1,
            Warning::ApproximateYear => 1,
            Warning::UnbalancedParenthesis => 2,
            Warning::HybridFormulaIncomplete => 3,
            Warning::Approximation | Warning::NameComparison => 2,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Warning::TailUnparsed => "unparsed tail",
            Warning::LeadingSpace => "leading whitespace",
            Warning::TrailingSpace => "trailing whitespace",
            Warning::MultipleSpaces => "multiple adjacent whitespace characters",
            Warning::AbbreviatedGenus => "abbreviated genus",
            Warning::NonAsciiCharacters => "non-ASCII characters transliterated in canonical form",
            Warning::AuthorParticleAsEpithet => "author particle read as epithet",
            Warning::RankMarkerWithoutDot => "rank marker without dot",
            Warning::ApproximateYear => "approximate year",
            Warning::UnbalancedParenthesis => "unbalanced parenthesis in authorship",
            Warning::HybridFormulaIncomplete => "incomplete hybrid formula",
            Warning::Approximation => "name is an approximation",
            Warning::NameComparison => "name comparison",
        }
    }
}

/// Sum of weights; the caller de-duplicates.
pub fn score(warnings: &[Warning]) -> u32 {
    warnings.iter().map(|w| w.weight()).sum()
}

/// Remove repeated warnings, keeping first-detection order.
pub fn dedup(warnings: &mut Vec<Warning>) {
    let mut seen = Vec::with_capacity(warnings.len());
    warnings.retain(|w| {
        if seen.contains(w) {
            false
        } else {
            seen.push(*w);
            true
        }
    });
}

/// Whitespace irregularities of the verbatim string.
pub fn whitespace_warnings(verbatim: &str) -> Vec<Warning> {
    let mut warnings = Vec::new();
    if verbatim.starts_with(char::is_whitespace) {
        warnings.push(Warning::LeadingSpace);
    }
    if verbatim.ends_with(char::is_whitespace) {
        warnings.push(Warning::TrailingSpace);
    }
    let inner = verbatim.trim();
    let mut prev_space = false;
    for c in inner.chars() {
        let space = c.is_whitespace();
        if space && prev_space {
            warnings.push(Warning::MultipleSpaces);
            break;
        }
        prev_space = space;
    }
    warnings
}
