//! Static lookup tables.
//!
//! All tables are compile-time `phf` maps or plain slices, so the grammar
//! never builds or mutates them at runtime and they can be shared freely
//! between threads.

use phf::{phf_map, phf_set};

use crate::name::Rank;

/// Infraspecific rank markers, keyed by their written form.
pub static RANK_MARKERS: phf::Map<&'static str, Rank> = phf_map! {
    "subsp." => Rank::Subspecies,
    "ssp." => Rank::Subspecies,
    "subsp" => Rank::Subspecies,
    "ssp" => Rank::Subspecies,
    "var." => Rank::Variety,
    "var" => Rank::Variety,
    "v." => Rank::Variety,
    "subvar." => Rank::Subvariety,
    "f." => Rank::Forma,
    "fo." => Rank::Forma,
    "form." => Rank::Forma,
    "forma" => Rank::Forma,
    "subf." => Rank::Subforma,
    "nothosubsp." => Rank::Nothosubspecies,
    "nsubsp." => Rank::Nothosubspecies,
    "nothovar." => Rank::Nothovariety,
    "nvar." => Rank::Nothovariety,
    "nothof." => Rank::Nothoforma,
    "cv." => Rank::Cultivar,
};

/// Markers turning a name into an approximation surrogate: `Aus sp.`
pub static APPROXIMATION_MARKERS: phf::Set<&'static str> = phf_set! {
    "sp.", "sp", "spp.", "spp", "aff.", "nr.",
};

/// Markers of a name comparison: `Aus cf. bus`
pub static COMPARISON_MARKERS: phf::Set<&'static str> = phf_set! {
    "cf.", "cf", "cfr.",
};

/// Lowercase particles that may open an author name: `de Candolle`,
/// `van der Wulp`.
pub static AUTHOR_PARTICLES: phf::Set<&'static str> = phf_set! {
    "de", "del", "della", "der", "den", "des", "di", "du", "da", "dos",
    "la", "le", "van", "von", "ter", "zu", "y", "dem",
};

/// Words joining authors of a team besides `,` and `&`.
pub static AUTHOR_JOINERS: phf::Set<&'static str> = phf_set! {
    "et", "and",
};

/// `Hook. f.` - the son of an author of the same name.
pub static FILIUS: phf::Set<&'static str> = phf_set! {
    "f.", "fil.", "filius",
};

pub static EX_MARKERS: phf::Set<&'static str> = phf_set! {
    "ex", "ex.",
};

pub static IN_MARKERS: phf::Set<&'static str> = phf_set! {
    "in",
};

/// ASCII replacements for letters not allowed in canonical names.
pub static TRANSLITERATIONS: phf::Map<char, &'static str> = phf_map! {
    'à' => "a", 'á' => "a", 'â' => "a", 'ã' => "a", 'ä' => "a", 'å' => "a",
    'æ' => "ae",
    'ç' => "c",
    'è' => "e", 'é' => "e", 'ê' => "e", 'ë' => "e",
    'ì' => "i", 'í' => "i", 'î' => "i", 'ï' => "i",
    'ñ' => "n",
    'ò' => "o", 'ó' => "o", 'ô' => "o", 'õ' => "o", 'ö' => "o", 'ø' => "o",
    'œ' => "oe",
    'ù' => "u", 'ú' => "u", 'û' => "u", 'ü' => "u",
    'ý' => "y", 'ÿ' => "y",
    'Æ' => "Ae", 'Œ' => "Oe",
    'Ä' => "A", 'Ö' => "O", 'Ü' => "U", 'É' => "E",
};

/// Version of [`STEM_SUFFIXES`]. Bump whenever the table changes, since
/// stemmed canonical names are compared across releases.
pub const STEM_TABLE_VERSION: u32 = 1;

/// Latin inflectional endings and their replacements, longest first.
///
/// Exactly one replacement is applied per epithet: the first entry whose
/// suffix matches while leaving a stem of at least [`MIN_STEM_LEN`] chars.
pub static STEM_SUFFIXES: &[(&str, &str)] = &[
    ("orum", ""),
    ("arum", ""),
    ("ibus", ""),
    ("iae", "ia"),
    ("ius", ""),
    ("ae", ""),
    ("am", ""),
    ("as", ""),
    ("em", ""),
    ("es", ""),
    ("ia", ""),
    ("is", ""),
    ("os", ""),
    ("um", ""),
    ("us", ""),
    ("a", ""),
    ("e", ""),
    ("i", ""),
    ("o", ""),
    ("u", ""),
];

pub const MIN_STEM_LEN: usize = 2;
