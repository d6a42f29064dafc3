//! Error types.
//!
//! Malformed names are not errors: they parse into a result with an
//! unparsed tail and a nonzero quality score. Errors are reserved for
//! contract violations by the caller and for defects in the parser itself.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The caller passed something that is not a name string at all.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A grammar node or builder path broke an internal invariant.
    #[error("internal invariant violated: {0}")]
    Internal(String),

    /// JSON rendering or configuration decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
