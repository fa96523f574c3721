//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Errors report caller contract violations such as invalid settings or a cell whose
//! original bay index is not part of the bay list. Recoverable problems met while
//! assigning bays are recorded as [`crate::layout::LayoutWarning`]s instead.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid layout region at #{number}")]
    InvalidRegion { number: usize },

    #[error("invalid metadata field '{field}': {reason}")]
    Metadata { field: String, reason: String },

    #[error("bay index {index} out of range for {len} bays")]
    BayIndexOutOfRange { index: usize, len: usize },

    #[error("current bay is not part of the bay list")]
    BayNotFound,

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        matches!(err, Error::Other(_))
            .then_some(())
            .expect("expected Other variant");
    }

    #[test]
    fn region_error_reports_one_based_number() {
        let err = Error::InvalidRegion { number: 3 };
        assert_eq!(err.to_string(), "invalid layout region at #3");
    }

    #[test]
    fn out_of_range_message_names_index_and_len() {
        let err = Error::BayIndexOutOfRange { index: 7, len: 4 };
        assert_eq!(err.to_string(), "bay index 7 out of range for 4 bays");
    }
}
