//! Region metadata: `KEY=value` fields separated by `/`.
//!
//! Recognized keys are `FALLOFF` (a float overriding the global falloff for one region)
//! and `PATTERN` (an opaque token handed to the pattern function). Keys are matched
//! case-insensitively. Unknown keys are ignored and malformed fields are reported
//! without affecting the other fields of the same text.
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

pub const FIELD_SEPARATOR: char = '/';
pub const KEY_FALLOFF: &str = "FALLOFF";
pub const KEY_PATTERN: &str = "PATTERN";

/// Opaque pattern argument passed through to the pattern function unchanged.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatternToken(String);

impl PatternToken {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatternToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Typed per-region overrides.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionMetadata {
    pub falloff: Option<f64>,
    pub pattern: Option<PatternToken>,
}

impl RegionMetadata {
    /// Parses metadata text, returning the overrides and one error per rejected field.
    pub fn parse(text: &str) -> (Self, Vec<Error>) {
        let mut metadata = Self::default();
        let mut errors = Vec::new();
        for field in text.split(FIELD_SEPARATOR) {
            if let Err(e) = metadata.apply_field(field) {
                errors.push(e);
            }
        }
        (metadata, errors)
    }

    /// Parses metadata text, failing on the first rejected field.
    pub fn parse_strict(text: &str) -> Result<Self> {
        let mut metadata = Self::default();
        for field in text.split(FIELD_SEPARATOR) {
            metadata.apply_field(field)?;
        }
        Ok(metadata)
    }

    /// Falloff for this region given the global value.
    #[inline]
    pub fn resolved_falloff(&self, global: f64) -> f64 {
        self.falloff.unwrap_or(global)
    }

    fn apply_field(&mut self, field: &str) -> Result<()> {
        let field = field.trim();
        if field.is_empty() {
            return Ok(());
        }
        let Some((key, value)) = field.split_once('=') else {
            debug!("Ignoring metadata field without '=': '{}'.", field);
            return Ok(());
        };
        let key = key.trim();
        let value = value.trim();

        if key.eq_ignore_ascii_case(KEY_FALLOFF) {
            let falloff: f64 = value.parse().map_err(|_| Error::Metadata {
                field: KEY_FALLOFF.into(),
                reason: format!("'{value}' is not a number"),
            })?;
            if !falloff.is_finite() {
                return Err(Error::Metadata {
                    field: KEY_FALLOFF.into(),
                    reason: format!("'{value}' is not finite"),
                });
            }
            self.falloff = Some(falloff);
        } else if key.eq_ignore_ascii_case(KEY_PATTERN) {
            if value.is_empty() {
                return Err(Error::Metadata {
                    field: KEY_PATTERN.into(),
                    reason: "empty value".into(),
                });
            }
            self.pattern = Some(PatternToken::new(value));
        } else {
            debug!("Ignoring unknown metadata key '{}'.", key);
        }
        Ok(())
    }
}
