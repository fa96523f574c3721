//! Pattern functions: the strategy that picks the new bay index for a cell.
//!
//! The assigner decides *whether* a cell is reassigned; a [`PatternFunction`] decides
//! *which* bay it gets. Implementations receive the bay list, the pattern token of the
//! flagged region (if any), the cell position and the shared generator.
use rand::RngCore;
use tracing::debug;

use crate::geometry::Plane;
use crate::layout::metadata::PatternToken;
use crate::layout::rand01;

/// Everything a pattern function sees for one call.
#[derive(Debug)]
pub struct PatternRequest<'a, B> {
    /// Bay list the returned index refers to.
    pub bays: &'a [B],
    /// Token of the flagged region, or `None` when no regions are configured.
    pub pattern: Option<&'a PatternToken>,
    pub row: usize,
    pub column: usize,
    /// The grid generator's unmodified bay list.
    pub default_bays: &'a [B],
    /// Bay index at this cell before any design function ran.
    pub original_index: usize,
    /// Index of the bay currently assigned to this cell.
    pub current_index: usize,
    pub plane: &'a Plane,
}

/// Strategy that chooses a bay index. Results outside `request.bays` are rejected by the
/// caller, which then keeps the original bay.
pub trait PatternFunction<B>: Send + Sync {
    fn run(&self, request: &PatternRequest<'_, B>, rng: &mut dyn RngCore) -> usize;

    /// Seed to restore on reset, if this function wants reproducible re-runs.
    fn random_seed(&self) -> Option<u64> {
        None
    }
}

impl<B, F> PatternFunction<B> for F
where
    F: Fn(&PatternRequest<'_, B>, &mut dyn RngCore) -> usize + Send + Sync,
{
    fn run(&self, request: &PatternRequest<'_, B>, rng: &mut dyn RngCore) -> usize {
        self(request, rng)
    }
}

/// Reads a pattern token as a list of 1-based bay ids.
///
/// Accepts separators `,`, `;` and whitespace and ignores surrounding brackets.
/// Entries that are not positive integers are skipped.
pub fn bay_ids(token: &PatternToken) -> Vec<usize> {
    token
        .as_str()
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .map(|part| part.trim_matches(|c| matches!(c, '[' | ']' | '(' | ')')))
        .filter(|part| !part.is_empty())
        .filter_map(|part| match part.parse::<usize>() {
            Ok(0) | Err(_) => {
                debug!("Skipping pattern entry '{}'.", part);
                None
            }
            Ok(id) => Some(id),
        })
        .collect()
}

/// Cycles through 1-based bay ids by column, optionally shifting each row.
#[derive(Clone, Debug)]
pub struct SequencePattern {
    pub ids: Vec<usize>,
    /// Sequence positions to advance per row.
    pub row_offset: usize,
}

impl SequencePattern {
    pub fn new(ids: impl Into<Vec<usize>>) -> Self {
        Self {
            ids: ids.into(),
            row_offset: 0,
        }
    }

    pub fn with_row_offset(mut self, row_offset: usize) -> Self {
        self.row_offset = row_offset;
        self
    }
}

impl<B> PatternFunction<B> for SequencePattern {
    fn run(&self, request: &PatternRequest<'_, B>, _rng: &mut dyn RngCore) -> usize {
        let from_token = request.pattern.map(bay_ids).unwrap_or_default();
        let ids = if from_token.is_empty() {
            &self.ids
        } else {
            &from_token
        };
        if ids.is_empty() {
            return request.current_index;
        }
        let position = request
            .column
            .wrapping_add(request.row.wrapping_mul(self.row_offset))
            % ids.len();
        ids[position]
            .checked_sub(1)
            .unwrap_or(request.current_index)
    }
}

/// Picks a bay uniformly at random from the token's ids, or from every bay.
#[derive(Clone, Debug)]
pub struct RandomPattern {
    pub seed: u64,
}

impl RandomPattern {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl<B> PatternFunction<B> for RandomPattern {
    fn run(&self, request: &PatternRequest<'_, B>, rng: &mut dyn RngCore) -> usize {
        let ids = request.pattern.map(bay_ids).unwrap_or_default();
        let count = if ids.is_empty() {
            request.bays.len()
        } else {
            ids.len()
        };
        if count == 0 {
            return request.current_index;
        }
        let pick = ((rand01(rng) * count as f64) as usize).min(count - 1);
        if ids.is_empty() {
            pick
        } else {
            ids[pick] - 1
        }
    }

    fn random_seed(&self) -> Option<u64> {
        Some(self.seed)
    }
}
