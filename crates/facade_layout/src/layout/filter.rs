//! Bay eligibility list.
use std::collections::BTreeSet;

use tracing::warn;

use crate::layout::LayoutWarning;

/// Set of 0-based bay indices the assigner may alter. Empty means every bay is eligible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BayFilter {
    indices: BTreeSet<usize>,
}

impl BayFilter {
    /// Filter that allows every bay.
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds a filter from 1-based bay ids. Id 0 is dropped and reported.
    pub fn from_ids<I>(ids: I, warnings: &mut Vec<LayoutWarning>) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut indices = BTreeSet::new();
        for id in ids {
            match id.checked_sub(1) {
                Some(index) => {
                    indices.insert(index);
                }
                None => {
                    warn!("Bay filter id 0 is invalid; ids are 1-based.");
                    warnings.push(LayoutWarning::new(
                        "filter",
                        "bay id 0 is invalid; ids are 1-based",
                    ));
                }
            }
        }
        Self { indices }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// True if the bay at 0-based `index` may be reassigned.
    #[inline]
    pub fn allows(&self, index: usize) -> bool {
        self.indices.is_empty() || self.indices.contains(&index)
    }

    /// 0-based indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}
