use serde::{Deserialize, Serialize};

use crate::Classification;

/// Counts reported to the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListingStats {
    pub total: usize,
    pub viewed: usize,
    pub applied: usize,
}

impl ListingStats {
    pub fn from_classifications<'a, I>(classifications: I) -> Self
    where
        I: IntoIterator<Item = &'a Classification>,
    {
        classifications
            .into_iter()
            .fold(Self::default(), |mut stats, classification| {
                stats.total += 1;
                if classification.is_viewed() {
                    stats.viewed += 1;
                }
                if classification.is_applied() {
                    stats.applied += 1;
                }
                stats
            })
    }
}
