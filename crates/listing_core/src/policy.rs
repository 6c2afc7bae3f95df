//! Sort policy engine: turns classified items into the order they should be
//! displayed in.
//!
//! Every policy is a stable sort, so items of equal rank keep their input
//! order and repeated passes never shuffle ties.

use std::cmp::Reverse;
use std::hash::Hash;

use crate::{Classification, OrderLedger, SortPolicy};

/// One item together with the classification computed for it this pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedItem<K> {
    pub item: K,
    pub classification: Classification,
}

impl<K> ClassifiedItem<K> {
    pub fn new(item: K, classification: Classification) -> Self {
        Self {
            item,
            classification,
        }
    }
}

/// Record the current items in the ledger ahead of a non-default sort.
///
/// The default policy only reads the ledger, so a page that is never sorted
/// never pays for one.
pub fn prepare_ledger<K: Eq + Hash + Clone>(
    policy: SortPolicy,
    items: &[ClassifiedItem<K>],
    ledger: &mut OrderLedger<K>,
) -> usize {
    if policy.is_default() {
        return 0;
    }
    ledger.record_if_absent(items.iter().map(|entry| &entry.item))
}

/// Return the items in the visual order required by `policy`.
pub fn order<K: Eq + Hash + Clone>(
    items: &[ClassifiedItem<K>],
    ledger: &OrderLedger<K>,
    policy: SortPolicy,
) -> Vec<K> {
    let mut sorted: Vec<&ClassifiedItem<K>> = items.iter().collect();
    match policy {
        SortPolicy::Default => {
            sorted.sort_by_key(|entry| ledger.index_of(&entry.item).unwrap_or(usize::MAX));
        }
        SortPolicy::Recent => {
            // Ascending by time over the reversed input, then reversed back:
            // newest first, ties and undated items keep input order, undated
            // items trail.
            sorted.reverse();
            sorted.sort_by_key(|entry| {
                let recency = entry.classification.recency;
                (recency.is_some(), recency)
            });
            sorted.reverse();
        }
        SortPolicy::ViewedFirst => {
            sorted.sort_by_key(|entry| Reverse(entry.classification.is_viewed()));
        }
        SortPolicy::ViewedLast => {
            sorted.sort_by_key(|entry| entry.classification.is_viewed());
        }
    }
    sorted.into_iter().map(|entry| entry.item.clone()).collect()
}
