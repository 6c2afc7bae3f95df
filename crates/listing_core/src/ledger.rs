use std::collections::HashMap;
use std::hash::Hash;

/// First-seen order of every item the engine has sorted during a session.
///
/// Indices are assigned once and never change while the entry exists; entries
/// are only dropped by [`OrderLedger::reset`]. This keeps the original page
/// order reconstructible after any number of re-sorts.
#[derive(Debug, Clone)]
pub struct OrderLedger<K> {
    indices: HashMap<K, usize>,
    next: usize,
}

impl<K: Eq + Hash + Clone> OrderLedger<K> {
    pub fn new() -> Self {
        Self {
            indices: HashMap::new(),
            next: 0,
        }
    }

    /// Assign the next unused index to each unseen item, in iteration order.
    /// Returns how many items were newly recorded.
    pub fn record_if_absent<'a, I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut recorded = 0;
        for item in items {
            if !self.indices.contains_key(item) {
                self.indices.insert(item.clone(), self.next);
                self.next += 1;
                recorded += 1;
            }
        }
        recorded
    }

    /// `None` means the item was never recorded; sorters place it last.
    pub fn index_of(&self, item: &K) -> Option<usize> {
        self.indices.get(item).copied()
    }

    pub fn reset(&mut self) {
        self.indices.clear();
        self.next = 0;
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for OrderLedger<K> {
    fn default() -> Self {
        Self::new()
    }
}
