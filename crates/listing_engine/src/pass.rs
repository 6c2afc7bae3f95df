use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use listing_core::{
    markers_for, order, prepare_ledger, ClassifiedItem, EngineSettings, ListingStats, Marker,
    OrderLedger, SortPolicy, DEFAULT_DEBOUNCE,
};
use listing_logging::{listing_debug, listing_pass_info};

use crate::apply::apply;
use crate::classify::{Classifier, SelectorClassifier};
use crate::document::{ItemId, ListingDocument};
use crate::layout::PageLayout;

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct EngineConfig {
    pub layout: PageLayout,
    pub debounce: Duration,
    pub now: Clock,
}

impl EngineConfig {
    pub fn with_layout(layout: PageLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout: PageLayout::default(),
            debounce: DEFAULT_DEBOUNCE,
            now: Arc::new(Utc::now),
        }
    }
}

/// Outcome of one classification (and optional sort) pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PassReport {
    pub stats: ListingStats,
    pub sorted_by: Option<SortPolicy>,
    pub moved: usize,
}

/// Owns the page and the order ledger, and runs passes over them.
pub struct ListingEngine {
    document: ListingDocument,
    ledger: OrderLedger<ItemId>,
    classifier: Box<dyn Classifier>,
    now: Clock,
}

impl ListingEngine {
    pub fn new(document: ListingDocument, now: Clock) -> Self {
        let classifier = SelectorClassifier::new(document.layout().clone());
        Self::with_classifier(document, Box::new(classifier), now)
    }

    pub fn with_classifier(
        document: ListingDocument,
        classifier: Box<dyn Classifier>,
        now: Clock,
    ) -> Self {
        Self {
            document,
            ledger: OrderLedger::new(),
            classifier,
            now,
        }
    }

    pub fn document(&self) -> &ListingDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut ListingDocument {
        &mut self.document
    }

    pub fn ledger(&self) -> &OrderLedger<ItemId> {
        &self.ledger
    }

    pub fn reset_ledger(&mut self) {
        listing_debug!("ledger reset ({} entries dropped)", self.ledger.len());
        self.ledger.reset();
    }

    /// Classify every current item, refresh markers, and reorder when `sort`
    /// is given.
    pub fn run_pass(&mut self, settings: &EngineSettings, sort: Option<SortPolicy>) -> PassReport {
        listing_logging::next_pass();
        let classified = self.classify_all();
        let stats = ListingStats::from_classifications(
            classified.iter().map(|entry| &entry.classification),
        );

        for entry in &classified {
            let markers = markers_for(&entry.classification, settings);
            for marker in Marker::ALL {
                self.document
                    .set_marker(entry.item, marker, markers.contains(marker));
            }
        }

        let moved = match sort {
            Some(policy) if !classified.is_empty() => {
                let recorded = prepare_ledger(policy, &classified, &mut self.ledger);
                let ordered = order(&classified, &self.ledger, policy);
                let moved = apply(&mut self.document, &ordered);
                listing_debug!(
                    "sorted by {}: {} newly recorded, {} moved",
                    policy,
                    recorded,
                    moved
                );
                moved
            }
            _ => 0,
        };

        listing_pass_info!(
            "{} items ({} viewed, {} applied)",
            stats.total,
            stats.viewed,
            stats.applied
        );
        PassReport {
            stats,
            sorted_by: sort,
            moved,
        }
    }

    fn classify_all(&self) -> Vec<ClassifiedItem<ItemId>> {
        let now = (self.now)();
        self.document
            .items()
            .into_iter()
            .filter_map(|item| {
                let element = self.document.element_ref(item)?;
                Some(ClassifiedItem::new(
                    item,
                    self.classifier.classify(element, now),
                ))
            })
            .collect()
    }
}
