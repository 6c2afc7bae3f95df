use std::sync::Arc;

use chrono::{DateTime, Utc};
use listing_core::{classify_fragments, Classification};
use scraper::{ElementRef, Selector};

use crate::layout::CompiledLayout;

pub trait Classifier: Send + Sync {
    /// Derive status and recency from one item as it sits in the page. Never
    /// fails: missing regions degrade to `Normal` without recency.
    fn classify(&self, item: ElementRef<'_>, now: DateTime<Utc>) -> Classification;
}

/// Looks up the status and time regions inside the item with the layout's
/// CSS selectors. The first match of each selector wins.
#[derive(Debug, Clone)]
pub struct SelectorClassifier {
    layout: Arc<CompiledLayout>,
}

impl SelectorClassifier {
    pub fn new(layout: Arc<CompiledLayout>) -> Self {
        Self { layout }
    }
}

impl Classifier for SelectorClassifier {
    fn classify(&self, item: ElementRef<'_>, now: DateTime<Utc>) -> Classification {
        let status = first_text(item, &self.layout.status);
        let time = first_text(item, &self.layout.time);
        classify_fragments(status.as_deref(), time.as_deref(), now)
    }
}

fn first_text(item: ElementRef<'_>, selector: &Selector) -> Option<String> {
    item.select(selector)
        .next()
        .map(|region| region.text().collect::<String>())
}
