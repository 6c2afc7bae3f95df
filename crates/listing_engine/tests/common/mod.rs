#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use listing_core::Classification;
use scraper::ElementRef;
use listing_engine::{
    Classifier, Clock, ListingDocument, ListingEngine, PageLayout, SelectorClassifier,
};

pub fn init_logging() {
    listing_logging::initialize_for_tests();
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

pub fn fixed_clock() -> Clock {
    Arc::new(fixed_now)
}

pub fn layout() -> PageLayout {
    PageLayout {
        container: "ul.results".to_string(),
        item: "li.card".to_string(),
        status: ".state".to_string(),
        time: "time".to_string(),
    }
}

/// One job card; `status` and `posted` become the status and time regions.
pub fn card(id: u32, status: Option<&str>, posted: Option<&str>) -> String {
    let status = status
        .map(|s| format!(r#"<span class="state">{s}</span>"#))
        .unwrap_or_default();
    let posted = posted
        .map(|p| format!("<time>{p}</time>"))
        .unwrap_or_default();
    format!(r#"<li class="card" data-id="{id}"><h3>Job {id}</h3>{status}{posted}</li>"#)
}

pub fn page(cards: &[String]) -> String {
    format!(
        r#"<html><head><title>Jobs</title></head><body><main><ul class="results">{}</ul><div class="pager">more</div></main></body></html>"#,
        cards.concat()
    )
}

pub fn document(html: &str) -> ListingDocument {
    ListingDocument::parse(html, Arc::new(layout().compile().unwrap()))
}

pub fn engine(html: &str) -> ListingEngine {
    ListingEngine::new(document(html), fixed_clock())
}

/// `data-id` of every item, in current page order.
pub fn ids(doc: &ListingDocument) -> Vec<u32> {
    doc.items()
        .into_iter()
        .filter_map(|item| doc.element(item)?.attr("data-id")?.parse().ok())
        .collect()
}

/// Same, read back from serialized markup.
pub fn ids_in_html(html: &str) -> Vec<u32> {
    ids(&document(html))
}

/// Wraps the selector classifier and counts how many items it classified.
pub struct CountingClassifier {
    inner: SelectorClassifier,
    pub calls: Arc<AtomicUsize>,
}

impl CountingClassifier {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let classifier = Self {
            inner: SelectorClassifier::new(Arc::new(layout().compile().unwrap())),
            calls: calls.clone(),
        };
        (classifier, calls)
    }
}

impl Classifier for CountingClassifier {
    fn classify(&self, item: ElementRef<'_>, now: DateTime<Utc>) -> Classification {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.classify(item, now)
    }
}
