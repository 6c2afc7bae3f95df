mod common;

use std::sync::Arc;

use listing_core::{AppliedAction, EngineSettings, ListingStats, Marker, SortPolicy};
use listing_engine::{ListingDocument, ListingEngine, PageLayout};
use pretty_assertions::assert_eq;

use common::{card, engine, fixed_clock, ids, init_logging, page};

fn settings(sort_by: SortPolicy) -> EngineSettings {
    EngineSettings {
        sort_by,
        ..EngineSettings::default()
    }
}

fn ten_cards_with_2_and_5_viewed() -> Vec<String> {
    (0..10)
        .map(|id| {
            let status = if id == 2 || id == 5 { Some("Viewed") } else { None };
            card(id, status, None)
        })
        .collect()
}

#[test]
fn classification_pass_counts_without_moving() {
    init_logging();
    let mut engine = engine(&page(&[
        card(0, Some("Viewed"), None),
        card(1, Some("Applied"), None),
        card(2, None, None),
        card(3, Some(" viewed "), Some("1 day ago")),
    ]));

    let report = engine.run_pass(&EngineSettings::default(), None);

    assert_eq!(
        report.stats,
        ListingStats {
            total: 4,
            viewed: 2,
            applied: 1
        }
    );
    assert_eq!(report.moved, 0);
    assert_eq!(ids(engine.document()), vec![0, 1, 2, 3]);
    assert!(engine.ledger().is_empty());
}

#[test]
fn incremental_load_then_default_restores_original_order() {
    init_logging();
    let mut engine = engine(&page(&ten_cards_with_2_and_5_viewed()));

    engine.run_pass(&settings(SortPolicy::ViewedFirst), Some(SortPolicy::ViewedFirst));
    assert_eq!(ids(engine.document()), vec![2, 5, 0, 1, 3, 4, 6, 7, 8, 9]);
    assert_eq!(engine.ledger().len(), 10);

    let batch: String = (10..15).map(|id| card(id, None, None)).collect();
    let inserted = engine.document_mut().append_markup(&batch);
    assert_eq!(inserted.len(), 5);
    engine.run_pass(&settings(SortPolicy::ViewedFirst), Some(SortPolicy::ViewedFirst));
    assert_eq!(engine.ledger().len(), 15);

    engine.run_pass(&settings(SortPolicy::Default), Some(SortPolicy::Default));
    assert_eq!(ids(engine.document()), (0..15).collect::<Vec<_>>());
}

#[test]
fn default_sort_twice_is_idempotent() {
    init_logging();
    let mut engine = engine(&page(&ten_cards_with_2_and_5_viewed()));
    engine.run_pass(&settings(SortPolicy::ViewedLast), Some(SortPolicy::ViewedLast));
    assert_eq!(ids(engine.document()), vec![0, 1, 3, 4, 6, 7, 8, 9, 2, 5]);

    engine.run_pass(&settings(SortPolicy::Default), Some(SortPolicy::Default));
    let once = engine.document().to_html();
    engine.run_pass(&settings(SortPolicy::Default), Some(SortPolicy::Default));
    assert_eq!(engine.document().to_html(), once);
    assert_eq!(ids(engine.document()), (0..10).collect::<Vec<_>>());
}

#[test]
fn recent_puts_newest_first_and_undated_last() {
    init_logging();
    let mut engine = engine(&page(&[
        card(1, None, Some("4 hours ago")),
        card(2, None, None),
        card(3, None, Some("10 minutes ago")),
        card(4, None, Some("2 hours ago")),
    ]));

    engine.run_pass(&settings(SortPolicy::Recent), Some(SortPolicy::Recent));
    assert_eq!(ids(engine.document()), vec![3, 4, 1, 2]);
}

#[test]
fn markers_follow_settings_and_are_cleared_when_settings_change() {
    init_logging();
    let mut engine = engine(&page(&[
        card(0, Some("Viewed"), None),
        card(1, Some("Applied"), None),
        card(2, None, None),
    ]));
    let items = engine.document().items();

    let hide = EngineSettings {
        applied_action: AppliedAction::Hide,
        ..EngineSettings::default()
    };
    engine.run_pass(&hide, None);
    let doc = engine.document();
    assert!(doc.has_marker(items[0], Marker::Viewed));
    assert!(doc.has_marker(items[1], Marker::Hidden));
    assert!(!doc.has_marker(items[1], Marker::AppliedDim));
    assert!(Marker::ALL.iter().all(|m| !doc.has_marker(items[2], *m)));

    let dim_no_highlight = EngineSettings {
        applied_action: AppliedAction::Dim,
        highlight_viewed: false,
        ..EngineSettings::default()
    };
    engine.run_pass(&dim_no_highlight, None);
    let doc = engine.document();
    assert!(!doc.has_marker(items[0], Marker::Viewed));
    assert!(doc.has_marker(items[1], Marker::AppliedDim));
    assert!(!doc.has_marker(items[1], Marker::Hidden));
}

#[test]
fn status_change_is_seen_on_the_next_pass() {
    init_logging();
    let mut engine = engine(&page(&[card(0, None, None), card(1, None, None)]));
    assert_eq!(engine.run_pass(&EngineSettings::default(), None).stats.viewed, 0);

    // The host re-renders card 1 after the user opened it.
    let old = engine.document().items()[1];
    let fresh = engine
        .document_mut()
        .replace_item(old, &card(1, Some("Viewed"), None));
    assert_eq!(fresh.len(), 1);

    let report = engine.run_pass(&settings(SortPolicy::ViewedFirst), Some(SortPolicy::ViewedFirst));
    assert_eq!(report.stats.viewed, 1);
    assert_eq!(ids(engine.document()), vec![1, 0]);
}

#[test]
fn page_without_container_is_a_noop() {
    init_logging();
    let mut engine = engine("<html><body><p>Sign in to see jobs</p></body></html>");

    let report = engine.run_pass(&settings(SortPolicy::Recent), Some(SortPolicy::Recent));
    assert_eq!(report.stats, ListingStats::default());
    assert_eq!(report.moved, 0);
    assert!(engine.document_mut().append_markup(&card(1, None, None)).is_empty());
}

#[test]
fn non_item_children_stay_in_place() {
    init_logging();
    let html = page(&[
        card(0, None, None),
        r#"<li class="ad">sponsored</li>"#.to_string(),
        card(1, Some("Viewed"), None),
    ]);
    let mut engine = engine(&html);

    engine.run_pass(&settings(SortPolicy::ViewedFirst), Some(SortPolicy::ViewedFirst));
    assert_eq!(ids(engine.document()), vec![1, 0]);
    assert!(engine.document().to_html().contains("sponsored"));
}

#[test]
fn reset_ledger_makes_current_order_the_new_baseline() {
    init_logging();
    let mut engine = engine(&page(&ten_cards_with_2_and_5_viewed()));
    engine.run_pass(&settings(SortPolicy::ViewedFirst), Some(SortPolicy::ViewedFirst));

    engine.reset_ledger();
    engine.run_pass(&settings(SortPolicy::ViewedLast), Some(SortPolicy::ViewedLast));
    engine.run_pass(&settings(SortPolicy::Default), Some(SortPolicy::Default));
    assert_eq!(ids(engine.document()), vec![2, 5, 0, 1, 3, 4, 6, 7, 8, 9]);
}

#[test]
fn table_row_listings_are_classified_in_place() {
    init_logging();
    let layout = PageLayout {
        container: "table.jobs > tbody".to_string(),
        item: "tr".to_string(),
        status: "td.state".to_string(),
        time: "td.posted".to_string(),
    };
    let html = r#"<html><body><table class="jobs"><tbody>
        <tr data-id="0"><td>Rust dev</td><td class="state">Applied</td><td class="posted">3 days ago</td></tr>
        <tr data-id="1"><td>Go dev</td><td class="state">Viewed</td><td class="posted">1 hour ago</td></tr>
    </tbody></table></body></html>"#;
    let document = ListingDocument::parse(html, Arc::new(layout.compile().unwrap()));
    let mut engine = ListingEngine::new(document, fixed_clock());

    let report = engine.run_pass(&settings(SortPolicy::Recent), Some(SortPolicy::Recent));
    assert_eq!(
        report.stats,
        ListingStats {
            total: 2,
            viewed: 1,
            applied: 1
        }
    );
    assert_eq!(ids(engine.document()), vec![1, 0]);

    let added = engine
        .document_mut()
        .append_markup(r#"<tr data-id="2"><td class="state">Viewed</td><td class="posted">5 minutes ago</td></tr>"#);
    assert_eq!(added.len(), 1);
    engine.run_pass(&settings(SortPolicy::Recent), Some(SortPolicy::Recent));
    assert_eq!(ids(engine.document()), vec![2, 1, 0]);
}
