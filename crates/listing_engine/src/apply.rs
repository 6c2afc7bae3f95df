use listing_logging::listing_trace;

use crate::document::{ItemId, ListingDocument};

/// Move every item to the end of the container in `ordered` sequence.
///
/// Repeated "move to end" leaves the container in exactly the given order
/// without a diff step. Items are relocated, never cloned or replaced; items
/// that left the page since classification are skipped. Returns the number of
/// items moved.
pub fn apply(document: &mut ListingDocument, ordered: &[ItemId]) -> usize {
    let mut moved = 0;
    for &item in ordered {
        if document.move_to_end(item) {
            moved += 1;
        } else {
            listing_trace!("skipped item {:?}: no longer attached", item);
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::apply;
    use crate::document::ListingDocument;
    use crate::layout::PageLayout;

    fn document() -> ListingDocument {
        let layout = PageLayout {
            container: "ol".to_string(),
            ..PageLayout::default()
        };
        ListingDocument::parse(
            "<html><body><ol><li>a</li><li>b</li><li>c</li></ol></body></html>",
            Arc::new(layout.compile().unwrap()),
        )
    }

    fn texts(doc: &ListingDocument) -> Vec<String> {
        doc.items()
            .into_iter()
            .filter_map(|id| doc.text_of(id))
            .collect()
    }

    #[test]
    fn applies_target_order_without_losing_items() {
        let mut doc = document();
        let items = doc.items();
        let target = vec![items[2], items[0], items[1]];

        assert_eq!(apply(&mut doc, &target), 3);
        assert_eq!(doc.items(), target);
        assert_eq!(texts(&doc), vec!["c", "a", "b"]);
    }

    #[test]
    fn vanished_items_are_skipped() {
        let mut doc = document();
        let items = doc.items();
        doc.remove_item(items[1]);

        assert_eq!(apply(&mut doc, &[items[1], items[2], items[0]]), 2);
        assert_eq!(texts(&doc), vec!["c", "a"]);
    }

    #[test]
    fn empty_order_is_a_noop() {
        let mut doc = document();
        assert_eq!(apply(&mut doc, &[]), 0);
        assert_eq!(texts(&doc), vec!["a", "b", "c"]);
    }
}
