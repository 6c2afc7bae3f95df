//! Mutable model of the host page.
//!
//! The page is a scraper [`Html`] whose `ego_tree` is edited in place. Node
//! ids are the identity of listing items: moving a node keeps its id,
//! re-rendered markup always gets fresh ids. Membership is read from the
//! tree on every call, so detached items simply stop being items.

use ego_tree::{NodeId, NodeRef, Tree};
use html5ever::serialize::{Serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{local_name, ns, Attribute, QualName};
use listing_core::Marker;
use listing_logging::{listing_debug, listing_warn};
use scraper::node::Element;
use scraper::{CaseSensitivity, ElementRef, Html, HtmlTreeSink, Node};
use std::sync::Arc;

use crate::layout::CompiledLayout;

/// Identity of one listing item. Reference identity, never content.
pub type ItemId = NodeId;

pub struct ListingDocument {
    html: Html,
    container: Option<NodeId>,
    layout: Arc<CompiledLayout>,
}

impl ListingDocument {
    /// Parse a full page. A page without a matching container is valid; all
    /// listing operations on it are no-ops.
    pub fn parse(html: &str, layout: Arc<CompiledLayout>) -> Self {
        let html = Html::parse_document(html);
        let container = html.select(&layout.container).next().map(|c| c.id());
        let document = Self {
            html,
            container,
            layout,
        };

        match document.container {
            Some(_) => listing_debug!(
                "parsed page: container found, {} listing items",
                document.items().len()
            ),
            None => listing_warn!("parsed page: no listing container matched"),
        }
        document
    }

    pub fn has_container(&self) -> bool {
        self.container.is_some()
    }

    pub fn layout(&self) -> &Arc<CompiledLayout> {
        &self.layout
    }

    /// Listing items currently attached to the container, in document order.
    pub fn items(&self) -> Vec<ItemId> {
        let Some(container) = self.container.and_then(|id| self.html.tree.get(id)) else {
            return Vec::new();
        };
        container
            .children()
            .filter(|child| self.is_item(*child))
            .map(|child| child.id())
            .collect()
    }

    /// Whether `item` is still a listing item directly under the container.
    pub fn is_attached(&self, item: ItemId) -> bool {
        self.html
            .tree
            .get(item)
            .filter(|node| node.parent().map(|p| p.id()) == self.container)
            .is_some_and(|node| self.is_item(node))
    }

    fn is_item(&self, node: NodeRef<'_, Node>) -> bool {
        ElementRef::wrap(node).is_some_and(|element| self.layout.item.matches(&element))
    }

    /// Host-side insertion (infinite scroll): append `markup` to the end of the
    /// container and return the ids of the new listing items.
    pub fn append_markup(&mut self, markup: &str) -> Vec<ItemId> {
        let added = self.append_fragment(markup);
        self.only_items(added)
    }

    /// Parses `markup` in the container's context, appends every top-level
    /// node to the container and returns all of them.
    fn append_fragment(&mut self, markup: &str) -> Vec<NodeId> {
        let Some(container) = self.container else {
            listing_debug!("append ignored: no container");
            return Vec::new();
        };
        let Some(context) = self.element(container).map(|e| e.name.clone()) else {
            return Vec::new();
        };
        let fragment = parse_fragment_in(context, markup);
        fragment
            .root_element()
            .children()
            .filter_map(|child| graft(&mut self.html.tree, container, child))
            .collect()
    }

    fn only_items(&self, ids: Vec<NodeId>) -> Vec<ItemId> {
        ids.into_iter()
            .filter(|id| self.is_attached(*id))
            .collect()
    }

    /// Host-side removal of one item (e.g. a collapsed section).
    pub fn remove_item(&mut self, item: ItemId) -> bool {
        if !self.is_attached(item) {
            return false;
        }
        match self.html.tree.get_mut(item) {
            Some(mut node) => {
                node.detach();
                true
            }
            None => false,
        }
    }

    /// Host-side re-render: `markup` takes the place of `item`. The new items
    /// get new identities; the old one is detached.
    pub fn replace_item(&mut self, item: ItemId, markup: &str) -> Vec<ItemId> {
        if !self.is_attached(item) {
            return Vec::new();
        }
        let added = self.append_fragment(markup);
        for id in &added {
            if let Some(mut node) = self.html.tree.get_mut(item) {
                node.insert_id_before(*id);
            }
        }
        self.remove_item(item);
        self.only_items(added)
    }

    /// Move `item` to the end of the container. Detached or foreign nodes are
    /// left alone.
    pub fn move_to_end(&mut self, item: ItemId) -> bool {
        let Some(container) = self.container else {
            return false;
        };
        if !self.is_attached(item) {
            return false;
        }
        match self.html.tree.get_mut(container) {
            Some(mut node) => {
                node.append_id(item);
                true
            }
            None => false,
        }
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.html.tree.get(id)?.value().as_element()
    }

    /// The live element, for selector queries against the page tree.
    pub fn element_ref(&self, id: NodeId) -> Option<ElementRef<'_>> {
        ElementRef::wrap(self.html.tree.get(id)?)
    }

    pub fn has_marker(&self, item: ItemId, marker: Marker) -> bool {
        self.element(item).is_some_and(|element| {
            element.has_class(marker.class_name(), CaseSensitivity::CaseSensitive)
        })
    }

    /// Returns whether the marker state changed.
    pub fn set_marker(&mut self, item: ItemId, marker: Marker, present: bool) -> bool {
        let Some(mut node) = self.html.tree.get_mut(item) else {
            return false;
        };
        let Node::Element(element) = node.value() else {
            return false;
        };
        match with_class(element, marker.class_name(), present) {
            Some(updated) => {
                *element = updated;
                true
            }
            None => false,
        }
    }

    /// Markup of one item, including the item element itself.
    pub fn outer_html(&self, id: NodeId) -> Option<String> {
        self.element_ref(id).map(|element| serialize(&element))
    }

    /// Visible text of an element and its descendants.
    pub fn text_of(&self, id: NodeId) -> Option<String> {
        self.element_ref(id).map(|element| element.text().collect())
    }

    /// Serialize the whole page, reflecting every move and marker.
    pub fn to_html(&self) -> String {
        serialize(&self.html)
    }
}

fn parse_fragment_in(context: QualName, markup: &str) -> Html {
    html5ever::driver::parse_fragment(
        HtmlTreeSink::new(Html::new_fragment()),
        Default::default(),
        context,
        Vec::new(),
        false,
    )
    .one(markup)
}

/// Deep-copy `src` from a parsed fragment under `parent` in the page tree.
fn graft(tree: &mut Tree<Node>, parent: NodeId, src: NodeRef<'_, Node>) -> Option<NodeId> {
    let id = tree.get_mut(parent)?.append(src.value().clone()).id();
    for child in src.children() {
        graft(tree, id, child);
    }
    Some(id)
}

/// `element` with one class token added or removed, or `None` when it
/// already has the requested state. Other attributes keep name, namespace
/// and position.
fn with_class(element: &Element, class: &str, present: bool) -> Option<Element> {
    if element.has_class(class, CaseSensitivity::CaseSensitive) == present {
        return None;
    }
    let mut tokens: Vec<&str> = element
        .attr("class")
        .unwrap_or_default()
        .split_ascii_whitespace()
        .filter(|token| *token != class)
        .collect();
    if present {
        tokens.push(class);
    }
    let joined = tokens.join(" ");

    let class_attr = QualName::new(None, ns!(), local_name!("class"));
    let mut attrs: Vec<Attribute> = Vec::with_capacity(element.attrs.len() + 1);
    let mut had_class = false;
    for (name, value) in element.attrs.iter() {
        if *name == class_attr {
            had_class = true;
            attrs.push(Attribute {
                name: name.clone(),
                value: StrTendril::from_slice(&joined),
            });
        } else {
            attrs.push(Attribute {
                name: name.clone(),
                value: StrTendril::from_slice(value),
            });
        }
    }
    if !had_class {
        attrs.push(Attribute {
            name: class_attr,
            value: StrTendril::from_slice(&joined),
        });
    }
    Some(Element::new(element.name.clone(), attrs))
}

fn serialize<T: Serialize>(node: &T) -> String {
    let opts = SerializeOpts {
        scripting_enabled: true,
        traversal_scope: TraversalScope::IncludeNode,
        create_missing_parent: false,
    };
    let mut buf = Vec::new();
    if let Err(err) = html5ever::serialize(&mut buf, node, opts) {
        listing_warn!("page serialization stopped early: {}", err);
    }
    String::from_utf8_lossy(&buf).into_owned()
}
