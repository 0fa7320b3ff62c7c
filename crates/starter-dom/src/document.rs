//! Headless virtual document
//!
//! An in-memory element tree that implements [`Host`]. Handles are cheap to
//! clone and share the same tree, so a test can keep one handle while a
//! component drives another.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

use crate::error::DomError;
use crate::event::{DomEvent, EventKind, EventOutcome, Listener, ListenerId};
use crate::host::Host;
use crate::Result;

/// Index of an element in a [`VirtualDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            attributes: Vec::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

struct Subscription {
    id: ListenerId,
    scope: NodeId,
    kind: EventKind,
    listener: Listener<NodeId>,
}

struct DocumentInner {
    /// Arena of elements; index 0 is the document root
    nodes: Vec<Element>,
    focused: Option<NodeId>,
    subscriptions: Vec<Subscription>,
}

impl DocumentInner {
    fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0)
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(|e| e.parent);
        }
        false
    }

    fn collect_descendants(&self, scope: NodeId, out: &mut Vec<NodeId>) {
        if let Some(element) = self.get(scope) {
            for &child in &element.children {
                out.push(child);
                self.collect_descendants(child, out);
            }
        }
    }

    fn render(&self, id: NodeId, out: &mut String) {
        let Some(element) = self.get(id) else {
            return;
        };

        out.push('<');
        out.push_str(&element.tag);
        for (name, value) in &element.attributes {
            if value.is_empty() {
                out.push_str(&format!(" {}", name));
            } else {
                out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
            }
        }
        out.push('>');
        out.push_str(&escape(&element.text));
        for &child in &element.children {
            self.render(child, out);
        }
        out.push_str(&format!("</{}>", element.tag));
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[derive(Clone)]
pub struct VirtualDocument {
    inner: Arc<RwLock<DocumentInner>>,
}

impl VirtualDocument {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(DocumentInner {
                nodes: vec![Element::new("#document")],
                focused: None,
                subscriptions: Vec::new(),
            })),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        let mut inner = self.inner.write();
        inner.nodes.push(Element::new(tag));
        NodeId(inner.nodes.len() - 1)
    }

    /// Append `child` as the last child of `parent`, moving it if already attached.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.get(parent).is_none() {
            return Err(DomError::UnknownNode(parent));
        }
        if inner.get(child).is_none() || child == self.root() {
            return Err(DomError::UnknownNode(child));
        }
        if inner.is_inclusive_ancestor(child, parent) {
            return Err(DomError::InvalidHierarchy(format!(
                "{} is an ancestor of {}",
                child, parent
            )));
        }

        if let Some(old_parent) = inner.get(child).and_then(|e| e.parent) {
            if let Some(old) = inner.get_mut(old_parent) {
                old.children.retain(|&c| c != child);
            }
        }
        if let Some(element) = inner.get_mut(child) {
            element.parent = Some(parent);
        }
        if let Some(element) = inner.get_mut(parent) {
            element.children.push(child);
        }
        Ok(())
    }

    /// Create an element with attributes and append it to `parent`.
    pub fn element(&self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> Result<NodeId> {
        let node = self.create_element(tag);
        for (name, value) in attributes {
            self.set_attribute(&node, name, value);
        }
        self.append_child(parent, node)?;
        Ok(node)
    }

    pub fn set_text(&self, node: NodeId, text: &str) -> Result<()> {
        let mut inner = self.inner.write();
        let element = inner.get_mut(node).ok_or(DomError::UnknownNode(node))?;
        element.text = text.to_string();
        Ok(())
    }

    pub fn text(&self, node: NodeId) -> Option<String> {
        self.inner.read().get(node).map(|e| e.text.clone())
    }

    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.inner.read().get(node).map(|e| e.tag.clone())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.read().get(node).and_then(|e| e.parent)
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.inner
            .read()
            .get(node)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let inner = self.inner.read();
        let mut nodes = Vec::new();
        inner.collect_descendants(self.root(), &mut nodes);
        nodes
            .into_iter()
            .find(|&node| inner.get(node).and_then(|e| e.attribute("id")) == Some(id))
    }

    /// Element that currently holds input focus.
    pub fn focused(&self) -> Option<NodeId> {
        self.inner.read().focused
    }

    /// Number of attached listeners across the whole document.
    pub fn listener_count(&self) -> usize {
        self.inner.read().subscriptions.len()
    }

    /// Deliver an event. It bubbles from the target up to the root; every
    /// listener subscribed on the way (for the event's kind) is invoked, and
    /// the result is `Handled` if any of them handled it.
    pub fn dispatch(&self, event: &DomEvent<NodeId>) -> EventOutcome {
        let listeners: Vec<Listener<NodeId>> = {
            let guard = self.inner.read();
            let inner: &DocumentInner = &guard;
            if inner.get(event.target).is_none() {
                tracing::warn!(target_node = %event.target, "Dispatch to unknown node");
                return EventOutcome::Ignored;
            }

            let mut path = Vec::new();
            let mut current = Some(event.target);
            while let Some(id) = current {
                path.push(id);
                current = inner.get(id).and_then(|e| e.parent);
            }

            path.iter()
                .flat_map(move |node| {
                    inner
                        .subscriptions
                        .iter()
                        .filter(move |s| s.scope == *node && s.kind == event.kind)
                })
                .map(|s| Arc::clone(&s.listener))
                .collect()
        };

        tracing::trace!(
            kind = %event.kind,
            target_node = %event.target,
            listeners = listeners.len(),
            "Dispatching event"
        );

        // Listeners run without the lock so they can mutate the document
        listeners
            .iter()
            .fold(EventOutcome::Ignored, |outcome, listener| {
                outcome.merge(listener(event))
            })
    }

    /// Render the element tree below the root as HTML.
    pub fn to_html(&self) -> String {
        let inner = self.inner.read();
        let mut out = String::new();
        if let Some(root) = inner.get(self.root()) {
            for &child in &root.children {
                inner.render(child, &mut out);
            }
        }
        out
    }
}

impl Default for VirtualDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VirtualDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("VirtualDocument")
            .field("nodes", &inner.nodes.len())
            .field("focused", &inner.focused)
            .field("listeners", &inner.subscriptions.len())
            .finish()
    }
}

impl Host for VirtualDocument {
    type Node = NodeId;

    fn descendants(&self, scope: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.inner.read().collect_descendants(*scope, &mut out);
        out
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.inner
            .read()
            .get(*node)
            .and_then(|e| e.attribute(name))
            .map(str::to_string)
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        let mut inner = self.inner.write();
        let Some(element) = inner.get_mut(*node) else {
            tracing::warn!(node = %node, name, "Attribute write on unknown node");
            return;
        };

        match element.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => element
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        if let Some(element) = self.inner.write().get_mut(*node) {
            element.attributes.retain(|(key, _)| key != name);
        }
    }

    fn closest_with_role(&self, scope: &NodeId, node: &NodeId, role: &str) -> Option<NodeId> {
        let inner = self.inner.read();
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == *scope {
                return None;
            }
            let element = inner.get(id)?;
            if element.attribute("role") == Some(role) {
                // Only matches that live inside the scope count
                return inner.is_inclusive_ancestor(*scope, id).then_some(id);
            }
            current = element.parent;
        }
        None
    }

    fn focus(&self, node: &NodeId) {
        let mut inner = self.inner.write();
        if inner.get(*node).is_some() {
            inner.focused = Some(*node);
        }
    }

    fn subscribe(&self, scope: &NodeId, kind: EventKind, listener: Listener<NodeId>) -> ListenerId {
        let id = ListenerId::new();
        self.inner.write().subscriptions.push(Subscription {
            id,
            scope: *scope,
            kind,
            listener,
        });
        tracing::trace!(scope = %scope, %kind, listener = %id, "Listener attached");
        id
    }

    fn unsubscribe(&self, scope: &NodeId, id: ListenerId) -> bool {
        let mut inner = self.inner.write();
        let before = inner.subscriptions.len();
        inner
            .subscriptions
            .retain(|s| !(s.id == id && s.scope == *scope));
        before != inner.subscriptions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_listener(counter: Arc<AtomicUsize>, outcome: EventOutcome) -> Listener<NodeId> {
        Arc::new(move |_event: &DomEvent<NodeId>| {
            counter.fetch_add(1, Ordering::SeqCst);
            outcome
        })
    }

    #[test]
    fn test_tree_building() {
        let doc = VirtualDocument::new();
        let root = doc.root();
        let list = doc.element(root, "UL", &[("id", "nav")]).unwrap();
        let item = doc.element(list, "li", &[]).unwrap();

        assert_eq!(doc.tag_name(list).as_deref(), Some("ul"));
        assert_eq!(doc.parent(item), Some(list));
        assert_eq!(doc.children(root), vec![list]);
        assert_eq!(doc.element_by_id("nav"), Some(list));
        assert_eq!(doc.element_by_id("missing"), None);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let doc = VirtualDocument::new();
        let root = doc.root();
        let a = doc.element(root, "div", &[]).unwrap();
        let a1 = doc.element(a, "span", &[]).unwrap();
        let b = doc.element(root, "div", &[]).unwrap();

        assert_eq!(doc.descendants(&root), vec![a, a1, b]);
        assert_eq!(doc.descendants(&a), vec![a1]);
    }

    #[test]
    fn test_append_child_rejects_cycles() {
        let doc = VirtualDocument::new();
        let outer = doc.element(doc.root(), "div", &[]).unwrap();
        let inner = doc.element(outer, "div", &[]).unwrap();

        assert!(matches!(
            doc.append_child(inner, outer),
            Err(DomError::InvalidHierarchy(_))
        ));
        assert!(matches!(
            doc.append_child(outer, NodeId(99)),
            Err(DomError::UnknownNode(_))
        ));
    }

    #[test]
    fn test_append_child_moves_node() {
        let doc = VirtualDocument::new();
        let first = doc.element(doc.root(), "div", &[]).unwrap();
        let second = doc.element(doc.root(), "div", &[]).unwrap();
        let child = doc.element(first, "span", &[]).unwrap();

        doc.append_child(second, child).unwrap();
        assert!(doc.children(first).is_empty());
        assert_eq!(doc.children(second), vec![child]);
    }

    #[test]
    fn test_closest_with_role_respects_scope() {
        let doc = VirtualDocument::new();
        let root = doc.root();
        let container = doc.element(root, "div", &[]).unwrap();
        let tab = doc.element(container, "button", &[("role", "tab")]).unwrap();
        let label = doc.element(tab, "span", &[]).unwrap();
        let outside = doc.element(root, "button", &[("role", "tab")]).unwrap();

        assert_eq!(doc.closest_with_role(&container, &label, "tab"), Some(tab));
        assert_eq!(doc.closest_with_role(&container, &tab, "tab"), Some(tab));
        assert_eq!(doc.closest_with_role(&container, &outside, "tab"), None);
        assert_eq!(doc.closest_with_role(&container, &container, "tab"), None);
    }

    #[test]
    fn test_dispatch_bubbles_to_ancestors() {
        let doc = VirtualDocument::new();
        let container = doc.element(doc.root(), "div", &[]).unwrap();
        let button = doc.element(container, "button", &[]).unwrap();
        let sibling = doc.element(doc.root(), "div", &[]).unwrap();

        let hits = Arc::new(AtomicUsize::new(0));
        doc.subscribe(
            &container,
            EventKind::Click,
            counting_listener(hits.clone(), EventOutcome::Handled),
        );

        assert_eq!(doc.dispatch(&DomEvent::click(button)), EventOutcome::Handled);
        assert_eq!(doc.dispatch(&DomEvent::click(sibling)), EventOutcome::Ignored);
        // Wrong kind never reaches the listener
        assert_eq!(
            doc.dispatch(&DomEvent::key_down(button, "Enter")),
            EventOutcome::Ignored
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_runs_every_listener_on_path() {
        let doc = VirtualDocument::new();
        let outer = doc.element(doc.root(), "div", &[]).unwrap();
        let inner = doc.element(outer, "div", &[]).unwrap();
        let button = doc.element(inner, "button", &[]).unwrap();

        let inner_hits = Arc::new(AtomicUsize::new(0));
        let outer_hits = Arc::new(AtomicUsize::new(0));
        doc.subscribe(
            &inner,
            EventKind::Click,
            counting_listener(inner_hits.clone(), EventOutcome::Handled),
        );
        doc.subscribe(
            &outer,
            EventKind::Click,
            counting_listener(outer_hits.clone(), EventOutcome::Ignored),
        );

        // A handled event still reaches the outer listener
        assert_eq!(doc.dispatch(&DomEvent::click(button)), EventOutcome::Handled);
        assert_eq!(inner_hits.load(Ordering::SeqCst), 1);
        assert_eq!(outer_hits.load(Ordering::SeqCst), 1);

        // Only the ignoring listener is on this path
        assert_eq!(doc.dispatch(&DomEvent::click(outer)), EventOutcome::Ignored);
        assert_eq!(outer_hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_listener_can_mutate_document() {
        let doc = VirtualDocument::new();
        let button = doc.element(doc.root(), "button", &[]).unwrap();

        let handle = doc.clone();
        doc.subscribe(
            &button,
            EventKind::Click,
            Arc::new(move |event: &DomEvent<NodeId>| {
                handle.add_class(&event.target, "pressed");
                handle.focus(&event.target);
                EventOutcome::Handled
            }),
        );

        doc.dispatch(&DomEvent::click(button));
        assert!(doc.has_class(&button, "pressed"));
        assert_eq!(doc.focused(), Some(button));
    }

    #[test]
    fn test_unsubscribe() {
        let doc = VirtualDocument::new();
        let node = doc.element(doc.root(), "div", &[]).unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        let id = doc.subscribe(
            &node,
            EventKind::Click,
            counting_listener(hits.clone(), EventOutcome::Ignored),
        );
        assert_eq!(doc.listener_count(), 1);

        // Wrong scope does not detach
        assert!(!doc.unsubscribe(&doc.root(), id));
        assert!(doc.unsubscribe(&node, id));
        assert!(!doc.unsubscribe(&node, id));
        assert_eq!(doc.listener_count(), 0);

        doc.dispatch(&DomEvent::click(node));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_to_html() {
        let doc = VirtualDocument::new();
        let panel = doc
            .element(doc.root(), "div", &[("role", "tabpanel"), ("hidden", "")])
            .unwrap();
        doc.set_text(panel, "a < b").unwrap();

        assert_eq!(
            doc.to_html(),
            "<div role=\"tabpanel\" hidden>a &lt; b</div>"
        );
    }
}
