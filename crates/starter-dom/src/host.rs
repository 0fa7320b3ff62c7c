//! Host capability interface
//!
//! Anything that can expose a scoped, ordered view over a mutable element tree
//! can drive the components: a real browser DOM, a virtual DOM, or the headless
//! [`VirtualDocument`](crate::VirtualDocument).

use std::fmt;

use crate::event::{EventKind, Listener, ListenerId};

pub trait Host: Clone + Send + Sync + 'static {
    /// Handle to an element in the host tree.
    type Node: Clone + Eq + fmt::Debug + Send + Sync + 'static;

    /// All descendants of `scope` (excluding `scope` itself), in document order.
    fn descendants(&self, scope: &Self::Node) -> Vec<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn remove_attribute(&self, node: &Self::Node, name: &str);

    /// Nearest inclusive ancestor of `node` carrying `role` that lies strictly
    /// inside `scope`.
    fn closest_with_role(
        &self,
        scope: &Self::Node,
        node: &Self::Node,
        role: &str,
    ) -> Option<Self::Node>;

    /// Move input focus to `node`.
    fn focus(&self, node: &Self::Node);

    /// Attach a listener to `scope`. Events raised on `scope` or any of its
    /// descendants reach the listener.
    fn subscribe(
        &self,
        scope: &Self::Node,
        kind: EventKind,
        listener: Listener<Self::Node>,
    ) -> ListenerId;

    /// Detach a listener. Returns false if it was not attached to `scope`.
    fn unsubscribe(&self, scope: &Self::Node, id: ListenerId) -> bool;

    fn query_by_role(&self, scope: &Self::Node, role: &str) -> Vec<Self::Node> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| self.attribute(node, "role").as_deref() == Some(role))
            .collect()
    }

    fn query_by_class(&self, scope: &Self::Node, class: &str) -> Vec<Self::Node> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| self.has_class(node, class))
            .collect()
    }

    fn has_class(&self, node: &Self::Node, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|value| value.split_whitespace().any(|c| c == class))
    }

    fn add_class(&self, node: &Self::Node, class: &str) {
        let current = self.attribute(node, "class").unwrap_or_default();
        if current.split_whitespace().any(|c| c == class) {
            return;
        }

        let updated = if current.trim().is_empty() {
            class.to_string()
        } else {
            format!("{} {}", current.trim(), class)
        };
        self.set_attribute(node, "class", &updated);
    }

    fn remove_class(&self, node: &Self::Node, class: &str) {
        let Some(current) = self.attribute(node, "class") else {
            return;
        };
        if !current.split_whitespace().any(|c| c == class) {
            return;
        }

        let remaining: Vec<&str> = current.split_whitespace().filter(|c| *c != class).collect();
        self.set_attribute(node, "class", &remaining.join(" "));
    }

    /// Toggle the boolean `hidden` attribute.
    fn set_hidden(&self, node: &Self::Node, hidden: bool) {
        if hidden {
            self.set_attribute(node, "hidden", "");
        } else {
            self.remove_attribute(node, "hidden");
        }
    }

    fn is_hidden(&self, node: &Self::Node) -> bool {
        self.attribute(node, "hidden").is_some()
    }

    /// Place `node` in (`0`) or out of (`-1`) the sequential keyboard focus order.
    fn set_tab_index(&self, node: &Self::Node, index: i32) {
        self.set_attribute(node, "tabindex", &index.to_string());
    }

    fn tab_index(&self, node: &Self::Node) -> Option<i32> {
        self.attribute(node, "tabindex")?.trim().parse().ok()
    }
}
