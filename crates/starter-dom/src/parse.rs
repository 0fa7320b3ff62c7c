//! Build a virtual document from HTML markup

use scraper::{ElementRef, Html};

use crate::document::{NodeId, VirtualDocument};
use crate::error::DomError;
use crate::host::Host;
use crate::Result;

impl VirtualDocument {
    /// Parse an HTML fragment (a page template or a widget snippet).
    ///
    /// Elements, attributes and direct text are imported; comments are dropped.
    pub fn parse_html(markup: &str) -> Result<Self> {
        let fragment = Html::parse_fragment(markup);
        let document = Self::new();
        let root = document.root();

        let mut imported = 0;
        for child in fragment.root_element().children() {
            if let Some(element) = ElementRef::wrap(child) {
                imported += document.import_element(root, element)?;
            }
        }

        if imported == 0 {
            return Err(DomError::Parse("markup contains no elements".to_string()));
        }

        tracing::debug!(elements = imported, "Parsed HTML fragment");

        Ok(document)
    }

    fn import_element(&self, parent: NodeId, element: ElementRef<'_>) -> Result<usize> {
        let value = element.value();
        let node = self.create_element(value.name());
        for (name, attr) in value.attrs() {
            self.set_attribute(&node, name, attr);
        }
        self.append_child(parent, node)?;

        let mut text = String::new();
        let mut imported = 1;
        for child in element.children() {
            if let Some(child_element) = ElementRef::wrap(child) {
                imported += self.import_element(node, child_element)?;
            } else if let Some(fragment) = child.value().as_text() {
                text.push_str(fragment);
            }
        }

        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            self.set_text(node, &text)?;
        }

        Ok(imported)
    }
}
