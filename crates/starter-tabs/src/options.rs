//! Tabs options

use serde::{Deserialize, Serialize};
use starter_dom::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Tabs laid out in a row; ArrowLeft / ArrowRight navigate
    #[default]
    Horizontal,
    /// Tabs stacked in a column; ArrowUp / ArrowDown navigate
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Orientation {
    /// Navigation direction for `key`, or `None` if the key does not navigate.
    pub fn direction(&self, key: &Key) -> Option<Direction> {
        match (self, key) {
            (Orientation::Horizontal, Key::ArrowRight) => Some(Direction::Next),
            (Orientation::Horizontal, Key::ArrowLeft) => Some(Direction::Previous),
            (Orientation::Vertical, Key::ArrowDown) => Some(Direction::Next),
            (Orientation::Vertical, Key::ArrowUp) => Some(Direction::Previous),
            _ => None,
        }
    }

    /// Value for the `aria-orientation` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TabsOptions {
    /// Class marking the active tab and panel
    pub active_class: String,
    pub orientation: Orientation,
}

impl TabsOptions {
    pub fn with_active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = class.into();
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

impl Default for TabsOptions {
    fn default() -> Self {
        Self {
            active_class: "active".to_string(),
            orientation: Orientation::Horizontal,
        }
    }
}
