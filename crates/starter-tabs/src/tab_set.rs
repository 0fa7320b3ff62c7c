//! Selection state of a tab set
//!
//! ```text
//!  tabs:   [t0] [t1] [t2]
//!  panels: [p0] [p1] [p2]
//!                ^ active
//! ```
//! `tabs[i]` controls `panels[i]`; `active` is always a valid index.

use crate::error::TabError;
use crate::Result;

#[derive(Debug, Clone)]
pub struct TabSet<N> {
    tabs: Vec<N>,
    panels: Vec<N>,
    active: usize,
}

impl<N: PartialEq> TabSet<N> {
    /// Pair tabs with panels positionally. Extra panels are dropped.
    pub fn new(tabs: Vec<N>, mut panels: Vec<N>) -> Result<Self> {
        if tabs.is_empty() {
            return Err(TabError::EmptyTabSet);
        }
        if panels.len() < tabs.len() {
            return Err(TabError::MissingPanel {
                index: panels.len(),
            });
        }
        panels.truncate(tabs.len());

        Ok(Self {
            tabs,
            panels,
            active: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn tabs(&self) -> &[N] {
        &self.tabs
    }

    pub fn panels(&self) -> &[N] {
        &self.panels
    }

    pub fn index_of(&self, tab: &N) -> Option<usize> {
        self.tabs.iter().position(|t| t == tab)
    }

    /// Index after the active one, wrapping from last to first.
    pub fn next_index(&self) -> usize {
        (self.active + 1) % self.len()
    }

    /// Index before the active one, wrapping from first to last.
    pub fn previous_index(&self) -> usize {
        (self.active + self.len() - 1) % self.len()
    }

    /// Make `index` the active pair and return the index actually selected.
    ///
    /// Callers must pass an index below `len()`; release builds clamp.
    pub fn select(&mut self, index: usize) -> usize {
        debug_assert!(
            index < self.len(),
            "tab index {} out of range for {} tabs",
            index,
            self.len()
        );
        self.active = index.min(self.len() - 1);
        self.active
    }

    pub fn active_pair(&self) -> (&N, &N) {
        (&self.tabs[self.active], &self.panels[self.active])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> TabSet<&'static str> {
        TabSet::new(vec!["t0", "t1", "t2"], vec!["p0", "p1", "p2"]).unwrap()
    }

    #[test]
    fn test_new_tab_set() {
        let set = three();
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert_eq!(set.active_index(), 0);
        assert_eq!(set.active_pair(), (&"t0", &"p0"));
    }

    #[test]
    fn test_empty_rejected() {
        let result = TabSet::<&str>::new(Vec::new(), vec!["p0"]);
        assert_eq!(result.unwrap_err(), TabError::EmptyTabSet);
    }

    #[test]
    fn test_missing_panel_rejected() {
        let result = TabSet::new(vec!["t0", "t1"], vec!["p0"]);
        assert_eq!(result.unwrap_err(), TabError::MissingPanel { index: 1 });
    }

    #[test]
    fn test_extra_panels_dropped() {
        let set = TabSet::new(vec!["t0"], vec!["p0", "p1"]).unwrap();
        assert_eq!(set.panels(), &["p0"]);
    }

    #[test]
    fn test_wrap_around() {
        let mut set = three();
        // First -> previous wraps to last
        assert_eq!(set.previous_index(), 2);

        set.select(2);
        // Last -> next wraps to first
        assert_eq!(set.next_index(), 0);
        assert_eq!(set.previous_index(), 1);
    }

    #[test]
    fn test_single_tab_wraps_to_itself() {
        let set = TabSet::new(vec!["only"], vec!["panel"]).unwrap();
        assert_eq!(set.next_index(), 0);
        assert_eq!(set.previous_index(), 0);
    }

    #[test]
    fn test_select_and_pairing() {
        let mut set = three();
        assert_eq!(set.select(1), 1);
        assert_eq!(set.active_pair(), (&"t1", &"p1"));
        assert_eq!(set.index_of(&"t2"), Some(2));
        assert_eq!(set.index_of(&"nope"), None);
    }
}
