//! Tab Controller
//!
//! Binds a [`TabSet`] to a container in a host document. All listeners are
//! delegated to the container; they hold only a weak reference back to the
//! controller so the host never keeps it alive.

use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};

use starter_dom::{DomEvent, EventKind, EventOutcome, Host, Key, Listener, ListenerId};

use crate::options::{Direction, TabsOptions};
use crate::tab_set::TabSet;
use crate::Result;

pub const TAB_ROLE: &str = "tab";
pub const PANEL_ROLE: &str = "tabpanel";
pub const TABLIST_ROLE: &str = "tablist";

/// Called with `(active_tab, active_panel)` after every activation.
pub type ChangeObserver<N> = Arc<dyn Fn(&N, &N) + Send + Sync>;

/// Drop nodes that sit inside one of `panels`; they belong to a nested tabs widget.
fn own_nodes<H: Host>(host: &H, nodes: Vec<H::Node>, role: &str, panels: &[H::Node]) -> Vec<H::Node> {
    nodes
        .into_iter()
        .filter(|node| {
            !panels
                .iter()
                .any(|panel| panel != node && host.closest_with_role(panel, node, role).is_some())
        })
        .collect()
}

struct Shared<H: Host> {
    host: H,
    container: H::Node,
    options: TabsOptions,
    tab_set: Mutex<TabSet<H::Node>>,
    on_change: Option<ChangeObserver<H::Node>>,
}

impl<H: Host> Shared<H> {
    /// Apply the selection to the document, then notify. Returns the active tab.
    fn activate(&self, index: usize) -> H::Node {
        let (tab, panel, index) = {
            let mut tab_set = self.tab_set.lock();
            let index = tab_set.select(index);
            let class = self.options.active_class.as_str();

            for tab in tab_set.tabs() {
                self.host.remove_class(tab, class);
                self.host.set_attribute(tab, "aria-selected", "false");
                self.host.set_tab_index(tab, -1);
            }
            for panel in tab_set.panels() {
                self.host.remove_class(panel, class);
                self.host.set_hidden(panel, true);
            }

            let (tab, panel) = tab_set.active_pair();
            self.host.add_class(tab, class);
            self.host.set_attribute(tab, "aria-selected", "true");
            self.host.set_tab_index(tab, 0);
            self.host.add_class(panel, class);
            self.host.set_hidden(panel, false);

            (tab.clone(), panel.clone(), index)
        };

        tracing::debug!(index, tab = ?tab, "Tab activated");

        if let Some(on_change) = &self.on_change {
            on_change(&tab, &panel);
        }

        tab
    }

    fn handle_pointer_activate(&self, target: &H::Node) -> EventOutcome {
        let Some(tab) = self.host.closest_with_role(&self.container, target, TAB_ROLE) else {
            return EventOutcome::Ignored;
        };
        // Tabs inserted after construction are not part of the set
        let Some(index) = self.tab_set.lock().index_of(&tab) else {
            return EventOutcome::Ignored;
        };

        self.activate(index);
        EventOutcome::Handled
    }

    fn handle_key_navigate(&self, target: &H::Node, key: &Key) -> EventOutcome {
        let Some(direction) = self.options.orientation.direction(key) else {
            return EventOutcome::Ignored;
        };

        let index = {
            let tab_set = self.tab_set.lock();
            if tab_set.index_of(target).is_none() {
                return EventOutcome::Ignored;
            }
            match direction {
                Direction::Next => tab_set.next_index(),
                Direction::Previous => tab_set.previous_index(),
            }
        };

        tracing::debug!(%key, index, "Keyboard tab navigation");

        let tab = self.activate(index);
        self.host.focus(&tab);
        EventOutcome::Handled
    }
}

/// Manages one tabs container: selection, pointer and keyboard activation.
pub struct TabController<H: Host> {
    shared: Arc<Shared<H>>,
    listeners: Vec<ListenerId>,
}

impl<H: Host> TabController<H> {
    pub fn new(host: H, container: H::Node, options: TabsOptions) -> Result<Self> {
        Self::build(host, container, options, None)
    }

    pub fn with_observer(
        host: H,
        container: H::Node,
        options: TabsOptions,
        on_change: ChangeObserver<H::Node>,
    ) -> Result<Self> {
        Self::build(host, container, options, Some(on_change))
    }

    fn build(
        host: H,
        container: H::Node,
        options: TabsOptions,
        on_change: Option<ChangeObserver<H::Node>>,
    ) -> Result<Self> {
        let all_panels = host.query_by_role(&container, PANEL_ROLE);
        let tabs = own_nodes(&host, host.query_by_role(&container, TAB_ROLE), TAB_ROLE, &all_panels);
        let tablists = own_nodes(
            &host,
            host.query_by_role(&container, TABLIST_ROLE),
            TABLIST_ROLE,
            &all_panels,
        );
        let panels = own_nodes(&host, all_panels.clone(), PANEL_ROLE, &all_panels);

        // Nothing is written to the document until the set is known to be valid
        let tab_set = TabSet::new(tabs, panels)?;
        let initial = tab_set
            .tabs()
            .iter()
            .position(|tab| host.has_class(tab, &options.active_class))
            .unwrap_or(0);
        let count = tab_set.len();

        for tablist in &tablists {
            host.set_attribute(tablist, "aria-orientation", options.orientation.as_str());
        }

        let shared = Arc::new(Shared {
            host,
            container,
            options,
            tab_set: Mutex::new(tab_set),
            on_change,
        });

        shared.activate(initial);
        let listeners = Self::attach(&shared);

        tracing::info!(
            container = ?shared.container,
            tabs = count,
            active = initial,
            "Mounted tab controller"
        );

        Ok(Self { shared, listeners })
    }

    fn attach(shared: &Arc<Shared<H>>) -> Vec<ListenerId> {
        let weak: Weak<Shared<H>> = Arc::downgrade(shared);
        let on_click: Listener<H::Node> = Arc::new(move |event: &DomEvent<H::Node>| {
            weak.upgrade().map_or(EventOutcome::Ignored, |shared| {
                shared.handle_pointer_activate(&event.target)
            })
        });

        let weak: Weak<Shared<H>> = Arc::downgrade(shared);
        let on_key_down: Listener<H::Node> = Arc::new(move |event: &DomEvent<H::Node>| {
            match (weak.upgrade(), event.key.as_ref()) {
                (Some(shared), Some(key)) => shared.handle_key_navigate(&event.target, key),
                _ => EventOutcome::Ignored,
            }
        });

        vec![
            shared
                .host
                .subscribe(&shared.container, EventKind::Click, on_click),
            shared
                .host
                .subscribe(&shared.container, EventKind::KeyDown, on_key_down),
        ]
    }

    /// Activate the pair at `index`. The index must be below `len()`.
    pub fn activate(&self, index: usize) {
        self.shared.activate(index);
    }

    /// Pointer interaction on `target` (a tab or any element inside one).
    pub fn handle_pointer_activate(&self, target: &H::Node) -> EventOutcome {
        self.shared.handle_pointer_activate(target)
    }

    /// Key press while `target` has focus. Only arrow keys matching the
    /// orientation, pressed on a managed tab, are handled.
    pub fn handle_key_navigate(&self, target: &H::Node, key: &Key) -> EventOutcome {
        self.shared.handle_key_navigate(target, key)
    }

    pub fn active_index(&self) -> usize {
        self.shared.tab_set.lock().active_index()
    }

    pub fn active_tab(&self) -> H::Node {
        self.shared.tab_set.lock().active_pair().0.clone()
    }

    pub fn active_panel(&self) -> H::Node {
        self.shared.tab_set.lock().active_pair().1.clone()
    }

    pub fn len(&self) -> usize {
        self.shared.tab_set.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.tab_set.lock().is_empty()
    }

    pub fn tabs(&self) -> Vec<H::Node> {
        self.shared.tab_set.lock().tabs().to_vec()
    }

    pub fn panels(&self) -> Vec<H::Node> {
        self.shared.tab_set.lock().panels().to_vec()
    }

    pub fn container(&self) -> &H::Node {
        &self.shared.container
    }

    pub fn options(&self) -> &TabsOptions {
        &self.shared.options
    }

    /// Detach every listener and release the document handles.
    pub fn destroy(mut self) {
        self.detach();
        tracing::debug!(container = ?self.shared.container, "Tab controller destroyed");
    }

    fn detach(&mut self) {
        for id in self.listeners.drain(..) {
            if !self.shared.host.unsubscribe(&self.shared.container, id) {
                tracing::warn!(listener = %id, "Listener already detached");
            }
        }
    }
}

impl<H: Host> Drop for TabController<H> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<H: Host> fmt::Debug for TabController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabController")
            .field("container", &self.shared.container)
            .field("tabs", &self.len())
            .field("active", &self.active_index())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
