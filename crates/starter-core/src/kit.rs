//! Component mounting
//!
//! The page entry point: once the document is ready, every tabs container gets
//! its own controller. Containers that cannot be mounted are left untouched.

use starter_dom::{Host, VirtualDocument};
use starter_tabs::{ChangeObserver, TabController};

use crate::config::Config;
use crate::Result;

pub struct Kit {
    config: Config,
}

impl Kit {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mount a tab controller on every tabs container below `root`.
    pub fn mount<H: Host>(&self, host: &H, root: &H::Node) -> Vec<TabController<H>> {
        self.mount_tabs(host, root, None)
    }

    /// Like [`Kit::mount`], with one observer shared by all controllers.
    pub fn mount_with_observer<H: Host>(
        &self,
        host: &H,
        root: &H::Node,
        observer: ChangeObserver<H::Node>,
    ) -> Vec<TabController<H>> {
        self.mount_tabs(host, root, Some(observer))
    }

    /// Parse a page and mount its components.
    pub fn mount_html(
        &self,
        markup: &str,
    ) -> Result<(VirtualDocument, Vec<TabController<VirtualDocument>>)> {
        let document = VirtualDocument::parse_html(markup)?;
        let controllers = self.mount(&document, &document.root());
        Ok((document, controllers))
    }

    fn mount_tabs<H: Host>(
        &self,
        host: &H,
        root: &H::Node,
        observer: Option<ChangeObserver<H::Node>>,
    ) -> Vec<TabController<H>> {
        let containers = host.query_by_class(root, &self.config.tabs_container_class);
        let mut controllers = Vec::with_capacity(containers.len());

        for container in containers {
            let options = self.config.tabs.clone();
            let mounted = match &observer {
                Some(observer) => TabController::with_observer(
                    host.clone(),
                    container.clone(),
                    options,
                    observer.clone(),
                ),
                None => TabController::new(host.clone(), container.clone(), options),
            };

            match mounted {
                Ok(controller) => controllers.push(controller),
                Err(e) => {
                    tracing::warn!(container = ?container, error = %e, "Skipping tabs container");
                }
            }
        }

        tracing::info!(
            class = %self.config.tabs_container_class,
            mounted = controllers.len(),
            "Mounted tab containers"
        );

        controllers
    }
}
