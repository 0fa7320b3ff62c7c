//! Kit configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use starter_tabs::TabsOptions;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Class that marks a tabs container in the page
    pub tabs_container_class: String,
    /// Options applied to every mounted tab controller
    pub tabs: TabsOptions,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Class names must be single, non-empty tokens.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("tabsContainerClass", &self.tabs_container_class),
            ("tabs.activeClass", &self.tabs.active_class),
        ] {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(CoreError::Config(format!(
                    "{} must be a single class name, got {:?}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tabs_container_class: "tabs".to_string(),
            tabs: TabsOptions::default(),
        }
    }
}
