//! Factory settings.
//!
//! ```yaml
//! tag_objects: true        # write `empty = false` onto objects passed to `make`
//! overwrite_marker: false  # replace an object's own `empty` instead of keeping it
//! ```

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub tag_objects: bool,
    pub overwrite_marker: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tag_objects: true,
            overwrite_marker: false,
        }
    }
}

impl Settings {
    pub fn with_tag_objects(mut self, tag: bool) -> Self {
        self.tag_objects = tag;
        self
    }

    pub fn with_overwrite_marker(mut self, overwrite: bool) -> Self {
        self.overwrite_marker = overwrite;
        self
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        debug!(?settings, "loaded settings from yaml");
        Ok(settings)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(content)?;
        settings.validate()?;
        debug!(?settings, "loaded settings from json");
        Ok(settings)
    }

    /// Overwriting the marker only means something when objects are tagged.
    pub fn validate(&self) -> Result<()> {
        if self.overwrite_marker && !self.tag_objects {
            return Err(Error::configuration_with_context(
                "overwrite_marker requires tag_objects",
                ErrorContext::new()
                    .with_field_path("overwrite_marker")
                    .with_details("tag_objects is false")
                    .with_source("settings"),
            ));
        }
        Ok(())
    }
}
