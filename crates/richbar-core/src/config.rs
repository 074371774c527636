//! Toolbar configuration supplied by the host page at mount time.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::style::{MarkupVariant, StyleRegistry};

pub const DEFAULT_REGION_SELECTOR: &str = ".edit-area";
pub const DEFAULT_TOOLBAR_SELECTOR: &str = ".toolkit";

/// Where the toolbar lives on the page and which markup it produces.
///
/// Every field is optional when deserialising; missing fields take the
/// defaults of the stock page layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolbarConfig {
    pub variant: MarkupVariant,
    /// CSS selector of the contenteditable region.
    pub region_selector: SmolStr,
    /// CSS selector of the element holding the toolbar buttons.
    pub toolbar_selector: SmolStr,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            variant: MarkupVariant::default(),
            region_selector: SmolStr::new_static(DEFAULT_REGION_SELECTOR),
            toolbar_selector: SmolStr::new_static(DEFAULT_TOOLBAR_SELECTOR),
        }
    }
}

impl ToolbarConfig {
    pub fn registry(&self) -> StyleRegistry {
        StyleRegistry::for_variant(self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: ToolbarConfig = serde_json::from_str(r#"{"variant":"classed"}"#).unwrap();
        assert_eq!(config.variant, MarkupVariant::Classed);
        assert_eq!(config.region_selector, ".edit-area");
        assert_eq!(config.toolbar_selector, ".toolkit");
        assert_eq!(config.registry().variant(), MarkupVariant::Classed);
    }

    #[test]
    fn selectors_use_camel_case_keys() {
        let config: ToolbarConfig =
            serde_json::from_str(r##"{"regionSelector":"#editor","toolbarSelector":"nav"}"##)
                .unwrap();
        assert_eq!(config.variant, MarkupVariant::Semantic);
        assert_eq!(config.region_selector, "#editor");
        assert_eq!(config.toolbar_selector, "nav");
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(serde_json::from_str::<ToolbarConfig>(r#"{"variant":"fancy"}"#).is_err());
    }
}
