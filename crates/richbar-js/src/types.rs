//! Types exposed to JavaScript via wasm-bindgen.

use richbar_browser::{MarkupVariant, ToolbarConfig};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Markup convention the toolbar produces.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub enum JsMarkupVariant {
    #[default]
    Semantic,
    Classed,
}

/// Mount options. Every field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsToolbarConfig {
    #[serde(default)]
    #[tsify(optional)]
    pub variant: Option<JsMarkupVariant>,
    /// CSS selector of the contenteditable region (default `.edit-area`).
    #[serde(default)]
    #[tsify(optional)]
    pub region_selector: Option<String>,
    /// CSS selector of the toolbar (default `.toolkit`).
    #[serde(default)]
    #[tsify(optional)]
    pub toolbar_selector: Option<String>,
}

impl From<JsToolbarConfig> for ToolbarConfig {
    fn from(js: JsToolbarConfig) -> Self {
        let defaults = ToolbarConfig::default();
        ToolbarConfig {
            variant: match js.variant.unwrap_or_default() {
                JsMarkupVariant::Semantic => MarkupVariant::Semantic,
                JsMarkupVariant::Classed => MarkupVariant::Classed,
            },
            region_selector: js
                .region_selector
                .map(Into::into)
                .unwrap_or(defaults.region_selector),
            toolbar_selector: js
                .toolbar_selector
                .map(Into::into)
                .unwrap_or(defaults.toolbar_selector),
        }
    }
}
