//! JsToolbar - the mounted toolbar handle for JavaScript.

use richbar_browser::{Toolbar, ToolbarConfig};
use wasm_bindgen::prelude::*;

use crate::types::JsToolbarConfig;

/// A toolbar attached to the page. Listeners stay attached until `unmount`
/// (or `free`) is called.
#[wasm_bindgen]
pub struct JsToolbar {
    inner: Option<Toolbar>,
}

#[wasm_bindgen]
impl JsToolbar {
    /// Whether the toolbar still has its listeners attached.
    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.inner.is_some()
    }

    /// Detach every listener.
    pub fn unmount(&mut self) {
        if self.inner.take().is_some() {
            tracing::debug!(target: "richbar::js", "toolbar unmounted");
        }
    }
}

/// Attach the toolbar to the page.
///
/// `config` is an optional plain object; see `JsToolbarConfig`.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<JsToolbar, JsError> {
    let config: ToolbarConfig = if config.is_undefined() || config.is_null() {
        ToolbarConfig::default()
    } else {
        serde_wasm_bindgen::from_value::<JsToolbarConfig>(config)
            .map_err(|e| JsError::new(&format!("Invalid toolbar config: {}", e)))?
            .into()
    };
    let toolbar = Toolbar::mount_in_page(config).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(JsToolbar {
        inner: Some(toolbar),
    })
}
