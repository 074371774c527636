//! Listener wiring for a mounted toolbar.
//!
//! `click` on the toolbar toggles styles; `copy`, `cut` and `input` on the
//! editable region go through the clipboard serializer and the input
//! normalizer. Dropping the [`Toolbar`] detaches every listener.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use richbar_core::{
    StyleRegistry, ToolbarConfig, handle_copy, handle_cut, handle_input, toggle_for_button,
};
use smol_str::SmolStr;
use wasm_bindgen::JsCast;

use crate::clipboard::BrowserClipboard;
use crate::events::{button_marker, parse_browser_input_type};
use crate::surface::BrowserSurface;

/// Reasons a toolbar could not be mounted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
    #[error("no element matches region selector {0:?}")]
    RegionNotFound(SmolStr),
    #[error("no element matches toolbar selector {0:?}")]
    ToolbarNotFound(SmolStr),
    #[error("dom error: {0}")]
    Dom(String),
}

struct ToolbarState {
    surface: BrowserSurface,
    registry: StyleRegistry,
}

type SharedState = Rc<RefCell<ToolbarState>>;

/// A toolbar attached to the page.
pub struct Toolbar {
    _listeners: Vec<EventListener>,
}

impl Toolbar {
    /// Look up the region and toolbar in `document` and attach listeners.
    pub fn mount(document: &web_sys::Document, config: ToolbarConfig) -> Result<Self, MountError> {
        let region = query(document, &config.region_selector)?
            .ok_or_else(|| MountError::RegionNotFound(config.region_selector.clone()))?;
        let toolbar = query(document, &config.toolbar_selector)?
            .ok_or_else(|| MountError::ToolbarNotFound(config.toolbar_selector.clone()))?;

        let surface =
            BrowserSurface::new(region.clone()).map_err(|err| MountError::Dom(err.to_string()))?;
        let state: SharedState = Rc::new(RefCell::new(ToolbarState {
            surface,
            registry: config.registry(),
        }));

        let listeners = vec![
            click_listener(&toolbar, state.clone()),
            clipboard_listener(&region, "copy", state.clone()),
            clipboard_listener(&region, "cut", state.clone()),
            input_listener(&region, state),
        ];
        tracing::debug!(
            target: "richbar::toolbar",
            variant = ?config.variant,
            region = %config.region_selector,
            "toolbar mounted"
        );
        Ok(Self { _listeners: listeners })
    }

    /// Mount against the current page's document.
    pub fn mount_in_page(config: ToolbarConfig) -> Result<Self, MountError> {
        Self::mount(&gloo_utils::document(), config)
    }
}

fn query(
    document: &web_sys::Document,
    selector: &str,
) -> Result<Option<web_sys::Element>, MountError> {
    document
        .query_selector(selector)
        .map_err(|err| MountError::Dom(format!("{err:?}")))
}

fn click_listener(toolbar: &web_sys::Element, state: SharedState) -> EventListener {
    let options = EventListenerOptions::enable_prevent_default();
    EventListener::new_with_options(toolbar, "click", options, move |event| {
        event.prevent_default();
        let Some(button) = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|target| target.closest("button").ok().flatten())
        else {
            return;
        };
        let mut state = state.borrow_mut();
        let ToolbarState { surface, registry } = &mut *state;
        let marker = button_marker(&button, registry);
        toggle_for_button(surface, registry, marker.as_deref());
    })
}

fn clipboard_listener(
    region: &web_sys::Element,
    kind: &'static str,
    state: SharedState,
) -> EventListener {
    let options = EventListenerOptions::enable_prevent_default();
    EventListener::new_with_options(region, kind, options, move |event| {
        let Some(event) = event.dyn_ref::<web_sys::ClipboardEvent>() else {
            tracing::warn!(target: "richbar::toolbar", kind, "not a ClipboardEvent");
            return;
        };
        let clipboard = BrowserClipboard::from_event(event);
        let mut state = state.borrow_mut();
        let ToolbarState { surface, registry } = &mut *state;
        let outcome = if kind == "cut" {
            handle_cut(surface, registry, &clipboard)
        } else {
            handle_copy(surface, registry, &clipboard)
        };
        if outcome.prevent_default {
            event.prevent_default();
        }
    })
}

fn input_listener(region: &web_sys::Element, state: SharedState) -> EventListener {
    EventListener::new(region, "input", move |event| {
        let Some(event) = event.dyn_ref::<web_sys::InputEvent>() else {
            return;
        };
        let input_type = parse_browser_input_type(&event.input_type());
        handle_input(&mut state.borrow_mut().surface, &input_type);
    })
}
