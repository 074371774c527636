//! Copy and cut handling.
//!
//! The clipboard receives the selection as HTML so formatting survives a
//! paste into another rich editor. No plain-text payload is written.

use std::cell::RefCell;

use crate::error::SurfaceError;
use crate::inspect::derive_selection_fragment;
use crate::markup::Element;
use crate::style::{MarkupVariant, StyleRegistry};
use crate::surface::{ClipboardSink, DocumentSurface, HTML_MIME};

/// Result of a copy or cut handler.
///
/// The browser's default clipboard behaviour is always suppressed, even when
/// nothing was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardOutcome {
    pub prevent_default: bool,
    pub written: bool,
}

impl ClipboardOutcome {
    fn suppressed(written: bool) -> Self {
        Self {
            prevent_default: true,
            written,
        }
    }
}

/// Serialise the current selection as HTML for the clipboard.
///
/// Returns `Ok(None)` when the selection is collapsed. In the semantic
/// variant each exported wrapper is given the computed `font-size` of the
/// first live element in the region with the same tag.
pub fn serialize_selection_for_clipboard<S: DocumentSurface>(
    surface: &mut S,
    registry: &StyleRegistry,
) -> Result<Option<String>, SurfaceError> {
    let Some(mut fragment) = derive_selection_fragment(surface, registry)? else {
        return Ok(None);
    };

    if registry.variant() == MarkupVariant::Semantic {
        for (style, descriptor) in registry.iter() {
            let Some(font_size) = surface
                .first_in_region(&descriptor.wrapper_tag)
                .and_then(|live| surface.computed_style(&live, "font-size"))
            else {
                continue;
            };
            tracing::trace!(
                target: "richbar::clipboard",
                %style,
                %font_size,
                "propagating font size"
            );
            fragment.for_each_element_mut(|element| {
                if descriptor.wrapper_tag == element.tag() {
                    element.set_style_property("font-size", &font_size);
                }
            });
        }
    }

    Ok(Some(fragment.wrap_in(Element::new("div")).inner_html()))
}

/// Handle a `copy` event.
pub fn handle_copy<S, C>(
    surface: &mut S,
    registry: &StyleRegistry,
    clipboard: &C,
) -> ClipboardOutcome
where
    S: DocumentSurface,
    C: ClipboardSink + ?Sized,
{
    ClipboardOutcome::suppressed(write_selection(surface, registry, clipboard))
}

/// Handle a `cut` event: copy, then delete the selection.
pub fn handle_cut<S, C>(
    surface: &mut S,
    registry: &StyleRegistry,
    clipboard: &C,
) -> ClipboardOutcome
where
    S: DocumentSurface,
    C: ClipboardSink + ?Sized,
{
    let written = write_selection(surface, registry, clipboard);
    if written {
        if let Err(err) = surface.delete_selection() {
            tracing::warn!(
                target: "richbar::clipboard",
                error = %err,
                "cut could not delete selection"
            );
        }
    }
    ClipboardOutcome::suppressed(written)
}

fn write_selection<S, C>(surface: &mut S, registry: &StyleRegistry, clipboard: &C) -> bool
where
    S: DocumentSurface,
    C: ClipboardSink + ?Sized,
{
    match serialize_selection_for_clipboard(surface, registry) {
        Ok(Some(html)) => {
            clipboard.write(HTML_MIME, &html);
            true
        }
        Ok(None) => {
            tracing::debug!(target: "richbar::clipboard", "nothing selected");
            false
        }
        Err(err) => {
            tracing::warn!(
                target: "richbar::clipboard",
                error = %err,
                "selection could not be serialised"
            );
            false
        }
    }
}

/// Clipboard sink that records every write.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: RefCell<Vec<(String, String)>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.borrow().clone()
    }

    /// Most recent payload written under `mime`.
    pub fn last(&self, mime: &str) -> Option<String> {
        self.writes
            .borrow()
            .iter()
            .rev()
            .find(|(kind, _)| kind == mime)
            .map(|(_, data)| data.clone())
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write(&self, mime: &str, data: &str) {
        self.writes
            .borrow_mut()
            .push((mime.to_string(), data.to_string()));
    }
}
