//! Toggling a style on the current selection.
//!
//! A toolbar click either wraps the selection in the style's wrapper or, when
//! the style is already present, unwraps it. Heading levels are mutually
//! exclusive. Every failure degrades to a skipped operation; nothing here
//! surfaces an error to the user.

use crate::error::SurfaceError;
use crate::inspect::derive_selection_fragment;
use crate::markup::MarkupNode;
use crate::normalize::update_element_styles;
use crate::style::{MarkupVariant, StyleId, StyleRegistry};
use crate::surface::DocumentSurface;

/// Why a toggle left the document untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing is selected.
    Collapsed,
    /// The selection does not touch the editable region.
    OutsideRegion,
    /// The style counted as applied but no wrapper was found to remove.
    NothingToUnwrap,
    /// The clicked button carries no recognised style marker.
    UnknownButton,
    /// The surface rejected an operation part way through.
    SurfaceFailure,
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Wrapped(StyleId),
    Unwrapped(StyleId),
    Skipped(SkipReason),
}

/// Toggle `style` on the current selection.
pub fn toggle_style<S: DocumentSurface>(
    surface: &mut S,
    registry: &StyleRegistry,
    style: StyleId,
) -> ToggleOutcome {
    let outcome = match try_toggle(surface, registry, style) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(target: "richbar::toggle", %style, error = %err, "toggle aborted");
            ToggleOutcome::Skipped(SkipReason::SurfaceFailure)
        }
    };
    match outcome {
        ToggleOutcome::Skipped(reason) => {
            tracing::debug!(target: "richbar::toggle", %style, ?reason, "toggle skipped")
        }
        applied => tracing::trace!(target: "richbar::toggle", ?applied, "toggle applied"),
    }
    outcome
}

/// Toggle the style a toolbar button is marked with.
pub fn toggle_for_button<S: DocumentSurface>(
    surface: &mut S,
    registry: &StyleRegistry,
    marker: Option<&str>,
) -> ToggleOutcome {
    match marker.and_then(|marker| registry.style_for_button(marker)) {
        Some(style) => toggle_style(surface, registry, style),
        None => {
            tracing::debug!(target: "richbar::toggle", ?marker, "no style for button");
            ToggleOutcome::Skipped(SkipReason::UnknownButton)
        }
    }
}

fn try_toggle<S: DocumentSurface>(
    surface: &mut S,
    registry: &StyleRegistry,
    style: StyleId,
) -> Result<ToggleOutcome, SurfaceError> {
    if surface.is_collapsed() {
        return Ok(ToggleOutcome::Skipped(SkipReason::Collapsed));
    }
    if !surface.selection_in_region() {
        return Ok(ToggleOutcome::Skipped(SkipReason::OutsideRegion));
    }
    let Some(selection) = derive_selection_fragment(surface, registry)? else {
        return Ok(ToggleOutcome::Skipped(SkipReason::Collapsed));
    };

    let is_style = |element: &crate::markup::Element| registry.matches(element, style);

    let mut content = selection.clone();
    if let Some(conflict) = style.conflicting() {
        let is_conflict = |element: &crate::markup::Element| registry.matches(element, conflict);
        if content.unwrap_first(is_conflict) {
            tracing::trace!(target: "richbar::toggle", %conflict, "removed conflicting heading");
        }
    }

    let starts_with_style = selection
        .first_child()
        .and_then(MarkupNode::as_element)
        .is_some_and(is_style);

    if starts_with_style || content.contains(is_style) {
        if !content.unwrap_first(is_style) {
            return Ok(ToggleOutcome::Skipped(SkipReason::NothingToUnwrap));
        }
        surface.delete_selection()?;
        surface.insert_at_selection(content)?;
        return Ok(ToggleOutcome::Unwrapped(style));
    }

    let descriptor = registry.descriptor(style);
    let wrapper = content.wrap_in(descriptor.create_wrapper());
    surface.delete_selection()?;
    let inserted = surface.insert_at_selection(wrapper.into())?;
    if registry.variant() == MarkupVariant::Classed {
        if let Some(node) = inserted {
            update_element_styles(surface, &node, descriptor)?;
        }
    }
    Ok(ToggleOutcome::Wrapped(style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySurface;

    fn doc(html: &str) -> MemorySurface {
        MemorySurface::new(html).unwrap()
    }

    #[test]
    fn collapsed_selection_is_skipped() {
        let mut surface = doc("<p>hello</p>");
        surface.place_caret(3);
        let outcome = toggle_style(&mut surface, &StyleRegistry::semantic(), StyleId::Bold);
        assert_eq!(outcome, ToggleOutcome::Skipped(SkipReason::Collapsed));
        assert_eq!(surface.mutation_count(), 0);
    }

    #[test]
    fn selection_outside_region_is_skipped() {
        let mut surface = doc("<p>inside</p>");
        surface.append_outside("<p>outside</p>").unwrap();
        surface.select_text("outside");
        let outcome = toggle_style(&mut surface, &StyleRegistry::semantic(), StyleId::Italic);
        assert_eq!(outcome, ToggleOutcome::Skipped(SkipReason::OutsideRegion));
        assert_eq!(surface.mutation_count(), 0);
    }

    #[test]
    fn unknown_button_is_skipped() {
        let mut surface = doc("<p>hello</p>");
        surface.select_text("hello");
        let registry = StyleRegistry::semantic();
        assert_eq!(
            toggle_for_button(&mut surface, &registry, Some("u")),
            ToggleOutcome::Skipped(SkipReason::UnknownButton)
        );
        assert_eq!(
            toggle_for_button(&mut surface, &registry, None),
            ToggleOutcome::Skipped(SkipReason::UnknownButton)
        );
        assert_eq!(
            toggle_for_button(&mut surface, &registry, Some("b")),
            ToggleOutcome::Wrapped(StyleId::Bold)
        );
    }

    #[test]
    fn nested_style_inside_selection_is_unwrapped() {
        let mut surface = doc("<p>a <b>b</b> c</p>");
        surface.select_text("a b c");
        let outcome = toggle_style(&mut surface, &StyleRegistry::semantic(), StyleId::Bold);
        assert_eq!(outcome, ToggleOutcome::Unwrapped(StyleId::Bold));
        assert_eq!(surface.region_html(), "<p>a b c</p>");
    }

    #[test]
    fn other_styles_are_preserved_when_wrapping() {
        let mut surface = doc("<p>a <em>b</em> c</p>");
        surface.select_text("a b c");
        let outcome = toggle_style(&mut surface, &StyleRegistry::semantic(), StyleId::Bold);
        assert_eq!(outcome, ToggleOutcome::Wrapped(StyleId::Bold));
        assert_eq!(
            surface.region_html(),
            r#"<p><b class="bold-text">a <em>b</em> c</b></p>"#
        );
    }
}
