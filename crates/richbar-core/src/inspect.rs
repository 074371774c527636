//! Selection inspection.
//!
//! Turns the live selection into a detached [`Fragment`] the toggler and the
//! clipboard serializer can examine. When the whole selection sits inside one
//! text node of an existing style wrapper, the selection is first widened so
//! later operations act on whole wrappers instead of slices of one. In the
//! classed variant the new wrapper is normalized like any other inserted
//! wrapper, so a split heading keeps its pinned typography in every slice.

use crate::error::SurfaceError;
use crate::markup::Fragment;
use crate::normalize::update_element_styles;
use crate::style::{MarkupVariant, StyleId, StyleRegistry};
use crate::surface::DocumentSurface;

/// Style of the wrapper enclosing the selection, when anchor and focus are
/// the same node and that node's parent is a recognised wrapper.
pub fn enclosing_style<S: DocumentSurface>(
    surface: &S,
    registry: &StyleRegistry,
) -> Option<StyleId> {
    let anchor = surface.anchor_node()?;
    if surface.focus_node()? != anchor {
        return None;
    }
    let parent = surface.parent_element_of(&anchor)?;
    registry.style_of(&parent)
}

/// Clone the current selection, auto-expanding it first when it lies inside
/// a single style wrapper.
///
/// Returns `Ok(None)` for a collapsed selection; nothing is touched then.
pub fn derive_selection_fragment<S: DocumentSurface>(
    surface: &mut S,
    registry: &StyleRegistry,
) -> Result<Option<Fragment>, SurfaceError> {
    if surface.is_collapsed() {
        return Ok(None);
    }

    if let Some(style) = enclosing_style(surface, registry) {
        tracing::trace!(target: "richbar::inspect", %style, "expanding selection to wrapper");
        let descriptor = registry.descriptor(style);
        let wrapper = surface.expand_selection_to_wrapper(descriptor.create_wrapper())?;
        if registry.variant() == MarkupVariant::Classed {
            update_element_styles(surface, &wrapper, descriptor)?;
        }
    }

    surface.clone_selection().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySurface;

    #[test]
    fn collapsed_selection_yields_nothing() {
        let mut doc = MemorySurface::new("<p>hello</p>").unwrap();
        doc.place_caret(2);
        let fragment = derive_selection_fragment(&mut doc, &StyleRegistry::semantic()).unwrap();
        assert_eq!(fragment, None);
        assert_eq!(doc.mutation_count(), 0);
    }

    #[test]
    fn plain_selection_is_cloned_without_mutation() {
        let mut doc = MemorySurface::new("<p>hello world</p>").unwrap();
        doc.select_text("lo wo");
        let fragment = derive_selection_fragment(&mut doc, &StyleRegistry::semantic())
            .unwrap()
            .unwrap();
        assert_eq!(fragment.to_html(), "lo wo");
        assert_eq!(doc.mutation_count(), 0);
    }

    #[test]
    fn selection_inside_wrapper_is_expanded() {
        let mut doc = MemorySurface::new("<p><em>very long</em></p>").unwrap();
        doc.select_text("long");
        let registry = StyleRegistry::semantic();
        assert_eq!(enclosing_style(&doc, &registry), Some(StyleId::Italic));
        let fragment = derive_selection_fragment(&mut doc, &registry).unwrap().unwrap();
        assert_eq!(fragment.to_html(), r#"<em class="italic-text">long</em>"#);
        assert_eq!(
            doc.region_html(),
            r#"<p><em>very </em><em class="italic-text">long</em></p>"#
        );
    }

    #[test]
    fn classed_variant_ignores_unmarked_wrappers() {
        let mut doc = MemorySurface::new("<p><b>plain</b></p>").unwrap();
        doc.select_text("plain");
        assert_eq!(enclosing_style(&doc, &StyleRegistry::classed()), None);
        assert_eq!(enclosing_style(&doc, &StyleRegistry::semantic()), Some(StyleId::Bold));
    }
}
