//! Presentation clean-up for freshly inserted wrappers (classed variant).

use crate::error::SurfaceError;
use crate::style::StyleDescriptor;
use crate::surface::DocumentSurface;

/// Properties copied from the rendered element onto a generic wrapper.
pub const FROZEN_PROPERTIES: [&str; 3] = ["font-weight", "font-size", "line-height"];

/// Reset a wrapper's inline style and classes, force its display mode and
/// marker class, and for generic wrappers pin the computed typography as
/// inline style.
///
/// The wrapper must already be rendered in the document so its computed
/// style reflects the page stylesheet.
pub fn update_element_styles<S: DocumentSurface>(
    surface: &mut S,
    node: &S::Node,
    descriptor: &StyleDescriptor,
) -> Result<(), SurfaceError> {
    surface.remove_attribute(node, "style")?;
    surface.remove_attribute(node, "class")?;
    surface.set_inline_style(node, "display", &descriptor.display_mode)?;
    surface.add_class(node, &descriptor.marker_class)?;

    if descriptor.uses_generic_tag() {
        for property in FROZEN_PROPERTIES {
            if let Some(value) = surface.computed_style(node, property) {
                surface.set_inline_style(node, property, &value)?;
            }
        }
    }
    Ok(())
}
