//! Post-input clean-up of the editable region.
//!
//! Browsers leave empty wrappers behind when the last character inside one
//! is deleted, so the next keystroke would silently inherit that style.

use crate::surface::DocumentSurface;

/// The `inputType` of a W3C Input Event, as far as clean-up cares.
///
/// Every type other than a backspace is carried through as its raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
    /// Delete content backward (Backspace).
    DeleteContentBackward,
    Unknown(String),
}

/// React to an `input` event. When a backspace left the region without any
/// text, its content is reset so no empty wrapper survives.
///
/// Returns whether the region was cleared.
pub fn handle_input<S: DocumentSurface>(surface: &mut S, input_type: &InputType) -> bool {
    if *input_type != InputType::DeleteContentBackward {
        return false;
    }
    if !surface.region_text_content().is_empty() {
        return false;
    }
    tracing::debug!(target: "richbar::input", "region emptied, clearing residual markup");
    surface.clear_region();
    true
}
