//! Browser event parsing.

use richbar_core::{InputType, MarkupVariant, StyleRegistry};

/// Parse a browser `InputEvent.inputType` string.
pub fn parse_browser_input_type(s: &str) -> InputType {
    match s {
        "deleteContentBackward" => InputType::DeleteContentBackward,
        other => InputType::Unknown(other.to_string()),
    }
}

/// Style marker carried by a toolbar button: its `data-tag` in the semantic
/// variant, the first class naming a style in the classed one.
pub fn button_marker(button: &web_sys::Element, registry: &StyleRegistry) -> Option<String> {
    match registry.variant() {
        MarkupVariant::Semantic => button.get_attribute("data-tag"),
        MarkupVariant::Classed => button
            .class_name()
            .split_whitespace()
            .find(|class| registry.style_for_button(class).is_some())
            .map(str::to_string),
    }
}
