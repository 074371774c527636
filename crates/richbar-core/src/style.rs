//! Style registry: the four toolbar styles and how each one is rendered.
//!
//! The registry is built once per mounted toolbar and never mutated. Two
//! markup variants exist:
//!
//! - [`MarkupVariant::Semantic`]: wrappers are `h1`/`h2`/`b`/`em` and a style
//!   is recognised by its tag.
//! - [`MarkupVariant::Classed`]: headings are rendered with the generic
//!   [`GENERIC_WRAPPER_TAG`] and every style is recognised by its marker
//!   class alone.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::markup::Element;

/// Tag used for headings in the classed variant. Carries no typography of
/// its own, so the normalizer freezes the computed values onto it.
pub const GENERIC_WRAPPER_TAG: &str = "span";

/// Identifier of a toolbar style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleId {
    Heading1,
    Heading2,
    Bold,
    Italic,
}

impl StyleId {
    pub const ALL: [StyleId; 4] = [
        StyleId::Heading1,
        StyleId::Heading2,
        StyleId::Bold,
        StyleId::Italic,
    ];

    /// The style that may not coexist with this one on a selection.
    ///
    /// Only heading levels conflict: a selection carries at most one.
    pub fn conflicting(self) -> Option<StyleId> {
        match self {
            StyleId::Heading1 => Some(StyleId::Heading2),
            StyleId::Heading2 => Some(StyleId::Heading1),
            StyleId::Bold | StyleId::Italic => None,
        }
    }

    pub fn marker_class(self) -> &'static str {
        match self {
            StyleId::Heading1 => "header1-text",
            StyleId::Heading2 => "header2-text",
            StyleId::Bold => "bold-text",
            StyleId::Italic => "italic-text",
        }
    }

    fn semantic_tag(self) -> &'static str {
        match self {
            StyleId::Heading1 => "h1",
            StyleId::Heading2 => "h2",
            StyleId::Bold => "b",
            StyleId::Italic => "em",
        }
    }

    fn button_class(self) -> &'static str {
        match self {
            StyleId::Heading1 => "header1-button",
            StyleId::Heading2 => "header2-button",
            StyleId::Bold => "bold-button",
            StyleId::Italic => "italic-button",
        }
    }
}

impl std::fmt::Display for StyleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StyleId::Heading1 => "heading-1",
            StyleId::Heading2 => "heading-2",
            StyleId::Bold => "bold",
            StyleId::Italic => "italic",
        };
        f.write_str(name)
    }
}

/// Which markup convention the toolbar produces and recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkupVariant {
    /// Semantic tags, detection by tag, toolbar buttons carry `data-tag`.
    #[default]
    Semantic,
    /// Generic heading tag, detection by marker class, toolbar buttons are
    /// identified by a CSS class.
    Classed,
}

/// How a single style is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDescriptor {
    pub wrapper_tag: SmolStr,
    pub marker_class: SmolStr,
    pub display_mode: SmolStr,
}

impl StyleDescriptor {
    /// Whether the wrapper relies entirely on its marker class for typography.
    pub fn uses_generic_tag(&self) -> bool {
        self.wrapper_tag == GENERIC_WRAPPER_TAG
    }

    /// A fresh, empty wrapper element carrying the marker class.
    pub fn create_wrapper(&self) -> Element {
        Element::new(self.wrapper_tag.clone()).with_class(&self.marker_class)
    }
}

/// Immutable style table for one markup variant.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    variant: MarkupVariant,
    descriptors: [StyleDescriptor; 4],
}

impl StyleRegistry {
    pub fn for_variant(variant: MarkupVariant) -> Self {
        let descriptors = StyleId::ALL.map(|id| {
            let wrapper_tag = match (variant, id) {
                (MarkupVariant::Classed, StyleId::Heading1 | StyleId::Heading2) => {
                    GENERIC_WRAPPER_TAG
                }
                _ => id.semantic_tag(),
            };
            StyleDescriptor {
                wrapper_tag: SmolStr::new_static(wrapper_tag),
                marker_class: SmolStr::new_static(id.marker_class()),
                display_mode: SmolStr::new_static("inline"),
            }
        });
        Self {
            variant,
            descriptors,
        }
    }

    pub fn semantic() -> Self {
        Self::for_variant(MarkupVariant::Semantic)
    }

    pub fn classed() -> Self {
        Self::for_variant(MarkupVariant::Classed)
    }

    pub fn variant(&self) -> MarkupVariant {
        self.variant
    }

    pub fn descriptor(&self, id: StyleId) -> &StyleDescriptor {
        let index = StyleId::ALL
            .iter()
            .position(|candidate| *candidate == id)
            .unwrap_or_default();
        &self.descriptors[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleId, &StyleDescriptor)> {
        StyleId::ALL.into_iter().zip(self.descriptors.iter())
    }

    /// Whether `element` is a wrapper of style `id` under this variant.
    pub fn matches(&self, element: &Element, id: StyleId) -> bool {
        let descriptor = self.descriptor(id);
        match self.variant {
            MarkupVariant::Semantic => descriptor.wrapper_tag == element.tag(),
            MarkupVariant::Classed => element.has_class(&descriptor.marker_class),
        }
    }

    /// The style `element` represents, or `None` for opaque elements.
    pub fn style_of(&self, element: &Element) -> Option<StyleId> {
        StyleId::ALL
            .into_iter()
            .find(|id| self.matches(element, *id))
    }

    /// Marker a toolbar button carries for `id`: the `data-tag` value in the
    /// semantic variant, the button class in the classed one.
    pub fn button_marker(&self, id: StyleId) -> &'static str {
        match self.variant {
            MarkupVariant::Semantic => id.semantic_tag(),
            MarkupVariant::Classed => id.button_class(),
        }
    }

    /// Resolve a toolbar button marker back to its style.
    pub fn style_for_button(&self, marker: &str) -> Option<StyleId> {
        StyleId::ALL
            .into_iter()
            .find(|id| self.button_marker(*id) == marker)
    }
}
