//! Platform abstraction for the live document.
//!
//! The toggle and clipboard logic never touches browser objects directly.
//! Everything it needs from the page (the current selection, the editable
//! region, computed styles) goes through [`DocumentSurface`], and clipboard
//! output goes through [`ClipboardSink`]. The browser crate implements both
//! over web-sys; [`MemorySurface`](crate::MemorySurface) implements the
//! surface over an in-memory tree for tests and non-browser hosts.

use crate::error::SurfaceError;
use crate::markup::{Element, Fragment};

/// MIME type used for the clipboard payload.
pub const HTML_MIME: &str = "text/html";

/// Live document operations the editor relies on.
///
/// A surface owns exactly one editable region and one selection. All
/// mutations act on the selection's current range.
pub trait DocumentSurface {
    /// Handle to a live node.
    type Node: Clone + PartialEq + std::fmt::Debug;

    // === Selection state ===

    /// True when there is no selection or its range is empty.
    fn is_collapsed(&self) -> bool;

    /// Node the selection started in.
    fn anchor_node(&self) -> Option<Self::Node>;

    /// Node the selection ends in.
    fn focus_node(&self) -> Option<Self::Node>;

    /// Shallow copy (tag and attributes, no children) of `node`'s parent
    /// element.
    fn parent_element_of(&self, node: &Self::Node) -> Option<Element>;

    /// Whether the selection intersects the editable region.
    fn selection_in_region(&self) -> bool;

    // === Range operations ===

    /// Surround the selected range with `wrapper`, lift the wrapper out of
    /// the element enclosing the anchor node (splitting that element around
    /// it), and select the wrapper.
    ///
    /// Returns the inserted wrapper.
    fn expand_selection_to_wrapper(&mut self, wrapper: Element)
    -> Result<Self::Node, SurfaceError>;

    /// Detached copy of the selected contents. Does not modify the document.
    fn clone_selection(&self) -> Result<Fragment, SurfaceError>;

    /// Remove the selected contents, collapsing the selection.
    fn delete_selection(&mut self) -> Result<(), SurfaceError>;

    /// Insert `fragment` at the start of the selection.
    ///
    /// Returns the first inserted top-level node, if any.
    fn insert_at_selection(&mut self, fragment: Fragment)
    -> Result<Option<Self::Node>, SurfaceError>;

    // === Element presentation ===

    /// Resolved value of a CSS property on a rendered element.
    fn computed_style(&self, node: &Self::Node, property: &str) -> Option<String>;

    fn set_inline_style(
        &mut self,
        node: &Self::Node,
        property: &str,
        value: &str,
    ) -> Result<(), SurfaceError>;

    fn remove_attribute(&mut self, node: &Self::Node, name: &str) -> Result<(), SurfaceError>;

    fn add_class(&mut self, node: &Self::Node, class: &str) -> Result<(), SurfaceError>;

    // === Editable region ===

    /// First element with `tag` inside the editable region, in tree order.
    fn first_in_region(&self, tag: &str) -> Option<Self::Node>;

    fn region_text_content(&self) -> String;

    /// Replace the region's content with the empty string.
    fn clear_region(&mut self);
}

/// Destination for clipboard payloads during a copy or cut event.
pub trait ClipboardSink {
    fn write(&self, mime: &str, data: &str);
}
