//! `DocumentSurface` over the browser Selection and Range APIs.

use richbar_core::{DocumentSurface, Element, Fragment, SurfaceError};
use wasm_bindgen::JsCast;

use crate::dom::{
    build_fragment, build_node, children_of, dom_error, fragment_from_children, shallow_markup,
};

/// Live page surface bound to one editable region.
#[derive(Debug, Clone)]
pub struct BrowserSurface {
    window: web_sys::Window,
    document: web_sys::Document,
    region: web_sys::Element,
}

impl BrowserSurface {
    pub fn new(region: web_sys::Element) -> Result<Self, SurfaceError> {
        let window = web_sys::window().ok_or_else(|| SurfaceError::from("no window"))?;
        let document = region
            .owner_document()
            .ok_or_else(|| SurfaceError::from("region has no owner document"))?;
        Ok(Self {
            window,
            document,
            region,
        })
    }

    fn selection(&self) -> Option<web_sys::Selection> {
        self.window.get_selection().ok().flatten()
    }

    fn range(&self) -> Result<web_sys::Range, SurfaceError> {
        let selection = self.selection().ok_or(SurfaceError::NoSelection)?;
        if selection.range_count() == 0 {
            return Err(SurfaceError::NoSelection);
        }
        selection.get_range_at(0).map_err(dom_error)
    }

    /// Move `node` out of its parent, splitting the parent into a leading and
    /// a trailing shallow copy. Copies without content are dropped.
    fn lift_out_of_parent(&self, node: &web_sys::Node) -> Result<(), SurfaceError> {
        let enclosing = node.parent_node().ok_or(SurfaceError::Detached)?;
        let region: &web_sys::Node = self.region.as_ref();
        if enclosing == *region {
            return Ok(());
        }
        let outer = enclosing.parent_node().ok_or(SurfaceError::Detached)?;

        let siblings = children_of(&enclosing);
        let split = siblings
            .iter()
            .position(|sibling| sibling == node)
            .ok_or(SurfaceError::Detached)?;
        let before = enclosing.clone_node().map_err(dom_error)?;
        let after = enclosing.clone_node().map_err(dom_error)?;
        for sibling in &siblings[..split] {
            before.append_child(sibling).map_err(dom_error)?;
        }
        for sibling in &siblings[split + 1..] {
            after.append_child(sibling).map_err(dom_error)?;
        }

        for part in [&before, node, &after] {
            if part != node && !has_content(part) {
                continue;
            }
            outer.insert_before(part, Some(&enclosing)).map_err(dom_error)?;
        }
        outer.remove_child(&enclosing).map_err(dom_error)?;
        Ok(())
    }
}

fn as_element(node: &web_sys::Node) -> Result<&web_sys::Element, SurfaceError> {
    node.dyn_ref::<web_sys::Element>()
        .ok_or_else(|| SurfaceError::from("not an element"))
}

fn has_content(node: &web_sys::Node) -> bool {
    children_of(node).iter().any(|child| {
        child.node_type() != web_sys::Node::TEXT_NODE
            || !child.text_content().unwrap_or_default().is_empty()
    })
}

impl DocumentSurface for BrowserSurface {
    type Node = web_sys::Node;

    fn is_collapsed(&self) -> bool {
        self.selection()
            .is_none_or(|selection| selection.range_count() == 0 || selection.is_collapsed())
    }

    fn anchor_node(&self) -> Option<web_sys::Node> {
        self.selection()?.anchor_node()
    }

    fn focus_node(&self) -> Option<web_sys::Node> {
        self.selection()?.focus_node()
    }

    fn parent_element_of(&self, node: &web_sys::Node) -> Option<Element> {
        node.parent_element().map(|parent| shallow_markup(&parent))
    }

    fn selection_in_region(&self) -> bool {
        self.selection().is_some_and(|selection| {
            selection
                .contains_node_with_allow_partial_containment(&self.region, true)
                .unwrap_or(false)
        })
    }

    fn expand_selection_to_wrapper(
        &mut self,
        wrapper: Element,
    ) -> Result<web_sys::Node, SurfaceError> {
        let range = self.range()?;
        let enclosing = range.start_container().map_err(dom_error)?.parent_node();
        let live = build_node(&self.document, &wrapper.into()).map_err(dom_error)?;
        range.surround_contents(&live).map_err(dom_error)?;
        if enclosing.is_some() && live.parent_node() == enclosing {
            self.lift_out_of_parent(&live)?;
        }

        let selection = self.selection().ok_or(SurfaceError::NoSelection)?;
        let range = self.document.create_range().map_err(dom_error)?;
        range.select_node(&live).map_err(dom_error)?;
        selection.remove_all_ranges().map_err(dom_error)?;
        selection.add_range(&range).map_err(dom_error)?;
        Ok(live)
    }

    fn clone_selection(&self) -> Result<Fragment, SurfaceError> {
        let contents = self.range()?.clone_contents().map_err(dom_error)?;
        Ok(fragment_from_children(&contents))
    }

    fn delete_selection(&mut self) -> Result<(), SurfaceError> {
        self.range()?.delete_contents().map_err(dom_error)
    }

    fn insert_at_selection(
        &mut self,
        fragment: Fragment,
    ) -> Result<Option<web_sys::Node>, SurfaceError> {
        let range = self.range()?;
        let (live, first) = build_fragment(&self.document, &fragment).map_err(dom_error)?;
        range.insert_node(&live).map_err(dom_error)?;
        Ok(first)
    }

    fn computed_style(&self, node: &web_sys::Node, property: &str) -> Option<String> {
        let element = node.dyn_ref::<web_sys::Element>()?;
        let style = self.window.get_computed_style(element).ok().flatten()?;
        style
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_inline_style(
        &mut self,
        node: &web_sys::Node,
        property: &str,
        value: &str,
    ) -> Result<(), SurfaceError> {
        node.dyn_ref::<web_sys::HtmlElement>()
            .ok_or_else(|| SurfaceError::from("not an html element"))?
            .style()
            .set_property(property, value)
            .map_err(dom_error)
    }

    fn remove_attribute(&mut self, node: &web_sys::Node, name: &str) -> Result<(), SurfaceError> {
        as_element(node)?.remove_attribute(name).map_err(dom_error)
    }

    fn add_class(&mut self, node: &web_sys::Node, class: &str) -> Result<(), SurfaceError> {
        as_element(node)?.class_list().add_1(class).map_err(dom_error)
    }

    fn first_in_region(&self, tag: &str) -> Option<web_sys::Node> {
        self.region
            .query_selector(tag)
            .ok()
            .flatten()
            .map(Into::into)
    }

    fn region_text_content(&self) -> String {
        self.region.text_content().unwrap_or_default()
    }

    fn clear_region(&mut self) {
        self.region.set_inner_html("");
    }
}
