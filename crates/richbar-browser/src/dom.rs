//! Conversion between live DOM nodes and detached markup.

use richbar_core::{Element, Fragment, MarkupNode, SurfaceError};
use wasm_bindgen::{JsCast, JsValue};

/// Map a failed DOM call to a surface error.
pub(crate) fn dom_error(err: JsValue) -> SurfaceError {
    SurfaceError::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Tag and attributes of a live element, without children.
pub fn shallow_markup(element: &web_sys::Element) -> Element {
    let mut markup = Element::new(element.local_name());
    let names: js_sys::Array = element.get_attribute_names();
    for name in names.iter() {
        let Some(name) = name.as_string() else {
            continue;
        };
        if let Some(value) = element.get_attribute(&name) {
            markup.set_attribute(&name, value);
        }
    }
    markup
}

/// Deep copy of a live node. Comments and other non-content nodes yield
/// `None`.
pub fn to_markup(node: &web_sys::Node) -> Option<MarkupNode> {
    match node.node_type() {
        web_sys::Node::TEXT_NODE => {
            Some(MarkupNode::text(node.text_content().unwrap_or_default()))
        }
        web_sys::Node::ELEMENT_NODE => {
            let element = node.dyn_ref::<web_sys::Element>()?;
            let mut markup = shallow_markup(element);
            for child in children_of(node) {
                if let Some(child) = to_markup(&child) {
                    markup.push(child);
                }
            }
            Some(markup.into())
        }
        _ => None,
    }
}

/// Copy the children of a live container (typically a `DocumentFragment`).
pub fn fragment_from_children(container: &web_sys::Node) -> Fragment {
    Fragment::from_nodes(children_of(container).iter().filter_map(to_markup).collect())
}

pub(crate) fn children_of(node: &web_sys::Node) -> Vec<web_sys::Node> {
    let list = node.child_nodes();
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

/// Create live nodes for `markup` owned by `document`.
pub fn build_node(
    document: &web_sys::Document,
    markup: &MarkupNode,
) -> Result<web_sys::Node, JsValue> {
    match markup {
        MarkupNode::Text(data) => Ok(document.create_text_node(data).into()),
        MarkupNode::Element(element) => {
            let live = document.create_element(element.tag())?;
            for (name, value) in element.attributes() {
                live.set_attribute(name, value)?;
            }
            for child in element.children() {
                live.append_child(&build_node(document, child)?)?;
            }
            Ok(live.into())
        }
    }
}

/// Build a live `DocumentFragment` holding `fragment`, returning it together
/// with its first top-level node.
pub fn build_fragment(
    document: &web_sys::Document,
    fragment: &Fragment,
) -> Result<(web_sys::DocumentFragment, Option<web_sys::Node>), JsValue> {
    let live = document.create_document_fragment();
    let mut first = None;
    for child in fragment.children() {
        let node = build_node(document, child)?;
        live.append_child(&node)?;
        first.get_or_insert(node);
    }
    Ok((live, first))
}
