//! In-memory document surface.
//!
//! `MemorySurface` keeps a small DOM in an arena together with a single live
//! range, and implements the range algorithms the toolbar relies on (clone,
//! delete, insert, surround) with the same boundary-point semantics as the
//! browser. Computed styles come from an injected [`StyleResolver`].
//!
//! Text offsets are counted in chars.

use std::cmp::Ordering;

use crate::error::SurfaceError;
use crate::markup::{Element, Fragment, MarkupNode, ParseError, parse_fragment};
use crate::resolver::{FixtureStyles, StyleResolver};
use crate::surface::DocumentSurface;

/// Handle to a node in a [`MemorySurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeData {
    /// Tag and attributes only; children live in the arena entry.
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeEntry {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A boundary point: a node and an offset inside it (chars for text nodes,
/// child index for elements).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Boundary {
    node: NodeId,
    offset: usize,
}

impl Boundary {
    fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LiveRange {
    start: Boundary,
    end: Boundary,
}

impl LiveRange {
    fn collapsed_at(point: Boundary) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Arena-backed document with one editable region and one selection.
pub struct MemorySurface {
    nodes: Vec<NodeEntry>,
    root: NodeId,
    region: NodeId,
    range: Option<LiveRange>,
    resolver: Box<dyn StyleResolver>,
    mutations: usize,
}

impl std::fmt::Debug for MemorySurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySurface")
            .field("region", &self.region_html())
            .field("range", &self.range)
            .field("mutations", &self.mutations)
            .finish()
    }
}

impl MemorySurface {
    /// Build a document whose editable region contains `region_html`.
    ///
    /// The region is a `div.edit-area` inside a `body` root.
    pub fn new(region_html: &str) -> Result<Self, ParseError> {
        let fragment = parse_fragment(region_html)?;
        let mut surface = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            region: NodeId(0),
            range: None,
            resolver: Box::new(FixtureStyles::new()),
            mutations: 0,
        };
        surface.root = surface.alloc(NodeData::Element(Element::new("body")));
        surface.region = surface.alloc(NodeData::Element(
            Element::new("div")
                .with_class("edit-area")
                .with_attribute("contenteditable", "true"),
        ));
        surface.append_child(surface.root, surface.region);
        for node in fragment.into_children() {
            let id = surface.build(node);
            surface.append_child(surface.region, id);
        }
        Ok(surface)
    }

    pub fn with_resolver(mut self, resolver: impl StyleResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Append markup to the page after the editable region.
    pub fn append_outside(&mut self, html: &str) -> Result<(), ParseError> {
        for node in parse_fragment(html)?.into_children() {
            let id = self.build(node);
            self.append_child(self.root, id);
        }
        Ok(())
    }

    pub fn region(&self) -> NodeId {
        self.region
    }

    /// Serialised content of the editable region.
    pub fn region_html(&self) -> String {
        self.to_markup_element(self.region).inner_html()
    }

    /// Serialised content of the whole page.
    pub fn page_html(&self) -> String {
        self.to_markup_element(self.root).inner_html()
    }

    /// Number of mutating operations applied so far.
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }

    /// Snapshot of a node as detached markup.
    pub fn node_markup(&self, id: NodeId) -> MarkupNode {
        self.to_markup(id)
    }

    // === Selection helpers ===

    /// Collapse the selection to a caret at char offset `at` of the page text.
    pub fn place_caret(&mut self, at: usize) -> bool {
        self.select_chars(at, at)
    }

    /// Select `start..end`, counted in chars of the page's text content.
    ///
    /// A start that falls between two text nodes binds to the later one and
    /// an end binds to the earlier one, matching how a user drag selects.
    pub fn select_chars(&mut self, start: usize, end: usize) -> bool {
        let (start, end) = (start.min(end), start.max(end));
        let Some(start_point) = self.locate_char(start, true) else {
            return false;
        };
        let end_point = if start == end {
            start_point
        } else {
            match self.locate_char(end, false) {
                Some(point) => point,
                None => return false,
            }
        };
        self.range = Some(LiveRange {
            start: start_point,
            end: end_point,
        });
        true
    }

    /// Select the first occurrence of `needle` in the page text.
    pub fn select_text(&mut self, needle: &str) -> bool {
        self.select_nth_text(needle, 0)
    }

    /// Select the `nth` (zero based) occurrence of `needle` in the page text.
    pub fn select_nth_text(&mut self, needle: &str, nth: usize) -> bool {
        let text = self.text_content(self.root);
        let Some((byte_start, _)) = text.match_indices(needle).nth(nth) else {
            return false;
        };
        let start = text[..byte_start].chars().count();
        self.select_chars(start, start + needle.chars().count())
    }

    /// Select all of `node` within its parent.
    pub fn select_node(&mut self, node: NodeId) -> Result<(), SurfaceError> {
        let parent = self.parent(node).ok_or(SurfaceError::Detached)?;
        let index = self.index(node);
        self.range = Some(LiveRange {
            start: Boundary::new(parent, index),
            end: Boundary::new(parent, index + 1),
        });
        Ok(())
    }

    /// Text currently covered by the selection.
    pub fn selected_text(&self) -> String {
        self.clone_selection()
            .map(|fragment| fragment.text_content())
            .unwrap_or_default()
    }

    fn locate_char(&self, at: usize, prefer_later: bool) -> Option<Boundary> {
        let mut consumed = 0;
        let mut last = None;
        for id in self.descendants(self.root) {
            let NodeData::Text(data) = &self.nodes[id.0].data else {
                continue;
            };
            let len = data.chars().count();
            if len == 0 {
                continue;
            }
            let (node_start, node_end) = (consumed, consumed + len);
            let inside = if prefer_later {
                at >= node_start && at < node_end
            } else {
                at > node_start && at <= node_end
            };
            if inside {
                return Some(Boundary::new(id, at - node_start));
            }
            consumed = node_end;
            last = Some((id, len));
        }
        match last {
            Some((id, len)) if at == consumed => Some(Boundary::new(id, len)),
            None if at == 0 => Some(Boundary::new(self.region, 0)),
            _ => None,
        }
    }

    // === Arena primitives ===

    fn alloc(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(NodeEntry {
            data,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    fn build(&mut self, node: MarkupNode) -> NodeId {
        match node {
            MarkupNode::Text(data) => self.alloc(NodeData::Text(data)),
            MarkupNode::Element(mut element) => {
                let children = std::mem::take(element.children_mut());
                let id = self.alloc(NodeData::Element(element));
                for child in children {
                    let child_id = self.build(child);
                    self.append_child(id, child_id);
                }
                id
            }
        }
    }

    fn to_markup(&self, id: NodeId) -> MarkupNode {
        match &self.nodes[id.0].data {
            NodeData::Text(data) => MarkupNode::Text(data.clone()),
            NodeData::Element(_) => MarkupNode::Element(self.to_markup_element(id)),
        }
    }

    fn to_markup_element(&self, id: NodeId) -> Element {
        let mut element = self.shallow_element(id).unwrap_or_else(|| Element::new("#text"));
        for child in &self.nodes[id.0].children {
            element.push(self.to_markup(*child));
        }
        element
    }

    fn shallow_element(&self, id: NodeId) -> Option<Element> {
        match &self.nodes[id.0].data {
            NodeData::Element(element) => Some(element.shallow_clone()),
            NodeData::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, SurfaceError> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(element) => Ok(element),
            NodeData::Text(_) => Err(SurfaceError::Dom("not an element".into())),
        }
    }

    fn is_text(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].data, NodeData::Text(_))
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    fn index(&self, id: NodeId) -> usize {
        self.parent(id)
            .and_then(|parent| self.children(parent).iter().position(|c| *c == id))
            .unwrap_or(0)
    }

    /// Node length in the boundary-point sense.
    fn length(&self, id: NodeId) -> usize {
        match &self.nodes[id.0].data {
            NodeData::Text(data) => data.chars().count(),
            NodeData::Element(_) => self.nodes[id.0].children.len(),
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let at = self.children(parent).len();
        self.insert_child(parent, at, child);
    }

    fn insert_child(&mut self, parent: NodeId, at: usize, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(at, child);
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn is_attached(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root, id)
    }

    /// Preorder traversal of `id` and everything below it.
    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|node| match &self.nodes[node.0].data {
                NodeData::Text(data) => Some(data.as_str()),
                NodeData::Element(_) => None,
            })
            .collect()
    }

    fn text_slice(&self, id: NodeId, from: usize, to: usize) -> String {
        match &self.nodes[id.0].data {
            NodeData::Text(data) => data.chars().skip(from).take(to.saturating_sub(from)).collect(),
            NodeData::Element(_) => String::new(),
        }
    }

    fn set_text(&mut self, id: NodeId, text: String) {
        if let NodeData::Text(data) = &mut self.nodes[id.0].data {
            *data = text;
        }
    }

    // === Boundary point ordering ===

    /// Child indices from the root down to `id`.
    fn path(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(self.index(current));
            current = parent;
        }
        path.reverse();
        path
    }

    fn compare_points(&self, a: Boundary, b: Boundary) -> Ordering {
        if a.node == b.node {
            return a.offset.cmp(&b.offset);
        }
        if self.path(b.node) < self.path(a.node) {
            return self.compare_points(b, a).reverse();
        }
        if self.is_inclusive_ancestor(a.node, b.node) {
            let mut child = b.node;
            while let Some(parent) = self.parent(child) {
                if parent == a.node {
                    break;
                }
                child = parent;
            }
            if self.index(child) < a.offset {
                return Ordering::Greater;
            }
        }
        Ordering::Less
    }

    fn is_contained(&self, id: NodeId, range: &LiveRange) -> bool {
        self.compare_points(Boundary::new(id, 0), range.start) == Ordering::Greater
            && self.compare_points(Boundary::new(id, self.length(id)), range.end) == Ordering::Less
    }

    fn is_partially_contained(&self, id: NodeId, range: &LiveRange) -> bool {
        self.is_inclusive_ancestor(id, range.start.node)
            != self.is_inclusive_ancestor(id, range.end.node)
    }

    fn common_ancestor(&self, range: &LiveRange) -> NodeId {
        let mut ancestor = range.start.node;
        while !self.is_inclusive_ancestor(ancestor, range.end.node) {
            match self.parent(ancestor) {
                Some(parent) => ancestor = parent,
                None => break,
            }
        }
        ancestor
    }

    fn intersects(&self, id: NodeId, range: &LiveRange) -> bool {
        let Some(parent) = self.parent(id) else {
            return true;
        };
        let index = self.index(id);
        self.compare_points(Boundary::new(parent, index), range.end) == Ordering::Less
            && self.compare_points(Boundary::new(parent, index + 1), range.start)
                == Ordering::Greater
    }

    // === Range algorithms ===

    fn clone_range(&self, range: &LiveRange) -> Vec<MarkupNode> {
        if range.is_collapsed() {
            return Vec::new();
        }
        let (start, end) = (range.start, range.end);
        if start.node == end.node && self.is_text(start.node) {
            return vec![MarkupNode::Text(self.text_slice(
                start.node,
                start.offset,
                end.offset,
            ))];
        }

        let ancestor = self.common_ancestor(range);
        let children = self.children(ancestor);
        let first_partial = if self.is_inclusive_ancestor(start.node, end.node) {
            None
        } else {
            children
                .iter()
                .copied()
                .find(|c| self.is_partially_contained(*c, range))
        };
        let last_partial = if self.is_inclusive_ancestor(end.node, start.node) {
            None
        } else {
            children
                .iter()
                .rev()
                .copied()
                .find(|c| self.is_partially_contained(*c, range))
        };

        let mut out = Vec::new();
        if let Some(first) = first_partial {
            if self.is_text(first) {
                out.push(MarkupNode::Text(self.text_slice(
                    first,
                    start.offset,
                    self.length(first),
                )));
            } else if let Some(element) = self.shallow_element(first) {
                let inner = LiveRange {
                    start,
                    end: Boundary::new(first, self.length(first)),
                };
                out.push(Fragment::from_nodes(self.clone_range(&inner)).wrap_in(element).into());
            }
        }
        for child in children.iter().copied() {
            if self.is_contained(child, range) {
                out.push(self.to_markup(child));
            }
        }
        if let Some(last) = last_partial {
            if self.is_text(last) {
                out.push(MarkupNode::Text(self.text_slice(last, 0, end.offset)));
            } else if let Some(element) = self.shallow_element(last) {
                let inner = LiveRange {
                    start: Boundary::new(last, 0),
                    end,
                };
                out.push(Fragment::from_nodes(self.clone_range(&inner)).wrap_in(element).into());
            }
        }
        out
    }

    fn delete_range(&mut self, range: LiveRange) {
        if range.is_collapsed() {
            return;
        }
        let (start, end) = (range.start, range.end);
        self.mutations += 1;

        if start.node == end.node && self.is_text(start.node) {
            let length = self.length(start.node);
            let kept = self.text_slice(start.node, 0, start.offset)
                + &self.text_slice(start.node, end.offset, length);
            self.set_text(start.node, kept);
            self.range = Some(LiveRange::collapsed_at(start));
            return;
        }

        let doomed: Vec<NodeId> = self
            .descendants(self.common_ancestor(&range))
            .into_iter()
            .filter(|id| self.is_contained(*id, &range))
            .filter(|id| {
                self.parent(*id)
                    .is_none_or(|parent| !self.is_contained(parent, &range))
            })
            .collect();

        let collapse_to = if self.is_inclusive_ancestor(start.node, end.node) {
            start
        } else {
            let mut reference = start.node;
            while let Some(parent) = self.parent(reference) {
                if self.is_inclusive_ancestor(parent, end.node) {
                    break;
                }
                reference = parent;
            }
            match self.parent(reference) {
                Some(parent) => Boundary::new(parent, self.index(reference) + 1),
                None => start,
            }
        };

        if self.is_text(start.node) {
            let kept = self.text_slice(start.node, 0, start.offset);
            self.set_text(start.node, kept);
        }
        for id in doomed {
            self.detach(id);
        }
        if self.is_text(end.node) {
            let length = self.length(end.node);
            let kept = self.text_slice(end.node, end.offset, length);
            self.set_text(end.node, kept);
        }
        let collapse_to = Boundary::new(
            collapse_to.node,
            collapse_to.offset.min(self.length(collapse_to.node)),
        );
        self.range = Some(LiveRange::collapsed_at(collapse_to));
    }

    /// Split a text node at `offset`, returning the new node holding the tail.
    fn split_text(&mut self, id: NodeId, offset: usize) -> Result<NodeId, SurfaceError> {
        let parent = self.parent(id).ok_or(SurfaceError::Detached)?;
        let length = self.length(id);
        if offset > length {
            return Err(SurfaceError::InvalidBoundary);
        }
        let tail_text = self.text_slice(id, offset, length);
        let head_text = self.text_slice(id, 0, offset);
        self.set_text(id, head_text);
        let tail = self.alloc(NodeData::Text(tail_text));
        let at = self.index(id) + 1;
        self.insert_child(parent, at, tail);

        if let Some(range) = self.range.as_mut() {
            for point in [&mut range.start, &mut range.end] {
                if point.node == id && point.offset > offset {
                    *point = Boundary::new(tail, point.offset - offset);
                } else if point.node == parent && point.offset >= at {
                    point.offset += 1;
                }
            }
        }
        Ok(tail)
    }

    /// Insert nodes at the start of the range, DOM `insertNode` style.
    fn insert_nodes(&mut self, nodes: Vec<MarkupNode>) -> Result<Option<NodeId>, SurfaceError> {
        let range = self.range.ok_or(SurfaceError::NoSelection)?;
        let start = range.start;
        if start.offset > self.length(start.node) {
            return Err(SurfaceError::InvalidBoundary);
        }
        let (parent, mut at) = if self.is_text(start.node) {
            let tail = self.split_text(start.node, start.offset)?;
            let parent = self.parent(tail).ok_or(SurfaceError::Detached)?;
            (parent, self.index(tail))
        } else {
            (start.node, start.offset)
        };
        let insert_from = at;

        let mut first = None;
        let count = nodes.len();
        for node in nodes {
            let id = self.build(node);
            self.insert_child(parent, at, id);
            first.get_or_insert(id);
            at += 1;
        }
        self.mutations += 1;

        if let Some(range) = self.range.as_mut() {
            let was_collapsed = range.is_collapsed();
            for point in [&mut range.start, &mut range.end] {
                if point.node == parent && point.offset > insert_from {
                    point.offset += count;
                }
            }
            if was_collapsed {
                range.end = Boundary::new(parent, insert_from + count);
            }
        }
        Ok(first)
    }

    /// Move `node` out of its parent `enclosing`, splitting `enclosing` into
    /// a leading and a trailing copy. Copies without content are dropped.
    fn lift_out_of_parent(&mut self, node: NodeId) -> Result<(), SurfaceError> {
        let enclosing = self.parent(node).ok_or(SurfaceError::Detached)?;
        if enclosing == self.region {
            return Ok(());
        }
        let outer = self.parent(enclosing).ok_or(SurfaceError::Detached)?;
        let template = self
            .shallow_element(enclosing)
            .ok_or(SurfaceError::Detached)?;

        let siblings = self.children(enclosing).to_vec();
        let split = self.index(node);
        let (before, after) = (&siblings[..split], &siblings[split + 1..]);
        let position = self.index(enclosing);

        let mut replacement = Vec::new();
        for (group, is_node) in [(before, false), (&[node][..], true), (after, false)] {
            if is_node {
                replacement.push(node);
                continue;
            }
            if !self.has_content(group) {
                continue;
            }
            let copy = self.alloc(NodeData::Element(template.shallow_clone()));
            for child in group {
                self.append_child(copy, *child);
            }
            replacement.push(copy);
        }

        self.detach(node);
        self.detach(enclosing);
        for (offset, id) in replacement.into_iter().enumerate() {
            self.insert_child(outer, position + offset, id);
        }
        self.mutations += 1;
        Ok(())
    }

    fn has_content(&self, nodes: &[NodeId]) -> bool {
        nodes.iter().any(|id| match &self.nodes[id.0].data {
            NodeData::Text(data) => !data.is_empty(),
            NodeData::Element(_) => true,
        })
    }
}

impl DocumentSurface for MemorySurface {
    type Node = NodeId;

    fn is_collapsed(&self) -> bool {
        self.range.is_none_or(|range| range.is_collapsed())
    }

    fn anchor_node(&self) -> Option<NodeId> {
        self.range.map(|range| range.start.node)
    }

    fn focus_node(&self) -> Option<NodeId> {
        self.range.map(|range| range.end.node)
    }

    fn parent_element_of(&self, node: &NodeId) -> Option<Element> {
        self.parent(*node).and_then(|parent| self.shallow_element(parent))
    }

    fn selection_in_region(&self) -> bool {
        self.range.is_some_and(|range| {
            self.is_attached(self.region) && self.intersects(self.region, &range)
        })
    }

    fn expand_selection_to_wrapper(&mut self, wrapper: Element) -> Result<NodeId, SurfaceError> {
        let range = self.range.ok_or(SurfaceError::NoSelection)?;
        let enclosing = self.parent(range.start.node);
        let contents = self.clone_range(&range);
        self.delete_range(range);
        let wrapper = Fragment::from_nodes(contents).wrap_in(wrapper);
        let inserted = self
            .insert_nodes(vec![wrapper.into()])?
            .ok_or(SurfaceError::Detached)?;
        if enclosing.is_some() && self.parent(inserted) == enclosing {
            self.lift_out_of_parent(inserted)?;
        }
        self.select_node(inserted)?;
        Ok(inserted)
    }

    fn clone_selection(&self) -> Result<Fragment, SurfaceError> {
        let range = self.range.ok_or(SurfaceError::NoSelection)?;
        Ok(Fragment::from_nodes(self.clone_range(&range)))
    }

    fn delete_selection(&mut self) -> Result<(), SurfaceError> {
        let range = self.range.ok_or(SurfaceError::NoSelection)?;
        self.delete_range(range);
        Ok(())
    }

    fn insert_at_selection(&mut self, fragment: Fragment) -> Result<Option<NodeId>, SurfaceError> {
        self.insert_nodes(fragment.into_children())
    }

    fn computed_style(&self, node: &NodeId, property: &str) -> Option<String> {
        if !self.is_attached(*node) {
            return None;
        }
        let element = self.shallow_element(*node)?;
        element
            .style_property(property)
            .map(str::to_string)
            .or_else(|| self.resolver.resolve(&element, property))
    }

    fn set_inline_style(
        &mut self,
        node: &NodeId,
        property: &str,
        value: &str,
    ) -> Result<(), SurfaceError> {
        self.element_mut(*node)?.set_style_property(property, value);
        self.mutations += 1;
        Ok(())
    }

    fn remove_attribute(&mut self, node: &NodeId, name: &str) -> Result<(), SurfaceError> {
        self.element_mut(*node)?.remove_attribute(name);
        self.mutations += 1;
        Ok(())
    }

    fn add_class(&mut self, node: &NodeId, class: &str) -> Result<(), SurfaceError> {
        self.element_mut(*node)?.add_class(class);
        self.mutations += 1;
        Ok(())
    }

    fn first_in_region(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.region)
            .into_iter()
            .skip(1)
            .find(|id| matches!(&self.nodes[id.0].data, NodeData::Element(el) if el.tag() == tag))
    }

    fn region_text_content(&self) -> String {
        self.text_content(self.region)
    }

    fn clear_region(&mut self) {
        for child in self.children(self.region).to_vec() {
            self.detach(child);
        }
        self.mutations += 1;
        if let Some(range) = self.range {
            if !self.is_attached(range.start.node) || !self.is_attached(range.end.node) {
                self.range = Some(LiveRange::collapsed_at(Boundary::new(self.region, 0)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(html: &str) -> MemorySurface {
        MemorySurface::new(html).unwrap()
    }

    #[test]
    fn select_text_binds_to_the_enclosing_text_node() {
        let mut doc = surface("<p>hello <b>world</b></p>");
        assert!(doc.select_text("world"));
        assert_eq!(doc.anchor_node(), doc.focus_node());
        let parent = doc.parent_element_of(&doc.anchor_node().unwrap()).unwrap();
        assert_eq!(parent.tag(), "b");
        assert_eq!(doc.selected_text(), "world");
    }

    #[test]
    fn clone_across_elements_keeps_partial_ancestors() {
        let mut doc = surface("<p>one <b>two three</b> four</p>");
        assert!(doc.select_text("e two th"));
        let fragment = doc.clone_selection().unwrap();
        assert_eq!(fragment.to_html(), "e <b>two th</b>");
        assert_eq!(doc.mutation_count(), 0);
    }

    #[test]
    fn delete_across_elements_merges_boundaries() {
        let mut doc = surface("<p>one <b>two three</b> four</p>");
        assert!(doc.select_text("two three f"));
        doc.delete_selection().unwrap();
        assert_eq!(doc.region_html(), "<p>one <b></b>our</p>");
        assert!(doc.is_collapsed());
    }

    #[test]
    fn delete_removes_fully_contained_nodes() {
        let mut doc = surface("<p>a<em>b</em>c</p>");
        assert!(doc.select_text("abc"));
        doc.delete_selection().unwrap();
        assert_eq!(doc.region_html(), "<p></p>");
    }

    #[test]
    fn insert_splits_text_and_extends_collapsed_range() {
        let mut doc = surface("<p>hello world</p>");
        doc.place_caret(5);
        let inserted = doc
            .insert_at_selection(Element::new("br").into())
            .unwrap()
            .unwrap();
        assert_eq!(doc.region_html(), "<p>hello<br> world</p>");
        assert_eq!(doc.focus_node(), doc.parent(inserted));
        assert!(!doc.is_collapsed());
    }

    #[test]
    fn expand_lifts_wrapper_out_of_enclosing_element() {
        let mut doc = surface("<p><b>bold text here</b></p>");
        assert!(doc.select_text("text"));
        doc.expand_selection_to_wrapper(Element::new("b").with_class("bold-text"))
            .unwrap();
        assert_eq!(
            doc.region_html(),
            r#"<p><b>bold </b><b class="bold-text">text</b><b> here</b></p>"#
        );
        assert_eq!(
            doc.clone_selection().unwrap().to_html(),
            r#"<b class="bold-text">text</b>"#
        );
    }

    #[test]
    fn expand_over_whole_wrapper_replaces_it() {
        let mut doc = surface("<p>hello <b>world</b></p>");
        assert!(doc.select_text("world"));
        doc.expand_selection_to_wrapper(Element::new("b").with_class("bold-text"))
            .unwrap();
        assert_eq!(doc.region_html(), r#"<p>hello <b class="bold-text">world</b></p>"#);
    }

    #[test]
    fn region_intersection_ignores_outside_selections() {
        let mut doc = surface("<p>inside</p>");
        doc.append_outside("<p>outside</p>").unwrap();
        assert!(doc.select_text("outside"));
        assert!(!doc.selection_in_region());
        assert!(doc.select_text("inside"));
        assert!(doc.selection_in_region());
        assert!(doc.select_text("deout"));
        assert!(doc.selection_in_region());
    }

    #[test]
    fn clear_region_resets_the_caret() {
        let mut doc = surface("<h1><b>x</b></h1>");
        doc.place_caret(1);
        doc.clear_region();
        assert_eq!(doc.region_html(), "");
        assert_eq!(doc.anchor_node(), Some(doc.region()));
    }

    #[test]
    fn computed_style_prefers_inline_values() {
        let doc = surface(r#"<span class="header1-text" style="font-size: 40px">x</span>"#)
            .with_resolver(
                FixtureStyles::new()
                    .class("header1-text", "font-size", "32px")
                    .class("header1-text", "font-weight", "700"),
            );
        let span = doc.first_in_region("span").unwrap();
        assert_eq!(doc.computed_style(&span, "font-size").as_deref(), Some("40px"));
        assert_eq!(doc.computed_style(&span, "font-weight").as_deref(), Some("700"));
    }
}
