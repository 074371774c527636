//! Detached markup model.
//!
//! Selection contents leave the live document as a [`Fragment`]: an owned
//! tree of [`MarkupNode`]s that can be inspected, rewritten and serialised
//! without touching the page. Surfaces convert their native nodes to and from
//! this model at the boundary.

use std::fmt::Write as _;

use smol_str::SmolStr;

/// Elements serialised without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// A node in a detached tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Element(Element),
    Text(String),
}

impl MarkupNode {
    pub fn text(data: impl Into<String>) -> Self {
        MarkupNode::Text(data.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            MarkupNode::Element(element) => Some(element),
            MarkupNode::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            MarkupNode::Text(data) => out.push_str(data),
            MarkupNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            MarkupNode::Text(data) => out.push_str(&html_escape::encode_text(data)),
            MarkupNode::Element(element) => element.write_html(out),
        }
    }
}

impl From<Element> for MarkupNode {
    fn from(element: Element) -> Self {
        MarkupNode::Element(element)
    }
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: SmolStr,
    attributes: Vec<(SmolStr, String)>,
    children: Vec<MarkupNode>,
}

impl Element {
    /// Create an empty element. Tag names are stored lowercase.
    pub fn new(tag: impl Into<SmolStr>) -> Self {
        let tag: SmolStr = tag.into();
        let tag = if tag.chars().any(|c| c.is_ascii_uppercase()) {
            SmolStr::new(tag.to_ascii_lowercase())
        } else {
            tag
        };
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => self
                .attributes
                .push((SmolStr::new(name.to_ascii_lowercase()), value)),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes
            .retain(|(candidate, _)| !candidate.eq_ignore_ascii_case(name));
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|candidate| candidate == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.attribute("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class)
            }
            _ => class.to_string(),
        };
        self.set_attribute("class", joined);
    }

    /// Value of one property in the inline `style` attribute.
    pub fn style_property(&self, property: &str) -> Option<&str> {
        parse_declarations(self.attribute("style").unwrap_or_default())
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value)
    }

    /// Set one property of the inline `style` attribute, keeping the others.
    pub fn set_style_property(&mut self, property: &str, value: &str) {
        let mut declarations: Vec<(String, String)> =
            parse_declarations(self.attribute("style").unwrap_or_default())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
        match declarations
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => declarations.push((property.to_ascii_lowercase(), value.to_string())),
        }
        self.set_attribute("style", serialize_declarations(&declarations));
    }

    pub fn children(&self) -> &[MarkupNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<MarkupNode> {
        &mut self.children
    }

    pub fn push(&mut self, child: impl Into<MarkupNode>) {
        self.children.push(child.into());
    }

    /// Copy of this element without its children.
    pub fn shallow_clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            attributes: self.attributes.clone(),
            children: Vec::new(),
        }
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(MarkupNode::text_content).collect()
    }

    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_html(&mut out);
        }
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            let _ = write!(
                out,
                " {}=\"{}\"",
                name,
                html_escape::encode_double_quoted_attribute(value)
            );
        }
        out.push('>');
        if is_void_element(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn parse_declarations(style: &str) -> impl Iterator<Item = (&str, &str)> {
    style.split(';').filter_map(|declaration| {
        let (name, value) = declaration.split_once(':')?;
        let name = name.trim();
        (!name.is_empty()).then(|| (name, value.trim()))
    })
}

fn serialize_declarations(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// An ordered list of detached top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    children: Vec<MarkupNode>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(children: Vec<MarkupNode>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[MarkupNode] {
        &self.children
    }

    pub fn into_children(self) -> Vec<MarkupNode> {
        self.children
    }

    pub fn push(&mut self, child: impl Into<MarkupNode>) {
        self.children.push(child.into());
    }

    pub fn first_child(&self) -> Option<&MarkupNode> {
        self.children.first()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// First element in tree order satisfying `predicate`.
    pub fn find_first(&self, predicate: impl Fn(&Element) -> bool) -> Option<&Element> {
        fn walk<'a>(
            nodes: &'a [MarkupNode],
            predicate: &dyn Fn(&Element) -> bool,
        ) -> Option<&'a Element> {
            nodes.iter().find_map(|node| {
                let element = node.as_element()?;
                if predicate(element) {
                    Some(element)
                } else {
                    walk(&element.children, predicate)
                }
            })
        }
        walk(&self.children, &predicate)
    }

    pub fn contains(&self, predicate: impl Fn(&Element) -> bool) -> bool {
        self.find_first(predicate).is_some()
    }

    /// Replace the first element (tree order) satisfying `predicate` with its
    /// children. Returns false when nothing matched.
    pub fn unwrap_first(&mut self, predicate: impl Fn(&Element) -> bool) -> bool {
        fn walk(nodes: &mut Vec<MarkupNode>, predicate: &dyn Fn(&Element) -> bool) -> bool {
            for index in 0..nodes.len() {
                let MarkupNode::Element(element) = &mut nodes[index] else {
                    continue;
                };
                if predicate(element) {
                    let promoted = std::mem::take(&mut element.children);
                    nodes.splice(index..=index, promoted).for_each(drop);
                    return true;
                }
                if walk(&mut element.children, predicate) {
                    return true;
                }
            }
            false
        }
        walk(&mut self.children, &predicate)
    }

    /// Visit every element in tree order.
    pub fn for_each_element_mut(&mut self, mut visit: impl FnMut(&mut Element)) {
        fn walk(nodes: &mut [MarkupNode], visit: &mut dyn FnMut(&mut Element)) {
            for node in nodes {
                if let MarkupNode::Element(element) = node {
                    visit(element);
                    walk(&mut element.children, visit);
                }
            }
        }
        walk(&mut self.children, &mut visit);
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(MarkupNode::text_content).collect()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_html(&mut out);
        }
        out
    }

    /// Move all top-level nodes into `element`, returning it.
    pub fn wrap_in(self, mut element: Element) -> Element {
        element.children.extend(self.children);
        element
    }
}

impl From<Element> for Fragment {
    fn from(element: Element) -> Self {
        Self::from_nodes(vec![MarkupNode::Element(element)])
    }
}

/// Failure to parse fixture markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected end of markup inside <{0}>")]
    Unclosed(SmolStr),
    #[error("closing tag </{found}> does not match <{expected}>")]
    MismatchedClose { expected: SmolStr, found: SmolStr },
    #[error("closing tag </{0}> without an open element")]
    StrayClose(SmolStr),
    #[error("malformed tag at byte {0}")]
    Malformed(usize),
}

/// Parse a well-formed HTML fragment.
///
/// Handles elements, quoted and bare attributes, void and self-closing tags,
/// comments and character references. Meant for fixtures and seeding a
/// memory surface, not for arbitrary web content.
pub fn parse_fragment(source: &str) -> Result<Fragment, ParseError> {
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Vec<MarkupNode> = Vec::new();
    let mut pos = 0;

    fn push_node(stack: &mut [Element], root: &mut Vec<MarkupNode>, node: MarkupNode) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => root.push(node),
        }
    }

    while pos < source.len() {
        let rest = &source[pos..];
        if let Some(comment) = rest.strip_prefix("<!--") {
            let end = comment.find("-->").ok_or(ParseError::Malformed(pos))?;
            pos += 4 + end + 3;
        } else if let Some(close) = rest.strip_prefix("</") {
            let end = close.find('>').ok_or(ParseError::Malformed(pos))?;
            let found = SmolStr::new(close[..end].trim().to_ascii_lowercase());
            let element = stack
                .pop()
                .ok_or_else(|| ParseError::StrayClose(found.clone()))?;
            if element.tag != found {
                return Err(ParseError::MismatchedClose {
                    expected: element.tag,
                    found,
                });
            }
            push_node(&mut stack, &mut root, MarkupNode::Element(element));
            pos += 2 + end + 1;
        } else if rest.starts_with('<') {
            let (element, self_closing, consumed) = parse_open_tag(rest, pos)?;
            pos += consumed;
            if self_closing || is_void_element(&element.tag) {
                push_node(&mut stack, &mut root, MarkupNode::Element(element));
            } else {
                stack.push(element);
            }
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            let text = html_escape::decode_html_entities(&rest[..end]).into_owned();
            push_node(&mut stack, &mut root, MarkupNode::Text(text));
            pos += end;
        }
    }

    match stack.pop() {
        Some(open) => Err(ParseError::Unclosed(open.tag)),
        None => Ok(Fragment::from_nodes(root)),
    }
}

/// Parse `<tag attr="v" ...>` at the start of `input`.
///
/// Returns the element, whether it was self-closing, and the bytes consumed.
fn parse_open_tag(input: &str, offset: usize) -> Result<(Element, bool, usize), ParseError> {
    let malformed = || ParseError::Malformed(offset);
    let bytes = input.as_bytes();
    let mut i = 1;

    let name_end = input[i..]
        .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
        .map(|n| n + i)
        .ok_or_else(malformed)?;
    if name_end == i {
        return Err(malformed());
    }
    let mut element = Element::new(&input[i..name_end]);
    i = name_end;

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match bytes.get(i) {
            None => return Err(malformed()),
            Some(b'>') => return Ok((element, false, i + 1)),
            Some(b'/') if bytes.get(i + 1) == Some(&b'>') => return Ok((element, true, i + 2)),
            Some(_) => {}
        }

        let attr_end = input[i..]
            .find(|c: char| c.is_ascii_whitespace() || c == '=' || c == '>' || c == '/')
            .map(|n| n + i)
            .ok_or_else(malformed)?;
        if attr_end == i {
            return Err(malformed());
        }
        let name = &input[i..attr_end];
        i = attr_end;

        if bytes.get(i) != Some(&b'=') {
            element.set_attribute(name, "");
            continue;
        }
        i += 1;
        let value = match bytes.get(i) {
            Some(&quote @ (b'"' | b'\'')) => {
                let close = input[i + 1..]
                    .find(quote as char)
                    .map(|n| n + i + 1)
                    .ok_or_else(malformed)?;
                let value = &input[i + 1..close];
                i = close + 1;
                value
            }
            Some(_) => {
                let end = input[i..]
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .map(|n| n + i)
                    .ok_or_else(malformed)?;
                let value = &input[i..end];
                i = end;
                value
            }
            None => return Err(malformed()),
        };
        element.set_attribute(name, html_escape::decode_html_entities(value).into_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_serialise_nested_markup() {
        let source = r#"<p>hello <b class="bold-text">world</b></p>"#;
        let fragment = parse_fragment(source).unwrap();
        assert_eq!(fragment.to_html(), source);
        assert_eq!(fragment.text_content(), "hello world");
    }

    #[test]
    fn parse_handles_void_self_closing_and_comments() {
        let fragment = parse_fragment("a<br>b<img src='x.png'/><!-- note -->c").unwrap();
        assert_eq!(fragment.to_html(), r#"a<br>b<img src="x.png">c"#);
    }

    #[test]
    fn parse_decodes_entities_and_serialise_escapes_them() {
        let fragment = parse_fragment("<p title=\"a &amp; b\">1 &lt; 2</p>").unwrap();
        let p = fragment.first_child().and_then(MarkupNode::as_element).unwrap();
        assert_eq!(p.attribute("title"), Some("a & b"));
        assert_eq!(p.text_content(), "1 < 2");
        assert_eq!(fragment.to_html(), "<p title=\"a &amp; b\">1 &lt; 2</p>");
    }

    #[test]
    fn parse_rejects_mismatched_close() {
        assert_eq!(
            parse_fragment("<b>x</i>"),
            Err(ParseError::MismatchedClose {
                expected: "b".into(),
                found: "i".into()
            })
        );
        assert_eq!(parse_fragment("<b>x"), Err(ParseError::Unclosed("b".into())));
        assert_eq!(parse_fragment("x</b>"), Err(ParseError::StrayClose("b".into())));
    }

    #[test]
    fn unwrap_first_promotes_children_in_place() {
        let mut fragment = parse_fragment("a<b>b<em>c</em></b>d<b>e</b>").unwrap();
        assert!(fragment.unwrap_first(|el| el.tag() == "b"));
        assert_eq!(fragment.to_html(), "ab<em>c</em>d<b>e</b>");
        assert!(!fragment.unwrap_first(|el| el.tag() == "h1"));
    }

    #[test]
    fn find_first_searches_depth_first() {
        let fragment = parse_fragment("<p><b id=\"inner\">x</b></p><b id=\"outer\">y</b>").unwrap();
        let found = fragment.find_first(|el| el.tag() == "b").unwrap();
        assert_eq!(found.attribute("id"), Some("inner"));
    }

    #[test]
    fn style_properties_are_merged() {
        let mut element = Element::new("span").with_attribute("style", "color: red");
        element.set_style_property("font-size", "12px");
        element.set_style_property("color", "blue");
        assert_eq!(element.attribute("style"), Some("color: blue; font-size: 12px;"));
        assert_eq!(element.style_property("FONT-SIZE"), Some("12px"));
    }

    #[test]
    fn classes_are_not_duplicated() {
        let mut element = Element::new("B").with_class("bold-text");
        element.add_class("bold-text");
        element.add_class("extra");
        assert_eq!(element.tag(), "b");
        assert_eq!(element.attribute("class"), Some("bold-text extra"));
    }
}
