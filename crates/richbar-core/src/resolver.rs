//! Computed style resolution for surfaces without a rendering engine.

use smol_str::SmolStr;

use crate::markup::Element;

/// Resolves the rendered value of a CSS property for an element.
///
/// Browsers answer this with `getComputedStyle`; the memory surface asks an
/// injected resolver instead so tests get deterministic values.
pub trait StyleResolver {
    fn resolve(&self, element: &Element, property: &str) -> Option<String>;
}

impl<F> StyleResolver for F
where
    F: Fn(&Element, &str) -> Option<String>,
{
    fn resolve(&self, element: &Element, property: &str) -> Option<String> {
        self(element, property)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Tag(SmolStr),
    Class(SmolStr),
}

/// A tiny fixed stylesheet: property values keyed by tag or class.
///
/// Class rules take precedence over tag rules. Within the same kind the rule
/// added last wins.
#[derive(Debug, Clone, Default)]
pub struct FixtureStyles {
    rules: Vec<(Selector, SmolStr, String)>,
}

impl FixtureStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: &str, property: &str, value: impl Into<String>) -> Self {
        self.rules
            .push((Selector::Tag(tag.into()), property.into(), value.into()));
        self
    }

    pub fn class(mut self, class: &str, property: &str, value: impl Into<String>) -> Self {
        self.rules
            .push((Selector::Class(class.into()), property.into(), value.into()));
        self
    }

    fn lookup(&self, property: &str, matches: impl Fn(&Selector) -> bool) -> Option<&str> {
        self.rules
            .iter()
            .rev()
            .find(|(selector, name, _)| name == property && matches(selector))
            .map(|(_, _, value)| value.as_str())
    }
}

impl StyleResolver for FixtureStyles {
    fn resolve(&self, element: &Element, property: &str) -> Option<String> {
        self.lookup(property, |selector| match selector {
            Selector::Class(class) => element.has_class(class),
            Selector::Tag(_) => false,
        })
        .or_else(|| {
            self.lookup(property, |selector| match selector {
                Selector::Tag(tag) => tag == element.tag(),
                Selector::Class(_) => false,
            })
        })
        .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_rules_beat_tag_rules() {
        let styles = FixtureStyles::new()
            .class("header1-text", "font-size", "32px")
            .tag("span", "font-size", "16px");
        let heading = Element::new("span").with_class("header1-text");
        assert_eq!(styles.resolve(&heading, "font-size").as_deref(), Some("32px"));
        assert_eq!(
            styles.resolve(&Element::new("span"), "font-size").as_deref(),
            Some("16px")
        );
        assert_eq!(styles.resolve(&heading, "line-height"), None);
    }

    #[test]
    fn later_rules_win() {
        let styles = FixtureStyles::new()
            .tag("b", "font-weight", "600")
            .tag("b", "font-weight", "700");
        assert_eq!(
            styles.resolve(&Element::new("b"), "font-weight").as_deref(),
            Some("700")
        );
    }

    #[test]
    fn closures_are_resolvers() {
        let resolver = |element: &Element, _: &str| Some(element.tag().to_uppercase());
        assert_eq!(resolver.resolve(&Element::new("em"), "x").as_deref(), Some("EM"));
    }
}
