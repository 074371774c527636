//! Copy, cut and input handling against the in-memory surface.

use richbar_core::{
    DocumentSurface, FixtureStyles, HTML_MIME, InputType, MarkupVariant, MemoryClipboard,
    MemorySurface, StyleRegistry, handle_copy, handle_cut, handle_input,
};
use rstest::rstest;

fn doc(html: &str) -> MemorySurface {
    MemorySurface::new(html).expect("fixture markup parses")
}

#[rstest]
#[case::semantic(MarkupVariant::Semantic)]
#[case::classed(MarkupVariant::Classed)]
fn collapsed_selection_writes_nothing(#[case] variant: MarkupVariant) {
    let registry = StyleRegistry::for_variant(variant);
    let mut surface = doc("<p>hello <b>world</b></p>");
    assert!(surface.place_caret(3));
    let clipboard = MemoryClipboard::new();

    let copy = handle_copy(&mut surface, &registry, &clipboard);
    let cut = handle_cut(&mut surface, &registry, &clipboard);

    assert!(copy.prevent_default && cut.prevent_default);
    assert!(!copy.written && !cut.written);
    assert!(clipboard.writes().is_empty());
    assert_eq!(surface.mutation_count(), 0);
}

#[test]
fn cut_exports_formatting_and_removes_text() {
    let mut surface = doc("<p>hello <b>world</b> again</p>");
    assert!(surface.select_text("lo world ag"));
    let clipboard = MemoryClipboard::new();

    let outcome = handle_cut(&mut surface, &StyleRegistry::semantic(), &clipboard);

    assert!(outcome.written);
    insta::assert_snapshot!(clipboard.last(HTML_MIME).unwrap_or_default(), @"lo <b>world</b> ag");
    assert_eq!(surface.region_html(), "<p>helain</p>");
    assert!(!surface.region_text_content().contains("world"));
}

#[test]
fn cut_inside_a_wrapper_exports_the_whole_wrapper() {
    let mut surface = doc("<p>hello <b>world</b></p>")
        .with_resolver(FixtureStyles::new().tag("b", "font-size", "16px"));
    assert!(surface.select_text("world"));
    let clipboard = MemoryClipboard::new();

    handle_cut(&mut surface, &StyleRegistry::semantic(), &clipboard);

    insta::assert_snapshot!(
        clipboard.last(HTML_MIME).unwrap_or_default(),
        @r#"<b class="bold-text" style="font-size: 16px;">world</b>"#
    );
    assert_eq!(surface.region_html(), "<p>hello </p>");
}

#[test]
fn classed_copy_keeps_marker_classes() {
    let mut surface = doc(
        r#"<p>a <span style="display: inline; font-size: 32px;" class="header1-text">title</span> b</p>"#,
    );
    assert!(surface.select_text("a title b"));
    let clipboard = MemoryClipboard::new();

    handle_copy(&mut surface, &StyleRegistry::classed(), &clipboard);

    insta::assert_snapshot!(
        clipboard.last(HTML_MIME).unwrap_or_default(),
        @r#"a <span style="display: inline; font-size: 32px;" class="header1-text">title</span> b"#
    );
    assert_eq!(clipboard.writes().len(), 1);
    assert_eq!(surface.mutation_count(), 0);
}

#[test]
fn backspacing_the_last_character_empties_the_region() {
    let mut surface = doc(r#"<p><b class="bold-text">x</b></p>"#);
    assert!(surface.select_text("x"));
    surface.delete_selection().expect("selection is live");
    assert_eq!(surface.region_html(), r#"<p><b class="bold-text"></b></p>"#);

    assert!(handle_input(&mut surface, &InputType::DeleteContentBackward));

    assert_eq!(surface.region_html(), "");
    assert_eq!(surface.region_text_content(), "");
}
