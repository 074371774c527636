//! WASM browser tests for richbar-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use richbar_browser::{
    BrowserClipboard, BrowserSurface, DocumentSurface, HTML_MIME, InputType, MountError, StyleId,
    StyleRegistry, ToggleOutcome, Toolbar, ToolbarConfig, button_marker, handle_cut,
    handle_input, parse_browser_input_type, toggle_style,
};

/// Install a fresh editable region holding `html` and return it.
fn region_with(html: &str) -> web_sys::Element {
    let document = gloo_utils::document();
    let body = gloo_utils::body();
    body.set_inner_html("");
    let region = document.create_element("div").unwrap();
    region.set_class_name("edit-area");
    region.set_attribute("contenteditable", "true").unwrap();
    region.set_inner_html(html);
    body.append_child(&region).unwrap();
    region
}

/// Replace the page selection with `start..end`.
fn select_between(start: (&web_sys::Node, u32), end: (&web_sys::Node, u32)) {
    let range = gloo_utils::document().create_range().unwrap();
    range.set_start(start.0, start.1).unwrap();
    range.set_end(end.0, end.1).unwrap();
    let selection = gloo_utils::window().get_selection().unwrap().unwrap();
    selection.remove_all_ranges().unwrap();
    selection.add_range(&range).unwrap();
}

/// First text node under the first `selector` match.
fn text_of(region: &web_sys::Element, selector: &str) -> web_sys::Node {
    region
        .query_selector(selector)
        .unwrap()
        .unwrap()
        .first_child()
        .unwrap()
}

/// Select the whole text of the first text node under the first `selector`.
fn select_text_of(region: &web_sys::Element, selector: &str) {
    let text = text_of(region, selector);
    let len = text.text_content().unwrap().chars().count() as u32;
    select_between((&text, 0), (&text, len));
}

// === InputType parsing tests ===

#[wasm_bindgen_test]
fn test_parse_delete_backward() {
    assert_eq!(
        parse_browser_input_type("deleteContentBackward"),
        InputType::DeleteContentBackward
    );
}

#[wasm_bindgen_test]
fn test_parse_other_types_are_kept_raw() {
    assert_eq!(
        parse_browser_input_type("insertText"),
        InputType::Unknown("insertText".into())
    );
}

#[wasm_bindgen_test]
fn test_parse_unknown() {
    match parse_browser_input_type("unknownType") {
        InputType::Unknown(s) => assert_eq!(s, "unknownType"),
        _ => panic!("Expected Unknown variant"),
    }
}

// === Button markers ===

#[wasm_bindgen_test]
fn test_button_markers_per_variant() {
    let button = gloo_utils::document().create_element("button").unwrap();
    button.set_attribute("data-tag", "em").unwrap();
    button.set_class_name("tool bold-button");
    assert_eq!(
        button_marker(&button, &StyleRegistry::semantic()).as_deref(),
        Some("em")
    );
    assert_eq!(
        button_marker(&button, &StyleRegistry::classed()).as_deref(),
        Some("bold-button")
    );
}

// === Surface tests ===

#[wasm_bindgen_test]
fn test_toggle_bold_off_whole_word() {
    let region = region_with("<p>hello <b>world</b></p>");
    select_text_of(&region, "b");
    let mut surface = BrowserSurface::new(region.clone()).unwrap();

    let outcome = toggle_style(&mut surface, &StyleRegistry::semantic(), StyleId::Bold);

    assert_eq!(outcome, ToggleOutcome::Unwrapped(StyleId::Bold));
    assert_eq!(region.text_content().unwrap(), "hello world");
    assert!(region.query_selector("b").unwrap().is_none());
}

#[wasm_bindgen_test]
fn test_toggle_bold_off_middle_word_splits_run() {
    let region = region_with("<p><b>bold text here</b></p>");
    let text = text_of(&region, "b");
    select_between((&text, 5), (&text, 9));
    let mut surface = BrowserSurface::new(region.clone()).unwrap();

    let outcome = toggle_style(&mut surface, &StyleRegistry::semantic(), StyleId::Bold);

    assert_eq!(outcome, ToggleOutcome::Unwrapped(StyleId::Bold));
    assert_eq!(region.inner_html(), "<p><b>bold </b>text<b> here</b></p>");
}

#[wasm_bindgen_test]
fn test_toggle_italic_on() {
    let region = region_with("<p><span>hello</span> world</p>");
    select_text_of(&region, "span");
    let mut surface = BrowserSurface::new(region.clone()).unwrap();

    let outcome = toggle_style(&mut surface, &StyleRegistry::semantic(), StyleId::Italic);

    assert_eq!(outcome, ToggleOutcome::Wrapped(StyleId::Italic));
    let em = region.query_selector("em.italic-text").unwrap().unwrap();
    assert_eq!(em.text_content().unwrap(), "hello");
}

#[wasm_bindgen_test]
fn test_classed_heading_is_normalized() {
    let region = region_with("<p><span>title</span></p>");
    select_text_of(&region, "span");
    let mut surface = BrowserSurface::new(region.clone()).unwrap();

    toggle_style(&mut surface, &StyleRegistry::classed(), StyleId::Heading1);

    let heading = region
        .query_selector("span.header1-text")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    assert_eq!(heading.style().get_property_value("display").unwrap(), "inline");
}

#[wasm_bindgen_test]
fn test_backspace_clears_empty_region() {
    let region = region_with("<p><b></b></p>");
    let mut surface = BrowserSurface::new(region.clone()).unwrap();

    assert!(handle_input(&mut surface, &InputType::DeleteContentBackward));
    assert_eq!(region.inner_html(), "");
    assert_eq!(surface.region_text_content(), "");
}

// === Clipboard ===

#[wasm_bindgen_test]
fn test_cut_writes_html_and_removes_selection() {
    let region = region_with("<p>hello <b>world</b> again</p>");
    let paragraph = region.query_selector("p").unwrap().unwrap();
    let head = paragraph.first_child().unwrap();
    let tail = paragraph.last_child().unwrap();
    select_between((&head, 3), (&tail, 3));

    let data = web_sys::DataTransfer::new().unwrap();
    let init = web_sys::ClipboardEventInit::new();
    init.set_clipboard_data(Some(&data));
    let event = web_sys::ClipboardEvent::new_with_event_init_dict("cut", &init).unwrap();
    let clipboard = BrowserClipboard::from_event(&event);
    let mut surface = BrowserSurface::new(region.clone()).unwrap();

    let outcome = handle_cut(&mut surface, &StyleRegistry::classed(), &clipboard);

    assert!(outcome.written);
    assert!(outcome.prevent_default);
    assert_eq!(data.get_data(HTML_MIME).unwrap(), "lo <b>world</b> ag");
    assert_eq!(region.text_content().unwrap(), "helain");
    assert!(region.query_selector("b").unwrap().is_none());
}

// === Mounting ===

#[wasm_bindgen_test]
fn test_mount_requires_toolbar() {
    region_with("<p>x</p>");
    let err = Toolbar::mount_in_page(ToolbarConfig::default()).err();
    assert_eq!(err, Some(MountError::ToolbarNotFound(".toolkit".into())));
}
