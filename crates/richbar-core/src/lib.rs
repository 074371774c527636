//! richbar-core: formatting toolbar logic without browser dependencies.
//!
//! This crate provides:
//! - `StyleRegistry` - the four toolbar styles under either markup variant
//! - `DocumentSurface` trait - the live document operations the toolbar needs
//! - `MemorySurface` - arena DOM with browser range semantics
//! - Toggling, clipboard serialisation and input clean-up, all generic over
//!   `DocumentSurface`

pub mod clipboard;
pub mod config;
pub mod error;
pub mod input;
pub mod inspect;
pub mod markup;
pub mod memory;
pub mod normalize;
pub mod resolver;
pub mod style;
pub mod surface;
pub mod toggle;

pub use clipboard::{
    ClipboardOutcome, MemoryClipboard, handle_copy, handle_cut, serialize_selection_for_clipboard,
};
pub use config::ToolbarConfig;
pub use error::SurfaceError;
pub use input::{InputType, handle_input};
pub use inspect::{derive_selection_fragment, enclosing_style};
pub use markup::{Element, Fragment, MarkupNode, ParseError, parse_fragment};
pub use memory::{MemorySurface, NodeId};
pub use normalize::update_element_styles;
pub use resolver::{FixtureStyles, StyleResolver};
pub use smol_str::SmolStr;
pub use style::{MarkupVariant, StyleDescriptor, StyleId, StyleRegistry};
pub use surface::{ClipboardSink, DocumentSurface, HTML_MIME};
pub use toggle::{SkipReason, ToggleOutcome, toggle_for_button, toggle_style};
