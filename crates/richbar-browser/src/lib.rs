//! Browser DOM layer for the richbar formatting toolbar.
//!
//! Implements the core `DocumentSurface` over the Selection and Range APIs
//! and wires toolbar and region events. Assumes a `wasm32-unknown-unknown`
//! target environment.
//!
//! # Architecture
//!
//! - `surface`: `BrowserSurface`, the live-page `DocumentSurface`
//! - `dom`: live node <-> detached markup conversion
//! - `clipboard`: DataTransfer-backed `ClipboardSink`
//! - `events`: input type parsing and toolbar button markers
//! - `toolbar`: gloo-events listener wiring
//!
//! This crate re-exports `richbar-core` for convenience.

pub use richbar_core;
pub use richbar_core::*;

pub mod clipboard;
pub mod dom;
pub mod events;
pub mod surface;
pub mod toolbar;

pub use clipboard::BrowserClipboard;
pub use events::{button_marker, parse_browser_input_type};
pub use surface::BrowserSurface;
pub use toolbar::{MountError, Toolbar};
