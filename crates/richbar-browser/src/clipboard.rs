//! Browser clipboard sink.
//!
//! Writes go to the `DataTransfer` of the clipboard event being handled, so
//! the payload lands synchronously before the event returns.

use richbar_core::ClipboardSink;

/// Clipboard context wrapping a ClipboardEvent's DataTransfer.
pub struct BrowserClipboard {
    data_transfer: Option<web_sys::DataTransfer>,
}

impl BrowserClipboard {
    /// Create from a ClipboardEvent. Call this in a copy or cut handler.
    pub fn from_event(evt: &web_sys::ClipboardEvent) -> Self {
        Self {
            data_transfer: evt.clipboard_data(),
        }
    }
}

impl ClipboardSink for BrowserClipboard {
    fn write(&self, mime: &str, data: &str) {
        let Some(dt) = &self.data_transfer else {
            tracing::debug!(target: "richbar::clipboard", "no DataTransfer, dropping write");
            return;
        };
        if let Err(e) = dt.set_data(mime, data) {
            tracing::warn!(target: "richbar::clipboard", "clipboard write failed: {:?}", e);
        }
    }
}
