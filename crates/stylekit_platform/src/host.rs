//! Platform services consumed by widgets
//!
//! Everything here is provided by the host environment. Widgets treat every
//! failure as a degradation, never as a fatal error.

use stylekit_core::NodeId;

use crate::dom::Document;
use crate::error::Result;

/// Key/value persistence (`localStorage`)
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// System clipboard
pub trait Clipboard {
    /// Place `text` on the clipboard, resolving once the write completed
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Scroll animation behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Instant scroll (no animation)
    #[default]
    Auto,
    /// Smooth animated scroll
    Smooth,
}

/// Vertical scroll alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBlock {
    /// Align to top of viewport
    Start,
    /// Align to center of viewport
    Center,
    /// Align to bottom of viewport
    End,
    /// Scroll minimum distance to make visible
    #[default]
    Nearest,
}

/// Options for scroll-into-view requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl ScrollOptions {
    /// `{ behavior: 'smooth', block: 'start' }`
    pub const fn smooth_start() -> Self {
        Self {
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Start,
        }
    }
}

/// Host services beyond the document tree
pub trait Platform {
    fn storage(&mut self) -> &mut dyn Storage;

    fn clipboard(&mut self) -> &mut dyn Clipboard;

    /// Current OS dark-mode preference (`prefers-color-scheme: dark`)
    fn prefers_dark_scheme(&self) -> bool;

    /// URL fragment without the leading `#`
    fn location_hash(&self) -> String;

    /// Set the URL fragment, creating a history entry
    fn set_location_hash(&mut self, hash: &str);

    /// Scroll the viewport so `node` is visible
    fn scroll_into_view(&mut self, document: &mut Document, node: NodeId, options: ScrollOptions);
}
