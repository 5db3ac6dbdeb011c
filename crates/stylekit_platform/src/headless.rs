//! In-memory platform
//!
//! Used by tests and by the replay CLI. Storage and clipboard can be switched
//! into a failing mode to exercise the degraded paths.

use rustc_hash::FxHashMap;
use stylekit_core::NodeId;

use crate::dom::Document;
use crate::error::{PlatformError, Result};
use crate::host::{Clipboard, Platform, ScrollBlock, ScrollOptions, Storage};

/// `localStorage` stand-in
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: FxHashMap<String, String>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail, as in a privacy-restricted browser
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Read without going through the failure switch
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            return Err(PlatformError::StorageUnavailable(
                "storage disabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.check()?;
        self.items.remove(key);
        Ok(())
    }
}

/// Clipboard stand-in that remembers the last successful write
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    denied: bool,
    writes: usize,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn set_denied(&mut self, denied: bool) {
        self.denied = denied;
    }

    /// Number of write attempts, successful or not
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.writes += 1;
        if self.denied {
            return Err(PlatformError::Clipboard("permission denied".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Platform implementation holding all state in memory
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    pub storage: MemoryStorage,
    pub clipboard: MemoryClipboard,
    prefers_dark: bool,
    hash: String,
    history: Vec<String>,
    scroll_requests: Vec<(NodeId, ScrollOptions)>,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefers_dark(mut self, dark: bool) -> Self {
        self.prefers_dark = dark;
        self
    }

    /// Start with a URL fragment already present (deep link)
    pub fn with_hash(mut self, hash: &str) -> Self {
        self.hash = hash.trim_start_matches('#').to_string();
        self
    }

    pub fn with_storage_item(mut self, key: &str, value: &str) -> Self {
        self.storage.items.insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_prefers_dark(&mut self, dark: bool) {
        self.prefers_dark = dark;
    }

    /// Every fragment written through [`Platform::set_location_hash`]
    pub fn hash_history(&self) -> &[String] {
        &self.history
    }

    /// Every scroll-into-view request, oldest first
    pub fn scroll_requests(&self) -> &[(NodeId, ScrollOptions)] {
        &self.scroll_requests
    }

    /// Simulate the user editing the URL or pressing back/forward
    pub fn navigate_hash(&mut self, hash: &str) {
        self.hash = hash.trim_start_matches('#').to_string();
    }
}

impl Platform for HeadlessPlatform {
    fn storage(&mut self) -> &mut dyn Storage {
        &mut self.storage
    }

    fn clipboard(&mut self) -> &mut dyn Clipboard {
        &mut self.clipboard
    }

    fn prefers_dark_scheme(&self) -> bool {
        self.prefers_dark
    }

    fn location_hash(&self) -> String {
        self.hash.clone()
    }

    fn set_location_hash(&mut self, hash: &str) {
        let hash = hash.trim_start_matches('#').to_string();
        self.history.push(hash.clone());
        self.hash = hash;
    }

    fn scroll_into_view(&mut self, document: &mut Document, node: NodeId, options: ScrollOptions) {
        self.scroll_requests.push((node, options));

        let top = document.layout(node).page_top;
        let height = document.offset(node).height;
        let (_, viewport_height) = document.viewport();
        let current = document.scroll_y();

        let target = match options.block {
            ScrollBlock::Start => top,
            ScrollBlock::Center => top - (viewport_height - height) / 2.0,
            ScrollBlock::End => top + height - viewport_height,
            ScrollBlock::Nearest => {
                if top < current {
                    top
                } else if top + height > current + viewport_height {
                    top + height - viewport_height
                } else {
                    current
                }
            }
        };
        document.set_scroll_y(target);
    }
}
