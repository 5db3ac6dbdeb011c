//! stylekit Platform Layer
//!
//! The page markup, the browser's layout engine and its storage/clipboard
//! services are external to the widgets. This crate models them:
//!
//! - [`Document`]: the element tree widgets query and mutate (classes,
//!   attributes, inline style, text) plus the geometry the host reports
//! - [`Platform`]: storage, clipboard, color-scheme preference, URL hash and
//!   scrolling services
//! - [`HeadlessPlatform`]: an in-memory platform for tests and replay
//! - [`PageSpec`]: a TOML page description that builds a [`Document`]

pub mod dom;
pub mod error;
pub mod headless;
pub mod host;
pub mod page;
pub mod selector;

pub use dom::{Document, Layout};
pub use error::{PlatformError, Result};
pub use headless::{HeadlessPlatform, MemoryClipboard, MemoryStorage};
pub use host::{Clipboard, Platform, ScrollBehavior, ScrollBlock, ScrollOptions, Storage};
pub use page::{NodeSnapshot, PageSpec};
pub use selector::Selector;
