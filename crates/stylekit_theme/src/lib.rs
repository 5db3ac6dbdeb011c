//! stylekit Theme Preference
//!
//! Resolves the page's light/dark scheme from two sources:
//!
//! - **Explicit choice**: persisted under one storage key, set by the theme
//!   toggle, and permanent until the key is cleared
//! - **System preference**: the OS `prefers-color-scheme`, followed only
//!   while no explicit choice exists
//!
//! # Quick Start
//!
//! ```rust
//! use stylekit_platform::HeadlessPlatform;
//! use stylekit_theme::{ColorScheme, ThemeState};
//!
//! let mut platform = HeadlessPlatform::new().with_prefers_dark(true);
//! let mut theme = ThemeState::load(&platform.storage, "theme", true);
//! assert_eq!(theme.scheme(), ColorScheme::Dark);
//!
//! theme.set_explicit(&mut platform.storage, ColorScheme::Light);
//! theme.system_changed(&platform.storage, true);
//! assert_eq!(theme.scheme(), ColorScheme::Light);
//! ```

pub mod scheme;
pub mod state;

pub use scheme::ColorScheme;
pub use state::{ThemeSource, ThemeState};
