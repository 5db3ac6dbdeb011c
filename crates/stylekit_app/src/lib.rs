//! stylekit Page Controller
//!
//! Mounts every widget of the design-system page on one document and routes
//! host input to them:
//!
//! ```rust
//! use stylekit_app::{Controller, ControllerConfig};
//! use stylekit_platform::{HeadlessPlatform, PageSpec};
//!
//! let page = PageSpec::from_toml_str(
//!     r#"
//! [[element]]
//! tag = "div"
//! id = "modal-backdrop"
//! class = "modal-backdrop"
//!
//! [[element]]
//! tag = "button"
//! id = "open-modal-btn"
//! "#,
//! )
//! .unwrap();
//!
//! let mut controller = Controller::mount(
//!     page.build().unwrap(),
//!     HeadlessPlatform::new(),
//!     &ControllerConfig::default(),
//! );
//! controller.click_id("open-modal-btn").unwrap();
//! assert_eq!(controller.modals().len(), 1);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod replay;
pub mod report;
pub mod scenario;

pub use config::{ControllerConfig, SlidersConfig};
pub use controller::Controller;
pub use error::ConfigError;
pub use replay::replay;
pub use report::{ReplayReport, ReportStatus, UiSnapshot, WidgetSnapshot};
pub use scenario::{PointerAction, ReplayScript, ScriptStep};
