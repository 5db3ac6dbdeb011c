//! stylekit Widget Library
//!
//! Interactive behaviour for a design-system page. Every widget:
//!
//! - resolves its elements in `attach`, returning `None` (and touching
//!   nothing) when a required element is missing
//! - registers its own listeners in [`Widget::listen`] so the owner can
//!   remove them all on teardown
//! - keeps interaction state in a state machine and renders DOM changes from
//!   that state

pub mod context;
pub mod dropdown;
pub mod indicator;
pub mod modal;
pub mod motion;
pub mod nav;
pub mod pill;
pub mod slider;
pub mod swatch;
pub mod tabs;
pub mod theme_switch;
pub mod widget;

pub use context::WidgetContext;
pub use dropdown::{Dropdown, DropdownConfig};
pub use modal::{Modal, ModalConfig, ModalStack};
pub use motion::{MotionDemo, MotionConfig};
pub use nav::{NavConfig, NavLayout, Navigation, ScrollSpyHash};
pub use pill::{PillConfig, PillSelector};
pub use slider::{FilledTrackSlider, RangeValue, SliderLabelConfig, ValueLabelSlider};
pub use swatch::{SwatchBoard, SwatchConfig};
pub use tabs::{Tabs, TabsConfig};
pub use theme_switch::{ThemeSwitch, ThemeSwitchConfig};
pub use widget::{Widget, WidgetId};
