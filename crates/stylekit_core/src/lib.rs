//! stylekit Core Runtime
//!
//! Foundational primitives shared by every stylekit widget:
//!
//! - **Event Routing**: typed events delivered along a bubbling path
//!   (target node, ancestors, document, window)
//! - **Listener Registry**: explicit per-owner registration so a widget can
//!   unregister everything it installed on teardown
//! - **State Machines**: flat state machines for widget interaction states
//! - **Timers**: one-shot timers on a virtual millisecond clock
//!
//! # Example
//!
//! ```rust
//! use stylekit_core::events::{event_types, Listeners, Scope};
//!
//! let mut listeners: Listeners<u32> = Listeners::new();
//! listeners.register(7, Scope::Document, event_types::CLICK);
//!
//! let route = listeners.route(&[Scope::Document], event_types::CLICK);
//! assert_eq!(route.len(), 1);
//!
//! listeners.remove_owner(7);
//! assert!(listeners.is_empty());
//! ```

pub mod color;
pub mod events;
pub mod fsm;
pub mod geometry;
pub mod node;
pub mod scheduler;

pub use color::Rgb8;
pub use events::{Event, EventData, EventType, KeyCode, ListenerId, Listeners, Scope};
pub use fsm::{StateId, StateMachine, Transition};
pub use geometry::Rect;
pub use node::NodeId;
pub use scheduler::{TimerId, TimerQueue};
