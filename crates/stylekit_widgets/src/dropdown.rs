//! Dropdown menu
//!
//! A toggle button opens and closes a menu container. The toggle's click is
//! stopped so the document-level outside-click listener does not see it; any
//! other click outside both the toggle and the menu closes the menu. The open
//! state is mirrored into `aria-expanded` on the toggle.
//!
//! The same type backs the navigation overflow menu, which embeds it and
//! forwards events through [`Dropdown::handle`].

use std::any::Any;

use serde::{Deserialize, Serialize};
use stylekit_core::events::event_types;
use stylekit_core::fsm::StateMachine;
use stylekit_core::{Event, Listeners, NodeId, Scope};
use stylekit_platform::Document;

use crate::context::WidgetContext;
use crate::widget::{Widget, WidgetId};

/// Dropdown states
pub mod states {
    pub const CLOSED: u32 = 0;
    pub const OPEN: u32 = 1;
}

mod inputs {
    pub const OPEN: u32 = 1;
    pub const CLOSE: u32 = 2;
    pub const TOGGLE: u32 = 3;
}

/// Dropdown configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DropdownConfig {
    /// Id of the toggle button
    pub toggle: String,
    /// Id of the menu container
    pub menu: String,
    #[serde(default = "default_open_class")]
    pub open_class: String,
}

fn default_open_class() -> String {
    "is-visible".to_string()
}

impl DropdownConfig {
    pub fn new(toggle: impl Into<String>, menu: impl Into<String>) -> Self {
        Self {
            toggle: toggle.into(),
            menu: menu.into(),
            open_class: default_open_class(),
        }
    }
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self::new("dropdown-toggle", "dropdown-menu")
    }
}

/// Dropdown menu widget
pub struct Dropdown {
    toggle: NodeId,
    menu: NodeId,
    open_class: String,
    fsm: StateMachine,
}

impl Dropdown {
    pub fn attach(cx: &mut WidgetContext<'_>, config: &DropdownConfig) -> Option<Self> {
        let toggle = cx.element(&config.toggle)?;
        let menu = cx.element(&config.menu)?;

        let initial = if cx.document.has_class(menu, &config.open_class) {
            states::OPEN
        } else {
            states::CLOSED
        };
        let fsm = StateMachine::builder(initial)
            .on(states::CLOSED, inputs::OPEN, states::OPEN)
            .on(states::CLOSED, inputs::TOGGLE, states::OPEN)
            .on(states::OPEN, inputs::CLOSE, states::CLOSED)
            .on(states::OPEN, inputs::TOGGLE, states::CLOSED)
            .build();

        let dropdown = Self {
            toggle,
            menu,
            open_class: config.open_class.clone(),
            fsm,
        };
        dropdown.render(cx.document);
        tracing::debug!(toggle = %config.toggle, menu = %config.menu, "dropdown attached");
        Some(dropdown)
    }

    pub fn toggle_node(&self) -> NodeId {
        self.toggle
    }

    pub fn menu_node(&self) -> NodeId {
        self.menu
    }

    pub fn is_open(&self) -> bool {
        self.fsm.is_in(states::OPEN)
    }

    pub fn open(&mut self, document: &mut Document) {
        self.transition(document, inputs::OPEN);
    }

    pub fn close(&mut self, document: &mut Document) {
        self.transition(document, inputs::CLOSE);
    }

    pub fn toggle(&mut self, document: &mut Document) {
        self.transition(document, inputs::TOGGLE);
    }

    fn transition(&mut self, document: &mut Document, input: u32) {
        if !self.fsm.can_send(input) {
            return;
        }
        let state = self.fsm.send(input);
        tracing::debug!(open = state == states::OPEN, "dropdown transition");
        self.render(document);
    }

    fn render(&self, document: &mut Document) {
        let open = self.is_open();
        document.toggle_class(self.menu, &self.open_class, Some(open));
        document.set_attribute(self.toggle, "aria-expanded", if open { "true" } else { "false" });
    }

    /// Register the toggle and outside-click listeners under `id`
    pub fn register(&self, id: WidgetId, listeners: &mut Listeners<WidgetId>) {
        listeners.register(id, Scope::Node(self.toggle), event_types::CLICK);
        listeners.register(id, Scope::Document, event_types::CLICK);
    }

    /// Handle an event delivered to one of this dropdown's listeners.
    /// Returns `false` when the event is not one of them.
    pub fn handle(&mut self, document: &mut Document, event: &mut Event) -> bool {
        if event.event_type != event_types::CLICK {
            return false;
        }
        match event.current {
            Scope::Node(node) if node == self.toggle => {
                event.stop_propagation();
                self.toggle(document);
                true
            }
            Scope::Document => {
                let inside = event
                    .target
                    .is_some_and(|t| t == self.toggle || document.contains(self.menu, t));
                if !inside {
                    self.close(document);
                }
                true
            }
            _ => false,
        }
    }
}

impl Widget for Dropdown {
    fn kind(&self) -> &'static str {
        "dropdown"
    }

    fn listen(&self, id: WidgetId, listeners: &mut Listeners<WidgetId>) {
        self.register(id, listeners);
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &mut Event) {
        self.handle(cx.document, event);
    }

    fn describe(&self, document: &Document) -> Vec<(&'static str, String)> {
        vec![
            ("menu", document.id(self.menu).unwrap_or_default().to_string()),
            ("open", self.is_open().to_string()),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
