//! Modal dialogs
//!
//! A modal is a backdrop element that hosts the dialog content. It opens from
//! any registered trigger and closes from explicit close controls, a click on
//! the backdrop itself, or Escape. Escape and backdrop clicks are ignored for
//! backdrops marked `data-escapable="false"`.
//!
//! Escape only ever dismisses the top-most open modal, one per key press.
//! The key press still propagates to other listeners. Every modal instance
//! shares one [`ModalStack`] that records the order modals were opened in.

use std::any::Any;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use stylekit_core::events::event_types;
use stylekit_core::fsm::StateMachine;
use stylekit_core::{Event, KeyCode, Listeners, NodeId, Scope};
use stylekit_platform::Document;

use crate::context::WidgetContext;
use crate::widget::{Widget, WidgetId};

/// Modal states
pub mod states {
    pub const HIDDEN: u32 = 0;
    pub const VISIBLE: u32 = 1;
}

mod inputs {
    pub const OPEN: u32 = 1;
    pub const CLOSE: u32 = 2;
}

/// Open modals in stacking order, bottom first
#[derive(Debug, Default)]
pub struct ModalStack {
    open: SmallVec<[NodeId; 4]>,
    /// Modal an Escape dispatch resolved to, keyed by event serial
    escape: Option<(u64, Option<NodeId>)>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `backdrop` on top, moving it there if it was already open
    pub fn raise(&mut self, backdrop: NodeId) {
        self.open.retain(|b| *b != backdrop);
        self.open.push(backdrop);
    }

    pub fn remove(&mut self, backdrop: NodeId) {
        self.open.retain(|b| *b != backdrop);
    }

    pub fn top(&self) -> Option<NodeId> {
        self.open.last().copied()
    }

    pub fn is_top(&self, backdrop: NodeId) -> bool {
        self.top() == Some(backdrop)
    }

    /// Modal that the Escape dispatch `serial` dismisses
    ///
    /// Resolved once per dispatch from the stack as it was when the key was
    /// pressed, so closing the top modal does not expose the next one to the
    /// same key press.
    pub fn escape_target(&mut self, serial: u64) -> Option<NodeId> {
        match self.escape {
            Some((seen, target)) if seen == serial => target,
            _ => {
                let target = self.top();
                self.escape = Some((serial, target));
                target
            }
        }
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

/// Modal configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ModalConfig {
    /// Id of the backdrop element
    pub backdrop: String,
    /// Ids of elements that open the modal
    #[serde(default)]
    pub triggers: Vec<String>,
    /// Ids of explicit close controls
    #[serde(default)]
    pub close_controls: Vec<String>,
    #[serde(default = "default_visible_class")]
    pub visible_class: String,
}

fn default_visible_class() -> String {
    "is-visible".to_string()
}

impl ModalConfig {
    pub fn new(backdrop: impl Into<String>) -> Self {
        Self {
            backdrop: backdrop.into(),
            triggers: Vec::new(),
            close_controls: Vec::new(),
            visible_class: default_visible_class(),
        }
    }

    pub fn trigger(mut self, id: impl Into<String>) -> Self {
        self.triggers.push(id.into());
        self
    }

    pub fn close_control(mut self, id: impl Into<String>) -> Self {
        self.close_controls.push(id.into());
        self
    }
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self::new("modal-backdrop")
            .trigger("open-modal-btn")
            .close_control("close-modal-btn")
            .close_control("cancel-modal-btn")
    }
}

/// Modal dialog widget
pub struct Modal {
    backdrop: NodeId,
    triggers: SmallVec<[NodeId; 2]>,
    close_controls: SmallVec<[NodeId; 2]>,
    escapable: bool,
    visible_class: String,
    fsm: StateMachine,
}

impl Modal {
    pub fn attach(cx: &mut WidgetContext<'_>, config: &ModalConfig) -> Option<Self> {
        let backdrop = cx.element(&config.backdrop)?;
        let resolve = |ids: &[String]| -> SmallVec<[NodeId; 2]> {
            ids.iter()
                .filter_map(|id| cx.document.get_element_by_id(id))
                .collect()
        };
        let triggers = resolve(&config.triggers);
        let close_controls = resolve(&config.close_controls);
        let escapable = cx.document.data(backdrop, "escapable") != Some("false");

        let initially_visible = cx.document.has_class(backdrop, &config.visible_class);
        let initial = if initially_visible {
            states::VISIBLE
        } else {
            states::HIDDEN
        };
        let fsm = StateMachine::builder(initial)
            .on(states::HIDDEN, inputs::OPEN, states::VISIBLE)
            .on(states::VISIBLE, inputs::CLOSE, states::HIDDEN)
            .build();
        if initially_visible {
            cx.modals.raise(backdrop);
        }

        tracing::debug!(
            backdrop = %config.backdrop,
            triggers = triggers.len(),
            escapable,
            "modal attached"
        );
        Some(Self {
            backdrop,
            triggers,
            close_controls,
            escapable,
            visible_class: config.visible_class.clone(),
            fsm,
        })
    }

    pub fn backdrop(&self) -> NodeId {
        self.backdrop
    }

    pub fn is_open(&self) -> bool {
        self.fsm.is_in(states::VISIBLE)
    }

    pub fn is_escapable(&self) -> bool {
        self.escapable
    }

    pub fn open(&mut self, cx: &mut WidgetContext<'_>) {
        if self.fsm.send(inputs::OPEN) == states::VISIBLE {
            cx.modals.raise(self.backdrop);
            self.render(cx.document);
        }
    }

    pub fn close(&mut self, cx: &mut WidgetContext<'_>) {
        if self.fsm.send(inputs::CLOSE) == states::HIDDEN {
            cx.modals.remove(self.backdrop);
            self.render(cx.document);
        }
    }

    fn render(&self, document: &mut Document) {
        document.toggle_class(self.backdrop, &self.visible_class, Some(self.is_open()));
    }
}

impl Widget for Modal {
    fn kind(&self) -> &'static str {
        "modal"
    }

    fn listen(&self, id: WidgetId, listeners: &mut Listeners<WidgetId>) {
        for node in self.triggers.iter().chain(&self.close_controls) {
            listeners.register(id, Scope::Node(*node), event_types::CLICK);
        }
        if self.escapable {
            listeners.register(id, Scope::Node(self.backdrop), event_types::CLICK);
            listeners.register(id, Scope::Document, event_types::KEY_DOWN);
        }
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &mut Event) {
        match (event.event_type, event.current) {
            (event_types::CLICK, Scope::Node(node)) if self.triggers.contains(&node) => {
                self.open(cx);
            }
            (event_types::CLICK, Scope::Node(node)) if self.close_controls.contains(&node) => {
                self.close(cx);
            }
            (event_types::CLICK, Scope::Node(node))
                if node == self.backdrop && event.target == Some(self.backdrop) =>
            {
                self.close(cx);
            }
            (event_types::KEY_DOWN, Scope::Document) => {
                if event.key() == Some(KeyCode::ESCAPE)
                    && self.is_open()
                    && cx.modals.escape_target(event.serial) == Some(self.backdrop)
                {
                    self.close(cx);
                }
            }
            _ => {}
        }
    }

    fn teardown(&mut self, cx: &mut WidgetContext<'_>) {
        cx.modals.remove(self.backdrop);
    }

    fn describe(&self, document: &Document) -> Vec<(&'static str, String)> {
        vec![
            (
                "backdrop",
                document.id(self.backdrop).unwrap_or_default().to_string(),
            ),
            ("open", self.is_open().to_string()),
            ("escapable", self.escapable.to_string()),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
