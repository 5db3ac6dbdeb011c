//! Content tabs
//!
//! A list of trigger buttons, each naming a pane by id in `data-tab`. One
//! delegated click listener on the list handles every trigger.

use std::any::Any;

use serde::{Deserialize, Serialize};
use stylekit_core::events::event_types;
use stylekit_core::{Event, Listeners, NodeId, Scope};
use stylekit_platform::Document;

use crate::context::WidgetContext;
use crate::indicator::select_exclusive;
use crate::widget::{Widget, WidgetId};

/// Tabs configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TabsConfig {
    /// Selector of the trigger container
    #[serde(default = "default_list")]
    pub list: String,
    #[serde(default = "default_trigger_class")]
    pub trigger_class: String,
    #[serde(default = "default_pane_class")]
    pub pane_class: String,
    #[serde(default = "default_active_class")]
    pub active_class: String,
}

fn default_list() -> String {
    ".tabs-list".to_string()
}

fn default_trigger_class() -> String {
    "tab-trigger".to_string()
}

fn default_pane_class() -> String {
    "tab-pane".to_string()
}

fn default_active_class() -> String {
    "active".to_string()
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            list: default_list(),
            trigger_class: default_trigger_class(),
            pane_class: default_pane_class(),
            active_class: default_active_class(),
        }
    }
}

/// Content tabs widget
pub struct Tabs {
    list: NodeId,
    triggers: Vec<NodeId>,
    panes: Vec<NodeId>,
    trigger_class: String,
    active_class: String,
    active: Option<NodeId>,
}

impl Tabs {
    pub fn attach(cx: &mut WidgetContext<'_>, config: &TabsConfig) -> Option<Self> {
        let Some(list) = cx.document.query_selector(&config.list) else {
            tracing::debug!(list = %config.list, "tabs list not found");
            return None;
        };
        let triggers = cx
            .document
            .query_all_in(list, &format!(".{}", config.trigger_class));
        let panes = cx
            .document
            .query_selector_all(&format!(".{}", config.pane_class));

        let mut tabs = Self {
            list,
            triggers,
            panes,
            trigger_class: config.trigger_class.clone(),
            active_class: config.active_class.clone(),
            active: None,
        };

        // start from exactly one active trigger whose pane exists
        let initial = tabs
            .triggers
            .iter()
            .copied()
            .filter(|t| tabs.pane_for(cx.document, *t).is_some())
            .find(|t| cx.document.has_class(*t, &tabs.active_class))
            .or_else(|| {
                tabs.triggers
                    .iter()
                    .copied()
                    .find(|t| tabs.pane_for(cx.document, *t).is_some())
            });
        if let Some(trigger) = initial {
            tabs.activate(cx.document, trigger);
        }

        tracing::debug!(
            triggers = tabs.triggers.len(),
            panes = tabs.panes.len(),
            "tabs attached"
        );
        Some(tabs)
    }

    /// Currently active trigger
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Pane id named by the active trigger
    pub fn active_pane<'d>(&self, document: &'d Document) -> Option<&'d str> {
        document.data(self.active?, "tab")
    }

    fn pane_for(&self, document: &Document, trigger: NodeId) -> Option<NodeId> {
        let name = document.data(trigger, "tab")?;
        self.panes
            .iter()
            .copied()
            .find(|p| document.id(*p) == Some(name))
    }

    /// Activate `trigger` and show its pane. Triggers without a pane are ignored.
    pub fn activate(&mut self, document: &mut Document, trigger: NodeId) -> bool {
        let Some(pane) = self.pane_for(document, trigger) else {
            tracing::debug!("tab trigger names no pane");
            return false;
        };
        select_exclusive(document, &self.triggers, trigger, &self.active_class);
        select_exclusive(document, &self.panes, pane, &self.active_class);
        self.active = Some(trigger);
        true
    }
}

impl Widget for Tabs {
    fn kind(&self) -> &'static str {
        "tabs"
    }

    fn listen(&self, id: WidgetId, listeners: &mut Listeners<WidgetId>) {
        listeners.register(id, Scope::Node(self.list), event_types::CLICK);
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &mut Event) {
        if event.event_type != event_types::CLICK {
            return;
        }
        let Some(target) = event.target else {
            return;
        };
        let Some(trigger) = cx
            .document
            .closest_with_class(target, &self.trigger_class, self.list)
        else {
            return;
        };
        if self.triggers.contains(&trigger) {
            self.activate(cx.document, trigger);
        }
    }

    fn describe(&self, document: &Document) -> Vec<(&'static str, String)> {
        vec![(
            "active",
            self.active_pane(document).unwrap_or_default().to_string(),
        )]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
