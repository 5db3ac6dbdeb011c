//! Pill selector
//!
//! A segmented control: mutually exclusive `.btn-pill` buttons inside a group
//! plus one `.pill-selector-slider` indicator that always sits on the active
//! button. The indicator is realigned on every selection and window resize.

use std::any::Any;

use serde::{Deserialize, Serialize};
use stylekit_core::events::event_types;
use stylekit_core::{Event, Listeners, NodeId, Scope};
use stylekit_platform::Document;

use crate::context::WidgetContext;
use crate::indicator::{align, select_exclusive};
use crate::widget::{Widget, WidgetId};

/// Pill selector configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PillConfig {
    /// Id of the group element
    pub group: String,
    /// Id of an element that shows the selected `data-value`
    #[serde(default)]
    pub value_display: Option<String>,
    #[serde(default = "default_button_class")]
    pub button_class: String,
    #[serde(default = "default_slider_class")]
    pub slider_class: String,
    #[serde(default = "default_active_class")]
    pub active_class: String,
}

fn default_button_class() -> String {
    "btn-pill".to_string()
}

fn default_slider_class() -> String {
    "pill-selector-slider".to_string()
}

fn default_active_class() -> String {
    "active".to_string()
}

impl PillConfig {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            value_display: None,
            button_class: default_button_class(),
            slider_class: default_slider_class(),
            active_class: default_active_class(),
        }
    }

    pub fn value_display(mut self, id: impl Into<String>) -> Self {
        self.value_display = Some(id.into());
        self
    }
}

impl Default for PillConfig {
    fn default() -> Self {
        Self::new("pill-selector-1").value_display("pill-value-1")
    }
}

/// Pill selector widget
pub struct PillSelector {
    group: NodeId,
    buttons: Vec<NodeId>,
    slider: Option<NodeId>,
    value_display: Option<NodeId>,
    button_class: String,
    active_class: String,
}

impl PillSelector {
    pub fn attach(cx: &mut WidgetContext<'_>, config: &PillConfig) -> Option<Self> {
        let group = cx.element(&config.group)?;
        let buttons = cx
            .document
            .query_all_in(group, &format!(".{}", config.button_class));
        let slider = cx
            .document
            .query_in(group, &format!(".{}", config.slider_class));
        let value_display = config
            .value_display
            .as_deref()
            .and_then(|id| cx.document.get_element_by_id(id));

        let selector = Self {
            group,
            buttons,
            slider,
            value_display,
            button_class: config.button_class.clone(),
            active_class: config.active_class.clone(),
        };

        // keep at most one active button
        if let Some(active) = selector.active(cx.document) {
            select_exclusive(cx.document, &selector.buttons, active, &selector.active_class);
        }
        selector.realign(cx.document);

        tracing::debug!(
            group = %config.group,
            buttons = selector.buttons.len(),
            "pill selector attached"
        );
        Some(selector)
    }

    pub fn buttons(&self) -> &[NodeId] {
        &self.buttons
    }

    pub fn slider(&self) -> Option<NodeId> {
        self.slider
    }

    /// First button carrying the active class
    pub fn active(&self, document: &Document) -> Option<NodeId> {
        self.buttons
            .iter()
            .copied()
            .find(|b| document.has_class(*b, &self.active_class))
    }

    /// Make `button` the single active option
    pub fn select(&mut self, document: &mut Document, button: NodeId) {
        if !self.buttons.contains(&button) {
            return;
        }
        select_exclusive(document, &self.buttons, button, &self.active_class);
        if let (Some(display), Some(value)) = (
            self.value_display,
            document.data(button, "value").map(str::to_string),
        ) {
            document.set_text(display, &value);
        }
        self.realign(document);
    }

    /// Put the indicator on the active button, hiding it if none is active
    pub fn realign(&self, document: &mut Document) {
        if let Some(slider) = self.slider {
            let active = self.active(document);
            align(document, slider, active);
        }
    }
}

impl Widget for PillSelector {
    fn kind(&self) -> &'static str {
        "pill-selector"
    }

    fn listen(&self, id: WidgetId, listeners: &mut Listeners<WidgetId>) {
        listeners.register(id, Scope::Node(self.group), event_types::CLICK);
        listeners.register(id, Scope::Window, event_types::RESIZE);
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &mut Event) {
        match event.event_type {
            event_types::CLICK => {
                let button = event.target.and_then(|t| {
                    cx.document
                        .closest_with_class(t, &self.button_class, self.group)
                });
                if let Some(button) = button {
                    self.select(cx.document, button);
                }
            }
            event_types::RESIZE => self.realign(cx.document),
            _ => {}
        }
    }

    fn describe(&self, document: &Document) -> Vec<(&'static str, String)> {
        let value = self
            .active(document)
            .and_then(|b| document.data(b, "value"))
            .unwrap_or_default();
        vec![("value", value.to_string())]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylekit_core::{Rect, TimerQueue};
    use stylekit_platform::HeadlessPlatform;

    use crate::indicator::current_box;
    use crate::modal::ModalStack;

    fn page(active: Option<usize>) -> Document {
        let mut doc = Document::new();
        let body = doc.body();
        let group = doc.create_element("div");
        doc.set_id(group, "pill-selector-1");
        doc.append_child(body, group);
        for (i, value) in ["daily", "weekly", "monthly"].into_iter().enumerate() {
            let button = doc.create_element("button");
            doc.add_class(button, "btn-pill");
            doc.set_attribute(button, "data-value", value);
            doc.set_offset(button, Rect::new(4.0 + 90.0 * i as f32, 4.0, 86.0, 32.0));
            if active == Some(i) {
                doc.add_class(button, "active");
            }
            doc.append_child(group, button);
        }
        let slider = doc.create_element("span");
        doc.add_class(slider, "pill-selector-slider");
        doc.append_child(group, slider);
        let display = doc.create_element("span");
        doc.set_id(display, "pill-value-1");
        doc.append_child(body, display);
        doc
    }

    fn attach(doc: &mut Document) -> PillSelector {
        let mut platform = HeadlessPlatform::new();
        let mut timers = TimerQueue::new();
        let mut modals = ModalStack::new();
        let mut cx = WidgetContext {
            document: doc,
            platform: &mut platform,
            timers: &mut timers,
            modals: &mut modals,
            id: WidgetId(1),
        };
        PillSelector::attach(&mut cx, &PillConfig::default()).unwrap()
    }

    #[test]
    fn test_attach_aligns_to_initial_active() {
        let mut doc = page(Some(1));
        let pill = attach(&mut doc);
        let slider = pill.slider().unwrap();

        assert_eq!(
            current_box(&doc, slider),
            Some(Rect::new(94.0, 4.0, 86.0, 32.0))
        );
    }

    #[test]
    fn test_no_active_button_hides_slider() {
        let mut doc = page(None);
        let pill = attach(&mut doc);

        assert_eq!(current_box(&doc, pill.slider().unwrap()), None);
    }

    #[test]
    fn test_select_updates_value_and_slider() {
        let mut doc = page(Some(0));
        let mut pill = attach(&mut doc);
        let monthly = pill.buttons()[2];

        pill.select(&mut doc, monthly);

        assert_eq!(pill.active(&doc), Some(monthly));
        let display = doc.get_element_by_id("pill-value-1").unwrap();
        assert_eq!(doc.text(display), "monthly");
        assert_eq!(
            current_box(&doc, pill.slider().unwrap()),
            Some(doc.offset(monthly))
        );
    }

    #[test]
    fn test_realign_follows_geometry() {
        let mut doc = page(Some(0));
        let pill = attach(&mut doc);
        let daily = pill.buttons()[0];

        doc.set_offset(daily, Rect::new(2.0, 2.0, 60.0, 28.0));
        pill.realign(&mut doc);

        assert_eq!(
            current_box(&doc, pill.slider().unwrap()),
            Some(Rect::new(2.0, 2.0, 60.0, 28.0))
        );
    }
}
