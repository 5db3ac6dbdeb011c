//! Motion demo: a button that toggles the animated state of demo boxes

use std::any::Any;

use serde::{Deserialize, Serialize};
use stylekit_core::events::event_types;
use stylekit_core::{Event, Listeners, NodeId, Scope};
use stylekit_platform::Document;

use crate::context::WidgetContext;
use crate::widget::{Widget, WidgetId};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MotionConfig {
    #[serde(default = "default_toggle")]
    pub toggle: String,
    #[serde(default = "default_demo")]
    pub demo: String,
    #[serde(default = "default_box_class")]
    pub box_class: String,
    #[serde(default = "default_moved_class")]
    pub moved_class: String,
}

fn default_toggle() -> String {
    "motion-toggle".to_string()
}

fn default_demo() -> String {
    "motion-demo".to_string()
}

fn default_box_class() -> String {
    "motion-box".to_string()
}

fn default_moved_class() -> String {
    "move".to_string()
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            toggle: default_toggle(),
            demo: default_demo(),
            box_class: default_box_class(),
            moved_class: default_moved_class(),
        }
    }
}

pub struct MotionDemo {
    toggle: NodeId,
    demo: NodeId,
    box_selector: String,
    moved_class: String,
}

impl MotionDemo {
    pub fn attach(cx: &mut WidgetContext<'_>, config: &MotionConfig) -> Option<Self> {
        Some(Self {
            toggle: cx.element(&config.toggle)?,
            demo: cx.element(&config.demo)?,
            box_selector: format!(".{}", config.box_class),
            moved_class: config.moved_class.clone(),
        })
    }

    /// Flip every box; boxes are looked up each time so late additions move too
    pub fn toggle(&self, document: &mut Document) {
        for node in document.query_all_in(self.demo, &self.box_selector) {
            document.toggle_class(node, &self.moved_class, None);
        }
    }
}

impl Widget for MotionDemo {
    fn kind(&self) -> &'static str {
        "motion-demo"
    }

    fn listen(&self, id: WidgetId, listeners: &mut Listeners<WidgetId>) {
        listeners.register(id, Scope::Node(self.toggle), event_types::CLICK);
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, _event: &mut Event) {
        self.toggle(cx.document);
    }

    fn describe(&self, document: &Document) -> Vec<(&'static str, String)> {
        let moved = document
            .query_all_in(self.demo, &self.box_selector)
            .into_iter()
            .filter(|n| document.has_class(*n, &self.moved_class))
            .count();
        vec![("moved", moved.to_string())]
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
    use stylekit_core::TimerQueue;
    use stylekit_platform::HeadlessPlatform;

    use crate::modal::ModalStack;

    #[test]
    fn test_toggle_flips_boxes_inside_demo_only() {
        let mut doc = Document::new();
        let body = doc.body();
        let button = doc.create_element("button");
        doc.set_id(button, "motion-toggle");
        let demo = doc.create_element("div");
        doc.set_id(demo, "motion-demo");
        let inside = doc.create_element("div");
        doc.add_class(inside, "motion-box");
        let outside = doc.create_element("div");
        doc.add_class(outside, "motion-box");
        doc.append_child(body, button);
        doc.append_child(body, demo);
        doc.append_child(demo, inside);
        doc.append_child(body, outside);

        let mut platform = HeadlessPlatform::new();
        let mut timers = TimerQueue::new();
        let mut modals = ModalStack::new();
        let mut cx = WidgetContext {
            document: &mut doc,
            platform: &mut platform,
            timers: &mut timers,
            modals: &mut modals,
            id: WidgetId(1),
        };
        let mut motion = MotionDemo::attach(&mut cx, &MotionConfig::default()).unwrap();
        motion.handle_event(&mut cx, &mut Event::click(button));

        assert!(cx.document.has_class(inside, "move"));
        assert!(!cx.document.has_class(outside, "move"));

        motion.toggle(cx.document);
        assert!(!cx.document.has_class(inside, "move"));
    }
}
