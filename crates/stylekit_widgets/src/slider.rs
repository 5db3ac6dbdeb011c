//! Range slider decorations
//!
//! Two independent behaviours over `<input type="range">` controls:
//!
//! - [`ValueLabelSlider`] floats a label above the thumb. The label shows the
//!   current value and is visible only while the control is hovered or being
//!   dragged.
//! - [`FilledTrackSlider`] paints the part of the track left of the thumb in
//!   the primary colour.
//!
//! Both recompute purely from the control's value, min and max.

use std::any::Any;

use serde::{Deserialize, Serialize};
use stylekit_core::events::event_types;
use stylekit_core::fsm::StateMachine;
use stylekit_core::geometry::px;
use stylekit_core::{Event, Listeners, NodeId, Scope};
use stylekit_platform::Document;

use crate::context::WidgetContext;
use crate::widget::{Widget, WidgetId};

/// Horizontal inset of the label track, half the thumb width
const LABEL_INSET: f32 = 10.0;

/// Value of a range control
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeValue {
    pub value: f32,
    pub min: f32,
    pub max: f32,
}

impl RangeValue {
    /// Read `value`, `min` and `max` the way a range input resolves them
    pub fn read(document: &Document, input: NodeId) -> Self {
        // non-finite numbers count as missing
        let number = |raw: &str| raw.trim().parse::<f32>().ok().filter(|n| n.is_finite());
        let min = document.attribute(input, "min").and_then(number).unwrap_or(0.0);
        let max = document
            .attribute(input, "max")
            .and_then(number)
            .unwrap_or(100.0)
            .max(min);
        let value = document
            .value(input)
            .and_then(number)
            .unwrap_or(min + (max - min) / 2.0)
            .clamp(min, max);
        Self { value, min, max }
    }

    /// Position of the value within the range, `0.0..=1.0`
    pub fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.value - self.min) / span).clamp(0.0, 1.0)
    }

    pub fn percent(&self) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        // scale before dividing so whole percentages stay exact
        ((self.value - self.min) * 100.0 / span).clamp(0.0, 100.0)
    }

    /// Value as a range input reports it
    pub fn display(&self) -> String {
        format_number(self.value)
    }
}

fn format_number(n: f32) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Configuration of a slider decoration
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SliderLabelConfig {
    /// Id of the range input
    pub input: String,
    /// Selector of the floating label
    #[serde(default = "default_label")]
    pub label: String,
}

fn default_label() -> String {
    ".slider-value-label".to_string()
}

impl SliderLabelConfig {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            label: default_label(),
        }
    }
}

impl Default for SliderLabelConfig {
    fn default() -> Self {
        Self::new("my-slider")
    }
}

/// Pointer states of a labelled slider
pub mod states {
    pub const IDLE: u32 = 0;
    pub const HOVERED: u32 = 1;
    pub const DRAGGING: u32 = 2;
    /// Pointer left the control while the button is still held
    pub const DRAGGING_OUTSIDE: u32 = 3;
}

/// Range input with a floating value label
pub struct ValueLabelSlider {
    input: NodeId,
    label: NodeId,
    fsm: StateMachine,
}

impl ValueLabelSlider {
    pub fn attach(cx: &mut WidgetContext<'_>, config: &SliderLabelConfig) -> Option<Self> {
        let input = cx.element(&config.input)?;
        let Some(label) = cx.document.query_selector(&config.label) else {
            tracing::debug!(label = %config.label, "slider label not found");
            return None;
        };

        let fsm = StateMachine::builder(states::IDLE)
            .on(states::IDLE, event_types::POINTER_ENTER, states::HOVERED)
            .on(states::IDLE, event_types::POINTER_DOWN, states::DRAGGING)
            .on(states::HOVERED, event_types::POINTER_LEAVE, states::IDLE)
            .on(states::HOVERED, event_types::POINTER_DOWN, states::DRAGGING)
            .on(states::DRAGGING, event_types::POINTER_UP, states::HOVERED)
            .on(states::DRAGGING, event_types::POINTER_LEAVE, states::DRAGGING_OUTSIDE)
            .on(states::DRAGGING_OUTSIDE, event_types::POINTER_ENTER, states::DRAGGING)
            .on(states::DRAGGING_OUTSIDE, event_types::POINTER_UP, states::IDLE)
            .build();

        let slider = Self { input, label, fsm };
        slider.render(cx.document);
        Some(slider)
    }

    pub fn state(&self) -> u32 {
        self.fsm.current_state()
    }

    pub fn is_label_visible(&self) -> bool {
        !self.fsm.is_in(states::IDLE)
    }

    /// Reposition and relabel from the control's current value
    pub fn update(&self, document: &mut Document) {
        let range = RangeValue::read(document, self.input);
        let width = document.offset(self.input).width;
        let left = range.fraction() * (width - 2.0 * LABEL_INSET) + LABEL_INSET;
        document.set_style(self.label, "left", &px(left));
        document.set_text(self.label, &range.display());
    }

    fn render(&self, document: &mut Document) {
        self.update(document);
        let opacity = if self.is_label_visible() { "1" } else { "0" };
        document.set_style(self.label, "opacity", opacity);
    }
}

impl Widget for ValueLabelSlider {
    fn kind(&self) -> &'static str {
        "value-label-slider"
    }

    fn listen(&self, id: WidgetId, listeners: &mut Listeners<WidgetId>) {
        let input = Scope::Node(self.input);
        listeners.register(id, input, event_types::INPUT);
        listeners.register(id, input, event_types::POINTER_ENTER);
        listeners.register(id, input, event_types::POINTER_LEAVE);
        listeners.register(id, input, event_types::POINTER_DOWN);
        // release may happen anywhere on the page
        listeners.register(id, Scope::Document, event_types::POINTER_UP);
        listeners.register(id, Scope::Window, event_types::RESIZE);
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &mut Event) {
        match event.event_type {
            event_types::INPUT | event_types::RESIZE => self.update(cx.document),
            pointer => {
                let before = self.fsm.current_state();
                let after = self.fsm.send(pointer);
                if before != after {
                    tracing::trace!(before, after, "slider pointer state");
                    self.render(cx.document);
                }
            }
        }
    }

    fn describe(&self, document: &Document) -> Vec<(&'static str, String)> {
        vec![
            ("value", RangeValue::read(document, self.input).display()),
            ("label_visible", self.is_label_visible().to_string()),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Range input whose track is filled up to the thumb
pub struct FilledTrackSlider {
    input: NodeId,
}

impl FilledTrackSlider {
    pub fn attach(cx: &mut WidgetContext<'_>, input: &str) -> Option<Self> {
        let input = cx.element(input)?;
        let slider = Self { input };
        slider.update(cx.document);
        Some(slider)
    }

    pub fn update(&self, document: &mut Document) {
        let percent = format_number(RangeValue::read(document, self.input).percent());
        let background = format!(
            "linear-gradient(to right, var(--color-primary) {percent}%, var(--color-border-default) {percent}%)"
        );
        document.set_style(self.input, "background", &background);
    }
}

impl Widget for FilledTrackSlider {
    fn kind(&self) -> &'static str {
        "filled-track-slider"
    }

    fn listen(&self, id: WidgetId, listeners: &mut Listeners<WidgetId>) {
        listeners.register(id, Scope::Node(self.input), event_types::INPUT);
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &mut Event) {
        if event.event_type == event_types::INPUT {
            self.update(cx.document);
        }
    }

    fn describe(&self, document: &Document) -> Vec<(&'static str, String)> {
        vec![("value", RangeValue::read(document, self.input).display())]
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

    use crate::modal::ModalStack;

    fn range(doc: &mut Document, id: &str, min: &str, max: &str, value: &str) -> NodeId {
        let body = doc.body();
        let input = doc.create_element("input");
        doc.set_id(input, id);
        doc.set_attribute(input, "type", "range");
        doc.set_attribute(input, "min", min);
        doc.set_attribute(input, "max", max);
        doc.set_value(input, value);
        doc.set_offset(input, Rect::new(0.0, 0.0, 220.0, 16.0));
        doc.append_child(body, input);
        input
    }

    fn with_cx<R>(doc: &mut Document, f: impl FnOnce(&mut WidgetContext<'_>) -> R) -> R {
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
        f(&mut cx)
    }

    #[test]
    fn test_fraction_handles_empty_range() {
        let range = RangeValue {
            value: 5.0,
            min: 5.0,
            max: 5.0,
        };
        assert_eq!(range.fraction(), 0.0);
    }

    #[test]
    fn test_read_defaults_and_clamps() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        assert_eq!(RangeValue::read(&doc, input).value, 50.0);

        doc.set_attribute(input, "max", "10");
        doc.set_value(input, "42");
        assert_eq!(RangeValue::read(&doc, input).value, 10.0);
    }

    #[test]
    fn test_read_ignores_non_finite_numbers() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        doc.set_attribute(input, "min", "NaN");
        doc.set_attribute(input, "max", "inf");
        doc.set_value(input, "nan");

        let range = RangeValue::read(&doc, input);

        assert_eq!((range.min, range.max, range.value), (0.0, 100.0, 50.0));
        assert_eq!(range.display(), "50");
        assert_eq!(range.percent(), 50.0);
    }

    #[test]
    fn test_label_position_and_text() {
        let mut doc = Document::new();
        range(&mut doc, "my-slider", "0", "100", "25");
        let body = doc.body();
        let label = doc.create_element("span");
        doc.add_class(label, "slider-value-label");
        doc.append_child(body, label);

        let slider = with_cx(&mut doc, |cx| {
            ValueLabelSlider::attach(cx, &SliderLabelConfig::default()).unwrap()
        });

        // 0.25 * (220 - 20) + 10
        assert_eq!(doc.style(label, "left"), Some("60px"));
        assert_eq!(doc.text(label), "25");
        assert_eq!(doc.style(label, "opacity"), Some("0"));
        assert!(!slider.is_label_visible());
    }

    #[test]
    fn test_label_visible_while_dragging_outside() {
        let mut doc = Document::new();
        range(&mut doc, "my-slider", "0", "100", "25");
        let body = doc.body();
        let label = doc.create_element("span");
        doc.add_class(label, "slider-value-label");
        doc.append_child(body, label);

        with_cx(&mut doc, |cx| {
            let mut slider = ValueLabelSlider::attach(cx, &SliderLabelConfig::default()).unwrap();
            let input = slider.input;
            for event_type in [
                event_types::POINTER_ENTER,
                event_types::POINTER_DOWN,
                event_types::POINTER_LEAVE,
            ] {
                slider.handle_event(cx, &mut Event::pointer(event_type, input));
            }
            assert_eq!(slider.state(), states::DRAGGING_OUTSIDE);
            assert_eq!(cx.document.style(label, "opacity"), Some("1"));

            slider.handle_event(cx, &mut Event::pointer(event_types::POINTER_UP, input));
            assert_eq!(slider.state(), states::IDLE);
            assert_eq!(cx.document.style(label, "opacity"), Some("0"));
        });
    }

    #[test]
    fn test_filled_track_gradient() {
        let mut doc = Document::new();
        let input = range(&mut doc, "my-slider-filled", "0", "200", "50");

        let slider = with_cx(&mut doc, |cx| {
            FilledTrackSlider::attach(cx, "my-slider-filled").unwrap()
        });
        assert_eq!(
            doc.style(input, "background"),
            Some("linear-gradient(to right, var(--color-primary) 25%, var(--color-border-default) 25%)")
        );

        doc.set_value(input, "200");
        slider.update(&mut doc);
        assert!(doc.style(input, "background").unwrap().contains(" 100%,"));
    }
}
