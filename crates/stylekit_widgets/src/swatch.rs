//! Colour swatch click-to-copy
//!
//! Each `.color-swatch` holds a colour patch and a hex label. Activating a
//! swatch (click, or Enter/Space while focused) copies the patch's rendered
//! colour as `#RRGGBB` and shows a confirmation in the label for a fixed
//! window. Every activation restores the label text captured at attach, so
//! overlapping activations never leave a confirmation behind.

use std::any::Any;

use serde::{Deserialize, Serialize};
use stylekit_core::color::rgb_to_hex;
use stylekit_core::events::event_types;
use stylekit_core::{Event, Listeners, NodeId, Scope};
use stylekit_platform::Document;

use crate::context::WidgetContext;
use crate::widget::{Widget, WidgetId};

/// Swatch configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SwatchConfig {
    #[serde(default = "default_swatch_class")]
    pub swatch_class: String,
    #[serde(default = "default_color_class")]
    pub color_class: String,
    #[serde(default = "default_label_class")]
    pub label_class: String,
    #[serde(default = "default_copied_class")]
    pub copied_class: String,
    /// How long the confirmation stays up
    #[serde(default = "default_revert_ms")]
    pub revert_ms: u64,
}

fn default_swatch_class() -> String {
    "color-swatch".to_string()
}

fn default_color_class() -> String {
    "swatch-color".to_string()
}

fn default_label_class() -> String {
    "swatch-hex".to_string()
}

fn default_copied_class() -> String {
    "copied".to_string()
}

fn default_revert_ms() -> u64 {
    1200
}

impl Default for SwatchConfig {
    fn default() -> Self {
        Self {
            swatch_class: default_swatch_class(),
            color_class: default_color_class(),
            label_class: default_label_class(),
            copied_class: default_copied_class(),
            revert_ms: default_revert_ms(),
        }
    }
}

struct Swatch {
    root: NodeId,
    color: NodeId,
    label: NodeId,
    original_text: String,
    pending: usize,
}

/// Every colour swatch on the page
pub struct SwatchBoard {
    swatches: Vec<Swatch>,
    copied_class: String,
    revert_ms: u64,
}

impl SwatchBoard {
    pub fn attach(cx: &mut WidgetContext<'_>, config: &SwatchConfig) -> Option<Self> {
        let color_selector = format!(".{}", config.color_class);
        let label_selector = format!(".{}", config.label_class);

        let mut swatches = Vec::new();
        for root in cx
            .document
            .query_selector_all(&format!(".{}", config.swatch_class))
        {
            let color = cx.document.query_in(root, &color_selector);
            let label = cx.document.query_in(root, &label_selector);
            let (Some(color), Some(label)) = (color, label) else {
                tracing::debug!("swatch without colour patch or label skipped");
                continue;
            };
            cx.document.set_attribute(root, "tabindex", "0");
            cx.document.set_attribute(root, "role", "button");
            swatches.push(Swatch {
                root,
                color,
                label,
                original_text: cx.document.text(label).to_string(),
                pending: 0,
            });
        }

        if swatches.is_empty() {
            tracing::debug!("no colour swatches found");
            return None;
        }
        tracing::debug!(swatches = swatches.len(), "swatch board attached");
        Some(Self {
            swatches,
            copied_class: config.copied_class.clone(),
            revert_ms: config.revert_ms,
        })
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// Number of reverts still scheduled for swatch `index`
    pub fn pending(&self, index: usize) -> usize {
        self.swatches.get(index).map_or(0, |s| s.pending)
    }

    /// Copy swatch `index`'s colour. Returns the hex string when the colour
    /// could be read.
    pub fn activate(&mut self, cx: &mut WidgetContext<'_>, index: usize) -> Option<String> {
        let swatch = self.swatches.get_mut(index)?;
        let Some(hex) = cx
            .document
            .computed_background(swatch.color)
            .and_then(rgb_to_hex)
        else {
            tracing::debug!(index, "swatch colour is not rgb, nothing copied");
            return None;
        };

        let copied = match cx.platform.clipboard().write_text(&hex) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "clipboard write failed");
                false
            }
        };
        let text = if copied {
            format!("Copied {hex}")
        } else {
            hex.clone()
        };
        cx.document.set_text(swatch.label, &text);
        cx.document.add_class(swatch.label, &self.copied_class);

        swatch.pending += 1;
        cx.schedule(self.revert_ms, index as u64);
        Some(hex)
    }

    fn index_of(&self, node: NodeId) -> Option<usize> {
        self.swatches.iter().position(|s| s.root == node)
    }
}

impl Widget for SwatchBoard {
    fn kind(&self) -> &'static str {
        "swatch-board"
    }

    fn listen(&self, id: WidgetId, listeners: &mut Listeners<WidgetId>) {
        for swatch in &self.swatches {
            listeners.register(id, Scope::Node(swatch.root), event_types::CLICK);
            listeners.register(id, Scope::Node(swatch.root), event_types::KEY_DOWN);
        }
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &mut Event) {
        let Scope::Node(node) = event.current else {
            return;
        };
        let Some(index) = self.index_of(node) else {
            return;
        };
        match event.event_type {
            event_types::CLICK => {
                self.activate(cx, index);
            }
            event_types::KEY_DOWN if event.key().is_some_and(|k| k.is_activation()) => {
                event.prevent_default();
                self.activate(cx, index);
            }
            _ => {}
        }
    }

    fn on_timer(&mut self, cx: &mut WidgetContext<'_>, token: u64) {
        let Some(swatch) = self.swatches.get_mut(token as usize) else {
            return;
        };
        swatch.pending = swatch.pending.saturating_sub(1);
        cx.document.set_text(swatch.label, &swatch.original_text);
        cx.document.remove_class(swatch.label, &self.copied_class);
    }

    fn describe(&self, document: &Document) -> Vec<(&'static str, String)> {
        let labels: Vec<&str> = self.swatches.iter().map(|s| document.text(s.label)).collect();
        vec![
            ("swatches", self.swatches.len().to_string()),
            ("labels", labels.join(", ")),
        ]
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

    fn page(background: &str) -> Document {
        let mut doc = Document::new();
        let body = doc.body();
        let swatch = doc.create_element("div");
        doc.add_class(swatch, "color-swatch");
        let color = doc.create_element("div");
        doc.add_class(color, "swatch-color");
        doc.set_computed_background(color, background);
        let label = doc.create_element("span");
        doc.add_class(label, "swatch-hex");
        doc.set_text(label, "Primary");
        doc.append_child(body, swatch);
        doc.append_child(swatch, color);
        doc.append_child(swatch, label);
        doc
    }

    struct Harness {
        doc: Document,
        platform: HeadlessPlatform,
        timers: TimerQueue<WidgetId>,
        modals: ModalStack,
    }

    impl Harness {
        fn new(background: &str) -> Self {
            Self {
                doc: page(background),
                platform: HeadlessPlatform::new(),
                timers: TimerQueue::new(),
                modals: ModalStack::new(),
            }
        }

        fn cx(&mut self) -> WidgetContext<'_> {
            WidgetContext {
                document: &mut self.doc,
                platform: &mut self.platform,
                timers: &mut self.timers,
                modals: &mut self.modals,
                id: WidgetId(7),
            }
        }

        fn label(&self) -> NodeId {
            self.doc.query_selector(".swatch-hex").unwrap()
        }
    }

    #[test]
    fn test_attach_marks_swatches_focusable() {
        let mut h = Harness::new("rgb(170, 187, 204)");
        SwatchBoard::attach(&mut h.cx(), &SwatchConfig::default()).unwrap();

        let swatch = h.doc.query_selector(".color-swatch").unwrap();
        assert_eq!(h.doc.attribute(swatch, "tabindex"), Some("0"));
        assert_eq!(h.doc.attribute(swatch, "role"), Some("button"));
    }

    #[test]
    fn test_activate_copies_and_schedules_revert() {
        let mut h = Harness::new("rgb(170, 187, 204)");
        let mut board = SwatchBoard::attach(&mut h.cx(), &SwatchConfig::default()).unwrap();

        let hex = board.activate(&mut h.cx(), 0);

        assert_eq!(hex.as_deref(), Some("#AABBCC"));
        assert_eq!(h.platform.clipboard.contents(), Some("#AABBCC"));
        let label = h.label();
        assert_eq!(h.doc.text(label), "Copied #AABBCC");
        assert!(h.doc.has_class(label, "copied"));
        assert_eq!(h.timers.next_due(), Some(1200));

        board.on_timer(&mut h.cx(), 0);
        assert_eq!(h.doc.text(label), "Primary");
        assert!(!h.doc.has_class(label, "copied"));
    }

    #[test]
    fn test_clipboard_failure_shows_bare_hex() {
        let mut h = Harness::new("rgba(0, 0, 0, 0.5)");
        h.platform.clipboard.set_denied(true);
        let mut board = SwatchBoard::attach(&mut h.cx(), &SwatchConfig::default()).unwrap();

        board.activate(&mut h.cx(), 0);

        assert_eq!(h.doc.text(h.label()), "#000000");
    }

    #[test]
    fn test_unparsable_colour_changes_nothing() {
        let mut h = Harness::new("transparent");
        let mut board = SwatchBoard::attach(&mut h.cx(), &SwatchConfig::default()).unwrap();

        assert_eq!(board.activate(&mut h.cx(), 0), None);
        assert_eq!(h.doc.text(h.label()), "Primary");
        assert_eq!(h.platform.clipboard.writes(), 0);
        assert!(h.timers.is_empty());
    }
}
