//! Per-dispatch widget context

use stylekit_core::{TimerId, TimerQueue};
use stylekit_platform::{Document, Platform};

use crate::modal::ModalStack;
use crate::widget::WidgetId;

/// Everything a widget may touch while handling an event
pub struct WidgetContext<'a> {
    pub document: &'a mut Document,
    pub platform: &'a mut dyn Platform,
    pub timers: &'a mut TimerQueue<WidgetId>,
    /// Open modals, bottom first
    pub modals: &'a mut ModalStack,
    /// The widget currently running
    pub id: WidgetId,
}

impl WidgetContext<'_> {
    /// Current clock value in milliseconds
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Schedule a one-shot timer for the running widget
    pub fn schedule(&mut self, delay_ms: u64, token: u64) -> TimerId {
        self.timers.schedule(self.id, delay_ms, token)
    }

    pub fn cancel(&mut self, timer: TimerId) -> bool {
        self.timers.cancel(timer)
    }

    /// Resolve an element by id, logging when it is absent
    pub fn element(&self, id: &str) -> Option<stylekit_core::NodeId> {
        let node = self.document.get_element_by_id(id);
        if node.is_none() {
            tracing::debug!(id, "element not found");
        }
        node
    }
}
