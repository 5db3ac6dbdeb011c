//! Base widget trait and types

use std::any::Any;
use std::fmt;

use stylekit_core::{Event, Listeners};
use stylekit_platform::Document;

use crate::context::WidgetContext;

/// Identifier of a mounted widget, allocated by the owner before `attach`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(pub u64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Base trait for all widgets
pub trait Widget: Any {
    /// Short kind name used in logs and snapshots
    fn kind(&self) -> &'static str;

    /// Register every listener this widget needs, owned by `id`
    fn listen(&self, id: WidgetId, listeners: &mut Listeners<WidgetId>);

    /// Handle an event delivered to one of this widget's listeners
    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &mut Event);

    /// A timer scheduled through [`WidgetContext::schedule`] came due
    fn on_timer(&mut self, _cx: &mut WidgetContext<'_>, _token: u64) {}

    /// Release anything outside the listener registry and timer queue
    fn teardown(&mut self, _cx: &mut WidgetContext<'_>) {}

    /// Key/value view of the widget's state
    fn describe(&self, document: &Document) -> Vec<(&'static str, String)>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
