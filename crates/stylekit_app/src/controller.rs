//! Page controller
//!
//! The controller is the only owner of page state: the document, the
//! platform services, the listener registry, the timer queue and every
//! mounted widget. Hosts feed it events and clock advances; widgets only see
//! a [`WidgetContext`] for the duration of one callback.

use std::collections::BTreeMap;

use stylekit_core::events::event_types;
use stylekit_core::{Event, EventData, EventType, KeyCode, Listeners, NodeId, Scope, TimerQueue};
use stylekit_platform::{Document, HeadlessPlatform, Platform, PlatformError};
use stylekit_widgets::{
    Dropdown, FilledTrackSlider, Modal, ModalStack, MotionDemo, Navigation, PillSelector, SwatchBoard,
    Tabs, ThemeSwitch, ValueLabelSlider, Widget, WidgetContext, WidgetId,
};

use crate::config::ControllerConfig;

/// Owner of the document, platform services and mounted widgets
pub struct Controller<P: Platform + 'static = HeadlessPlatform> {
    document: Document,
    platform: P,
    listeners: Listeners<WidgetId>,
    timers: TimerQueue<WidgetId>,
    modals: ModalStack,
    widgets: BTreeMap<WidgetId, Box<dyn Widget>>,
    next_id: u64,
    next_serial: u64,
}

impl<P: Platform + 'static> Controller<P> {
    /// Controller with no widgets mounted
    pub fn new(document: Document, platform: P) -> Self {
        Self {
            document,
            platform,
            listeners: Listeners::new(),
            timers: TimerQueue::new(),
            modals: ModalStack::new(),
            widgets: BTreeMap::new(),
            next_id: 1,
            next_serial: 1,
        }
    }

    /// Build a controller and wire every configured widget
    ///
    /// Widgets whose elements are missing are skipped; the rest of the page
    /// still mounts.
    pub fn mount(document: Document, platform: P, config: &ControllerConfig) -> Self {
        let mut controller = Self::new(document, platform);

        controller.attach(|cx| ThemeSwitch::attach(cx, &config.theme));
        for modal in &config.modals {
            controller.attach(|cx| Modal::attach(cx, modal));
        }
        for dropdown in &config.dropdowns {
            controller.attach(|cx| Dropdown::attach(cx, dropdown));
        }
        controller.attach(|cx| Tabs::attach(cx, &config.tabs));
        for pill in &config.pills {
            controller.attach(|cx| PillSelector::attach(cx, pill));
        }
        controller.attach(|cx| ValueLabelSlider::attach(cx, &config.sliders.value_label));
        controller.attach(|cx| FilledTrackSlider::attach(cx, &config.sliders.filled));
        controller.attach(|cx| SwatchBoard::attach(cx, &config.swatches));
        controller.attach(|cx| Navigation::attach(cx, &config.navigation));
        controller.attach(|cx| MotionDemo::attach(cx, &config.motion));

        tracing::info!(
            widgets = controller.widgets.len(),
            listeners = controller.listeners.len(),
            "page controller mounted"
        );
        controller
    }

    /// Attach one widget; `None` when its elements are missing
    pub fn attach<W, F>(&mut self, build: F) -> Option<WidgetId>
    where
        W: Widget,
        F: FnOnce(&mut WidgetContext<'_>) -> Option<W>,
    {
        let id = WidgetId(self.next_id);
        self.next_id += 1;

        let mut cx = WidgetContext {
            document: &mut self.document,
            platform: &mut self.platform,
            timers: &mut self.timers,
            modals: &mut self.modals,
            id,
        };
        let widget = build(&mut cx)?;
        widget.listen(id, &mut self.listeners);
        tracing::debug!(%id, kind = widget.kind(), "widget attached");
        self.widgets.insert(id, Box::new(widget));
        Some(id)
    }

    /// Unregister a widget's listeners, cancel its timers and drop it
    pub fn teardown(&mut self, id: WidgetId) -> bool {
        let Some(mut widget) = self.widgets.remove(&id) else {
            return false;
        };
        let removed = self.listeners.remove_owner(id);
        self.timers.cancel_owner(id);
        let mut cx = WidgetContext {
            document: &mut self.document,
            platform: &mut self.platform,
            timers: &mut self.timers,
            modals: &mut self.modals,
            id,
        };
        widget.teardown(&mut cx);
        tracing::debug!(%id, kind = widget.kind(), listeners = removed, "widget torn down");
        true
    }

    /// Tear down every widget
    pub fn shutdown(&mut self) {
        let ids: Vec<WidgetId> = self.widgets.keys().copied().collect();
        for id in ids {
            self.teardown(id);
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Host access for geometry, scroll and value changes
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn listeners(&self) -> &Listeners<WidgetId> {
        &self.listeners
    }

    pub fn modals(&self) -> &ModalStack {
        &self.modals
    }

    /// Current clock value in milliseconds
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Number of timers still pending
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Mounted widgets in mount order
    pub fn widgets(&self) -> impl Iterator<Item = (WidgetId, &dyn Widget)> + '_ {
        self.widgets.iter().map(|(id, w)| (*id, w.as_ref()))
    }

    /// First mounted widget of type `W`
    pub fn find<W: Widget>(&self) -> Option<WidgetId> {
        self.widgets
            .iter()
            .find(|(_, w)| w.as_any().is::<W>())
            .map(|(id, _)| *id)
    }

    pub fn widget<W: Widget>(&self, id: WidgetId) -> Option<&W> {
        self.widgets.get(&id)?.as_any().downcast_ref::<W>()
    }

    /// Run `f` against a mounted widget with a live context
    pub fn with_widget<W, R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut W, &mut WidgetContext<'_>) -> R,
    ) -> Option<R>
    where
        W: Widget,
    {
        let widget = self.widgets.get_mut(&id)?.as_any_mut().downcast_mut::<W>()?;
        let mut cx = WidgetContext {
            document: &mut self.document,
            platform: &mut self.platform,
            timers: &mut self.timers,
            modals: &mut self.modals,
            id,
        };
        Some(f(widget, &mut cx))
    }

    // ========== Dispatch ==========

    fn propagation_path(&self, event: &Event) -> Vec<Scope> {
        match event.target {
            Some(target) if self.document.contains_node(target) => {
                let mut path = vec![Scope::Node(target)];
                path.extend(self.document.ancestors(target).into_iter().map(Scope::Node));
                path.push(Scope::Document);
                path.push(Scope::Window);
                path
            }
            _ if is_window_event(event.event_type) => vec![Scope::Window],
            _ => vec![Scope::Document, Scope::Window],
        }
    }

    /// Deliver an event along its bubbling path and return it with the
    /// propagation and default flags the listeners left behind
    pub fn dispatch(&mut self, mut event: Event) -> Event {
        event.timestamp = self.timers.now();
        event.serial = self.next_serial;
        self.next_serial += 1;
        let path = self.propagation_path(&event);
        let route = self.listeners.route(&path, event.event_type);
        tracing::trace!(
            event = event_types::name(event.event_type),
            listeners = route.len(),
            "dispatch"
        );

        for (scope, owner) in route {
            if event.propagation_stopped {
                break;
            }
            // an earlier listener may have torn this widget down
            let Some(widget) = self.widgets.get_mut(&owner) else {
                continue;
            };
            event.current = scope;
            let mut cx = WidgetContext {
                document: &mut self.document,
                platform: &mut self.platform,
                timers: &mut self.timers,
                modals: &mut self.modals,
                id: owner,
            };
            widget.handle_event(&mut cx, &mut event);
        }
        event
    }

    /// Advance the clock by `ms`, firing every timer that comes due
    pub fn advance(&mut self, ms: u64) {
        let until = self.timers.now().saturating_add(ms);
        while let Some(fired) = self.timers.pop_due(until) {
            let Some(widget) = self.widgets.get_mut(&fired.owner) else {
                continue;
            };
            let mut cx = WidgetContext {
                document: &mut self.document,
                platform: &mut self.platform,
                timers: &mut self.timers,
                modals: &mut self.modals,
                id: fired.owner,
            };
            widget.on_timer(&mut cx, fired.token);
        }
        self.timers.settle(until);
    }

    // ========== Host input ==========

    pub fn click(&mut self, node: NodeId) -> Event {
        self.dispatch(Event::click(node))
    }

    /// Click the element with the given id
    pub fn click_id(&mut self, id: &str) -> Result<Event, PlatformError> {
        let node = self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| PlatformError::UnknownElement(id.to_string()))?;
        Ok(self.click(node))
    }

    pub fn focus(&mut self, node: NodeId) {
        self.document.focus(node);
    }

    /// Press a key on the focused element (the document when nothing is focused)
    pub fn press(&mut self, key: KeyCode) -> Event {
        let target = self.document.focused();
        self.dispatch(Event::key_down(target, key))
    }

    pub fn pointer(&mut self, event_type: EventType, node: NodeId) -> Event {
        self.dispatch(Event::pointer(event_type, node))
    }

    /// Set a form control's value and fire `input`
    pub fn input(&mut self, node: NodeId, value: &str) -> Event {
        self.document.set_value(node, value);
        self.dispatch(Event::new(event_types::INPUT, Some(node), EventData::None))
    }

    /// Flip a checkbox and fire `change`
    pub fn toggle_checkbox(&mut self, node: NodeId) -> Event {
        let checked = !self.document.checked(node);
        self.document.set_checked(node, checked);
        self.dispatch(Event::new(event_types::CHANGE, Some(node), EventData::None))
    }

    /// Scroll the page to `y` and fire `scroll`
    pub fn scroll_to(&mut self, y: f32) -> Event {
        self.document.set_scroll_y(y);
        self.dispatch(Event::window(event_types::SCROLL))
    }

    /// Resize the viewport and fire `resize`; element geometry is expected to
    /// have been updated by the host already
    pub fn resize(&mut self, width: f32, height: f32) -> Event {
        self.document.set_viewport(width, height);
        self.dispatch(Event::window(event_types::RESIZE))
    }

    /// Fire `hashchange` after the host changed the URL fragment
    pub fn hash_changed(&mut self) -> Event {
        self.dispatch(Event::window(event_types::HASH_CHANGE))
    }

    /// Fire an OS colour-scheme change
    pub fn system_scheme_changed(&mut self, dark: bool) -> Event {
        self.dispatch(Event::color_scheme(dark))
    }
}

impl Controller<HeadlessPlatform> {
    /// Simulate the user editing the URL fragment or navigating history
    pub fn navigate_hash(&mut self, hash: &str) -> Event {
        self.platform.navigate_hash(hash);
        self.hash_changed()
    }

    /// Flip the OS preference and notify widgets
    pub fn set_prefers_dark(&mut self, dark: bool) -> Event {
        self.platform.set_prefers_dark(dark);
        self.system_scheme_changed(dark)
    }
}

fn is_window_event(event_type: EventType) -> bool {
    matches!(
        event_type,
        event_types::SCROLL
            | event_types::RESIZE
            | event_types::HASH_CHANGE
            | event_types::COLOR_SCHEME_CHANGE
    )
}
