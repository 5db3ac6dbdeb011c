//! Event routing
//!
//! Events travel along a bubbling path: the target node, each ancestor, the
//! document, then the window. Listeners are registered explicitly against a
//! [`Scope`] and an [`EventType`] and are owned by a key (usually a widget
//! id), so everything a widget installed can be removed in one call.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::node::NodeId;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const CLICK: EventType = 1;
    pub const POINTER_DOWN: EventType = 2;
    pub const POINTER_UP: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const KEY_DOWN: EventType = 20;
    /// Value of a form control changed while interacting
    pub const INPUT: EventType = 30;
    /// Committed change of a form control (checkbox toggled)
    pub const CHANGE: EventType = 31;
    pub const SCROLL: EventType = 40;
    pub const RESIZE: EventType = 41;
    pub const HASH_CHANGE: EventType = 50;
    /// OS light/dark preference changed
    pub const COLOR_SCHEME_CHANGE: EventType = 51;

    /// Human-readable name, used in logs
    pub fn name(event_type: EventType) -> &'static str {
        match event_type {
            CLICK => "click",
            POINTER_DOWN => "pointerdown",
            POINTER_UP => "pointerup",
            POINTER_ENTER => "pointerenter",
            POINTER_LEAVE => "pointerleave",
            KEY_DOWN => "keydown",
            INPUT => "input",
            CHANGE => "change",
            SCROLL => "scroll",
            RESIZE => "resize",
            HASH_CHANGE => "hashchange",
            COLOR_SCHEME_CHANGE => "colorschemechange",
            _ => "unknown",
        }
    }
}

/// Where a listener is attached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Node(NodeId),
    Document,
    Window,
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    /// Node the event originated from (`None` for window-level events)
    pub target: Option<NodeId>,
    /// Scope whose listeners are currently running
    pub current: Scope,
    pub data: EventData,
    pub timestamp: u64,
    /// Dispatch sequence number, unique per delivered event
    pub serial: u64,
    pub propagation_stopped: bool,
    pub default_prevented: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
        button: u8,
    },
    Key {
        key: KeyCode,
        repeat: bool,
    },
    ColorScheme {
        dark: bool,
    },
    None,
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);

    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    pub const HOME: KeyCode = KeyCode(0x24);
    pub const END: KeyCode = KeyCode(0x23);

    pub const UNKNOWN: KeyCode = KeyCode(0);

    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> KeyCode {
        match name {
            "Tab" => Self::TAB,
            "Enter" => Self::ENTER,
            "Escape" | "Esc" => Self::ESCAPE,
            " " | "Space" | "Spacebar" => Self::SPACE,
            "ArrowLeft" => Self::LEFT,
            "ArrowUp" => Self::UP,
            "ArrowRight" => Self::RIGHT,
            "ArrowDown" => Self::DOWN,
            "Home" => Self::HOME,
            "End" => Self::END,
            _ => Self::UNKNOWN,
        }
    }

    /// Keys that activate a focused button
    pub fn is_activation(self) -> bool {
        self == Self::ENTER || self == Self::SPACE
    }
}

impl Event {
    pub fn new(event_type: EventType, target: Option<NodeId>, data: EventData) -> Self {
        Self {
            event_type,
            target,
            current: Scope::Window,
            data,
            timestamp: 0,
            serial: 0,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Primary-button click on a node
    pub fn click(target: NodeId) -> Self {
        Self::new(
            event_types::CLICK,
            Some(target),
            EventData::Pointer {
                x: 0.0,
                y: 0.0,
                button: 0,
            },
        )
    }

    /// Key press delivered to a node (usually the focused element)
    pub fn key_down(target: Option<NodeId>, key: KeyCode) -> Self {
        Self::new(
            event_types::KEY_DOWN,
            target,
            EventData::Key { key, repeat: false },
        )
    }

    /// Pointer event without coordinates
    pub fn pointer(event_type: EventType, target: NodeId) -> Self {
        Self::new(
            event_type,
            Some(target),
            EventData::Pointer {
                x: 0.0,
                y: 0.0,
                button: 0,
            },
        )
    }

    /// Event with no node target (scroll, resize, hash change)
    pub fn window(event_type: EventType) -> Self {
        Self::new(event_type, None, EventData::None)
    }

    pub fn color_scheme(dark: bool) -> Self {
        Self::new(
            event_types::COLOR_SCHEME_CHANGE,
            None,
            EventData::ColorScheme { dark },
        )
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn key(&self) -> Option<KeyCode> {
        match self.data {
            EventData::Key { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

new_key_type! {
    /// Handle to a registered listener
    pub struct ListenerId;
}

struct Listener<K> {
    scope: Scope,
    event_type: EventType,
    owner: K,
}

/// Registry of listeners keyed by scope and event type
pub struct Listeners<K> {
    listeners: SlotMap<ListenerId, Listener<K>>,
    index: FxHashMap<(Scope, EventType), SmallVec<[ListenerId; 4]>>,
}

impl<K: Copy + Eq> Listeners<K> {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            index: FxHashMap::default(),
        }
    }

    /// Register a listener for `owner`
    pub fn register(&mut self, owner: K, scope: Scope, event_type: EventType) -> ListenerId {
        let id = self.listeners.insert(Listener {
            scope,
            event_type,
            owner,
        });
        self.index.entry((scope, event_type)).or_default().push(id);
        id
    }

    /// Remove a single listener
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(id) else {
            return false;
        };
        let key = (listener.scope, listener.event_type);
        if let Some(ids) = self.index.get_mut(&key) {
            ids.retain(|l| *l != id);
            if ids.is_empty() {
                self.index.remove(&key);
            }
        }
        true
    }

    /// Remove every listener registered by `owner`, returning how many were removed
    pub fn remove_owner(&mut self, owner: K) -> usize {
        let ids: Vec<ListenerId> = self
            .listeners
            .iter()
            .filter(|(_, l)| l.owner == owner)
            .map(|(id, _)| id)
            .collect();
        for id in &ids {
            self.unregister(*id);
        }
        ids.len()
    }

    /// Listeners to invoke for an event travelling along `path`, in delivery order
    pub fn route(&self, path: &[Scope], event_type: EventType) -> Vec<(Scope, K)> {
        let mut route = Vec::new();
        for scope in path {
            if let Some(ids) = self.index.get(&(*scope, event_type)) {
                route.extend(
                    ids.iter()
                        .filter_map(|id| self.listeners.get(*id))
                        .map(|l| (*scope, l.owner)),
                );
            }
        }
        route
    }

    /// Number of listeners registered by `owner`
    pub fn count_for(&self, owner: K) -> usize {
        self.listeners.values().filter(|l| l.owner == owner).count()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<K: Copy + Eq> Default for Listeners<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn node(n: u64) -> NodeId {
        NodeId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn test_route_follows_path_order() {
        let mut listeners: Listeners<u32> = Listeners::new();
        let target = node(1);
        listeners.register(1, Scope::Window, event_types::CLICK);
        listeners.register(2, Scope::Document, event_types::CLICK);
        listeners.register(3, Scope::Node(target), event_types::CLICK);

        let path = [Scope::Node(target), Scope::Document, Scope::Window];
        let owners: Vec<u32> = listeners
            .route(&path, event_types::CLICK)
            .into_iter()
            .map(|(_, owner)| owner)
            .collect();
        assert_eq!(owners, vec![3, 2, 1]);
    }

    #[test]
    fn test_route_filters_event_type() {
        let mut listeners: Listeners<u32> = Listeners::new();
        listeners.register(1, Scope::Document, event_types::KEY_DOWN);

        assert!(listeners
            .route(&[Scope::Document], event_types::CLICK)
            .is_empty());
    }

    #[test]
    fn test_remove_owner() {
        let mut listeners: Listeners<u32> = Listeners::new();
        listeners.register(1, Scope::Document, event_types::CLICK);
        listeners.register(1, Scope::Window, event_types::RESIZE);
        listeners.register(2, Scope::Document, event_types::CLICK);

        assert_eq!(listeners.remove_owner(1), 2);
        assert_eq!(listeners.len(), 1);
        assert_eq!(listeners.count_for(1), 0);
        assert_eq!(
            listeners.route(&[Scope::Document], event_types::CLICK),
            vec![(Scope::Document, 2)]
        );
    }

    #[test]
    fn test_unregister_single() {
        let mut listeners: Listeners<u32> = Listeners::new();
        let id = listeners.register(1, Scope::Document, event_types::CLICK);

        assert!(listeners.unregister(id));
        assert!(!listeners.unregister(id));
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_key_names() {
        assert_eq!(KeyCode::from_key_name("ArrowDown"), KeyCode::DOWN);
        assert_eq!(KeyCode::from_key_name(" "), KeyCode::SPACE);
        assert_eq!(KeyCode::from_key_name("q"), KeyCode::UNKNOWN);
        assert!(KeyCode::ENTER.is_activation());
        assert!(!KeyCode::ESCAPE.is_activation());
    }
}
