//! Primary navigation
//!
//! The page header carries a bar of tab buttons, each pointing at a content
//! section (`data-target`) and naming itself for the URL fragment
//! (`data-tab`). The active tab follows three inputs:
//!
//! - explicit selection (tab click, overflow menu entry, keyboard in the menu)
//! - scroll position (scroll-spy)
//! - URL fragment changes (back/forward, edited URL)
//!
//! When the bar no longer fits the header it collapses into a summary button
//! with an overflow menu listing every tab. The layout decision is debounced
//! on resize; the indicator is realigned immediately.
//!
//! # Layout states
//!
//! ```text
//! Collapsed  --(bar wider than header space)-->  Overflowed
//! Overflowed --(bar fits again)-->               Collapsed
//! ```

use std::any::Any;

use serde::{Deserialize, Serialize};
use stylekit_core::events::event_types;
use stylekit_core::fsm::StateMachine;
use stylekit_core::{Event, KeyCode, Listeners, NodeId, Scope, TimerId};
use stylekit_platform::{Document, ScrollOptions};

use crate::context::WidgetContext;
use crate::dropdown::{Dropdown, DropdownConfig};
use crate::indicator::{align, select_exclusive};
use crate::widget::{Widget, WidgetId};

/// Whether scroll-spy changes are written to the URL fragment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollSpyHash {
    /// Leave the fragment alone while scrolling
    #[default]
    Preserve,
    /// Mirror the scroll-derived tab into the fragment
    Update,
}

/// Header layout of the tab bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavLayout {
    /// Full tab bar shown
    Collapsed,
    /// Tab bar hidden behind the summary button and overflow menu
    Overflowed,
}

mod layout_states {
    pub const COLLAPSED: u32 = 0;
    pub const OVERFLOWED: u32 = 1;
}

mod layout_inputs {
    pub const FITS: u32 = 1;
    pub const OVERFLOWS: u32 = 2;
}

const RESIZE_RECHECK: u64 = 1;

/// Navigation configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct NavConfig {
    /// Id of the tab bar
    pub container: String,
    pub tab_class: String,
    pub slider_class: String,
    pub active_class: String,
    /// Id of the element showing the active tab's text
    pub title: String,

    /// Selector of the header whose width bounds the bar
    pub header: String,
    /// Selector of the header part holding the bar
    pub header_left: String,
    /// Selectors of header controls sharing the row with the bar
    pub sibling_controls: Vec<String>,
    /// Fixed paddings and gaps, in px
    pub overflow_reserve: f32,
    pub overflow_class: String,

    /// Id of the summary (hamburger) button
    pub menu_toggle: String,
    /// Id of the overflow menu container
    pub menu: String,
    pub menu_link_class: String,
    pub menu_open_class: String,

    /// Distance below the viewport top at which a section counts as reached
    pub scroll_offset: f32,
    pub resize_debounce_ms: u64,
    pub scroll_spy_hash: ScrollSpyHash,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            container: "wrapper-tabs".to_string(),
            tab_class: "btn-pill".to_string(),
            slider_class: "pill-selector-slider".to_string(),
            active_class: "active".to_string(),
            title: "mobile-nav-title".to_string(),
            header: ".page-header".to_string(),
            header_left: ".header-left".to_string(),
            sibling_controls: vec![".theme-switch-wrapper".to_string()],
            overflow_reserve: 48.0,
            overflow_class: "mobile-mode".to_string(),
            menu_toggle: "btn-mobile-nav".to_string(),
            menu: "mobile-nav-dropdown".to_string(),
            menu_link_class: "mobile-nav-link".to_string(),
            menu_open_class: "is-visible".to_string(),
            scroll_offset: 120.0,
            resize_debounce_ms: 100,
            scroll_spy_hash: ScrollSpyHash::Preserve,
        }
    }
}

struct Header {
    header: NodeId,
    left: NodeId,
    siblings: Vec<String>,
    reserve: f32,
    overflow_class: String,
}

impl Header {
    /// Space left for the bar once sibling controls and paddings are taken
    fn available(&self, document: &Document) -> f32 {
        let siblings: f32 = self
            .siblings
            .iter()
            .filter_map(|s| document.query_selector(s))
            .map(|n| document.offset(n).width)
            .sum();
        document.offset(self.header).width - siblings - self.reserve
    }
}

struct OverflowMenu {
    dropdown: Dropdown,
    links: Vec<NodeId>,
}

/// Primary navigation widget
pub struct Navigation {
    container: NodeId,
    tabs: Vec<NodeId>,
    sections: Vec<Option<NodeId>>,
    slider: Option<NodeId>,
    title: Option<NodeId>,
    header: Option<Header>,
    menu: Option<OverflowMenu>,
    active: usize,
    layout: StateMachine,
    resize_timer: Option<TimerId>,
    active_class: String,
    link_class: String,
    scroll_offset: f32,
    resize_debounce_ms: u64,
    scroll_spy_hash: ScrollSpyHash,
}

impl Navigation {
    pub fn attach(cx: &mut WidgetContext<'_>, config: &NavConfig) -> Option<Self> {
        let container = cx.element(&config.container)?;
        let tabs = cx
            .document
            .query_all_in(container, &format!(".{}", config.tab_class));
        if tabs.is_empty() {
            tracing::debug!(container = %config.container, "navigation has no tabs");
            return None;
        }
        let sections: Vec<Option<NodeId>> = tabs
            .iter()
            .map(|tab| {
                cx.document
                    .attribute(*tab, "data-target")
                    .and_then(|target| cx.document.query_selector(target))
            })
            .collect();
        let slider = cx
            .document
            .query_in(container, &format!(".{}", config.slider_class));
        let title = cx.document.get_element_by_id(&config.title);

        let header = match (
            cx.document.query_selector(&config.header),
            cx.document.query_selector(&config.header_left),
        ) {
            (Some(header), Some(left)) => Some(Header {
                header,
                left,
                siblings: config.sibling_controls.clone(),
                reserve: config.overflow_reserve,
                overflow_class: config.overflow_class.clone(),
            }),
            _ => {
                tracing::debug!("header not found, overflow detection disabled");
                None
            }
        };

        let dropdown_config = DropdownConfig {
            toggle: config.menu_toggle.clone(),
            menu: config.menu.clone(),
            open_class: config.menu_open_class.clone(),
        };
        let menu = Dropdown::attach(cx, &dropdown_config).map(|dropdown| {
            let links = build_menu(cx.document, &dropdown, &tabs, &config.menu_link_class);
            OverflowMenu { dropdown, links }
        });

        let layout = StateMachine::builder(layout_states::COLLAPSED)
            .on(layout_states::COLLAPSED, layout_inputs::OVERFLOWS, layout_states::OVERFLOWED)
            .on(layout_states::OVERFLOWED, layout_inputs::FITS, layout_states::COLLAPSED)
            .build();

        let mut nav = Self {
            container,
            tabs,
            sections,
            slider,
            title,
            header,
            menu,
            active: 0,
            layout,
            resize_timer: None,
            active_class: config.active_class.clone(),
            link_class: config.menu_link_class.clone(),
            scroll_offset: config.scroll_offset,
            resize_debounce_ms: config.resize_debounce_ms,
            scroll_spy_hash: config.scroll_spy_hash,
        };

        nav.check_overflow(cx.document);
        // deep link: the page is already positioned, so no scroll and no new
        // history entry
        let hash = cx.platform.location_hash();
        let initial = nav.tab_named(cx.document, &hash).unwrap_or(0);
        nav.select(cx, initial, false, false);

        tracing::debug!(
            tabs = nav.tabs.len(),
            active = nav.active,
            overflow_menu = nav.menu.is_some(),
            "navigation attached"
        );
        Some(nav)
    }

    pub fn tabs(&self) -> &[NodeId] {
        &self.tabs
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> NodeId {
        self.tabs[self.active]
    }

    /// `data-tab` of the active tab
    pub fn active_name<'d>(&self, document: &'d Document) -> Option<&'d str> {
        document.data(self.active_tab(), "tab")
    }

    pub fn layout(&self) -> NavLayout {
        if self.layout.is_in(layout_states::OVERFLOWED) {
            NavLayout::Overflowed
        } else {
            NavLayout::Collapsed
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(|m| m.dropdown.is_open())
    }

    /// Generated overflow menu entries, one per tab
    pub fn menu_links(&self) -> &[NodeId] {
        match &self.menu {
            Some(menu) => &menu.links,
            None => &[],
        }
    }

    pub fn menu_toggle(&self) -> Option<NodeId> {
        self.menu.as_ref().map(|m| m.dropdown.toggle_node())
    }

    fn tab_named(&self, document: &Document, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.tabs
            .iter()
            .position(|t| document.data(*t, "tab") == Some(name))
    }

    /// Explicit selection: activate, write the fragment and scroll to the section
    pub fn select_tab(&mut self, cx: &mut WidgetContext<'_>, index: usize) {
        self.select(cx, index, true, true);
    }

    fn select(&mut self, cx: &mut WidgetContext<'_>, index: usize, scroll: bool, write_hash: bool) {
        let Some(&tab) = self.tabs.get(index) else {
            return;
        };
        self.active = index;
        select_exclusive(cx.document, &self.tabs, tab, &self.active_class);

        if write_hash {
            self.write_hash(cx);
        }
        if scroll {
            if let Some(section) = self.sections[index] {
                cx.platform
                    .scroll_into_view(cx.document, section, ScrollOptions::smooth_start());
            }
        }
        self.sync_mirror(cx.document);
        self.realign(cx.document);
        tracing::debug!(index, scroll, "navigation tab selected");
    }

    fn write_hash(&self, cx: &mut WidgetContext<'_>) {
        let Some(name) = cx.document.data(self.active_tab(), "tab").map(str::to_string) else {
            return;
        };
        if !name.is_empty() && cx.platform.location_hash() != name {
            cx.platform.set_location_hash(&name);
        }
    }

    /// Reflect the active tab into the title and the overflow menu
    fn sync_mirror(&self, document: &mut Document) {
        let tab = self.active_tab();
        if let Some(title) = self.title {
            let text = document.text(tab).to_string();
            document.set_text(title, &text);
        }
        if let Some(menu) = &self.menu {
            let name = document.data(tab, "tab").map(str::to_string);
            for link in &menu.links {
                let active = name.is_some() && document.data(*link, "tab") == name.as_deref();
                document.toggle_class(*link, &self.active_class, Some(active));
            }
        }
    }

    fn realign(&self, document: &mut Document) {
        if let Some(slider) = self.slider {
            align(document, slider, Some(self.active_tab()));
        }
    }

    /// Index of the tab whose section the reader has scrolled to
    pub fn spied_index(&self, document: &Document) -> usize {
        let mut index = 0;
        for (i, section) in self.sections.iter().enumerate() {
            let Some(section) = section else {
                continue;
            };
            if document.viewport_top(*section) - self.scroll_offset <= 0.0 {
                index = i;
            } else {
                break;
            }
        }
        index
    }

    /// Re-derive the active tab from scroll position without scrolling
    pub fn scroll_spy(&mut self, cx: &mut WidgetContext<'_>) {
        let index = self.spied_index(cx.document);
        tracing::trace!(index, scroll_y = cx.document.scroll_y(), "scroll-spy");
        if index == self.active {
            return;
        }
        self.active = index;
        select_exclusive(cx.document, &self.tabs, self.tabs[index], &self.active_class);
        if self.scroll_spy_hash == ScrollSpyHash::Update {
            self.write_hash(cx);
        }
        self.sync_mirror(cx.document);
        self.realign(cx.document);
    }

    /// Measure the header and switch layout when the bar no longer fits
    pub fn check_overflow(&mut self, document: &mut Document) {
        let Some(header) = &self.header else {
            return;
        };
        let natural = document.scroll_width(header.left);
        let available = header.available(document);
        let overflowing = natural > available;
        document.toggle_class(header.left, &header.overflow_class, Some(overflowing));

        let before = self.layout();
        self.layout.send(if overflowing {
            layout_inputs::OVERFLOWS
        } else {
            layout_inputs::FITS
        });
        let after = self.layout();
        if before != after {
            tracing::debug!(?after, natural, available, "navigation layout changed");
        }

        if after == NavLayout::Collapsed {
            if before == NavLayout::Overflowed {
                if let Some(menu) = &mut self.menu {
                    menu.dropdown.close(document);
                }
            }
            self.realign(document);
        }
    }

    fn activate_link(&mut self, cx: &mut WidgetContext<'_>, index: usize) {
        self.select(cx, index, true, true);
        if let Some(menu) = &mut self.menu {
            menu.dropdown.close(cx.document);
            cx.document.focus(menu.dropdown.toggle_node());
        }
    }

    fn handle_key(&mut self, cx: &mut WidgetContext<'_>, event: &mut Event) {
        let Some(key) = event.key() else {
            return;
        };
        let Some(menu) = &mut self.menu else {
            return;
        };
        if key == KeyCode::ESCAPE {
            menu.dropdown.close(cx.document);
            return;
        }
        if !menu.dropdown.is_open() || menu.links.is_empty() {
            return;
        }

        let count = menu.links.len();
        let focused = cx
            .document
            .focused()
            .and_then(|f| menu.links.iter().position(|l| *l == f));
        let next = match key {
            KeyCode::DOWN => Some(focused.map_or(0, |i| (i + 1) % count)),
            KeyCode::UP => Some(focused.map_or(count - 1, |i| (i + count - 1) % count)),
            KeyCode::HOME => Some(0),
            KeyCode::END => Some(count - 1),
            _ => None,
        };
        if let Some(next) = next {
            event.prevent_default();
            cx.document.focus(menu.links[next]);
            return;
        }

        if key.is_activation() {
            if let Some(index) = focused {
                event.prevent_default();
                self.activate_link(cx, index);
            }
        }
    }

    fn schedule_recheck(&mut self, cx: &mut WidgetContext<'_>) {
        if let Some(timer) = self.resize_timer.take() {
            cx.cancel(timer);
        }
        self.resize_timer = Some(cx.schedule(self.resize_debounce_ms, RESIZE_RECHECK));
    }
}

/// Replace the overflow menu's children with one entry per tab
fn build_menu(document: &mut Document, dropdown: &Dropdown, tabs: &[NodeId], class: &str) -> Vec<NodeId> {
    let menu = dropdown.menu_node();
    document.remove_children(menu);
    tabs.iter()
        .map(|tab| {
            let link = document.create_element("button");
            document.add_class(link, class);
            document.set_attribute(link, "type", "button");
            if let Some(name) = document.data(*tab, "tab").map(str::to_string) {
                document.set_attribute(link, "data-tab", &name);
            }
            let text = document.text(*tab).to_string();
            document.set_text(link, &text);
            document.append_child(menu, link);
            link
        })
        .collect()
}

impl Widget for Navigation {
    fn kind(&self) -> &'static str {
        "navigation"
    }

    fn listen(&self, id: WidgetId, listeners: &mut Listeners<WidgetId>) {
        for tab in &self.tabs {
            listeners.register(id, Scope::Node(*tab), event_types::CLICK);
        }
        listeners.register(id, Scope::Window, event_types::SCROLL);
        listeners.register(id, Scope::Window, event_types::RESIZE);
        listeners.register(id, Scope::Window, event_types::HASH_CHANGE);
        if let Some(menu) = &self.menu {
            menu.dropdown.register(id, listeners);
            listeners.register(id, Scope::Node(menu.dropdown.menu_node()), event_types::CLICK);
            listeners.register(id, Scope::Document, event_types::KEY_DOWN);
        }
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &mut Event) {
        if let Some(menu) = &mut self.menu {
            if menu.dropdown.handle(cx.document, event) {
                return;
            }
        }

        match (event.event_type, event.current) {
            (event_types::CLICK, Scope::Node(node)) => {
                if let Some(index) = self.tabs.iter().position(|t| *t == node) {
                    event.prevent_default();
                    self.select_tab(cx, index);
                    return;
                }
                let link = event
                    .target
                    .and_then(|t| cx.document.closest_with_class(t, &self.link_class, node));
                let index = link.and_then(|l| self.menu_links().iter().position(|m| *m == l));
                if let Some(index) = index {
                    self.activate_link(cx, index);
                }
            }
            (event_types::KEY_DOWN, _) => self.handle_key(cx, event),
            (event_types::SCROLL, _) => self.scroll_spy(cx),
            (event_types::RESIZE, _) => {
                self.realign(cx.document);
                self.schedule_recheck(cx);
            }
            (event_types::HASH_CHANGE, _) => {
                let hash = cx.platform.location_hash();
                if let Some(index) = self.tab_named(cx.document, &hash) {
                    if index != self.active {
                        self.select(cx, index, true, false);
                    }
                }
                self.sync_mirror(cx.document);
            }
            _ => {}
        }
    }

    fn on_timer(&mut self, cx: &mut WidgetContext<'_>, token: u64) {
        if token == RESIZE_RECHECK {
            self.resize_timer = None;
            self.check_overflow(cx.document);
        }
    }

    fn describe(&self, document: &Document) -> Vec<(&'static str, String)> {
        vec![
            (
                "active",
                self.active_name(document).unwrap_or_default().to_string(),
            ),
            ("layout", format!("{:?}", self.layout()).to_lowercase()),
            ("menu_open", self.is_menu_open().to_string()),
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
    use stylekit_core::{Rect, TimerQueue};
    use stylekit_platform::{HeadlessPlatform, Platform};

    use crate::indicator::current_box;
    use crate::modal::ModalStack;

    const TABS: [&str; 3] = ["intro", "colors", "forms"];

    fn page() -> Document {
        let mut doc = Document::new();
        doc.set_viewport(1280.0, 800.0);
        let body = doc.body();

        let header = doc.create_element("header");
        doc.add_class(header, "page-header");
        doc.set_offset(header, Rect::new(0.0, 0.0, 1280.0, 64.0));
        let left = doc.create_element("div");
        doc.add_class(left, "header-left");
        doc.set_scroll_width(left, 600.0);
        let bar = doc.create_element("nav");
        doc.set_id(bar, "wrapper-tabs");
        doc.append_child(body, header);
        doc.append_child(header, left);
        doc.append_child(left, bar);

        for (i, name) in TABS.into_iter().enumerate() {
            let tab = doc.create_element("button");
            doc.add_class(tab, "btn-pill");
            doc.set_attribute(tab, "data-tab", name);
            doc.set_attribute(tab, "data-target", &format!("#{name}"));
            doc.set_text(tab, &name.to_uppercase());
            doc.set_offset(tab, Rect::new(100.0 * i as f32, 0.0, 96.0, 32.0));
            doc.append_child(bar, tab);

            let section = doc.create_element("section");
            doc.set_id(section, name);
            doc.set_page_top(section, 1000.0 * i as f32);
            doc.append_child(body, section);
        }
        let slider = doc.create_element("span");
        doc.add_class(slider, "pill-selector-slider");
        doc.append_child(bar, slider);

        let toggle = doc.create_element("button");
        doc.set_id(toggle, "btn-mobile-nav");
        let menu = doc.create_element("div");
        doc.set_id(menu, "mobile-nav-dropdown");
        let title = doc.create_element("span");
        doc.set_id(title, "mobile-nav-title");
        doc.append_child(header, toggle);
        doc.append_child(header, menu);
        doc.append_child(toggle, title);
        doc
    }

    struct Harness {
        doc: Document,
        platform: HeadlessPlatform,
        timers: TimerQueue<WidgetId>,
        modals: ModalStack,
    }

    impl Harness {
        fn new(platform: HeadlessPlatform) -> Self {
            Self {
                doc: page(),
                platform,
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
                id: WidgetId(3),
            }
        }

        fn attach(&mut self) -> Navigation {
            Navigation::attach(&mut self.cx(), &NavConfig::default()).unwrap()
        }
    }

    #[test]
    fn test_attach_builds_menu_and_selects_first() {
        let mut h = Harness::new(HeadlessPlatform::new());
        let nav = h.attach();

        assert_eq!(nav.active_index(), 0);
        assert_eq!(nav.menu_links().len(), 3);
        let first = nav.menu_links()[0];
        assert!(h.doc.has_class(first, "mobile-nav-link"));
        assert!(h.doc.has_class(first, "active"));
        assert_eq!(h.doc.text(first), "INTRO");
        let title = h.doc.get_element_by_id("mobile-nav-title").unwrap();
        assert_eq!(h.doc.text(title), "INTRO");
        // no history entry and no scroll on load
        assert!(h.platform.hash_history().is_empty());
        assert!(h.platform.scroll_requests().is_empty());
    }

    #[test]
    fn test_deep_link_selects_named_tab() {
        let mut h = Harness::new(HeadlessPlatform::new().with_hash("#forms"));
        let nav = h.attach();

        assert_eq!(nav.active_name(&h.doc), Some("forms"));
        let slider = h.doc.query_selector(".pill-selector-slider").unwrap();
        assert_eq!(current_box(&h.doc, slider).unwrap().x, 200.0);
    }

    #[test]
    fn test_unknown_hash_falls_back_to_first() {
        let mut h = Harness::new(HeadlessPlatform::new().with_hash("#nowhere"));
        let nav = h.attach();

        assert_eq!(nav.active_index(), 0);
    }

    #[test]
    fn test_select_tab_writes_hash_and_scrolls() {
        let mut h = Harness::new(HeadlessPlatform::new());
        let mut nav = h.attach();

        nav.select_tab(&mut h.cx(), 1);

        assert_eq!(h.platform.location_hash(), "colors");
        assert_eq!(h.doc.scroll_y(), 1000.0);
        assert_eq!(h.platform.scroll_requests().len(), 1);
        assert!(h.doc.has_class(nav.tabs()[1], "active"));
        assert!(!h.doc.has_class(nav.tabs()[0], "active"));
    }

    #[test]
    fn test_scroll_spy_uses_offset_and_keeps_hash() {
        let mut h = Harness::new(HeadlessPlatform::new());
        let mut nav = h.attach();

        h.doc.set_scroll_y(870.0);
        nav.scroll_spy(&mut h.cx());
        assert_eq!(nav.active_index(), 0);

        h.doc.set_scroll_y(880.0);
        nav.scroll_spy(&mut h.cx());
        assert_eq!(nav.active_index(), 1);
        assert!(h.platform.hash_history().is_empty());
        assert!(h.platform.scroll_requests().is_empty());
    }

    #[test]
    fn test_scroll_spy_hash_update_policy() {
        let mut h = Harness::new(HeadlessPlatform::new());
        let config = NavConfig {
            scroll_spy_hash: ScrollSpyHash::Update,
            ..NavConfig::default()
        };
        let mut nav = Navigation::attach(&mut h.cx(), &config).unwrap();

        h.doc.set_scroll_y(2500.0);
        nav.scroll_spy(&mut h.cx());

        assert_eq!(h.platform.location_hash(), "forms");
    }

    #[test]
    fn test_overflow_toggles_without_hysteresis() {
        let mut h = Harness::new(HeadlessPlatform::new());
        let mut nav = h.attach();
        let header = h.doc.query_selector(".page-header").unwrap();
        let left = h.doc.query_selector(".header-left").unwrap();
        assert_eq!(nav.layout(), NavLayout::Collapsed);

        h.doc.set_offset(header, Rect::new(0.0, 0.0, 600.0, 64.0));
        nav.check_overflow(&mut h.doc);
        assert_eq!(nav.layout(), NavLayout::Overflowed);
        assert!(h.doc.has_class(left, "mobile-mode"));

        // 648 - 48 leaves exactly the natural width
        h.doc.set_offset(header, Rect::new(0.0, 0.0, 648.0, 64.0));
        nav.check_overflow(&mut h.doc);
        assert_eq!(nav.layout(), NavLayout::Collapsed);
        assert!(!h.doc.has_class(left, "mobile-mode"));
    }

    #[test]
    fn test_keyboard_cycles_and_activates() {
        let mut h = Harness::new(HeadlessPlatform::new());
        let mut nav = h.attach();
        let toggle = nav.menu_toggle().unwrap();
        let links = nav.menu_links().to_vec();

        let mut click = Event::click(toggle);
        click.current = Scope::Node(toggle);
        nav.handle_event(&mut h.cx(), &mut click);
        assert!(nav.is_menu_open());

        let press = |nav: &mut Navigation, h: &mut Harness, key: KeyCode| {
            let mut event = Event::key_down(h.doc.focused(), key);
            event.current = Scope::Document;
            nav.handle_event(&mut h.cx(), &mut event);
            event
        };

        let event = press(&mut nav, &mut h, KeyCode::UP);
        assert!(event.default_prevented);
        assert_eq!(h.doc.focused(), Some(links[2]));
        press(&mut nav, &mut h, KeyCode::DOWN);
        assert_eq!(h.doc.focused(), Some(links[0]));
        press(&mut nav, &mut h, KeyCode::END);
        assert_eq!(h.doc.focused(), Some(links[2]));
        press(&mut nav, &mut h, KeyCode::HOME);
        press(&mut nav, &mut h, KeyCode::DOWN);
        assert_eq!(h.doc.focused(), Some(links[1]));

        press(&mut nav, &mut h, KeyCode::ENTER);
        assert_eq!(nav.active_index(), 1);
        assert!(!nav.is_menu_open());
        assert_eq!(h.doc.focused(), Some(toggle));
        assert_eq!(h.platform.location_hash(), "colors");
    }

    #[test]
    fn test_escape_closes_menu() {
        let mut h = Harness::new(HeadlessPlatform::new());
        let mut nav = h.attach();
        let toggle = nav.menu_toggle().unwrap();

        let mut click = Event::click(toggle);
        click.current = Scope::Node(toggle);
        nav.handle_event(&mut h.cx(), &mut click);

        let mut escape = Event::key_down(None, KeyCode::ESCAPE);
        escape.current = Scope::Document;
        nav.handle_event(&mut h.cx(), &mut escape);

        assert!(!nav.is_menu_open());
    }

    #[test]
    fn test_hash_change_selects_known_tab() {
        let mut h = Harness::new(HeadlessPlatform::new());
        let mut nav = h.attach();

        h.platform.navigate_hash("#forms");
        nav.handle_event(&mut h.cx(), &mut Event::window(event_types::HASH_CHANGE));
        assert_eq!(nav.active_index(), 2);
        assert_eq!(h.doc.scroll_y(), 2000.0);

        h.platform.navigate_hash("#bogus");
        nav.handle_event(&mut h.cx(), &mut Event::window(event_types::HASH_CHANGE));
        assert_eq!(nav.active_index(), 2);
    }
}
