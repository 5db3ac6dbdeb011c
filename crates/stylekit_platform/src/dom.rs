//! In-memory document tree
//!
//! The tree mirrors the parts of the DOM that widgets touch: identity
//! (tag, id, classes), attributes, inline style, text, form-control state and
//! the geometry the layout engine reports. Geometry is written by the host;
//! widgets only read it.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;
use stylekit_core::{NodeId, Rect};

use crate::selector::Selector;

/// Geometry reported by the layout engine for one element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    /// Box relative to the offset parent (`offsetLeft/Top/Width/Height`)
    pub offset: Rect,
    /// Top edge in page coordinates (independent of scrolling)
    pub page_top: f32,
    /// Natural content width (`scrollWidth`); `0` means "same as offset width"
    pub scroll_width: f32,
}

#[derive(Debug, Default)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 4]>,
    /// `classes` joined the way the `class` attribute reads
    class_attr: String,
    attributes: FxHashMap<String, String>,
    style: FxHashMap<String, String>,
    text: String,
    value: Option<String>,
    checked: bool,
    computed_background: Option<String>,
    layout: Layout,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn sync_class_attr(&mut self) {
        self.class_attr = self.classes.join(" ");
    }

    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }
}

/// The element tree plus viewport state
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    body: NodeId,
    ids: FxHashMap<String, NodeId>,
    scroll_y: f32,
    viewport: (f32, f32),
    focused: Option<NodeId>,
}

impl Document {
    /// Create a document containing `<html><body></body></html>`
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("html"));
        let body = nodes.insert(Node::new("body"));
        nodes[root].children.push(body);
        nodes[body].parent = Some(root);
        Self {
            nodes,
            root,
            body,
            ids: FxHashMap::default(),
            scroll_y: 0.0,
            viewport: (0.0, 0.0),
            focused: None,
        }
    }

    /// The `<html>` element
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ========== Tree ==========

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Node::new(tag))
    }

    /// Append `child` to `parent`, detaching it from any previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if parent == child
            || !self.contains_node(parent)
            || !self.contains_node(child)
            || self.contains(child, parent)
        {
            return false;
        }
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        true
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes.get_mut(node).and_then(|n| n.parent.take()) {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|c| *c != node);
            }
        }
    }

    /// Remove and destroy every child of `node`
    pub fn remove_children(&mut self, node: NodeId) {
        let Some(children) = self.nodes.get_mut(node).map(|n| std::mem::take(&mut n.children))
        else {
            return;
        };
        let mut stack = children;
        while let Some(id) = stack.pop() {
            if let Some(removed) = self.nodes.remove(id) {
                if let Some(dom_id) = removed.id {
                    if self.ids.get(&dom_id) == Some(&id) {
                        self.ids.remove(&dom_id);
                    }
                }
                if self.focused == Some(id) {
                    self.focused = None;
                }
                stack.extend(removed.children);
            }
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Ancestors of `node`, nearest first
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(id) = current {
            out.push(id);
            current = self.parent(id);
        }
        out
    }

    /// Inclusive containment, like `Node.contains`
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor == node || self.ancestors(node).contains(&ancestor)
    }

    /// Descendants of `root` in document order, excluding `root`
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    // ========== Queries ==========

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        let Some(n) = self.nodes.get(node) else {
            return false;
        };
        match selector {
            Selector::Id(id) => n.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => n.classes.iter().any(|c| c == class),
            Selector::Tag(tag) => n.tag == *tag,
        }
    }

    /// First element in the whole document matching `selector`
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        match Selector::parse(selector)? {
            Selector::Id(id) => self.get_element_by_id(&id),
            parsed => self
                .descendants(self.root)
                .into_iter()
                .find(|n| self.matches(*n, &parsed)),
        }
    }

    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_all_in(self.root, selector)
    }

    /// First descendant of `root` matching `selector`
    pub fn query_in(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        let parsed = Selector::parse(selector)?;
        self.descendants(root)
            .into_iter()
            .find(|n| self.matches(*n, &parsed))
    }

    /// Every descendant of `root` matching `selector`, in document order
    pub fn query_all_in(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(parsed) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.descendants(root)
            .into_iter()
            .filter(|n| self.matches(*n, &parsed))
            .collect()
    }

    /// Nearest inclusive ancestor of `node` carrying `class`, stopping at `limit`
    pub fn closest_with_class(&self, node: NodeId, class: &str, limit: NodeId) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.has_class(id, class) {
                return Some(id);
            }
            if id == limit {
                return None;
            }
            current = self.parent(id);
        }
        None
    }

    // ========== Identity ==========

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.tag.as_str())
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node)?.id.as_deref()
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        let Some(n) = self.nodes.get_mut(node) else {
            return;
        };
        if let Some(old) = n.id.replace(id.to_string()) {
            if self.ids.get(&old) == Some(&node) {
                self.ids.remove(&old);
            }
        }
        self.ids.insert(id.to_string(), node);
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.nodes
            .get(node)
            .map(|n| n.classes.as_slice())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
                n.sync_class_attr();
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.classes.retain(|c| c != class);
            n.sync_class_attr();
        }
    }

    /// `classList.toggle`: flip, or force on/off; returns whether the class is now present
    pub fn toggle_class(&mut self, node: NodeId, class: &str, force: Option<bool>) -> bool {
        let on = force.unwrap_or_else(|| !self.has_class(node, class));
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
        on
    }

    // ========== Attributes ==========

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        let n = self.nodes.get(node)?;
        match name {
            "id" => n.id.as_deref(),
            "class" if n.classes.is_empty() => None,
            "class" => Some(n.class_attr.as_str()),
            _ => n.attributes.get(name).map(String::as_str),
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        match name {
            "id" => self.set_id(node, value),
            "class" => {
                if let Some(n) = self.nodes.get_mut(node) {
                    n.classes = value.split_whitespace().map(str::to_string).collect();
                    n.sync_class_attr();
                }
            }
            _ => {
                if let Some(n) = self.nodes.get_mut(node) {
                    n.attributes.insert(name.to_string(), value.to_string());
                }
            }
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        let Some(n) = self.nodes.get_mut(node) else {
            return;
        };
        match name {
            "id" => {
                if let Some(old) = n.id.take() {
                    if self.ids.get(&old) == Some(&node) {
                        self.ids.remove(&old);
                    }
                }
            }
            "class" => {
                n.classes.clear();
                n.sync_class_attr();
            }
            _ => {
                n.attributes.remove(name);
            }
        }
    }

    /// `dataset` access: `data(node, "tab")` reads `data-tab`
    pub fn data(&self, node: NodeId, key: &str) -> Option<&str> {
        self.attribute(node, &format!("data-{key}"))
    }

    pub fn attributes(&self, node: NodeId) -> Vec<(&str, &str)> {
        self.nodes
            .get(node)
            .map(|n| {
                n.attributes
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ========== Content ==========

    pub fn text(&self, node: NodeId) -> &str {
        self.nodes.get(node).map(|n| n.text.as_str()).unwrap_or("")
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.text = text.to_string();
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes.get(node)?.style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.style.insert(property.to_string(), value.to_string());
        }
    }

    pub fn styles(&self, node: NodeId) -> Vec<(&str, &str)> {
        self.nodes
            .get(node)
            .map(|n| {
                n.style
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Rendered background color, falling back to the inline style
    pub fn computed_background(&self, node: NodeId) -> Option<&str> {
        let n = self.nodes.get(node)?;
        n.computed_background
            .as_deref()
            .or_else(|| n.style.get("background-color").map(String::as_str))
    }

    pub fn set_computed_background(&mut self, node: NodeId, color: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.computed_background = Some(color.to_string());
        }
    }

    // ========== Form controls ==========

    pub fn value(&self, node: NodeId) -> Option<&str> {
        let n = self.nodes.get(node)?;
        n.value
            .as_deref()
            .or_else(|| n.attributes.get("value").map(String::as_str))
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.value = Some(value.to_string());
        }
    }

    pub fn checked(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.checked)
    }

    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.checked = checked;
        }
    }

    // ========== Geometry ==========

    pub fn layout(&self, node: NodeId) -> Layout {
        self.nodes.get(node).map(|n| n.layout).unwrap_or_default()
    }

    pub fn set_layout(&mut self, node: NodeId, layout: Layout) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.layout = layout;
        }
    }

    pub fn offset(&self, node: NodeId) -> Rect {
        self.layout(node).offset
    }

    pub fn set_offset(&mut self, node: NodeId, offset: Rect) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.layout.offset = offset;
        }
    }

    pub fn set_page_top(&mut self, node: NodeId, top: f32) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.layout.page_top = top;
        }
    }

    pub fn set_scroll_width(&mut self, node: NodeId, width: f32) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.layout.scroll_width = width;
        }
    }

    /// Natural content width, never smaller than the rendered width
    pub fn scroll_width(&self, node: NodeId) -> f32 {
        let layout = self.layout(node);
        layout.scroll_width.max(layout.offset.width)
    }

    /// Top edge relative to the viewport (`getBoundingClientRect().top`)
    pub fn viewport_top(&self, node: NodeId) -> f32 {
        self.layout(node).page_top - self.scroll_y
    }

    // ========== Viewport ==========

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, y: f32) {
        self.scroll_y = y.max(0.0);
    }

    /// Viewport size (width, height)
    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    // ========== Focus ==========

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn focus(&mut self, node: NodeId) {
        if self.contains_node(node) {
            self.focused = Some(node);
        }
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
