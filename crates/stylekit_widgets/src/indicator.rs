//! Sliding indicator alignment
//!
//! Pill selectors and the navigation bar both draw an indicator that must sit
//! exactly on the active button. Its box is always recomputed from the
//! button's current geometry.

use stylekit_core::geometry::px;
use stylekit_core::{NodeId, Rect};
use stylekit_platform::Document;

/// Align `indicator` to `target`, or hide it when nothing is active
pub fn align(document: &mut Document, indicator: NodeId, target: Option<NodeId>) {
    let Some(target) = target else {
        document.set_style(indicator, "visibility", "hidden");
        return;
    };
    let rect = document.offset(target);
    document.set_style(indicator, "left", &px(rect.x));
    document.set_style(indicator, "top", &px(rect.y));
    document.set_style(indicator, "width", &px(rect.width));
    document.set_style(indicator, "height", &px(rect.height));
    document.set_style(indicator, "visibility", "visible");
}

/// Read back the box last written by [`align`]
pub fn current_box(document: &Document, indicator: NodeId) -> Option<Rect> {
    let read = |prop: &str| -> Option<f32> {
        document
            .style(indicator, prop)?
            .strip_suffix("px")?
            .parse()
            .ok()
    };
    if document.style(indicator, "visibility") != Some("visible") {
        return None;
    }
    Some(Rect::new(
        read("left")?,
        read("top")?,
        read("width")?,
        read("height")?,
    ))
}

/// Make `active` the only element of `group` carrying `class`
pub fn select_exclusive(document: &mut Document, group: &[NodeId], active: NodeId, class: &str) {
    for node in group {
        document.toggle_class(*node, class, Some(*node == active));
    }
}
