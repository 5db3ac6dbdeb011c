//! TOML page descriptions and document snapshots
//!
//! A page description lists elements in document order. Each element may
//! name its parent by id; elements without a parent go under `<body>`.
//!
//! ```toml
//! [viewport]
//! width = 1280.0
//! height = 800.0
//!
//! [[element]]
//! tag = "div"
//! id = "pill-selector-1"
//! class = "pill-selector"
//!
//! [[element]]
//! tag = "button"
//! parent = "pill-selector-1"
//! class = "btn-pill active"
//! text = "Daily"
//! rect = [4.0, 4.0, 80.0, 32.0]
//! attrs = { "data-value" = "daily" }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stylekit_core::{NodeId, Rect};

use crate::dom::{Document, Layout};
use crate::error::{PlatformError, Result};

/// Viewport state at load
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ViewportSpec {
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub scroll_y: f32,
}

/// One element of a page description
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ElementSpec {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    /// Space-separated class list
    #[serde(default)]
    pub class: Option<String>,
    /// Id of the parent element; `<body>` when absent
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub checked: bool,
    /// Rendered background color (`rgb(...)`)
    #[serde(default)]
    pub background: Option<String>,
    /// Offset box `[left, top, width, height]`
    #[serde(default)]
    pub rect: Option<[f32; 4]>,
    #[serde(default)]
    pub page_top: f32,
    #[serde(default)]
    pub scroll_width: f32,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

fn default_tag() -> String {
    "div".to_string()
}

/// A complete page description
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PageSpec {
    #[serde(default)]
    pub viewport: ViewportSpec,
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementSpec>,
}

impl PageSpec {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| PlatformError::PageDescription(e.to_string()))
    }

    /// Build a document from this description
    pub fn build(&self) -> Result<Document> {
        let mut doc = Document::new();
        doc.set_viewport(self.viewport.width, self.viewport.height);
        doc.set_scroll_y(self.viewport.scroll_y);

        for (index, spec) in self.elements.iter().enumerate() {
            let parent = match spec.parent.as_deref() {
                Some(parent_id) => doc.get_element_by_id(parent_id).ok_or_else(|| {
                    PlatformError::PageDescription(format!(
                        "element #{index} names unknown parent `{parent_id}`"
                    ))
                })?,
                None => doc.body(),
            };

            let node = doc.create_element(&spec.tag);
            if let Some(id) = spec.id.as_deref() {
                if doc.get_element_by_id(id).is_some() {
                    return Err(PlatformError::PageDescription(format!(
                        "duplicate element id `{id}`"
                    )));
                }
                doc.set_id(node, id);
            }
            if let Some(class) = spec.class.as_deref() {
                doc.set_attribute(node, "class", class);
            }
            for (name, value) in &spec.attrs {
                if name == "id" || name == "class" {
                    return Err(PlatformError::PageDescription(format!(
                        "element #{index} sets `{name}` through attrs; use the `{name}` field"
                    )));
                }
                doc.set_attribute(node, name, value);
            }
            if let Some(text) = spec.text.as_deref() {
                doc.set_text(node, text);
            }
            if let Some(value) = spec.value.as_deref() {
                doc.set_value(node, value);
            }
            doc.set_checked(node, spec.checked);
            if let Some(background) = spec.background.as_deref() {
                doc.set_computed_background(node, background);
            }
            let offset = spec
                .rect
                .map(|[x, y, w, h]| Rect::new(x, y, w, h))
                .unwrap_or_default();
            doc.set_layout(
                node,
                Layout {
                    offset,
                    page_top: spec.page_top,
                    scroll_width: spec.scroll_width,
                },
            );
            doc.append_child(parent, node);
        }

        tracing::debug!(elements = self.elements.len(), "built document from page description");
        Ok(doc)
    }
}

/// Serializable view of one element's widget-visible state
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeSnapshot {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl Document {
    /// Snapshot of the subtree rooted at `node`
    pub fn snapshot(&self, node: NodeId) -> NodeSnapshot {
        NodeSnapshot {
            tag: self.tag(node).unwrap_or_default().to_string(),
            id: self.id(node).map(str::to_string),
            classes: self.classes(node).to_vec(),
            attributes: self
                .attributes(node)
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            style: self
                .styles(node)
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            text: self.text(node).to_string(),
            children: self
                .children(node)
                .iter()
                .map(|child| self.snapshot(*child))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
[viewport]
width = 1280.0
height = 800.0

[[element]]
tag = "div"
id = "group"
class = "pill-selector"

[[element]]
tag = "button"
parent = "group"
class = "btn-pill active"
text = "Daily"
rect = [4.0, 4.0, 80.0, 32.0]
attrs = { "data-value" = "daily" }

[[element]]
id = "patch"
background = "rgb(170, 187, 204)"
"##;

    #[test]
    fn test_build_from_toml() {
        let page = PageSpec::from_toml_str(PAGE).unwrap();
        let doc = page.build().unwrap();

        let group = doc.get_element_by_id("group").unwrap();
        let button = doc.query_in(group, ".btn-pill").unwrap();
        assert!(doc.has_class(button, "active"));
        assert_eq!(doc.data(button, "value"), Some("daily"));
        assert_eq!(doc.offset(button), Rect::new(4.0, 4.0, 80.0, 32.0));
        assert_eq!(doc.text(button), "Daily");
        assert_eq!(doc.viewport(), (1280.0, 800.0));

        let patch = doc.get_element_by_id("patch").unwrap();
        assert_eq!(doc.computed_background(patch), Some("rgb(170, 187, 204)"));
        assert_eq!(doc.parent(patch), Some(doc.body()));
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let page = PageSpec::from_toml_str(
            r#"
[[element]]
parent = "nowhere"
"#,
        )
        .unwrap();

        assert!(matches!(
            page.build(),
            Err(PlatformError::PageDescription(_))
        ));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let page = PageSpec::from_toml_str(
            r#"
[[element]]
id = "a"

[[element]]
id = "a"
"#,
        )
        .unwrap();

        assert!(page.build().is_err());
    }

    #[test]
    fn test_id_in_attrs_is_rejected() {
        let page = PageSpec::from_toml_str(
            r#"
[[element]]
id = "a"

[[element]]
attrs = { id = "a" }
"#,
        )
        .unwrap();

        assert!(matches!(
            page.build(),
            Err(PlatformError::PageDescription(msg)) if msg.contains("`id`")
        ));
    }

    #[test]
    fn test_snapshot_serializes_sorted_attributes() {
        let page = PageSpec::from_toml_str(PAGE).unwrap();
        let doc = page.build().unwrap();
        let group = doc.get_element_by_id("group").unwrap();

        let json = serde_json::to_value(doc.snapshot(group)).unwrap();
        assert_eq!(json["id"], "group");
        assert_eq!(json["children"][0]["attributes"]["data-value"], "daily");
        assert_eq!(json["children"][0]["classes"][1], "active");
    }
}
