//! Scripted interaction sequences for headless replay
//!
//! ```toml
//! [[step]]
//! type = "click"
//! target = "#open-modal-btn"
//!
//! [[step]]
//! type = "key"
//! key = "Escape"
//!
//! [[step]]
//! type = "assert_class"
//! target = "#modal-backdrop"
//! class = "is-visible"
//! present = false
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Ordered steps replayed against a mounted page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplayScript {
    #[serde(default, rename = "step")]
    pub steps: Vec<ScriptStep>,
}

impl ReplayScript {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load a script from file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::from_toml_str(&raw)
    }
}

/// Pointer phase for [`ScriptStep::Pointer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerAction {
    Enter,
    Leave,
    Down,
    Up,
}

/// One replay step; targets are `#id`, `.class` or tag selectors
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptStep {
    Click {
        target: String,
    },
    /// Key press by DOM key name (`Escape`, `ArrowDown`, `Enter`, ` `);
    /// focuses `target` first when given
    Key {
        key: String,
        #[serde(default)]
        target: Option<String>,
    },
    Focus {
        target: String,
    },
    Input {
        target: String,
        value: String,
    },
    /// Flip a checkbox
    Toggle {
        target: String,
    },
    Pointer {
        target: String,
        action: PointerAction,
    },
    Scroll {
        y: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    /// Host layout change: `[left, top, width, height]`
    SetRect {
        target: String,
        rect: [f32; 4],
    },
    SetScrollWidth {
        target: String,
        width: f32,
    },
    SetPageTop {
        target: String,
        top: f32,
    },
    /// User navigates to a URL fragment
    Hash {
        value: String,
    },
    ColorScheme {
        dark: bool,
    },
    Wait {
        ms: u64,
    },
    AssertText {
        target: String,
        value: String,
    },
    AssertClass {
        target: String,
        class: String,
        #[serde(default = "default_present")]
        present: bool,
    },
    /// `value` absent asserts the attribute is missing
    AssertAttribute {
        target: String,
        name: String,
        #[serde(default)]
        value: Option<String>,
    },
    AssertHash {
        value: String,
    },
    AssertClipboard {
        value: String,
    },
}

fn default_present() -> bool {
    true
}

impl ScriptStep {
    /// Assertion name for reports; `None` for interaction steps
    pub fn assertion(&self) -> Option<&'static str> {
        match self {
            ScriptStep::AssertText { .. } => Some("assert_text"),
            ScriptStep::AssertClass { .. } => Some("assert_class"),
            ScriptStep::AssertAttribute { .. } => Some("assert_attribute"),
            ScriptStep::AssertHash { .. } => Some("assert_hash"),
            ScriptStep::AssertClipboard { .. } => Some("assert_clipboard"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let script = ReplayScript::from_toml_str(
            r##"
[[step]]
type = "click"
target = "#open-modal-btn"

[[step]]
type = "key"
key = "Escape"

[[step]]
type = "pointer"
target = "#my-slider"
action = "down"

[[step]]
type = "assert_class"
target = "#modal-backdrop"
class = "is-visible"
present = false
"##,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 4);
        assert!(matches!(&script.steps[1], ScriptStep::Key { key, target: None } if key == "Escape"));
        assert!(matches!(
            script.steps[2],
            ScriptStep::Pointer {
                action: PointerAction::Down,
                ..
            }
        ));
        assert_eq!(script.steps[3].assertion(), Some("assert_class"));
    }

    #[test]
    fn test_assert_class_defaults_to_present() {
        let script = ReplayScript::from_toml_str(
            "[[step]]\ntype = \"assert_class\"\ntarget = \".tab\"\nclass = \"active\"\n",
        )
        .unwrap();
        assert!(matches!(script.steps[0], ScriptStep::AssertClass { present: true, .. }));
    }

    #[test]
    fn test_unknown_step_is_rejected() {
        assert!(ReplayScript::from_toml_str("[[step]]\ntype = \"teleport\"\n").is_err());
    }

    #[test]
    fn test_empty_script() {
        assert!(ReplayScript::from_toml_str("").unwrap().steps.is_empty());
    }
}
