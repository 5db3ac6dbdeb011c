//! Controller configuration (`stylekit.toml`)
//!
//! Every field defaults to the markup contract of the design-system page, so
//! an empty file mounts the full page:
//!
//! ```toml
//! [navigation]
//! scroll_offset = 96.0
//! scroll_spy_hash = "update"
//!
//! [[modals]]
//! backdrop = "confirm-backdrop"
//! triggers = ["delete-btn"]
//! close_controls = ["confirm-cancel"]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stylekit_widgets::{
    DropdownConfig, ModalConfig, MotionConfig, NavConfig, PillConfig, SliderLabelConfig,
    SwatchConfig, TabsConfig, ThemeSwitchConfig,
};

use crate::error::{ConfigError, Result};

/// Widgets to mount and how to find their elements
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ControllerConfig {
    #[serde(default)]
    pub theme: ThemeSwitchConfig,
    #[serde(default = "default_modals")]
    pub modals: Vec<ModalConfig>,
    #[serde(default = "default_dropdowns")]
    pub dropdowns: Vec<DropdownConfig>,
    #[serde(default)]
    pub tabs: TabsConfig,
    #[serde(default = "default_pills")]
    pub pills: Vec<PillConfig>,
    #[serde(default)]
    pub sliders: SlidersConfig,
    #[serde(default)]
    pub swatches: SwatchConfig,
    #[serde(default)]
    pub navigation: NavConfig,
    #[serde(default)]
    pub motion: MotionConfig,
}

fn default_modals() -> Vec<ModalConfig> {
    vec![ModalConfig::default()]
}

fn default_dropdowns() -> Vec<DropdownConfig> {
    vec![DropdownConfig::default()]
}

fn default_pills() -> Vec<PillConfig> {
    vec![PillConfig::default()]
}

/// Range slider decorations
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SlidersConfig {
    #[serde(default)]
    pub value_label: SliderLabelConfig,
    /// Id of the filled-track slider
    #[serde(default = "default_filled")]
    pub filled: String,
}

fn default_filled() -> String {
    "my-slider-filled".to_string()
}

impl Default for SlidersConfig {
    fn default() -> Self {
        Self {
            value_label: SliderLabelConfig::default(),
            filled: default_filled(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            theme: ThemeSwitchConfig::default(),
            modals: default_modals(),
            dropdowns: default_dropdowns(),
            tabs: TabsConfig::default(),
            pills: default_pills(),
            sliders: SlidersConfig::default(),
            swatches: SwatchConfig::default(),
            navigation: NavConfig::default(),
            motion: MotionConfig::default(),
        }
    }
}

impl ControllerConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded controller configuration");
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylekit_widgets::ScrollSpyHash;

    #[test]
    fn test_empty_file_uses_page_defaults() {
        let config = ControllerConfig::from_toml_str("").unwrap();

        assert_eq!(config.theme.storage_key, "robonxt_theme");
        assert_eq!(config.theme.attribute, "data-theme");
        assert_eq!(config.modals[0].backdrop, "modal-backdrop");
        assert_eq!(config.dropdowns[0].toggle, "dropdown-toggle");
        assert_eq!(config.pills[0].group, "pill-selector-1");
        assert_eq!(config.sliders.value_label.input, "my-slider");
        assert_eq!(config.sliders.filled, "my-slider-filled");
        assert_eq!(config.swatches.revert_ms, 1200);
        assert_eq!(config.navigation.overflow_reserve, 48.0);
        assert_eq!(config.navigation.scroll_offset, 120.0);
        assert_eq!(config.navigation.resize_debounce_ms, 100);
        assert_eq!(config.navigation.scroll_spy_hash, ScrollSpyHash::Preserve);
    }

    #[test]
    fn test_partial_tables_keep_other_defaults() {
        let config = ControllerConfig::from_toml_str(
            r#"
[navigation]
scroll_offset = 96.0
scroll_spy_hash = "update"

[[modals]]
backdrop = "confirm-backdrop"
triggers = ["delete-btn"]
"#,
        )
        .unwrap();

        assert_eq!(config.navigation.scroll_offset, 96.0);
        assert_eq!(config.navigation.scroll_spy_hash, ScrollSpyHash::Update);
        assert_eq!(config.navigation.container, "wrapper-tabs");
        assert_eq!(config.modals.len(), 1);
        assert_eq!(config.modals[0].visible_class, "is-visible");
        assert!(config.modals[0].close_controls.is_empty());
    }

    #[test]
    fn test_to_toml_reloads() {
        let config = ControllerConfig::default();
        let text = config.to_toml().unwrap();
        let reloaded = ControllerConfig::from_toml_str(&text).unwrap();
        assert_eq!(reloaded.navigation.menu, "mobile-nav-dropdown");
    }

    #[test]
    fn test_invalid_config_is_a_parse_error() {
        let err = ControllerConfig::from_toml_str("[navigation]\nscroll_offset = \"far\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = ControllerConfig::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
