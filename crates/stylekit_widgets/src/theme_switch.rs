//! Theme switch
//!
//! Applies the resolved colour scheme to the root element and a checkbox
//! control. Toggling the checkbox persists an explicit choice; OS preference
//! changes only re-theme the page while no explicit choice exists.

use std::any::Any;

use serde::{Deserialize, Serialize};
use stylekit_core::events::event_types;
use stylekit_core::{Event, EventData, Listeners, NodeId, Scope};
use stylekit_platform::Document;
use stylekit_theme::{ColorScheme, ThemeState};

use crate::context::WidgetContext;
use crate::widget::{Widget, WidgetId};

/// Theme switch configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ThemeSwitchConfig {
    /// Id of the checkbox (checked means dark)
    #[serde(default = "default_checkbox")]
    pub checkbox: String,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Attribute set on the root element
    #[serde(default = "default_attribute")]
    pub attribute: String,
}

fn default_checkbox() -> String {
    "theme-checkbox".to_string()
}

fn default_storage_key() -> String {
    "robonxt_theme".to_string()
}

fn default_attribute() -> String {
    "data-theme".to_string()
}

impl Default for ThemeSwitchConfig {
    fn default() -> Self {
        Self {
            checkbox: default_checkbox(),
            storage_key: default_storage_key(),
            attribute: default_attribute(),
        }
    }
}

/// Theme switch widget
pub struct ThemeSwitch {
    checkbox: NodeId,
    attribute: String,
    state: ThemeState,
}

impl ThemeSwitch {
    pub fn attach(cx: &mut WidgetContext<'_>, config: &ThemeSwitchConfig) -> Option<Self> {
        let checkbox = cx.element(&config.checkbox)?;
        let system_dark = cx.platform.prefers_dark_scheme();
        let state = ThemeState::load(&*cx.platform.storage(), &config.storage_key, system_dark);

        let switch = Self {
            checkbox,
            attribute: config.attribute.clone(),
            state,
        };
        switch.apply(cx.document);
        Some(switch)
    }

    pub fn scheme(&self) -> ColorScheme {
        self.state.scheme()
    }

    pub fn state(&self) -> &ThemeState {
        &self.state
    }

    /// Apply and persist an explicit choice
    pub fn set_scheme(&mut self, cx: &mut WidgetContext<'_>, scheme: ColorScheme) {
        self.state.set_explicit(cx.platform.storage(), scheme);
        self.apply(cx.document);
    }

    pub fn toggle(&mut self, cx: &mut WidgetContext<'_>) {
        let next = self.scheme().toggle();
        self.set_scheme(cx, next);
    }

    /// Drop the explicit choice and follow the OS again
    pub fn clear_preference(&mut self, cx: &mut WidgetContext<'_>) {
        self.state.clear_explicit(cx.platform.storage());
        self.apply(cx.document);
    }

    fn apply(&self, document: &mut Document) {
        let scheme = self.state.scheme();
        let root = document.root();
        document.set_attribute(root, &self.attribute, scheme.as_str());
        document.set_checked(self.checkbox, scheme.is_dark());
        tracing::debug!(%scheme, source = ?self.state.source(), "theme applied");
    }
}

impl Widget for ThemeSwitch {
    fn kind(&self) -> &'static str {
        "theme-switch"
    }

    fn listen(&self, id: WidgetId, listeners: &mut Listeners<WidgetId>) {
        listeners.register(id, Scope::Node(self.checkbox), event_types::CHANGE);
        listeners.register(id, Scope::Window, event_types::COLOR_SCHEME_CHANGE);
    }

    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &mut Event) {
        match (event.event_type, &event.data) {
            (event_types::CHANGE, _) => {
                let scheme = ColorScheme::from_dark(cx.document.checked(self.checkbox));
                self.set_scheme(cx, scheme);
            }
            (event_types::COLOR_SCHEME_CHANGE, EventData::ColorScheme { dark }) => {
                if self
                    .state
                    .system_changed(&*cx.platform.storage(), *dark)
                    .is_some()
                {
                    self.apply(cx.document);
                }
            }
            _ => {}
        }
    }

    fn describe(&self, _document: &Document) -> Vec<(&'static str, String)> {
        vec![
            ("scheme", self.state.scheme().to_string()),
            ("source", format!("{:?}", self.state.source()).to_lowercase()),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
