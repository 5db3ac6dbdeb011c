#![allow(dead_code)]

use stylekit_app::{Controller, ControllerConfig};
use stylekit_core::NodeId;
use stylekit_platform::{HeadlessPlatform, PageSpec};
use stylekit_widgets::{ModalConfig, Navigation};

pub const PAGE: &str = include_str!("../fixtures/page.toml");

/// Default page contract plus a stacked confirm modal and a locked modal
pub fn config() -> ControllerConfig {
    let mut config = ControllerConfig::default();
    config.modals.push(
        ModalConfig::new("confirm-backdrop")
            .trigger("open-confirm-btn")
            .close_control("confirm-cancel"),
    );
    config.modals.push(
        ModalConfig::new("locked-backdrop")
            .trigger("open-locked-btn")
            .close_control("locked-close"),
    );
    config
}

pub fn mount_with(platform: HeadlessPlatform, config: &ControllerConfig) -> Controller {
    let document = PageSpec::from_toml_str(PAGE)
        .expect("fixture parses")
        .build()
        .expect("fixture builds");
    Controller::mount(document, platform, config)
}

pub fn mount(platform: HeadlessPlatform) -> Controller {
    mount_with(platform, &config())
}

pub fn node(controller: &Controller, id: &str) -> NodeId {
    controller
        .document()
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("fixture has no #{id}"))
}

pub fn nav(controller: &Controller) -> &Navigation {
    let id = controller.find::<Navigation>().expect("navigation mounted");
    controller.widget::<Navigation>(id).expect("navigation widget")
}

pub fn visible(controller: &Controller, id: &str) -> bool {
    controller
        .document()
        .has_class(node(controller, id), "is-visible")
}
