//! Replays a [`ReplayScript`] against a headless controller

use anyhow::{bail, Result};
use stylekit_core::events::event_types;
use stylekit_core::{KeyCode, NodeId, Rect};
use stylekit_platform::{HeadlessPlatform, Platform};

use crate::controller::Controller;
use crate::report::ReplayReport;
use crate::scenario::{PointerAction, ReplayScript, ScriptStep};

/// Run every step in order
///
/// Returns `Err` when the script itself is broken (unknown selector or key);
/// a failing assertion yields a `Failed` report and stops the replay.
pub fn replay(controller: &mut Controller<HeadlessPlatform>, script: &ReplayScript) -> Result<ReplayReport> {
    for (index, step) in script.steps.iter().enumerate() {
        tracing::debug!(step = index, ?step, "replaying step");
        if let Err(message) = run_step(controller, index, step)? {
            let assertion = step.assertion().unwrap_or("step");
            tracing::info!(step = index, assertion, %message, "replay assertion failed");
            return Ok(ReplayReport::failed(controller, assertion, index, message));
        }
    }
    Ok(ReplayReport::passed(controller, script.steps.len()))
}

fn resolve(controller: &Controller<HeadlessPlatform>, index: usize, selector: &str) -> Result<NodeId> {
    match controller.document().query_selector(selector) {
        Some(node) => Ok(node),
        None => bail!("step {index}: no element matches `{selector}`"),
    }
}

/// Outer `Err` aborts the replay; inner `Err` is a failed assertion
fn run_step(
    controller: &mut Controller<HeadlessPlatform>,
    index: usize,
    step: &ScriptStep,
) -> Result<std::result::Result<(), String>> {
    match step {
        ScriptStep::Click { target } => {
            let node = resolve(controller, index, target)?;
            controller.click(node);
        }
        ScriptStep::Key { key, target } => {
            let code = KeyCode::from_key_name(key);
            if code == KeyCode::UNKNOWN {
                bail!("step {index}: unsupported key `{key}`");
            }
            if let Some(target) = target {
                let node = resolve(controller, index, target)?;
                controller.focus(node);
            }
            controller.press(code);
        }
        ScriptStep::Focus { target } => {
            let node = resolve(controller, index, target)?;
            controller.focus(node);
        }
        ScriptStep::Input { target, value } => {
            let node = resolve(controller, index, target)?;
            controller.input(node, value);
        }
        ScriptStep::Toggle { target } => {
            let node = resolve(controller, index, target)?;
            controller.toggle_checkbox(node);
        }
        ScriptStep::Pointer { target, action } => {
            let node = resolve(controller, index, target)?;
            let event_type = match action {
                PointerAction::Enter => event_types::POINTER_ENTER,
                PointerAction::Leave => event_types::POINTER_LEAVE,
                PointerAction::Down => event_types::POINTER_DOWN,
                PointerAction::Up => event_types::POINTER_UP,
            };
            controller.pointer(event_type, node);
        }
        ScriptStep::Scroll { y } => {
            controller.scroll_to(*y);
        }
        ScriptStep::Resize { width, height } => {
            controller.resize(*width, *height);
        }
        ScriptStep::SetRect { target, rect } => {
            let node = resolve(controller, index, target)?;
            let [x, y, w, h] = *rect;
            controller.document_mut().set_offset(node, Rect::new(x, y, w, h));
        }
        ScriptStep::SetScrollWidth { target, width } => {
            let node = resolve(controller, index, target)?;
            controller.document_mut().set_scroll_width(node, *width);
        }
        ScriptStep::SetPageTop { target, top } => {
            let node = resolve(controller, index, target)?;
            controller.document_mut().set_page_top(node, *top);
        }
        ScriptStep::Hash { value } => {
            controller.navigate_hash(value);
        }
        ScriptStep::ColorScheme { dark } => {
            controller.set_prefers_dark(*dark);
        }
        ScriptStep::Wait { ms } => {
            controller.advance(*ms);
        }
        ScriptStep::AssertText { target, value } => {
            let node = resolve(controller, index, target)?;
            let actual = controller.document().text(node);
            if actual != value {
                return Ok(Err(format!("{target}: expected text `{value}`, found `{actual}`")));
            }
        }
        ScriptStep::AssertClass {
            target,
            class,
            present,
        } => {
            let node = resolve(controller, index, target)?;
            if controller.document().has_class(node, class) != *present {
                let expectation = if *present { "to have" } else { "not to have" };
                return Ok(Err(format!("{target}: expected {expectation} class `{class}`")));
            }
        }
        ScriptStep::AssertAttribute {
            target,
            name,
            value,
        } => {
            let node = resolve(controller, index, target)?;
            let actual = controller.document().attribute(node, name);
            if actual != value.as_deref() {
                return Ok(Err(format!(
                    "{target}: expected {name} = {value:?}, found {actual:?}"
                )));
            }
        }
        ScriptStep::AssertHash { value } => {
            let actual = controller.platform().location_hash();
            if actual != value.trim_start_matches('#') {
                return Ok(Err(format!("expected hash `{value}`, found `{actual}`")));
            }
        }
        ScriptStep::AssertClipboard { value } => {
            let actual = controller.platform().clipboard.contents();
            if actual != Some(value.as_str()) {
                return Ok(Err(format!("expected clipboard `{value}`, found {actual:?}")));
            }
        }
    }
    Ok(Ok(()))
}
