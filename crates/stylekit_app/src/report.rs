//! Machine-readable output of a replay run

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use stylekit_platform::{HeadlessPlatform, NodeSnapshot, Platform};

use crate::controller::Controller;

/// State of one mounted widget
#[derive(Debug, Clone, Serialize)]
pub struct WidgetSnapshot {
    pub id: String,
    pub kind: String,
    pub state: BTreeMap<String, String>,
}

/// Everything a host can observe about the page at one instant
#[derive(Debug, Clone, Serialize)]
pub struct UiSnapshot {
    pub now_ms: u64,
    pub location_hash: String,
    pub scroll_y: f32,
    pub widgets: Vec<WidgetSnapshot>,
    pub document: NodeSnapshot,
}

impl<P: Platform + 'static> Controller<P> {
    pub fn snapshot(&self) -> UiSnapshot {
        let document = self.document();
        let widgets = self
            .widgets()
            .map(|(id, widget)| WidgetSnapshot {
                id: id.to_string(),
                kind: widget.kind().to_string(),
                state: widget
                    .describe(document)
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), value))
                    .collect(),
            })
            .collect();

        UiSnapshot {
            now_ms: self.now(),
            location_hash: self.platform().location_hash(),
            scroll_y: document.scroll_y(),
            widgets,
            document: document.snapshot(document.body()),
        }
    }
}

/// Replay outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Result of replaying a script against a page
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub steps_run: usize,
    pub elapsed_ms: u64,
    /// Last text written to the clipboard
    pub clipboard: Option<String>,
    pub snapshot: UiSnapshot,
}

impl ReplayReport {
    pub fn passed(controller: &Controller<HeadlessPlatform>, steps_run: usize) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            message: None,
            steps_run,
            elapsed_ms: controller.now(),
            clipboard: controller.platform().clipboard.contents().map(str::to_string),
            snapshot: controller.snapshot(),
        }
    }

    pub fn failed(
        controller: &Controller<HeadlessPlatform>,
        assertion: &str,
        failed_step_index: usize,
        message: String,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            message: Some(message),
            ..Self::passed(controller, failed_step_index)
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == ReportStatus::Failed
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
