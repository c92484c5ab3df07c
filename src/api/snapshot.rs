use serde::{Deserialize, Serialize};

use crate::core::{LabelOptions, ValueRange, Viewport, format_label};
use crate::error::{ChartError, ChartResult};

use super::{CoordinatorState, DashboardState, Style};

pub const DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSnapshot {
    pub label: String,
    pub display_label: String,
    pub value1: f64,
    pub value2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub title: String,
    pub label_options: LabelOptions,
    pub columns: Vec<ColumnSnapshot>,
}

/// Point-in-time copy of a dashboard, taken under the state lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub window_title: String,
    pub viewport: Viewport,
    pub value_range: ValueRange,
    pub style: Style,
    pub charts: Vec<ChartSnapshot>,
    pub coordinator_state: CoordinatorState,
    pub repaint_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: DashboardSnapshot,
}

impl DashboardState {
    #[must_use]
    pub fn snapshot(
        &self,
        coordinator_state: CoordinatorState,
        repaint_count: u64,
    ) -> DashboardSnapshot {
        let charts = self
            .charts()
            .iter()
            .map(|chart| {
                let options = chart.label_options();
                ChartSnapshot {
                    title: chart.title().to_owned(),
                    label_options: options,
                    columns: chart
                        .columns()
                        .iter()
                        .map(|column| ColumnSnapshot {
                            label: column.label().to_owned(),
                            display_label: format_label(column.label(), options.max_chars)
                                .into_owned(),
                            value1: column.value1(),
                            value2: column.value2(),
                        })
                        .collect(),
                }
            })
            .collect();
        DashboardSnapshot {
            window_title: self.window_title().to_owned(),
            viewport: self.viewport(),
            value_range: self.value_range(),
            style: self.style(),
            charts,
            coordinator_state,
            repaint_count,
        }
    }
}

impl DashboardSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = DashboardSnapshotJsonContractV1 {
            schema_version: DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts both a bare snapshot and the versioned envelope.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<DashboardSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: DashboardSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
