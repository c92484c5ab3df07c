use serde::{Deserialize, Serialize};

use crate::core::{ValueRange, Viewport};
use crate::error::{ChartError, ChartResult};

use super::Style;
use super::validation::validate_dashboard_config;

pub const DEFAULT_WINDOW_TITLE: &str = "Barboard Charts";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 16;
pub const DEFAULT_FONT_SIZE_PX: f64 = 13.0;

/// Dashboard bootstrap configuration.
///
/// Serializable so hosts can persist a dashboard layout next to their own
/// settings. Only `columns_per_chart` is required in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Column count of each chart; its length is the chart count.
    pub columns_per_chart: Vec<usize>,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub value_range: ValueRange,
    #[serde(default = "default_window_title")]
    pub window_title: String,
    /// Overrides the size reported by the window at startup.
    #[serde(default)]
    pub initial_viewport: Option<Viewport>,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_font_size_px")]
    pub label_font_size_px: f64,
    #[serde(default = "default_font_size_px")]
    pub title_font_size_px: f64,
}

impl DashboardConfig {
    #[must_use]
    pub fn new(columns_per_chart: Vec<usize>) -> Self {
        Self {
            columns_per_chart,
            style: Style::default(),
            value_range: ValueRange::default(),
            window_title: default_window_title(),
            initial_viewport: None,
            poll_interval_ms: default_poll_interval_ms(),
            label_font_size_px: default_font_size_px(),
            title_font_size_px: default_font_size_px(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_value_range(mut self, value_range: ValueRange) -> Self {
        self.value_range = value_range;
        self
    }

    #[must_use]
    pub fn with_window_title(mut self, window_title: impl Into<String>) -> Self {
        self.window_title = window_title.into();
        self
    }

    #[must_use]
    pub fn with_initial_viewport(mut self, viewport: Viewport) -> Self {
        self.initial_viewport = Some(viewport);
        self
    }

    /// Sets how long the redraw thread sleeps between cycles.
    #[must_use]
    pub fn with_poll_interval_ms(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    #[must_use]
    pub fn with_label_font_size_px(mut self, font_size_px: f64) -> Self {
        self.label_font_size_px = font_size_px;
        self
    }

    #[must_use]
    pub fn with_title_font_size_px(mut self, font_size_px: f64) -> Self {
        self.title_font_size_px = font_size_px;
        self
    }

    #[must_use]
    pub fn chart_count(&self) -> usize {
        self.columns_per_chart.len()
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_dashboard_config(self)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize dashboard config: {e}"))
        })
    }

    /// Parses and validates a config.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse dashboard config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}

fn default_window_title() -> String {
    DEFAULT_WINDOW_TITLE.to_owned()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_font_size_px() -> f64 {
    DEFAULT_FONT_SIZE_PX
}
