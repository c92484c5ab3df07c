use crate::core::{LabelOptions, MAX_CHARTS, MAX_COLUMNS, MAX_LABEL_LEN};
use crate::error::{ChartError, ChartResult};

use super::DashboardConfig;

pub(super) fn validate_dashboard_config(config: &DashboardConfig) -> ChartResult<()> {
    let chart_count = config.columns_per_chart.len();
    if chart_count == 0 || chart_count > MAX_CHARTS {
        return Err(ChartError::OutOfRange {
            what: "chart count",
            value: chart_count,
            max: MAX_CHARTS,
        });
    }
    if let Some(&columns) = config
        .columns_per_chart
        .iter()
        .find(|&&columns| columns == 0 || columns > MAX_COLUMNS)
    {
        return Err(ChartError::OutOfRange {
            what: "column count",
            value: columns,
            max: MAX_COLUMNS,
        });
    }

    validate_window_title(&config.window_title)?;
    validate_font_size(config.label_font_size_px, "label font size")?;
    validate_font_size(config.title_font_size_px, "title font size")?;
    if let Some(viewport) = config.initial_viewport {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
    }
    if config.poll_interval_ms == 0 {
        return Err(ChartError::InvalidParam(
            "poll interval must be > 0 ms".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_window_title(title: &str) -> ChartResult<()> {
    if title.is_empty() {
        return Err(ChartError::InvalidParam(
            "window title must not be empty".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_chart_index(chart: usize, chart_count: usize) -> ChartResult<()> {
    if chart >= chart_count {
        return Err(ChartError::InvalidParam(format!(
            "chart index {chart} out of bounds (charts: {chart_count})"
        )));
    }
    Ok(())
}

pub(super) fn validate_column_index(column: usize, column_count: usize) -> ChartResult<()> {
    if column >= column_count {
        return Err(ChartError::InvalidParam(format!(
            "column index {column} out of bounds (columns: {column_count})"
        )));
    }
    Ok(())
}

pub(super) fn validate_column_values(value1: f64, value2: f64) -> ChartResult<()> {
    if !value1.is_finite() || !value2.is_finite() {
        return Err(ChartError::InvalidParam(
            "column values must be finite".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_label_options(options: LabelOptions) -> ChartResult<LabelOptions> {
    if options.max_chars > MAX_LABEL_LEN {
        return Err(ChartError::InvalidParam(format!(
            "label max_chars must be <= {MAX_LABEL_LEN} (0 = unlimited)"
        )));
    }
    Ok(options)
}

fn validate_font_size(font_size_px: f64, what: &str) -> ChartResult<()> {
    if !font_size_px.is_finite() || font_size_px <= 0.0 {
        return Err(ChartError::InvalidParam(format!(
            "{what} must be finite and > 0"
        )));
    }
    Ok(())
}
