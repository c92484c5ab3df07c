use tracing::{debug, trace};

use crate::core::limits::bounded_text;
use crate::core::{
    LabelOptions, MAX_LABEL_LEN, MAX_TITLE_LEN, MAX_WINDOW_TITLE_LEN, ValueRange, Viewport,
    format_label,
};
use crate::error::ChartResult;

use super::validation::{
    validate_chart_index, validate_column_index, validate_column_values, validate_label_options,
    validate_window_title,
};
use super::{Chart, Column, DashboardConfig, Style};

/// Font sizes used when assembling frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub label_px: f64,
    pub title_px: f64,
}

/// Everything one repaint reads: charts, style, range, title and viewport.
///
/// Setters validate first and leave the state untouched on error. Column
/// values are clamped into the range active at write time; narrowing the
/// range later does not rewrite them.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    charts: Box<[Chart]>,
    style: Style,
    range: ValueRange,
    window_title: String,
    title_dirty: bool,
    viewport: Viewport,
    fonts: FontSizes,
}

impl DashboardState {
    /// Builds the initial state with default chart titles and zeroed columns.
    pub fn new(config: &DashboardConfig, viewport: Viewport) -> ChartResult<Self> {
        config.validate()?;
        let charts = config
            .columns_per_chart
            .iter()
            .enumerate()
            .map(|(idx, &columns)| Chart::new(format!("Chart {}", idx + 1), columns))
            .collect();
        debug!(
            charts = config.chart_count(),
            width = viewport.width,
            height = viewport.height,
            "dashboard state created"
        );
        Ok(Self {
            charts,
            style: config.style,
            range: config.value_range,
            window_title: bounded_text(&config.window_title, MAX_WINDOW_TITLE_LEN),
            title_dirty: true,
            viewport,
            fonts: FontSizes {
                label_px: config.label_font_size_px,
                title_px: config.title_font_size_px,
            },
        })
    }

    #[must_use]
    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    #[must_use]
    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    pub fn chart(&self, chart: usize) -> ChartResult<&Chart> {
        validate_chart_index(chart, self.charts.len())?;
        Ok(&self.charts[chart])
    }

    pub fn column(&self, chart: usize, column: usize) -> ChartResult<&Column> {
        let chart = self.chart(chart)?;
        validate_column_index(column, chart.columns.len())?;
        Ok(&chart.columns[column])
    }

    /// Label as it would be drawn, after truncation by the chart's options.
    pub fn display_label(&self, chart: usize, column: usize) -> ChartResult<String> {
        let options = self.chart(chart)?.label_options;
        let column = self.column(chart, column)?;
        Ok(format_label(&column.label, options.max_chars).into_owned())
    }

    #[must_use]
    pub fn style(&self) -> Style {
        self.style
    }

    #[must_use]
    pub fn value_range(&self) -> ValueRange {
        self.range
    }

    #[must_use]
    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn fonts(&self) -> FontSizes {
        self.fonts
    }

    pub fn set_window_title(&mut self, title: &str) -> ChartResult<()> {
        validate_window_title(title)?;
        self.window_title = bounded_text(title, MAX_WINDOW_TITLE_LEN);
        self.title_dirty = true;
        trace!(title = %self.window_title, "set window title");
        Ok(())
    }

    pub fn set_chart_title(&mut self, chart: usize, title: &str) -> ChartResult<()> {
        validate_chart_index(chart, self.charts.len())?;
        self.charts[chart].title = bounded_text(title, MAX_TITLE_LEN);
        trace!(chart, "set chart title");
        Ok(())
    }

    pub fn set_column_label(
        &mut self,
        chart: usize,
        column: usize,
        label: &str,
    ) -> ChartResult<()> {
        let target = self.column_mut(chart, column)?;
        target.label = bounded_text(label, MAX_LABEL_LEN);
        trace!(chart, column, "set column label");
        Ok(())
    }

    /// Stores a value pair clamped into the current range.
    ///
    /// When `value1 > value2` after clamping, both become the clamped `value2`.
    pub fn set_column_values(
        &mut self,
        chart: usize,
        column: usize,
        value1: f64,
        value2: f64,
    ) -> ChartResult<()> {
        validate_column_values(value1, value2)?;
        let (value1, value2) = self.range.clamp_and_order(value1, value2);
        let target = self.column_mut(chart, column)?;
        target.value1 = value1;
        target.value2 = value2;
        trace!(chart, column, value1, value2, "set column values");
        Ok(())
    }

    /// Replaces the label options of one chart; `None` restores the defaults.
    pub fn set_column_label_options(
        &mut self,
        chart: usize,
        options: Option<LabelOptions>,
    ) -> ChartResult<()> {
        validate_chart_index(chart, self.charts.len())?;
        let options = validate_label_options(options.unwrap_or_default())?;
        self.charts[chart].label_options = options;
        trace!(chart, ?options, "set column label options");
        Ok(())
    }

    pub fn set_value_range(&mut self, min: i32, max: i32) -> ChartResult<()> {
        self.range = ValueRange::new(min, max)?;
        debug!(min, max, "set value range");
        Ok(())
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
        trace!("set style");
    }

    pub(crate) fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Hands out the window title once after each change.
    pub(crate) fn take_pending_window_title(&mut self) -> Option<String> {
        if !self.title_dirty {
            return None;
        }
        self.title_dirty = false;
        Some(self.window_title.clone())
    }

    fn column_mut(&mut self, chart: usize, column: usize) -> ChartResult<&mut Column> {
        validate_chart_index(chart, self.charts.len())?;
        let chart = &mut self.charts[chart];
        validate_column_index(column, chart.columns.len())?;
        Ok(&mut chart.columns[column])
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardState;
    use crate::api::{DashboardConfig, Style};
    use crate::core::{LabelOptions, LabelOrientation, Viewport};
    use crate::error::ErrorKind;
    use crate::render::Color;

    fn state(columns: Vec<usize>) -> DashboardState {
        DashboardState::new(&DashboardConfig::new(columns), Viewport::default()).expect("state")
    }

    #[test]
    fn charts_start_with_default_titles_and_zeroed_columns() {
        let state = state(vec![4, 3]);
        assert_eq!(state.chart_count(), 2);
        assert_eq!(state.chart(1).expect("chart").title(), "Chart 2");
        assert_eq!(state.chart(0).expect("chart").column_count(), 4);
        let column = state.column(1, 2).expect("column");
        assert_eq!(column.label(), "");
        assert_eq!(column.values(), (0.0, 0.0));
    }

    #[test]
    fn values_are_clamped_and_ordered() {
        let mut state = state(vec![4, 3]);
        state.set_column_values(0, 2, 150.0, 60.0).expect("set");
        assert_eq!(state.column(0, 2).expect("column").values(), (60.0, 60.0));

        state.set_column_values(0, 0, -5.0, 30.0).expect("set");
        assert_eq!(state.column(0, 0).expect("column").values(), (0.0, 30.0));
    }

    #[test]
    fn bad_indexes_are_param_errors_and_change_nothing() {
        let mut state = state(vec![4, 3]);
        let before = state.clone();
        let err = state.set_column_values(2, 0, 1.0, 2.0).expect_err("chart");
        assert_eq!(err.kind(), ErrorKind::Param);
        let err = state.set_column_label(1, 3, "x").expect_err("column");
        assert_eq!(err.kind(), ErrorKind::Param);
        let err = state.set_chart_title(5, "x").expect_err("title");
        assert_eq!(err.kind(), ErrorKind::Param);
        assert_eq!(state, before);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut state = state(vec![1]);
        let err = state.set_column_values(0, 0, f64::NAN, 1.0).expect_err("nan");
        assert_eq!(err.kind(), ErrorKind::Param);
    }

    #[test]
    fn failed_range_change_keeps_previous_range() {
        let mut state = state(vec![1]);
        let err = state.set_value_range(10, 10).expect_err("range");
        assert_eq!(err.kind(), ErrorKind::Param);
        assert_eq!(state.value_range().min(), 0);
        assert_eq!(state.value_range().max(), 100);
    }

    #[test]
    fn narrowing_range_does_not_rewrite_stored_values() {
        let mut state = state(vec![1]);
        state.set_column_values(0, 0, 20.0, 80.0).expect("set");
        state.set_value_range(0, 50).expect("range");
        assert_eq!(state.column(0, 0).expect("column").values(), (20.0, 80.0));
    }

    #[test]
    fn display_label_follows_chart_options() {
        let mut state = state(vec![4, 3]);
        state.set_column_label(1, 0, "core A longname").expect("label");
        state
            .set_column_label_options(
                1,
                Some(LabelOptions {
                    max_chars: 6,
                    ..LabelOptions::default()
                }),
            )
            .expect("options");
        assert_eq!(state.display_label(1, 0).expect("label"), "cor...");
        assert_eq!(state.column(1, 0).expect("column").label(), "core A longname");

        state.set_column_label_options(1, None).expect("reset");
        assert_eq!(state.display_label(1, 0).expect("label"), "core A longname");
    }

    #[test]
    fn oversized_max_chars_is_rejected() {
        let mut state = state(vec![1]);
        let options = LabelOptions {
            orientation: LabelOrientation::VerticalBottomLeft,
            max_chars: 65,
            ..LabelOptions::default()
        };
        assert!(state.set_column_label_options(0, Some(options)).is_err());
        assert_eq!(
            state.chart(0).expect("chart").label_options(),
            LabelOptions::default()
        );
    }

    #[test]
    fn strings_are_truncated_to_their_ceilings() {
        let mut state = state(vec![1]);
        state.set_column_label(0, 0, &"x".repeat(100)).expect("label");
        assert_eq!(state.column(0, 0).expect("column").label().len(), 64);
        state.set_window_title(&"é".repeat(200)).expect("title");
        assert_eq!(state.window_title().chars().count(), 128);
        assert!(state.set_window_title("").is_err());
    }

    #[test]
    fn window_title_is_handed_out_once_per_change() {
        let mut state = state(vec![1]);
        assert_eq!(
            state.take_pending_window_title().as_deref(),
            Some("Barboard Charts")
        );
        assert_eq!(state.take_pending_window_title(), None);
        state.set_window_title("CPU Quality Charts").expect("title");
        assert_eq!(
            state.take_pending_window_title().as_deref(),
            Some("CPU Quality Charts")
        );
    }

    #[test]
    fn style_is_replaced_as_a_unit() {
        let mut state = state(vec![1]);
        let style = Style {
            value1: Color::rgb(255, 0, 0),
            ..Style::default()
        };
        state.set_style(style);
        assert_eq!(state.style(), style);
    }
}
