use std::borrow::Cow;

use smallvec::SmallVec;

use crate::core::{
    BarGeometry, ChartLayout, GridLayout, LabelAlignment, LabelMetrics, RunAnchor,
    VerticalLabelMode, format_axis_value, format_label, place_column_label, reserved_label_margin,
};
use crate::render::{RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

use super::{Chart, DashboardState};

/// Assembles one complete repaint of `state` for `renderer`.
///
/// Charts are laid out on the packed grid in index order. Per chart the frame
/// holds the border, then per column the value2 backdrop, the value1 bar and
/// the slot outline. Title, axis extremes and column labels follow as texts.
#[must_use]
pub fn build_render_frame<R: Renderer + ?Sized>(
    state: &DashboardState,
    renderer: &R,
) -> RenderFrame {
    let viewport = state.viewport();
    let style = state.style();
    let fonts = state.fonts();
    let metrics = LabelMetrics::new(fonts.label_px, renderer.line_height(fonts.label_px));
    let mode = VerticalLabelMode::for_rotation_support(renderer.supports_rotated_text());
    let range = state.value_range();
    let axis_max = format_axis_value(range.max());
    let axis_min = format_axis_value(range.min());

    let mut frame = RenderFrame::new(viewport, style.background);
    let grid = GridLayout::new(viewport, state.chart_count());

    for (idx, chart) in state.charts().iter().enumerate() {
        let options = chart.label_options();
        let labels = display_labels(chart);
        let longest = labels
            .iter()
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(0);
        let margin = reserved_label_margin(options, longest, metrics);
        let layout = ChartLayout::new(grid.cell_rect(idx), chart.column_count(), margin);

        frame.rects.push(RectPrimitive::outlined(layout.border, style.border));
        push_text(
            &mut frame,
            TextPrimitive::new(
                chart.title(),
                layout.title_anchor.0,
                layout.title_anchor.1,
                fonts.title_px,
                style.chart_title,
                TextHAlign::Left,
            ),
        );
        for (text, (x, y)) in [
            (&axis_max, layout.axis_max_anchor),
            (&axis_min, layout.axis_min_anchor),
        ] {
            push_text(
                &mut frame,
                TextPrimitive::new(
                    text.as_str(),
                    x,
                    y,
                    fonts.label_px,
                    style.column_label,
                    TextHAlign::Left,
                ),
            );
        }

        let columns = chart.columns().iter().zip(&labels);
        for ((column, label), slot) in columns.zip(layout.column_slots()) {
            let bars = BarGeometry::compute(slot, column.value1(), column.value2(), range);
            frame.rects.push(RectPrimitive::filled(bars.value2_bar, style.value2));
            frame.rects.push(RectPrimitive::filled(bars.value1_bar, style.value1));
            frame.rects.push(RectPrimitive::outlined(slot, style.border));

            let measured_width = if options.alignment == LabelAlignment::Right {
                renderer
                    .measure_text(label, fonts.label_px)
                    .map(|extents| extents.width)
            } else {
                None
            };
            let placement =
                place_column_label(slot, options, label, measured_width, margin, mode, metrics);
            for run in placement.runs {
                let h_align = match run.anchor {
                    RunAnchor::Start => TextHAlign::Left,
                    RunAnchor::End => TextHAlign::Right,
                };
                push_text(
                    &mut frame,
                    TextPrimitive::new(
                        run.text,
                        run.x,
                        run.y,
                        fonts.label_px,
                        style.column_label,
                        h_align,
                    )
                    .with_rotation(placement.rotation_rad),
                );
            }
        }
    }

    frame
}

fn display_labels(chart: &Chart) -> SmallVec<[Cow<'_, str>; 16]> {
    let max_chars = chart.label_options().max_chars;
    chart
        .columns()
        .iter()
        .map(|column| format_label(column.label(), max_chars))
        .collect()
}

// Empty strings are skipped; backends reject empty text runs.
fn push_text(frame: &mut RenderFrame, text: TextPrimitive) {
    if !text.text.is_empty() {
        frame.texts.push(text);
    }
}
