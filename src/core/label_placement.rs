use std::f64::consts::FRAC_PI_2;

use smallvec::SmallVec;

use crate::core::label::{LabelAlignment, LabelOptions, LabelOrientation};
use crate::core::types::Rect;

/// Label margin kept below the bars for horizontal labels.
pub const HORIZONTAL_LABEL_MARGIN_PX: f64 = 16.0;
/// Baseline offset of horizontal labels below the bar floor.
pub const HORIZONTAL_LABEL_OFFSET_PX: f64 = 16.0;
/// Space between the bar floor and the first glyph of a bottom-left label.
pub const VERTICAL_LABEL_GAP_PX: f64 = 6.0;
/// Padding added to the character-proportional vertical margin.
pub const VERTICAL_MARGIN_PADDING_PX: f64 = 10.0;
/// Distance between the margin floor and a bottom-right label anchor.
pub const VERTICAL_FLOOR_INSET_PX: f64 = 4.0;

/// Font measurements the placement math depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    pub font_size_px: f64,
    pub line_height_px: f64,
}

impl LabelMetrics {
    #[must_use]
    pub const fn new(font_size_px: f64, line_height_px: f64) -> Self {
        Self {
            font_size_px,
            line_height_px,
        }
    }
}

/// How vertical labels are drawn by the active backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalLabelMode {
    /// The backend rotates a single text run.
    Rotated,
    /// Degraded mode: one glyph per line, stacked at line-height spacing.
    Stacked,
}

impl VerticalLabelMode {
    #[must_use]
    pub fn for_rotation_support(supports_rotated_text: bool) -> Self {
        if supports_rotated_text {
            Self::Rotated
        } else {
            Self::Stacked
        }
    }
}

/// Whether a label is emitted as one run or glyph by glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStrategy {
    SingleRun,
    GlyphStack,
}

/// Which end of a run sits on its `x` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunAnchor {
    Start,
    /// The backend shifts the run left by its own rendered width.
    End,
}

/// One piece of text positioned by its baseline start.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRun {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub anchor: RunAnchor,
}

/// Drawing instruction for one column label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub rotation_rad: f64,
    pub strategy: PlacementStrategy,
    pub runs: SmallVec<[PlacedRun; 1]>,
}

/// Vertical space to keep below the bars so labels never reach the next row.
///
/// Vertical labels reserve one line per displayed character. With
/// `max_chars == 0` the longest label of the chart decides.
#[must_use]
pub fn reserved_label_margin(
    options: LabelOptions,
    longest_label_chars: usize,
    metrics: LabelMetrics,
) -> f64 {
    if !options.orientation.is_vertical() {
        return HORIZONTAL_LABEL_MARGIN_PX;
    }
    let chars = if options.max_chars > 0 {
        options.max_chars
    } else {
        longest_label_chars
    };
    chars as f64 * metrics.line_height_px + VERTICAL_MARGIN_PADDING_PX
}

/// Positions `text` (already truncated for display) under the bar slot `bar`.
///
/// `text_width` is the rendered width when the backend can measure text.
#[must_use]
pub fn place_column_label(
    bar: Rect,
    options: LabelOptions,
    text: &str,
    text_width: Option<f64>,
    label_margin: f64,
    mode: VerticalLabelMode,
    metrics: LabelMetrics,
) -> LabelPlacement {
    match options.orientation {
        LabelOrientation::Horizontal => place_horizontal(bar, options.alignment, text, text_width),
        LabelOrientation::VerticalBottomLeft | LabelOrientation::VerticalBottomRight => {
            place_vertical(bar, options, text, text_width, label_margin, mode, metrics)
        }
    }
}

fn place_horizontal(
    bar: Rect,
    alignment: LabelAlignment,
    text: &str,
    text_width: Option<f64>,
) -> LabelPlacement {
    let y = bar.bottom() + HORIZONTAL_LABEL_OFFSET_PX;
    let (x, anchor) = match (alignment, text_width) {
        (LabelAlignment::Left, _) => (bar.x, RunAnchor::Start),
        (LabelAlignment::Right, Some(width)) => (bar.right() - width, RunAnchor::Start),
        (LabelAlignment::Right, None) => (bar.right(), RunAnchor::End),
    };
    let mut runs = SmallVec::new();
    if !text.is_empty() {
        runs.push(PlacedRun {
            text: text.to_owned(),
            x,
            y,
            anchor,
        });
    }
    LabelPlacement {
        anchor_x: x,
        anchor_y: y,
        rotation_rad: 0.0,
        strategy: PlacementStrategy::SingleRun,
        runs,
    }
}

fn place_vertical(
    bar: Rect,
    options: LabelOptions,
    text: &str,
    text_width: Option<f64>,
    label_margin: f64,
    mode: VerticalLabelMode,
    metrics: LabelMetrics,
) -> LabelPlacement {
    let bottom_left = options.orientation == LabelOrientation::VerticalBottomLeft;
    let gap_y = bar.bottom() + VERTICAL_LABEL_GAP_PX;
    let floor_y = bar.bottom() + label_margin - VERTICAL_FLOOR_INSET_PX;
    let measured = match (mode, options.alignment, text_width) {
        (VerticalLabelMode::Rotated, LabelAlignment::Right, Some(width)) => Some(width),
        _ => None,
    };

    // A measured right-aligned run ends on the far edge of the margin: it
    // starts `width` before the floor going down, or `width` past the gap
    // going up. Without a measurement the glyph column is nudged half a
    // glyph off the bar midpoint instead.
    let nudge = metrics.font_size_px / 2.0;
    let (anchor_x, anchor_y) = match measured {
        Some(width) if bottom_left => (bar.center_x(), floor_y - width),
        Some(width) => (bar.center_x(), gap_y + width),
        None => {
            let x = match options.alignment {
                LabelAlignment::Left => bar.center_x() - nudge,
                LabelAlignment::Right => bar.center_x() + nudge,
            };
            (x, if bottom_left { gap_y } else { floor_y })
        }
    };

    match mode {
        VerticalLabelMode::Rotated => {
            let mut runs = SmallVec::new();
            if !text.is_empty() {
                runs.push(PlacedRun {
                    text: text.to_owned(),
                    x: anchor_x,
                    y: anchor_y,
                    anchor: RunAnchor::Start,
                });
            }
            LabelPlacement {
                anchor_x,
                anchor_y,
                rotation_rad: if bottom_left { FRAC_PI_2 } else { -FRAC_PI_2 },
                strategy: PlacementStrategy::SingleRun,
                runs,
            }
        }
        VerticalLabelMode::Stacked => {
            let glyph_count = text.chars().count();
            let line = metrics.line_height_px;
            let first_y = if bottom_left {
                anchor_y + line
            } else {
                floor_y - glyph_count.saturating_sub(1) as f64 * line
            };
            let runs = text
                .chars()
                .enumerate()
                .map(|(idx, ch)| PlacedRun {
                    text: ch.to_string(),
                    x: anchor_x,
                    y: first_y + idx as f64 * line,
                    anchor: RunAnchor::Start,
                })
                .collect();
            LabelPlacement {
                anchor_x,
                anchor_y,
                rotation_rad: 0.0,
                strategy: PlacementStrategy::GlyphStack,
                runs,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::{
        LabelMetrics, LabelPlacement, PlacementStrategy, RunAnchor, VerticalLabelMode,
        place_column_label, reserved_label_margin,
    };
    use crate::core::{LabelAlignment, LabelOptions, LabelOrientation, Rect};

    const METRICS: LabelMetrics = LabelMetrics::new(13.0, 16.0);
    const BAR: Rect = Rect::new(100.0, 50.0, 40.0, 200.0);

    fn options(
        orientation: LabelOrientation,
        alignment: LabelAlignment,
        max: usize,
    ) -> LabelOptions {
        LabelOptions::new(orientation, alignment, max)
    }

    fn place(
        opts: LabelOptions,
        text: &str,
        width: Option<f64>,
        margin: f64,
        mode: VerticalLabelMode,
    ) -> LabelPlacement {
        place_column_label(BAR, opts, text, width, margin, mode, METRICS)
    }

    #[test]
    fn horizontal_margin_is_fixed() {
        let opts = options(LabelOrientation::Horizontal, LabelAlignment::Left, 40);
        assert_eq!(reserved_label_margin(opts, 60, METRICS), 16.0);
    }

    #[test]
    fn vertical_margin_scales_with_character_budget() {
        let opts = options(LabelOrientation::VerticalBottomLeft, LabelAlignment::Left, 4);
        assert_eq!(reserved_label_margin(opts, 30, METRICS), 4.0 * 16.0 + 10.0);

        let unlimited = options(LabelOrientation::VerticalBottomRight, LabelAlignment::Left, 0);
        assert_eq!(reserved_label_margin(unlimited, 6, METRICS), 6.0 * 16.0 + 10.0);
    }

    #[test]
    fn horizontal_left_label_starts_at_bar_left_edge() {
        let opts = options(LabelOrientation::Horizontal, LabelAlignment::Left, 0);
        let placement = place(opts, "core", None, 16.0, VerticalLabelMode::Stacked);
        assert_eq!(placement.strategy, PlacementStrategy::SingleRun);
        assert_eq!(placement.rotation_rad, 0.0);
        assert_eq!(placement.runs.len(), 1);
        assert_eq!((placement.runs[0].x, placement.runs[0].y), (100.0, 266.0));
    }

    #[test]
    fn horizontal_right_label_uses_measured_width_when_available() {
        let opts = options(LabelOrientation::Horizontal, LabelAlignment::Right, 0);
        let measured = place(opts, "core", Some(25.0), 16.0, VerticalLabelMode::Rotated);
        assert_eq!(measured.runs[0].x, 115.0);
        assert_eq!(measured.runs[0].anchor, RunAnchor::Start);

        let unmeasured = place(opts, "core", None, 16.0, VerticalLabelMode::Rotated);
        assert_eq!(unmeasured.runs[0].x, 140.0);
        assert_eq!(unmeasured.runs[0].anchor, RunAnchor::End);
    }

    #[test]
    fn rotated_vertical_labels_use_opposite_angles() {
        let left = options(LabelOrientation::VerticalBottomLeft, LabelAlignment::Left, 0);
        let right = options(LabelOrientation::VerticalBottomRight, LabelAlignment::Left, 0);
        let a = place(left, "turbo", None, 90.0, VerticalLabelMode::Rotated);
        let b = place(right, "turbo", None, 90.0, VerticalLabelMode::Rotated);
        assert_relative_eq!(a.rotation_rad, FRAC_PI_2);
        assert_relative_eq!(b.rotation_rad, -FRAC_PI_2);
        assert_relative_eq!(a.anchor_y, 256.0);
        assert_relative_eq!(b.anchor_y, 250.0 + 90.0 - 4.0);
        assert_relative_eq!(a.anchor_x, 120.0 - 6.5);
    }

    #[test]
    fn rotated_right_alignment_shifts_by_measured_width() {
        let margin = 120.0;
        let floor = BAR.bottom() + margin - 4.0;
        let gap = BAR.bottom() + 6.0;

        let left = options(LabelOrientation::VerticalBottomLeft, LabelAlignment::Right, 0);
        let short = place(left, "ab", Some(10.0), margin, VerticalLabelMode::Rotated);
        let long = place(left, "abcdefgh", Some(80.0), margin, VerticalLabelMode::Rotated);
        assert_relative_eq!(short.runs[0].y, floor - 10.0);
        assert_relative_eq!(long.runs[0].y, floor - 80.0);
        assert_relative_eq!(short.runs[0].x, BAR.center_x());

        let right = options(LabelOrientation::VerticalBottomRight, LabelAlignment::Right, 0);
        let short = place(right, "ab", Some(10.0), margin, VerticalLabelMode::Rotated);
        let long = place(right, "abcdefgh", Some(80.0), margin, VerticalLabelMode::Rotated);
        assert_relative_eq!(short.runs[0].y, gap + 10.0);
        assert_relative_eq!(long.runs[0].y, gap + 80.0);
        assert_relative_eq!(long.anchor_y, long.runs[0].y);
    }

    #[test]
    fn unmeasured_right_alignment_falls_back_to_nudge() {
        let opts = options(LabelOrientation::VerticalBottomLeft, LabelAlignment::Right, 0);
        let placement = place(opts, "ab", None, 120.0, VerticalLabelMode::Rotated);
        assert_relative_eq!(placement.anchor_x, 120.0 + 6.5);
        assert_relative_eq!(placement.anchor_y, 256.0);

        let stacked = place(opts, "ab", Some(10.0), 120.0, VerticalLabelMode::Stacked);
        assert_relative_eq!(stacked.anchor_x, 120.0 + 6.5);
        assert_relative_eq!(stacked.anchor_y, 256.0);
    }

    #[test]
    fn stacked_glyphs_do_not_overlap_and_stay_in_margin() {
        for orientation in [
            LabelOrientation::VerticalBottomLeft,
            LabelOrientation::VerticalBottomRight,
        ] {
            let opts = options(orientation, LabelAlignment::Right, 5);
            let margin = reserved_label_margin(opts, 0, METRICS);
            let placement = place(opts, "Tu...", None, margin, VerticalLabelMode::Stacked);
            assert_eq!(placement.strategy, PlacementStrategy::GlyphStack);
            assert_eq!(placement.runs.len(), 5);
            for pair in placement.runs.windows(2) {
                assert_relative_eq!(pair[1].y - pair[0].y, METRICS.line_height_px);
            }
            let first = &placement.runs[0];
            let last = &placement.runs[4];
            assert!(first.y - METRICS.font_size_px >= BAR.bottom());
            assert!(last.y <= BAR.bottom() + margin);
        }
    }

    #[test]
    fn empty_text_yields_no_runs() {
        let opts = options(LabelOrientation::VerticalBottomLeft, LabelAlignment::Left, 0);
        let placement = place(opts, "", None, 10.0, VerticalLabelMode::Stacked);
        assert!(placement.runs.is_empty());
    }
}
