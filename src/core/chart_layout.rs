use crate::core::types::Rect;
use crate::core::value_range::ValueRange;

/// Space above the chart border reserved for the title.
pub const TITLE_PAD_PX: f64 = 22.0;
/// Inset between the cell edge and the chart border.
pub const BORDER_PAD_PX: f64 = 4.0;
/// Horizontal distance from the cell edge to the title anchor.
pub const TITLE_INSET_X_PX: f64 = 16.0;
/// Interior width kept free for the y-axis min/max labels.
pub const AXIS_GUTTER_PX: f64 = 20.0;
/// Left inset of the first bar slot inside the border.
pub const BAR_INSET_X_PX: f64 = 10.0;
/// Gap between the border top and the top of the bar slots.
pub const BAR_TOP_INSET_PX: f64 = 16.0;
/// Fixed vertical overhead below the bar area besides the label margin.
pub const BAR_VERTICAL_OVERHEAD_PX: f64 = 34.0;
/// Horizontal gap between neighbouring bar slots.
pub const COLUMN_GAP_PX: f64 = 4.0;

/// Interior geometry of one chart cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub cell: Rect,
    pub border: Rect,
    pub title_anchor: (f64, f64),
    pub axis_max_anchor: (f64, f64),
    pub axis_min_anchor: (f64, f64),
    pub column_count: usize,
    pub column_width: f64,
    pub bar_top: f64,
    pub bar_max_height: f64,
    pub label_margin: f64,
}

impl ChartLayout {
    /// Derives the border, anchors and bar slots for a chart occupying `cell`.
    ///
    /// `label_margin` is the vertical space kept below the bars for column labels.
    #[must_use]
    pub fn new(cell: Rect, column_count: usize, label_margin: f64) -> Self {
        let border = Rect::new(
            cell.x + BORDER_PAD_PX,
            cell.y + TITLE_PAD_PX,
            (cell.width - 2.0 * BORDER_PAD_PX).max(0.0),
            (cell.height - TITLE_PAD_PX - BORDER_PAD_PX).max(0.0),
        );
        let axis_x = cell.x + BORDER_PAD_PX + 4.0;
        let bar_top = cell.y + TITLE_PAD_PX + BAR_TOP_INSET_PX;
        let axis_bottom = cell.bottom() - BORDER_PAD_PX - 18.0;

        let column_width = if column_count == 0 {
            0.0
        } else {
            ((cell.width - 2.0 * BORDER_PAD_PX - AXIS_GUTTER_PX) / column_count as f64)
                .floor()
                .max(0.0)
        };
        let bar_max_height = (cell.height
            - 2.0 * BORDER_PAD_PX
            - TITLE_PAD_PX
            - BAR_VERTICAL_OVERHEAD_PX
            - label_margin)
            .max(0.0);

        Self {
            cell,
            border,
            title_anchor: (cell.x + TITLE_INSET_X_PX, cell.y + TITLE_PAD_PX),
            axis_max_anchor: (axis_x, bar_top + 10.0),
            axis_min_anchor: (axis_x, axis_bottom),
            column_count,
            column_width,
            bar_top,
            bar_max_height,
            label_margin,
        }
    }

    /// Full-height slot of column `index`, or `None` past the column count.
    #[must_use]
    pub fn column_slot(&self, index: usize) -> Option<Rect> {
        if index >= self.column_count {
            return None;
        }
        Some(Rect::new(
            self.cell.x + BORDER_PAD_PX + BAR_INSET_X_PX + index as f64 * self.column_width,
            self.bar_top,
            (self.column_width - COLUMN_GAP_PX).max(0.0),
            self.bar_max_height,
        ))
    }

    pub fn column_slots(&self) -> impl Iterator<Item = Rect> + '_ {
        (0..self.column_count).filter_map(|index| self.column_slot(index))
    }
}

/// Filled bar rectangles for one column, bottom-anchored in its slot.
///
/// `value2_bar` is painted first as a backdrop; `value1_bar` is painted over it
/// so only the excess of value2 stays visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub slot: Rect,
    pub value2_bar: Rect,
    pub value1_bar: Rect,
}

impl BarGeometry {
    #[must_use]
    pub fn compute(slot: Rect, value1: f64, value2: f64, range: ValueRange) -> Self {
        Self {
            slot,
            value2_bar: bottom_anchored(slot, range.normalize(value2)),
            value1_bar: bottom_anchored(slot, range.normalize(value1)),
        }
    }
}

fn bottom_anchored(slot: Rect, fraction: f64) -> Rect {
    let height = fraction * slot.height;
    Rect::new(slot.x, slot.bottom() - height, slot.width, height)
}
