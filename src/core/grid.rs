use crate::core::types::{Rect, Viewport};

/// Smallest near-square grid holding `count` cells, as `(cols, rows)`.
///
/// Grows from 1x1; a square grid gains a column, otherwise a row is added.
/// `count == 0` still yields a single cell.
#[must_use]
pub fn pack_grid(count: usize) -> (usize, usize) {
    let (mut cols, mut rows) = (1_usize, 1_usize);
    while cols * rows < count {
        if cols == rows {
            cols += 1;
        } else {
            rows += 1;
        }
    }
    (cols, rows)
}

/// Window tiling for an ordered set of charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl GridLayout {
    #[must_use]
    pub fn new(viewport: Viewport, chart_count: usize) -> Self {
        let (cols, rows) = pack_grid(chart_count);
        Self {
            cols,
            rows,
            cell_width: viewport.width / cols as u32,
            cell_height: viewport.height / rows as u32,
        }
    }

    /// Cell of the chart at `index`, assigned in row-major order.
    #[must_use]
    pub fn cell_rect(self, index: usize) -> Rect {
        let row = index / self.cols;
        let col = index % self.cols;
        Rect::new(
            col as f64 * f64::from(self.cell_width),
            row as f64 * f64::from(self.cell_height),
            f64::from(self.cell_width),
            f64::from(self.cell_height),
        )
    }
}
