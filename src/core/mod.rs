pub mod chart_layout;
pub mod grid;
pub mod label;
pub mod label_placement;
pub mod limits;
pub mod types;
pub mod value_range;

pub use chart_layout::{BarGeometry, ChartLayout};
pub use grid::{GridLayout, pack_grid};
pub use label::{LabelAlignment, LabelOptions, LabelOrientation, format_label};
pub use label_placement::{
    LabelMetrics, LabelPlacement, PlacedRun, PlacementStrategy, RunAnchor, VerticalLabelMode,
    place_column_label, reserved_label_margin,
};
pub use limits::{MAX_CHARTS, MAX_COLUMNS, MAX_LABEL_LEN, MAX_TITLE_LEN, MAX_WINDOW_TITLE_LEN};
pub use types::{Rect, Viewport};
pub use value_range::{ValueRange, format_axis_value};
