mod chart_model;
mod chart_state;
mod dashboard;
mod engine_config;
mod redraw_coordinator;
mod render_frame_builder;
mod snapshot;
mod style;
mod validation;

pub use chart_model::{Chart, Column};
pub use chart_state::{DashboardState, FontSizes};
pub use dashboard::{Dashboard, DashboardHandle};
pub use engine_config::{
    DEFAULT_FONT_SIZE_PX, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WINDOW_TITLE, DashboardConfig,
};
pub use redraw_coordinator::{CoordinatorState, DashboardEvent};
pub use render_frame_builder::build_render_frame;
pub use snapshot::{
    ChartSnapshot, ColumnSnapshot, DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1, DashboardSnapshot,
    DashboardSnapshotJsonContractV1,
};
pub use style::Style;
