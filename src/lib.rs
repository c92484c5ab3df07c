//! barboard: live-updating bar-chart dashboards.
//!
//! Charts are tiled into one window and repainted by a dedicated redraw
//! thread. Any thread may write labels and values through a
//! `DashboardHandle`; repaint requests made between two redraw cycles
//! collapse into a single repaint. Windowing and drawing are pluggable
//! through `window::WindowSystem` and `render::Renderer`.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;
pub mod window;

pub use api::{Dashboard, DashboardConfig, DashboardHandle, Style};
pub use error::{ChartError, ChartResult, ErrorKind};
