//! Display collaborator contract consumed by the redraw thread.

mod headless;

pub use headless::{HeadlessWindow, HeadlessWindowHandle};

use crate::core::Viewport;
use crate::error::ChartResult;

/// Display-system event delivered to the redraw thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// Window contents were damaged and must be repainted.
    Expose,
    /// Window was resized to the given dimensions.
    Resize { width: u32, height: u32 },
    /// The user or window manager asked to close the window.
    CloseRequest,
    /// Anything the dashboard does not react to.
    Other,
}

/// A window owned by exactly one thread at a time.
///
/// Implementations are moved onto the redraw thread while it runs and are
/// released when dropped.
pub trait WindowSystem {
    /// Current window size in pixels.
    fn size(&self) -> Viewport;

    /// Next queued event without blocking, or `None` when the queue is empty.
    fn poll_event(&mut self) -> Option<WindowEvent>;

    /// Sets both the window title and its icon title.
    fn set_title(&mut self, title: &str) -> ChartResult<()>;
}
