mod frame;
mod null_renderer;
mod primitives;
mod recording_renderer;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, RectPrimitive, RectStyle, TextExtents, TextHAlign, TextPrimitive};
pub use recording_renderer::{RecordingRenderer, RenderLog};

use crate::error::ChartResult;

/// Line height used when a backend cannot report font metrics.
pub const DEFAULT_LINE_HEIGHT_RATIO: f64 = 1.25;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame`; one `render` call is
/// one complete repaint, flushed to its target before returning.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    /// Whether `TextPrimitive::rotation_rad` is honored.
    fn supports_rotated_text(&self) -> bool {
        false
    }

    /// Rendered size of `text`, when the backend can shape text.
    fn measure_text(&self, _text: &str, _font_size_px: f64) -> Option<TextExtents> {
        None
    }

    fn line_height(&self, font_size_px: f64) -> f64 {
        font_size_px * DEFAULT_LINE_HEIGHT_RATIO
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
