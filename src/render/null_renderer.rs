use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless dashboards.
///
/// It still validates frame content so invalid geometry surfaces without a
/// real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_rect_count: usize,
    pub last_text_count: usize,
    pub frames_rendered: u64,
    rotated_text: bool,
}

impl NullRenderer {
    /// Reports rotation support so vertical labels are emitted as single runs.
    #[must_use]
    pub fn with_rotated_text(mut self, enabled: bool) -> Self {
        self.rotated_text = enabled;
        self
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_rect_count = frame.rects.len();
        self.last_text_count = frame.texts.len();
        self.frames_rendered += 1;
        Ok(())
    }

    fn supports_rotated_text(&self) -> bool {
        self.rotated_text
    }
}
