use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer, TextExtents};

#[derive(Debug, Default)]
struct RenderLogInner {
    frames_rendered: u64,
    last_frame: Option<RenderFrame>,
}

/// Shared view of the frames a `RecordingRenderer` has drawn.
///
/// The renderer itself moves onto the redraw thread; the log stays with the
/// host so repaints can be observed from outside.
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    inner: Arc<Mutex<RenderLogInner>>,
}

impl RenderLog {
    fn lock(&self) -> MutexGuard<'_, RenderLogInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.lock().frames_rendered
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<RenderFrame> {
        self.lock().last_frame.clone()
    }
}

/// Renderer that validates and keeps the latest frame in a shared `RenderLog`.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    log: RenderLog,
    rotated_text: bool,
    glyph_advance_px: Option<f64>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> (Self, RenderLog) {
        let renderer = Self::default();
        let log = renderer.log.clone();
        (renderer, log)
    }

    #[must_use]
    pub fn with_rotated_text(mut self, enabled: bool) -> Self {
        self.rotated_text = enabled;
        self
    }

    /// Measures text as `chars * advance` instead of reporting no metrics.
    #[must_use]
    pub fn with_fixed_glyph_advance(mut self, advance_px: f64) -> Self {
        self.glyph_advance_px = Some(advance_px);
        self
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut inner = self.log.lock();
        inner.frames_rendered += 1;
        inner.last_frame = Some(frame.clone());
        Ok(())
    }

    fn supports_rotated_text(&self) -> bool {
        self.rotated_text
    }

    fn measure_text(&self, text: &str, font_size_px: f64) -> Option<TextExtents> {
        self.glyph_advance_px.map(|advance| TextExtents {
            width: text.chars().count() as f64 * advance,
            height: font_size_px,
        })
    }
}
