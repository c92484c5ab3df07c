use std::fmt;
use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface, ImageSurfaceDataOwned};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, RectPrimitive, RectStyle, RenderFrame, Renderer, TextExtents, TextHAlign,
    TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Extension for renderers that can draw into an external Cairo context
/// (for example a window surface owned by the host toolkit).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Draws into an offscreen ARGB surface that follows the frame viewport,
/// or onto an external context through `CairoContextRenderer`. Text is
/// shaped by Pango and honors rotation.
///
/// Between frames the surface is held as owned pixel data, so the renderer
/// is `Send` and can move onto a dashboard's redraw thread.
pub struct CairoRenderer {
    surface: Option<ImageSurfaceDataOwned>,
    surface_size: (i32, i32),
    last_stats: CairoRenderStats,
}

impl fmt::Debug for CairoRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CairoRenderer")
            .field("surface_size", &self.surface_size)
            .field("last_stats", &self.last_stats)
            .finish_non_exhaustive()
    }
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        let mut renderer = Self {
            surface: None,
            surface_size: (width, height),
            last_stats: CairoRenderStats::default(),
        };
        renderer.check_in(create_surface(width, height)?)?;
        Ok(renderer)
    }

    /// Width and height of the offscreen surface in pixels.
    #[must_use]
    pub fn surface_size(&self) -> (i32, i32) {
        self.surface_size
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn write_png(&mut self, path: impl AsRef<Path>) -> ChartResult<()> {
        let (width, height) = self.surface_size;
        let surface = self.check_out(width, height)?;
        let written = File::create(path.as_ref())
            .map_err(|err| ChartError::System(format!("failed to create png file: {err}")))
            .and_then(|mut file| {
                surface
                    .write_to_png(&mut file)
                    .map_err(|err| ChartError::System(format!("failed to write png: {err}")))
            });
        self.check_in(surface)?;
        written
    }

    /// Takes the surface out of its owned form, recreating it on a size change.
    fn check_out(&mut self, width: i32, height: i32) -> ChartResult<ImageSurface> {
        match self.surface.take().map(ImageSurfaceDataOwned::into_inner) {
            Some(surface) if surface.width() == width && surface.height() == height => Ok(surface),
            _ => create_surface(width, height),
        }
    }

    /// Parks the surface again; every context on it must be dropped by now.
    fn check_in(&mut self, surface: ImageSurface) -> ChartResult<()> {
        let size = (surface.width(), surface.height());
        let owned = surface.take_data().map_err(|err| {
            ChartError::System(format!("cairo surface is still borrowed: {err}"))
        })?;
        self.surface = Some(owned);
        self.surface_size = size;
        Ok(())
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, frame.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for rect in &frame.rects {
            draw_rect(context, *rect)?;
            stats.rects_drawn += 1;
        }
        for text in &frame.texts {
            draw_text(context, text)?;
            stats.texts_drawn += 1;
        }

        context.target().flush();
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let (Ok(width), Ok(height)) = (
            i32::try_from(frame.viewport.width),
            i32::try_from(frame.viewport.height),
        ) else {
            return Err(ChartError::InvalidViewport {
                width: frame.viewport.width,
                height: frame.viewport.height,
            });
        };
        let surface = self.check_out(width, height)?;
        let drawn = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))
            .and_then(|context| self.render_with_context(&context, frame));
        self.check_in(surface)?;
        drawn
    }

    fn supports_rotated_text(&self) -> bool {
        true
    }

    fn measure_text(&self, text: &str, font_size_px: f64) -> Option<TextExtents> {
        let layout = measuring_layout(text, font_size_px)?;
        let (width, height) = layout.pixel_size();
        Some(TextExtents {
            width: f64::from(width),
            height: f64::from(height),
        })
    }

    fn line_height(&self, font_size_px: f64) -> f64 {
        measuring_layout("Ag", font_size_px)
            .map(|layout| f64::from(layout.pixel_size().1))
            .filter(|height| *height > 0.0)
            .unwrap_or(font_size_px * crate::render::DEFAULT_LINE_HEIGHT_RATIO)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn create_surface(width: i32, height: i32) -> ChartResult<ImageSurface> {
    if width <= 0 || height <= 0 {
        return Err(ChartError::InvalidData(
            "cairo surface size must be > 0".to_owned(),
        ));
    }
    ImageSurface::create(Format::ARgb32, width, height).map_err(|err| {
        ChartError::System(format!("failed to create cairo surface: {err}"))
    })
}

// Measurement uses a scratch surface so the drawing surface stays parked.
fn measuring_layout(text: &str, font_size_px: f64) -> Option<pango::Layout> {
    let surface = ImageSurface::create(Format::ARgb32, 1, 1).ok()?;
    let context = Context::new(&surface).ok()?;
    Some(build_layout(&context, text, font_size_px))
}

fn build_layout(context: &Context, text: &str, font_size_px: f64) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {font_size_px}px"));
    layout.set_font_description(Some(&font_description));
    layout.set_text(text);
    layout
}

fn apply_color(context: &Context, color: Color) {
    let (red, green, blue) = color.to_unit_rgb();
    context.set_source_rgb(red, green, blue);
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> ChartResult<()> {
    apply_color(context, rect.color);
    match rect.style {
        RectStyle::Fill => {
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))
        }
        RectStyle::Outline { line_width } => {
            // Half-pixel offset keeps 1px strokes crisp.
            context.rectangle(rect.x + 0.5, rect.y + 0.5, rect.width, rect.height);
            context.set_line_width(line_width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke rectangle", err))
        }
    }
}

fn draw_text(context: &Context, text: &TextPrimitive) -> ChartResult<()> {
    let layout = build_layout(context, &text.text, text.font_size_px);
    let (text_width, _) = layout.pixel_size();
    let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
    let dx = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -f64::from(text_width) / 2.0,
        TextHAlign::Right => -f64::from(text_width),
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    apply_color(context, text.color);
    context.translate(text.x, text.y);
    context.rotate(text.rotation_rad);
    context.move_to(dx, -baseline);
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::System(format!("{prefix}: {err}"))
}
