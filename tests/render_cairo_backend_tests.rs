#![cfg(feature = "cairo-backend")]

use std::thread;
use std::time::{Duration, Instant};

use barboard::ChartError;
use barboard::api::{Dashboard, DashboardConfig, DashboardState, build_render_frame};
use barboard::core::{LabelAlignment, LabelOptions, LabelOrientation, Viewport};
use barboard::render::{CairoContextRenderer, CairoRenderer, Renderer};
use barboard::window::{HeadlessWindow, WindowEvent};
use cairo::{Context, Format, ImageSurface};

fn assert_send<T: Send>() {}

fn state(viewport: Viewport) -> DashboardState {
    let mut state = DashboardState::new(&DashboardConfig::new(vec![3, 2]), viewport)
        .expect("state");
    state.set_chart_title(0, "CPU").expect("title");
    state.set_column_label(0, 0, "core0").expect("label");
    state.set_column_values(0, 0, 20.0, 80.0).expect("values");
    state
        .set_column_label_options(
            1,
            Some(LabelOptions::new(
                LabelOrientation::VerticalBottomLeft,
                LabelAlignment::Left,
                0,
            )),
        )
        .expect("options");
    state.set_column_label(1, 0, "memory").expect("label");
    state
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_every_primitive_and_follows_viewport() {
    let mut renderer = CairoRenderer::new(100, 100).expect("renderer");
    assert!(renderer.supports_rotated_text());
    let frame = build_render_frame(&state(Viewport::new(900, 500)), &renderer);

    renderer.render(&frame).expect("render");
    let stats = renderer.last_stats();
    assert_eq!(stats.rects_drawn, frame.rects.len());
    assert_eq!(stats.texts_drawn, frame.texts.len());
    assert_eq!(renderer.surface_size(), (900, 500));
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let mut renderer = CairoRenderer::new(600, 320).expect("renderer");
    let frame = build_render_frame(&state(Viewport::new(600, 320)), &renderer);

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("external render");
    assert_eq!(renderer.last_stats().texts_drawn, frame.texts.len());
}

#[test]
fn cairo_renderer_measures_text() {
    let renderer = CairoRenderer::new(200, 100).expect("renderer");
    let short = renderer.measure_text("ab", 13.0).expect("extents");
    let long = renderer.measure_text("abcdefgh", 13.0).expect("extents");
    assert!(long.width > short.width);
    assert!(renderer.line_height(13.0) > 0.0);
}

#[test]
fn cairo_renderer_writes_png() {
    let mut renderer = CairoRenderer::new(320, 240).expect("renderer");
    let frame = build_render_frame(&state(Viewport::new(320, 240)), &renderer);
    renderer.render(&frame).expect("render");

    let path = std::env::temp_dir().join("barboard_cairo_backend_test.png");
    renderer.write_png(&path).expect("png");
    let metadata = std::fs::metadata(&path).expect("png exists");
    assert!(metadata.len() > 0);
    let _ = std::fs::remove_file(path);
}

#[test]
fn cairo_renderer_runs_on_the_redraw_thread() {
    assert_send::<CairoRenderer>();

    let (window, window_handle) = HeadlessWindow::new(Viewport::new(320, 240)).expect("window");
    let renderer = CairoRenderer::new(1, 1).expect("renderer");
    let config = DashboardConfig::new(vec![3, 2]).with_poll_interval_ms(1);
    let dashboard = Dashboard::new(config, window, renderer).expect("dashboard init");
    dashboard.set_column_values(0, 1, 25.0, 75.0).expect("values");
    dashboard.set_column_label(0, 1, "core1").expect("label");
    dashboard.update().expect("update");

    let deadline = Instant::now() + Duration::from_secs(5);
    while dashboard.repaint_count() == 0 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(2));
    }
    assert!(dashboard.repaint_count() >= 1);

    window_handle.push_event(WindowEvent::Resize {
        width: 400,
        height: 300,
    });
    let deadline = Instant::now() + Duration::from_secs(5);
    while dashboard.repaint_count() < 2 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(2));
    }

    let (_window, mut renderer) = dashboard.into_parts().expect("parts");
    assert_eq!(renderer.surface_size(), (400, 300));
    assert!(renderer.last_stats().rects_drawn > 0);
    assert!(renderer.last_stats().texts_drawn > 0);

    let path = std::env::temp_dir().join("barboard_cairo_dashboard_test.png");
    renderer.write_png(&path).expect("png");
    assert!(std::fs::metadata(&path).expect("png exists").len() > 0);
    let _ = std::fs::remove_file(path);
}
