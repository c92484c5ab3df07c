use std::thread;
use std::time::Duration;

use barboard::api::{Dashboard, DashboardConfig, DashboardEvent};
use barboard::core::{LabelAlignment, LabelOptions, LabelOrientation, Viewport};
use barboard::render::RecordingRenderer;
use barboard::telemetry::init_default_tracing;
use barboard::window::{HeadlessWindow, WindowEvent};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = init_default_tracing();

    let (window, window_handle) = HeadlessWindow::new(Viewport::new(800, 600))?;
    let (renderer, log) = RecordingRenderer::new();
    let config = DashboardConfig::new(vec![4, 3]).with_window_title("CPU Quality Charts");
    let dashboard = Dashboard::new(config, window, renderer)?;
    let events = dashboard.events();

    dashboard.set_chart_title(0, "Quality CPU 1 (Horizontal Labels)")?;
    dashboard.set_chart_title(1, "Quality CPU 2 (Vertical Labels)")?;
    dashboard.set_column_label_options(
        0,
        Some(LabelOptions::new(
            LabelOrientation::Horizontal,
            LabelAlignment::Left,
            6,
        )),
    )?;
    dashboard.set_column_label_options(
        1,
        Some(LabelOptions::new(
            LabelOrientation::VerticalBottomLeft,
            LabelAlignment::Left,
            0,
        )),
    )?;

    for (column, (label, value1, value2)) in [
        ("core A", 40.0, 60.0),
        ("core B long name", 75.0, 89.0),
        ("HT 1", 10.0, 30.0),
        ("HT 2", 21.0, 62.0),
    ]
    .into_iter()
    .enumerate()
    {
        dashboard.set_column_label(0, column, label)?;
        dashboard.set_column_values(0, column, value1, value2)?;
    }
    for (column, (label, value1, value2)) in [
        ("core Z", 55.0, 80.0),
        ("turbo", 48.0, 70.0),
        ("E-core", 17.0, 92.0),
    ]
    .into_iter()
    .enumerate()
    {
        dashboard.set_column_label(1, column, label)?;
        dashboard.set_column_values(1, column, value1, value2)?;
    }
    dashboard.update()?;

    // Another thread animates the first bar while the main thread waits for close.
    let handle = dashboard.handle();
    let animator = thread::spawn(move || -> barboard::ChartResult<()> {
        for tick in 0..20_u32 {
            let tick = f64::from(tick);
            handle.set_column_values(0, 0, 40.0 + tick % 50.0, 60.0 + tick % 30.0)?;
            handle.update()?;
            thread::sleep(Duration::from_millis(25));
        }
        Ok(())
    });
    animator
        .join()
        .map_err(|_| "animator thread panicked")??;

    window_handle.push_event(WindowEvent::CloseRequest);
    if events.recv_timeout(Duration::from_secs(2)) == Ok(DashboardEvent::Closed) {
        println!("window closed");
    }

    println!("window title: {}", window_handle.title());
    println!("repaints: {}", dashboard.repaint_count());
    if let Some(frame) = log.last_frame() {
        println!(
            "last frame: rects={} texts={}",
            frame.rects.len(),
            frame.texts.len()
        );
    }
    println!("{}", dashboard.snapshot().to_json_contract_v1_pretty()?);

    dashboard.shutdown()?;
    Ok(())
}
