use std::thread;
use std::time::{Duration, Instant};

use barboard::api::{Dashboard, DashboardConfig};
use barboard::core::{LabelAlignment, LabelOptions, LabelOrientation, Viewport};
use barboard::render::CairoRenderer;
use barboard::window::HeadlessWindow;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (window, _window_handle) = HeadlessWindow::new(Viewport::new(1024, 640))?;
    let config = DashboardConfig::new(vec![8, 6, 4, 12, 5]).with_poll_interval_ms(5);
    let columns = config.columns_per_chart.clone();
    let dashboard = Dashboard::new(config, window, CairoRenderer::new(1, 1)?)?;

    let orientations = [
        LabelOrientation::Horizontal,
        LabelOrientation::VerticalBottomLeft,
        LabelOrientation::VerticalBottomRight,
    ];
    for (chart, &count) in columns.iter().enumerate() {
        dashboard.set_chart_title(chart, &format!("Node {}", chart + 1))?;
        let alignment = if chart % 2 == 0 {
            LabelAlignment::Left
        } else {
            LabelAlignment::Right
        };
        dashboard.set_column_label_options(
            chart,
            Some(LabelOptions::new(
                orientations[chart % orientations.len()],
                alignment,
                8,
            )),
        )?;
        for column in 0..count {
            let phase = (chart * 7 + column * 13) as f64;
            let value2 = 50.0 + (phase / 5.0).sin() * 45.0;
            dashboard.set_column_values(chart, column, value2 * 0.6, value2)?;
            dashboard.set_column_label(chart, column, &format!("sensor {column}"))?;
        }
    }
    dashboard.update()?;

    let deadline = Instant::now() + Duration::from_secs(5);
    while dashboard.repaint_count() == 0 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }

    let (_window, mut renderer) = dashboard.into_parts()?;
    let path = std::env::temp_dir().join("barboard_dashboard.png");
    renderer.write_png(&path)?;
    let stats = renderer.last_stats();
    println!(
        "wrote {} (rects={} texts={})",
        path.display(),
        stats.rects_drawn,
        stats.texts_drawn
    );
    Ok(())
}
