use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Receiver;
use tracing::{debug, info, warn};

use crate::core::{LabelOptions, ValueRange, VerticalLabelMode, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;
use crate::window::WindowSystem;

use super::redraw_coordinator::{CloseHandler, RedrawWorker, SharedDashboard};
use super::{
    CoordinatorState, DashboardConfig, DashboardEvent, DashboardSnapshot, DashboardState, Style,
};

const REDRAW_THREAD_NAME: &str = "barboard-redraw";

/// Cloneable access to a dashboard's state from any thread.
///
/// Setters lock the state only for their own write. None of them repaint;
/// style and range changes, `update` and `request_redraw` mark a redraw as
/// pending and the redraw thread performs it on its next cycle.
#[derive(Clone)]
pub struct DashboardHandle {
    shared: Arc<SharedDashboard>,
}

impl DashboardHandle {
    pub fn set_window_title(&self, title: &str) -> ChartResult<()> {
        self.shared.lock_state().set_window_title(title)
    }

    pub fn set_chart_title(&self, chart: usize, title: &str) -> ChartResult<()> {
        self.shared.lock_state().set_chart_title(chart, title)
    }

    pub fn set_column_label(&self, chart: usize, column: usize, label: &str) -> ChartResult<()> {
        self.shared.lock_state().set_column_label(chart, column, label)
    }

    pub fn set_column_label_options(
        &self,
        chart: usize,
        options: Option<LabelOptions>,
    ) -> ChartResult<()> {
        self.shared
            .lock_state()
            .set_column_label_options(chart, options)
    }

    pub fn set_column_values(
        &self,
        chart: usize,
        column: usize,
        value1: f64,
        value2: f64,
    ) -> ChartResult<()> {
        self.shared
            .lock_state()
            .set_column_values(chart, column, value1, value2)
    }

    pub fn set_value_range(&self, min: i32, max: i32) -> ChartResult<()> {
        self.shared.lock_state().set_value_range(min, max)?;
        self.shared.request_redraw();
        Ok(())
    }

    pub fn set_style(&self, style: Style) {
        self.shared.lock_state().set_style(style);
        self.shared.request_redraw();
    }

    /// Marks a redraw as pending; never blocks and never repaints itself.
    pub fn request_redraw(&self) {
        self.shared.request_redraw();
    }

    /// Publishes the writes made so far with one coalesced repaint.
    pub fn update(&self) -> ChartResult<()> {
        self.shared.request_redraw();
        Ok(())
    }

    #[must_use]
    pub fn is_redraw_pending(&self) -> bool {
        self.shared.is_redraw_pending()
    }

    pub fn column_values(&self, chart: usize, column: usize) -> ChartResult<(f64, f64)> {
        Ok(self.shared.lock_state().column(chart, column)?.values())
    }

    pub fn display_label(&self, chart: usize, column: usize) -> ChartResult<String> {
        self.shared.lock_state().display_label(chart, column)
    }

    #[must_use]
    pub fn value_range(&self) -> ValueRange {
        self.shared.lock_state().value_range()
    }

    #[must_use]
    pub fn style(&self) -> Style {
        self.shared.lock_state().style()
    }

    #[must_use]
    pub fn window_title(&self) -> String {
        self.shared.lock_state().window_title().to_owned()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.shared.lock_state().viewport()
    }

    #[must_use]
    pub fn coordinator_state(&self) -> CoordinatorState {
        self.shared.coordinator_state()
    }

    /// Successful repaints since the dashboard was created.
    #[must_use]
    pub fn repaint_count(&self) -> u64 {
        self.shared.repaint_count()
    }

    /// Receiver for `DashboardEvent`s published by the redraw thread.
    #[must_use]
    pub fn events(&self) -> Receiver<DashboardEvent> {
        self.shared.events()
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        let state = self.shared.lock_state();
        state.snapshot(self.shared.coordinator_state(), self.shared.repaint_count())
    }
}

type ParkedParts<W, R> = Arc<Mutex<Option<RedrawWorker<W, R>>>>;

/// Live bar-chart dashboard with its own redraw thread.
///
/// The window and renderer live on the redraw thread while it runs and come
/// back to the dashboard when it stops. Dropping the dashboard stops the thread
/// and releases both.
pub struct Dashboard<W, R>
where
    W: WindowSystem + Send + 'static,
    R: Renderer + Send + 'static,
{
    handle: DashboardHandle,
    parts: Option<(W, R)>,
    worker: Option<JoinHandle<Option<(W, R)>>>,
    close_handler: Option<CloseHandler>,
    poll_interval: Duration,
    vertical_label_mode: VerticalLabelMode,
}

impl<W, R> Dashboard<W, R>
where
    W: WindowSystem + Send + 'static,
    R: Renderer + Send + 'static,
{
    /// Validates `config`, seeds the charts, titles the window and starts the
    /// redraw thread.
    pub fn new(config: DashboardConfig, window: W, renderer: R) -> ChartResult<Self> {
        Self::build(config, window, renderer, None)
    }

    /// Like `new`, with `handler` called once from the redraw thread when the
    /// window asks to close.
    pub fn with_close_handler<F>(
        config: DashboardConfig,
        window: W,
        renderer: R,
        handler: F,
    ) -> ChartResult<Self>
    where
        F: Fn(DashboardEvent) + Send + Sync + 'static,
    {
        Self::build(config, window, renderer, Some(Arc::new(handler)))
    }

    fn build(
        config: DashboardConfig,
        mut window: W,
        renderer: R,
        close_handler: Option<CloseHandler>,
    ) -> ChartResult<Self> {
        config.validate()?;
        let viewport = config.initial_viewport.unwrap_or_else(|| window.size());
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let mut state = DashboardState::new(&config, viewport)?;
        if let Some(title) = state.take_pending_window_title() {
            window.set_title(&title)?;
        }

        let vertical_label_mode =
            VerticalLabelMode::for_rotation_support(renderer.supports_rotated_text());
        let mut dashboard = Self {
            handle: DashboardHandle {
                shared: Arc::new(SharedDashboard::new(state)),
            },
            parts: Some((window, renderer)),
            worker: None,
            close_handler,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            vertical_label_mode,
        };
        dashboard.start()?;
        info!(
            charts = config.chart_count(),
            width = viewport.width,
            height = viewport.height,
            ?vertical_label_mode,
            "dashboard initialized"
        );
        Ok(dashboard)
    }

    /// Cloneable handle for caller threads.
    #[must_use]
    pub fn handle(&self) -> DashboardHandle {
        self.handle.clone()
    }

    /// Moves from `Stopped` to `Running`; a no-op while already running.
    ///
    /// Also valid after the window asked to close, in which case the
    /// finished thread is reaped first.
    pub fn start(&mut self) -> ChartResult<()> {
        if self.handle.shared.is_running() {
            return Ok(());
        }
        self.reap_worker()?;
        let Some((window, renderer)) = self.parts.take() else {
            return Err(ChartError::System(
                "window and renderer are no longer available".to_owned(),
            ));
        };

        let shared = Arc::clone(&self.handle.shared);
        let parked: ParkedParts<W, R> = Arc::new(Mutex::new(Some(RedrawWorker::new(
            Arc::clone(&shared),
            window,
            renderer,
            self.poll_interval,
            self.close_handler.clone(),
        ))));
        let thread_parked = Arc::clone(&parked);

        shared.set_running(true);
        let spawned = thread::Builder::new()
            .name(REDRAW_THREAD_NAME.to_owned())
            .spawn(move || {
                let worker = thread_parked
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .take();
                worker.map(RedrawWorker::run)
            });

        match spawned {
            Ok(join) => {
                self.worker = Some(join);
                debug!("redraw coordinator running");
                Ok(())
            }
            Err(err) => {
                shared.set_running(false);
                // The closure never ran, so the collaborators are still parked.
                let worker = parked
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .take();
                self.parts = worker.map(RedrawWorker::into_parts);
                warn!(error = %err, "failed to spawn redraw thread");
                Err(ChartError::System(format!(
                    "failed to spawn redraw thread: {err}"
                )))
            }
        }
    }

    /// Stops the redraw thread and waits for it; idempotent.
    pub fn stop(&mut self) -> ChartResult<()> {
        self.handle.shared.set_running(false);
        if let Some(worker) = &self.worker {
            worker.thread().unpark();
        }
        self.reap_worker()
    }

    /// Stops the redraw thread and releases the window and renderer.
    pub fn shutdown(mut self) -> ChartResult<()> {
        let result = self.stop();
        self.parts = None;
        debug!("dashboard shut down");
        result
    }

    /// Stops the redraw thread and hands back the window and renderer.
    pub fn into_parts(mut self) -> ChartResult<(W, R)> {
        self.stop()?;
        self.parts.take().ok_or_else(|| {
            ChartError::System("window and renderer are no longer available".to_owned())
        })
    }

    fn reap_worker(&mut self) -> ChartResult<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };
        match worker.join() {
            Ok(parts) => {
                self.parts = parts;
                debug!("redraw coordinator stopped");
                Ok(())
            }
            Err(_) => Err(ChartError::System("redraw thread panicked".to_owned())),
        }
    }

    #[must_use]
    pub fn coordinator_state(&self) -> CoordinatorState {
        self.handle.coordinator_state()
    }

    /// How vertical labels are drawn by this dashboard's renderer.
    #[must_use]
    pub fn vertical_label_mode(&self) -> VerticalLabelMode {
        self.vertical_label_mode
    }

    #[must_use]
    pub fn events(&self) -> Receiver<DashboardEvent> {
        self.handle.events()
    }

    #[must_use]
    pub fn repaint_count(&self) -> u64 {
        self.handle.repaint_count()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.handle.viewport()
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.handle.snapshot()
    }

    pub fn set_window_title(&self, title: &str) -> ChartResult<()> {
        self.handle.set_window_title(title)
    }

    pub fn set_chart_title(&self, chart: usize, title: &str) -> ChartResult<()> {
        self.handle.set_chart_title(chart, title)
    }

    pub fn set_column_label(&self, chart: usize, column: usize, label: &str) -> ChartResult<()> {
        self.handle.set_column_label(chart, column, label)
    }

    pub fn set_column_label_options(
        &self,
        chart: usize,
        options: Option<LabelOptions>,
    ) -> ChartResult<()> {
        self.handle.set_column_label_options(chart, options)
    }

    pub fn set_column_values(
        &self,
        chart: usize,
        column: usize,
        value1: f64,
        value2: f64,
    ) -> ChartResult<()> {
        self.handle.set_column_values(chart, column, value1, value2)
    }

    pub fn set_value_range(&self, min: i32, max: i32) -> ChartResult<()> {
        self.handle.set_value_range(min, max)
    }

    pub fn set_style(&self, style: Style) {
        self.handle.set_style(style);
    }

    pub fn request_redraw(&self) {
        self.handle.request_redraw();
    }

    pub fn update(&self) -> ChartResult<()> {
        self.handle.update()
    }
}

impl<W, R> Drop for Dashboard<W, R>
where
    W: WindowSystem + Send + 'static,
    R: Renderer + Send + 'static,
{
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!(error = %err, "failed to stop redraw thread on drop");
        }
    }
}
