use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::Viewport;
use crate::render::Renderer;
use crate::window::{WindowEvent, WindowSystem};

use super::{DashboardState, build_render_frame};

/// Lifecycle of the redraw thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinatorState {
    Stopped,
    Running,
}

/// Notification delivered to the host from the redraw thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    /// The window asked to close; the redraw thread has exited its loop.
    Closed,
}

pub(crate) type CloseHandler = Arc<dyn Fn(DashboardEvent) + Send + Sync>;

/// State shared between caller threads and the redraw thread.
pub(crate) struct SharedDashboard {
    state: Mutex<DashboardState>,
    redraw_pending: AtomicBool,
    running: AtomicBool,
    repaints: AtomicU64,
    events_tx: Sender<DashboardEvent>,
    events_rx: Receiver<DashboardEvent>,
}

impl SharedDashboard {
    pub(crate) fn new(state: DashboardState) -> Self {
        let (events_tx, events_rx) = crossbeam_channel::unbounded();
        Self {
            state: Mutex::new(state),
            redraw_pending: AtomicBool::new(false),
            running: AtomicBool::new(false),
            repaints: AtomicU64::new(0),
            events_tx,
            events_rx,
        }
    }

    /// Locks the state, recovering it if a holder panicked.
    pub(crate) fn lock_state(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn request_redraw(&self) {
        self.redraw_pending.store(true, Ordering::Release);
    }

    pub(crate) fn is_redraw_pending(&self) -> bool {
        self.redraw_pending.load(Ordering::Acquire)
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub(crate) fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Release);
    }

    pub(crate) fn coordinator_state(&self) -> CoordinatorState {
        if self.is_running() {
            CoordinatorState::Running
        } else {
            CoordinatorState::Stopped
        }
    }

    pub(crate) fn repaint_count(&self) -> u64 {
        self.repaints.load(Ordering::Acquire)
    }

    pub(crate) fn events(&self) -> Receiver<DashboardEvent> {
        self.events_rx.clone()
    }

    fn publish(&self, event: DashboardEvent) {
        let _ = self.events_tx.send(event);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CycleOutcome {
    Continue,
    Closed,
}

/// Owns the window and renderer while the redraw thread runs.
///
/// Each cycle drains window events, applies a changed window title and
/// performs at most one requested repaint, however many requests arrived.
/// The close handler lives here rather than in `SharedDashboard`, so a
/// handler holding a `DashboardHandle` does not keep the state alive.
pub(crate) struct RedrawWorker<W, R> {
    shared: Arc<SharedDashboard>,
    window: W,
    renderer: R,
    poll_interval: Duration,
    close_handler: Option<CloseHandler>,
}

impl<W: WindowSystem, R: Renderer> RedrawWorker<W, R> {
    pub(crate) fn new(
        shared: Arc<SharedDashboard>,
        window: W,
        renderer: R,
        poll_interval: Duration,
        close_handler: Option<CloseHandler>,
    ) -> Self {
        Self {
            shared,
            window,
            renderer,
            poll_interval,
            close_handler,
        }
    }

    /// Runs cycles until stopped or closed, then hands the collaborators back.
    pub(crate) fn run(mut self) -> (W, R) {
        debug!("redraw thread started");
        while self.shared.is_running() {
            if self.cycle() == CycleOutcome::Closed {
                break;
            }
            thread::park_timeout(self.poll_interval);
        }
        debug!(repaints = self.shared.repaint_count(), "redraw thread exiting");
        self.into_parts()
    }

    pub(crate) fn into_parts(self) -> (W, R) {
        (self.window, self.renderer)
    }

    pub(crate) fn cycle(&mut self) -> CycleOutcome {
        while let Some(event) = self.window.poll_event() {
            match event {
                WindowEvent::Expose => self.repaint("expose"),
                WindowEvent::Resize { width, height } => {
                    self.shared
                        .lock_state()
                        .set_viewport(Viewport::new(width, height));
                    self.repaint("resize");
                }
                WindowEvent::CloseRequest => {
                    debug!("window close requested");
                    self.shared.set_running(false);
                    self.shared.publish(DashboardEvent::Closed);
                    if let Some(handler) = &self.close_handler {
                        handler(DashboardEvent::Closed);
                    }
                    return CycleOutcome::Closed;
                }
                WindowEvent::Other => {}
            }
        }

        self.apply_window_title();

        // Cleared before drawing so requests made during the repaint are kept.
        if self.shared.redraw_pending.swap(false, Ordering::AcqRel) {
            self.repaint("requested");
        }
        CycleOutcome::Continue
    }

    fn apply_window_title(&mut self) {
        let Some(title) = self.shared.lock_state().take_pending_window_title() else {
            return;
        };
        if let Err(err) = self.window.set_title(&title) {
            warn!(error = %err, "failed to set window title");
        }
    }

    fn repaint(&mut self, reason: &'static str) {
        let frame = {
            let state = self.shared.lock_state();
            if !state.viewport().is_valid() {
                trace!(reason, "skipping repaint of empty viewport");
                return;
            }
            build_render_frame(&state, &self.renderer)
        };
        match self.renderer.render(&frame) {
            Ok(()) => {
                let repaints = self.shared.repaints.fetch_add(1, Ordering::AcqRel) + 1;
                trace!(
                    reason,
                    repaints,
                    rects = frame.rects.len(),
                    texts = frame.texts.len(),
                    "repainted"
                );
            }
            Err(err) => warn!(reason, error = %err, "repaint failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::{CloseHandler, CycleOutcome, DashboardEvent, RedrawWorker, SharedDashboard};
    use crate::api::{DashboardConfig, DashboardState};
    use crate::core::Viewport;
    use crate::render::{RecordingRenderer, RenderLog};
    use crate::window::{HeadlessWindow, HeadlessWindowHandle, WindowEvent};

    type TestWorker = RedrawWorker<HeadlessWindow, RecordingRenderer>;

    fn worker(shared: &Arc<SharedDashboard>) -> (TestWorker, HeadlessWindowHandle, RenderLog) {
        worker_with_handler(shared, None)
    }

    fn worker_with_handler(
        shared: &Arc<SharedDashboard>,
        close_handler: Option<CloseHandler>,
    ) -> (TestWorker, HeadlessWindowHandle, RenderLog) {
        let (window, handle) = HeadlessWindow::new(Viewport::new(800, 600)).expect("window");
        let (renderer, log) = RecordingRenderer::new();
        let worker = RedrawWorker::new(
            Arc::clone(shared),
            window,
            renderer,
            Duration::from_millis(1),
            close_handler,
        );
        (worker, handle, log)
    }

    fn shared() -> Arc<SharedDashboard> {
        let state = DashboardState::new(&DashboardConfig::new(vec![2]), Viewport::new(800, 600))
            .expect("state");
        Arc::new(SharedDashboard::new(state))
    }

    #[test]
    fn many_requests_coalesce_into_one_repaint() {
        let shared = shared();
        let (mut worker, _handle, log) = worker(&shared);
        for _ in 0..50 {
            shared.request_redraw();
        }
        assert_eq!(worker.cycle(), CycleOutcome::Continue);
        assert_eq!(worker.cycle(), CycleOutcome::Continue);
        assert_eq!(log.frames_rendered(), 1);
        assert_eq!(shared.repaint_count(), 1);
        assert!(!shared.is_redraw_pending());
    }

    #[test]
    fn expose_and_resize_repaint_without_a_request() {
        let shared = shared();
        let (mut worker, handle, log) = worker(&shared);
        handle.push_event(WindowEvent::Expose);
        handle.push_event(WindowEvent::Resize {
            width: 400,
            height: 300,
        });
        worker.cycle();
        assert_eq!(log.frames_rendered(), 2);
        assert_eq!(shared.lock_state().viewport(), Viewport::new(400, 300));
        let frame = log.last_frame().expect("frame");
        assert_eq!(frame.viewport, Viewport::new(400, 300));
    }

    #[test]
    fn window_title_is_applied_by_the_worker() {
        let shared = shared();
        let (mut worker, handle, _log) = worker(&shared);
        worker.cycle();
        assert_eq!(handle.title(), "Barboard Charts");
        shared
            .lock_state()
            .set_window_title("CPU Quality Charts")
            .expect("title");
        assert_eq!(handle.title(), "Barboard Charts");
        worker.cycle();
        assert_eq!(handle.title(), "CPU Quality Charts");
    }

    #[test]
    fn close_request_stops_and_notifies_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let state = DashboardState::new(&DashboardConfig::new(vec![1]), Viewport::new(80, 60))
            .expect("state");
        let shared = Arc::new(SharedDashboard::new(state));
        shared.set_running(true);
        let events = shared.events();
        let handler: CloseHandler = Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let (mut worker, handle, log) = worker_with_handler(&shared, Some(handler));

        shared.request_redraw();
        handle.push_event(WindowEvent::CloseRequest);
        assert_eq!(worker.cycle(), CycleOutcome::Closed);
        assert!(!shared.is_running());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(events.try_recv(), Ok(DashboardEvent::Closed));
        assert_eq!(log.frames_rendered(), 0);
    }

    #[test]
    fn queued_resize_is_applied_before_a_pending_repaint() {
        let shared = shared();
        let (mut worker, handle, log) = worker(&shared);
        shared.request_redraw();
        handle.push_event(WindowEvent::Resize {
            width: 400,
            height: 300,
        });

        assert_eq!(worker.cycle(), CycleOutcome::Continue);
        assert_eq!(shared.repaint_count(), 2);
        assert_eq!(log.frames_rendered(), 2);
        let frame = log.last_frame().expect("coalesced frame");
        assert_eq!(frame.viewport, Viewport::new(400, 300));
        assert!(!shared.is_redraw_pending());
    }

    #[test]
    fn close_handler_holding_the_state_does_not_leak_it() {
        let shared = shared();
        let weak = Arc::downgrade(&shared);
        let captured = Arc::clone(&shared);
        let handler: CloseHandler = Arc::new(move |_| captured.request_redraw());
        let (worker, _handle, _log) = worker_with_handler(&shared, Some(handler));

        drop(shared);
        assert!(weak.upgrade().is_some());
        drop(worker.into_parts());
        assert!(weak.upgrade().is_none());
    }
}
