use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use tracing::trace;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::window::{WindowEvent, WindowSystem};

#[derive(Debug, Default)]
struct HeadlessShared {
    title: Mutex<String>,
    released: AtomicBool,
}

/// Window without a display server, fed by a `HeadlessWindowHandle`.
///
/// Used for offscreen rendering and tests: events pushed through the handle
/// are returned by `poll_event` in order.
#[derive(Debug)]
pub struct HeadlessWindow {
    size: Viewport,
    events: Receiver<WindowEvent>,
    shared: Arc<HeadlessShared>,
}

/// Host-side control of a `HeadlessWindow` living on another thread.
#[derive(Debug, Clone)]
pub struct HeadlessWindowHandle {
    events: Sender<WindowEvent>,
    shared: Arc<HeadlessShared>,
}

impl HeadlessWindow {
    pub fn new(size: Viewport) -> ChartResult<(Self, HeadlessWindowHandle)> {
        if !size.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: size.width,
                height: size.height,
            });
        }
        let (sender, receiver) = unbounded();
        let shared = Arc::new(HeadlessShared::default());
        let window = Self {
            size,
            events: receiver,
            shared: Arc::clone(&shared),
        };
        let handle = HeadlessWindowHandle {
            events: sender,
            shared,
        };
        Ok((window, handle))
    }
}

impl WindowSystem for HeadlessWindow {
    fn size(&self) -> Viewport {
        self.size
    }

    fn poll_event(&mut self) -> Option<WindowEvent> {
        match self.events.try_recv() {
            Ok(event) => {
                if let WindowEvent::Resize { width, height } = event {
                    self.size = Viewport::new(width, height);
                }
                Some(event)
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    fn set_title(&mut self, title: &str) -> ChartResult<()> {
        trace!(title, "headless window title");
        *self
            .shared
            .title
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = title.to_owned();
        Ok(())
    }
}

impl Drop for HeadlessWindow {
    fn drop(&mut self) {
        self.shared.released.store(true, Ordering::Release);
    }
}

impl HeadlessWindowHandle {
    /// Queues an event for the window; ignored once the window is released.
    pub fn push_event(&self, event: WindowEvent) {
        let _ = self.events.send(event);
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.shared
            .title
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the window has been dropped.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.shared.released.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::HeadlessWindow;
    use crate::core::Viewport;
    use crate::window::{WindowEvent, WindowSystem};

    #[test]
    fn events_are_polled_in_order_and_resize_updates_size() {
        let (mut window, handle) = HeadlessWindow::new(Viewport::new(800, 600)).expect("window");
        assert_eq!(window.poll_event(), None);

        handle.push_event(WindowEvent::Expose);
        handle.push_event(WindowEvent::Resize {
            width: 1024,
            height: 768,
        });
        assert_eq!(window.poll_event(), Some(WindowEvent::Expose));
        assert!(matches!(window.poll_event(), Some(WindowEvent::Resize { .. })));
        assert_eq!(window.size(), Viewport::new(1024, 768));
        assert_eq!(window.poll_event(), None);
    }

    #[test]
    fn title_and_release_are_visible_through_the_handle() {
        let (mut window, handle) = HeadlessWindow::new(Viewport::new(10, 10)).expect("window");
        window.set_title("CPU Quality Charts").expect("title");
        assert_eq!(handle.title(), "CPU Quality Charts");
        assert!(!handle.is_released());
        drop(window);
        assert!(handle.is_released());
    }

    #[test]
    fn zero_sized_window_is_rejected() {
        assert!(HeadlessWindow::new(Viewport::new(0, 600)).is_err());
    }
}
