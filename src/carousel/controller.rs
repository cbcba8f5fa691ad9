//! Auto-advance timer and hover handling for a [`Carousel`]

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use super::{Carousel, Direction};
use crate::surface::PageSurface;
use crate::utils::errors::Result;

/// Cancels the repeating timer it was returned for
#[derive(Debug)]
pub struct AutoAdvanceHandle {
    abort: AbortHandle,
}

impl AutoAdvanceHandle {
    pub fn cancel(&self) {
        self.abort.abort();
    }
}

/// Owns one carousel and its timer; cheap to share behind an `Arc`
pub struct CarouselController {
    carousel: Arc<Mutex<Carousel>>,
    interval: Duration,
    surface: Arc<dyn PageSurface>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl CarouselController {
    pub fn new(carousel: Carousel, interval: Duration, surface: Arc<dyn PageSurface>) -> Self {
        Self {
            carousel: Arc::new(Mutex::new(carousel)),
            interval,
            surface,
            timer: Mutex::new(None),
        }
    }

    /// Snapshot of the carousel state
    pub fn snapshot(&self) -> Carousel {
        lock(&self.carousel).clone()
    }

    pub fn current_index(&self) -> usize {
        lock(&self.carousel).current_index()
    }

    /// Previous/next navigation
    pub fn advance(&self, direction: Direction) -> Option<usize> {
        Self::step(&self.carousel, self.surface.as_ref(), direction)
    }

    /// Indicator-dot navigation
    pub fn jump_to(&self, index: usize) -> Result<()> {
        let mut carousel = lock(&self.carousel);
        carousel.jump_to(index)?;
        if !carousel.is_empty() {
            self.surface.show_slide(index);
        }
        Ok(())
    }

    fn step(carousel: &Mutex<Carousel>, surface: &dyn PageSurface, direction: Direction) -> Option<usize> {
        let next = lock(carousel).advance(direction);
        if let Some(index) = next {
            surface.show_slide(index);
        }
        next
    }

    /// Start a fresh repeating timer, replacing any running one
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_auto_advance(&self) -> AutoAdvanceHandle {
        let carousel = Arc::clone(&self.carousel);
        let surface = Arc::clone(&self.surface);
        let period = self.interval;

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                Self::step(&carousel, surface.as_ref(), Direction::Forward);
            }
        });

        let handle = AutoAdvanceHandle {
            abort: task.abort_handle(),
        };

        if let Some(previous) = lock(&self.timer).replace(task) {
            previous.abort();
        }
        debug!(interval_ms = period.as_millis() as u64, "Carousel auto-advance started");
        handle
    }

    pub fn stop_auto_advance(&self) {
        if let Some(task) = lock(&self.timer).take() {
            task.abort();
            debug!("Carousel auto-advance stopped");
        }
    }

    pub fn is_auto_advancing(&self) -> bool {
        lock(&self.timer)
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    /// Pointer entered the carousel region
    pub fn pointer_enter(&self) {
        self.stop_auto_advance();
    }

    /// Pointer left the carousel region; the interval restarts from zero
    pub fn pointer_leave(&self) {
        self.start_auto_advance();
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.stop_auto_advance();
    }
}
