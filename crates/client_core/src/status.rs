//! Auto-expiring status slot with last-writer-wins semantics.

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use shared::domain::StatusMessage;
use tracing::trace;

use crate::view::StatusDisplay;

pub const STATUS_DISPLAY_WINDOW: Duration = Duration::from_secs(4);

#[derive(Default)]
struct StatusSlot {
    generation: u64,
    current: Option<StatusMessage>,
}

#[derive(Clone)]
pub struct StatusBoard {
    display: Arc<dyn StatusDisplay>,
    window: Duration,
    slot: Arc<Mutex<StatusSlot>>,
}

impl StatusBoard {
    pub fn new(display: Arc<dyn StatusDisplay>) -> Self {
        Self::with_window(display, STATUS_DISPLAY_WINDOW)
    }

    pub fn with_window(display: Arc<dyn StatusDisplay>, window: Duration) -> Self {
        Self {
            display,
            window,
            slot: Arc::new(Mutex::new(StatusSlot::default())),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Shows `message` right away, superseding whatever is visible, and
    /// schedules it to hide after the display window. Must run inside a tokio
    /// runtime.
    pub fn show(&self, message: StatusMessage) {
        let generation = {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            slot.generation += 1;
            self.display.show(&message);
            slot.current = Some(message);
            slot.generation
        };

        let board = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(board.window).await;
            board.expire(generation);
        });
    }

    fn expire(&self, generation: u64) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.generation != generation || slot.current.is_none() {
            trace!(generation, "stale status expiry ignored");
            return;
        }
        slot.current = None;
        self.display.hide();
    }

    pub fn current(&self) -> Option<StatusMessage> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }
}

#[cfg(test)]
#[path = "tests/status_tests.rs"]
mod tests;
