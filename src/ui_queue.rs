//! Single-consumer task queue for work that must run on the main thread
//!
//! The tray and signal threads only submit [`UiTask`]s; the main thread owns
//! the receiving end and executes them one at a time. The queue holds a
//! single pending task, so a second settings request while one is waiting is
//! refused instead of stacking up windows.

use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTask {
    /// Open the settings editor and wait for it to close
    EditSettings,
    /// Leave the main loop
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("another UI task is already pending")]
    Busy,
    #[error("UI queue has shut down")]
    Closed,
}

/// Producer side, cheap to clone into other threads
#[derive(Debug, Clone)]
pub struct UiQueueHandle {
    sender: SyncSender<UiTask>,
}

impl UiQueueHandle {
    /// Submit without blocking; fails with [`SubmitError::Busy`] if the slot is taken
    pub fn try_submit(&self, task: UiTask) -> Result<(), SubmitError> {
        self.sender.try_send(task).map_err(|err| match err {
            TrySendError::Full(_) => SubmitError::Busy,
            TrySendError::Disconnected(_) => SubmitError::Closed,
        })
    }

    /// Submit, waiting for the slot to free up
    pub fn submit(&self, task: UiTask) -> Result<(), SubmitError> {
        self.sender.send(task).map_err(|_| SubmitError::Closed)
    }
}

/// Consumer side, owned by the main thread
#[derive(Debug)]
pub struct UiQueue {
    receiver: Receiver<UiTask>,
}

impl UiQueue {
    pub fn new() -> (UiQueueHandle, UiQueue) {
        let (sender, receiver) = mpsc::sync_channel(1);
        (UiQueueHandle { sender }, UiQueue { receiver })
    }

    /// Execute tasks in submission order until `handler` breaks or every
    /// handle is dropped
    pub fn run(self, mut handler: impl FnMut(UiTask) -> ControlFlow<()>) {
        for task in self.receiver {
            debug!(task = ?task, "Running UI task");
            if handler(task).is_break() {
                break;
            }
        }
    }
}
