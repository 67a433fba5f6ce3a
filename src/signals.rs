//! SIGINT/SIGTERM handling for the tray process

use anyhow::{Context, Result};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::thread;
use tracing::{info, warn};

use crate::ui_queue::{UiQueueHandle, UiTask};

/// Turn the first termination signal into a [`UiTask::Quit`]
pub fn forward_to_queue(queue: UiQueueHandle) -> Result<()> {
    let mut signals = Signals::new([SIGINT, SIGTERM]).context("Failed to register signal handlers")?;

    thread::Builder::new()
        .name("signals".into())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                info!(signal, "Received termination signal");
                if let Err(err) = queue.submit(UiTask::Quit) {
                    warn!(error = %err, "Could not request quit");
                }
            }
        })
        .context("Failed to spawn signal thread")?;

    Ok(())
}
