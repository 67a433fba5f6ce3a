//! Process-level context of the tray application
//!
//! `App` owns the in-memory settings. The tray gets a copy for Show. After
//! every editor session `App` adopts what the editor committed (or re-reads
//! the store when nothing was committed) and pushes it back to the tray.

use anyhow::Result;
use std::ops::ControlFlow;
use tracing::{error, info};

use crate::config::{ConfigStore, Settings};
use crate::launcher::Launcher;
use crate::tray::{self, PeekerTray, TrayHandle};
use crate::ui_queue::{UiQueue, UiTask};

pub struct App {
    store: ConfigStore,
    settings: Settings,
    launcher: Launcher,
}

impl App {
    pub fn new(store: ConfigStore, launcher: Launcher) -> Self {
        let settings = store.load();
        Self {
            store,
            settings,
            launcher,
        }
    }

    #[cfg(test)]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the tray until Quit; the calling thread becomes the UI queue consumer
    pub fn run_tray(mut self) -> Result<()> {
        let (queue_handle, queue) = UiQueue::new();

        let tray = tray::spawn(PeekerTray::new(
            self.settings.clone(),
            self.launcher.clone(),
            queue_handle.clone(),
        ))?;

        #[cfg(unix)]
        if let Err(err) = crate::signals::forward_to_queue(queue_handle.clone()) {
            error!(error = ?err, "Signal handling unavailable");
        }
        drop(queue_handle);

        info!("Arlo Peeker running in the system tray");
        queue.run(|task| self.handle_task(task, &tray));

        tray.shutdown();
        info!("Arlo Peeker exiting");
        Ok(())
    }

    fn handle_task(&mut self, task: UiTask, tray: &TrayHandle) -> ControlFlow<()> {
        match task {
            UiTask::EditSettings => {
                let edited = self.launcher.run_settings();
                self.adopt_editor_result(edited);
                tray.set_settings(&self.settings);
                ControlFlow::Continue(())
            }
            UiTask::Quit => ControlFlow::Break(()),
        }
    }

    /// A committed edit wins over the file, which may not have been written
    fn adopt_editor_result(&mut self, edited: Result<Option<Settings>>) {
        match edited {
            Ok(Some(committed)) => {
                info!(image = %committed.image, duration = committed.duration, speed = committed.speed, "Adopted edited settings");
                self.settings = committed;
            }
            Ok(None) => self.reload_settings(),
            Err(err) => {
                error!(error = ?err, "Settings window failed");
                self.reload_settings();
            }
        }
    }

    fn reload_settings(&mut self) {
        self.settings = self.store.load();
    }
}
