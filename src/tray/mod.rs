//! System tray via D-Bus StatusNotifier (ksni)
//!
//! The tray runs on its own thread with a current-thread tokio runtime.
//! Show launches a peek directly from the tray thread; Settings and Quit are
//! handed to the main thread through the [`UiQueue`](crate::ui_queue).

mod icon;

use anyhow::{anyhow, bail, Context, Result};
use ksni::menu::StandardItem;
use ksni::{MenuItem, ToolTip, TrayMethods};
use std::process::Child;
use std::thread;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::constants::tray::{FALLBACK_ICON_NAME, ID, TITLE, TOOLTIP};
use crate::launcher::Launcher;
use crate::ui_queue::{SubmitError, UiQueueHandle, UiTask};

pub struct PeekerTray {
    settings: Settings,
    launcher: Launcher,
    queue: UiQueueHandle,
    peeks: Vec<Child>,
    icon: Vec<ksni::Icon>,
}

impl PeekerTray {
    pub fn new(settings: Settings, launcher: Launcher, queue: UiQueueHandle) -> Self {
        let icon = match icon::load_tray_icon() {
            Ok(icon) => vec![icon],
            Err(err) => {
                warn!(error = ?err, fallback = FALLBACK_ICON_NAME, "Failed to load tray icon, using themed icon");
                Vec::new()
            }
        };

        Self {
            settings,
            launcher,
            queue,
            peeks: Vec::new(),
            icon,
        }
    }

    /// Start a peek with the current settings. Earlier peeks keep running.
    fn show(&mut self) {
        self.reap_peeks();
        match self.launcher.spawn_peek(&self.settings) {
            Ok(child) => self.peeks.push(child),
            Err(err) => error!(error = ?err, "Failed to start peek"),
        }
    }

    fn open_settings(&mut self) {
        match self.queue.try_submit(UiTask::EditSettings) {
            Ok(()) => info!("Settings requested from tray menu"),
            Err(SubmitError::Busy) => warn!("Settings request ignored, another one is pending"),
            Err(err) => error!(error = %err, "Failed to request settings window"),
        }
    }

    fn quit(&mut self) {
        info!("Quit requested from tray menu");
        // The slot may be taken by a pending settings request; wait for it
        // off the tray thread so the menu stays responsive
        let queue = self.queue.clone();
        thread::spawn(move || {
            if let Err(err) = queue.submit(UiTask::Quit) {
                error!(error = %err, "Failed to request quit");
            }
        });
    }

    fn reap_peeks(&mut self) {
        self.peeks.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    warn!(pid = child.id(), exit = ?status.code(), "Peek exited with an error");
                }
                false
            }
            Ok(None) => true,
            Err(err) => {
                error!(pid = child.id(), error = ?err, "Failed to query peek status");
                false
            }
        });
    }
}

impl ksni::Tray for PeekerTray {
    fn id(&self) -> String {
        ID.into()
    }

    fn title(&self) -> String {
        TITLE.into()
    }

    fn category(&self) -> ksni::Category {
        ksni::Category::ApplicationStatus
    }

    fn icon_name(&self) -> String {
        if self.icon.is_empty() {
            FALLBACK_ICON_NAME.into()
        } else {
            String::new()
        }
    }

    fn icon_pixmap(&self) -> Vec<ksni::Icon> {
        self.icon.clone()
    }

    fn tool_tip(&self) -> ToolTip {
        ToolTip {
            title: TOOLTIP.into(),
            description: "Right-click for options".into(),
            ..Default::default()
        }
    }

    /// Left click peeks, same as the Show entry
    fn activate(&mut self, _x: i32, _y: i32) {
        self.show();
    }

    fn menu(&self) -> Vec<MenuItem<Self>> {
        vec![
            StandardItem {
                label: "Show".into(),
                activate: Box::new(|this: &mut Self| this.show()),
                ..Default::default()
            }
            .into(),
            StandardItem {
                label: "Settings".into(),
                activate: Box::new(|this: &mut Self| this.open_settings()),
                ..Default::default()
            }
            .into(),
            StandardItem {
                label: "Quit".into(),
                activate: Box::new(|this: &mut Self| this.quit()),
                ..Default::default()
            }
            .into(),
        ]
    }
}

/// Main-thread side of the running tray
pub struct TrayHandle {
    updates: mpsc::UnboundedSender<Settings>,
    thread: thread::JoinHandle<()>,
}

impl TrayHandle {
    /// Make the next Show use `settings`
    pub fn set_settings(&self, settings: &Settings) {
        if self.updates.send(settings.clone()).is_err() {
            warn!("Tray thread is gone, settings update dropped");
        }
    }

    /// Remove the tray icon and wait for its thread
    pub fn shutdown(self) {
        let TrayHandle { updates, thread } = self;
        drop(updates);
        if thread.join().is_err() {
            error!("Tray thread panicked");
        }
    }
}

/// Register the tray icon on a dedicated thread
///
/// Returns once the icon is registered with the StatusNotifier host, or with
/// the registration error.
pub fn spawn(tray: PeekerTray) -> Result<TrayHandle> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tray runtime")?;
    let (updates, mut update_rx) = mpsc::unbounded_channel::<Settings>();
    let (ready_tx, ready_rx) = std::sync::mpsc::channel::<Result<()>>();

    let thread = thread::Builder::new()
        .name("tray".into())
        .spawn(move || {
            runtime.block_on(async move {
                let handle = match tray.spawn().await {
                    Ok(handle) => {
                        let _ = ready_tx.send(Ok(()));
                        handle
                    }
                    Err(err) => {
                        let _ = ready_tx.send(Err(anyhow!("Failed to register tray icon: {err}")));
                        return;
                    }
                };
                info!("Tray icon registered");

                while let Some(settings) = update_rx.recv().await {
                    handle.update(move |tray: &mut PeekerTray| tray.settings = settings).await;
                }

                handle.shutdown().await;
                info!("Tray icon removed");
            });
        })
        .context("Failed to spawn tray thread")?;

    match ready_rx.recv() {
        Ok(Ok(())) => Ok(TrayHandle { updates, thread }),
        Ok(Err(err)) => Err(err),
        Err(_) => bail!("Tray thread exited before registering the icon"),
    }
}
