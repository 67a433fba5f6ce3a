//! Peek window - slides the configured image in from the left screen edge,
//! holds it, then slides it back out and closes

mod loader;
mod motion;

use motion::{PeekMotion, Phase};

use anyhow::{anyhow, Result};
use eframe::{egui, CreationContext, NativeOptions};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::config::Settings;
use crate::constants::peek::{IMAGE_TOP_OFFSET, MAX_IMAGE_SIZE, WINDOW_X, WINDOW_Y};

/// Everything one peek needs
#[derive(Debug, Clone, PartialEq)]
pub struct PeekRequest {
    pub image: PathBuf,
    pub duration: Duration,
    pub speed: f32,
}

impl PeekRequest {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            image: PathBuf::from(&settings.image),
            duration: settings.total_duration(),
            speed: settings.speed as f32,
        }
    }
}

struct PeekApp {
    texture: egui::TextureHandle,
    display_size: egui::Vec2,
    motion: PeekMotion,
    started: Instant,
    closing: bool,
}

impl PeekApp {
    fn new(
        cc: &CreationContext<'_>,
        image: egui::ColorImage,
        display_size: egui::Vec2,
        request: &PeekRequest,
    ) -> Self {
        let texture = cc
            .egui_ctx
            .load_texture("peek-image", image, egui::TextureOptions::LINEAR);

        Self {
            texture,
            display_size,
            motion: PeekMotion::new(display_size.x, request.duration, request.speed),
            started: Instant::now(),
            closing: false,
        }
    }
}

impl eframe::App for PeekApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            info!("Peek window close requested");
            return;
        }

        let elapsed = self.started.elapsed();
        if self.motion.advance_to(elapsed) == Phase::Finished {
            if !self.closing {
                debug!(elapsed_ms = elapsed.as_millis() as u64, "Peek finished");
                self.closing = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            return;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let rect = egui::Rect::from_min_size(
                    egui::pos2(self.motion.position(), IMAGE_TOP_OFFSET),
                    self.display_size,
                );
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                ui.painter()
                    .image(self.texture.id(), rect, uv, egui::Color32::WHITE);
            });

        ctx.request_repaint_after(motion::frame_interval());
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }
}

/// Run one peek and block until its window closes
///
/// An image that cannot be decoded is logged and the peek is skipped.
pub fn run_peek(request: PeekRequest) -> Result<()> {
    let image = match loader::load(&request.image, MAX_IMAGE_SIZE) {
        Ok(image) => image,
        Err(err) => {
            error!(path = %request.image.display(), error = ?err, "Failed to load image, skipping peek");
            return Ok(());
        }
    };

    let display_size = loader::display_size(image.size, MAX_IMAGE_SIZE);
    info!(
        path = %request.image.display(),
        width = display_size.x,
        height = display_size.y,
        duration_ms = request.duration.as_millis() as u64,
        speed = request.speed,
        "Starting peek"
    );

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Arlo Peeker")
            .with_inner_size([display_size.x, display_size.y + IMAGE_TOP_OFFSET])
            .with_position([WINDOW_X, WINDOW_Y])
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_resizable(false)
            .with_taskbar(false),
        ..Default::default()
    };

    eframe::run_native(
        "Arlo Peeker",
        options,
        Box::new(move |cc| Ok(Box::new(PeekApp::new(cc, image, display_size, &request)))),
    )
    .map_err(|err| anyhow!("Failed to open peek window: {err}"))
}
