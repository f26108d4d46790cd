use eframe::egui;
use std::collections::HashMap;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::engine::chat_client::{ChatClient, DecodedImage};
use crate::engine::engine::Engine;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::message::{ChatMessage, Sender};
use crate::ui::banners::draw_banners;
use crate::ui::center_panel::draw_center_panel;
use crate::ui::right_panel::draw_right_panel;
use crate::ui::settings::ClientSettings;
use crate::widget::controller::ConversationController;

/// How often to poll the worker while something is outstanding.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub(crate) enum ImageSlot {
    Loading,
    Ready(egui::TextureHandle),
    Failed,
}

/* =========================
   App
   ========================= */

pub struct ChatApp {
    pub(crate) settings: ClientSettings,
    pub(crate) controller: ConversationController<mpsc::Sender<EngineCommand>>,
    pub(crate) images: HashMap<String, ImageSlot>,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl ChatApp {
    pub fn new(settings: ClientSettings) -> anyhow::Result<Self> {
        let client = ChatClient::new(&settings)?;

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        std::thread::Builder::new()
            .name("chat-network".into())
            .spawn(move || {
                let mut engine = Engine::new(cmd_rx, resp_tx, client);
                engine.run();
            })?;

        let controller = ConversationController::new(
            &settings.username,
            cmd_tx.clone(),
            Instant::now(),
            Duration::from_millis(settings.bootstrap_delay_ms),
        );
        log::info!(
            "chatting with {} as {}",
            settings.base_url,
            controller.username()
        );

        Ok(Self {
            settings,
            controller,
            images: HashMap::new(),
            cmd_tx,
            resp_rx,
        })
    }

    fn drain_responses(&mut self, ctx: &egui::Context, now: Instant) {
        while let Ok(resp) = self.resp_rx.try_recv() {
            match resp {
                EngineResponse::ChatCompleted { ticket, result } => {
                    self.controller.handle_completion(ticket, result, now);
                }
                EngineResponse::ImageLoaded { path, result } => {
                    let slot = match result {
                        Ok(img) => ImageSlot::Ready(upload(ctx, &path, img)),
                        Err(e) => {
                            log::warn!("image {} failed: {}", path, e);
                            ImageSlot::Failed
                        }
                    };
                    self.images.insert(path, slot);
                }
            }
        }
    }

    fn request_missing_images(&mut self) {
        for msg in self.controller.messages.messages() {
            let Some(path) = msg.image.as_ref() else { continue };
            if self.images.contains_key(path) {
                continue;
            }

            let slot = match self.cmd_tx.send(EngineCommand::FetchImage { path: path.clone() }) {
                Ok(()) => ImageSlot::Loading,
                Err(_) => ImageSlot::Failed,
            };
            self.images.insert(path.clone(), slot);
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        let loading = self.images.values().any(|s| matches!(s, ImageSlot::Loading));
        if self.controller.in_flight() > 0 || loading {
            ctx.request_repaint_after(POLL_INTERVAL);
        } else if let Some(deadline) = self.controller.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }

    pub(crate) fn draw_message(&self, ui: &mut egui::Ui, msg: &ChatMessage) {
        let (key, right) = match msg.sender {
            Sender::User => ("user", true),
            Sender::Bot => ("bot", false),
        };
        let bg = self.settings.color(key);

        ui.add_space(6.0);

        let layout = if right {
            egui::Layout::right_to_left(egui::Align::TOP)
        } else {
            egui::Layout::left_to_right(egui::Align::TOP)
        };
        ui.with_layout(layout, |ui| {
            bubble(ui, bg, |ui| {
                if let Some(path) = msg.image.as_ref() {
                    match self.images.get(path) {
                        Some(ImageSlot::Ready(tex)) => {
                            ui.add(egui::Image::new(tex).max_width(320.0));
                        }
                        Some(ImageSlot::Failed) => {
                            ui.weak(format!("[image unavailable: {path}]"));
                        }
                        Some(ImageSlot::Loading) | None => {
                            ui.spinner();
                        }
                    }
                }
                ui.label(egui::RichText::new(&msg.text).color(egui::Color32::WHITE));
            });
        });
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui_scale);

        let now = Instant::now();
        self.drain_responses(ctx, now);
        self.controller.tick(now);
        self.request_missing_images();

        draw_right_panel(ctx, self);
        draw_center_panel(ctx, self);
        draw_banners(ctx, self);

        self.schedule_repaint(ctx, now);
    }
}

/* =========================
   UI Helpers
   ========================= */

fn upload(ctx: &egui::Context, path: &str, img: DecodedImage) -> egui::TextureHandle {
    let color = egui::ColorImage::from_rgba_unmultiplied(img.size, &img.rgba);
    ctx.load_texture(path, color, egui::TextureOptions::default())
}

pub(crate) fn bubble(ui: &mut egui::Ui, color: egui::Color32, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::new()
        .fill(color)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.set_max_width(420.0);
            ui.vertical(add_contents);
        });
}
