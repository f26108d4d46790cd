use eframe::egui;

use super::app::ChatApp;
use crate::widget::notifications::NotificationKind;

/// Event and hint banners, stacked in the top-right corner.
pub fn draw_banners(ctx: &egui::Context, app: &mut ChatApp) {
    if app.controller.notifications.active().is_empty() {
        return;
    }

    let mut closed: Vec<u64> = Vec::new();

    egui::Area::new(egui::Id::new("banners"))
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for n in app.controller.notifications.active() {
                let key = match n.kind {
                    NotificationKind::Event => "event",
                    NotificationKind::Hint => "hint",
                };

                egui::Frame::new()
                    .fill(app.settings.color(key))
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::same(8))
                    .show(ui, |ui| {
                        ui.set_width(280.0);
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(&n.title)
                                    .strong()
                                    .color(egui::Color32::WHITE),
                            );
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                                if ui.small_button("❌").clicked() {
                                    closed.push(n.id);
                                }
                            });
                        });
                        if !n.body.is_empty() {
                            ui.label(egui::RichText::new(&n.body).color(egui::Color32::WHITE));
                        }
                    });
                ui.add_space(6.0);
            }
        });

    for id in closed {
        app.controller.notifications.dismiss(id);
    }
}
