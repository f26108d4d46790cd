use eframe::egui;

use super::app::ChatApp;
use crate::widget::stats::StatBar;

pub fn draw_right_panel(ctx: &egui::Context, app: &ChatApp) {
    egui::SidePanel::right("stats")
        .resizable(true)
        .default_width(260.0)
        .min_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Player");
            ui.separator();

            let stats = &app.controller.stats;

            ui.label(stats.month_label().unwrap_or("Month -"));
            ui.horizontal_wrapped(|ui| {
                ui.label("Intimacy level:");
                ui.strong(stats.intimacy_label().unwrap_or("-"));
            });

            ui.separator();

            if stats.bars().is_empty() {
                ui.weak("No stats yet");
                return;
            }

            for bar in stats.bars() {
                draw_stat_bar(ui, app, bar);
            }
        });
}

fn draw_stat_bar(ui: &mut egui::Ui, app: &ChatApp, bar: &StatBar) {
    ui.horizontal(|ui| {
        ui.label(bar.kind.label());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(bar.value.to_string());
        });
    });
    ui.add(
        egui::ProgressBar::new(bar.fill)
            .fill(app.settings.color(bar.tier.color_key()))
            .desired_height(10.0),
    );
    ui.add_space(4.0);
}
