use eframe::egui;

use super::app::ChatApp;

pub fn draw_center_panel(ctx: &egui::Context, app: &mut ChatApp) {
    let input_id = egui::Id::new("chat_input_box");

    // ---------- Input bar ----------
    egui::TopBottomPanel::bottom("chat_input").show(ctx, |ui| {
        let mut send_now = false;

        ui.horizontal(|ui| {
            let response = ui.add_sized(
                [ui.available_width() - 60.0, 60.0],
                egui::TextEdit::multiline(app.controller.input_mut())
                    .id(input_id)
                    .hint_text("Talk to your player…")
                    .lock_focus(true),
            );

            // Enter vs Shift+Enter
            if response.has_focus()
                && ui.input(|i| i.key_pressed(egui::Key::Enter) && !i.modifiers.shift)
            {
                send_now = true;
            }

            if ui.button("Send").clicked() {
                send_now = true;
            }
        });

        if send_now {
            app.controller.send_message(false);

            // Keep cursor focused
            ui.memory_mut(|m| m.request_focus(input_id));
        }
    });

    // ---------- Chat history ----------
    let stick = app.controller.messages.take_scroll_request();
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(stick)
            .show(ui, |ui| {
                for msg in app.controller.messages.messages() {
                    app.draw_message(ui, msg);
                }
            });
    });
}
