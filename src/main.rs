mod ui;
mod engine;
mod logutil;
mod model;
mod widget;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut settings = ui::settings_io::load_settings();
    // persist before env overrides so they stay per-run
    ui::settings_io::save_settings(&settings);
    settings.apply_env_overrides();

    let app = ui::app::ChatApp::new(settings)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Coach Chat")
            .with_inner_size([900.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Coach Chat",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("ui failed: {e}"))
}
