use serde::{Deserialize, Serialize};
use egui::Color32;
use std::collections::HashMap;

use crate::widget::controller::DEFAULT_USERNAME;

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ClientSettings {
    /// Where `/api/chat` and reply images are served from
    pub base_url: String,
    pub username: String,
    pub request_timeout_secs: u64,
    pub bootstrap_delay_ms: u64,
    pub ui_scale: f32,

    // sender / stat tier → color mapping
    pub colors: HashMap<String, [u8; 4]>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        let mut colors = HashMap::new();

        colors.insert("user".into(), [40, 70, 120, 255]);
        colors.insert("bot".into(), [70, 70, 70, 255]);
        colors.insert("tier_healthy".into(), [76, 175, 80, 255]);
        colors.insert("tier_neutral".into(), [33, 150, 243, 255]);
        colors.insert("tier_warning".into(), [255, 152, 0, 255]);
        colors.insert("tier_critical".into(), [244, 67, 54, 255]);
        colors.insert("event".into(), [120, 60, 140, 255]);
        colors.insert("hint".into(), [40, 110, 90, 255]);

        Self {
            base_url: "http://127.0.0.1:5000".into(),
            username: DEFAULT_USERNAME.into(),
            request_timeout_secs: 30,
            bootstrap_delay_ms: 500,
            ui_scale: 1.0,
            colors,
        }
    }
}

impl ClientSettings {
    pub fn color(&self, key: &str) -> Color32 {
        self.colors
            .get(key)
            .map(|c| Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]))
            .unwrap_or(Color32::GRAY)
    }

    /// `COACH_CHAT_URL` / `COACH_CHAT_USERNAME` win over the file.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var("COACH_CHAT_URL").ok(),
            std::env::var("COACH_CHAT_USERNAME").ok(),
        );
    }

    fn apply_overrides(&mut self, url: Option<String>, username: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(name) = username.filter(|n| !n.trim().is_empty()) {
            self.username = name;
        }
    }
}
