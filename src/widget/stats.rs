use crate::model::game_state::{GameState, IntimacyLevel, StatKind};

/// Color band a stat value falls into. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatTier {
    Healthy,
    Neutral,
    Warning,
    Critical,
}

impl StatTier {
    pub fn for_value(value: i32) -> Self {
        if value >= 80 {
            StatTier::Healthy
        } else if value >= 50 {
            StatTier::Neutral
        } else if value >= 30 {
            StatTier::Warning
        } else {
            StatTier::Critical
        }
    }

    /// Key into the color table of the UI settings
    pub fn color_key(self) -> &'static str {
        match self {
            StatTier::Healthy => "tier_healthy",
            StatTier::Neutral => "tier_neutral",
            StatTier::Warning => "tier_warning",
            StatTier::Critical => "tier_critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatBar {
    pub kind: StatKind,
    pub value: i32,
    /// 0.0..=1.0
    pub fill: f32,
    pub tier: StatTier,
}

impl StatBar {
    pub fn new(kind: StatKind, value: i32) -> Self {
        Self {
            kind,
            value,
            fill: (value as f32 / 100.0).clamp(0.0, 1.0),
            tier: StatTier::for_value(value),
        }
    }
}

/// What the stat panel currently shows.
#[derive(Debug, Default)]
pub struct StatRenderer {
    bars: Vec<StatBar>,
    month_label: Option<String>,
    intimacy_label: Option<String>,
}

impl StatRenderer {
    /// Does nothing unless both the state and its stats are present.
    pub fn update_stats_ui(&mut self, state: Option<&GameState>) {
        let Some(state) = state else { return };
        let Some(stats) = state.stats else { return };

        self.bars = StatKind::ALL
            .iter()
            .map(|&kind| StatBar::new(kind, stats.get(kind)))
            .collect();

        self.month_label = Some(format!("Month {}", state.current_month));

        let level = state
            .intimacy_level
            .clone()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| IntimacyLevel::from_value(stats.intimacy).describe().to_string());
        self.intimacy_label = Some(level);
    }

    pub fn bars(&self) -> &[StatBar] {
        &self.bars
    }

    pub fn month_label(&self) -> Option<&str> {
        self.month_label.as_deref()
    }

    pub fn intimacy_label(&self) -> Option<&str> {
        self.intimacy_label.as_deref()
    }
}
