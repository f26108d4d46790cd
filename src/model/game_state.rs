use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Snapshot of the backend's game state sent alongside a reply.
/// This is READ-ONLY on the client; it only drives display and tracing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DebugPayload {
    pub game_state: Option<GameState>,
    pub stat_changes: Option<StatChanges>,
    pub event_check: Option<EventCheck>,
    pub hint_provided: bool,
    pub conversation_count: u32,
    pub event_history: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub current_month: u32,
    pub current_day: u32,
    pub months_until_draft: i32,
    pub intimacy_level: Option<String>,
    pub stats: Option<Stats>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub intimacy: i32,
    pub mental: i32,
    pub stamina: i32,
    pub power: i32,
    pub speed: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatKind {
    Intimacy,
    Mental,
    Stamina,
    Power,
    Speed,
}

impl StatKind {
    pub const ALL: [StatKind; 5] = [
        StatKind::Intimacy,
        StatKind::Mental,
        StatKind::Stamina,
        StatKind::Power,
        StatKind::Speed,
    ];

    /// Key used for this stat on the wire
    pub fn key(self) -> &'static str {
        match self {
            StatKind::Intimacy => "intimacy",
            StatKind::Mental => "mental",
            StatKind::Stamina => "stamina",
            StatKind::Power => "power",
            StatKind::Speed => "speed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatKind::Intimacy => "Intimacy",
            StatKind::Mental => "Mental",
            StatKind::Stamina => "Stamina",
            StatKind::Power => "Power",
            StatKind::Speed => "Speed",
        }
    }
}

impl Stats {
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Intimacy => self.intimacy,
            StatKind::Mental => self.mental,
            StatKind::Stamina => self.stamina,
            StatKind::Power => self.power,
            StatKind::Speed => self.speed,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatChanges {
    /// stat key -> delta, zero deltas already filtered by the backend
    pub changes: BTreeMap<String, i32>,
    pub reason: String,
    pub old_stats: Option<Stats>,
    pub new_stats: Option<Stats>,
}

impl StatChanges {
    /// (stat, delta, before, after) for every stat the backend reported a change for.
    pub fn deltas(&self) -> Vec<(String, i32, Option<i32>, Option<i32>)> {
        self.changes
            .iter()
            .map(|(key, delta)| {
                let kind = StatKind::ALL.iter().copied().find(|k| k.key() == key);
                let before = kind.and_then(|k| self.old_stats.map(|s| s.get(k)));
                let after = kind.and_then(|k| self.new_stats.map(|s| s.get(k)));
                (key.clone(), *delta, before, after)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventCheck {
    pub triggered: bool,
    pub event_name: Option<String>,
}

/// Intimacy tiers used by the game when the server sends no label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntimacyLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl IntimacyLevel {
    pub fn from_value(intimacy: i32) -> Self {
        match intimacy {
            i32::MIN..=19 => IntimacyLevel::VeryLow,
            20..=39 => IntimacyLevel::Low,
            40..=59 => IntimacyLevel::Moderate,
            60..=79 => IntimacyLevel::High,
            _ => IntimacyLevel::VeryHigh,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            IntimacyLevel::VeryLow => "Very low - barely willing to talk",
            IntimacyLevel::Low => "Low - defensive and distant",
            IntimacyLevel::Moderate => "Moderate - starting to open up",
            IntimacyLevel::High => "High - trusting and cooperative",
            IntimacyLevel::VeryHigh => "Very high - genuinely respects you",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_debug_payload() {
        let json = serde_json::json!({
            "game_state": {
                "current_month": 4,
                "current_day": 12,
                "months_until_draft": 6,
                "intimacy_level": "Low",
                "stats": {"intimacy": 30, "mental": 55, "stamina": 80, "power": 61, "speed": 12}
            },
            "stat_changes": {
                "changes": {"intimacy": 5, "mental": -2},
                "reason": "Encouraged after practice",
                "old_stats": {"intimacy": 25, "mental": 57, "stamina": 80, "power": 61, "speed": 12},
                "new_stats": {"intimacy": 30, "mental": 55, "stamina": 80, "power": 61, "speed": 12}
            },
            "event_check": {"triggered": true, "event_name": "Slump"},
            "hint_provided": false,
            "conversation_count": 7,
            "event_history": ["Slump"]
        });

        let payload: DebugPayload = serde_json::from_value(json).unwrap();
        let state = payload.game_state.as_ref().unwrap();
        assert_eq!(state.current_month, 4);
        assert_eq!(state.stats.unwrap().get(StatKind::Speed), 12);
        assert_eq!(payload.conversation_count, 7);

        let deltas = payload.stat_changes.unwrap().deltas();
        assert_eq!(
            deltas,
            vec![
                ("intimacy".to_string(), 5, Some(25), Some(30)),
                ("mental".to_string(), -2, Some(57), Some(55)),
            ]
        );
    }

    #[test]
    fn empty_debug_payload_uses_defaults() {
        let payload: DebugPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.game_state.is_none());
        assert!(payload.event_history.is_empty());
    }

    #[test]
    fn intimacy_tiers() {
        assert_eq!(IntimacyLevel::from_value(0), IntimacyLevel::VeryLow);
        assert_eq!(IntimacyLevel::from_value(19), IntimacyLevel::VeryLow);
        assert_eq!(IntimacyLevel::from_value(20), IntimacyLevel::Low);
        assert_eq!(IntimacyLevel::from_value(59), IntimacyLevel::Moderate);
        assert_eq!(IntimacyLevel::from_value(60), IntimacyLevel::High);
        assert_eq!(IntimacyLevel::from_value(80), IntimacyLevel::VeryHigh);
    }
}
