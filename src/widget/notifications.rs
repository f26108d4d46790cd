use std::time::{Duration, Instant};

use crate::model::chat_api::EventInfo;

pub const EVENT_TTL: Duration = Duration::from_millis(5000);
pub const HINT_TTL: Duration = Duration::from_millis(10000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Event,
    Hint,
}

impl NotificationKind {
    pub fn ttl(self) -> Duration {
        match self {
            NotificationKind::Event => EVENT_TTL,
            NotificationKind::Hint => HINT_TTL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notification {
    pub fn deadline(&self) -> Instant {
        self.created_at + self.ttl
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline()
    }
}

/// Transient event/hint banners. Each goes away on its own once its ttl
/// has passed, or earlier when the user closes it.
#[derive(Debug, Default)]
pub struct NotificationManager {
    active: Vec<Notification>,
    next_id: u64,
}

impl NotificationManager {
    pub fn show_event_notification(&mut self, event: &EventInfo, now: Instant) -> u64 {
        self.push(
            NotificationKind::Event,
            format!("Event: {}", event.event_name),
            event.trigger_message.clone(),
            now,
        )
    }

    pub fn show_hint_notification(&mut self, hint: &str, now: Instant) -> u64 {
        self.push(NotificationKind::Hint, "Hint".to_string(), hint.to_string(), now)
    }

    fn push(&mut self, kind: NotificationKind, title: String, body: String, now: Instant) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.active.push(Notification {
            id,
            kind,
            title,
            body,
            created_at: now,
            ttl: kind.ttl(),
        });
        id
    }

    /// Manual close. Safe to call after the banner already expired.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        self.active.len() != before
    }

    pub fn expire(&mut self, now: Instant) {
        self.active.retain(|n| {
            let expired = n.is_expired(now);
            if expired {
                log::trace!("notification {} expired", n.id);
            }
            !expired
        });
    }

    /// Earliest moment a banner is due to disappear.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.iter().map(Notification::deadline).min()
    }

    pub fn active(&self) -> &[Notification] {
        &self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> EventInfo {
        EventInfo {
            event_name: "Slump".into(),
            trigger_message: "He missed three pitches in a row".into(),
        }
    }

    const EPS: Duration = Duration::from_millis(1);

    #[test]
    fn event_banner_expires_after_five_seconds() {
        let t0 = Instant::now();
        let mut n = NotificationManager::default();
        n.show_event_notification(&event(), t0);

        n.expire(t0 + EVENT_TTL - EPS);
        assert_eq!(n.active().len(), 1);

        n.expire(t0 + EVENT_TTL + EPS);
        assert!(n.active().is_empty());
    }

    #[test]
    fn hint_banner_outlives_event_banner() {
        let t0 = Instant::now();
        let mut n = NotificationManager::default();
        n.show_event_notification(&event(), t0);
        n.show_hint_notification("Ask about his family", t0);

        n.expire(t0 + EVENT_TTL + EPS);
        assert_eq!(n.active().len(), 1);
        assert_eq!(n.active()[0].kind, NotificationKind::Hint);
        assert_eq!(n.active()[0].body, "Ask about his family");

        n.expire(t0 + HINT_TTL + EPS);
        assert!(n.active().is_empty());
    }

    #[test]
    fn dismiss_then_expiry_does_not_trip() {
        let t0 = Instant::now();
        let mut n = NotificationManager::default();
        let id = n.show_event_notification(&event(), t0);

        assert!(n.dismiss(id));
        assert!(!n.dismiss(id));
        n.expire(t0 + EVENT_TTL + EPS);
        assert!(!n.dismiss(id));
        assert!(n.active().is_empty());
    }

    #[test]
    fn next_deadline_is_the_earliest() {
        let t0 = Instant::now();
        let mut n = NotificationManager::default();
        assert!(n.next_deadline().is_none());

        n.show_hint_notification("h", t0);
        n.show_event_notification(&event(), t0);
        assert_eq!(n.next_deadline(), Some(t0 + EVENT_TTL));
    }

    #[test]
    fn event_banner_shows_name_and_trigger() {
        let mut n = NotificationManager::default();
        n.show_event_notification(&event(), Instant::now());
        let banner = &n.active()[0];
        assert_eq!(banner.title, "Event: Slump");
        assert_eq!(banner.body, "He missed three pitches in a row");
        assert_eq!(banner.ttl, EVENT_TTL);
    }
}
