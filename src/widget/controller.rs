use std::collections::HashMap;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::anyhow;

use crate::engine::chat_client::ChatError;
use crate::engine::protocol::{EngineCommand, Ticket};
use crate::logutil::escape_log;
use crate::model::chat_api::{ChatRequest, ChatResponse};
use crate::model::game_state::DebugPayload;
use crate::model::message::{MessageId, Sender};
use crate::widget::messages::MessageRenderer;
use crate::widget::notifications::NotificationManager;
use crate::widget::stats::StatRenderer;

pub const PLACEHOLDER_TEXT: &str = "Thinking...";
pub const APOLOGY_TEXT: &str = "Sorry, something went wrong. Please try again.";
pub const DEFAULT_USERNAME: &str = "Coach";

const TRACE_TARGET: &str = "coach_chat::trace";

/// Hands a request to whatever performs the network call.
pub trait Dispatcher {
    fn dispatch(&mut self, ticket: Ticket, request: ChatRequest) -> anyhow::Result<()>;
}

impl Dispatcher for mpsc::Sender<EngineCommand> {
    fn dispatch(&mut self, ticket: Ticket, request: ChatRequest) -> anyhow::Result<()> {
        self.send(EngineCommand::Chat { ticket, request })
            .map_err(|_| anyhow!("network worker is not running"))
    }
}

/// Drives one request/response cycle at a time per user action.
///
/// Nothing stops a second submit while one is in flight: each gets its own
/// ticket and placeholder and both replies land in the log.
pub struct ConversationController<D: Dispatcher> {
    username: String,
    input: String,
    dispatcher: D,
    next_ticket: u64,
    pending: HashMap<Ticket, MessageId>,
    bootstrap_at: Option<Instant>,

    pub messages: MessageRenderer,
    pub stats: StatRenderer,
    pub notifications: NotificationManager,
}

impl<D: Dispatcher> ConversationController<D> {
    /// `username` falls back to [`DEFAULT_USERNAME`] when blank.
    pub fn new(username: &str, dispatcher: D, now: Instant, bootstrap_delay: Duration) -> Self {
        let username = match username.trim() {
            "" => DEFAULT_USERNAME.to_string(),
            name => name.to_string(),
        };

        Self {
            username,
            input: String::new(),
            dispatcher,
            next_ticket: 0,
            pending: HashMap::new(),
            bootstrap_at: Some(now + bootstrap_delay),
            messages: MessageRenderer::new(),
            stats: StatRenderer::default(),
            notifications: NotificationManager::default(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The staged input the text field edits.
    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Sends the staged input, or the bootstrap sentinel when `is_initial`.
    /// Blank input is ignored without touching the log.
    pub fn send_message(&mut self, is_initial: bool) {
        let request = if is_initial {
            ChatRequest::bootstrap(&self.username)
        } else {
            let text = self.input.trim().to_string();
            if text.is_empty() {
                return;
            }
            self.messages.append_message(Sender::User, text.as_str(), None);
            self.input.clear();
            ChatRequest {
                message: text,
                username: self.username.clone(),
            }
        };

        let placeholder = self.messages.append_message(Sender::Bot, PLACEHOLDER_TEXT, None);

        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);

        log::info!(
            "sending ticket={} initial={} message={}",
            ticket.0,
            is_initial,
            escape_log(&request.message)
        );

        self.pending.insert(ticket, placeholder);
        if let Err(e) = self.dispatcher.dispatch(ticket, request) {
            log::error!("could not dispatch ticket={}: {:#}", ticket.0, e);
            self.pending.remove(&ticket);
            self.messages.remove_message(placeholder);
            self.messages.append_message(Sender::Bot, APOLOGY_TEXT, None);
        }
    }

    pub fn handle_completion(
        &mut self,
        ticket: Ticket,
        result: Result<ChatResponse, ChatError>,
        now: Instant,
    ) {
        let Some(placeholder) = self.pending.remove(&ticket) else {
            log::warn!("completion for unknown ticket={}, ignoring", ticket.0);
            return;
        };
        self.messages.remove_message(placeholder);

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                log::warn!("chat request ticket={} failed: {}", ticket.0, e);
                self.messages.append_message(Sender::Bot, APOLOGY_TEXT, None);
                return;
            }
        };

        let reply = resp.reply.normalize();

        if let Some(debug) = resp.debug.as_ref() {
            self.stats.update_stats_ui(debug.game_state.as_ref());
            trace_debug(debug);
        }

        self.messages.append_message(Sender::Bot, reply.text, reply.image);

        if let Some(event) = resp.event.as_ref() {
            self.notifications.show_event_notification(event, now);
        }
        if let Some(hint) = resp.hint.as_deref() {
            self.notifications.show_hint_notification(hint, now);
        }
    }

    /// Fires the startup exchange when due and drops expired banners.
    pub fn tick(&mut self, now: Instant) {
        if self.bootstrap_at.is_some_and(|at| now >= at) {
            self.bootstrap_at = None;
            if self.messages.is_empty() {
                self.send_message(true);
            } else {
                log::debug!("log already has messages, skipping bootstrap");
            }
        }

        self.notifications.expire(now);
    }

    /// When the next timed change happens, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.bootstrap_at, self.notifications.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

fn trace_debug(debug: &DebugPayload) {
    if !log::log_enabled!(target: TRACE_TARGET, log::Level::Debug) {
        return;
    }

    if let Some(state) = debug.game_state.as_ref() {
        log::debug!(
            target: TRACE_TARGET,
            "month={} day={} months_until_draft={} intimacy_level={}",
            state.current_month,
            state.current_day,
            state.months_until_draft,
            state.intimacy_level.as_deref().unwrap_or("-")
        );
    }

    if let Some(changes) = debug.stat_changes.as_ref() {
        for (stat, delta, before, after) in changes.deltas() {
            let fmt = |v: Option<i32>| v.map_or("?".to_string(), |v| v.to_string());
            log::debug!(
                target: TRACE_TARGET,
                "stat {}: {:+} ({} -> {})",
                stat,
                delta,
                fmt(before),
                fmt(after)
            );
        }
        if !changes.reason.is_empty() {
            log::debug!(target: TRACE_TARGET, "reason: {}", escape_log(&changes.reason));
        }
    }

    if let Some(check) = debug.event_check.as_ref().filter(|c| c.triggered) {
        log::debug!(
            target: TRACE_TARGET,
            "event triggered: {}",
            check.event_name.as_deref().unwrap_or("-")
        );
    }

    log::debug!(
        target: TRACE_TARGET,
        "hint_provided={} conversation_count={} event_history={}",
        debug.hint_provided,
        debug.conversation_count,
        serde_json::to_string(&debug.event_history).unwrap_or_default()
    );
}
