use crate::model::message::{ChatMessage, MessageId, Sender};

/// The running chat log.
///
/// A renderer built with [`MessageRenderer::detached`] has no log surface:
/// it still hands out handles, but nothing is stored or shown.
pub struct MessageRenderer {
    log: Option<Vec<ChatMessage>>,
    next_id: u64,
    scroll_to_bottom: bool,
}

impl Default for MessageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageRenderer {
    pub fn new() -> Self {
        Self {
            log: Some(Vec::new()),
            next_id: 1,
            scroll_to_bottom: false,
        }
    }

    pub fn detached() -> Self {
        Self {
            log: None,
            ..Self::new()
        }
    }

    /// Adds a message at the bottom of the log and asks for a scroll to it.
    /// Images are only kept for bot messages.
    pub fn append_message(
        &mut self,
        sender: Sender,
        text: impl Into<String>,
        image: Option<String>,
    ) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;

        if let Some(log) = self.log.as_mut() {
            log.push(ChatMessage {
                id,
                sender,
                text: text.into(),
                image: image.filter(|_| sender == Sender::Bot),
            });
            self.scroll_to_bottom = true;
        }

        id
    }

    /// Returns false when the message was already gone.
    pub fn remove_message(&mut self, id: MessageId) -> bool {
        let Some(log) = self.log.as_mut() else {
            return false;
        };

        match log.iter().position(|m| m.id == id) {
            Some(index) => {
                log.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.log.as_deref().unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }

    /// Consumes the pending scroll request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_bottom)
    }
}
