use crate::engine::chat_client::{ChatError, DecodedImage};
use crate::model::chat_api::{ChatRequest, ChatResponse};

/// Links a completed exchange back to the placeholder it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub u64);

pub enum EngineCommand {
    Chat { ticket: Ticket, request: ChatRequest },
    FetchImage { path: String },
}

pub enum EngineResponse {
    ChatCompleted {
        ticket: Ticket,
        result: Result<ChatResponse, ChatError>,
    },

    ImageLoaded {
        path: String,
        result: Result<DecodedImage, ChatError>,
    },
}
