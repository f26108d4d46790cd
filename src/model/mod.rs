pub mod chat_api;
pub mod game_state;
pub mod message;
