pub mod chat_client;
pub mod engine;
pub mod protocol;
