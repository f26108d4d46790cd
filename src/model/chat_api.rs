use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::game_state::DebugPayload;

/// Sentinel message sent by the startup exchange.
pub const BOOTSTRAP_MESSAGE: &str = "init";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub username: String,
}

impl ChatRequest {
    pub fn bootstrap(username: &str) -> Self {
        Self {
            message: BOOTSTRAP_MESSAGE.to_string(),
            username: username.to_string(),
        }
    }
}

/// The two reply shapes the backend sends.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    Text(String),
    Structured(StructuredReply),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructuredReply {
    pub reply: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedReply {
    pub text: String,
    pub image: Option<String>,
}

impl Reply {
    pub fn normalize(self) -> NormalizedReply {
        match self {
            Reply::Text(text) => NormalizedReply { text, image: None },
            Reply::Structured(StructuredReply { reply, image }) => NormalizedReply {
                text: reply,
                image: image.filter(|path| !path.trim().is_empty()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventInfo {
    pub event_name: String,
    #[serde(default)]
    pub trigger_message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawChatResponse")]
pub struct ChatResponse {
    pub reply: Reply,
    pub debug: Option<DebugPayload>,
    pub event: Option<EventInfo>,
    pub hint: Option<String>,
}

#[derive(Deserialize)]
struct RawChatResponse {
    reply: Reply,
    #[serde(default)]
    debug: Option<Value>,
    #[serde(default)]
    event: Option<EventInfo>,
    #[serde(default)]
    hint: Option<String>,
}

impl From<RawChatResponse> for ChatResponse {
    fn from(raw: RawChatResponse) -> Self {
        // debug data is display-only; a shape we don't understand must not sink the reply
        let debug = raw.debug.filter(|v| !v.is_null()).and_then(|value| {
            match serde_json::from_value::<DebugPayload>(value) {
                Ok(payload) => Some(payload),
                Err(e) => {
                    log::warn!("ignoring undecodable debug payload: {}", e);
                    None
                }
            }
        });

        Self {
            reply: raw.reply,
            debug,
            event: raw.event,
            hint: raw.hint.filter(|h| !h.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_reply_normalizes_without_image() {
        let resp: ChatResponse = serde_json::from_str(r#"{"reply":"hello"}"#).unwrap();
        assert_eq!(
            resp.reply.normalize(),
            NormalizedReply { text: "hello".into(), image: None }
        );
        assert!(resp.debug.is_none());
        assert!(resp.event.is_none());
        assert!(resp.hint.is_none());
    }

    #[test]
    fn structured_reply_carries_image() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"reply":{"reply":"hi","image":"/x.png"}}"#).unwrap();
        assert_eq!(
            resp.reply.normalize(),
            NormalizedReply { text: "hi".into(), image: Some("/x.png".into()) }
        );
    }

    #[test]
    fn blank_image_and_hint_are_treated_as_absent() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"reply":{"reply":"hi","image":""},"hint":"  "}"#).unwrap();
        assert_eq!(resp.reply.normalize().image, None);
        assert!(resp.hint.is_none());
    }

    #[test]
    fn broken_debug_payload_does_not_fail_the_response() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"reply":"ok","debug":{"game_state":"nonsense"}}"#).unwrap();
        assert!(resp.debug.is_none());
        assert_eq!(resp.reply.normalize().text, "ok");
    }

    #[test]
    fn event_and_hint_are_decoded() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"reply":"ok","event":{"event_name":"Slump","trigger_message":"He looks tired"},"hint":"Try resting"}"#,
        )
        .unwrap();
        let event = resp.event.unwrap();
        assert_eq!(event.event_name, "Slump");
        assert_eq!(event.trigger_message, "He looks tired");
        assert_eq!(resp.hint.as_deref(), Some("Try resting"));
    }

    #[test]
    fn missing_reply_is_an_error() {
        assert!(serde_json::from_str::<ChatResponse>(r#"{"hint":"x"}"#).is_err());
    }

    #[test]
    fn request_serializes_both_fields() {
        let json = serde_json::to_value(ChatRequest::bootstrap("Coach")).unwrap();
        assert_eq!(json, serde_json::json!({"message": "init", "username": "Coach"}));
    }
}
