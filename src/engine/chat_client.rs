use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::model::chat_api::{ChatRequest, ChatResponse};
use crate::ui::settings::ClientSettings;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Any non-2xx answer, whatever the body says.
    #[error("server answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// RGBA8 pixels ready to be uploaded as a texture.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
}

pub struct ChatClient {
    http: Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ChatError> {
        let base_url = settings.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ChatError::InvalidUrl(settings.base_url.clone()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs.max(1)))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    /// Resolve an image reference from a reply. Absolute URLs pass through.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    pub fn post_chat(&self, req: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let resp = self.http.post(self.chat_url()).json(req).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChatError::Status(status));
        }

        let body = resp.text()?;
        Ok(serde_json::from_str::<ChatResponse>(&body)?)
    }

    pub fn fetch_image(&self, path: &str) -> Result<DecodedImage, ChatError> {
        let resp = self.http.get(self.resolve(path)).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChatError::Status(status));
        }

        let bytes = resp.bytes()?;
        let rgba = image::load_from_memory(&bytes)?.to_rgba8();

        Ok(DecodedImage {
            size: [rgba.width() as usize, rgba.height() as usize],
            rgba: rgba.into_raw(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // blocking clients must be built and dropped off the async runtime
    fn client_for(uri: String) -> ChatClient {
        let settings = ClientSettings {
            base_url: uri,
            ..ClientSettings::default()
        };
        ChatClient::new(&settings).unwrap()
    }

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([255, 0, 0, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn rejects_base_url_without_scheme() {
        let settings = ClientSettings {
            base_url: "localhost:5000".into(),
            ..ClientSettings::default()
        };
        assert!(matches!(ChatClient::new(&settings), Err(ChatError::InvalidUrl(_))));
    }

    #[test]
    fn resolves_relative_image_paths() {
        let client = client_for("http://example.test/".into());
        assert_eq!(client.chat_url(), "http://example.test/api/chat");
        assert_eq!(client.resolve("/static/a.png"), "http://example.test/static/a.png");
        assert_eq!(client.resolve("https://cdn.test/b.png"), "https://cdn.test/b.png");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn posts_message_and_username_as_json() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"message": "hello", "username": "Coach"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "reply": {"reply": "hi coach", "image": "/static/wave.png"},
                "hint": "Ask about practice"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let uri = server.uri();
        let resp = tokio::task::spawn_blocking(move || {
            client_for(uri).post_chat(&ChatRequest {
                message: "hello".into(),
                username: "Coach".into(),
            })
        })
        .await
        .unwrap()
        .unwrap();

        let reply = resp.reply.normalize();
        assert_eq!(reply.text, "hi coach");
        assert_eq!(reply.image.as_deref(), Some("/static/wave.png"));
        assert_eq!(resp.hint.as_deref(), Some("Ask about practice"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn non_success_status_is_an_error_even_with_a_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"reply": "looks fine"})),
            )
            .mount(&server)
            .await;

        let uri = server.uri();
        let err = tokio::task::spawn_blocking(move || client_for(uri).post_chat(&ChatRequest::bootstrap("Coach")))
            .await
            .unwrap()
            .unwrap_err();

        assert!(matches!(err, ChatError::Status(s) if s.as_u16() == 500));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let uri = server.uri();
        let err = tokio::task::spawn_blocking(move || client_for(uri).post_chat(&ChatRequest::bootstrap("Coach")))
            .await
            .unwrap()
            .unwrap_err();

        assert!(matches!(err, ChatError::Decode(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fetches_and_decodes_png() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/static/pic.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(tiny_png()))
            .mount(&server)
            .await;

        let uri = server.uri();
        let img = tokio::task::spawn_blocking(move || client_for(uri).fetch_image("/static/pic.png"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(img.size, [2, 3]);
        assert_eq!(img.rgba.len(), 2 * 3 * 4);
        assert_eq!(&img.rgba[..4], &[255, 0, 0, 255]);
    }
}
