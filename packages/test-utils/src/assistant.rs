//! Mock chat-completions server for dialog tests

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock assistant server simulating an OpenAI-compatible
/// chat-completions endpoint
pub struct MockAssistantServer {
    server: MockServer,
}

impl MockAssistantServer {
    /// Start a new mock assistant server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Mount a mock that answers every completion with the given text
    pub async fn mock_completion(&self, answer: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": { "role": "assistant", "content": answer }
                }]
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock that answers with an empty completion
    pub async fn mock_empty_completion(&self) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": []
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for a server error
    pub async fn mock_server_error(&self) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": "internal error"
            })))
            .mount(&self.server)
            .await;
    }
}
