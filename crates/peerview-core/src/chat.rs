//! Chat session transport.
//!
//! Thin HTTP glue to the chat backend: POST a prompt, forward the streamed
//! response body to the webview chunk by chunk, and clear the server-side
//! session on request. The session id is generated once per process and
//! attached to every call; everything beyond that (prompt format, model,
//! history) is the backend's business.

use futures_util::StreamExt;
use serde_json::json;
use tauri::{AppHandle, Emitter, Runtime};
use tracing::debug;
use uuid::Uuid;

use crate::Error;

pub const CHUNK_EVENT: &str = "chat:stream-chunk";
pub const DONE_EVENT: &str = "chat:stream-done";
pub const ERROR_EVENT: &str = "chat:stream-error";

#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    session_id: String,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn prompt_body(&self, prompt: &str) -> serde_json::Value {
        json!({
            "session_id": self.session_id,
            "prompt": prompt,
        })
    }

    /// POST the prompt and emit each streamed response chunk as a
    /// `chat:stream-chunk` event, followed by `chat:stream-done`.
    pub async fn send_stream<R: Runtime>(
        &self,
        app: &AppHandle<R>,
        prompt: &str,
    ) -> Result<(), Error> {
        debug!("chat prompt for session {}", self.session_id);
        let response = self
            .http
            .post(format!("{}/chat", self.base_url))
            .json(&self.prompt_body(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ChatBackend(format!("{status}: {body}")));
        }

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            let _ = app.emit(
                CHUNK_EVENT,
                json!({
                    "sessionId": self.session_id,
                    "chunk": String::from_utf8_lossy(&chunk),
                }),
            );
        }
        let _ = app.emit(DONE_EVENT, json!({ "sessionId": self.session_id }));
        Ok(())
    }

    /// Drop the server-side conversation history for this session.
    pub async fn clear(&self) -> Result<(), Error> {
        let response = self
            .http
            .post(format!("{}/session/clear", self.base_url))
            .json(&json!({ "session_id": self.session_id }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::ChatBackend(format!(
                "session clear failed: {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_body_carries_the_session_id() {
        let client = ChatClient::new("http://localhost:8000");
        let body = client.prompt_body("hello");
        assert_eq!(body["session_id"], client.session_id());
        assert_eq!(body["prompt"], "hello");
    }

    #[test]
    fn session_ids_are_unique_per_client() {
        let a = ChatClient::new("http://localhost:8000");
        let b = ChatClient::new("http://localhost:8000");
        assert_ne!(a.session_id(), b.session_id());
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = ChatClient::new("http://localhost:8000/");
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
