//! Network-backed assistant client.
//!
//! Speaks the proxy protocol: POST `{"question": ...}`, expect
//! `{"answer": ...}` on success or `{"error": ..., "details": ...}` with a
//! non-success status. Failures are surfaced to the caller with status and
//! details; requests are never retried automatically.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::Responder;
use crate::error::AssistantError;

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct AskResponse {
    answer: Option<String>,
    error: Option<String>,
    details: Option<String>,
}

/// HTTP client for the chat-completion proxy.
pub struct RemoteAssistant {
    endpoint: Url,
    client: Client,
}

impl RemoteAssistant {
    pub fn new(endpoint: &str) -> Result<Self, AssistantError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|_| AssistantError::InvalidEndpoint(endpoint.to_string()))?;
        Ok(Self {
            endpoint,
            client: Client::new(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one question to the proxy.
    pub async fn ask(&self, question: &str) -> Result<String, AssistantError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(|e| AssistantError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AssistantError::Transport(e.to_string()))?;
        let body: AskResponse = serde_json::from_str(&text).unwrap_or_default();

        if !status.is_success() {
            let details = match (body.error, body.details) {
                (Some(error), Some(details)) => format!("{error}: {details}"),
                (Some(error), None) => error,
                (None, _) => text,
            };
            return Err(AssistantError::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        body.answer.ok_or(AssistantError::MissingAnswer)
    }
}

impl Responder for RemoteAssistant {
    /// Blocking bridge for sync call sites; spins up a runtime per call.
    /// Use [`RemoteAssistant::ask`] from async code.
    fn respond(&self, question: &str) -> Result<String, AssistantError> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| AssistantError::Transport(e.to_string()))?;
        runtime.block_on(self.ask(question))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answer_is_extracted_from_a_success_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/ai")
            .match_body(mockito::Matcher::PartialJson(
                serde_json::json!({"question": "How to study?"}),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"answer": "Focus in short blocks."}"#)
            .create_async()
            .await;

        let assistant = RemoteAssistant::new(&format!("{}/api/ai", server.url())).unwrap();
        let answer = assistant.ask("How to study?").await.unwrap();
        assert_eq!(answer, "Focus in short blocks.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_status_and_details() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/ai")
            .with_status(500)
            .with_body(r#"{"error": "Upstream API error", "details": "quota exceeded"}"#)
            .create_async()
            .await;

        let assistant = RemoteAssistant::new(&format!("{}/api/ai", server.url())).unwrap();
        let err = assistant.ask("anything").await.unwrap_err();
        match err {
            AssistantError::Upstream { status, details } => {
                assert_eq!(status, 500);
                assert!(details.contains("Upstream API error"));
                assert!(details.contains("quota exceeded"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_without_an_answer_field_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/ai")
            .with_status(200)
            .with_body(r#"{}"#)
            .create_async()
            .await;

        let assistant = RemoteAssistant::new(&format!("{}/api/ai", server.url())).unwrap();
        assert!(matches!(
            assistant.ask("anything").await,
            Err(AssistantError::MissingAnswer)
        ));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        assert!(matches!(
            RemoteAssistant::new("not a url"),
            Err(AssistantError::InvalidEndpoint(_))
        ));
    }
}
