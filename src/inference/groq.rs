use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CompletionEngine, CompletionError, Result};
use crate::config::GroqSettings;

/// Client for Groq's OpenAI-compatible chat completions endpoint.
///
/// One prompt goes out as a single user message; the first choice comes back.
/// Nothing is retried and no timeout is set beyond reqwest's defaults.
#[derive(Clone)]
pub struct GroqService {
    client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
    endpoint: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl GroqService {
    pub fn new(settings: &GroqSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            endpoint: format!(
                "{}/chat/completions",
                settings.base_url.trim_end_matches('/')
            ),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionEngine for GroqService {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        debug!(model = %self.model, bytes = raw.len(), "completion received");

        parse_completion(&raw)
    }
}

fn parse_completion(raw: &str) -> Result<String> {
    let parsed: ChatCompletionResponse = serde_json::from_str(raw)
        .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| CompletionError::MalformedResponse("no completion text in response".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::{net::TcpListener, sync::Mutex};

    #[derive(Default)]
    struct Captured {
        auth: Option<String>,
        body: Option<Value>,
    }

    async fn spawn_stub(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Captured>>) {
        let captured = Arc::new(Mutex::new(Captured::default()));
        let sink = captured.clone();
        let app = Router::new().route(
            "/openai/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let sink = sink.clone();
                let reply = reply.clone();
                async move {
                    let mut seen = sink.lock().await;
                    seen.auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    seen.body = Some(body);
                    (status, Json(reply))
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/openai/v1/"), captured)
    }

    fn settings(base_url: String) -> GroqSettings {
        GroqSettings {
            api_key: "gsk_test".into(),
            model: "llama-3.1-8b-instant".into(),
            temperature: 0.3,
            base_url,
        }
    }

    #[tokio::test]
    async fn sends_single_user_message_and_reads_first_choice() {
        let reply = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Paris is the capital of France." } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        let (base, captured) = spawn_stub(StatusCode::OK, reply).await;
        let service = GroqService::new(&settings(base));

        let text = service.complete("Question: capital of France?").await.unwrap();
        assert_eq!(text, "Paris is the capital of France.");

        let seen = captured.lock().await;
        assert_eq!(seen.auth.as_deref(), Some("Bearer gsk_test"));
        let body = seen.body.as_ref().unwrap();
        assert_eq!(body["model"], "llama-3.1-8b-instant");
        assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Question: capital of France?");
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let reply = json!({ "error": { "message": "Invalid API Key" } });
        let (base, _) = spawn_stub(StatusCode::UNAUTHORIZED, reply).await;
        let service = GroqService::new(&settings(base));

        match service.complete("hi").await {
            Err(CompletionError::Api { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid API Key"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_malformed() {
        let (base, _) = spawn_stub(StatusCode::OK, json!({ "choices": [] })).await;
        let service = GroqService::new(&settings(base));

        assert!(matches!(
            service.complete("hi").await,
            Err(CompletionError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_http_error() {
        let service = GroqService::new(&settings("http://127.0.0.1:1".into()));
        assert!(matches!(
            service.complete("hi").await,
            Err(CompletionError::Http(_))
        ));
    }

    #[test]
    fn parse_rejects_non_json() {
        assert!(matches!(
            parse_completion("<html>gateway timeout</html>"),
            Err(CompletionError::MalformedResponse(_))
        ));
    }

    #[test]
    fn parse_rejects_missing_content() {
        let raw = r#"{"choices":[{"message":{"role":"assistant"}}]}"#;
        assert!(matches!(
            parse_completion(raw),
            Err(CompletionError::MalformedResponse(_))
        ));
    }
}
