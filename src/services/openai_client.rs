use std::{
    fmt,
    time::{Duration, Instant},
};

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{
    config::PlannerConfig,
    error::{PlannerError, Result, UpstreamError},
    services::prompt::{build_system_prompt, build_user_prompt},
    types::TripRequest,
};

/// Thin client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// Each call is a single POST: no retry, no streaming.
#[derive(Clone)]
pub struct OpenAIClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAIClient {
    pub fn new(config: &PlannerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| PlannerError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }

    pub fn chat_url(&self) -> String {
        build_chat_url(&self.base_url)
    }

    /// Send `request` and return the provider's JSON envelope unmodified.
    pub async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> std::result::Result<Value, UpstreamError> {
        let request_url = self.chat_url();
        let started = Instant::now();

        let response = self
            .http
            .post(&request_url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| self.transport_error(err))?;

        debug!(
            target: "travel_planner::upstream",
            url = %request_url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "chat completion returned"
        );

        if !status.is_success() {
            let api_message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .and_then(|error| error.get("message"))
                        .and_then(|value| value.as_str())
                        .map(|s| s.to_string())
                })
                .unwrap_or(response_text);

            warn!(
                target: "travel_planner::upstream",
                status = status.as_u16(),
                "chat completion rejected: {}",
                api_message
            );
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: api_message,
            });
        }

        let response_json: Value = serde_json::from_str(&response_text)
            .map_err(|err| UpstreamError::MalformedEnvelope(format!("body is not JSON: {err}")))?;

        if !response_json.is_object() {
            return Err(UpstreamError::MalformedEnvelope(
                "expected a JSON object".to_string(),
            ));
        }

        Ok(response_json)
    }

    fn transport_error(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

impl fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

/// Outbound chat completion body, built once per trip and consumed by the send.
#[derive(Clone, Debug, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    temperature: f32,
}

impl ChatCompletionRequest {
    pub fn for_trip(request: &TripRequest, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                json!({
                    "role": "system",
                    "content": build_system_prompt(request)
                }),
                json!({
                    "role": "user",
                    "content": build_user_prompt(request)
                }),
            ],
            temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn messages(&self) -> &[Value] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip() -> TripRequest {
        TripRequest::builder(
            NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
            vec!["Paris".into()],
            vec!["food".into()],
        )
        .build()
        .unwrap()
    }

    #[test]
    fn test_build_chat_url() {
        assert_eq!(
            build_chat_url("https://api.openai.com/v1"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            build_chat_url("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            build_chat_url("http://localhost:1234/v1/chat/completions"),
            "http://localhost:1234/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = ChatCompletionRequest::for_trip(&trip(), "gpt-4o-mini", 0.7);
        assert_eq!(request.model(), "gpt-4o-mini");
        assert_eq!(request.temperature(), 0.7);
        assert_eq!(request.messages().len(), 2);

        let body: Value = serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["temperature"], 0.7);

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
        assert!(messages[1]["content"].as_str().unwrap().contains("Paris"));
    }

    #[test]
    fn test_prompts_never_carry_api_key() {
        let request = ChatCompletionRequest::for_trip(&trip(), "gpt-4o-mini", 0.7);
        let serialized = serde_json::to_string(&request).unwrap();
        assert!(!serialized.contains("Bearer"));
        assert!(!serialized.contains("api_key"));
    }
}
