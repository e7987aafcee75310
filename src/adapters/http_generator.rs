use crate::domain::ports::{ConfigProvider, TextGenerator};
use crate::utils::error::{GenerationError, ImpactError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for an OpenAI-compatible chat completions API.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub temperature: f32,
}

impl GeneratorSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let endpoint = config
            .generator_endpoint()
            .ok_or_else(|| ImpactError::MissingConfigError {
                field: "generator.endpoint".to_string(),
            })?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            model: config.generator_model().to_string(),
            api_key: config.generator_api_key().map(str::to_string),
            timeout: Duration::from_secs(config.generator_timeout_seconds()),
            temperature: config.generator_temperature(),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct HttpTextGenerator {
    client: Client,
    settings: GeneratorSettings,
}

impl HttpTextGenerator {
    pub fn new(settings: GeneratorSettings) -> Result<Self> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.settings.temperature,
            stream: false,
        };

        let url = self.completions_url();
        tracing::debug!("Making generation request to: {}", url);

        let mut http_request = self.client.post(&url).json(&request);
        if let Some(key) = &self.settings.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request.send().await.map_err(|e| {
            tracing::error!("Failed to send generation request: {}", e);
            GenerationError::Transport(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!("Generator response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GenerationError::MalformedResponse("no choices returned".to_string()))?;

        if content.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn settings(endpoint: String, api_key: Option<&str>) -> GeneratorSettings {
        GeneratorSettings {
            endpoint,
            model: "test-model".to_string(),
            api_key: api_key.map(str::to_string),
            timeout: Duration::from_secs(5),
            temperature: 0.7,
        }
    }

    #[tokio::test]
    async fn test_generate_returns_first_choice() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer secret")
                .json_body_partial(r#"{"model":"test-model","stream":false}"#);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "Two shares, one meal!"}}]
                }));
        });

        let generator = HttpTextGenerator::new(settings(server.url("/v1/"), Some("secret"))).unwrap();
        let text = generator.generate("explain").await.unwrap();

        api_mock.assert();
        assert_eq!(text, "Two shares, one meal!");
    }

    #[tokio::test]
    async fn test_generate_maps_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500).body("boom");
        });

        let generator = HttpTextGenerator::new(settings(server.base_url(), None)).unwrap();
        let err = generator.generate("explain").await.unwrap_err();
        assert!(matches!(err, GenerationError::Status { status: 500, ref body } if body == "boom"));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_content() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(serde_json::json!({"choices": [{"message": {"content": "  "}}]}));
        });

        let generator = HttpTextGenerator::new(settings(server.base_url(), None)).unwrap();
        let err = generator.generate("explain").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_generate_rejects_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(serde_json::json!({"choices": []}));
        });

        let generator = HttpTextGenerator::new(settings(server.base_url(), None)).unwrap();
        let err = generator.generate("explain").await.unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }
}
