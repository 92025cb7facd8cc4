use crate::error::{GraderError, Result};
use crate::evaluate::Evaluator;
use crate::types::config::CompletionConfig;
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

pub struct CompletionClient {
    endpoint: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
    http: reqwest::Client,
}

impl CompletionClient {
    pub fn new(config: &CompletionConfig, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("grader/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key: api_key.into(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            http,
        })
    }

    /// Sends one prompt and returns the trimmed text of the first choice.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let body = CompletionRequest {
            prompt,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(
            endpoint = %self.endpoint,
            prompt_bytes = prompt.len(),
            "posting completion request"
        );
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraderError::Completion {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response.json().await?;
        let text = json
            .pointer("/choices/0/text")
            .and_then(|value| value.as_str())
            .ok_or_else(|| {
                GraderError::MalformedResponse("completion response has no choices".to_string())
            })?;

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl Evaluator for CompletionClient {
    async fn evaluate(&self, prompt: &str) -> Result<String> {
        self.complete(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CompletionClient {
        let config = CompletionConfig {
            endpoint: format!("{}/v1/completions", server.uri()),
            ..CompletionConfig::default()
        };
        CompletionClient::new(&config, "test-key").expect("client should build")
    }

    #[tokio::test]
    async fn complete_sends_fixed_parameters_and_trims_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_json(json!({
                "prompt": "Is this fine?",
                "max_tokens": 100,
                "temperature": 0.7,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "text": "\n\n1  " }, { "text": "0" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let answer = client_for(&server)
            .complete("Is this fine?")
            .await
            .expect("completion should succeed");
        assert_eq!(answer, "1");
    }

    #[tokio::test]
    async fn identical_prompts_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "choices": [{ "text": "0" }] })),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.complete("same").await.expect("first call should succeed");
        client.complete("same").await.expect("second call should succeed");
    }

    #[tokio::test]
    async fn missing_choices_is_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete("prompt")
            .await
            .expect_err("empty choices should fail");
        assert!(matches!(err, GraderError::MalformedResponse(_)));
        assert!(err.to_string().contains("no choices"));
    }

    #[tokio::test]
    async fn error_status_surfaces_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete("prompt")
            .await
            .expect_err("401 should fail");
        match err {
            GraderError::Completion { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_success_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).complete("prompt").await;
        assert!(matches!(result, Err(GraderError::Http(_))));
    }
}
