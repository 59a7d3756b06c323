use async_trait::async_trait;
use log::{ debug, error };
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };

use super::{ ChatClient, CompletionResponse };
use crate::error::CompletionError;
use crate::llm::LlmConfig;
use crate::models::chat::ChatMessage;

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct OpenAIChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

impl OpenAIChatClient {
    pub fn new(
        api_key: &str,
        model: String,
        base_url: String,
        max_tokens: u32
    ) -> Result<Self, CompletionError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| CompletionError::InvalidCredential(e.to_string()))?
        );

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            model,
            base_url,
            max_tokens,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, CompletionError> {
        Self::new(
            &config.api_key,
            config.completion_model.clone(),
            config.base_url.clone(),
            config.max_tokens
        )
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn parse_answer(body: &str) -> Result<String, CompletionError> {
    let resp: OpenAIResponse = serde_json
        ::from_str(body)
        .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

    resp.choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::MalformedResponse("response has no choices".to_string()))?
        .message.content
        .ok_or_else(|| CompletionError::MalformedResponse("first choice has no content".to_string()))
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn complete(
        &self,
        messages: &[ChatMessage]
    ) -> Result<CompletionResponse, CompletionError> {
        let req = OpenAIChatRequest {
            model: &self.model,
            messages,
            stream: false,
            max_tokens: self.max_tokens,
        };
        debug!("Sending {} messages to {}", messages.len(), self.model);

        let resp = self.http.post(self.completions_url()).json(&req).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            error!("Completion endpoint returned {}", status);
            return Err(CompletionError::Status { status, body });
        }

        let content = parse_answer(&body)?;
        Ok(CompletionResponse { response: content })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> String {
        self.base_url.clone()
    }
}
