use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::models::DEFAULT_BASE_URL;
use crate::{Error, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

pub struct OpenAiHttpClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiHttpClient {
    /// Without a timeout the request waits as long as the transport allows.
    pub fn new(api_key: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// POST `request` as JSON to `path` and decode the JSON reply.
    pub async fn post_json<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .inspect_err(|e| tracing::error!("Request to {} failed: {}", path, e))?;

        let body = Self::success_body(path, response).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Unparsable reply from {}: {} (body: {})", path, e, body);
            Error::AiProvider(format!("Failed to parse OpenAI response: {}", e))
        })
    }

    /// Body text of a 2xx reply; anything else becomes [`Error::AiProvider`]
    /// carrying the status and the service's own message.
    async fn success_body(path: &str, response: Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }

        tracing::error!("{} returned {}: {}", path, status, body);
        Err(Error::AiProvider(format!(
            "OpenAI API error (status {}): {}",
            status, body
        )))
    }

    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.post_json(CHAT_COMPLETIONS_PATH, request).await
    }
}
