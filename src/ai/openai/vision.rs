use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage, ChatMessageContent, ImageUrl, MessagePart};
use crate::ai::AnalysisService;
use crate::models::{AnalysisResult, Config};
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use std::time::Duration;

/// Uploads are always declared as JPEG, whatever their real encoding.
const IMAGE_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

pub struct OpenAiVisionClient {
    http: OpenAiHttpClient,
    model: String,
    max_tokens: u32,
}

impl OpenAiVisionClient {
    pub fn new(
        api_key: String,
        model: String,
        max_tokens: u32,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }

        Ok(Self {
            http: OpenAiHttpClient::new(api_key, timeout)?,
            model,
            max_tokens,
        })
    }

    /// Build a client from configuration, failing before any request when
    /// no API key is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        Ok(Self::new(
            api_key,
            config.model.clone(),
            config.max_tokens,
            config.timeout,
        )?
        .with_base_url(config.base_url.clone()))
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    fn build_request(&self, prompt: &str, image: &[u8]) -> ChatCompletionRequest {
        let data_url = format!(
            "{}{}",
            IMAGE_DATA_URI_PREFIX,
            base64::engine::general_purpose::STANDARD.encode(image)
        );

        let user_message = ChatMessage {
            role: "user".to_string(),
            content: Some(ChatMessageContent::Parts(vec![
                MessagePart::Text {
                    text: prompt.to_string(),
                },
                MessagePart::ImageUrl {
                    image_url: ImageUrl { url: data_url },
                },
            ])),
        };

        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![user_message],
            max_completion_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl AnalysisService for OpenAiVisionClient {
    async fn analyze(&self, prompt: &str, image: &[u8]) -> Result<AnalysisResult> {
        tracing::debug!(
            "Sending analysis request (model {}, {} image bytes, {} prompt chars)",
            self.model,
            image.len(),
            prompt.len()
        );

        let request = self.build_request(prompt, image);
        let response = self.http.chat_completion(&request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::AiProvider("No response from OpenAI chat API".to_string()))?;

        if choice.finish_reason.as_deref() == Some("length") {
            tracing::warn!("Analysis was cut off at the {} token limit", self.max_tokens);
        }

        match choice.message.content {
            Some(ChatMessageContent::Text(text)) => Ok(AnalysisResult(text)),
            _ => Err(Error::AiProvider(
                "OpenAI response contained no text content".to_string(),
            )),
        }
    }
}
