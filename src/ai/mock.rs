use super::AnalysisService;
use crate::models::AnalysisResult;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory [`AnalysisService`] that records what it was asked.
pub struct MockAnalysisClient {
    responses: Arc<Mutex<Vec<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockAnalysisClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

impl Default for MockAnalysisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisClient {
    async fn analyze(&self, prompt: &str, image: &[u8]) -> Result<AnalysisResult> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.prompts.lock().unwrap().push(prompt.to_string());

        if *self.should_fail.lock().unwrap() {
            return Err(Error::AiProvider("Mock failure".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(AnalysisResult(format!(
                "Image Analysis: {} bytes inspected\nProduct Description: A mock piece.\nCaption: Mock sparkle.",
                image.len()
            )))
        } else {
            let index = (*count - 1) % responses.len();
            Ok(AnalysisResult(responses[index].clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_response() {
        let client = MockAnalysisClient::new();

        let result = client.analyze("describe", &[1, 2, 3]).await.unwrap();
        assert!(result.as_str().contains("3 bytes"));
        assert!(result.as_str().contains("Caption:"));
    }

    #[tokio::test]
    async fn test_mock_custom_responses_cycle() {
        let client = MockAnalysisClient::new()
            .with_response("first".to_string())
            .with_response("second".to_string());

        assert_eq!(client.analyze("p", &[]).await.unwrap().as_str(), "first");
        assert_eq!(client.analyze("p", &[]).await.unwrap().as_str(), "second");
        assert_eq!(client.analyze("p", &[]).await.unwrap().as_str(), "first");
    }

    #[tokio::test]
    async fn test_mock_records_prompt_and_count() {
        let client = MockAnalysisClient::new();
        assert_eq!(client.get_call_count(), 0);
        assert_eq!(client.last_prompt(), None);

        client.analyze("the prompt", &[]).await.unwrap();
        assert_eq!(client.get_call_count(), 1);
        assert_eq!(client.last_prompt().as_deref(), Some("the prompt"));
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let client = MockAnalysisClient::new().with_failure(true);

        let err = client.analyze("p", &[]).await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
        assert_eq!(client.get_call_count(), 1);
    }
}
