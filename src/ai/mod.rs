//! AI service integration for jewelry image analysis
//!
//! Wraps the multimodal chat API behind a narrow seam: prompt and image in,
//! raw text out, or an error.

pub mod mock;
pub mod openai;

pub use mock::MockAnalysisClient;
pub use openai::OpenAiVisionClient;

use crate::models::AnalysisResult;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Send one prompt plus image and return the service's text verbatim.
    async fn analyze(&self, prompt: &str, image: &[u8]) -> Result<AnalysisResult>;
}
