//! Application orchestration for a single jewelry analysis.

use crate::ai::{AnalysisService, OpenAiVisionClient};
use crate::budget::compute_word_budget;
use crate::models::{AnalysisRequest, AnalysisResult, Config, WordBudget};
use crate::prompts::build_prompt;
use crate::Result;
use tracing::{error, info};

/// Everything produced for one request.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub budget: WordBudget,
    pub prompt: String,
    pub result: AnalysisResult,
}

/// Budget and prompt for a request, without contacting the service.
pub fn prepare(request: &AnalysisRequest) -> (WordBudget, String) {
    let budget = compute_word_budget(
        request.length,
        request.has_context(),
        request.attributes.has_any(),
    );
    let prompt = build_prompt(request, budget);
    (budget, prompt)
}

/// Turns an [`AnalysisRequest`] into a prompt and relays it to the service.
pub struct Analyzer {
    service: Box<dyn AnalysisService>,
}

impl Analyzer {
    /// Build an analyzer around any service implementation.
    ///
    /// Used by tests to inject [`crate::ai::MockAnalysisClient`].
    pub fn with_service(service: Box<dyn AnalysisService>) -> Self {
        Self { service }
    }

    /// Construct an analyzer backed by OpenAI.
    ///
    /// Fails with [`crate::Error::MissingApiKey`] before any network activity
    /// when the configuration carries no key.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = OpenAiVisionClient::from_config(config)?;
        info!("Analysis provider: OpenAI (model: {})", config.model);
        Ok(Self::with_service(Box::new(client)))
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Analysis> {
        let (budget, prompt) = prepare(request);
        info!(
            "Analyzing image ({} bytes, tone {}, {} to {} words)",
            request.image.len(),
            request.tone,
            budget.min,
            budget.max
        );

        let result = self
            .service
            .analyze(&prompt, &request.image)
            .await
            .map_err(|e| {
                error!("Analysis failed: {}", e);
                e
            })?;

        info!("Analysis complete ({} chars)", result.as_str().len());
        Ok(Analysis {
            budget,
            prompt,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockAnalysisClient;
    use crate::models::{JewelryAttribute, JewelryAttributes, LengthTier, Tone};
    use crate::Error;

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            image: vec![0xFF, 0xD8, 0xFF, 0xE0],
            tone: Tone::Festive,
            length: LengthTier::Short,
            additional_context: None,
            attributes: JewelryAttributes::new(),
        }
    }

    #[test]
    fn test_prepare_widens_budget_for_extras() {
        let mut req = request();
        assert_eq!(prepare(&req).0, WordBudget { min: 28, max: 30 });

        req.additional_context = Some("Eid gifting".to_string());
        assert_eq!(prepare(&req).0, WordBudget { min: 38, max: 40 });

        req.attributes.set(JewelryAttribute::Metal, "Rose gold");
        let (budget, prompt) = prepare(&req);
        assert_eq!(budget, WordBudget { min: 43, max: 45 });
        assert!(prompt.contains("Metal: Rose gold"));
        assert!(prompt.contains("Eid gifting"));
    }

    #[test]
    fn test_whitespace_attribute_counts_as_jewelry_info() {
        let mut req = request();
        req.attributes.set(JewelryAttribute::Carat, " ");
        let (budget, prompt) = prepare(&req);
        assert_eq!(budget, WordBudget { min: 38, max: 40 });
        assert!(prompt.contains("image analysis information: Carat:  \n"));

        req.attributes.set(JewelryAttribute::Carat, " 1.5 ");
        let (_, prompt) = prepare(&req);
        assert!(prompt.contains("Carat:  1.5 "));
    }

    #[test]
    fn test_blank_context_does_not_widen_budget() {
        let mut req = request();
        req.additional_context = Some("   ".to_string());
        assert_eq!(prepare(&req).0, WordBudget { min: 28, max: 30 });
    }

    #[tokio::test]
    async fn test_analyze_relays_service_text() {
        let analyzer = Analyzer::with_service(Box::new(
            MockAnalysisClient::new().with_response("Caption: Sparkle".to_string()),
        ));

        let analysis = analyzer.analyze(&request()).await.unwrap();
        assert_eq!(analysis.result.as_str(), "Caption: Sparkle");
        assert_eq!(analysis.budget, WordBudget { min: 28, max: 30 });
        assert!(analysis.prompt.contains("following tone: Festive"));
    }

    #[tokio::test]
    async fn test_analyze_propagates_service_error() {
        let analyzer =
            Analyzer::with_service(Box::new(MockAnalysisClient::new().with_failure(true)));

        let err = analyzer.analyze(&request()).await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[test]
    fn test_from_config_without_key_fails() {
        let err = Analyzer::from_config(&Config::default()).err().unwrap();
        assert!(matches!(err, Error::MissingApiKey));
    }
}
