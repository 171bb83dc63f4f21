//! Orchestration for the business-analysis pipeline.

use serde_json::Value;
use tracing::{info, warn};

use crate::analysis::parser::{parse_analysis, BusinessAnalysis};
use crate::analysis::prompt::{
    build_analysis_prompt, ANALYSIS_ACK, ANALYSIS_NUDGE, ANALYSIS_SYSTEM,
};
use crate::analysis::record::BusinessRecord;
use crate::ident;
use crate::llm_client::{ChatMessage, CompletionRequest, CompletionService};

const ANALYSIS_TEMPERATURE: f32 = 0.2;
const ANALYSIS_MAX_TOKENS: u32 = 1000;

/// Runs the full pipeline for one request body. Never fails: a completion
/// error degrades to the tier-3 synthesized result.
pub async fn generate_analysis(llm: &dyn CompletionService, body: &Value) -> BusinessAnalysis {
    let record = BusinessRecord::from_value(body);
    let analysis_id = ident::analysis_id(&record.company_name);
    info!(
        company = %record.company_name,
        years = record.years_in_operation,
        location = %record.location,
        analysis_id = %analysis_id,
        "generating business analysis"
    );

    let request = CompletionRequest {
        messages: vec![
            ChatMessage::system(ANALYSIS_SYSTEM),
            ChatMessage::user(build_analysis_prompt(&record)),
            ChatMessage::assistant(ANALYSIS_ACK),
            ChatMessage::user(ANALYSIS_NUDGE),
        ],
        temperature: ANALYSIS_TEMPERATURE,
        max_tokens: ANALYSIS_MAX_TOKENS,
    };

    let raw = match llm.complete(request).await {
        Ok(text) => {
            info!(chars = text.len(), "business analysis response received");
            text
        }
        Err(e) => {
            warn!("completion failed, synthesizing analysis from input data: {e}");
            String::new()
        }
    };

    parse_analysis(&raw, &record, analysis_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    use crate::llm_client::LlmError;

    struct ScriptedCompletion(&'static str);

    #[async_trait]
    impl CompletionService for ScriptedCompletion {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingCompletion;

    #[async_trait]
    impl CompletionService for FailingCompletion {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn acme_body() -> Value {
        json!({
            "companyName": "Acme Trucking",
            "industry": "Transportation",
            "yearsInOperation": 12,
            "location": "Dallas, TX"
        })
    }

    #[tokio::test]
    async fn test_generate_analysis_extracts_labeled_fields() {
        let llm = ScriptedCompletion(
            "INDUSTRY_CLASSIFICATION: Transportation & Logistics\n\
             BUSINESS_OVERVIEW: Acme Trucking is a stable regional freight carrier.",
        );
        let analysis = generate_analysis(&llm, &acme_body()).await;
        assert_eq!(analysis.industry_classification, "Transportation & Logistics");
        assert_eq!(
            analysis.business_overview,
            "Acme Trucking is a stable regional freight carrier."
        );
        assert!(analysis.analysis_id.starts_with("ACME_TRUCKING_BA_"));
    }

    #[tokio::test]
    async fn test_generate_analysis_degrades_on_completion_failure() {
        let analysis = generate_analysis(&FailingCompletion, &acme_body()).await;
        assert_eq!(
            analysis.business_overview,
            "Acme Trucking is an established business in the Transportation sector \
             with 12 years of operational experience based in Dallas, TX."
        );
        assert_eq!(analysis.market_position, "Established market participant");
    }
}
