//! Orchestration for the risk-assessment pipeline.

use serde_json::Value;
use tracing::{info, warn};

use crate::ident;
use crate::llm_client::assistant::AssistantClient;
use crate::llm_client::{ChatMessage, CompletionRequest, CompletionService, LlmError};
use crate::risk::parser::{
    fallback_assessment, parse_risk_json, parse_risk_text, RiskAssessmentResult,
};
use crate::risk::prompt::{build_rag_query, build_reformat_prompt, build_risk_prompt, REFORMAT_SYSTEM, RISK_SYSTEM};
use crate::risk::record::RiskRecord;

const DIRECT_TEMPERATURE: f32 = 0.3;
const DIRECT_MAX_TOKENS: u32 = 2500;

const REFORMAT_TEMPERATURE: f32 = 0.3;
const REFORMAT_MAX_TOKENS: u32 = 2000;

/// Runs the full pipeline for one request body. Never fails: every branch
/// bottoms out in a complete result, degraded if need be.
///
/// When an assistant is configured, the retrieval branch runs first; any
/// failure there falls through to the direct completion branch.
pub async fn assess_risk(
    llm: &dyn CompletionService,
    assistant: Option<&AssistantClient>,
    body: &Value,
) -> RiskAssessmentResult {
    let record = RiskRecord::from_value(body);
    let assessment_id = ident::assessment_id(&record.business_id);
    info!(
        company = %record.company_name,
        industry = %record.industry,
        assessment_id = %assessment_id,
        "assessing business risk"
    );

    if let Some(assistant) = assistant {
        match assess_with_assistant(llm, assistant, &record, assessment_id.clone()).await {
            Ok(result) => return result,
            Err(e) => {
                warn!("assistant-backed assessment failed, using direct completion: {e}");
            }
        }
    }

    assess_direct(llm, &record, assessment_id).await
}

/// Retrieval branch: query the policy-corpus assistant, then have the model
/// reformat its own free-text answer as JSON.
async fn assess_with_assistant(
    llm: &dyn CompletionService,
    assistant: &AssistantClient,
    record: &RiskRecord,
    assessment_id: String,
) -> Result<RiskAssessmentResult, LlmError> {
    let query = build_rag_query(record);
    let answer = assistant.ask(&query).await?.ok_or(LlmError::EmptyContent)?;
    info!(chars = answer.len(), "assistant answer received");

    let request = CompletionRequest {
        messages: vec![
            ChatMessage::system(REFORMAT_SYSTEM),
            ChatMessage::user(build_reformat_prompt(&answer)),
        ],
        temperature: REFORMAT_TEMPERATURE,
        max_tokens: REFORMAT_MAX_TOKENS,
    };
    let raw = llm.complete(request).await?;

    Ok(parse_risk_json(&raw, &record.company_name, assessment_id))
}

/// Direct branch: one line-prefixed completion, parsed with the tier chain.
async fn assess_direct(
    llm: &dyn CompletionService,
    record: &RiskRecord,
    assessment_id: String,
) -> RiskAssessmentResult {
    let request = CompletionRequest {
        messages: vec![
            ChatMessage::system(RISK_SYSTEM),
            ChatMessage::user(build_risk_prompt(record)),
        ],
        temperature: DIRECT_TEMPERATURE,
        max_tokens: DIRECT_MAX_TOKENS,
    };

    match llm.complete(request).await {
        Ok(raw) => {
            info!(chars = raw.len(), "risk assessment response received");
            parse_risk_text(&raw, record, assessment_id)
        }
        Err(e) => {
            warn!("completion failed, returning canned risk assessment: {e}");
            fallback_assessment(&record.company_name, assessment_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

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
            "location": "Dallas, TX",
            "businessId": "biz-42"
        })
    }

    #[tokio::test]
    async fn test_assess_risk_direct_branch_parses_labeled_output() {
        let llm = ScriptedCompletion(
            "OVERALL_RISK_LEVEL: Low\n\
             RISK_SUMMARY: Acme Trucking carries low risk given its stable operating history.",
        );
        let result = assess_risk(&llm, None, &acme_body()).await;
        assert_eq!(result.overall_risk_level, "Low");
        assert!(result.risk_summary.starts_with("Acme Trucking carries low risk"));
        assert!(result.assessment_id.starts_with("RA_"));
        assert!(result.assessment_id.ends_with("_biz-42"));
    }

    #[tokio::test]
    async fn test_assess_risk_degrades_to_canned_fallback_on_failure() {
        let result = assess_risk(&FailingCompletion, None, &acme_body()).await;
        assert_eq!(result.overall_risk_level, "Medium");
        assert_eq!(
            result.risk_score,
            "Risk assessment for Acme Trucking requires manual review"
        );
    }

    #[tokio::test]
    async fn test_assess_risk_without_assistant_uses_direct_branch() {
        let llm = ScriptedCompletion("no labels here at all");
        let result = assess_risk(&llm, None, &acme_body()).await;
        // Unlabeled short output degrades to synthesis, not an error.
        assert!(result.risk_summary.starts_with("Acme Trucking is an established"));
    }
}
