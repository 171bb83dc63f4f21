//! Response parsing and degradation for the risk-assessment pipeline.
//!
//! Two entry points, both pure and both infallible:
//!
//! - [`parse_risk_text`] handles the direct branch's line-prefixed output
//!   with the same tier chain as the analysis parser.
//! - [`parse_risk_json`] handles the assistant branch's reformatted JSON,
//!   with per-field canned defaults; a decode failure yields the static
//!   canned assessment, never a partial salvage and never an error.

use serde::Serialize;
use serde_json::Value;

use crate::fallback;
use crate::risk::record::RiskRecord;

/// Structured risk assessment returned to the wire, every field non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentResult {
    pub assessment_id: String,
    pub overall_risk_level: String,
    pub risk_score: String,
    pub financial_risk: String,
    pub operational_risk: String,
    pub market_risk: String,
    pub compliance_risk: String,
    pub risk_factors: String,
    pub mitigation_strategies: String,
    pub risk_summary: String,
}

/// Parses line-prefixed completion text, degrading per field.
pub fn parse_risk_text(raw: &str, record: &RiskRecord, assessment_id: String) -> RiskAssessmentResult {
    let labeled = |prefix| fallback::labeled_field(raw, prefix).unwrap_or_default();

    let overall_risk_level = labeled("OVERALL_RISK_LEVEL:");
    let risk_score = labeled("RISK_SCORE:");
    let financial_risk = labeled("FINANCIAL_RISK:");
    let operational_risk = labeled("OPERATIONAL_RISK:");
    let market_risk = labeled("MARKET_RISK:");
    let compliance_risk = labeled("COMPLIANCE_RISK:");
    let risk_factors = labeled("RISK_FACTORS:");
    let mitigation_strategies = labeled("MITIGATION_STRATEGIES:");
    let mut risk_summary = labeled("RISK_SUMMARY:");

    if risk_summary.is_empty() {
        if let Some(paragraph) = fallback::leading_paragraph(raw) {
            risk_summary = paragraph;
        }
    }
    if fallback::needs_synthesis(&risk_summary) {
        risk_summary = fallback::synthesize_overview(
            &record.company_name,
            &record.industry,
            record.years_in_operation,
            &record.location,
        );
    }

    RiskAssessmentResult {
        assessment_id,
        overall_risk_level: or_canned(overall_risk_level, "Medium"),
        risk_score: or_canned(risk_score, "Risk score calculation in progress"),
        financial_risk: or_canned(financial_risk, "Financial risk assessment pending"),
        operational_risk: or_canned(operational_risk, "Operational risk analysis required"),
        market_risk: or_canned(market_risk, "Market risk evaluation in progress"),
        compliance_risk: or_canned(compliance_risk, "Compliance risk assessment pending"),
        risk_factors: or_canned(risk_factors, "Risk factor identification in progress"),
        mitigation_strategies: or_canned(mitigation_strategies, "Risk mitigation strategies pending"),
        risk_summary,
    }
}

/// Parses the JSON-reformat stage's output.
///
/// Only a leading fence explicitly tagged as JSON, with a matching closing
/// fence on its own line, is stripped; anything else goes to the decoder
/// verbatim and a failed decode produces the canned fallback.
pub fn parse_risk_json(raw: &str, company_name: &str, assessment_id: String) -> RiskAssessmentResult {
    let cleaned = strip_json_fence(raw);
    let parsed: Value = match serde_json::from_str(&cleaned) {
        Ok(Value::Object(map)) => Value::Object(map),
        _ => return fallback_assessment(company_name, assessment_id),
    };

    RiskAssessmentResult {
        assessment_id,
        overall_risk_level: json_field(&parsed, "overallRiskLevel", "Medium"),
        risk_score: json_field(&parsed, "riskScore", "Risk score calculation in progress"),
        financial_risk: json_field(&parsed, "financialRisk", "Financial risk assessment pending"),
        operational_risk: json_field(
            &parsed,
            "operationalRisk",
            "Operational risk analysis required",
        ),
        market_risk: json_field(&parsed, "marketRisk", "Market risk evaluation in progress"),
        compliance_risk: json_field(
            &parsed,
            "complianceRisk",
            "Compliance risk assessment pending",
        ),
        risk_factors: json_field(&parsed, "riskFactors", "Risk factor identification in progress"),
        mitigation_strategies: json_field(
            &parsed,
            "mitigationStrategies",
            "Risk mitigation strategies pending",
        ),
        risk_summary: json_field(&parsed, "riskSummary", "Risk assessment summary in progress"),
    }
}

/// Last-resort static assessment, used when the completion call itself fails
/// or the reformatted JSON cannot be decoded.
pub fn fallback_assessment(company_name: &str, assessment_id: String) -> RiskAssessmentResult {
    let company = if company_name.trim().is_empty() {
        "Unknown"
    } else {
        company_name
    };
    RiskAssessmentResult {
        assessment_id,
        overall_risk_level: "Medium".to_string(),
        risk_score: format!("Risk assessment for {company} requires manual review"),
        financial_risk: "Financial risk analysis requires additional data".to_string(),
        operational_risk: "Operational risk assessment pending comprehensive review".to_string(),
        market_risk: "Market risk evaluation requires industry analysis".to_string(),
        compliance_risk: "Compliance risk assessment requires regulatory review".to_string(),
        risk_factors: "Risk factor identification requires detailed manual analysis".to_string(),
        mitigation_strategies: "Risk mitigation strategies require comprehensive assessment"
            .to_string(),
        risk_summary: "Manual risk assessment and due diligence required for complete evaluation"
            .to_string(),
    }
}

fn or_canned(value: String, canned: &str) -> String {
    if value.trim().is_empty() {
        canned.to_string()
    } else {
        value
    }
}

fn json_field(parsed: &Value, key: &str, default: &str) -> String {
    match parsed.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Null) | None => default.to_string(),
        Some(Value::String(_)) => default.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Strips a leading ```` ```json ```` fence and its closing fence. Untagged
/// fences and surrounding prose are left alone — those fail the decode and
/// degrade to the canned fallback, by contract.
fn strip_json_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```json") {
        return trimmed.to_string();
    }
    let lines: Vec<&str> = trimmed.lines().collect();
    match lines.iter().rposition(|line| line.trim() == "```") {
        Some(end) if end > 0 => lines[1..end].join("\n"),
        _ => lines[1..].join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn acme() -> RiskRecord {
        RiskRecord::from_value(&json!({
            "companyName": "Acme Trucking",
            "industry": "Transportation",
            "yearsInOperation": 12,
            "location": "Dallas, TX"
        }))
    }

    fn assert_all_fields_non_empty(result: &RiskAssessmentResult) {
        assert!(!result.assessment_id.is_empty());
        assert!(!result.overall_risk_level.is_empty());
        assert!(!result.risk_score.is_empty());
        assert!(!result.financial_risk.is_empty());
        assert!(!result.operational_risk.is_empty());
        assert!(!result.market_risk.is_empty());
        assert!(!result.compliance_risk.is_empty());
        assert!(!result.risk_factors.is_empty());
        assert!(!result.mitigation_strategies.is_empty());
        assert!(!result.risk_summary.is_empty());
    }

    #[test]
    fn test_parse_risk_text_extracts_labeled_fields() {
        let raw = "\
OVERALL_RISK_LEVEL: Low
RISK_SCORE: 23/100 based on revenue stability
FINANCIAL_RISK: Steady revenue with moderate leverage
RISK_SUMMARY: Acme Trucking presents low overall risk with a stable financial profile.";
        let result = parse_risk_text(raw, &acme(), "RA_1".into());
        assert_eq!(result.overall_risk_level, "Low");
        assert_eq!(result.risk_score, "23/100 based on revenue stability");
        assert!(result.risk_summary.starts_with("Acme Trucking presents low"));
        assert_all_fields_non_empty(&result);
    }

    #[test]
    fn test_parse_risk_text_fills_missing_fields_with_canned_phrases() {
        let result = parse_risk_text("OVERALL_RISK_LEVEL: High", &acme(), "RA_1".into());
        assert_eq!(result.overall_risk_level, "High");
        assert_eq!(result.market_risk, "Market risk evaluation in progress");
        assert_all_fields_non_empty(&result);
    }

    #[test]
    fn test_parse_risk_text_synthesizes_summary() {
        let result = parse_risk_text("", &acme(), "RA_1".into());
        assert_eq!(
            result.risk_summary,
            "Acme Trucking is an established business in the Transportation sector \
             with 12 years of operational experience based in Dallas, TX."
        );
    }

    #[test]
    fn test_parse_risk_json_happy_path() {
        let raw = r#"{"overallRiskLevel": "Low", "riskSummary": "Solid profile."}"#;
        let result = parse_risk_json(raw, "Acme", "RA_1".into());
        assert_eq!(result.overall_risk_level, "Low");
        assert_eq!(result.risk_summary, "Solid profile.");
        assert_eq!(result.financial_risk, "Financial risk assessment pending");
        assert_all_fields_non_empty(&result);
    }

    #[test]
    fn test_parse_risk_json_strips_tagged_fence() {
        let raw = "```json\n{\"overallRiskLevel\": \"High\"}\n```";
        let result = parse_risk_json(raw, "Acme", "RA_1".into());
        assert_eq!(result.overall_risk_level, "High");
    }

    #[test]
    fn test_parse_risk_json_leaves_untagged_fence_to_fail() {
        let raw = "```\n{\"overallRiskLevel\": \"High\"}\n```";
        let result = parse_risk_json(raw, "Acme", "RA_1".into());
        assert_eq!(result.risk_score, "Risk assessment for Acme requires manual review");
    }

    #[test]
    fn test_parse_risk_json_malformed_yields_canned_fallback() {
        for raw in ["{\"overallRiskLevel\": \"Low\"", "not json at all", "", "[1, 2, 3]"] {
            let result = parse_risk_json(raw, "Acme", "RA_1".into());
            assert_eq!(
                result.risk_summary,
                "Manual risk assessment and due diligence required for complete evaluation"
            );
            assert_all_fields_non_empty(&result);
        }
    }

    #[test]
    fn test_parse_risk_json_is_deterministic() {
        let raw = r#"{"riskSummary": "Stable."}"#;
        let first = parse_risk_json(raw, "Acme", "RA_1".into());
        let second = parse_risk_json(raw, "Acme", "RA_1".into());
        assert_eq!(first, second);
    }

    #[test]
    fn test_fallback_assessment_names_company() {
        let result = fallback_assessment("Acme", "RA_1".into());
        assert_eq!(result.risk_score, "Risk assessment for Acme requires manual review");
        assert_all_fields_non_empty(&result);
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = fallback_assessment("Acme", "RA_1".into());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["assessmentId"], "RA_1");
        assert!(json.get("overallRiskLevel").is_some());
        assert!(json.get("overall_risk_level").is_none());
    }
}
