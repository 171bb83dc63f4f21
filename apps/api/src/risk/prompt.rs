//! Prompt construction for the risk-assessment pipeline.

use crate::input;
use crate::money::format_usd;
use crate::risk::record::RiskRecord;

/// System prompt for the direct (non-assistant) branch. The line-prefixed
/// RESPONSE FORMAT mirrors what the parser extracts.
pub const RISK_SYSTEM: &str = "\
You are a business risk assessment specialist providing comprehensive risk analysis and \
intelligence.

Provide thorough business risk assessments covering:
1. Overall risk level classification and scoring
2. Financial stability and credit risk analysis
3. Operational and business model risks
4. Market and competitive risks
5. Compliance and regulatory risks
6. Risk mitigation strategies and recommendations

RESPONSE FORMAT (follow exactly):
OVERALL_RISK_LEVEL: [Low/Medium/High/Critical]
RISK_SCORE: [Numerical risk score with methodology]
FINANCIAL_RISK: [Financial stability and credit risk assessment]
OPERATIONAL_RISK: [Operational and business model risk analysis]
MARKET_RISK: [Market and competitive risk evaluation]
COMPLIANCE_RISK: [Regulatory and compliance risk assessment]
RISK_FACTORS: [Key risk factors identified]
MITIGATION_STRATEGIES: [Risk mitigation recommendations]
RISK_SUMMARY: [Executive summary of the risk assessment]

Be analytical, specific, and provide actionable insights for risk management and \
strategic decision-making.";

/// System prompt for the JSON-reformat stage of the assistant branch.
pub const REFORMAT_SYSTEM: &str =
    "You are a JSON parser. Return only valid JSON with no additional text.";

/// Renders the risk record as the direct-branch assessment prompt.
pub fn build_risk_prompt(record: &RiskRecord) -> String {
    format!(
        "Perform comprehensive business risk assessment for:\n\n\
         BUSINESS PROFILE:\n\
         Company: {company}\n\
         Industry: {industry}\n\
         Location: {location}\n\
         Years in Operation: {years}\n\
         Business Structure: {structure}\n\
         Employee Count: {employees}\n\n\
         FINANCIAL INDICATORS:\n\
         Annual Revenue: {revenue}\n\
         Credit Rating: {rating}\n\
         Market Position: {position}\n\n\
         OPERATIONAL DETAILS:\n\
         Key Personnel: {personnel}\n\
         Main Products/Services: {products}\n\n\
         Provide comprehensive risk assessment including:\n\
         1. Overall Risk Level (Low/Medium/High/Critical)\n\
         2. Risk Score with methodology\n\
         3. Financial Risk Assessment\n\
         4. Operational Risk Analysis\n\
         5. Market Risk Evaluation\n\
         6. Compliance Risk Assessment\n\
         7. Key Risk Factors\n\
         8. Risk Mitigation Strategies\n\
         9. Executive Risk Summary",
        company = record.company_name,
        industry = record.industry,
        location = record.location,
        years = record.years_in_operation,
        structure = record.business_structure,
        employees = record.employee_count,
        revenue = format_usd(record.annual_revenue),
        rating = record.credit_rating,
        position = record.market_position,
        personnel = join_or_unspecified(&record.key_personnel),
        products = join_products(&record.main_products),
    )
}

/// Query sent to the policy-corpus assistant in the retrieval branch.
pub fn build_rag_query(record: &RiskRecord) -> String {
    format!(
        "Please perform a comprehensive business risk assessment using established risk \
         management frameworks and policies.\n\n\
         Focus on risk identification, risk scoring, and mitigation strategies. Ensure your \
         assessment covers all required risk categories with detailed analysis.\n\n\
         BUSINESS RISK ASSESSMENT DATA:\n\
         - Company: {company}\n\
         - Industry: {industry}\n\
         - Years in Operation: {years}\n\
         - Location: {location}\n\
         - Business Structure: {structure}\n\
         - Employee Count: {employees}\n\
         - Annual Revenue: {revenue}\n\
         - Credit Rating: {rating}\n\
         - Key Personnel: {personnel}\n\
         - Main Products/Services: {products}\n\
         - Market Position: {position}\n\n\
         Please provide a comprehensive risk assessment covering financial, operational, \
         market, and compliance risks.",
        company = record.company_name,
        industry = record.industry,
        years = record.years_in_operation,
        location = record.location,
        structure = record.business_structure,
        employees = record.employee_count,
        revenue = format_usd(record.annual_revenue),
        rating = record.credit_rating,
        personnel = join_or_unspecified(&record.key_personnel),
        products = join_products(&record.main_products),
        position = record.market_position,
    )
}

/// Prompt for the second completion stage: reformat the assistant's free-text
/// answer into a JSON object keyed by the result fields.
pub fn build_reformat_prompt(assistant_answer: &str) -> String {
    format!(
        r#"Parse the following comprehensive business risk assessment response and extract detailed, specific information for each field.

Risk assessment response:
{assistant_answer}

Extract and return ONLY a JSON object with these exact fields, ensuring each response is detailed and specific:
{{
    "overallRiskLevel": "Low/Medium/High/Critical - with specific reasoning",
    "riskScore": "Numerical risk score with detailed explanation and methodology",
    "financialRisk": "Comprehensive financial health assessment",
    "operationalRisk": "Operational and business model risk analysis",
    "marketRisk": "Market and competitive risk evaluation",
    "complianceRisk": "Regulatory and compliance risk assessment",
    "riskFactors": "Specific risk factors with impact and probability",
    "mitigationStrategies": "Strategic recommendations for risk mitigation",
    "riskSummary": "Executive summary of the risk assessment"
}}

Important:
- Make responses detailed and specific, not generic
- Reference actual risk frameworks when mentioned in the analysis
- Include specific metrics, percentages, or criteria when available
- Provide actionable insights rather than generic statements"#
    )
}

fn join_or_unspecified(items: &[String]) -> String {
    if items.is_empty() {
        "Not specified".to_string()
    } else {
        items.join(", ")
    }
}

fn join_products(items: &[serde_json::Value]) -> String {
    if items.is_empty() {
        return "Not specified".to_string();
    }
    let labels: Vec<String> = items.iter().map(input::display_string).collect();
    labels.join(", ")
}
