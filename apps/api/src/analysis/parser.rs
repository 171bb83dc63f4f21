//! Response parsing and degradation for the business-analysis pipeline.
//!
//! Pure functions of (raw text, canonical record, identifier): no logging, no
//! I/O, no failure path. Whatever the model returned — labeled lines, loose
//! prose, or nothing at all — the caller gets back a `BusinessAnalysis` with
//! every field populated.

use serde::Serialize;

use crate::analysis::record::BusinessRecord;
use crate::fallback;

/// Structured analysis returned to the wire, every field non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessAnalysis {
    pub analysis_id: String,
    pub industry_classification: String,
    pub market_position: String,
    pub growth_potential: String,
    pub strengths_and_advantages: String,
    pub market_opportunities: String,
    pub strategic_recommendations: String,
    pub business_overview: String,
}

/// Extracts the seven analysis fields from raw completion text, degrading
/// tier by tier until every field holds something useful.
pub fn parse_analysis(raw: &str, record: &BusinessRecord, analysis_id: String) -> BusinessAnalysis {
    let labeled = |prefix| fallback::labeled_field(raw, prefix).unwrap_or_default();

    let industry_classification = labeled("INDUSTRY_CLASSIFICATION:");
    let market_position = labeled("MARKET_POSITION:");
    let growth_potential = labeled("GROWTH_POTENTIAL:");
    let strengths_and_advantages = labeled("STRENGTHS_ADVANTAGES:");
    let market_opportunities = labeled("MARKET_OPPORTUNITIES:");
    let strategic_recommendations = labeled("STRATEGIC_RECOMMENDATIONS:");
    let mut business_overview = labeled("BUSINESS_OVERVIEW:");

    if business_overview.is_empty() {
        if let Some(paragraph) = fallback::leading_paragraph(raw) {
            business_overview = paragraph;
        }
    }
    if fallback::needs_synthesis(&business_overview) {
        business_overview = fallback::synthesize_overview(
            &record.company_name,
            &record.industry,
            record.years_in_operation,
            &record.location,
        );
    }

    BusinessAnalysis {
        analysis_id,
        industry_classification: or_canned(industry_classification, default_industry(record)),
        market_position: or_canned(market_position, "Established market participant".into()),
        growth_potential: or_canned(
            growth_potential,
            "Moderate growth opportunities identified".into(),
        ),
        strengths_and_advantages: or_canned(
            strengths_and_advantages,
            "Operational experience and market presence".into(),
        ),
        market_opportunities: or_canned(
            market_opportunities,
            "Market expansion and service diversification".into(),
        ),
        strategic_recommendations: or_canned(
            strategic_recommendations,
            "Continue operational excellence and explore growth opportunities".into(),
        ),
        business_overview,
    }
}

fn or_canned(value: String, canned: String) -> String {
    if value.trim().is_empty() {
        canned
    } else {
        value
    }
}

fn default_industry(record: &BusinessRecord) -> String {
    if record.industry.trim().is_empty() {
        "Business Services".to_string()
    } else {
        record.industry.clone()
    }
}
