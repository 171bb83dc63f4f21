//! Prompt construction for the business-analysis pipeline.

use crate::analysis::record::BusinessRecord;
use crate::input;
use crate::money::format_usd;

/// System prompt — analyst persona plus the exact line-prefixed output format
/// the parser extracts.
pub const ANALYSIS_SYSTEM: &str = "\
You are an expert Business Intelligence Analyst specializing in comprehensive business \
analysis and market positioning. You must analyze the provided company data and create \
strategic business insights.

IMPORTANT: You must ONLY use the data provided in the user message. Do not ask for \
additional information or indicate missing data.

RESPONSE FORMAT (follow exactly):
INDUSTRY_CLASSIFICATION: [Primary industry classification and business category]
MARKET_POSITION: [Current market positioning and competitive standing]
GROWTH_POTENTIAL: [Growth opportunities and expansion potential assessment]
STRENGTHS_ADVANTAGES: [Key business strengths and competitive advantages]
MARKET_OPPORTUNITIES: [Identified market opportunities and trends]
STRATEGIC_RECOMMENDATIONS: [Strategic recommendations for business development]
BUSINESS_OVERVIEW: [Comprehensive strategic business analysis summary]

RULES:
1. MUST use the actual company name provided
2. Focus on business intelligence and strategic analysis
3. Include market positioning and competitive analysis
4. Assess growth potential and business model sustainability
5. Include operational maturity based on years in business
6. Analyze geographic market presence
7. Never ask for more information - work with what you have
8. Be specific and use actual details from the data
9. Think like a management consultant providing strategic insights

Write professional, strategic assessments using the exact details provided to you.";

/// Scripted assistant turn sent between the data prompt and the final nudge.
pub const ANALYSIS_ACK: &str = "\
I'll analyze the provided business data and create a comprehensive business intelligence \
analysis. Let me review the company details, market position, and business information to \
generate strategic insights.";

/// Final user turn restating the required line prefixes.
pub const ANALYSIS_NUDGE: &str = "\
Generate the analysis now using the exact format: INDUSTRY_CLASSIFICATION: [classification] \
MARKET_POSITION: [position] GROWTH_POTENTIAL: [potential] STRENGTHS_ADVANTAGES: [strengths] \
MARKET_OPPORTUNITIES: [opportunities] STRATEGIC_RECOMMENDATIONS: [recommendations] \
BUSINESS_OVERVIEW: [overview]";

/// Renders the canonical record as a sectioned prompt.
///
/// A section is emitted only when at least one of its fields is non-default;
/// no header ever appears with zero body lines. The closing instruction block
/// is always present.
pub fn build_analysis_prompt(record: &BusinessRecord) -> String {
    let mut parts = vec!["ANALYZE THIS BUSINESS FOR COMPREHENSIVE STRATEGIC INTELLIGENCE:\n".to_string()];

    let mut overview = Vec::new();
    if !record.company_name.is_empty() {
        overview.push(format!("Company Name: {}", record.company_name));
    }
    if !record.industry.is_empty() {
        overview.push(format!("Industry: {}", record.industry));
    }
    if !record.business_type.is_empty() {
        overview.push(format!("Business Type: {}", record.business_type));
    }
    if !record.location.trim().is_empty() {
        overview.push(format!("Location: {}", record.location));
    }
    if record.years_in_operation > 0 {
        overview.push(format!("Years in Operation: {}", record.years_in_operation));
    }
    if record.employee_count > 0 {
        overview.push(format!("Employee Count: {}", record.employee_count));
    }
    push_section(&mut parts, "COMPANY OVERVIEW", overview);

    let mut financial = Vec::new();
    if record.annual_revenue > 0.0 {
        financial.push(format!("Annual Revenue: {}", format_usd(record.annual_revenue)));
    }
    if record.total_assets > 0.0 {
        financial.push(format!("Total Assets: {}", format_usd(record.total_assets)));
    }
    if !record.credit_rating.is_empty() {
        financial.push(format!("Credit Rating: {}", record.credit_rating));
    }
    push_section(&mut parts, "FINANCIAL PROFILE", financial);

    let mut market = Vec::new();
    if !record.primary_markets.is_empty() {
        market.push(format!("Primary Markets: {}", record.primary_markets.join(", ")));
    }
    if !record.competitive_advantages.is_empty() {
        market.push(format!(
            "Competitive Advantages: {}",
            record.competitive_advantages.join(", ")
        ));
    }
    if !record.business_model.is_empty() {
        market.push(format!("Business Model: {}", record.business_model));
    }
    push_section(&mut parts, "MARKET INFORMATION", market);

    let mut products = Vec::new();
    if !record.key_products.is_empty() {
        let labels: Vec<String> = record.key_products.iter().map(input::display_string).collect();
        products.push(format!("Key Products/Services: {}", labels.join(", ")));
    }
    if !record.recent_developments.is_empty() {
        products.push(format!("Recent Developments: {}", record.recent_developments));
    }
    push_section(&mut parts, "PRODUCTS & SERVICES", products);

    let additional: Vec<String> = record
        .additional_info
        .iter()
        .map(|(key, value)| format!("{key}: {}", input::display_string(value)))
        .collect();
    push_section(&mut parts, "ADDITIONAL INFORMATION", additional);

    parts.push("=== STRATEGIC ANALYSIS REQUIRED ===".to_string());
    parts.push("Provide a comprehensive business intelligence analysis covering:".to_string());
    parts.push("1. Industry classification and positioning".to_string());
    parts.push("2. Current market position and competitive landscape".to_string());
    parts.push("3. Growth potential and expansion opportunities".to_string());
    parts.push("4. Key business strengths and competitive advantages".to_string());
    parts.push("5. Market opportunities and emerging trends".to_string());
    parts.push("6. Strategic recommendations for business development".to_string());
    parts.push("7. Overall business assessment and outlook".to_string());
    parts.push("Use ONLY the information provided above.".to_string());

    parts.join("\n")
}

fn push_section(parts: &mut Vec<String>, header: &str, body: Vec<String>) {
    if body.is_empty() {
        return;
    }
    parts.push(format!("=== {header} ==="));
    parts.extend(body);
    parts.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record() -> BusinessRecord {
        BusinessRecord::from_value(&json!({
            "companyName": "Acme Trucking",
            "industry": "Transportation",
            "businessType": "LLC",
            "location": "Dallas, TX",
            "yearsInOperation": 12,
            "employeeCount": 45,
            "annualRevenue": 2500000.0,
            "totalAssets": 1200000.0,
            "creditRating": "B+",
            "primaryMarkets": ["Texas", "Oklahoma"],
            "competitiveAdvantages": ["Owned fleet"],
            "businessModel": "Contract freight",
            "keyProducts": [{"description": "Refrigerated transport"}, "Flatbed hauling"],
            "recentDevelopments": "Added 5 trucks",
            "additionalInfo": {"fleetSize": 30}
        }))
    }

    #[test]
    fn test_prompt_contains_all_sections_for_full_record() {
        let prompt = build_analysis_prompt(&full_record());
        assert!(prompt.contains("=== COMPANY OVERVIEW ==="));
        assert!(prompt.contains("=== FINANCIAL PROFILE ==="));
        assert!(prompt.contains("=== MARKET INFORMATION ==="));
        assert!(prompt.contains("=== PRODUCTS & SERVICES ==="));
        assert!(prompt.contains("=== ADDITIONAL INFORMATION ==="));
        assert!(prompt.contains("=== STRATEGIC ANALYSIS REQUIRED ==="));
    }

    #[test]
    fn test_prompt_formats_money_with_separators() {
        let prompt = build_analysis_prompt(&full_record());
        assert!(prompt.contains("Annual Revenue: $2,500,000.00"));
        assert!(prompt.contains("Total Assets: $1,200,000.00"));
    }

    #[test]
    fn test_prompt_omits_financial_section_when_empty() {
        let record = BusinessRecord::from_value(&json!({
            "companyName": "Acme Trucking",
            "annualRevenue": 0,
            "totalAssets": 0,
            "creditRating": ""
        }));
        let prompt = build_analysis_prompt(&record);
        assert!(!prompt.contains("FINANCIAL PROFILE"));
    }

    #[test]
    fn test_prompt_omits_headers_without_body_lines() {
        let record = BusinessRecord::from_value(&json!({"companyName": "Acme"}));
        let prompt = build_analysis_prompt(&record);
        assert!(prompt.contains("=== COMPANY OVERVIEW ==="));
        assert!(!prompt.contains("MARKET INFORMATION"));
        assert!(!prompt.contains("PRODUCTS & SERVICES"));
        assert!(!prompt.contains("=== ADDITIONAL INFORMATION ==="));
    }

    #[test]
    fn test_prompt_joins_lists_and_extracts_product_descriptions() {
        let prompt = build_analysis_prompt(&full_record());
        assert!(prompt.contains("Primary Markets: Texas, Oklahoma"));
        assert!(prompt.contains("Key Products/Services: Refrigerated transport, Flatbed hauling"));
    }

    #[test]
    fn test_prompt_always_ends_with_instruction_block() {
        let prompt = build_analysis_prompt(&BusinessRecord::default());
        assert!(prompt.contains("7. Overall business assessment and outlook"));
        assert!(prompt.trim_end().ends_with("Use ONLY the information provided above."));
    }
}
