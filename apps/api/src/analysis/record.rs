//! Canonical business record for the analysis pipeline.

use serde_json::{Map, Value};

use crate::input;

// Alias resolution order per field: canonical key first, then legacy names.
const COMPANY_NAME: &[&str] = &["companyName", "company"];
const INDUSTRY: &[&str] = &["industry"];
const BUSINESS_TYPE: &[&str] = &["businessType", "businessStructure"];
const YEARS_IN_OPERATION: &[&str] = &["yearsInOperation", "yearsInBusiness"];
const EMPLOYEE_COUNT: &[&str] = &["employeeCount"];
const ANNUAL_REVENUE: &[&str] = &["annualRevenue"];
const TOTAL_ASSETS: &[&str] = &["totalAssets", "totalEquipmentCost"];
const CREDIT_RATING: &[&str] = &["creditRating"];
const PRIMARY_MARKETS: &[&str] = &["primaryMarkets"];
const COMPETITIVE_ADVANTAGES: &[&str] = &["competitiveAdvantages"];
const BUSINESS_MODEL: &[&str] = &["businessModel"];
const KEY_PRODUCTS: &[&str] = &["keyProducts", "leadEquipments"];
const RECENT_DEVELOPMENTS: &[&str] = &["recentDevelopments"];
const ADDITIONAL_INFO: &[&str] = &["additionalInfo"];

/// Fully-defaulted view of one business, built fresh per request.
///
/// Always constructable from a partial, loosely-typed input mapping; every
/// field carries a safe default so downstream prompt building and fallback
/// synthesis never have to handle absence.
#[derive(Debug, Clone, Default)]
pub struct BusinessRecord {
    pub company_name: String,
    pub industry: String,
    pub business_type: String,
    pub location: String,
    pub years_in_operation: u64,
    pub employee_count: u64,

    pub annual_revenue: f64,
    pub total_assets: f64,
    pub credit_rating: String,

    pub primary_markets: Vec<String>,
    pub competitive_advantages: Vec<String>,
    pub business_model: String,

    pub key_products: Vec<Value>,
    pub recent_developments: String,
    pub additional_info: Map<String, Value>,

    pub legacy: LegacyFields,
}

/// Legacy-named fields carried through but never surfaced in prompts.
#[derive(Debug, Clone, Default)]
pub struct LegacyFields {
    pub experian_score: String,
    pub paynet_score: String,
    pub is_vendor: bool,
    pub documents: Vec<Value>,
}

impl BusinessRecord {
    pub fn from_value(body: &Value) -> Self {
        Self {
            company_name: input::string_field(body, COMPANY_NAME),
            industry: input::string_field(body, INDUSTRY),
            business_type: input::string_field(body, BUSINESS_TYPE),
            location: input::location_field(body),
            years_in_operation: input::uint_field(body, YEARS_IN_OPERATION),
            employee_count: input::uint_field(body, EMPLOYEE_COUNT),
            annual_revenue: input::float_field(body, ANNUAL_REVENUE),
            total_assets: input::float_field(body, TOTAL_ASSETS),
            credit_rating: input::string_field(body, CREDIT_RATING),
            primary_markets: input::string_list_field(body, PRIMARY_MARKETS),
            competitive_advantages: input::string_list_field(body, COMPETITIVE_ADVANTAGES),
            business_model: input::string_field(body, BUSINESS_MODEL),
            key_products: input::value_list_field(body, KEY_PRODUCTS),
            recent_developments: input::string_field(body, RECENT_DEVELOPMENTS),
            additional_info: input::map_field(body, ADDITIONAL_INFO),
            legacy: LegacyFields {
                experian_score: input::string_field(body, &["experianScore"]),
                paynet_score: input::string_field(body, &["paynetScore"]),
                is_vendor: input::bool_field(body, &["isVendor"]),
                documents: input::value_list_field(body, &["documents"]),
            },
        }
    }
}
