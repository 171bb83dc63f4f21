//! Canonical business record for the risk pipeline.
//!
//! Shares the alias conventions of the analysis record but carries risk-
//! specific fields and non-empty string defaults: an unknown industry is
//! still assessed as "Business Services", an absent credit rating reads
//! "Not Available".

use serde_json::Value;

use crate::input;

const COMPANY_NAME: &[&str] = &["companyName", "company"];
const YEARS_IN_OPERATION: &[&str] = &["yearsInOperation", "yearsInBusiness"];
const ANNUAL_REVENUE: &[&str] = &["annualRevenue", "totalEquipmentCost"];
const MAIN_PRODUCTS: &[&str] = &["mainProducts", "leadEquipments"];

/// Fully-defaulted risk view of one business, built fresh per request.
#[derive(Debug, Clone, Default)]
pub struct RiskRecord {
    pub company_name: String,
    pub industry: String,
    pub location: String,
    pub years_in_operation: u64,
    pub business_structure: String,
    pub employee_count: u64,
    pub annual_revenue: f64,
    pub credit_rating: String,
    pub key_personnel: Vec<String>,
    pub main_products: Vec<Value>,
    pub market_position: String,
    pub business_id: String,
}

impl RiskRecord {
    pub fn from_value(body: &Value) -> Self {
        Self {
            company_name: input::string_field(body, COMPANY_NAME),
            industry: input::string_field_or(body, &["industry"], "Business Services"),
            location: input::location_field(body),
            years_in_operation: input::uint_field(body, YEARS_IN_OPERATION),
            business_structure: input::string_field_or(body, &["businessStructure"], "Unknown"),
            employee_count: input::uint_field(body, &["employeeCount"]),
            annual_revenue: input::float_field(body, ANNUAL_REVENUE),
            credit_rating: input::string_field_or(body, &["creditRating"], "Not Available"),
            key_personnel: input::string_list_field(body, &["keyPersonnel"]),
            main_products: input::value_list_field(body, MAIN_PRODUCTS),
            market_position: input::string_field_or(body, &["marketPosition"], "Established"),
            business_id: input::string_field(body, &["businessId"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_risk_defaults() {
        let record = RiskRecord::from_value(&json!({}));
        assert_eq!(record.industry, "Business Services");
        assert_eq!(record.business_structure, "Unknown");
        assert_eq!(record.credit_rating, "Not Available");
        assert_eq!(record.market_position, "Established");
        assert_eq!(record.company_name, "");
        assert_eq!(record.business_id, "");
    }

    #[test]
    fn test_from_value_resolves_legacy_aliases() {
        let body = json!({
            "company": "Acme Trucking",
            "yearsInBusiness": 8,
            "totalEquipmentCost": 750000,
            "leadEquipments": ["Dry van"]
        });
        let record = RiskRecord::from_value(&body);
        assert_eq!(record.company_name, "Acme Trucking");
        assert_eq!(record.years_in_operation, 8);
        assert_eq!(record.annual_revenue, 750_000.0);
        assert_eq!(record.main_products.len(), 1);
    }

    #[test]
    fn test_from_value_prefers_canonical_revenue() {
        let body = json!({"annualRevenue": 100.0, "totalEquipmentCost": 999.0});
        assert_eq!(RiskRecord::from_value(&body).annual_revenue, 100.0);
    }

    #[test]
    fn test_from_value_composes_location_from_city_state() {
        let body = json!({"businessCity": "Tulsa", "businessState": "OK"});
        assert_eq!(RiskRecord::from_value(&body).location, "Tulsa, OK");
    }
}
