//! Identifier generation for both pipelines.

use chrono::Utc;
use uuid::Uuid;

/// Longest identifier we will emit before truncating the company prefix.
const MAX_ID_LEN: usize = 60;

/// How much of the cleaned company name survives truncation.
const TRUNCATED_NAME_LEN: usize = 30;

/// Business-analysis identifier: `CLEANED_NAME_BA_<unix seconds>`.
///
/// The cleaned name keeps alphanumerics, hyphens, and underscores; spaces
/// become underscores and everything is uppercased. Names that would push the
/// identifier past 60 characters are cut to 30 characters first.
pub fn analysis_id(company_name: &str) -> String {
    analysis_id_at(company_name, Utc::now().timestamp())
}

fn analysis_id_at(company_name: &str, timestamp: i64) -> String {
    let cleaned = clean_company(company_name);
    let id = format!("{cleaned}_BA_{timestamp}");
    if id.len() > MAX_ID_LEN {
        let short: String = cleaned.chars().take(TRUNCATED_NAME_LEN).collect();
        format!("{short}_BA_{timestamp}")
    } else {
        id
    }
}

/// Risk-assessment identifier: `RA_<uuid>` plus the caller-supplied business
/// id when present. A random UUID rather than a name hash, so two companies
/// with the same name never collide.
pub fn assessment_id(business_id: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    if business_id.trim().is_empty() {
        format!("RA_{token}")
    } else {
        format!("RA_{token}_{business_id}")
    }
}

fn clean_company(name: &str) -> String {
    let name = if name.trim().is_empty() {
        "UNKNOWN_COMPANY"
    } else {
        name
    };
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .map(|c| {
            if c == ' ' {
                '_'
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}
