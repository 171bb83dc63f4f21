//! Risk-assessment pipeline: normalize → prompt → complete → parse/degrade,
//! with an optional assistant-backed retrieval branch in front.

pub mod handlers;
pub mod parser;
pub mod prompt;
pub mod record;
pub mod service;

pub use parser::RiskAssessmentResult;
pub use record::RiskRecord;
