//! Business-analysis pipeline: normalize → prompt → complete → parse/degrade.

pub mod handlers;
pub mod parser;
pub mod prompt;
pub mod record;
pub mod service;

pub use parser::BusinessAnalysis;
pub use record::BusinessRecord;
