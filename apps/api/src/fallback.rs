//! Degradation tiers for turning raw completion text into guaranteed-complete
//! fields.
//!
//! Every result field goes through an ordered chain of fallible strategies,
//! first success wins:
//!
//! 1. labeled-line extraction (`FIELD_NAME: value`)
//! 2. leading-paragraph heuristic (overview/summary fields only)
//! 3. synthesis from the canonical record
//!
//! The primitives here are pure functions of their inputs; the pipeline
//! parsers own the chaining and the per-field canned phrases.

/// Raw text shorter than this is not worth mining for a paragraph.
pub const MIN_RAW_LEN: usize = 50;

/// Shortest paragraph accepted by the tier-2 heuristic.
pub const MIN_PARAGRAPH_LEN: usize = 30;

/// An overview shorter than this is replaced by synthesized text.
pub const MIN_OVERVIEW_LEN: usize = 20;

/// Tier 1: the value after the first trimmed line starting with `prefix`.
///
/// Matching is case-sensitive and only the first occurrence counts, even when
/// a later line carries a longer value for the same prefix.
pub fn labeled_field(raw: &str, prefix: &str) -> Option<String> {
    raw.lines().find_map(|line| {
        line.trim()
            .strip_prefix(prefix)
            .map(|rest| rest.trim().to_string())
    })
}

/// Tier 2: the first blank-line-delimited paragraph of substance.
///
/// Returns nothing when the raw text is too short to plausibly contain an
/// overview at all.
pub fn leading_paragraph(raw: &str) -> Option<String> {
    if raw.trim().len() <= MIN_RAW_LEN {
        return None;
    }
    raw.split("\n\n")
        .map(str::trim)
        .find(|paragraph| paragraph.len() > MIN_PARAGRAPH_LEN)
        .map(str::to_string)
}

/// Tier-3 trigger: empty or too short to stand as an overview.
pub fn needs_synthesis(overview: &str) -> bool {
    overview.trim().len() < MIN_OVERVIEW_LEN
}

/// Tier 3: an overview sentence built from the canonical record, one clause
/// per non-empty source field.
pub fn synthesize_overview(company: &str, industry: &str, years: u64, location: &str) -> String {
    let company = if company.trim().is_empty() {
        "Company"
    } else {
        company
    };
    let mut overview = format!("{company} is an established business");
    if !industry.trim().is_empty() {
        overview.push_str(&format!(" in the {industry} sector"));
    }
    if years > 0 {
        overview.push_str(&format!(" with {years} years of operational experience"));
    }
    if !location.trim().is_empty() {
        overview.push_str(&format!(" based in {location}"));
    }
    overview.push('.');
    overview
}
