use serde_json::{json, Value};

/// Outcome of an analysis request. On a clean decode this is whatever JSON
/// object the model produced (expected keys include quality_assessment,
/// risk_level, key_issues, immediate_actions, short_term_solutions,
/// long_term_solutions, cost_estimates, health_impacts, sdg6_alignment,
/// monitoring_plan, community_involvement), passed through without shape
/// validation. Otherwise it is one of the fixed fallback shapes below.
pub type AnalysisResult = Value;

/// Fallback returned when the model call itself failed: callers get an
/// explicit error message inside a 200 success envelope and must inspect
/// the analysis body to notice.
pub fn analysis_error_result(message: &str) -> AnalysisResult {
    json!({
        "error": format!("Failed to analyze water data: {}", message),
        "recommendations": [],
        "quality_assessment": "Unable to assess",
        "risk_level": "Unknown"
    })
}

/// Fallback returned when the model responded but no JSON object could be
/// recovered from its output. The raw text rides along under both
/// `recommendations` and `full_analysis`.
pub fn parse_fallback_result(raw_text: &str) -> AnalysisResult {
    json!({
        "quality_assessment": "Analysis completed",
        "risk_level": "See full analysis",
        "recommendations": raw_text,
        "full_analysis": raw_text
    })
}
