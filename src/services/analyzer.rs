//! Water quality analysis pipeline: prompt construction, model invocation,
//! and best-effort interpretation of the model's reply.

use crate::models::{analysis_error_result, parse_fallback_result, AnalysisResult, MeasurementRecord};
use crate::services::providers::TextProvider;
use serde_json::Value;
use std::sync::Arc;

/// Placeholder interpolated for absent measurement fields.
const NOT_SPECIFIED: &str = "Not specified";

/// Runs measurement records through the model and interprets the output.
/// Holds the one provider handle built at startup; cloning shares it.
#[derive(Clone)]
pub struct WaterQualityAnalyzer {
    provider: Arc<dyn TextProvider>,
}

impl WaterQualityAnalyzer {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Analyze a measurement record. Never fails: a provider error is
    /// degraded into the fixed error-shaped result, and unparseable model
    /// output into the raw-text fallback.
    pub async fn analyze(&self, record: &MeasurementRecord) -> AnalysisResult {
        let prompt = build_analysis_prompt(record);

        match self.provider.generate(&prompt).await {
            Ok(text) => interpret_response(&text),
            Err(e) => {
                tracing::warn!(error = %e, "Model invocation failed, returning error result");
                analysis_error_result(&e.to_string())
            }
        }
    }
}

/// Build the analysis prompt for a measurement record.
///
/// Pure and deterministic: the same record always yields the same text.
/// Values are interpolated verbatim with no range or type checks; absent
/// fields read "Not specified" (observations default to "None"). The prompt
/// spells out the exact JSON shape the model is asked to return.
pub fn build_analysis_prompt(record: &MeasurementRecord) -> String {
    let field = |value: &Option<Value>| MeasurementRecord::render(value, NOT_SPECIFIED);

    format!(
        r#"You are a water quality expert specializing in SDG 6 (Clean Water and Sanitation).
Analyze (considering the WHO standard values) the following water quality data and provide actionable recommendations:

WATER QUALITY DATA:
- Location: {location}
- Water Source: {water_source}
- pH Level: {ph_level}
- Turbidity (NTU): {turbidity}
- Total Dissolved Solids (mg/L): {tds}
- Free Chlorine (mg/L): {chlorine}
- E. coli Count (CFU/100mL): {bacteria_count}
- Nitrates (mg/L): {nitrates}
- Fluoride (mg/L): {fluoride}
- Iron (mg/L): {iron}
- Water Hardness (mg/L as CaCO3): {hardness}
- Additional Observations: {additional_notes}

Please provide your analysis in the following JSON format:
{{
    "quality_assessment": "Overall water quality status (Excellent/Good/Fair/Poor/Critical)",
    "risk_level": "Health risk level (Low/Medium/High/Critical)",
    "key_issues": ["List of main water quality issues identified"],
    "immediate_actions": ["Urgent actions needed within 1-7 days"],
    "short_term_solutions": ["Solutions implementable within 1-6 months"],
    "long_term_solutions": ["Sustainable solutions for 6+ months"],
    "cost_estimates": {{
        "immediate": "Estimated cost for immediate actions",
        "short_term": "Estimated cost for short-term solutions",
        "long_term": "Estimated cost for long-term solutions"
    }},
    "health_impacts": ["Potential health impacts if issues are not addressed"],
    "sdg6_alignment": "How these recommendations align with SDG 6 targets",
    "monitoring_plan": ["Parameters to monitor regularly"],
    "community_involvement": ["Ways the local community can participate"]
}}

Focus on practical, cost-effective solutions that can be implemented in the specified location.
Consider local resources, climate, and socioeconomic factors."#,
        location = field(&record.location),
        water_source = field(&record.water_source),
        ph_level = field(&record.ph_level),
        turbidity = field(&record.turbidity),
        tds = field(&record.tds),
        chlorine = field(&record.chlorine),
        bacteria_count = field(&record.bacteria_count),
        nitrates = field(&record.nitrates),
        fluoride = field(&record.fluoride),
        iron = field(&record.iron),
        hardness = field(&record.hardness),
        additional_notes = MeasurementRecord::render(&record.additional_notes, "None"),
    )
}

/// Recover a structured result from free-form model output.
///
/// Takes the span from the first `{` to the last `}` inclusive and tries to
/// decode it as JSON; a successful decode is returned as-is, unvalidated.
/// The span heuristic is deliberately naive: output containing several
/// JSON-like fragments or prose braces over-captures, and then falls back.
pub fn interpret_response(response_text: &str) -> AnalysisResult {
    let start = response_text.find('{');
    let end = response_text.rfind('}');

    if let (Some(start), Some(end)) = (start, end) {
        if start <= end {
            if let Ok(value) = serde_json::from_str::<Value>(&response_text[start..=end]) {
                return value;
            }
        }
    }

    tracing::warn!(
        response_len = response_text.len(),
        "No JSON object recovered from model output, returning raw text"
    );
    parse_fallback_result(response_text)
}
