use serde::Deserialize;
use serde_json::Value;

/// Fields that must carry a non-empty value before analysis is attempted,
/// in the order they are reported back when missing.
pub const REQUIRED_FIELDS: [&str; 4] = ["location", "water_source", "ph_level", "turbidity"];

/// Inbound water-quality measurements. Every field is optional and
/// free-form: callers send numbers or strings as they have them, and values
/// are interpolated into the analysis prompt verbatim. Constructed per
/// request, never persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeasurementRecord {
    pub location: Option<Value>,
    pub water_source: Option<Value>,
    pub ph_level: Option<Value>,
    pub turbidity: Option<Value>,
    pub tds: Option<Value>,
    pub chlorine: Option<Value>,
    pub bacteria_count: Option<Value>,
    pub nitrates: Option<Value>,
    pub fluoride: Option<Value>,
    pub iron: Option<Value>,
    pub hardness: Option<Value>,
    pub additional_notes: Option<Value>,
}

impl MeasurementRecord {
    /// Required fields that are absent or empty, in canonical order.
    ///
    /// "Empty" covers null, "", 0, false, and empty arrays/objects, so a
    /// caller sending `"ph_level": ""` is told to supply it rather than
    /// having the empty string analyzed.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            (REQUIRED_FIELDS[0], &self.location),
            (REQUIRED_FIELDS[1], &self.water_source),
            (REQUIRED_FIELDS[2], &self.ph_level),
            (REQUIRED_FIELDS[3], &self.turbidity),
        ]
        .into_iter()
        .filter(|(_, value)| !has_value(value))
        .map(|(name, _)| name)
        .collect()
    }

    /// Render a field for prompt interpolation: strings verbatim (no
    /// quoting), other JSON values in their JSON form, and the given
    /// placeholder when absent.
    pub fn render(value: &Option<Value>, placeholder: &str) -> String {
        match value {
            None | Some(Value::Null) => placeholder.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

fn has_value(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}
